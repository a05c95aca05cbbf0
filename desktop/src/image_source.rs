use image::{DynamicImage, ImageBuffer};
use log::info;
use monosprite_core::{PixelSource, Rgba};

use crate::error::CliError;

type Rgba16Image = ImageBuffer<image::Rgba<u16>, Vec<u16>>;

/// Decoded image expanded to straight RGBA16, so 16-bit sources keep their
/// full precision through thresholding. Indexed, grayscale and 8-bit inputs
/// go through the decoder's own expansion.
pub struct DecodedImage(Rgba16Image);

impl DecodedImage {
    /// Format is sniffed from the data, so stdin works as well as files.
    pub fn decode(data: &[u8]) -> Result<Self, CliError> {
        let format = image::guess_format(data)?;
        let image = image::load_from_memory_with_format(data, format)?;
        info!(
            "Decoded {:?} image: {}x{} {:?}",
            format,
            image.width(),
            image.height(),
            image.color()
        );
        Ok(Self::from(image))
    }
}

impl From<DynamicImage> for DecodedImage {
    fn from(image: DynamicImage) -> Self {
        Self(image.into_rgba16())
    }
}

impl PixelSource for DecodedImage {
    fn size(&self) -> (u32, u32) {
        self.0.dimensions()
    }

    fn pixel(&self, x: u32, y: u32) -> Rgba {
        self.0.get_pixel(x, y).0
    }
}
