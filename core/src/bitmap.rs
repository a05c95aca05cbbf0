use alloc::{string::String, vec, vec::Vec};

use embedded_graphics::{
    Pixel,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Size},
};

use crate::{Error, Result};

/// Mapping of pixels to bits inside the packed byte table.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum BitOrder {
    /// Each byte holds 8 horizontally adjacent pixels of one row.
    /// Bit 0 is the leftmost pixel.
    RowMajor,
    /// Each byte holds 8 vertically stacked pixels of one column, as in
    /// SSD1306 style page addressing. Bit 0 is the top row of the band.
    #[default]
    ColumnMajor,
}

impl BitOrder {
    /// Byte index and bit position of pixel (x, y) in a `width` wide bitmap.
    pub fn locate(self, x: usize, y: usize, width: usize) -> (usize, u8) {
        match self {
            BitOrder::RowMajor => (x / 8 + y * (width / 8), (x % 8) as u8),
            BitOrder::ColumnMajor => (x + (y / 8) * width, (y % 8) as u8),
        }
    }
}

/// Rejects sizes that do not pack into whole bytes.
pub fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 || width % 8 != 0 || height % 8 != 0 {
        return Err(Error::Dimensions { width, height });
    }
    Ok(())
}

/// One frame, kept both as a plain grid and as packed bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    index: usize,
    name: Option<String>,
    order: BitOrder,
    pixels: Vec<bool>,
    bytes: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, index: usize, order: BitOrder) -> Result<Self> {
        check_dimensions(width, height)?;
        let (width, height) = (width as usize, height as usize);
        Ok(Self {
            width,
            height,
            index,
            name: None,
            order,
            pixels: vec![false; width * height],
            bytes: vec![0; width * height / 8],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Label shown next to the frame number in the emitted comment.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn order(&self) -> BitOrder {
        self.order
    }

    /// Row-major grid, one entry per pixel.
    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn row(&self, y: usize) -> &[bool] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.pixels[y * self.width + x]
    }

    /// Out of range coordinates are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let (byte_index, bit_index) = self.order.locate(x, y, self.width);
        match color {
            BinaryColor::On => {
                self.pixels[y * self.width + x] = true;
                self.bytes[byte_index] |= 1 << bit_index;
            }
            BinaryColor::Off => {
                self.pixels[y * self.width + x] = false;
                self.bytes[byte_index] &= !(1 << bit_index);
            }
        }
    }

    pub fn set(&mut self, x: usize, y: usize) {
        self.set_pixel(x as i32, y as i32, BinaryColor::On);
    }
}

impl OriginDimensions for Bitmap {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for Bitmap {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.set_pixel(coord.x, coord.y, color);
        }
        Ok(())
    }
}

/// Packs a row-major grid into bytes.
pub fn pack(pixels: &[bool], width: u32, height: u32, order: BitOrder) -> Result<Vec<u8>> {
    check_dimensions(width, height)?;
    let (width, height) = (width as usize, height as usize);
    if pixels.len() != width * height {
        return Err(Error::Dimensions {
            width: width as u32,
            height: height as u32,
        });
    }
    let mut bytes = vec![0u8; width * height / 8];
    for y in 0..height {
        for x in 0..width {
            if pixels[y * width + x] {
                let (byte_index, bit_index) = order.locate(x, y, width);
                bytes[byte_index] |= 1 << bit_index;
            }
        }
    }
    Ok(bytes)
}

/// Expands packed bytes back into a row-major grid.
pub fn unpack(bytes: &[u8], width: u32, height: u32, order: BitOrder) -> Result<Vec<bool>> {
    check_dimensions(width, height)?;
    let (width, height) = (width as usize, height as usize);
    if bytes.len() != width * height / 8 {
        return Err(Error::Dimensions {
            width: width as u32,
            height: height as u32,
        });
    }
    let mut pixels = vec![false; width * height];
    for y in 0..height {
        for x in 0..width {
            let (byte_index, bit_index) = order.locate(x, y, width);
            pixels[y * width + x] = (bytes[byte_index] >> bit_index) & 1 == 1;
        }
    }
    Ok(pixels)
}
