use alloc::{string::String, vec::Vec};

use log::{debug, info, trace};

use crate::{
    BitOrder, Bitmap, Error, Result, Rgba, Spritesheet, Threshold, emit, sheet::FrameRect,
};

/// Decoded image as seen by the packer.
pub trait PixelSource {
    fn size(&self) -> (u32, u32);
    /// Caller guarantees `x < width` and `y < height`.
    fn pixel(&self, x: u32, y: u32) -> Rgba;
}

/// Everything that distinguishes one output flavour from another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// C identifier the array and constants are named after.
    pub name: String,
    pub order: BitOrder,
    pub threshold: Threshold,
    pub header_guard: bool,
    /// Prefix the table with the AVR `PROGMEM` qualifier.
    pub progmem: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "sprite".into(),
            order: BitOrder::default(),
            threshold: Threshold::default(),
            header_guard: false,
            progmem: true,
        }
    }
}

fn pack_rect(
    source: &impl PixelSource,
    rect: &FrameRect,
    index: usize,
    config: &Config,
) -> Result<Bitmap> {
    let mut bitmap = Bitmap::new(rect.w, rect.h, index, config.order)?;
    for y in 0..rect.h {
        for x in 0..rect.w {
            if config.threshold.test(source.pixel(rect.x + x, rect.y + y)) {
                bitmap.set(x as usize, y as usize);
            }
        }
    }
    trace!("Packed frame {index} into {} bytes", bitmap.bytes().len());
    Ok(bitmap)
}

/// Thresholds and packs every frame. Without a sheet the whole image is
/// frame 0.
pub fn pack_frames(
    source: &impl PixelSource,
    sheet: Option<&Spritesheet>,
    config: &Config,
) -> Result<Vec<Bitmap>> {
    let (width, height) = source.size();
    let Some(sheet) = sheet else {
        let rect = FrameRect {
            x: 0,
            y: 0,
            w: width,
            h: height,
        };
        return Ok(alloc::vec![pack_rect(source, &rect, 0, config)?]);
    };

    if sheet.is_empty() {
        return Err(Error::EmptySheet);
    }
    let expected = sheet.frames[0].frame.size();
    for (index, frame) in sheet.frames.iter().enumerate() {
        let rect = &frame.frame;
        if !rect.fits(width, height) {
            return Err(Error::OutOfBounds {
                index,
                rect: *rect,
                image: (width, height),
            });
        }
        if rect.size() != expected {
            return Err(Error::MismatchedFrame {
                index,
                expected,
                found: rect.size(),
            });
        }
    }

    let mut bitmaps = Vec::with_capacity(sheet.len());
    for (index, frame) in sheet.frames.iter().enumerate() {
        debug!("Packing frame {index} '{}'", frame.filename);
        let bitmap = pack_rect(source, &frame.frame, index, config)?;
        bitmaps.push(bitmap.with_name(frame.filename.as_str()));
    }
    Ok(bitmaps)
}

/// Renders packed frames. `sheet` selects the frame table layout over the
/// flat single image array.
pub fn render(bitmaps: &[Bitmap], sheet: bool, config: &Config) -> Result<String> {
    let mut out = String::new();
    if sheet {
        emit::write_sheet(&mut out, bitmaps, config)?;
    } else {
        let [bitmap] = bitmaps else {
            return Err(Error::EmptySheet);
        };
        emit::write_single(&mut out, bitmap, config)?;
    }
    Ok(out)
}

/// Packed frames together with their rendered source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub frames: Vec<Bitmap>,
    pub text: String,
}

/// Full conversion: pack and render. Nothing is rendered unless every frame
/// packs.
pub fn convert(
    source: &impl PixelSource,
    sheet: Option<&Spritesheet>,
    config: &Config,
) -> Result<Conversion> {
    let frames = pack_frames(source, sheet, config)?;
    let order: &'static str = config.order.into();
    info!(
        "Packed {} frame(s) of {}x{} ({order})",
        frames.len(),
        frames[0].width(),
        frames[0].height()
    );
    let text = render(&frames, sheet.is_some(), config)?;
    Ok(Conversion { frames, text })
}
