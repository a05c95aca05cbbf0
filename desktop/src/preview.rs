use log::info;
use monosprite_core::{Bitmap, bitmap};

use crate::error::CliError;

const GAP: usize = 2;

/// Unpacks every frame from its packed bytes and lays the frames out side by
/// side, foreground white on black, with a small gap between frames.
pub fn render(frames: &[Bitmap]) -> Result<(u32, u32, Vec<u8>), CliError> {
    let height = frames.iter().map(Bitmap::height).max().unwrap_or(0);
    let width = frames.iter().map(|frame| frame.width() + GAP).sum::<usize>().saturating_sub(GAP);
    let mut buffer = vec![0u8; width * height];

    let mut left = 0;
    for frame in frames {
        let pixels = bitmap::unpack(
            frame.bytes(),
            frame.width() as u32,
            frame.height() as u32,
            frame.order(),
        )?;
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                if pixels[y * frame.width() + x] {
                    buffer[y * width + left + x] = 0xFF;
                }
            }
        }
        left += frame.width() + GAP;
    }
    Ok((width as u32, height as u32, buffer))
}

pub fn write(path: &str, frames: &[Bitmap]) -> Result<(), CliError> {
    let (width, height, buffer) = render(frames)?;
    image::save_buffer(path, &buffer, width, height, image::ColorType::L8).map_err(|source| {
        CliError::Preview {
            path: path.into(),
            source,
        }
    })?;
    info!("Wrote {width}x{height} preview to {path}");
    Ok(())
}
