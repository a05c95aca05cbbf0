#![no_std]

pub mod bitmap;
pub mod convert;
pub mod emit;
pub mod error;
pub mod sheet;
pub mod threshold;

pub use bitmap::{BitOrder, Bitmap};
pub use convert::{Config, Conversion, PixelSource, convert, pack_frames, render};
pub use error::{Error, Result};
pub use sheet::{Frame, FrameRect, Spritesheet};
pub use threshold::{Rgba, Threshold, is_foreground};

extern crate alloc;
