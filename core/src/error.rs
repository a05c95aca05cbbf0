use core::fmt;

use crate::sheet::FrameRect;

#[derive(Debug)]
pub enum Error {
    /// Metadata is not valid JSON or lacks a required field.
    Json(serde_json::Error),
    /// Metadata parsed but lists no frames.
    EmptySheet,
    /// The packer stored this frame rotated; rotated frames are not supported.
    RotatedFrame { index: usize },
    /// Width or height is zero or not a multiple of 8.
    Dimensions { width: u32, height: u32 },
    /// Frame rectangle reaches outside the source image.
    OutOfBounds {
        index: usize,
        rect: FrameRect,
        image: (u32, u32),
    },
    /// Frame size differs from the first frame.
    MismatchedFrame {
        index: usize,
        expected: (u32, u32),
        found: (u32, u32),
    },
    /// Array name is not a valid C identifier.
    InvalidName,
    Format,
}

pub type Result<T> = core::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Error::Format
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Json(err) => write!(f, "invalid sprite sheet metadata: {err}"),
            Error::EmptySheet => write!(f, "sprite sheet metadata lists no frames"),
            Error::RotatedFrame { index } => {
                write!(f, "frame {index} is rotated in the sheet, disable rotation in the packer")
            }
            Error::Dimensions { width, height } => write!(
                f,
                "{width}x{height} is not packable, width and height must be non-zero multiples of 8"
            ),
            Error::OutOfBounds { index, rect, image } => write!(
                f,
                "frame {index} at ({},{}) size {}x{} exceeds the {}x{} image",
                rect.x, rect.y, rect.w, rect.h, image.0, image.1
            ),
            Error::MismatchedFrame {
                index,
                expected,
                found,
            } => write!(
                f,
                "frame {index} is {}x{} but frame 0 is {}x{}, all frames must share one size",
                found.0, found.1, expected.0, expected.1
            ),
            Error::InvalidName => write!(f, "array name must be a valid C identifier"),
            Error::Format => write!(f, "failed to format output"),
        }
    }
}
