use std::{fmt, io};

use crate::std_io;

#[derive(Debug)]
pub enum CliError {
    Open { path: String, source: io::Error },
    Read { path: String, source: io::Error },
    Write { path: String, source: io::Error },
    /// Image and metadata cannot both come from stdin.
    StdinTwice,
    Decode(image::ImageError),
    Preview { path: String, source: image::ImageError },
    Convert(monosprite_core::Error),
}

impl From<monosprite_core::Error> for CliError {
    fn from(err: monosprite_core::Error) -> Self {
        CliError::Convert(err)
    }
}

impl From<image::ImageError> for CliError {
    fn from(err: image::ImageError) -> Self {
        CliError::Decode(err)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Open { path, source } => {
                write!(f, "cannot open {path}: {source}")
            }
            CliError::Read { path, source } => {
                write!(f, "cannot read {}: {source}", std_io::input_name(path))
            }
            CliError::Write { path, source } => {
                write!(f, "cannot write {}: {source}", std_io::output_name(path))
            }
            CliError::StdinTwice => write!(f, "--in and --json cannot both read stdin"),
            CliError::Decode(err) => write!(f, "cannot decode image: {err}"),
            CliError::Preview { path, source } => write!(f, "cannot write preview {path}: {source}"),
            CliError::Convert(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CliError {}
