use std::{
    fs,
    io::{self, BufWriter, Read, Write},
};

use log::{debug, info};

use crate::error::CliError;

/// Path value standing for stdin or stdout.
pub const STDIO: &str = "-";

pub fn input_name(path: &str) -> &str {
    if path == STDIO { "stdin" } else { path }
}

pub fn output_name(path: &str) -> &str {
    if path == STDIO { "stdout" } else { path }
}

/// Reads a whole file, or stdin for `-`.
pub fn read_all(path: &str) -> Result<Vec<u8>, CliError> {
    let mut data = Vec::new();
    if path == STDIO {
        io::stdin()
            .lock()
            .read_to_end(&mut data)
            .map_err(|source| CliError::Read {
                path: path.into(),
                source,
            })?;
    } else {
        let mut file = fs::File::open(path).map_err(|source| CliError::Open {
            path: path.into(),
            source,
        })?;
        file.read_to_end(&mut data)
            .map_err(|source| CliError::Read {
                path: path.into(),
                source,
            })?;
    }
    debug!("Read {} bytes from {}", data.len(), input_name(path));
    Ok(data)
}

/// Buffered writer for a file (created or truncated), or stdout for `-`.
pub fn open_output(path: &str) -> Result<Box<dyn Write>, CliError> {
    if path == STDIO {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|source| CliError::Open {
            path: path.into(),
            source,
        })?;
    info!("Writing output to {path}");
    Ok(Box::new(BufWriter::new(file)))
}

/// Writes everything and flushes, so a failed write is reported instead of
/// being lost when the writer is dropped.
pub fn write_all(out: &mut dyn Write, path: &str, text: &str) -> Result<(), CliError> {
    out.write_all(text.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|source| CliError::Write {
            path: path.into(),
            source,
        })
}
