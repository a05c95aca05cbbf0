//! C source emission.
//!
//! Every frame is written as an ASCII art block comment followed by its
//! packed bytes:
//!
//! ```text
//!   /* Frame number 0 (walk_0.png)
//!       ##      ##
//!       ...
//!   */
//!   {0xff,0x81,...}
//! ```

use core::fmt::Write;

use crate::{Bitmap, Config, Error, Result};

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Smallest unsigned C type holding `value`.
fn c_type(value: usize) -> &'static str {
    if value <= u8::MAX as usize {
        "uint8_t"
    } else if value <= u16::MAX as usize {
        "uint16_t"
    } else {
        "uint32_t"
    }
}

fn write_scalar(out: &mut impl Write, name: &str, suffix: &str, value: usize) -> Result<()> {
    writeln!(out, "const {} {name}{suffix} = {value};", c_type(value))?;
    Ok(())
}

fn write_array_open(out: &mut impl Write, config: &Config, decl: &str) -> Result<()> {
    let storage = if config.progmem { " PROGMEM" } else { "" };
    writeln!(out, "const uint8_t{storage} {decl} = {{")?;
    Ok(())
}

fn guard_macro(name: &str) -> alloc::string::String {
    let mut guard = name.to_ascii_uppercase();
    guard.push_str("_H");
    guard
}

/// The ASCII art comment for one frame.
pub fn write_ascii(out: &mut impl Write, bitmap: &Bitmap) -> Result<()> {
    write!(out, "  /* Frame number {}", bitmap.index())?;
    if let Some(name) = bitmap.name().filter(|name| !name.is_empty()) {
        write!(out, " ({})", name.replace("*/", "*\\/"))?;
    }
    out.write_char('\n')?;
    for y in 0..bitmap.height() {
        if y != 0 {
            out.write_char('\n')?;
        }
        out.write_str("      ")?;
        for &set in bitmap.row(y) {
            out.write_char(if set { '#' } else { ' ' })?;
        }
    }
    out.write_str("\n  */\n")?;
    Ok(())
}

/// Comma separated `0x..` literals, no surrounding braces.
pub fn write_bytes(out: &mut impl Write, bytes: &[u8]) -> Result<()> {
    for (i, byte) in bytes.iter().enumerate() {
        if i != 0 {
            out.write_char(',')?;
        }
        write!(out, "{byte:#04x}")?;
    }
    Ok(())
}

/// Comment plus brace enclosed byte list, as one element of a frame table.
pub fn write_frame(out: &mut impl Write, bitmap: &Bitmap) -> Result<()> {
    write_ascii(out, bitmap)?;
    out.write_str("  {")?;
    write_bytes(out, bitmap.bytes())?;
    out.write_char('}')?;
    Ok(())
}

fn write_guarded<W: Write>(
    out: &mut W,
    config: &Config,
    body: impl FnOnce(&mut W) -> Result<()>,
) -> Result<()> {
    if !is_identifier(&config.name) {
        return Err(Error::InvalidName);
    }
    let guard = guard_macro(&config.name);
    if config.header_guard {
        write!(out, "#ifndef {guard}\n#define {guard}\n\n")?;
    }
    body(out)?;
    if config.header_guard {
        out.write_str("\n#endif\n")?;
    }
    Ok(())
}

/// Frame table for a sprite sheet. All frames must share the first
/// frame's size, which is what the emitted width/height constants declare.
pub fn write_sheet(out: &mut impl Write, frames: &[Bitmap], config: &Config) -> Result<()> {
    let Some(first) = frames.first() else {
        return Err(Error::EmptySheet);
    };
    let expected = (first.width() as u32, first.height() as u32);
    for frame in frames {
        let found = (frame.width() as u32, frame.height() as u32);
        if found != expected {
            return Err(Error::MismatchedFrame {
                index: frame.index(),
                expected,
                found,
            });
        }
    }

    write_guarded(out, config, |out| {
        let name = config.name.as_str();
        write_scalar(out, name, "FrameCount", frames.len())?;
        write_scalar(out, name, "FrameWidth", first.width())?;
        write_scalar(out, name, "FrameHeight", first.height())?;
        let decl = alloc::format!("{name}Frames[][{}]", first.bytes().len());
        write_array_open(out, config, &decl)?;
        for (n, frame) in frames.iter().enumerate() {
            if n != 0 {
                out.write_str(",\n")?;
            }
            write_frame(out, frame)?;
        }
        out.write_str("\n};\n")?;
        Ok(())
    })
}

/// Flat array for a single image.
pub fn write_single(out: &mut impl Write, bitmap: &Bitmap, config: &Config) -> Result<()> {
    write_guarded(out, config, |out| {
        let name = config.name.as_str();
        write_scalar(out, name, "Width", bitmap.width())?;
        write_scalar(out, name, "Height", bitmap.height())?;
        let decl = alloc::format!("{name}[{}]", bitmap.bytes().len());
        write_array_open(out, config, &decl)?;
        write_ascii(out, bitmap)?;
        out.write_str("  ")?;
        write_bytes(out, bitmap.bytes())?;
        out.write_str("\n};\n")?;
        Ok(())
    })
}
