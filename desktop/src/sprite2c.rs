use argh::FromArgs;
use log::info;
use monosprite_core::{BitOrder, Config, Conversion, Spritesheet, Threshold, convert};

use crate::{error::CliError, image_source::DecodedImage};

mod error;
mod image_source;
mod preview;
mod std_io;

#[derive(FromArgs)]
/// Convert an image or sprite sheet into a 1-bit C byte table
struct Args {
    /// input image path, or - for stdin
    #[argh(option, long = "in", default = "String::from(std_io::STDIO)")]
    input: String,

    /// output file path, or - for stdout
    #[argh(option, long = "out", default = "String::from(std_io::STDIO)")]
    output: String,

    /// name of the generated array
    #[argh(option, default = "String::from(\"sprite\")")]
    name: String,

    /// sprite sheet metadata, switches to frame table output
    #[argh(option)]
    json: Option<String>,

    /// bit order: column-major (default) or row-major
    #[argh(option, default = "BitOrder::default()")]
    order: BitOrder,

    /// foreground rule: premultiplied (default, transparent is background)
    /// or straight (any stored channel)
    #[argh(option, default = "Threshold::default()")]
    threshold: Threshold,

    /// wrap the output in an #ifndef include guard
    #[argh(switch)]
    header_guard: bool,

    /// leave out the PROGMEM qualifier
    #[argh(switch)]
    no_progmem: bool,

    /// also write the unpacked frames to this PNG
    #[argh(option)]
    preview: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    if let Err(err) = run(args) {
        eprintln!("sprite2c: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config {
        name: args.name,
        order: args.order,
        threshold: args.threshold,
        header_guard: args.header_guard,
        progmem: !args.no_progmem,
    };
    if args.json.as_deref() == Some(std_io::STDIO) && args.input == std_io::STDIO {
        return Err(CliError::StdinTwice);
    }

    let mut output = std_io::open_output(&args.output)?;

    let sheet = match &args.json {
        Some(path) => Some(Spritesheet::from_json(&std_io::read_all(path)?)?),
        None => None,
    };

    let image = DecodedImage::decode(&std_io::read_all(&args.input)?)?;
    let Conversion { frames, text } = convert(&image, sheet.as_ref(), &config)?;

    if let Some(path) = &args.preview {
        preview::write(path, &frames)?;
    }

    std_io::write_all(&mut *output, &args.output, &text)?;
    info!(
        "Wrote {} frame(s) as '{}' to {}",
        frames.len(),
        config.name,
        std_io::output_name(&args.output)
    );
    Ok(())
}
