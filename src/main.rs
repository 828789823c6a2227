//! convertfb - pack an image into a raw framebuffer file.
//!
//! Reads any image the decoder understands, reorders its channels into the
//! requested format and writes exactly `width * height * channels` bytes.

use std::error::Error;
use std::process::ExitCode;

use colored::Colorize;
use fbpack::convert::{ConvertError, ConvertOptions, Conversion, ImageFileDecoder};

mod cli;

use cli::Cli;

// sysexits.h
const EX_USAGE: u8 = 64;
const EX_DATAERR: u8 = 65;
const EX_SOFTWARE: u8 = 70;
const EX_IOERR: u8 = 74;

fn exit_code(err: &ConvertError) -> u8 {
    match err {
        ConvertError::SourceDecode { .. } => EX_DATAERR,
        ConvertError::Pack(e) if e.is_config_error() => EX_USAGE,
        ConvertError::Pack(_) => EX_SOFTWARE,
        ConvertError::IoWrite { .. } => EX_IOERR,
    }
}

fn run(cli: &Cli) -> Result<(), ConvertError> {
    // Configuration errors surface before the image is touched.
    let options = ConvertOptions::new(cli.width, cli.height, &cli.format)?;
    let job = Conversion::prepare(&ImageFileDecoder, &cli.input, &options)?;

    if !cli.quiet {
        let source = job.source();
        println!(
            "Image: {} {} X {} {}",
            cli.input.display(),
            source.image.width(),
            source.image.height(),
            source.mode
        );
        println!("FrameBuffer: {} {}", job.geometry(), job.spec());

        let plan = job.plan();
        let geometry = job.geometry();
        if plan.crops_width() {
            println!("{} cut the Image width to {}", "note:".yellow(), geometry.width());
        }
        if plan.crops_height() {
            println!("{} cut the Image height to {}", "note:".yellow(), geometry.height());
        }
        if plan.pads_width() || plan.pads_height() {
            println!(
                "{} image is smaller than the buffer, filling the rest with 0",
                "note:".yellow()
            );
        }
    }

    let written = job.write_to(&cli.output)?;
    if !cli.quiet {
        println!(
            "{} {} bytes to {}",
            "Wrote".green().bold(),
            written,
            cli.output.display()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse_normalized();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "error".red(), e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  {} {}", "caused by:".dimmed(), cause);
                source = cause.source();
            }
            ExitCode::from(exit_code(&e))
        }
    }
}
