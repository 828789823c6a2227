//! Command-line arguments for `convertfb`.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

/// Pack an image into a raw framebuffer file
#[derive(Parser, Debug)]
#[command(name = "convertfb")]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Image to convert (any format the decoder supports)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "IMAGE",
        default_value = "demo.bmp",
        allow_hyphen_values = true
    )]
    pub input: PathBuf,

    /// Framebuffer file to write
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        default_value = "demo.fb",
        allow_hyphen_values = true
    )]
    pub output: PathBuf,

    /// Width of the framebuffer in pixels (default: image width) [short: -bw]
    #[arg(long = "width", visible_alias = "bw", value_name = "WIDTH", allow_negative_numbers = true)]
    pub width: Option<i64>,

    /// Height of the framebuffer in pixels (default: image height) [short: -bh]
    #[arg(long = "height", visible_alias = "bh", value_name = "HEIGHT", allow_negative_numbers = true)]
    pub height: Option<i64>,

    /// Bytes per pixel and their order: RGB, BGR, ARGB, BGRA, RRR, ...
    #[arg(
        short = 'f',
        long = "format",
        value_name = "FORMAT",
        default_value = "RGB",
        allow_hyphen_values = true
    )]
    pub format: String,

    /// Do not print the summary and crop/pad notices
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

/// Two-letter short flags from the classic converter, rewritten to their long
/// forms so clap can parse them.
const LEGACY_SHORTS: &[(&str, &str)] = &[("-bw", "--width"), ("-bh", "--height")];

/// Options whose value is the next token; that token is never rewritten.
const VALUE_OPTIONS: &[&str] = &[
    "-i", "--input", "-o", "--output", "-f", "--format", "--width", "--height", "--bw", "--bh",
];

/// Rewrite `-bw 800`, `-bw=800` and `-bw800` into `--width ...` (same for `-bh`).
///
/// Everything after a bare `--` is passed through untouched, as is the value
/// following an option that takes one (`-o -bh.fb` names a file).
pub(crate) fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;
    let mut value_next = false;
    for arg in args {
        if passthrough || value_next {
            value_next = false;
            out.push(arg);
            continue;
        }
        let Some(text) = arg.to_str() else {
            out.push(arg);
            continue;
        };
        if text == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        match rewrite_legacy(text) {
            Some(mut replaced) => {
                value_next = replaced.len() == 1;
                out.append(&mut replaced);
            }
            None => {
                value_next = VALUE_OPTIONS.contains(&text);
                out.push(arg);
            }
        }
    }
    out
}

fn rewrite_legacy(text: &str) -> Option<Vec<OsString>> {
    for (short, long) in LEGACY_SHORTS {
        let Some(rest) = text.strip_prefix(short) else {
            continue;
        };
        let value = rest.strip_prefix('=').unwrap_or(rest);
        return Some(if value.is_empty() {
            vec![OsString::from(*long)]
        } else {
            vec![OsString::from(*long), OsString::from(value)]
        });
    }
    None
}

impl Cli {
    pub(crate) fn parse_normalized() -> Cli {
        Cli::parse_from(normalize_args(std::env::args_os()))
    }
}
