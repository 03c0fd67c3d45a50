use std::path::PathBuf;

use clap::Parser;
use lib_retro::{Preset, QuantizeMethod};

#[derive(Parser, Debug)]
#[command(version, about = "Reduces images to a fixed retro palette.", long_about = None)]
pub struct Args {
    /// Image to convert (any format the image crate can read).
    #[arg(short, long, required_unless_present = "list_presets")]
    pub input: Option<PathBuf>,

    /// Where to write the converted RGBA PNG.
    #[arg(short, long, required_unless_present = "list_presets")]
    pub output: Option<PathBuf>,

    /// Bit layout of the palette, e.g. RGB332 or rgb111.
    #[arg(short, long, default_value_t = Preset::Rgb332)]
    pub preset: Preset,

    /// Palette index that becomes fully transparent.
    #[arg(short, long, default_value_t = 0)]
    pub background: u8,

    /// How source colors are matched to the palette: nearest or truncate.
    #[arg(short, long, default_value_t = QuantizeMethod::Nearest)]
    pub method: QuantizeMethod,

    /// Also write the palette table to this file (`.rpal` is added when it has no extension).
    #[arg(long)]
    pub palette_out: Option<PathBuf>,

    /// Write lib_retro debug logs to this file instead of stderr.
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Print every preset with its color count and exit.
    #[arg(long, default_value_t = false)]
    pub list_presets: bool,
}
