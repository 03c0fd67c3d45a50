pub mod image;
pub mod palette;

use log::*;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub use crate::image::{
    composite_with_transparency, convert_to_retro, quantize, ImageError, IndexedImage,
    QuantizeMethod, TrueColorImage,
};
pub use crate::palette::io::{
    load_palette, save_palette, with_palette_extension, PaletteIoError,
};
pub use crate::palette::{build_color_table, ColorTable, PaletteError, PaletteLayout, Preset, Rgba};

/// Sends `lib_retro` debug logs to the file at `path`.
pub fn init_logging(path: impl AsRef<Path>) -> io::Result<()> {
    let target = Box::new(File::create(path)?);

    env_logger::Builder::new()
        .target(env_logger::Target::Pipe(target))
        .filter(Some("lib_retro"), LevelFilter::Debug)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();

    Ok(())
}
