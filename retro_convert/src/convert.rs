use std::io;
use std::path::Path;

use image::{ImageError, RgbaImage};
use lib_retro::{
    convert_to_retro, save_palette, with_palette_extension, ColorTable, PaletteError,
    PaletteIoError, QuantizeMethod,
};
use log::{info, warn};
use thiserror::Error;

use crate::cli::Args;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing {0} path")]
    MissingPath(&'static str),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),

    #[error("Palette error: {0}")]
    PaletteError(#[from] PaletteError),

    #[error("Palette file error: {0}")]
    PaletteIoError(#[from] PaletteIoError),

    #[error("Retro conversion error: {0}")]
    ConversionError(#[from] lib_retro::ImageError),

    #[error("Converted image does not fit {0}x{1}")]
    BufferMismatch(u32, u32),
}

pub fn run(args: &Args) -> Result<(), AppError> {
    let table = args.preset.color_table()?;

    if let Some(path) = &args.palette_out {
        save_palette(with_palette_extension(path), &table)?;
    }

    let input = args.input.as_deref().ok_or(AppError::MissingPath("input"))?;
    let output = args
        .output
        .as_deref()
        .ok_or(AppError::MissingPath("output"))?;

    convert_file(input, output, &table, args.background, args.method)
}

pub fn convert_file(
    input: &Path,
    output: &Path,
    table: &ColorTable,
    background: u8,
    method: QuantizeMethod,
) -> Result<(), AppError> {
    if background as usize >= table.len() {
        warn!(
            "Background index {} is outside the {} color palette, nothing will be transparent",
            background,
            table.len()
        );
    }

    let source = image::open(input)?.to_rgba8();
    let (width, height) = source.dimensions();
    info!("Loaded {} ({}x{})", input.display(), width, height);

    let converted = convert_to_retro(source.as_raw(), width, height, table, background, method)?;

    let result = RgbaImage::from_raw(width, height, converted.to_rgba_bytes())
        .ok_or(AppError::BufferMismatch(width, height))?;
    result.save(output)?;
    info!("Saved {}", output.display());

    Ok(())
}

pub fn list_presets() -> String {
    lib_retro::Preset::ALL
        .iter()
        .map(|preset| format!("{:<8}{:>4} colors", preset.name(), preset.color_count()))
        .collect::<Vec<_>>()
        .join("\n")
}
