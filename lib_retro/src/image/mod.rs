pub mod composite;
pub mod format;
pub mod quantize;

use log::info;
use thiserror::Error;

use crate::palette::ColorTable;

pub use composite::composite_with_transparency;
pub use format::{IndexedImage, TrueColorImage};
pub use quantize::{quantize, QuantizeMethod};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    #[error("Invalid pixel data length: expected multiple of 4 bytes, got {0}")]
    InvalidPixelDataLength(usize),
    #[error("Buffer of {len} pixels does not match {width}x{height}")]
    DimensionMismatch { width: u32, height: u32, len: usize },
    #[error("Invalid palette index {index} at ({x}, {y}): palette holds {palette_size} colors")]
    IndexOutOfRange {
        index: u8,
        palette_size: usize,
        x: u32,
        y: u32,
    },
    #[error("Pixel ({x}, {y}) lies outside the {width}x{height} image")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error("Could not allocate an image buffer of {0} pixels")]
    AllocationError(usize),
}

/// Quantizes an RGBA buffer against `table` and composites the result, so
/// that pixels landing on `transparent_index` come out fully transparent.
pub fn convert_to_retro(
    rgba: &[u8],
    width: u32,
    height: u32,
    table: &ColorTable,
    transparent_index: u8,
    method: QuantizeMethod,
) -> Result<TrueColorImage, ImageError> {
    let indexed = quantize(rgba, width, height, table, method)?;
    let converted = composite_with_transparency(&indexed, table, transparent_index)?;
    info!("Retro conversion completed successfully");

    Ok(converted)
}
