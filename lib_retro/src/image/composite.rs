use log::{debug, error, info};

use super::format::{alloc_buffer, IndexedImage, TrueColorImage};
use super::ImageError;
use crate::palette::ColorTable;

/// Resolves an indexed image through `table` into packed RGBA words.
///
/// Pixels equal to `transparent_index` become the zero word; every other
/// pixel is the table entry packed as `(r << 24) | (g << 16) | (b << 8) | a`.
///
/// # Errors
/// - `ImageError::IndexOutOfRange` if any pixel, transparent or not, addresses past the table
/// - `ImageError::AllocationError` if the output buffer cannot be reserved
pub fn composite_with_transparency(
    image: &IndexedImage,
    table: &ColorTable,
    transparent_index: u8,
) -> Result<TrueColorImage, ImageError> {
    let (width, height) = (image.width(), image.height());
    info!(
        "Compositing {}x{} image against {} colors, background index {}",
        width,
        height,
        table.len(),
        transparent_index
    );

    let mut pixels = alloc_buffer(image.indices().len())?;
    let entries = table.entries();

    for (offset, &index) in image.indices().iter().enumerate() {
        let color = entries.get(index as usize).ok_or_else(|| {
            let (x, y) = (offset % width as usize, offset / width as usize);
            error!(
                "Index {} at ({}, {}) exceeds palette size of {}",
                index,
                x,
                y,
                entries.len()
            );
            ImageError::IndexOutOfRange {
                index,
                palette_size: entries.len(),
                x: x as u32,
                y: y as u32,
            }
        })?;

        if index == transparent_index {
            pixels.push(0);
        } else {
            pixels.push(color.to_word());
        }
    }
    debug!("Composited {} pixels", pixels.len());

    Ok(TrueColorImage::from_words(width, height, pixels))
}
