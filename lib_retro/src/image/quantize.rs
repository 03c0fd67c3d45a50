use std::fmt;
use std::str::FromStr;

use log::{debug, error, info};

use super::format::{alloc_buffer, pixel_count, IndexedImage};
use super::ImageError;
use crate::palette::{ColorTable, Rgba};

/// How a true-color pixel is mapped onto a palette index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuantizeMethod {
    /// Closest table entry by squared RGB distance; ties go to the lowest index.
    #[default]
    Nearest,
    /// Reverses the layout's mask and shift, dropping the low bits of each channel.
    Truncate,
}

impl fmt::Display for QuantizeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantizeMethod::Nearest => f.write_str("nearest"),
            QuantizeMethod::Truncate => f.write_str("truncate"),
        }
    }
}

impl FromStr for QuantizeMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(QuantizeMethod::Nearest),
            "truncate" => Ok(QuantizeMethod::Truncate),
            other => Err(format!("unknown quantize method: {}", other)),
        }
    }
}

fn distance(a: Rgba, r: u8, g: u8, b: u8) -> u32 {
    let dr = a.r as i32 - r as i32;
    let dg = a.g as i32 - g as i32;
    let db = a.b as i32 - b as i32;
    (dr * dr + dg * dg + db * db) as u32
}

fn nearest_index(entries: &[Rgba], r: u8, g: u8, b: u8) -> u8 {
    let mut best = 0usize;
    let mut best_distance = u32::MAX;

    for (i, &entry) in entries.iter().enumerate() {
        let d = distance(entry, r, g, b);
        if d < best_distance {
            best = i;
            best_distance = d;
            if d == 0 {
                break;
            }
        }
    }

    best as u8
}

/// Reduces an RGBA buffer to indices into `table`.
///
/// Source alpha is ignored; every palette entry is opaque.
///
/// # Errors
/// - `ImageError::InvalidPixelDataLength` if `rgba` is not a multiple of 4 bytes
/// - `ImageError::DimensionMismatch` if it does not hold `width * height` pixels
/// - `ImageError::IndexOutOfRange` if `Truncate` yields an index past the table,
///   which only happens for layouts whose masks exceed the color count
pub fn quantize(
    rgba: &[u8],
    width: u32,
    height: u32,
    table: &ColorTable,
    method: QuantizeMethod,
) -> Result<IndexedImage, ImageError> {
    info!(
        "Quantizing {}x{} image to {} colors ({})",
        width,
        height,
        table.len(),
        method
    );

    if rgba.len() % 4 != 0 {
        error!("Pixel data length {} is not a multiple of 4", rgba.len());
        return Err(ImageError::InvalidPixelDataLength(rgba.len()));
    }
    let count = pixel_count(width, height)?;
    if rgba.len() / 4 != count {
        error!(
            "Pixel data holds {} pixels, {}x{} needs {}",
            rgba.len() / 4,
            width,
            height,
            count
        );
        return Err(ImageError::DimensionMismatch {
            width,
            height,
            len: rgba.len() / 4,
        });
    }

    let mut indices = alloc_buffer(count)?;
    let layout = table.layout();

    for (offset, pixel) in rgba.chunks_exact(4).enumerate() {
        let (r, g, b) = (pixel[0], pixel[1], pixel[2]);
        let index = match method {
            QuantizeMethod::Nearest => nearest_index(table.entries(), r, g, b),
            QuantizeMethod::Truncate => layout.index_of(r, g, b),
        };

        if index as usize >= table.len() {
            let (x, y) = (offset % width as usize, offset / width as usize);
            error!("Index {} exceeds palette size of {}", index, table.len());
            return Err(ImageError::IndexOutOfRange {
                index,
                palette_size: table.len(),
                x: x as u32,
                y: y as u32,
            });
        }
        indices.push(index);
    }
    debug!("Quantized {} pixels", indices.len());

    IndexedImage::new(width, height, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{build_color_table, PaletteLayout, Preset};

    #[test]
    fn test_nearest_exact_entries() {
        let table = Preset::Rgb121.color_table().unwrap();
        let rgba: Vec<u8> = table.entries().iter().flat_map(|c| c.to_bytes()).collect();

        let image = quantize(&rgba, 16, 1, &table, QuantizeMethod::Nearest).unwrap();
        let expected: Vec<u8> = (0..16).collect();
        assert_eq!(image.indices(), expected.as_slice());
    }

    #[test]
    fn test_nearest_picks_closest() {
        let table = Preset::Rgb111.color_table().unwrap();
        // Rgb111 channels are 0 or 0x80; 0xF0 is closer to 0x80 than to 0
        let rgba = [0xF0, 0x10, 0x70, 0x00];

        let image = quantize(&rgba, 1, 1, &table, QuantizeMethod::Nearest).unwrap();
        assert_eq!(table.get(image.indices()[0]), Some(Rgba::new(0x80, 0, 0x80, 255)));
    }

    #[test]
    fn test_nearest_ties_prefer_lowest_index() {
        let table = Preset::Rgb111.color_table().unwrap();
        // 0x40 is equidistant from 0 and 0x80 on every channel
        let image = quantize(&[0x40, 0x40, 0x40, 0xFF], 1, 1, &table, QuantizeMethod::Nearest)
            .unwrap();
        assert_eq!(image.indices(), &[0]);
    }

    #[test]
    fn test_truncate_drops_low_bits() {
        let table = Preset::Rgb332.color_table().unwrap();
        let image = quantize(&[0xFF, 0x1F, 0x7F, 0xFF], 1, 1, &table, QuantizeMethod::Truncate)
            .unwrap();
        // red 0b111, green 0b000, blue 0b01
        assert_eq!(image.indices(), &[0b1110_0001]);
    }

    #[test]
    fn test_truncate_outside_color_count() {
        let layout = PaletteLayout::new(8, [0xE0, 0x1C, 0x03], [0, 3, 6]).unwrap();
        let table = build_color_table(&layout).unwrap();

        let result = quantize(&[0xFF, 0, 0, 0xFF], 1, 1, &table, QuantizeMethod::Truncate);
        assert_eq!(
            result,
            Err(ImageError::IndexOutOfRange {
                index: 0xE0,
                palette_size: 8,
                x: 0,
                y: 0,
            })
        );
    }

    #[test]
    fn test_invalid_lengths() {
        let table = Preset::Rgb111.color_table().unwrap();
        assert_eq!(
            quantize(&[0, 0, 0], 1, 1, &table, QuantizeMethod::Nearest),
            Err(ImageError::InvalidPixelDataLength(3))
        );
        assert_eq!(
            quantize(&[0; 8], 3, 1, &table, QuantizeMethod::Nearest),
            Err(ImageError::DimensionMismatch {
                width: 3,
                height: 1,
                len: 2,
            })
        );
    }

    #[test]
    fn test_method_names() {
        assert_eq!("Nearest".parse::<QuantizeMethod>(), Ok(QuantizeMethod::Nearest));
        assert_eq!("truncate".parse::<QuantizeMethod>(), Ok(QuantizeMethod::Truncate));
        assert!("dither".parse::<QuantizeMethod>().is_err());
        assert_eq!(QuantizeMethod::default().to_string(), "nearest");
    }
}
