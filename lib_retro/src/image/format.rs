use log::error;

use super::ImageError;
use crate::palette::Rgba;

/// Grid of palette indices, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    width: u32,
    height: u32,
    indices: Vec<u8>,
}

impl IndexedImage {
    pub fn new(width: u32, height: u32, indices: Vec<u8>) -> Result<Self, ImageError> {
        let expected = pixel_count(width, height)?;
        if indices.len() != expected {
            error!(
                "Index buffer holds {} pixels, {}x{} needs {}",
                indices.len(),
                width,
                height,
                expected
            );
            return Err(ImageError::DimensionMismatch {
                width,
                height,
                len: indices.len(),
            });
        }

        Ok(Self {
            width,
            height,
            indices,
        })
    }

    /// Image of `width` x `height` pixels all set to `index`.
    pub fn filled(width: u32, height: u32, index: u8) -> Result<Self, ImageError> {
        let count = pixel_count(width, height)?;
        let mut indices = alloc_buffer(count)?;
        indices.resize(count, index);
        Self::new(width, height, indices)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        self.offset(x, y).map(|i| self.indices[i])
    }

    pub fn set(&mut self, x: u32, y: u32, index: u8) -> Result<(), ImageError> {
        let i = self.offset(x, y).ok_or_else(|| {
            error!(
                "Cannot write ({}, {}) in a {}x{} image",
                x, y, self.width, self.height
            );
            ImageError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            }
        })?;
        self.indices[i] = index;
        Ok(())
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

/// Grid of packed RGBA words, `(r << 24) | (g << 16) | (b << 8) | a`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrueColorImage {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl TrueColorImage {
    pub(crate) fn from_words(width: u32, height: u32, pixels: Vec<u32>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let word = self.pixels[y as usize * self.width as usize + x as usize];
        Some(Rgba::from_word(word))
    }

    /// Pixel data as RGBA bytes, four per pixel.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|word| word.to_be_bytes())
            .collect()
    }
}

pub(crate) fn pixel_count(width: u32, height: u32) -> Result<usize, ImageError> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(ImageError::AllocationError(usize::MAX))
}

pub(crate) fn alloc_buffer<T>(len: usize) -> Result<Vec<T>, ImageError> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len).map_err(|_| {
        error!("Could not allocate memory for {} pixels", len);
        ImageError::AllocationError(len)
    })?;
    Ok(buffer)
}
