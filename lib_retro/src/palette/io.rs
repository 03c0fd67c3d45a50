use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use thiserror::Error;

use super::ColorTable;

pub const MAGIC_HEADER: [u8; 4] = *b"RPL1";
pub const EXTENSION: &str = "rpal";

/// `path` with the palette extension added when it has none.
pub fn with_palette_extension(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(EXTENSION)
    }
}

#[derive(Error, Debug)]
pub enum PaletteIoError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid format or header")]
    InvalidHeader,
    #[error("Malformed palette body: {0}")]
    Malformed(#[from] bincode::Error),
}

/// Serializes a color table: the magic header followed by the bincode body.
pub fn encode_palette(table: &ColorTable) -> Result<Vec<u8>, PaletteIoError> {
    let body = bincode::serialize(table)?;

    let mut encoded = Vec::with_capacity(MAGIC_HEADER.len() + body.len());
    encoded.extend_from_slice(&MAGIC_HEADER);
    encoded.extend_from_slice(&body);
    debug!("Encoded palette of {} colors into {} bytes", table.len(), encoded.len());

    Ok(encoded)
}

pub fn decode_palette(data: &[u8]) -> Result<ColorTable, PaletteIoError> {
    if !data.starts_with(&MAGIC_HEADER) {
        error!("Invalid format or missing magic number in header");
        return Err(PaletteIoError::InvalidHeader);
    }

    // layout and entries are validated while deserializing
    let table: ColorTable = bincode::deserialize(&data[MAGIC_HEADER.len()..]).map_err(|e| {
        error!("Could not decode palette body: {}", e);
        PaletteIoError::Malformed(e)
    })?;
    debug!("Decoded palette with {} colors", table.len());

    Ok(table)
}

/// Saves the table to `path`.
pub fn save_palette(path: impl AsRef<Path>, table: &ColorTable) -> Result<(), PaletteIoError> {
    let path = path.as_ref();
    let encoded = encode_palette(table)?;

    let mut file = File::create(path)?;
    file.write_all(&encoded)?;
    info!("Palette saved to {}", path.display());

    Ok(())
}

/// Loads a table previously written by [`save_palette`].
pub fn load_palette(path: impl AsRef<Path>) -> Result<ColorTable, PaletteIoError> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    info!("Loading palette from {}", path.display());

    decode_palette(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Preset;

    #[test]
    fn test_encode_decode_palette() {
        let table = Preset::Rgb222.color_table().unwrap();
        let encoded = encode_palette(&table).unwrap();
        assert!(encoded.starts_with(&MAGIC_HEADER));

        let decoded = decode_palette(&encoded).unwrap();
        assert_eq!(decoded, table);
    }

    #[test]
    fn test_palette_extension() {
        assert_eq!(with_palette_extension("out/retro"), PathBuf::from("out/retro.rpal"));
        assert_eq!(with_palette_extension("retro.bin"), PathBuf::from("retro.bin"));
    }

    #[test]
    fn test_decode_invalid_header() {
        let result = decode_palette(b"PXC1\x00\x00");
        assert!(matches!(result, Err(PaletteIoError::InvalidHeader)));
    }

    #[test]
    fn test_decode_truncated_body() {
        let table = Preset::Rgb111.color_table().unwrap();
        let encoded = encode_palette(&table).unwrap();
        let result = decode_palette(&encoded[..encoded.len() - 3]);
        assert!(matches!(result, Err(PaletteIoError::Malformed(_))));
    }

    #[test]
    fn test_decode_tampered_entry() {
        let table = Preset::Rgb111.color_table().unwrap();
        let mut encoded = encode_palette(&table).unwrap();
        // last byte is the alpha of the last entry
        let last = encoded.len() - 1;
        encoded[last] = 0;
        let result = decode_palette(&encoded);
        assert!(matches!(result, Err(PaletteIoError::Malformed(_))));
    }
}
