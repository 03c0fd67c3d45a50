use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{build_color_table, ColorTable, PaletteError, PaletteLayout};

/// Named bit layouts, from 3-3-2 (256 colors) down to 1-1-1 (8 colors).
///
/// The digits give the number of bits for red, green and blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    Rgb332,
    Rgb233,
    Rgb323,
    Rgb232,
    Rgb223,
    Rgb322,
    Rgb132,
    Rgb123,
    Rgb231,
    Rgb321,
    Rgb222,
    Rgb122,
    Rgb212,
    Rgb221,
    Rgb112,
    Rgb121,
    Rgb211,
    Rgb111,
}

impl Preset {
    pub const ALL: [Preset; 18] = [
        Preset::Rgb332,
        Preset::Rgb233,
        Preset::Rgb323,
        Preset::Rgb232,
        Preset::Rgb223,
        Preset::Rgb322,
        Preset::Rgb132,
        Preset::Rgb123,
        Preset::Rgb231,
        Preset::Rgb321,
        Preset::Rgb222,
        Preset::Rgb122,
        Preset::Rgb212,
        Preset::Rgb221,
        Preset::Rgb112,
        Preset::Rgb121,
        Preset::Rgb211,
        Preset::Rgb111,
    ];

    pub const fn layout(self) -> PaletteLayout {
        match self {
            // 256 colors
            Preset::Rgb332 => {
                PaletteLayout::preset(256, [0b1110_0000, 0b0001_1100, 0b0000_0011], [0, 3, 6])
            }
            Preset::Rgb233 => {
                PaletteLayout::preset(256, [0b1100_0000, 0b0011_1000, 0b0000_0111], [0, 2, 5])
            }
            Preset::Rgb323 => {
                PaletteLayout::preset(256, [0b1110_0000, 0b0001_1000, 0b0000_0111], [0, 3, 5])
            }
            // 128 colors
            Preset::Rgb232 => {
                PaletteLayout::preset(128, [0b0110_0000, 0b0001_1100, 0b0000_0011], [1, 3, 6])
            }
            Preset::Rgb223 => {
                PaletteLayout::preset(128, [0b0110_0000, 0b0001_1000, 0b0000_0111], [1, 3, 5])
            }
            Preset::Rgb322 => {
                PaletteLayout::preset(128, [0b0111_0000, 0b0000_1100, 0b0000_0011], [1, 4, 6])
            }
            // 64 colors
            Preset::Rgb132 => {
                PaletteLayout::preset(64, [0b0010_0000, 0b0001_1100, 0b0000_0011], [2, 3, 6])
            }
            Preset::Rgb123 => {
                PaletteLayout::preset(64, [0b0010_0000, 0b0001_1000, 0b0000_0111], [2, 3, 5])
            }
            Preset::Rgb231 => {
                PaletteLayout::preset(64, [0b0011_0000, 0b0000_1110, 0b0000_0001], [2, 4, 7])
            }
            Preset::Rgb321 => {
                PaletteLayout::preset(64, [0b0011_1000, 0b0000_0110, 0b0000_0001], [2, 5, 7])
            }
            Preset::Rgb222 => {
                PaletteLayout::preset(64, [0b0011_0000, 0b0000_1100, 0b0000_0011], [2, 4, 6])
            }
            // 32 colors
            Preset::Rgb122 => {
                PaletteLayout::preset(32, [0b0001_0000, 0b0000_1100, 0b0000_0011], [3, 4, 6])
            }
            Preset::Rgb212 => {
                PaletteLayout::preset(32, [0b0001_1000, 0b0000_0100, 0b0000_0011], [3, 5, 6])
            }
            Preset::Rgb221 => {
                PaletteLayout::preset(32, [0b0001_1000, 0b0000_0110, 0b0000_0001], [3, 5, 7])
            }
            // 16 colors
            Preset::Rgb112 => {
                PaletteLayout::preset(16, [0b0000_1000, 0b0000_0100, 0b0000_0011], [4, 5, 6])
            }
            Preset::Rgb121 => {
                PaletteLayout::preset(16, [0b0000_1000, 0b0000_0110, 0b0000_0001], [4, 5, 7])
            }
            Preset::Rgb211 => {
                PaletteLayout::preset(16, [0b0000_1100, 0b0000_0010, 0b0000_0001], [4, 6, 7])
            }
            // 8 colors
            Preset::Rgb111 => {
                PaletteLayout::preset(8, [0b0000_0100, 0b0000_0010, 0b0000_0001], [5, 6, 7])
            }
        }
    }

    pub const fn color_count(self) -> usize {
        self.layout().color_count
    }

    pub const fn name(self) -> &'static str {
        match self {
            Preset::Rgb332 => "RGB332",
            Preset::Rgb233 => "RGB233",
            Preset::Rgb323 => "RGB323",
            Preset::Rgb232 => "RGB232",
            Preset::Rgb223 => "RGB223",
            Preset::Rgb322 => "RGB322",
            Preset::Rgb132 => "RGB132",
            Preset::Rgb123 => "RGB123",
            Preset::Rgb231 => "RGB231",
            Preset::Rgb321 => "RGB321",
            Preset::Rgb222 => "RGB222",
            Preset::Rgb122 => "RGB122",
            Preset::Rgb212 => "RGB212",
            Preset::Rgb221 => "RGB221",
            Preset::Rgb112 => "RGB112",
            Preset::Rgb121 => "RGB121",
            Preset::Rgb211 => "RGB211",
            Preset::Rgb111 => "RGB111",
        }
    }

    pub fn color_table(self) -> Result<ColorTable, PaletteError> {
        build_color_table(&self.layout())
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PaletteError::UnknownPreset(s.to_string()))
    }
}
