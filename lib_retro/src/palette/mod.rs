pub mod io;
pub mod preset;

use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use preset::Preset;

/// Palette sizes a retro layout may describe.
pub const VALID_COLOR_COUNTS: [usize; 6] = [8, 16, 32, 64, 128, 256];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PaletteError {
    #[error("Invalid color count {0}: expected one of 8, 16, 32, 64, 128 or 256")]
    InvalidColorCount(usize),
    #[error("Invalid {channel:?} shift {shift}: must be in 0..=7")]
    InvalidShift { channel: Channel, shift: u8 },
    #[error("{channel:?} mask {mask:#04x} shifted by {shift} overflows 8 bits")]
    ChannelOverflow { channel: Channel, mask: u8, shift: u8 },
    #[error("{first:?} and {second:?} masks share bits {overlap:#04x}")]
    OverlappingMasks {
        first: Channel,
        second: Channel,
        overlap: u8,
    },
    #[error("Color table entries do not match their layout")]
    InconsistentTable,
    #[error("Unknown palette preset: {0}")]
    UnknownPreset(String),
    #[error("Could not allocate a color table of {0} entries")]
    AllocationError(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    fn slot(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Packs the color as `(r << 24) | (g << 16) | (b << 8) | a`.
    pub const fn to_word(self) -> u32 {
        (self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
    }

    pub const fn from_word(word: u32) -> Self {
        let [r, g, b, a] = word.to_be_bytes();
        Self { r, g, b, a }
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Describes how the bits of a palette index spread over red, green and blue.
///
/// Every channel of entry `i` is `(i & mask) << shift`. A layout built through
/// [`PaletteLayout::new`] or deserialized is guaranteed to have
/// non-overlapping masks whose shifted values fit in 8 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLayout")]
pub struct PaletteLayout {
    color_count: usize,
    masks: [u8; 3],
    shifts: [u8; 3],
}

#[derive(Deserialize)]
struct RawLayout {
    color_count: usize,
    masks: [u8; 3],
    shifts: [u8; 3],
}

impl TryFrom<RawLayout> for PaletteLayout {
    type Error = PaletteError;

    fn try_from(raw: RawLayout) -> Result<Self, Self::Error> {
        PaletteLayout::new(raw.color_count, raw.masks, raw.shifts)
    }
}

impl PaletteLayout {
    pub fn new(
        color_count: usize,
        masks: [u8; 3],
        shifts: [u8; 3],
    ) -> Result<Self, PaletteError> {
        let layout = Self {
            color_count,
            masks,
            shifts,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Builds a layout without checking it. Only used for the preset table,
    /// whose entries are covered by tests.
    pub(crate) const fn preset(color_count: usize, masks: [u8; 3], shifts: [u8; 3]) -> Self {
        Self {
            color_count,
            masks,
            shifts,
        }
    }

    pub fn validate(&self) -> Result<(), PaletteError> {
        if !VALID_COLOR_COUNTS.contains(&self.color_count) {
            error!("Rejected palette layout with {} colors", self.color_count);
            return Err(PaletteError::InvalidColorCount(self.color_count));
        }

        for channel in Channel::ALL {
            let mask = self.mask(channel);
            let shift = self.shift(channel);
            if shift > 7 {
                error!("{:?} shift {} is out of range", channel, shift);
                return Err(PaletteError::InvalidShift { channel, shift });
            }
            if (mask as u16) << shift > 0xFF {
                error!("{:?} mask {:#04x} << {} overflows", channel, mask, shift);
                return Err(PaletteError::ChannelOverflow {
                    channel,
                    mask,
                    shift,
                });
            }
        }

        for (i, &first) in Channel::ALL.iter().enumerate() {
            for &second in &Channel::ALL[i + 1..] {
                let overlap = self.mask(first) & self.mask(second);
                if overlap != 0 {
                    error!("{:?} and {:?} masks overlap", first, second);
                    return Err(PaletteError::OverlappingMasks {
                        first,
                        second,
                        overlap,
                    });
                }
            }
        }

        Ok(())
    }

    pub fn color_count(&self) -> usize {
        self.color_count
    }

    pub fn mask(&self, channel: Channel) -> u8 {
        self.masks[channel.slot()]
    }

    pub fn shift(&self, channel: Channel) -> u8 {
        self.shifts[channel.slot()]
    }

    fn expand(&self, channel: Channel, value: u8) -> u8 {
        (value & self.mask(channel)) << self.shift(channel)
    }

    /// Color stored at `index` in the table this layout produces.
    pub fn entry(&self, index: u8) -> Rgba {
        Rgba::new(
            self.expand(Channel::Red, index),
            self.expand(Channel::Green, index),
            self.expand(Channel::Blue, index),
            255,
        )
    }

    /// Applies each channel's mask and shift directly to an RGB color.
    /// The resulting alpha is 0.
    pub fn retro_color(&self, r: u8, g: u8, b: u8) -> Rgba {
        Rgba::new(
            self.expand(Channel::Red, r),
            self.expand(Channel::Green, g),
            self.expand(Channel::Blue, b),
            0,
        )
    }

    /// Opaque variant of [`PaletteLayout::retro_color`], used as a draw color.
    pub fn draw_color(&self, r: u8, g: u8, b: u8) -> Rgba {
        Rgba {
            a: 255,
            ..self.retro_color(r, g, b)
        }
    }

    /// Inverse of [`PaletteLayout::entry`]: drops each channel's low bits and
    /// packs what is left into an index. The result may exceed the palette
    /// when the masks cover bits above `color_count - 1`.
    pub fn index_of(&self, r: u8, g: u8, b: u8) -> u8 {
        Channel::ALL
            .iter()
            .zip([r, g, b])
            .fold(0, |index, (&channel, value)| {
                index | ((value >> self.shift(channel)) & self.mask(channel))
            })
    }
}

/// Ordered palette of exactly `color_count` entries derived from a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawColorTable")]
pub struct ColorTable {
    layout: PaletteLayout,
    entries: Vec<Rgba>,
}

#[derive(Deserialize)]
struct RawColorTable {
    layout: PaletteLayout,
    entries: Vec<Rgba>,
}

impl TryFrom<RawColorTable> for ColorTable {
    type Error = PaletteError;

    fn try_from(raw: RawColorTable) -> Result<Self, Self::Error> {
        let table = ColorTable {
            layout: raw.layout,
            entries: raw.entries,
        };
        if !table.is_consistent() {
            error!("Deserialized color table does not match its layout");
            return Err(PaletteError::InconsistentTable);
        }
        Ok(table)
    }
}

impl ColorTable {
    pub fn layout(&self) -> &PaletteLayout {
        &self.layout
    }

    pub fn entries(&self) -> &[Rgba] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: u8) -> Option<Rgba> {
        self.entries.get(index as usize).copied()
    }

    /// True when the entries are exactly what the layout generates.
    pub fn is_consistent(&self) -> bool {
        self.layout.validate().is_ok()
            && self.entries.len() == self.layout.color_count
            && self
                .entries
                .iter()
                .enumerate()
                .all(|(i, &color)| color == self.layout.entry(i as u8))
    }
}

/// Builds the color table for `layout`.
///
/// # Errors
/// - `PaletteError::AllocationError` if the entry buffer cannot be reserved
/// - any validation error of the layout itself
pub fn build_color_table(layout: &PaletteLayout) -> Result<ColorTable, PaletteError> {
    layout.validate()?;
    info!("Building color table with {} colors", layout.color_count);

    let mut entries = Vec::new();
    entries.try_reserve_exact(layout.color_count).map_err(|_| {
        error!(
            "Could not allocate memory for {} palette entries",
            layout.color_count
        );
        PaletteError::AllocationError(layout.color_count)
    })?;

    for index in 0..layout.color_count {
        entries.push(layout.entry(index as u8));
    }
    debug!("Color table entries: {:?}", entries);

    Ok(ColorTable {
        layout: *layout,
        entries,
    })
}
