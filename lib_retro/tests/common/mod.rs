#![allow(dead_code)]

use lib_retro::Rgba;

pub const SPRITE_WIDTH: u32 = 4;
pub const SPRITE_HEIGHT: u32 = 4;

// 4x4 sprite on a blue background, which Rgb332 maps to index 0b0000_0011
pub const SPRITE: [u8; 64] = [
    0, 0, 255, 255, 0, 0, 255, 255, 0, 0, 255, 255, 0, 0, 255, 255, //
    0, 0, 255, 255, 255, 0, 0, 255, 255, 255, 255, 255, 0, 0, 255, 255, //
    0, 0, 255, 255, 0, 255, 0, 255, 0, 0, 0, 255, 0, 0, 255, 255, //
    0, 0, 255, 255, 0, 0, 255, 255, 0, 0, 255, 255, 0, 0, 255, 255, //
];

pub const SPRITE_BACKGROUND: u8 = 0b0000_0011;

/// Pixels of `SPRITE` that are not background, as (x, y).
pub const SPRITE_FOREGROUND: [(u32, u32); 4] = [(1, 1), (2, 1), (1, 2), (2, 2)];

pub fn gradient(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            data.extend_from_slice(&[r, g, r ^ g, 255]);
        }
    }
    data
}

pub fn pack(color: Rgba) -> u32 {
    (color.r as u32) << 24 | (color.g as u32) << 16 | (color.b as u32) << 8 | color.a as u32
}
