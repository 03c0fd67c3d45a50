mod common;

use common::{
    gradient, pack, SPRITE, SPRITE_BACKGROUND, SPRITE_FOREGROUND, SPRITE_HEIGHT, SPRITE_WIDTH,
};
use lib_retro::{
    composite_with_transparency, convert_to_retro, quantize, ImageError, IndexedImage, Preset,
    QuantizeMethod,
};

#[test]
fn test_all_background_is_zero() {
    let table = Preset::Rgb232.color_table().unwrap();
    let image = IndexedImage::filled(8, 5, 17).unwrap();

    let result = composite_with_transparency(&image, &table, 17).unwrap();
    assert_eq!(result.width(), 8);
    assert_eq!(result.height(), 5);
    assert!(result.pixels().iter().all(|&word| word == 0));
}

#[test]
fn test_single_foreground_pixel() {
    let table = Preset::Rgb323.color_table().unwrap();
    let mut image = IndexedImage::filled(5, 3, 0).unwrap();
    image.set(3, 2, 0x9A).unwrap();

    let result = composite_with_transparency(&image, &table, 0).unwrap();
    for y in 0..3 {
        for x in 0..5 {
            let word = result.pixels()[(y * 5 + x) as usize];
            if (x, y) == (3, 2) {
                assert_eq!(word, pack(table.get(0x9A).unwrap()));
            } else {
                assert_eq!(word, 0);
            }
        }
    }
}

#[test]
fn test_out_of_range_yields_no_image() {
    let table = Preset::Rgb112.color_table().unwrap();
    let mut image = IndexedImage::filled(4, 4, 1).unwrap();
    image.set(0, 3, 16).unwrap();

    let result = composite_with_transparency(&image, &table, 1);
    assert_eq!(
        result,
        Err(ImageError::IndexOutOfRange {
            index: 16,
            palette_size: 16,
            x: 0,
            y: 3,
        })
    );
}

#[test]
fn test_inputs_are_untouched() {
    let table = Preset::Rgb222.color_table().unwrap();
    let image = IndexedImage::new(3, 1, vec![1, 2, 3]).unwrap();
    let (image_before, table_before) = (image.clone(), table.clone());

    composite_with_transparency(&image, &table, 2).unwrap();
    assert_eq!(image, image_before);
    assert_eq!(table, table_before);
}

#[test]
fn test_convert_sprite_background() {
    let table = Preset::Rgb332.color_table().unwrap();

    for method in [QuantizeMethod::Nearest, QuantizeMethod::Truncate] {
        let result = convert_to_retro(
            &SPRITE,
            SPRITE_WIDTH,
            SPRITE_HEIGHT,
            &table,
            SPRITE_BACKGROUND,
            method,
        )
        .unwrap();

        for y in 0..SPRITE_HEIGHT {
            for x in 0..SPRITE_WIDTH {
                let pixel = result.get(x, y).unwrap();
                if SPRITE_FOREGROUND.contains(&(x, y)) {
                    assert_eq!(pixel.a, 255, "{} at ({}, {})", method, x, y);
                } else {
                    assert_eq!(pixel.to_word(), 0, "{} at ({}, {})", method, x, y);
                }
            }
        }

        let bytes = result.to_rgba_bytes();
        // red pixel at (1, 1)
        assert_eq!(&bytes[20..24], &[0xE0, 0, 0, 255]);
    }
}

#[test]
fn test_truncate_and_nearest_agree_on_palette_colors() {
    let table = Preset::Rgb231.color_table().unwrap();
    let rgba: Vec<u8> = table.entries().iter().flat_map(|c| c.to_bytes()).collect();

    let nearest = quantize(&rgba, 8, 8, &table, QuantizeMethod::Nearest).unwrap();
    let truncate = quantize(&rgba, 8, 8, &table, QuantizeMethod::Truncate).unwrap();
    assert_eq!(nearest, truncate);
}

#[test]
fn test_convert_gradient_keeps_dimensions() {
    let data = gradient(16, 9);
    let table = Preset::Rgb111.color_table().unwrap();

    let result = convert_to_retro(&data, 16, 9, &table, 7, QuantizeMethod::Nearest).unwrap();
    assert_eq!(result.pixels().len(), 16 * 9);
    assert!(result
        .pixels()
        .iter()
        .all(|&word| word == 0 || table.entries().iter().any(|c| c.to_word() == word)));
}
