//! The full pipeline: parse, resolve, flatten, rasterize, downsample, crop.

use glyphex::{
    raster::{self, RasterImage, DEFAULT_GAMMA, DEFAULT_SUPERSAMPLE},
    Font, GlyphId,
};
use glyphex_test_data::fixtures::{self, gids};
use pretty_assertions::assert_eq;

fn render_char(font: &Font, ch: char, ppem: f64) -> RasterImage {
    let glyph_id = font.unicode_to_glyph_id(ch).unwrap_or_default();
    let geometry = font.glyph_geometry(glyph_id, 100).unwrap();
    raster::render_glyph(geometry.as_ref(), ppem * DEFAULT_SUPERSAMPLE as f64)
        .unwrap()
        .downsampled(DEFAULT_SUPERSAMPLE, DEFAULT_GAMMA)
        .cropped()
}

#[test]
fn square_reference_image() {
    let data = fixtures::test_font();
    let font = Font::new(&data).unwrap();
    let image = render_char(&font, 'I', 10.0);
    // the top edge lands one supersampled row into the first pixel row,
    // so that row is 15/16 covered and the row below the baseline 1/16
    let top = (15.0f64 / 16.0).powf(1.0 / DEFAULT_GAMMA);
    let bottom = (1.0f64 / 16.0).powf(1.0 / DEFAULT_GAMMA);
    #[rustfmt::skip]
    let expected = [
        top, top, top, top,
        1.0, 1.0, 1.0, 1.0,
        1.0, 1.0, 1.0, 1.0,
        1.0, 1.0, 1.0, 1.0,
        bottom, bottom, bottom, bottom,
    ];
    assert_eq!((image.width(), image.height()), (4, 5));
    assert_eq!(image.pixels(), expected);
    assert_eq!(image.em_scale(), 10.0);
    // the glyph box starts at 0.1 em
    assert_eq!(image.x_origin(), -1.0);
    assert_eq!(image.y_origin(), 4.0);
    assert_eq!(image.to_string(), "████\n████\n████\n████\n░░░░");
}

#[test]
fn lowercase_a_reference_image() {
    let data = fixtures::test_font();
    let font = Font::new(&data).unwrap();
    let image = render_char(&font, 'a', 10.0);
    assert_eq!(image, render_char(&font, 'a', 10.0));
    assert_eq!((image.width(), image.height()), (5, 5));
    assert_eq!(image.em_scale(), 10.0);
    assert_eq!((image.x_origin(), image.y_origin()), (0.0, 5.0));
    #[rustfmt::skip]
    let expected = [
        125.0, 232.0, 247.0, 234.0, 134.0,
        232.0, 255.0, 255.0, 255.0, 239.0,
        248.0, 255.0, 255.0, 255.0, 255.0,
        234.0, 255.0, 255.0, 255.0, 242.0,
        135.0, 239.0, 255.0, 242.0, 145.0,
    ];
    assert_eq!(image.normalize_color_range().pixels(), expected);
    assert_eq!(image.to_string(), "▒███▒\n█████\n█████\n█████\n▒███▒");
    // gamma undone, the coverage adds up to the area of the shape: a
    // diamond plus four parabolic caps, 5/6 of a quarter em squared
    let area: f64 = image
        .pixels()
        .iter()
        .map(|value| value.powf(DEFAULT_GAMMA))
        .sum();
    let expected_area = 5.0 / 6.0 * 0.25 * 100.0;
    assert!((area - expected_area).abs() < 0.5, "{area} vs {expected_area}");
}

#[test]
fn ring_has_a_hole() {
    let data = fixtures::test_font();
    let font = Font::new(&data).unwrap();
    let geometry = font
        .glyph_geometry(font.unicode_to_glyph_id('O').unwrap(), 0)
        .unwrap()
        .unwrap();
    let image = raster::render(&geometry, 20.0).unwrap();
    let at = |x: f64, y: f64| {
        let (px, py) = image.em_to_pixel(x, y);
        image.pixel(px as isize, py as isize)
    };
    assert_eq!(at(0.3, -0.3), 0.0);
    assert_eq!(at(0.05, -0.3), 1.0);
    assert_eq!(at(0.3, -0.55), 1.0);
    assert_eq!(at(0.7, -0.3), 0.0);
}

#[test]
fn square_distance_field() {
    let data = fixtures::test_font();
    let font = Font::new(&data).unwrap();
    let geometry = font
        .glyph_geometry(GlyphId::new(gids::SQUARE), 0)
        .unwrap()
        .unwrap();
    // 0.4 em at 20 pixels per em: an 8 pixel square
    let image = raster::render(&geometry, 20.0).unwrap().with_border(4);
    let field = image.signed_distance_field();
    let (x, y) = image.em_to_pixel(0.3, -0.2);
    let center = field.pixel(x as isize, y as isize);
    assert!(center < 0.0);
    assert!((center + 4.0).abs() <= 1.0, "{center}");
    let (x, y) = image.em_to_pixel(0.7, -0.2);
    assert!(field.pixel(x as isize, y as isize) > 0.0);
    let reference = image.signed_distance_field_brute_force();
    for (fast, slow) in field.pixels().iter().zip(reference.pixels()) {
        assert!((fast - slow).abs() < 1e-9, "{fast} != {slow}");
    }
}

#[test]
fn outline_ring_from_distance_field() {
    let data = fixtures::test_font();
    let font = Font::new(&data).unwrap();
    let geometry = font
        .glyph_geometry(GlyphId::new(gids::SQUARE), 0)
        .unwrap()
        .unwrap();
    let field = raster::render(&geometry, 20.0)
        .unwrap()
        .with_border(4)
        .signed_distance_field();
    let ring = field.outline(-1.0, 1.0);
    // boundary pixels of the 8×8 square, and the outside pixels sharing an
    // edge with it
    let filled = ring.pixels().iter().filter(|value| **value == 1.0).count();
    assert_eq!(filled, 28 + 32);
    let normalized = field.normalize_signed_distance(-4.0, 4.0);
    assert!(normalized
        .pixels()
        .iter()
        .filter(|value| value.is_finite())
        .all(|value| *value <= 1.0 + 1e-9));
}

#[test]
fn empty_glyph_renders_empty() {
    let data = fixtures::test_font();
    let font = Font::new(&data).unwrap();
    let image = render_char(&font, ' ', 10.0);
    assert!(image.is_empty());
    // unmapped characters fall back to glyph 0, which has no outline
    assert!(render_char(&font, 'Z', 10.0).is_empty());
}
