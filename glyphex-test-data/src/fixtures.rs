//! A small synthetic TrueType font covering the outline shapes we care about

use glyphex_types::Tag;

use crate::{
    font_builder::{CollectionBuilder, FontBuilder},
    glyphs::{ComponentScale, CompositeGlyphBuilder, SimpleGlyphBuilder},
    tables,
};

pub const UNITS_PER_EM: u16 = 1000;
pub const ASCENDER: i16 = 800;
pub const DESCENDER: i16 = -200;
pub const LINE_GAP: i16 = 90;

/// Glyph identifiers in the test font.
pub mod gids {
    pub const NOTDEF: u16 = 0;
    /// (100, 0) to (500, 400), one contour.
    pub const SQUARE: u16 = 1;
    /// A 600 unit square with a 300 unit hole, wound the other way.
    pub const RING: u16 = 2;
    /// A rounded "o" of alternating on and off curve points.
    pub const O_SHAPE: u16 = 3;
    /// SQUARE offset by (50, -100).
    pub const SHIFTED: u16 = 4;
    /// SHIFTED scaled by one half and offset by (10, 20).
    pub const NESTED: u16 = 5;
    /// No outline.
    pub const SPACE: u16 = 6;
    /// References CYCLE_B.
    pub const CYCLE_A: u16 = 7;
    /// References CYCLE_A.
    pub const CYCLE_B: u16 = 8;
    /// References itself.
    pub const SELF_REFERENCE: u16 = 9;
    /// SQUARE plus a point matched RING.
    pub const POINT_MATCHED: u16 = 10;
    /// SPACE plus SQUARE.
    pub const WITH_EMPTY: u16 = 11;
    /// A square of four off curve points.
    pub const OFF_CURVE_ONLY: u16 = 12;
}

pub const NUM_GLYPHS: u16 = 13;

/// Explicit (advance, left side bearing) pairs; later glyphs share the
/// last advance.
pub const H_METRICS: [(u16, i16); 4] = [(500, 0), (600, 100), (700, 0), (550, 0)];
pub const TRAILING_BEARINGS: [i16; 9] = [150, 55, 0, 0, 0, 0, 100, 100, 0];

pub const FAMILY_NAME: &str = "Glyphex Test";
pub const FULL_NAME: &str = "Glyphex Test Regular";
pub const POSTSCRIPT_NAME: &str = "GlyphexTest-Regular";

/// The encoded glyph records, indexed by glyph id.
pub fn glyphs() -> Vec<Vec<u8>> {
    use gids::*;
    let mut glyphs = vec![Vec::new(); NUM_GLYPHS as usize];
    glyphs[SQUARE as usize] = SimpleGlyphBuilder::new()
        .polygon(&[(100, 0), (100, 400), (500, 400), (500, 0)])
        .build();
    glyphs[RING as usize] = SimpleGlyphBuilder::new()
        .polygon(&[(0, 0), (0, 600), (600, 600), (600, 0)])
        .polygon(&[(150, 150), (450, 150), (450, 450), (150, 450)])
        .instructions(&[0xb0, 0x01])
        .build();
    glyphs[O_SHAPE as usize] = SimpleGlyphBuilder::new()
        .contour(&[
            (250, 0, true),
            (500, 0, false),
            (500, 250, true),
            (500, 500, false),
            (250, 500, true),
            (0, 500, false),
            (0, 250, true),
            (0, 0, false),
        ])
        .build();
    glyphs[SHIFTED as usize] = CompositeGlyphBuilder::new()
        .offset(SQUARE, 50, -100)
        .bounds([150, -100, 550, 300])
        .build();
    glyphs[NESTED as usize] = CompositeGlyphBuilder::new()
        .transformed(SHIFTED, 10, 20, ComponentScale::Uniform(0.5))
        .build();
    glyphs[CYCLE_A as usize] = CompositeGlyphBuilder::new().offset(CYCLE_B, 0, 0).build();
    glyphs[CYCLE_B as usize] = CompositeGlyphBuilder::new().offset(CYCLE_A, 0, 0).build();
    glyphs[SELF_REFERENCE as usize] = CompositeGlyphBuilder::new()
        .offset(SELF_REFERENCE, 10, 0)
        .build();
    glyphs[POINT_MATCHED as usize] = CompositeGlyphBuilder::new()
        .offset(SQUARE, 0, 0)
        .point_matched(RING, 0, 0)
        .build();
    glyphs[WITH_EMPTY as usize] = CompositeGlyphBuilder::new()
        .offset(SPACE, 0, 0)
        .offset(SQUARE, 0, 0)
        .build();
    glyphs[OFF_CURVE_ONLY as usize] = SimpleGlyphBuilder::new()
        .contour(&[
            (0, 0, false),
            (0, 400, false),
            (400, 400, false),
            (400, 0, false),
        ])
        .build();
    glyphs
}

/// The character map of the test font.
///
/// The (3, 10) subtable comes later in the directory and remaps 'o'.
pub fn cmap() -> Vec<u8> {
    use gids::*;
    tables::cmap(&[
        (
            0,
            3,
            tables::cmap4(&[
                (0x20, SPACE),
                (0x49, SQUARE),
                (0x4F, RING),
                (0x61, O_SHAPE),
                (0x6F, O_SHAPE),
                (0x78, SHIFTED),
                (0x79, NESTED),
            ]),
        ),
        (1, 0, tables::cmap6(0x41, &[1, 2, 3])),
        (
            3,
            10,
            tables::cmap12(&[(0x6F, 0x6F, OFF_CURVE_ONLY as u32), (0x1F600, 0x1F601, 1)]),
        ),
        // a unicode subtable in a format we don't decode
        (0, 4, tables::cmap6(0x30, &[1, 2])),
    ])
}

pub fn name() -> Vec<u8> {
    tables::name(&[
        (3, 1, 0x409, 0, "Copyright 2026 The Glyphex Authors"),
        (0, 3, 0, 1, FAMILY_NAME),
        (3, 1, 0x409, 1, "Glyphex Test (Windows)"),
        (1, 0, 0, 1, "Glyphex Test (Mac)"),
        (3, 1, 0x409, 2, "Regular"),
        (3, 1, 0x409, 3, "Glyphex Test Regular 1.000"),
        (3, 1, 0x409, 4, FULL_NAME),
        (3, 1, 0x409, 5, "Version 1.000"),
        (3, 1, 0x409, 6, POSTSCRIPT_NAME),
    ])
}

/// A builder holding every table of the test font, so tests can replace
/// or drop individual tables.
pub fn test_font_builder(long_loca: bool) -> FontBuilder {
    let (glyf, loca) = tables::glyf_and_loca(&glyphs(), long_loca);
    let mut builder = FontBuilder::new();
    builder
        .add_raw(Tag::new(b"head"), tables::head(UNITS_PER_EM, long_loca))
        .add_raw(
            Tag::new(b"hhea"),
            tables::hhea(ASCENDER, DESCENDER, LINE_GAP, H_METRICS.len() as u16),
        )
        .add_raw(Tag::new(b"maxp"), tables::maxp(NUM_GLYPHS))
        .add_raw(
            Tag::new(b"hmtx"),
            tables::hmtx(&H_METRICS, &TRAILING_BEARINGS),
        )
        .add_raw(Tag::new(b"loca"), loca)
        .add_raw(Tag::new(b"glyf"), glyf)
        .add_raw(Tag::new(b"cmap"), cmap())
        .add_raw(Tag::new(b"name"), name())
        .add_raw(Tag::new(b"DSIG"), vec![0, 0, 0, 1, 0, 0, 0, 0]);
    builder
}

/// The test font, with short `loca` offsets.
pub fn test_font() -> Vec<u8> {
    test_font_builder(false).build()
}

/// A collection of the test font with short offsets, then long offsets.
pub fn test_collection() -> Vec<u8> {
    let mut builder = CollectionBuilder::new();
    builder
        .add_font(test_font_builder(false))
        .add_font(test_font_builder(true))
        .with_dsig();
    builder.build()
}
