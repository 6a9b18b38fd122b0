//! Loading the synthetic test font and resolving its glyphs.

use glyphex::{
    raw::{tables::glyf::Glyph, types::NameId, ReadError},
    FontCollection, Geometry, GlyphId, LoadOptions, Segment, Tag, Warning,
};
use glyphex_test_data::{
    fixtures::{self, gids},
    tables,
};
use pretty_assertions::assert_eq;

fn gid(raw: u16) -> GlyphId {
    GlyphId::new(raw)
}

fn geometry(font: &glyphex::Font, glyph_id: u16) -> Geometry {
    font.glyph_geometry(gid(glyph_id), 0)
        .unwrap()
        .expect("glyph has an outline")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{actual} is not close to {expected}"
    );
}

#[test]
fn square_geometry() {
    let data = fixtures::test_font();
    let font = glyphex::Font::new(&data).unwrap();
    let glyph_id = font.unicode_to_glyph_id('I').unwrap();
    assert_eq!(glyph_id, gid(gids::SQUARE));
    let square = geometry(&font, gids::SQUARE);
    assert_eq!(square.contours.len(), 1);
    assert!(square.is_flat());
    assert_eq!(square.bounds.x_min, 0.1);
    assert_eq!(square.bounds.x_max, 0.5);
    // y points down
    assert_eq!(square.bounds.y_min, -0.4);
    assert_eq!(square.bounds.y_max, 0.0);
    assert_eq!(square.advance, 0.6);
    // repeated requests give the same result
    assert_eq!(square, geometry(&font, gids::SQUARE));
}

#[test]
fn implied_points_and_simplification() {
    let data = fixtures::test_font();
    let font = glyphex::Font::new(&data).unwrap();
    let o_shape = geometry(&font, gids::O_SHAPE);
    assert_eq!(o_shape.segments().count(), 4);
    assert!(o_shape
        .segments()
        .all(|segment| matches!(segment, Segment::QuadraticBezier { .. })));
    let flat = font
        .glyph_geometry(gid(gids::O_SHAPE), 10)
        .unwrap()
        .unwrap();
    assert_eq!(flat.segments().count(), 40);
    assert!(flat.is_flat());
    assert_eq!(flat.bounds, o_shape.bounds);
    assert_eq!(flat.advance, o_shape.advance);

    // every point off curve: all segment ends are synthesized midpoints
    let off_curve = geometry(&font, gids::OFF_CURVE_ONLY);
    assert_eq!(off_curve.segments().count(), 4);
    let first = off_curve.contours[0][0];
    assert_eq!(
        first,
        Segment::QuadraticBezier {
            p1: glyphex::raw::types::Point::new(0.2, 0.0),
            control: glyphex::raw::types::Point::new(0.0, 0.0),
            p2: glyphex::raw::types::Point::new(0.0, -0.2),
        }
    );
    assert_eq!(off_curve.bounds.x_max, 0.4);
    assert_eq!(off_curve.bounds.y_min, -0.4);
}

#[test]
fn composite_offsets() {
    let data = fixtures::test_font();
    let font = glyphex::Font::new(&data).unwrap();
    let shifted = geometry(&font, gids::SHIFTED);
    assert_close(shifted.bounds.x_min, 0.15);
    assert_close(shifted.bounds.x_max, 0.55);
    assert_close(shifted.bounds.y_min, -0.3);
    assert_close(shifted.bounds.y_max, 0.1);
    // the composite's own horizontal metrics
    assert_eq!(shifted.advance, 0.55);
}

#[test]
fn nested_composite_matches_manual_transform() {
    let data = fixtures::test_font();
    let font = glyphex::Font::new(&data).unwrap();
    let square = geometry(&font, gids::SQUARE);
    let nested = geometry(&font, gids::NESTED);
    // SHIFTED moves by (50, -100) units, then NESTED scales by one half
    // and moves by (10, 20) units
    let expected: Vec<Segment> = square
        .segments()
        .map(|segment| {
            segment
                .map_points(|p| glyphex::raw::types::Point::new(p.x + 0.05, p.y + 0.1))
                .map_points(|p| {
                    glyphex::raw::types::Point::new(0.5 * p.x + 0.01, 0.5 * p.y - 0.02)
                })
        })
        .collect();
    let actual: Vec<Segment> = nested.segments().copied().collect();
    assert_eq!(actual.len(), expected.len());
    for (actual, expected) in actual.iter().zip(&expected) {
        for (a, e) in actual.points().zip(expected.points()) {
            assert_close(a.x, e.x);
            assert_close(a.y, e.y);
        }
    }
    assert_close(nested.bounds.x_min, 0.085);
    assert_close(nested.bounds.y_max, 0.03);
}

#[test]
fn composite_cycles_are_errors() {
    let _ = env_logger::builder().is_test(true).try_init();
    let data = fixtures::test_font();
    let font = glyphex::Font::new(&data).unwrap();
    for glyph_id in [gids::CYCLE_A, gids::CYCLE_B, gids::SELF_REFERENCE] {
        assert!(matches!(
            font.glyph_geometry(gid(glyph_id), 0),
            Err(ReadError::MalformedGlyph { .. })
        ));
        // the record itself is still readable
        assert!(matches!(
            font.glyph_data(gid(glyph_id)),
            Ok(Some(Glyph::Composite(_)))
        ));
    }
}

#[test]
fn point_matching_has_no_geometry() {
    let _ = env_logger::builder().is_test(true).try_init();
    let data = fixtures::test_font();
    let font = glyphex::Font::from_ref(
        glyphex::raw::FontRef::new(&data).unwrap(),
        LoadOptions::eager(),
    )
    .unwrap();
    assert_eq!(font.glyph_geometry(gid(gids::POINT_MATCHED), 0), Ok(None));
    let Some(Glyph::Composite(composite)) = font.glyph_data(gid(gids::POINT_MATCHED)).unwrap()
    else {
        panic!("expected a composite glyph");
    };
    assert_eq!(composite.components.len(), 2);
    let warning = Warning::PointMatchingComponent {
        glyph_id: gid(gids::POINT_MATCHED),
    };
    assert!(font.warnings().contains(&warning));
    assert_eq!(
        warning.to_string(),
        "glyph GID_10: unsupported cleared ARGS_ARE_XY_VALUES flag"
    );
}

#[test]
fn empty_components_are_skipped() {
    let data = fixtures::test_font();
    let font = glyphex::Font::new(&data).unwrap();
    assert_eq!(font.glyph_geometry(gid(gids::SPACE), 0), Ok(None));
    let with_empty = geometry(&font, gids::WITH_EMPTY);
    assert_eq!(with_empty.contours, geometry(&font, gids::SQUARE).contours);
    assert_eq!(with_empty.advance, 0.55);
}

#[test]
fn out_of_range_glyph() {
    let data = fixtures::test_font();
    let font = glyphex::Font::new(&data).unwrap();
    assert_eq!(font.glyph_geometry(gid(fixtures::NUM_GLYPHS), 0), Ok(None));
    assert_eq!(font.glyph_data(gid(u16::MAX)), Ok(None));
    assert_eq!(font.advance_width(gid(u16::MAX)), 0.55);
}

#[test]
fn glyph_ids_restart() {
    let data = fixtures::test_font();
    let font = glyphex::Font::new(&data).unwrap();
    let ids = font.glyph_ids();
    assert_eq!(ids.clone().count(), fixtures::NUM_GLYPHS as usize);
    assert_eq!(ids.last(), Some(gid(fixtures::NUM_GLYPHS - 1)));
}

#[test]
fn character_map() {
    let data = fixtures::test_font();
    let font = glyphex::Font::new(&data).unwrap();
    let charmap = font.charmap();
    assert_eq!(charmap.map(' '), Some(gid(gids::SPACE)));
    assert_eq!(charmap.map('😀'), Some(gid(1)));
    // remapped by the (3, 10) subtable
    assert_eq!(charmap.map('o'), Some(gid(gids::OFF_CURVE_ONLY)));
    assert_eq!(charmap.codepoints_for(gid(gids::O_SHAPE)), ['a' as u32]);
    assert_eq!(charmap.len(), 9);
    assert!(font.warnings().contains(&Warning::UnsupportedCmapFormat {
        platform_id: 0,
        encoding_id: 4,
        format: 6,
    }));
}

#[test]
fn names_and_metrics() {
    let data = fixtures::test_font();
    let font = glyphex::Font::new(&data).unwrap();
    let names = font.names();
    assert_eq!(names.family.as_deref(), Some(fixtures::FAMILY_NAME));
    assert_eq!(names.subfamily.as_deref(), Some("Regular"));
    assert_eq!(names.full_name.as_deref(), Some(fixtures::FULL_NAME));
    assert_eq!(
        names.get(NameId::POSTSCRIPT_NAME),
        Some(fixtures::POSTSCRIPT_NAME)
    );
    assert_eq!(names.version.as_deref(), Some("Version 1.000"));
    assert_eq!(names.trademark, None);
    let metrics = font.horizontal_line_metrics();
    assert_eq!(metrics.line_top, -0.8);
    assert_eq!(metrics.line_bottom, 0.2);
    assert_eq!(metrics.line_gap, 0.09);
}

#[test]
fn collection_fonts_agree() {
    let data = fixtures::test_collection();
    let fonts = FontCollection::new(&data).unwrap();
    assert_eq!(fonts.len(), 2);
    let [short, long] = [&fonts.fonts()[0], &fonts.fonts()[1]];
    assert!(!short.head().has_long_loca());
    assert!(long.head().has_long_loca());
    for glyph_id in short.glyph_ids() {
        assert_eq!(
            short.glyph_geometry(glyph_id, 4).ok(),
            long.glyph_geometry(glyph_id, 4).ok(),
            "{glyph_id}"
        );
    }
}

#[test]
fn fatal_table_errors() {
    let mut builder = fixtures::test_font_builder(false);
    builder.remove(Tag::new(b"glyf"));
    let data = builder.build();
    assert_eq!(
        glyphex::Font::new(&data).err(),
        Some(ReadError::MissingTable(Tag::new(b"glyf")))
    );

    let mut builder = fixtures::test_font_builder(false);
    builder.add_raw(Tag::new(b"head"), tables::head_with_loc_format(1000, 5));
    let data = builder.build();
    assert!(matches!(
        glyphex::Font::new(&data),
        Err(ReadError::MalformedTable { tag, .. }) if tag == Tag::new(b"head")
    ));

    // decreasing loca offsets
    let mut builder = fixtures::test_font_builder(false);
    let mut loca = vec![0u8; (fixtures::NUM_GLYPHS as usize + 1) * 2];
    loca[3] = 8;
    builder.add_raw(Tag::new(b"loca"), loca);
    let data = builder.build();
    assert!(matches!(
        glyphex::Font::new(&data),
        Err(ReadError::MalformedTable { tag, .. }) if tag == Tag::new(b"loca")
    ));
}

#[cfg(feature = "serde")]
#[test]
fn geometry_serializes() {
    let data = fixtures::test_font();
    let font = glyphex::Font::new(&data).unwrap();
    let square = geometry(&font, gids::SQUARE);
    let json = serde_json::to_string(&square).unwrap();
    assert!(json.contains(r#""kind":"line""#));
    let back: Geometry = serde_json::from_str(&json).unwrap();
    assert_eq!(back, square);
}
