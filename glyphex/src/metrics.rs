//! Global and glyph specific metrics, in em units.
//!
//! Vertical values follow the geometry convention: y grows downward, so the
//! top of the line is negative.

use glyphex_read::tables::{hhea::Hhea, hmtx::Hmtx};
use glyphex_read::types::GlyphId;

/// The vertical extent of a line of text.
#[derive(Copy, Clone, PartialEq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineMetrics {
    /// Position of the ascender relative to the baseline.
    pub line_top: f64,
    /// Position of the descender relative to the baseline.
    pub line_bottom: f64,
    /// Recommended additional spacing between lines.
    pub line_gap: f64,
}

impl LineMetrics {
    pub fn new(hhea: &Hhea, units_per_em: u16) -> Self {
        let upem = units_per_em as f64;
        Self {
            line_top: -(hhea.ascender as f64) / upem,
            line_bottom: -(hhea.descender as f64) / upem,
            line_gap: hhea.line_gap as f64 / upem,
        }
    }
}

/// Horizontal metrics of a single glyph.
#[derive(Copy, Clone, PartialEq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphMetrics {
    pub advance_width: f64,
    pub left_side_bearing: f64,
}

impl GlyphMetrics {
    /// Metrics for `glyph_id`; values missing from `hmtx` are zero.
    pub fn new(hmtx: &Hmtx, glyph_id: GlyphId, units_per_em: u16) -> Self {
        let upem = units_per_em as f64;
        Self {
            advance_width: hmtx.advance(glyph_id).unwrap_or_default() as f64 / upem,
            left_side_bearing: hmtx.side_bearing(glyph_id).unwrap_or_default() as f64 / upem,
        }
    }
}
