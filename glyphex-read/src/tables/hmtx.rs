//! The [hmtx (Horizontal Metrics)](https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx) table

use types::{BigEndian, GlyphId, Tag};

use crate::{FontData, FontReadWithArgs, ReadArgs, ReadError, TopLevelTable};

/// The horizontal metrics table.
///
/// Holds `number_of_h_metrics` (advance, side bearing) pairs, followed by
/// side bearings alone for the remaining glyphs. Those remaining glyphs all
/// share the last explicit advance.
#[derive(Clone, Debug)]
pub struct Hmtx<'a> {
    // interleaved advance, lsb
    h_metrics: &'a [BigEndian<u16>],
    left_side_bearings: &'a [BigEndian<i16>],
}

impl<'a> Hmtx<'a> {
    /// Read the table, given `hhea.numberOfHMetrics` and `maxp.numGlyphs`.
    pub fn read(
        data: FontData<'a>,
        number_of_h_metrics: u16,
        num_glyphs: u16,
    ) -> Result<Self, ReadError> {
        Self::read_with_args(data, &(number_of_h_metrics, num_glyphs))
    }

    /// The number of explicit (advance, side bearing) pairs.
    pub fn number_of_h_metrics(&self) -> usize {
        self.h_metrics.len() / 2
    }

    /// The advance width for the glyph, in font units.
    ///
    /// Glyphs past the explicit metrics use the last explicit advance.
    /// Returns `None` only if the table has no explicit metrics at all.
    pub fn advance(&self, glyph_id: GlyphId) -> Option<u16> {
        let ix = glyph_id
            .to_usize()
            .min(self.number_of_h_metrics().checked_sub(1)?);
        self.h_metrics.get(ix * 2).map(BigEndian::get)
    }

    /// The left side bearing for the glyph, in font units.
    pub fn side_bearing(&self, glyph_id: GlyphId) -> Option<i16> {
        let ix = glyph_id.to_usize();
        let n_metrics = self.number_of_h_metrics();
        if ix < n_metrics {
            self.h_metrics
                .get(ix * 2 + 1)
                .map(|raw| raw.get() as i16)
        } else {
            self.left_side_bearings
                .get(ix - n_metrics)
                .map(BigEndian::get)
        }
    }
}

impl TopLevelTable for Hmtx<'_> {
    const TAG: Tag = Tag::new(b"hmtx");
}

impl ReadArgs for Hmtx<'_> {
    /// (number_of_h_metrics, num_glyphs)
    type Args = (u16, u16);
}

impl<'a> FontReadWithArgs<'a> for Hmtx<'a> {
    fn read_with_args(data: FontData<'a>, args: &(u16, u16)) -> Result<Self, ReadError> {
        let (number_of_h_metrics, num_glyphs) = *args;
        let mut cursor = data.cursor();
        let h_metrics = cursor.read_array(number_of_h_metrics as usize * 2)?;
        let n_bearings = num_glyphs.saturating_sub(number_of_h_metrics);
        let left_side_bearings = cursor.read_array(n_bearings as usize)?;
        Ok(Hmtx {
            h_metrics,
            left_side_bearings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphex_test_data::bebuffer::BeBuffer;

    fn metrics() -> BeBuffer {
        BeBuffer::new()
            // advance, lsb pairs
            .extend([500u16, 10])
            .push(600u16)
            .push(-20i16)
            // trailing side bearings
            .extend([30i16, -40])
    }

    #[test]
    fn trailing_glyphs_share_last_advance() {
        let buf = metrics();
        let hmtx = Hmtx::read(FontData::new(&buf), 2, 4).unwrap();
        let advances: Vec<_> = (0..6)
            .map(|gid| hmtx.advance(GlyphId::new(gid)))
            .collect();
        assert_eq!(
            advances,
            [Some(500), Some(600), Some(600), Some(600), Some(600), Some(600)]
        );
        let bearings: Vec<_> = (0..5)
            .map(|gid| hmtx.side_bearing(GlyphId::new(gid)))
            .collect();
        assert_eq!(bearings, [Some(10), Some(-20), Some(30), Some(-40), None]);
    }

    #[test]
    fn too_short() {
        let buf = metrics();
        assert_eq!(
            Hmtx::read(FontData::new(&buf), 2, 5).err(),
            Some(ReadError::OutOfBounds)
        );
    }

    #[test]
    fn no_metrics() {
        let hmtx = Hmtx::read(FontData::new(&[]), 0, 0).unwrap();
        assert_eq!(hmtx.advance(GlyphId::NOTDEF), None);
        assert_eq!(hmtx.side_bearing(GlyphId::NOTDEF), None);
    }
}
