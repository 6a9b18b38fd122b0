//! The [loca (Index to Location)][loca] table
//!
//! [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca

use std::ops::Range;

use crate::{FontData, FontReadWithArgs, ReadArgs, ReadError, TopLevelTable};
use types::{BigEndian, GlyphId, Tag};

/// The [loca] table.
///
/// Offsets are validated as non-decreasing when the table is read.
///
/// [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca
#[derive(Clone, Debug)]
pub enum Loca<'a> {
    /// Offsets divided by two.
    Short(&'a [BigEndian<u16>]),
    Long(&'a [BigEndian<u32>]),
}

impl TopLevelTable for Loca<'_> {
    const TAG: Tag = Tag::new(b"loca");
}

impl<'a> Loca<'a> {
    /// Read `num_glyphs + 1` offsets.
    pub fn read(data: FontData<'a>, is_long: bool, num_glyphs: u16) -> Result<Self, ReadError> {
        Self::read_with_args(data, &(is_long, num_glyphs))
    }

    /// The number of glyphs covered by this table.
    pub fn len(&self) -> usize {
        match self {
            Loca::Short(data) => data.len().saturating_sub(1),
            Loca::Long(data) => data.len().saturating_sub(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attempt to return the byte offset at the given index.
    pub fn get_raw(&self, idx: usize) -> Option<u32> {
        match self {
            Loca::Short(data) => data.get(idx).map(|x| x.get() as u32 * 2),
            Loca::Long(data) => data.get(idx).map(|x| x.get()),
        }
    }

    /// The byte range of the glyph within `glyf`.
    ///
    /// Returns `Ok(None)` for an empty glyph, where both offsets are equal.
    pub fn glyph_range(&self, gid: GlyphId) -> Result<Option<Range<usize>>, ReadError> {
        let idx = gid.to_usize();
        let start = self.get_raw(idx).ok_or(ReadError::OutOfBounds)?;
        let end = self.get_raw(idx + 1).ok_or(ReadError::OutOfBounds)?;
        Ok((start != end).then_some(start as usize..end as usize))
    }

    fn check_monotonic(&self) -> Result<(), ReadError> {
        let mut prev = 0;
        for idx in 0..=self.len() {
            let offset = self.get_raw(idx).unwrap_or(prev);
            if offset < prev {
                return Err(ReadError::malformed(
                    Self::TAG,
                    "offsets are not in increasing order",
                ));
            }
            prev = offset;
        }
        Ok(())
    }
}

impl ReadArgs for Loca<'_> {
    /// (is_long, num_glyphs)
    type Args = (bool, u16);
}

impl<'a> FontReadWithArgs<'a> for Loca<'a> {
    fn read_with_args(data: FontData<'a>, args: &(bool, u16)) -> Result<Self, ReadError> {
        let (is_long, num_glyphs) = *args;
        let n_offsets = num_glyphs as usize + 1;
        let mut cursor = data.cursor();
        let loca = if is_long {
            cursor.read_array(n_offsets).map(Loca::Long)
        } else {
            cursor.read_array(n_offsets).map(Loca::Short)
        }?;
        loca.check_monotonic()?;
        Ok(loca)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphex_test_data::bebuffer::BeBuffer;

    #[test]
    fn short_offsets_are_scaled() {
        let buf = BeBuffer::new().extend([0u16, 10, 10, 24]);
        let loca = Loca::read(FontData::new(&buf), false, 3).unwrap();
        assert_eq!(loca.len(), 3);
        assert_eq!(loca.glyph_range(GlyphId::new(0)), Ok(Some(0..20)));
        assert_eq!(loca.glyph_range(GlyphId::new(1)), Ok(None));
        assert_eq!(loca.glyph_range(GlyphId::new(2)), Ok(Some(20..48)));
        assert_eq!(
            loca.glyph_range(GlyphId::new(3)),
            Err(ReadError::OutOfBounds)
        );
    }

    #[test]
    fn long_offsets() {
        let buf = BeBuffer::new().extend([0u32, 0, 70_000]);
        let loca = Loca::read(FontData::new(&buf), true, 2).unwrap();
        assert_eq!(loca.glyph_range(GlyphId::new(0)), Ok(None));
        assert_eq!(loca.glyph_range(GlyphId::new(1)), Ok(Some(0..70_000)));
    }

    #[test]
    fn decreasing_offsets_are_rejected() {
        let buf = BeBuffer::new().extend([0u32, 40, 20]);
        assert!(matches!(
            Loca::read(FontData::new(&buf), true, 2),
            Err(ReadError::MalformedTable { tag, .. }) if tag == Loca::TAG
        ));
    }

    #[test]
    fn missing_entries() {
        let buf = BeBuffer::new().extend([0u16, 2]);
        assert_eq!(
            Loca::read(FontData::new(&buf), false, 2).err(),
            Some(ReadError::OutOfBounds)
        );
    }
}
