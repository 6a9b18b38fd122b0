//! The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head) table

use types::{BoundingBox, LongDateTime, Tag};

use crate::{FontData, FontRead, ReadError, TopLevelTable};

/// The expected value of [`Head::magic_number`].
pub const MAGIC_NUMBER: u32 = 0x5F0F3CF5;

/// The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head)
/// (font header) table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Head {
    pub major_version: u16,
    pub minor_version: u16,
    /// Set by the font manufacturer, as a 16.16 fixed value.
    pub font_revision: u32,
    pub checksum_adjustment: u32,
    pub magic_number: u32,
    pub flags: u16,
    /// Font units per em. Never zero.
    pub units_per_em: u16,
    pub created: LongDateTime,
    pub modified: LongDateTime,
    /// Bounds over all glyphs, in font units.
    pub bounds: BoundingBox<i16>,
    pub mac_style: u16,
    /// Smallest readable size in pixels.
    pub lowest_rec_ppem: u16,
    pub font_direction_hint: i16,
    /// 0 for short offsets in `loca`, 1 for long.
    pub index_to_loc_format: i16,
    pub glyph_data_format: i16,
}

impl Head {
    /// `true` if `loca` stores 32-bit offsets.
    pub fn has_long_loca(&self) -> bool {
        self.index_to_loc_format == 1
    }
}

impl TopLevelTable for Head {
    const TAG: Tag = Tag::new(b"head");
}

impl<'a> FontRead<'a> for Head {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let head = Head {
            major_version: cursor.read()?,
            minor_version: cursor.read()?,
            font_revision: cursor.read()?,
            checksum_adjustment: cursor.read()?,
            magic_number: cursor.read()?,
            flags: cursor.read()?,
            units_per_em: cursor.read()?,
            created: cursor.read()?,
            modified: cursor.read()?,
            bounds: BoundingBox {
                x_min: cursor.read()?,
                y_min: cursor.read()?,
                x_max: cursor.read()?,
                y_max: cursor.read()?,
            },
            mac_style: cursor.read()?,
            lowest_rec_ppem: cursor.read()?,
            font_direction_hint: cursor.read()?,
            index_to_loc_format: cursor.read()?,
            glyph_data_format: cursor.read()?,
        };
        if !matches!(head.index_to_loc_format, 0 | 1) {
            return Err(ReadError::malformed(
                Self::TAG,
                "indexToLocFormat must be 0 or 1",
            ));
        }
        if head.units_per_em == 0 {
            return Err(ReadError::malformed(Self::TAG, "unitsPerEm is zero"));
        }
        Ok(head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphex_test_data::bebuffer::BeBuffer;

    fn head_bytes(loca_format: i16, upem: u16) -> BeBuffer {
        BeBuffer::new()
            .extend([1u16, 0u16])
            .push(0x0002_cccc_u32)
            .extend([42u32, MAGIC_NUMBER])
            .extend([16u16, upem]) // flags, upm
            .extend([LongDateTime::new(-500), LongDateTime::new(101)])
            .extend([-100i16, -50, 400, 711])
            .extend([0u16, 12]) // mac_style / ppem
            .extend([2i16, loca_format, 0])
    }

    #[test]
    fn read_all_fields() {
        let buf = head_bytes(1, 2048);
        let head = Head::read(FontData::new(&buf)).unwrap();
        assert_eq!((head.major_version, head.minor_version), (1, 0));
        assert_eq!(head.units_per_em, 2048);
        assert_eq!(head.created.as_secs(), -500);
        assert_eq!(head.modified.as_secs(), 101);
        assert_eq!(head.bounds.y_min, -50);
        assert_eq!(head.bounds.y_max, 711);
        assert_eq!(head.lowest_rec_ppem, 12);
        assert!(head.has_long_loca());
    }

    #[test]
    fn bad_loca_format() {
        let buf = head_bytes(2, 1000);
        assert!(matches!(
            Head::read(FontData::new(&buf)),
            Err(ReadError::MalformedTable { tag, .. }) if tag == Head::TAG
        ));
    }

    #[test]
    fn zero_upem() {
        let buf = head_bytes(0, 0);
        assert!(Head::read(FontData::new(&buf)).is_err());
    }

    #[test]
    fn truncated() {
        let buf = head_bytes(0, 1000);
        assert_eq!(
            Head::read(FontData::new(&buf[..40])),
            Err(ReadError::OutOfBounds)
        );
    }
}
