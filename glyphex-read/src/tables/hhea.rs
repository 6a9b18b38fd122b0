//! the [hhea (Horizontal Header)](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea) table

use types::Tag;

use crate::{FontData, FontRead, ReadError, TopLevelTable};

/// The horizontal header table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hhea {
    pub major_version: u16,
    pub minor_version: u16,
    /// Typographic ascent, in font units.
    pub ascender: i16,
    /// Typographic descent, in font units. Usually negative.
    pub descender: i16,
    pub line_gap: i16,
    pub advance_width_max: u16,
    pub min_left_side_bearing: i16,
    pub min_right_side_bearing: i16,
    pub x_max_extent: i16,
    pub caret_slope_rise: i16,
    pub caret_slope_run: i16,
    pub caret_offset: i16,
    pub metric_data_format: i16,
    /// Number of advance/side bearing pairs at the start of `hmtx`.
    pub number_of_h_metrics: u16,
}

impl TopLevelTable for Hhea {
    const TAG: Tag = Tag::new(b"hhea");
}

impl<'a> FontRead<'a> for Hhea {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let mut hhea = Hhea {
            major_version: cursor.read()?,
            minor_version: cursor.read()?,
            ascender: cursor.read()?,
            descender: cursor.read()?,
            line_gap: cursor.read()?,
            advance_width_max: cursor.read()?,
            min_left_side_bearing: cursor.read()?,
            min_right_side_bearing: cursor.read()?,
            x_max_extent: cursor.read()?,
            caret_slope_rise: cursor.read()?,
            caret_slope_run: cursor.read()?,
            caret_offset: cursor.read()?,
            ..Default::default()
        };
        // four reserved fields
        cursor.advance_by(8);
        hhea.metric_data_format = cursor.read()?;
        hhea.number_of_h_metrics = cursor.read()?;
        Ok(hhea)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphex_test_data::bebuffer::BeBuffer;

    #[test]
    fn read_hhea() {
        let buf = BeBuffer::new()
            .extend([1u16, 0])
            .extend([800i16, -200, 90])
            .push(1100u16)
            .extend([-30i16, -40, 1050, 1, 0, 0])
            .extend([0i16; 4])
            .push(0i16)
            .push(7u16);
        let hhea = Hhea::read(FontData::new(&buf)).unwrap();
        assert_eq!(hhea.ascender, 800);
        assert_eq!(hhea.descender, -200);
        assert_eq!(hhea.line_gap, 90);
        assert_eq!(hhea.advance_width_max, 1100);
        assert_eq!(hhea.caret_slope_rise, 1);
        assert_eq!(hhea.number_of_h_metrics, 7);
        assert!(Hhea::read(FontData::new(&buf[..34])).is_err());
    }
}
