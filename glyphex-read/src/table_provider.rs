//! a trait for things that can serve font tables

use types::Tag;

use crate::{tables, FontData, FontRead, ReadError};

/// An interface for any table that can be a top-level table in a font file.
pub trait TopLevelTable {
    /// The table's tag.
    const TAG: Tag;
}

/// An interface for accessing tables from a font (or font-like object)
pub trait TableProvider<'a> {
    fn data_for_tag(&self, tag: Tag) -> Option<FontData<'a>>;

    /// `true` if the font carries TrueType (quadratic) outlines.
    fn truetype_outlines(&self) -> bool;

    fn expect_data_for_tag(&self, tag: Tag) -> Result<FontData<'a>, ReadError> {
        self.data_for_tag(tag).ok_or(ReadError::MissingTable(tag))
    }

    fn head(&self) -> Result<tables::head::Head, ReadError> {
        self.expect_data_for_tag(tables::head::Head::TAG)
            .and_then(FontRead::read)
    }

    fn maxp(&self) -> Result<tables::maxp::Maxp, ReadError> {
        let truetype_outlines = self.truetype_outlines();
        self.expect_data_for_tag(tables::maxp::Maxp::TAG)
            .and_then(|data| tables::maxp::Maxp::read(data, truetype_outlines))
    }

    fn hhea(&self) -> Result<tables::hhea::Hhea, ReadError> {
        self.expect_data_for_tag(tables::hhea::Hhea::TAG)
            .and_then(FontRead::read)
    }

    fn hmtx(&self) -> Result<tables::hmtx::Hmtx<'a>, ReadError> {
        let num_glyphs = self.maxp()?.num_glyphs;
        let number_of_h_metrics = self.hhea()?.number_of_h_metrics;
        self.expect_data_for_tag(tables::hmtx::Hmtx::TAG)
            .and_then(|data| tables::hmtx::Hmtx::read(data, number_of_h_metrics, num_glyphs))
    }

    /// is_long can be optionally provided, if known, otherwise we look it up in head.
    fn loca(&self, is_long: impl Into<Option<bool>>) -> Result<tables::loca::Loca<'a>, ReadError> {
        let is_long = match is_long.into() {
            Some(val) => val,
            None => self.head()?.has_long_loca(),
        };
        let num_glyphs = self.maxp()?.num_glyphs;
        self.expect_data_for_tag(tables::loca::Loca::TAG)
            .and_then(|data| tables::loca::Loca::read(data, is_long, num_glyphs))
    }

    fn glyf(&self) -> Result<tables::glyf::Glyf<'a>, ReadError> {
        self.expect_data_for_tag(tables::glyf::Glyf::TAG)
            .and_then(FontRead::read)
    }

    fn name(&self) -> Result<tables::name::Name<'a>, ReadError> {
        self.expect_data_for_tag(tables::name::Name::TAG)
            .and_then(FontRead::read)
    }

    fn cmap(&self) -> Result<tables::cmap::Cmap<'a>, ReadError> {
        self.expect_data_for_tag(tables::cmap::Cmap::TAG)
            .and_then(FontRead::read)
    }
}
