//! Loading every font in a font file.

use glyphex_read::{CollectionHeader, FileRef, ReadError};

use crate::{Font, LoadOptions};

/// All fonts of a single font (sfnt) or font collection (ttc) file.
///
/// Fonts appear in the order of the collection's table directory offsets; a
/// single font file yields one entry. Any font that fails to load fails the
/// whole collection.
#[derive(Clone)]
pub struct FontCollection<'a> {
    data: &'a [u8],
    header: Option<CollectionHeader>,
    fonts: Vec<Font<'a>>,
}

impl<'a> FontCollection<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        Self::with_options(data, LoadOptions::default())
    }

    pub fn with_options(data: &'a [u8], options: LoadOptions) -> Result<Self, ReadError> {
        let file = FileRef::new(data)?;
        let header = match &file {
            FileRef::Collection(collection) => Some(collection.header().clone()),
            FileRef::Font(_) => None,
        };
        let fonts = file
            .fonts()
            .map(|font| Font::from_ref(font?, options))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "loaded {} font(s) from {} bytes{}",
            fonts.len(),
            data.len(),
            if header.is_some() { " (collection)" } else { "" }
        );
        Ok(Self {
            data,
            header,
            fonts,
        })
    }

    /// The raw file data.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// The ttc header, if the file is a collection.
    pub fn header(&self) -> Option<&CollectionHeader> {
        self.header.as_ref()
    }

    pub fn is_collection(&self) -> bool {
        self.header.is_some()
    }

    pub fn fonts(&self) -> &[Font<'a>] {
        &self.fonts
    }

    pub fn get(&self, index: usize) -> Option<&Font<'a>> {
        self.fonts.get(index)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Font<'a>> {
        self.fonts.iter()
    }
}

impl<'c, 'a> IntoIterator for &'c FontCollection<'a> {
    type Item = &'c Font<'a>;
    type IntoIter = std::slice::Iter<'c, Font<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use glyphex_read::{types::Tag, TableProvider};
    use glyphex_test_data::fixtures;

    use super::*;

    #[test]
    fn single_font_file() {
        let data = fixtures::test_font();
        let collection = FontCollection::new(&data).unwrap();
        assert!(!collection.is_collection());
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get(0).unwrap().font_ref().ttc_index(), None);
        assert!(collection.get(1).is_none());
    }

    #[test]
    fn collection_file() {
        let data = fixtures::test_collection();
        let collection = FontCollection::with_options(&data, LoadOptions::eager()).unwrap();
        assert!(collection.is_collection());
        assert_eq!(collection.len(), 2);
        let header = collection.header().unwrap();
        assert_eq!(header.table_directory_offsets.len(), 2);
        assert!(header.dsig.is_some());
        for (ix, font) in collection.iter().enumerate() {
            assert_eq!(font.font_ref().ttc_index(), Some(ix as u32));
            assert_eq!(font.glyph_count(), fixtures::NUM_GLYPHS);
        }
        let long_loca = collection.get(1).unwrap();
        assert!(long_loca.head().has_long_loca());
        assert!(long_loca.font_ref().table_data(Tag::new(b"DSIG")).is_some());
        assert!(long_loca.font_ref().glyf().is_ok());
    }

    #[test]
    fn one_bad_font_fails_the_file() {
        let mut bad = fixtures::test_font_builder(false);
        bad.remove(Tag::new(b"cmap"));
        let mut builder = glyphex_test_data::font_builder::CollectionBuilder::new();
        builder.add_font(fixtures::test_font_builder(false)).add_font(bad);
        let data = builder.build();
        assert_eq!(
            FontCollection::new(&data).err(),
            Some(ReadError::MissingTable(Tag::new(b"cmap")))
        );
    }

    #[test]
    fn not_a_font() {
        assert!(FontCollection::new(b"definitely not a font").is_err());
    }
}
