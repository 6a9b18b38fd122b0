//! Builders for font and font collection files

use std::collections::BTreeMap;

use glyphex_types::{Tag, TTC_HEADER_TAG, TT_SFNT_VERSION};

use crate::bebuffer::BeBuffer;

const TABLE_RECORD_LEN: usize = 16;
const TABLE_DIRECTORY_HEADER_LEN: usize = 12;

/// Build a font from some set of raw tables.
///
/// Tables are written in tag order, each padded to four bytes.
#[derive(Debug, Clone)]
pub struct FontBuilder {
    sfnt_version: u32,
    tables: BTreeMap<Tag, Vec<u8>>,
}

impl Default for FontBuilder {
    fn default() -> Self {
        Self {
            sfnt_version: TT_SFNT_VERSION,
            tables: Default::default(),
        }
    }
}

impl FontBuilder {
    /// Create a new builder to compile a binary font
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the version written at the start of the table directory.
    pub fn sfnt_version(&mut self, version: u32) -> &mut Self {
        self.sfnt_version = version;
        self
    }

    /// A builder method to add raw data for the provided tag
    pub fn add_raw(&mut self, tag: Tag, data: impl Into<Vec<u8>>) -> &mut Self {
        self.tables.insert(tag, data.into());
        self
    }

    /// Remove the table with this tag, if present.
    pub fn remove(&mut self, tag: Tag) -> &mut Self {
        self.tables.remove(&tag);
        self
    }

    /// Returns `true` if the builder contains a table with this tag.
    pub fn contains(&self, tag: Tag) -> bool {
        self.tables.contains_key(&tag)
    }

    /// Assemble all the tables into a binary font file with a [Table Directory].
    ///
    /// [Table Directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
    pub fn build(&self) -> Vec<u8> {
        self.build_at(0)
    }

    /// Assemble the font as if it started `base` bytes into a file.
    ///
    /// Table offsets in a collection are relative to the start of the file.
    fn build_at(&self, base: usize) -> Vec<u8> {
        let num_tables = self.tables.len();
        let header_len = TABLE_DIRECTORY_HEADER_LEN + num_tables * TABLE_RECORD_LEN;
        let search = SearchRange::compute(num_tables, TABLE_RECORD_LEN);
        let mut directory = BeBuffer::new()
            .push(self.sfnt_version)
            .push(num_tables as u16)
            .push(search.search_range)
            .push(search.entry_selector)
            .push(search.range_shift);
        let mut position = base + header_len;
        for (tag, data) in &self.tables {
            directory = directory
                .push(*tag)
                .push(checksum(data))
                .push(position as u32)
                .push(data.len() as u32);
            position += round4(data.len());
        }
        let mut bytes = directory.into_vec();
        for data in self.tables.values() {
            bytes.extend_from_slice(data);
            bytes.resize(round4(bytes.len()), 0);
        }
        bytes
    }
}

/// Build a TrueType collection from a list of fonts.
///
/// Each font is written whole (directory then tables) after the header;
/// tables are not shared between fonts.
#[derive(Debug, Clone, Default)]
pub struct CollectionBuilder {
    fonts: Vec<FontBuilder>,
    with_dsig: bool,
}

impl CollectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_font(&mut self, font: FontBuilder) -> &mut Self {
        self.fonts.push(font);
        self
    }

    /// Write a version 2.0 header with (empty) DSIG fields.
    pub fn with_dsig(&mut self) -> &mut Self {
        self.with_dsig = true;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let major_version = if self.with_dsig { 2u16 } else { 1 };
        let header_len = 12 + self.fonts.len() * 4 + if self.with_dsig { 12 } else { 0 };
        let mut fonts = Vec::with_capacity(self.fonts.len());
        let mut offsets = Vec::with_capacity(self.fonts.len());
        let mut position = header_len;
        for font in &self.fonts {
            let bytes = font.build_at(position);
            offsets.push(position as u32);
            position += bytes.len();
            fonts.push(bytes);
        }
        let mut header = BeBuffer::new()
            .push(TTC_HEADER_TAG)
            .push(major_version)
            .push(0u16)
            .push(self.fonts.len() as u32)
            .extend(offsets);
        if self.with_dsig {
            header = header.push(Tag::new(b"DSIG")).push(0u32).push(0u32);
        }
        let mut bytes = header.into_vec();
        for font in fonts {
            bytes.extend(font);
        }
        bytes
    }
}

/// Binary search assists for the table directory.
struct SearchRange {
    search_range: u16,
    entry_selector: u16,
    range_shift: u16,
}

impl SearchRange {
    fn compute(n_items: usize, item_size: usize) -> Self {
        if n_items == 0 {
            return SearchRange {
                search_range: 0,
                entry_selector: 0,
                range_shift: 0,
            };
        }
        let entry_selector = n_items.ilog2() as usize;
        let search_range = (1 << entry_selector) * item_size;
        let range_shift = n_items * item_size - search_range;
        SearchRange {
            search_range: search_range as u16,
            entry_selector: entry_selector as u16,
            range_shift: range_shift as u16,
        }
    }
}

/// <https://github.com/google/woff2/blob/a0d0ed7da27b708c0a4e96ad7a998bddc933c06e/src/round.h#L19>
fn round4(sz: usize) -> usize {
    (sz + 3) & !3
}

/// The table checksum: the wrapping sum of big-endian u32 words, with the
/// final word zero padded.
fn checksum(data: &[u8]) -> u32 {
    data.chunks(4)
        .map(|chunk| {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            u32::from_be_bytes(word)
        })
        .fold(0u32, u32::wrapping_add)
}
