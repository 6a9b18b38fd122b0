//! Reading the TrueType tables needed to extract glyph outlines
//!
//! This crate provides memory safe parsing of TrueType font files and font
//! collections. It decodes the table directory and the handful of tables a
//! glyph extractor needs (`head`, `maxp`, `hhea`, `hmtx`, `loca`, `glyf`,
//! `name` and `cmap`), and leaves everything else as raw bytes.
//!
//! For resolved outlines, metrics and rasterization, see the `glyphex` crate.
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use glyphex_read::{FontRef, TableProvider};
//! let font_bytes = std::fs::read(path_to_my_font_file).unwrap();
//! // Single fonts only. for font collections (.ttc) use FontRef::from_index
//! let font = FontRef::new(&font_bytes).expect("failed to read font data");
//! let head = font.head().expect("missing 'head' table");
//! let maxp = font.maxp().expect("missing 'maxp' table");
//!
//! println!("{} units per em, {} glyphs", head.units_per_em, maxp.num_glyphs);
//! ```
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod font_data;
mod read;
mod table_directory;
mod table_provider;
pub mod tables;

pub use font_data::{Cursor, FontData};
pub use read::{FontRead, FontReadWithArgs, ReadArgs, ReadError};
pub use table_directory::{
    CollectionHeader, DsigInfo, KnownTables, TableDirectory, TableKind, TableRecord,
};
pub use table_provider::{TableProvider, TopLevelTable};

/// Public re-export of the glyphex-types crate.
pub extern crate glyphex_types as types;

use types::{Tag, CFF_SFNT_VERSION, TRUE_SFNT_VERSION, TTC_HEADER_TAG, TT_SFNT_VERSION};

/// Reference to the content of a font or font collection file.
#[derive(Clone)]
pub enum FileRef<'a> {
    /// A single font.
    Font(FontRef<'a>),
    /// A collection of fonts.
    Collection(CollectionRef<'a>),
}

impl<'a> FileRef<'a> {
    /// Creates a new reference to a file representing a font or font collection.
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        Ok(if let Ok(collection) = CollectionRef::new(data) {
            Self::Collection(collection)
        } else {
            Self::Font(FontRef::new(data)?)
        })
    }

    /// Returns an iterator over the fonts contained in the file.
    pub fn fonts(&self) -> impl Iterator<Item = Result<FontRef<'a>, ReadError>> + 'a + Clone {
        let (iter_one, iter_two) = match self {
            Self::Font(font) => (Some(Ok(font.clone())), None),
            Self::Collection(collection) => (None, Some(collection.iter())),
        };
        iter_two.into_iter().flatten().chain(iter_one)
    }
}

/// Reference to the content of a font collection file.
#[derive(Clone)]
pub struct CollectionRef<'a> {
    data: FontData<'a>,
    header: CollectionHeader,
}

impl<'a> CollectionRef<'a> {
    /// Creates a new reference to a font collection.
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        let data = FontData::new(data);
        let tag: Tag = data.read_at(0)?;
        if tag != TTC_HEADER_TAG {
            return Err(ReadError::InvalidFormat(tag.to_u32() as i64));
        }
        let header = CollectionHeader::read(data)?;
        Ok(Self { data, header })
    }

    /// The collection header.
    pub fn header(&self) -> &CollectionHeader {
        &self.header
    }

    /// Returns the number of fonts in the collection.
    pub fn len(&self) -> u32 {
        self.header.num_fonts()
    }

    /// Returns true if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the font in the collection at the specified index.
    pub fn get(&self, index: u32) -> Result<FontRef<'a>, ReadError> {
        let offset = *self
            .header
            .table_directory_offsets
            .get(index as usize)
            .ok_or(ReadError::InvalidCollectionIndex(index))? as usize;
        let table_dir_data = self.data.split_off(offset).ok_or(ReadError::OutOfBounds)?;
        Ok(FontRef {
            data: self.data,
            table_directory: read_table_directory(table_dir_data)?,
            ttc_index: Some(index),
        })
    }

    /// Returns an iterator over the fonts in the collection.
    pub fn iter(&self) -> impl Iterator<Item = Result<FontRef<'a>, ReadError>> + 'a + Clone {
        let copy = self.clone();
        (0..self.len()).map(move |ix| copy.get(ix))
    }
}

/// Reference to an in-memory font.
///
/// This is a simple implementation of the [`TableProvider`] trait backed
/// by a borrowed slice containing font data. Table offsets are relative to
/// the start of that slice, which is the whole file for collection members.
#[derive(Clone)]
pub struct FontRef<'a> {
    data: FontData<'a>,
    pub table_directory: TableDirectory,
    /// The index of this font in a TrueType collection
    ttc_index: Option<u32>,
}

impl<'a> FontRef<'a> {
    /// Creates a new reference to an in-memory font backed by the given data.
    ///
    /// The data must be a single font (not a font collection) and must begin with a
    /// [table directory] to be considered valid.
    ///
    /// To load a font from a font collection, use [`FontRef::from_index`] instead.
    ///
    /// [table directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        let data = FontData::new(data);
        Ok(FontRef {
            data,
            table_directory: read_table_directory(data)?,
            ttc_index: None,
        })
    }

    /// Creates a new reference to an in-memory font at the specified index
    /// backed by the given data.
    ///
    /// This accepts either font collection (ttc) or single font (ttf) files.
    /// If a single font file is provided, the index parameter must be 0.
    pub fn from_index(data: &'a [u8], index: u32) -> Result<Self, ReadError> {
        match FileRef::new(data)? {
            FileRef::Font(font) => {
                if index == 0 {
                    Ok(font)
                } else {
                    Err(ReadError::InvalidCollectionIndex(index))
                }
            }
            FileRef::Collection(collection) => collection.get(index),
        }
    }

    /// Returns the underlying font data.
    pub fn data(&self) -> FontData<'a> {
        self.data
    }

    /// If the font is in a font collection, the index in that collection.
    pub fn ttc_index(&self) -> Option<u32> {
        self.ttc_index
    }

    /// Returns the associated table data for the given tag, if the table
    /// record exists and its range lies within the font data.
    pub fn table_data(&self, tag: Tag) -> Option<FontData<'a>> {
        self.try_table_data(tag).ok().flatten()
    }

    /// Returns the associated table data for the given tag.
    ///
    /// `Ok(None)` if there is no record for the table, and
    /// [`ReadError::OutOfBounds`] if the record's range extends past the end
    /// of the font data.
    pub fn try_table_data(&self, tag: Tag) -> Result<Option<FontData<'a>>, ReadError> {
        let Some(record) = self.table_directory.find(tag) else {
            return Ok(None);
        };
        self.data
            .slice_len(record.offset as usize, record.length as usize)
            .map(Some)
    }

    /// Returns an iterator over all of the available fonts in
    /// the given font data.
    pub fn fonts(
        data: &'a [u8],
    ) -> impl Iterator<Item = Result<FontRef<'a>, ReadError>> + 'a + Clone {
        let count = match FileRef::new(data) {
            Ok(FileRef::Font(_)) => 1,
            Ok(FileRef::Collection(ttc)) => ttc.len(),
            _ => 0,
        };
        (0..count).map(move |idx| FontRef::from_index(data, idx))
    }
}

/// Read a table directory, rejecting unknown sfnt versions before looking
/// at any table records.
fn read_table_directory(data: FontData) -> Result<TableDirectory, ReadError> {
    let sfnt_version: u32 = data.read_at(0)?;
    if ![TT_SFNT_VERSION, CFF_SFNT_VERSION, TRUE_SFNT_VERSION].contains(&sfnt_version) {
        return Err(ReadError::InvalidSfnt(sfnt_version));
    }
    TableDirectory::read(data)
}

impl<'a> TableProvider<'a> for FontRef<'a> {
    fn data_for_tag(&self, tag: Tag) -> Option<FontData<'a>> {
        self.table_data(tag)
    }

    fn expect_data_for_tag(&self, tag: Tag) -> Result<FontData<'a>, ReadError> {
        self.try_table_data(tag)?.ok_or(ReadError::MissingTable(tag))
    }

    fn truetype_outlines(&self) -> bool {
        self.table_directory.sfnt_version != CFF_SFNT_VERSION
    }
}
