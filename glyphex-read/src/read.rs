//! Traits for interpreting font data

use types::{GlyphId, Tag};

use crate::font_data::FontData;

/// A type that can be read from raw table data.
///
/// This trait is implemented for tables that are self-describing: that
/// is, tables that do not require any external state in order to interpret their
/// underlying bytes. (Tables that require external state implement
/// [`FontReadWithArgs`] instead)
pub trait FontRead<'a>: Sized {
    /// Read an instance of `Self` from the provided data, performing validation.
    fn read(data: FontData<'a>) -> Result<Self, ReadError>;
}

/// A trait for a type that needs additional arguments to be read.
pub trait ReadArgs {
    type Args: Copy;
}

/// A trait for types that require external data in order to be constructed.
///
/// `hmtx` needs glyph and metric counts from other tables, `loca` needs the
/// offset format from `head`, and so on.
pub trait FontReadWithArgs<'a>: Sized + ReadArgs {
    /// read an item, using the provided args.
    ///
    /// If a type requires multiple arguments, they will be passed as a tuple.
    fn read_with_args(data: FontData<'a>, args: &Self::Args) -> Result<Self, ReadError>;
}

/// An error that occurs when reading font data.
///
/// All of these are fatal for the font being read; recoverable anomalies are
/// reported separately by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// A read would have run past the end of the available data.
    OutOfBounds,
    // i64 is flexible enough to store any value we might encounter
    InvalidFormat(i64),
    /// The file does not start with a known sfnt version.
    InvalidSfnt(u32),
    /// A collection index past the number of fonts in the file.
    InvalidCollectionIndex(u32),
    /// A table required for the requested operation is absent.
    MissingTable(Tag),
    /// A structural invariant of a table was violated.
    MalformedTable { tag: Tag, detail: &'static str },
    /// A glyph record is inconsistent, or references glyphs in a way that
    /// cannot be resolved.
    MalformedGlyph {
        glyph_id: GlyphId,
        detail: &'static str,
    },
}

impl ReadError {
    pub(crate) fn malformed(tag: Tag, detail: &'static str) -> Self {
        ReadError::MalformedTable { tag, detail }
    }
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::OutOfBounds => write!(f, "An offset was out of bounds"),
            ReadError::InvalidFormat(x) => write!(f, "Invalid format '{x}'"),
            ReadError::InvalidSfnt(ver) => write!(f, "Invalid sfnt version 0x{ver:08X}"),
            ReadError::InvalidCollectionIndex(ix) => {
                write!(f, "Invalid index {ix} for font collection")
            }
            ReadError::MissingTable(tag) => write!(f, "missing table `{tag}`"),
            ReadError::MalformedTable { tag, detail } => {
                write!(f, "malformed `{tag}` table: {detail}")
            }
            ReadError::MalformedGlyph { glyph_id, detail } => {
                write!(f, "malformed glyph {glyph_id}: {detail}")
            }
        }
    }
}

impl std::error::Error for ReadError {}
