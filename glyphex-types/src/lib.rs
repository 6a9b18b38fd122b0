//! Common [scalar data types][data types] used in font files, plus the
//! small geometric types shared by the parser and the rasterizer.
//!
//! [data types]: https://docs.microsoft.com/en-us/typography/opentype/spec/otff#data-types

#![deny(rustdoc::broken_intra_doc_links)]

mod bbox;
mod fixed;
mod glyph_id;
mod longdatetime;
mod name_id;
mod point;
mod raw;
mod tag;

pub use bbox::BoundingBox;
pub use fixed::F2Dot14;
pub use glyph_id::GlyphId;
pub use longdatetime::LongDateTime;
pub use name_id::NameId;
pub use point::Point;
pub use raw::{BigEndian, Scalar};
pub use tag::{InvalidTag, Tag};

/// The header tag for a font collection file.
pub const TTC_HEADER_TAG: Tag = Tag::new(b"ttcf");

/// The SFNT version for fonts containing TrueType outlines.
pub const TT_SFNT_VERSION: u32 = 0x00010000;
/// The SFNT version used by some legacy Apple TrueType fonts.
pub const TRUE_SFNT_VERSION: u32 = 0x74727565;
/// The SFNT version for fonts containing CFF outlines.
pub const CFF_SFNT_VERSION: u32 = 0x4F54544F;
