//! Glyph outlines, metrics and rasterization for TrueType fonts.
//!
//! Glyphex sits above the table parsing provided by
//! [`glyphex-read`](glyphex_read) and turns a font file into data an
//! application can use directly: resolved glyph [`Geometry`] in em units,
//! [metrics](LineMetrics), [names](FontNames), a merged Unicode
//! [character map](Charmap), and [raster] images including anti-aliased
//! coverage and signed distance fields.
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use glyphex::{raster, FontCollection};
//!
//! let data = std::fs::read(path_to_my_font_file).unwrap();
//! let fonts = FontCollection::new(&data).expect("failed to load fonts");
//! for font in &fonts {
//!     let glyph_id = font.unicode_to_glyph_id('a').unwrap_or_default();
//!     let geometry = font.glyph_geometry(glyph_id, 100).unwrap();
//!     let image = raster::render_glyph(geometry.as_ref(), 64.0).unwrap();
//!     println!("{}", image.cropped());
//! }
//! ```

#![forbid(unsafe_code)]

/// Expose our "raw" underlying parser crate.
pub extern crate glyphex_read as raw;

pub mod outline;
pub mod raster;

mod charmap;
mod collection;
mod decycler;
mod font;
mod metrics;
mod names;
mod warning;

pub use charmap::Charmap;
pub use collection::FontCollection;
pub use font::{Font, GlyphLoading, LoadOptions};
pub use metrics::{GlyphMetrics, LineMetrics};
pub use names::FontNames;
pub use outline::{Geometry, Segment};
pub use warning::Warning;

/// Type for a glyph identifier.
pub type GlyphId = glyphex_read::types::GlyphId;

/// Type for a 4-byte tag used to identify font tables.
pub type Tag = glyphex_read::types::Tag;
