//! test data shared between the glyphex crates.
//!
//! Everything here is generated in code: a big-endian buffer builder for
//! hand assembled tables, encoders for whole tables and glyph records, a
//! font (and collection) builder, and a small synthetic font.

pub mod bebuffer;
pub mod cmap;
pub mod fixtures;
pub mod font_builder;
pub mod glyphs;
pub mod tables;
