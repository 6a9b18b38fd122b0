//! Rasterization of glyph geometry and post-processing of the result.
//!
//! The usual pipeline renders flattened geometry at a multiple of the target
//! size, then downsamples to anti-alias:
//!
//! ```
//! # fn example(font: &glyphex::Font) -> Result<(), Box<dyn std::error::Error>> {
//! use glyphex::raster::{self, DEFAULT_GAMMA, DEFAULT_SUPERSAMPLE};
//!
//! let ppem = 32.0;
//! let glyph_id = font.unicode_to_glyph_id('a').unwrap_or_default();
//! let geometry = font.glyph_geometry(glyph_id, 100)?;
//! let image = raster::render_glyph(geometry.as_ref(), ppem * DEFAULT_SUPERSAMPLE as f64)?
//!     .downsampled(DEFAULT_SUPERSAMPLE, DEFAULT_GAMMA)
//!     .cropped();
//! println!("{image}");
//! # Ok(())
//! # }
//! ```

mod distance;
mod image;
mod scanline;

pub use image::RasterImage;
pub use scanline::{render, render_glyph, Rasterizer, RenderError};

/// Supersampling factor used before downsampling.
pub const DEFAULT_SUPERSAMPLE: usize = 16;

/// Gamma applied when downsampling a supersampled coverage image.
pub const DEFAULT_GAMMA: f64 = 2.2;
