//! Filling flattened geometry with the nonzero winding rule.

use std::fmt;

use glyphex_read::types::Point;

use super::RasterImage;
use crate::outline::{Geometry, Segment};

/// Errors that can occur when rasterizing geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// The geometry still contains a quadratic segment; flatten it first
    /// with [`Geometry::simplified`].
    CurvedSegment { contour: usize, segment: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurvedSegment { contour, segment } => write!(
                f,
                "segment {segment} of contour {contour} is curved; only lines can be rasterized"
            ),
        }
    }
}

impl std::error::Error for RenderError {}

/// Scanline rasterizer settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rasterizer {
    /// Empty pixels around the glyph bounds. The leading edges get
    /// `padding` pixels and the trailing edges `2 * padding`.
    pub padding: usize,
    /// Image dimensions are rounded up to a multiple of this, so the image
    /// can be downsampled by it without losing pixels.
    pub alignment: usize,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self {
            padding: 16,
            alignment: super::DEFAULT_SUPERSAMPLE,
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Edge {
    p1: Point<f64>,
    p2: Point<f64>,
}

impl Edge {
    /// The crossing with the horizontal line at `y` and its winding
    /// direction, if the edge spans it.
    ///
    /// The span includes the upper end of the edge (larger y) but not the
    /// lower, so a shared vertex is crossed once.
    fn crossing(&self, y: f64) -> Option<(f64, i32)> {
        let Self { p1, p2 } = *self;
        if p1.y.min(p2.y) >= y || p1.y.max(p2.y) < y {
            return None;
        }
        let x = p1.x + (y - p1.y) / (p2.y - p1.y) * (p2.x - p1.x);
        let winding = if p2.y > p1.y { 1 } else { -1 };
        Some((x, winding))
    }
}

impl Rasterizer {
    /// Fill `geometry` at `pixels_per_em`, producing coverage in {0, 1}.
    ///
    /// A pixel at integer position (x, y) samples the em space point
    /// `((x - x_origin) / scale, (y - y_origin) / scale)`.
    pub fn render(&self, geometry: &Geometry, pixels_per_em: f64) -> Result<RasterImage, RenderError> {
        let edges = collect_edges(geometry)?;
        let scale = pixels_per_em;
        let bounds = geometry.bounds;
        let alignment = self.alignment.max(1);
        let size = |extent: f64| {
            ((extent * scale).ceil().max(0.0) as usize + 3 * self.padding).div_ceil(alignment)
                * alignment
        };
        let x_origin = (-bounds.x_min * scale).ceil() + self.padding as f64;
        let y_origin = (-bounds.y_min * scale).ceil() + self.padding as f64;
        let mut image = RasterImage::new(
            size(bounds.width()),
            size(bounds.height()),
            scale,
            x_origin,
            y_origin,
        );
        log::trace!(
            "rasterizing {} edges into {}x{} pixels",
            edges.len(),
            image.width(),
            image.height()
        );
        let width = image.width();
        let mut crossings = Vec::with_capacity(edges.len());
        for (y, row) in image.pixels_mut().chunks_mut(width.max(1)).enumerate() {
            let y_em = (y as f64 - y_origin) / scale;
            crossings.clear();
            crossings.extend(edges.iter().filter_map(|edge| edge.crossing(y_em)));
            if crossings.is_empty() {
                continue;
            }
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));
            let mut next = crossings.iter().peekable();
            let mut winding = 0;
            for (x, pixel) in row.iter_mut().enumerate() {
                let x_em = (x as f64 - x_origin) / scale;
                while let Some((_, direction)) = next.next_if(|(cross_x, _)| *cross_x <= x_em) {
                    winding += direction;
                }
                if winding != 0 {
                    *pixel = 1.0;
                }
            }
        }
        Ok(image)
    }
}

/// All non horizontal edges of the geometry.
fn collect_edges(geometry: &Geometry) -> Result<Vec<Edge>, RenderError> {
    let mut edges = Vec::new();
    for (contour_ix, contour) in geometry.contours.iter().enumerate() {
        for (segment_ix, segment) in contour.iter().enumerate() {
            match *segment {
                Segment::Line { p1, p2 } => {
                    if p1.y != p2.y {
                        edges.push(Edge { p1, p2 });
                    }
                }
                Segment::QuadraticBezier { .. } => {
                    return Err(RenderError::CurvedSegment {
                        contour: contour_ix,
                        segment: segment_ix,
                    })
                }
            }
        }
    }
    Ok(edges)
}

/// Render flattened geometry with the default [`Rasterizer`].
pub fn render(geometry: &Geometry, pixels_per_em: f64) -> Result<RasterImage, RenderError> {
    Rasterizer::default().render(geometry, pixels_per_em)
}

/// Render a glyph that may have no outline; an absent outline gives an
/// empty image.
pub fn render_glyph(
    geometry: Option<&Geometry>,
    pixels_per_em: f64,
) -> Result<RasterImage, RenderError> {
    match geometry {
        Some(geometry) => render(geometry, pixels_per_em),
        None => Ok(RasterImage::empty(pixels_per_em)),
    }
}
