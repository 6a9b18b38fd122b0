//! Converting glyph records into geometry.

use glyphex_read::{
    tables::glyf::{Anchor, CompositeGlyph, CurvePoint, Glyph, SimpleGlyph, Transform},
    types::{GlyphId, Point},
    ReadError,
};

use super::{Geometry, Segment};
use crate::{
    decycler::{Decycler, DecyclerError, MAX_COMPOSITE_DEPTH},
    Font,
};

type Contours = Vec<Vec<Segment>>;

/// Resolve the geometry of a glyph, composing composite glyphs.
///
/// Returns `None` for glyphs with no outline, and for composite glyphs that
/// place a component by point matching.
pub(crate) fn resolve(font: &Font, glyph_id: GlyphId) -> Result<Option<Geometry>, ReadError> {
    let units_per_em = font.units_per_em() as f64;
    let mut decycler = Decycler::new(MAX_COMPOSITE_DEPTH);
    let contours = resolve_contours(font, glyph_id, units_per_em, &mut decycler)?;
    Ok(contours.map(|contours| Geometry::new(contours, font.advance_width(glyph_id))))
}

fn resolve_contours(
    font: &Font,
    glyph_id: GlyphId,
    units_per_em: f64,
    decycler: &mut Decycler<GlyphId>,
) -> Result<Option<Contours>, ReadError> {
    let mut cycle_guard = decycler.enter(glyph_id).map_err(|e| ReadError::MalformedGlyph {
        glyph_id,
        detail: match e {
            DecyclerError::CycleDetected => "composite glyph references itself",
            DecyclerError::DepthLimitExceeded => "composite glyphs are nested too deeply",
        },
    })?;
    match font.glyph_data(glyph_id)? {
        None => Ok(None),
        Some(Glyph::Simple(glyph)) => Ok(Some(simple_contours(&glyph, units_per_em))),
        Some(Glyph::Composite(glyph)) => {
            composite_contours(font, glyph_id, &glyph, units_per_em, &mut cycle_guard)
        }
    }
}

fn simple_contours(glyph: &SimpleGlyph, units_per_em: f64) -> Contours {
    glyph
        .contours()
        .map(|points| contour_segments(points, units_per_em))
        .collect()
}

/// Walk the points of one closed contour.
///
/// An off curve point becomes the control of a quadratic segment whose ends
/// are its neighbors, or the midpoints towards them when they are off curve
/// too. Two consecutive on curve points make a line.
fn contour_segments(points: &[CurvePoint], units_per_em: f64) -> Vec<Segment> {
    let n = points.len();
    let to_em = |point: &CurvePoint| {
        Point::new(point.x as f64 / units_per_em, -(point.y as f64) / units_per_em)
    };
    (0..n)
        .filter_map(|ix| {
            let prev = &points[(ix + n - 1) % n];
            let current = &points[ix];
            let next = &points[(ix + 1) % n];
            let point = to_em(current);
            if !current.on_curve {
                let mut p1 = to_em(prev);
                if !prev.on_curve {
                    p1 = p1.midpoint(point);
                }
                let mut p2 = to_em(next);
                if !next.on_curve {
                    p2 = p2.midpoint(point);
                }
                Some(Segment::QuadraticBezier {
                    p1,
                    control: point,
                    p2,
                })
            } else if next.on_curve {
                Some(Segment::Line {
                    p1: point,
                    p2: to_em(next),
                })
            } else {
                None
            }
        })
        .collect()
}

fn composite_contours(
    font: &Font,
    glyph_id: GlyphId,
    glyph: &CompositeGlyph,
    units_per_em: f64,
    decycler: &mut Decycler<GlyphId>,
) -> Result<Option<Contours>, ReadError> {
    let mut contours = Contours::new();
    for component in &glyph.components {
        let Some(child) = resolve_contours(font, component.glyph, units_per_em, decycler)? else {
            continue;
        };
        let Anchor::Offset { x, y } = component.anchor else {
            log::warn!(
                "glyph {glyph_id}: component {} is placed by point matching, no geometry",
                component.glyph
            );
            return Ok(None);
        };
        let transform = ComponentTransform::new(&component.transform, x, y, units_per_em);
        contours.extend(child.into_iter().map(|contour| {
            contour
                .into_iter()
                .map(|segment| segment.map_points(|point| transform.apply(point)))
                .collect::<Vec<_>>()
        }));
    }
    Ok(Some(contours))
}

/// A component transform acting on em space points with y down.
///
/// The matrix terms apply to em coordinates as they are: `yx` carries y
/// into x and `xy` carries x into y. Only the offset is flipped.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ComponentTransform {
    xx: f64,
    yx: f64,
    xy: f64,
    yy: f64,
    dx: f64,
    dy: f64,
}

impl ComponentTransform {
    fn new(transform: &Transform, x: i16, y: i16, units_per_em: f64) -> Self {
        Self {
            xx: transform.xx.to_f64(),
            yx: transform.yx.to_f64(),
            xy: transform.xy.to_f64(),
            yy: transform.yy.to_f64(),
            dx: x as f64 / units_per_em,
            dy: -(y as f64) / units_per_em,
        }
    }

    fn apply(&self, point: Point<f64>) -> Point<f64> {
        let Point { x, y } = point;
        Point::new(
            x * self.xx + y * self.yx + self.dx,
            y * self.yy + x * self.xy + self.dy,
        )
    }
}

#[cfg(test)]
mod tests {
    use glyphex_read::types::F2Dot14;

    use super::*;

    #[test]
    fn all_on_curve_points_make_lines() {
        let points = [
            CurvePoint::on_curve(0, 0),
            CurvePoint::on_curve(0, 100),
            CurvePoint::on_curve(100, 0),
        ];
        let segments = contour_segments(&points, 100.0);
        assert_eq!(segments.len(), 3);
        assert_eq!(
            segments[0],
            Segment::Line {
                p1: Point::new(0.0, 0.0),
                p2: Point::new(0.0, -1.0)
            }
        );
        // the contour wraps around
        assert_eq!(segments[2].end(), Point::new(0.0, 0.0));
    }

    #[test]
    fn implied_on_curve_points() {
        let points = [
            CurvePoint::on_curve(0, 0),
            CurvePoint::off_curve(100, 0),
            CurvePoint::off_curve(100, 100),
        ];
        let segments = contour_segments(&points, 100.0);
        assert_eq!(
            segments,
            [
                Segment::QuadraticBezier {
                    p1: Point::new(0.0, 0.0),
                    control: Point::new(1.0, 0.0),
                    p2: Point::new(1.0, -0.5),
                },
                Segment::QuadraticBezier {
                    p1: Point::new(1.0, -0.5),
                    control: Point::new(1.0, -1.0),
                    p2: Point::new(0.0, 0.0),
                },
            ]
        );
    }

    #[test]
    fn skew_terms() {
        // the second value in the file carries y into x
        let transform = Transform {
            yx: F2Dot14::from_f32(0.5),
            ..Default::default()
        };
        let transform = ComponentTransform::new(&transform, 0, 0, 100.0);
        assert_eq!(
            transform.apply(Point::new(0.0, 1.0)),
            Point::new(0.5, 1.0)
        );
        assert_eq!(
            transform.apply(Point::new(1.0, 0.0)),
            Point::new(1.0, 0.0)
        );
        // and the third carries x into y
        let transform = Transform {
            xy: F2Dot14::from_f32(-0.5),
            ..Default::default()
        };
        let transform = ComponentTransform::new(&transform, 0, 0, 100.0);
        assert_eq!(
            transform.apply(Point::new(1.0, 0.0)),
            Point::new(1.0, -0.5)
        );
    }

    #[test]
    fn transform_uses_unmodified_coordinates() {
        let transform = Transform {
            xx: F2Dot14::ONE,
            yx: F2Dot14::from_f32(0.5),
            xy: F2Dot14::from_f32(0.25),
            yy: F2Dot14::ONE,
        };
        let transform = ComponentTransform::new(&transform, 100, 0, 100.0);
        // y is computed from the incoming x, not the transformed one
        assert_eq!(
            transform.apply(Point::new(1.0, 1.0)),
            Point::new(2.5, 1.25)
        );
    }

    #[test]
    fn identity_offset() {
        let transform = ComponentTransform::new(&Transform::default(), 50, -100, 1000.0);
        let point = transform.apply(Point::new(0.1, -0.4));
        assert!((point.x - 0.15).abs() < 1e-12);
        assert!((point.y - -0.3).abs() < 1e-12);
    }
}
