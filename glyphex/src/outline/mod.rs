//! Resolved glyph outlines.
//!
//! A [`Geometry`] is the renderable form of a glyph: contours of line and
//! quadratic segments in em units, with the y axis pointing down. It is
//! produced by [`Font::glyph_geometry`](crate::Font::glyph_geometry), which
//! composes composite glyphs and optionally flattens curves.

mod resolve;
mod simplify;

pub(crate) use resolve::resolve;

use glyphex_read::types::{BoundingBox, Point};

/// One piece of a contour, in em units with y down.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Segment {
    Line {
        p1: Point<f64>,
        p2: Point<f64>,
    },
    QuadraticBezier {
        p1: Point<f64>,
        control: Point<f64>,
        p2: Point<f64>,
    },
}

impl Segment {
    /// The point where the segment begins.
    pub fn start(&self) -> Point<f64> {
        match self {
            Segment::Line { p1, .. } | Segment::QuadraticBezier { p1, .. } => *p1,
        }
    }

    /// The point where the segment ends.
    pub fn end(&self) -> Point<f64> {
        match self {
            Segment::Line { p2, .. } | Segment::QuadraticBezier { p2, .. } => *p2,
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Segment::Line { .. })
    }

    /// All defining points, including the control point of a curve.
    pub fn points(&self) -> impl Iterator<Item = Point<f64>> {
        let (first, control, last) = match *self {
            Segment::Line { p1, p2 } => (p1, None, p2),
            Segment::QuadraticBezier { p1, control, p2 } => (p1, Some(control), p2),
        };
        std::iter::once(first).chain(control).chain(std::iter::once(last))
    }

    /// Returns a segment of the same kind with every point passed through `f`.
    pub fn map_points(self, mut f: impl FnMut(Point<f64>) -> Point<f64>) -> Self {
        match self {
            Segment::Line { p1, p2 } => Segment::Line {
                p1: f(p1),
                p2: f(p2),
            },
            Segment::QuadraticBezier { p1, control, p2 } => Segment::QuadraticBezier {
                p1: f(p1),
                control: f(control),
                p2: f(p2),
            },
        }
    }

    /// The point at parameter `t` in `[0, 1]`.
    pub fn eval(&self, t: f64) -> Point<f64> {
        match *self {
            Segment::Line { p1, p2 } => p1.lerp(p2, t),
            Segment::QuadraticBezier { p1, control, p2 } => {
                let mt = 1.0 - t;
                p1 * (mt * mt) + control * (2.0 * mt * t) + p2 * (t * t)
            }
        }
    }
}

/// A resolved glyph outline.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    /// Contours in composition order.
    pub contours: Vec<Vec<Segment>>,
    /// Bounds over every segment point, control points included. All zero
    /// when there are no segments.
    pub bounds: BoundingBox<f64>,
    /// Horizontal advance, in em units.
    pub advance: f64,
}

impl Geometry {
    /// Create a geometry, computing the bounds from the contours.
    pub fn new(contours: Vec<Vec<Segment>>, advance: f64) -> Self {
        let mut bounds = BoundingBox::EMPTY;
        for point in contours.iter().flatten().flat_map(Segment::points) {
            bounds.include(point);
        }
        if bounds.is_empty() {
            bounds = BoundingBox::default();
        }
        Self {
            contours,
            bounds,
            advance,
        }
    }

    /// Iterate over the segments of all contours.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.contours.iter().flatten()
    }

    /// `true` if there are no segments at all.
    pub fn is_empty(&self) -> bool {
        self.segments().next().is_none()
    }

    /// `true` if every segment is a line.
    pub fn is_flat(&self) -> bool {
        self.segments().all(Segment::is_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point<f64> {
        Point::new(x, y)
    }

    #[test]
    fn bounds_include_control_points() {
        let geometry = Geometry::new(
            vec![vec![
                Segment::QuadraticBezier {
                    p1: pt(0.0, 0.0),
                    control: pt(0.5, -1.0),
                    p2: pt(1.0, 0.0),
                },
                Segment::Line {
                    p1: pt(1.0, 0.0),
                    p2: pt(0.0, 0.0),
                },
            ]],
            1.0,
        );
        assert_eq!(
            geometry.bounds,
            BoundingBox {
                x_min: 0.0,
                y_min: -1.0,
                x_max: 1.0,
                y_max: 0.0
            }
        );
        assert!(!geometry.is_flat());
    }

    #[test]
    fn empty_geometry() {
        let geometry = Geometry::new(vec![vec![]], 0.5);
        assert!(geometry.is_empty());
        assert!(geometry.is_flat());
        assert_eq!(geometry.bounds, BoundingBox::default());
    }

    #[test]
    fn quadratic_endpoints_are_exact() {
        let segment = Segment::QuadraticBezier {
            p1: pt(0.1, 0.7),
            control: pt(0.3, 0.3),
            p2: pt(0.9, 0.2),
        };
        assert_eq!(segment.eval(0.0), segment.start());
        assert_eq!(segment.eval(1.0), segment.end());
    }

    #[test]
    fn quadratic_matches_kurbo() {
        let segment = Segment::QuadraticBezier {
            p1: pt(0.0, 0.0),
            control: pt(0.25, -0.75),
            p2: pt(1.0, -0.5),
        };
        let quad = kurbo::QuadBez::new((0.0, 0.0), (0.25, -0.75), (1.0, -0.5));
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let ours = segment.eval(t);
            let theirs = kurbo::ParamCurve::eval(&quad, t);
            assert!((ours.x - theirs.x).abs() < 1e-12);
            assert!((ours.y - theirs.y).abs() < 1e-12);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialize_segment() {
        let segment = Segment::Line {
            p1: pt(0.0, 0.0),
            p2: pt(1.0, 0.5),
        };
        let json = serde_json::to_value(segment).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "line", "p1": {"x": 0.0, "y": 0.0}, "p2": {"x": 1.0, "y": 0.5}})
        );
    }
}
