//! Flattening quadratic curves into lines.

use super::{Geometry, Segment};

impl Geometry {
    /// Returns a copy with every quadratic segment replaced by `steps`
    /// lines between evenly spaced parameter values.
    ///
    /// Lines are kept as they are. The bounds are not recomputed; the
    /// flattened curve stays inside its control polygon, so they remain a
    /// superset. With `steps == 0` the geometry is returned unchanged.
    pub fn simplified(&self, steps: usize) -> Geometry {
        if steps == 0 {
            return self.clone();
        }
        let contours = self
            .contours
            .iter()
            .map(|contour| {
                contour
                    .iter()
                    .flat_map(|segment| flatten(segment, steps))
                    .collect()
            })
            .collect();
        Geometry {
            contours,
            bounds: self.bounds,
            advance: self.advance,
        }
    }
}

fn flatten(segment: &Segment, steps: usize) -> Vec<Segment> {
    if segment.is_line() {
        return vec![*segment];
    }
    (0..steps)
        .map(|i| Segment::Line {
            p1: segment.eval(i as f64 / steps as f64),
            p2: segment.eval((i + 1) as f64 / steps as f64),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use glyphex_read::types::Point;

    use super::*;

    fn curve() -> Segment {
        Segment::QuadraticBezier {
            p1: Point::new(0.0, 0.0),
            control: Point::new(0.5, -1.0),
            p2: Point::new(1.0, 0.0),
        }
    }

    #[test]
    fn n_lines_per_curve() {
        let line = Segment::Line {
            p1: Point::new(1.0, 0.0),
            p2: Point::new(0.0, 0.0),
        };
        let geometry = Geometry::new(vec![vec![curve(), line]], 1.0);
        let flat = geometry.simplified(8);
        assert_eq!(flat.contours[0].len(), 9);
        assert!(flat.is_flat());
        assert_eq!(flat.contours[0][0].start(), Point::new(0.0, 0.0));
        assert_eq!(flat.contours[0][7].end(), Point::new(1.0, 0.0));
        assert_eq!(flat.contours[0][8], line);
        assert_eq!(flat.bounds, geometry.bounds);
    }

    #[test]
    fn lines_are_connected() {
        let flat = Geometry::new(vec![vec![curve()]], 1.0).simplified(5);
        for pair in flat.contours[0].windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
        // the apex of a symmetric curve is at t = 0.5
        assert_eq!(flat.contours[0].len(), 5);
        let apex = curve().eval(0.5);
        assert_eq!(apex, Point::new(0.5, -0.5));
    }

    #[test]
    fn zero_steps_is_identity() {
        let geometry = Geometry::new(vec![vec![curve()]], 1.0);
        assert_eq!(geometry.simplified(0), geometry);
    }
}
