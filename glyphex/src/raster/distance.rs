//! Signed distance fields.
//!
//! Distances are measured between pixel positions, in pixels. A sample of
//! at least 0.5 is inside the glyph.

use glyphex_read::types::Point;

use super::RasterImage;

const INSIDE_THRESHOLD: f64 = 0.5;

const FORWARD_NEIGHBORS: [(isize, isize); 4] = [(-1, 0), (0, -1), (-1, -1), (1, -1)];
const BACKWARD_NEIGHBORS: [(isize, isize); 4] = [(1, 0), (0, 1), (-1, 1), (1, 1)];

impl RasterImage {
    /// The signed distance from each pixel to the nearest pixel of the
    /// other class: positive outside, negative inside.
    ///
    /// Computed with two sweeps over the image that propagate the offset to
    /// the nearest seed pixel between neighbors.
    pub fn signed_distance_field(&self) -> RasterImage {
        let to_inside = VectorField::new(self, |value| value >= INSIDE_THRESHOLD);
        let to_outside = VectorField::new(self, |value| value < INSIDE_THRESHOLD);
        let mut result = self.map_pixels(|_| 0.0);
        for (ix, pixel) in result.pixels_mut().iter_mut().enumerate() {
            let outside = to_inside.distance(ix);
            *pixel = if outside <= 0.0 {
                -to_outside.distance(ix)
            } else {
                outside
            };
        }
        result
    }

    /// The same field as [`signed_distance_field`](Self::signed_distance_field),
    /// found by searching growing square rings around every pixel.
    ///
    /// Pixels outside the image count as outside the glyph. This is slow and
    /// meant as a reference.
    pub fn signed_distance_field_brute_force(&self) -> RasterImage {
        let limit = self.width().max(self.height()) as isize;
        let mut result = self.map_pixels(|_| 0.0);
        for y in 0..self.height() as isize {
            for x in 0..self.width() as isize {
                let inside = self.pixel(x, y) >= INSIDE_THRESHOLD;
                let mut min_distance = f64::INFINITY;
                let mut radius = 1;
                while radius < limit && (radius as f64) < min_distance {
                    for (dx, dy) in ring(radius) {
                        let distance_squared = (dx * dx + dy * dy) as f64;
                        if distance_squared >= min_distance * min_distance {
                            continue;
                        }
                        if (self.pixel(x + dx, y + dy) >= INSIDE_THRESHOLD) != inside {
                            min_distance = distance_squared.sqrt();
                        }
                    }
                    radius += 1;
                }
                result.set_pixel(x, y, if inside { -min_distance } else { min_distance });
            }
        }
        result
    }
}

/// The offsets on the boundary of the square with the given half size.
fn ring(radius: isize) -> impl Iterator<Item = (isize, isize)> {
    (-radius..=radius).flat_map(move |dy| {
        let step = if dy.abs() == radius { 1 } else { 2 * radius };
        (-radius..=radius)
            .step_by(step as usize)
            .map(move |dx| (dx, dy))
    })
}

/// For each pixel, the offset to the nearest seed pixel.
struct VectorField {
    width: usize,
    height: usize,
    vectors: Vec<Point<f64>>,
}

impl VectorField {
    fn new(image: &RasterImage, is_seed: impl Fn(f64) -> bool) -> Self {
        let far = Point::new(f64::INFINITY, f64::INFINITY);
        let vectors = image
            .pixels()
            .iter()
            .map(|value| if is_seed(*value) { Point::default() } else { far })
            .collect();
        let mut field = Self {
            width: image.width(),
            height: image.height(),
            vectors,
        };
        field.propagate();
        field
    }

    fn distance(&self, ix: usize) -> f64 {
        self.vectors[ix].length_squared().sqrt()
    }

    fn propagate(&mut self) {
        let (width, height) = (self.width as isize, self.height as isize);
        for y in 0..height {
            for x in 0..width {
                for offset in FORWARD_NEIGHBORS {
                    self.relax(x, y, offset);
                }
            }
            for x in (0..width).rev() {
                self.relax(x, y, (1, 0));
            }
        }
        for y in (0..height).rev() {
            for x in (0..width).rev() {
                for offset in BACKWARD_NEIGHBORS {
                    self.relax(x, y, offset);
                }
            }
            for x in 0..width {
                self.relax(x, y, (-1, 0));
            }
        }
    }

    /// Take the neighbor's nearest seed if it is closer than ours.
    fn relax(&mut self, x: isize, y: isize, (dx, dy): (isize, isize)) {
        let (nx, ny) = (x + dx, y + dy);
        if nx < 0 || ny < 0 || nx >= self.width as isize || ny >= self.height as isize {
            return;
        }
        let ix = y as usize * self.width + x as usize;
        let neighbor = self.vectors[ny as usize * self.width + nx as usize];
        let candidate = neighbor + Point::new(dx as f64, dy as f64);
        if candidate.length_squared() < self.vectors[ix].length_squared() {
            self.vectors[ix] = candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_rect(
        width: usize,
        height: usize,
        (x0, y0): (isize, isize),
        (x1, y1): (isize, isize),
    ) -> RasterImage {
        let mut image = RasterImage::new(width, height, 1.0, 0.0, 0.0);
        for y in y0..y1 {
            for x in x0..x1 {
                image.set_pixel(x, y, 1.0);
            }
        }
        image
    }

    #[test]
    fn ring_offsets() {
        let mut offsets: Vec<_> = ring(1).collect();
        offsets.sort();
        assert_eq!(
            offsets,
            [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)]
        );
        assert_eq!(ring(3).count(), 24);
        assert!(ring(3).all(|(dx, dy)| dx.abs() == 3 || dy.abs() == 3));
    }

    #[test]
    fn square_center_is_half_the_side() {
        let image = filled_rect(21, 21, (5, 5), (16, 16));
        let field = image.signed_distance_field();
        // an 11 pixel square; the nearest outside pixel is 6 away
        assert_eq!(field.pixel(10, 10), -6.0);
        assert!((field.pixel(10, 10) + 11.0 / 2.0).abs() <= 1.0);
        // edges
        assert_eq!(field.pixel(5, 10), -1.0);
        assert_eq!(field.pixel(4, 10), 1.0);
        // diagonal from a corner
        assert_eq!(field.pixel(2, 2), (18.0f64).sqrt());
    }

    fn assert_close(a: &RasterImage, b: &RasterImage, tolerance: f64) {
        assert_eq!((a.width(), a.height()), (b.width(), b.height()));
        for (a, b) in a.pixels().iter().zip(b.pixels()) {
            assert!((a - b).abs() <= tolerance, "{a} != {b}");
        }
    }

    #[test]
    fn two_pass_matches_brute_force() {
        let image = filled_rect(24, 20, (3, 4), (19, 15));
        assert_close(
            &image.signed_distance_field(),
            &image.signed_distance_field_brute_force(),
            1e-9,
        );
    }

    #[test]
    fn two_pass_with_hole() {
        let mut image = filled_rect(24, 20, (3, 4), (19, 15));
        for y in 8..11 {
            for x in 7..14 {
                image.set_pixel(x, y, 0.0);
            }
        }
        let field = image.signed_distance_field();
        assert_close(&field, &image.signed_distance_field_brute_force(), 0.5);
        assert_eq!(field.pixel(10, 8), 1.0);
        assert_eq!(field.pixel(10, 11), -1.0);
    }

    #[test]
    fn no_inside_pixels() {
        let image = RasterImage::new(3, 2, 1.0, 0.0, 0.0);
        let field = image.signed_distance_field();
        assert!(field.pixels().iter().all(|d| *d == f64::INFINITY));
    }

    #[test]
    fn keeps_em_mapping() {
        let image = filled_rect(4, 4, (1, 1), (3, 3)).with_border(2);
        let field = image.signed_distance_field();
        assert_eq!(field.width(), image.width());
        assert_eq!((field.x_origin(), field.y_origin()), (2.0, 2.0));
    }
}
