//! A grid of floating point samples tied to em space.

use std::fmt::{self, Write};

/// A width × height grid of samples with a mapping back to em space.
///
/// Samples start out as coverage in {0, 1} and are reinterpreted by later
/// operations as gray levels, signed distances or alpha. The pixel at
/// (`x_origin`, `y_origin`) corresponds to the em space origin and one em
/// spans `em_scale` pixels; every operation that changes the grid keeps
/// that mapping valid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RasterImage {
    width: usize,
    height: usize,
    pixels: Vec<f64>,
    em_scale: f64,
    x_origin: f64,
    y_origin: f64,
}

impl RasterImage {
    /// An image filled with zeros.
    pub fn new(width: usize, height: usize, em_scale: f64, x_origin: f64, y_origin: f64) -> Self {
        Self {
            width,
            height,
            pixels: vec![0.0; width * height],
            em_scale,
            x_origin,
            y_origin,
        }
    }

    /// A 0×0 image, used for glyphs without an outline.
    pub fn empty(em_scale: f64) -> Self {
        Self::new(0, 0, em_scale, 0.0, 0.0)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Samples in row major order.
    pub fn pixels(&self) -> &[f64] {
        &self.pixels
    }

    /// Pixels per em.
    pub fn em_scale(&self) -> f64 {
        self.em_scale
    }

    pub fn x_origin(&self) -> f64 {
        self.x_origin
    }

    pub fn y_origin(&self) -> f64 {
        self.y_origin
    }

    /// The pixel position of an em space point.
    pub fn em_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.em_scale + self.x_origin,
            y * self.em_scale + self.y_origin,
        )
    }

    fn index(&self, x: isize, y: isize) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|x| *x < self.width)?;
        let y = usize::try_from(y).ok().filter(|y| *y < self.height)?;
        Some(y * self.width + x)
    }

    /// The sample at (x, y), or zero outside the image.
    pub fn pixel(&self, x: isize, y: isize) -> f64 {
        self.index(x, y).map(|ix| self.pixels[ix]).unwrap_or(0.0)
    }

    /// Set the sample at (x, y); writes outside the image are ignored.
    pub fn set_pixel(&mut self, x: isize, y: isize, value: f64) {
        if let Some(ix) = self.index(x, y) {
            self.pixels[ix] = value;
        }
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [f64] {
        &mut self.pixels
    }

    /// A copy with `f` applied to each sample.
    pub fn map_pixels(&self, f: impl FnMut(f64) -> f64) -> Self {
        Self {
            pixels: self.pixels.iter().copied().map(f).collect(),
            ..*self
        }
    }

    /// 1 where the sample exceeds `cutoff`, 0 elsewhere.
    pub fn binarize(&self, cutoff: f64) -> Self {
        self.map_pixels(|value| if value > cutoff { 1.0 } else { 0.0 })
    }

    /// 1 where the sample lies in `min..=max`, 0 elsewhere.
    ///
    /// Applied to a signed distance field this leaves a ring around the
    /// outline.
    pub fn outline(&self, min: f64, max: f64) -> Self {
        self.map_pixels(|value| {
            if (min..=max).contains(&value) {
                1.0
            } else {
                0.0
            }
        })
    }

    /// Map [0, 1] samples to whole numbers in [0, 255].
    pub fn normalize_color_range(&self) -> Self {
        self.map_pixels(|value| (value.clamp(0.0, 1.0) * 255.0).floor())
    }

    /// Map signed distances in `range_min..range_max` to [0, 1], with
    /// `range_min` at 1.
    pub fn normalize_signed_distance(&self, range_min: f64, range_max: f64) -> Self {
        let range = range_max - range_min;
        self.map_pixels(|value| 1.0 - (value - range_min) / range)
    }

    /// Average each `factor` × `factor` block, then apply `1 / gamma`.
    ///
    /// Trailing rows and columns that do not fill a block are dropped.
    pub fn downsampled(&self, factor: usize, gamma: f64) -> Self {
        let factor = factor.max(1);
        let width = self.width / factor;
        let height = self.height / factor;
        let scale = factor as f64;
        let block_area = scale * scale;
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let sum: f64 = (y * factor..(y + 1) * factor)
                    .flat_map(|row| {
                        let start = row * self.width + x * factor;
                        &self.pixels[start..start + factor]
                    })
                    .sum();
                pixels.push((sum / block_area).powf(1.0 / gamma));
            }
        }
        Self {
            width,
            height,
            pixels,
            em_scale: self.em_scale / scale,
            x_origin: self.x_origin / scale,
            y_origin: self.y_origin / scale,
        }
    }

    /// A copy with `border` zero pixels added on every side.
    pub fn with_border(&self, border: usize) -> Self {
        let offset = border as isize;
        let mut result = Self::new(
            self.width + 2 * border,
            self.height + 2 * border,
            self.em_scale,
            self.x_origin + border as f64,
            self.y_origin + border as f64,
        );
        for y in 0..self.height as isize {
            for x in 0..self.width as isize {
                result.set_pixel(x + offset, y + offset, self.pixel(x, y));
            }
        }
        result
    }

    /// The `width` × `height` region whose top left corner is (x, y).
    ///
    /// Parts of the region outside this image are zero.
    pub fn crop(&self, width: usize, height: usize, x: usize, y: usize) -> Self {
        let mut result = Self::new(
            width,
            height,
            self.em_scale,
            self.x_origin - x as f64,
            self.y_origin - y as f64,
        );
        let (x, y) = (x as isize, y as isize);
        for row in 0..height as isize {
            for col in 0..width as isize {
                result.set_pixel(col, row, self.pixel(x + col, y + row));
            }
        }
        result
    }

    /// Crop to the smallest region holding every nonzero sample.
    ///
    /// An image with no nonzero sample crops to 0×0.
    pub fn cropped(&self) -> Self {
        let nonzero_row = |y: usize| (0..self.width).any(|x| self.pixels[y * self.width + x] != 0.0);
        let nonzero_col = |x: usize| (0..self.height).any(|y| self.pixels[y * self.width + x] != 0.0);
        let Some(top) = (0..self.height).find(|y| nonzero_row(*y)) else {
            return self.crop(0, 0, 0, 0);
        };
        let bottom = (top..self.height).rev().find(|y| nonzero_row(*y)).unwrap_or(top);
        let left = (0..self.width).find(|x| nonzero_col(*x)).unwrap_or(0);
        let right = (left..self.width).rev().find(|x| nonzero_col(*x)).unwrap_or(left);
        self.crop(right - left + 1, bottom - top + 1, left, top)
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        // chunks panics on a zero size
        self.pixels.chunks(self.width.max(1))
    }
}

/// A text preview using shade characters, one line per row.
impl fmt::Display for RasterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (ix, row) in self.rows().enumerate() {
            if ix > 0 {
                f.write_char('\n')?;
            }
            for value in row {
                f.write_char(match *value {
                    v if v > 0.8 => '█',
                    v if v > 0.6 => '▓',
                    v if v > 0.4 => '▒',
                    v if v > 0.2 => '░',
                    _ => ' ',
                })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_from_rows(rows: &[&[f64]]) -> RasterImage {
        let mut image = RasterImage::new(rows[0].len(), rows.len(), 10.0, 2.0, 3.0);
        for (y, row) in rows.iter().enumerate() {
            for (x, value) in row.iter().enumerate() {
                image.set_pixel(x as isize, y as isize, *value);
            }
        }
        image
    }

    #[test]
    fn out_of_range_access() {
        let mut image = RasterImage::new(2, 2, 1.0, 0.0, 0.0);
        image.set_pixel(-1, 0, 1.0);
        image.set_pixel(2, 1, 1.0);
        image.set_pixel(1, 1, 0.5);
        assert_eq!(image.pixels(), [0.0, 0.0, 0.0, 0.5]);
        assert_eq!(image.pixel(1, 1), 0.5);
        assert_eq!(image.pixel(1, -1), 0.0);
        assert_eq!(image.pixel(5, 5), 0.0);
    }

    #[test]
    fn pixel_ops() {
        let image = image_from_rows(&[&[-0.5, 0.2, 0.5, 0.7, 1.2]]);
        assert_eq!(image.binarize(0.5).pixels(), [0.0, 0.0, 0.0, 1.0, 1.0]);
        assert_eq!(image.outline(0.2, 0.7).pixels(), [0.0, 1.0, 1.0, 1.0, 0.0]);
        assert_eq!(
            image.normalize_color_range().pixels(),
            [0.0, 51.0, 127.0, 178.0, 255.0]
        );
        let distances = image_from_rows(&[&[-2.0, 0.0, 2.0]]);
        assert_eq!(
            distances.normalize_signed_distance(-2.0, 2.0).pixels(),
            [1.0, 0.5, 0.0]
        );
        // the em mapping is unchanged
        assert_eq!(image.binarize(0.5).x_origin(), 2.0);
    }

    #[test]
    fn downsample_averages_blocks() {
        let image = image_from_rows(&[
            &[1.0, 1.0, 0.0, 0.0, 1.0],
            &[1.0, 1.0, 1.0, 0.0, 1.0],
            &[0.0, 0.0, 0.0, 0.0, 1.0],
        ]);
        let small = image.downsampled(2, 1.0);
        assert_eq!((small.width(), small.height()), (2, 1));
        assert_eq!(small.pixels(), [1.0, 0.25]);
        assert_eq!(small.em_scale(), 5.0);
        assert_eq!((small.x_origin(), small.y_origin()), (1.0, 1.5));
        let corrected = image.downsampled(2, 2.0);
        assert_eq!(corrected.pixels(), [1.0, 0.5]);
    }

    #[test]
    fn border_shifts_origin() {
        let image = image_from_rows(&[&[1.0, 0.5]]);
        let bordered = image.with_border(2);
        assert_eq!((bordered.width(), bordered.height()), (6, 5));
        assert_eq!((bordered.x_origin(), bordered.y_origin()), (4.0, 5.0));
        assert_eq!(bordered.pixel(2, 2), 1.0);
        assert_eq!(bordered.pixel(3, 2), 0.5);
        assert_eq!(bordered.pixels().iter().sum::<f64>(), 1.5);
        // an em space point maps to the same sample before and after
        let (x, y) = image.em_to_pixel(-0.2, -0.3);
        let (bx, by) = bordered.em_to_pixel(-0.2, -0.3);
        assert_eq!(image.pixel(x as isize, y as isize), 1.0);
        assert_eq!(bordered.pixel(bx as isize, by as isize), 1.0);
    }

    #[test]
    fn crop_keeps_em_mapping() {
        let image = image_from_rows(&[
            &[0.0, 0.0, 0.0, 0.0],
            &[0.0, 0.0, 0.3, 0.0],
            &[0.0, 0.9, 0.0, 0.0],
        ]);
        let cropped = image.crop(3, 3, 1, 1);
        assert_eq!(cropped.pixel(1, 0), 0.3);
        assert_eq!(cropped.pixel(0, 1), 0.9);
        // past the source image
        assert_eq!(cropped.pixel(2, 2), 0.0);
        assert_eq!((cropped.x_origin(), cropped.y_origin()), (1.0, 2.0));
        assert_eq!(
            image.em_to_pixel(0.0, 0.0),
            (cropped.x_origin() + 1.0, cropped.y_origin() + 1.0)
        );
    }

    #[test]
    fn cropped_to_content() {
        let image = image_from_rows(&[
            &[0.0, 0.0, 0.0, 0.0],
            &[0.0, 0.0, 0.3, 0.0],
            &[0.0, 0.9, 0.0, 0.0],
            &[0.0, 0.0, 0.0, 0.0],
        ]);
        let cropped = image.cropped();
        assert_eq!((cropped.width(), cropped.height()), (2, 2));
        assert_eq!(cropped.pixels(), [0.0, 0.3, 0.9, 0.0]);
        assert_eq!((cropped.x_origin(), cropped.y_origin()), (1.0, 2.0));
    }

    #[test]
    fn cropped_blank_image() {
        let image = RasterImage::new(5, 5, 1.0, 2.0, 2.0);
        let cropped = image.cropped();
        assert!(cropped.is_empty());
        assert_eq!((cropped.width(), cropped.height()), (0, 0));
    }

    #[test]
    fn shade_preview() {
        let image = image_from_rows(&[&[1.0, 0.7, 0.5], &[0.3, 0.1, 0.0]]);
        assert_eq!(image.to_string(), "█▓▒\n░  ");
        assert_eq!(RasterImage::empty(1.0).to_string(), "");
    }
}
