/// Minimum and maximum extents of a rectangular region.
///
/// The orientation of the y axis depends on context: glyph headers store
/// font units with y up, resolved geometry uses em units with y down.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox<T> {
    /// Minimum extent in the x direction.
    pub x_min: T,
    /// Minimum extent in the y direction.
    pub y_min: T,
    /// Maximum extent in the x direction.
    pub x_max: T,
    /// Maximum extent in the y direction.
    pub y_max: T,
}

impl BoundingBox<f64> {
    /// A box that contains nothing; including any point yields that point.
    pub const EMPTY: Self = Self {
        x_min: f64::INFINITY,
        y_min: f64::INFINITY,
        x_max: f64::NEG_INFINITY,
        y_max: f64::NEG_INFINITY,
    };

    /// Grow the box to contain `point`.
    pub fn include(&mut self, point: crate::Point<f64>) {
        self.x_min = self.x_min.min(point.x);
        self.y_min = self.y_min.min(point.y);
        self.x_max = self.x_max.max(point.x);
        self.y_max = self.y_max.max(point.y);
    }

    /// Returns true if no point has been included.
    pub fn is_empty(&self) -> bool {
        self.x_min > self.x_max || self.y_min > self.y_max
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}
