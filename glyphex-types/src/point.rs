use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Two dimensional point with a generic coordinate type.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Point<T> {
    /// X coordinate.
    pub x: T,
    /// Y coordinate.
    pub y: T,
}

impl<T> Point<T> {
    /// Creates a new point with the given x and y coordinates.
    #[inline(always)]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Maps `Point<T>` to `Point<U>` by applying a function to each coordinate.
    #[inline(always)]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Point<U> {
        Point {
            x: f(self.x),
            y: f(self.y),
        }
    }
}

impl Point<f64> {
    /// The point halfway between `self` and `other`.
    pub fn midpoint(self, other: Self) -> Self {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    /// Linear interpolation; `t == 0` gives `self`, `t == 1` gives `other`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }

    /// Squared euclidean distance from the origin.
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }
}

impl<T> Add for Point<T>
where
    T: Add<Output = T>,
{
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<T> AddAssign for Point<T>
where
    T: AddAssign,
{
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl<T> Sub for Point<T>
where
    T: Sub<Output = T>,
{
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl<T> SubAssign for Point<T>
where
    T: SubAssign,
{
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl<T> Mul<T> for Point<T>
where
    T: Mul<Output = T> + Copy,
{
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: T) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl<T> Neg for Point<T>
where
    T: Neg<Output = T>,
{
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Point;

    #[test]
    fn map() {
        assert_eq!(
            Point::new(3_i16, -4).map(|v| v as f64 / 2.0),
            Point::new(1.5, -2.0)
        );
    }

    #[test]
    fn arithmetic() {
        assert_eq!(Point::new(1, 2) + Point::new(3, 4), Point::new(4, 6));
        assert_eq!(Point::new(1, 2) - Point::new(3, 4), Point::new(-2, -2));
        assert_eq!(Point::new(1, 2) * 8, Point::new(8, 16));
        assert_eq!(-Point::new(1, -2), Point::new(-1, 2));
        let mut point = Point::new(1, 2);
        point += Point::new(3, 4);
        point -= Point::new(1, 1);
        assert_eq!(point, Point::new(3, 5));
    }

    #[test]
    fn interpolation() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(2.0, -4.0);
        assert_eq!(a.midpoint(b), Point::new(1.0, -2.0));
        assert_eq!(a.lerp(b, 0.25), Point::new(0.5, -1.0));
        assert_eq!(b.length_squared(), 20.0);
    }
}
