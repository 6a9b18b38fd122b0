//! fixed-point numerical types

/// 16-bit signed fixed point number with 14 bits of fraction.
///
/// Used for the scale factors of composite glyph components.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct F2Dot14(i16);

impl F2Dot14 {
    /// Minimum value (-2.0).
    pub const MIN: Self = Self(i16::MIN);
    /// Maximum value (just under 2.0).
    pub const MAX: Self = Self(i16::MAX);
    /// The value 1.0.
    pub const ONE: Self = Self(1 << Self::FRACT_BITS);
    /// The value 0.0.
    pub const ZERO: Self = Self(0);

    const FRACT_BITS: u32 = 14;
    const SCALE: f64 = (1 << Self::FRACT_BITS) as f64;

    /// Creates a new value from the raw two's complement bits.
    pub const fn from_bits(bits: i16) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    pub const fn to_bits(self) -> i16 {
        self.0
    }

    /// Creates the closest representable value, saturating at the bounds.
    pub fn from_f32(value: f32) -> Self {
        let bits = (value as f64 * Self::SCALE).round();
        Self(bits.clamp(i16::MIN as f64, i16::MAX as f64) as i16)
    }

    /// Returns the value as an `f32`.
    pub fn to_f32(self) -> f32 {
        self.to_f64() as f32
    }

    /// Returns the value as an `f64`.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE
    }
}

impl std::fmt::Debug for F2Dot14 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

impl std::fmt::Display for F2Dot14 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.to_f64(), f)
    }
}

crate::newtype_scalar!(F2Dot14, [u8; 2]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scalar;

    #[test]
    fn decode_reference_values() {
        // values from the OpenType data types table
        let cases = [
            (0x7fff_u16, 1.999939),
            (0x7000, 1.75),
            (0x0001, 0.000061),
            (0x0000, 0.0),
            (0xffff, -0.000061),
            (0x8000, -2.0),
            (0x4000, 1.0),
            (0xc000, -1.0),
        ];
        for (raw, expected) in cases {
            let value = F2Dot14::read(&raw.to_be_bytes()).unwrap();
            assert!(
                (value.to_f64() - expected).abs() < 1e-6,
                "{raw:#06x}: {} != {expected}",
                value.to_f64()
            );
        }
    }

    #[test]
    fn from_float_saturates() {
        assert_eq!(F2Dot14::from_f32(1.0), F2Dot14::ONE);
        assert_eq!(F2Dot14::from_f32(5.0), F2Dot14::MAX);
        assert_eq!(F2Dot14::from_f32(-5.0), F2Dot14::MIN);
        assert_eq!(F2Dot14::from_f32(-0.5).to_bits(), -8192);
    }
}
