//! Glyph Identifiers
//!
//! Glyph ids are stored as u16 in every table we read, but they index a
//! distinct space so they get their own type.

/// A 16-bit glyph identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphId(u16);

impl GlyphId {
    /// The identifier reserved for unknown glyphs.
    pub const NOTDEF: GlyphId = GlyphId(0);

    /// Construct a new `GlyphId`.
    pub const fn new(raw: u16) -> Self {
        GlyphId(raw)
    }

    /// The identifier as a u16.
    pub const fn to_u16(self) -> u16 {
        self.0
    }

    /// The identifier as a usize, suitable for indexing per-glyph arrays.
    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u16> for GlyphId {
    fn from(value: u16) -> Self {
        GlyphId(value)
    }
}

impl From<GlyphId> for u32 {
    fn from(value: GlyphId) -> Self {
        value.0 as u32
    }
}

impl std::fmt::Display for GlyphId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GID_{}", self.0)
    }
}

crate::newtype_scalar!(GlyphId, [u8; 2]);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scalar;

    #[test]
    fn display_and_read() {
        let gid = GlyphId::read(&[0x01, 0x02]).unwrap();
        assert_eq!(gid.to_u16(), 0x0102);
        assert_eq!(gid.to_string(), "GID_258");
        assert_eq!(GlyphId::default(), GlyphId::NOTDEF);
    }
}
