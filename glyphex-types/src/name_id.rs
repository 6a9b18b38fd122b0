//! Name Identifiers

use core::fmt;

/// Identifier for an informational string in the `name` table.
///
/// The identifiers read by glyph extraction are provided as associated
/// constants. Any other value is still representable.
///
/// For more detail, see <https://learn.microsoft.com/en-us/typography/opentype/spec/name#name-ids>
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct NameId(u16);

impl NameId {
    /// Copyright notice.
    pub const COPYRIGHT_NOTICE: Self = Self(0);
    /// Font family name.
    pub const FAMILY_NAME: Self = Self(1);
    /// Font subfamily name, such as "Bold Italic".
    pub const SUBFAMILY_NAME: Self = Self(2);
    /// Unique font identifier.
    pub const UNIQUE_ID: Self = Self(3);
    /// Full font name.
    pub const FULL_NAME: Self = Self(4);
    /// Version string.
    pub const VERSION_STRING: Self = Self(5);
    /// PostScript name for the font.
    pub const POSTSCRIPT_NAME: Self = Self(6);
    /// Trademark notice.
    pub const TRADEMARK: Self = Self(7);
    /// Manufacturer name.
    pub const MANUFACTURER: Self = Self(8);

    /// Create a new identifier from a raw u16 value.
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Return the identifier as a u16.
    pub const fn to_u16(self) -> u16 {
        self.0
    }

    /// The identifiers from copyright notice through manufacturer, in id order.
    pub fn standard() -> impl Iterator<Item = Self> + Clone {
        (0..=8).map(Self)
    }
}

impl From<u16> for NameId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Debug for NameId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Self::COPYRIGHT_NOTICE => "COPYRIGHT_NOTICE",
            Self::FAMILY_NAME => "FAMILY_NAME",
            Self::SUBFAMILY_NAME => "SUBFAMILY_NAME",
            Self::UNIQUE_ID => "UNIQUE_ID",
            Self::FULL_NAME => "FULL_NAME",
            Self::VERSION_STRING => "VERSION_STRING",
            Self::POSTSCRIPT_NAME => "POSTSCRIPT_NAME",
            Self::TRADEMARK => "TRADEMARK",
            Self::MANUFACTURER => "MANUFACTURER",
            _ => return write!(f, "{}", self.0),
        };
        f.write_str(name)
    }
}

impl fmt::Display for NameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

crate::newtype_scalar!(NameId, [u8; 2]);
