//! Informational strings from the `name` table.

use glyphex_read::{tables::name::Name, types::NameId};

/// The standard informational strings of a font.
///
/// Each is taken from a Unicode or Windows Unicode BMP record, preferring
/// one with language id 0 and otherwise the last matching record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontNames {
    pub copyright: Option<String>,
    pub family: Option<String>,
    pub subfamily: Option<String>,
    pub unique_identifier: Option<String>,
    pub full_name: Option<String>,
    pub version: Option<String>,
    pub postscript_name: Option<String>,
    pub trademark: Option<String>,
    pub manufacturer: Option<String>,
}

impl FontNames {
    pub fn new(name: &Name) -> Self {
        let find = |id| name.find(id).map(|string| string.to_string());
        Self {
            copyright: find(NameId::COPYRIGHT_NOTICE),
            family: find(NameId::FAMILY_NAME),
            subfamily: find(NameId::SUBFAMILY_NAME),
            unique_identifier: find(NameId::UNIQUE_ID),
            full_name: find(NameId::FULL_NAME),
            version: find(NameId::VERSION_STRING),
            postscript_name: find(NameId::POSTSCRIPT_NAME),
            trademark: find(NameId::TRADEMARK),
            manufacturer: find(NameId::MANUFACTURER),
        }
    }

    /// The string for one of the standard name ids, 0 through 8.
    pub fn get(&self, id: NameId) -> Option<&str> {
        let string = match id {
            NameId::COPYRIGHT_NOTICE => &self.copyright,
            NameId::FAMILY_NAME => &self.family,
            NameId::SUBFAMILY_NAME => &self.subfamily,
            NameId::UNIQUE_ID => &self.unique_identifier,
            NameId::FULL_NAME => &self.full_name,
            NameId::VERSION_STRING => &self.version,
            NameId::POSTSCRIPT_NAME => &self.postscript_name,
            NameId::TRADEMARK => &self.trademark,
            NameId::MANUFACTURER => &self.manufacturer,
            _ => return None,
        };
        string.as_deref()
    }
}
