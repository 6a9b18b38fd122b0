//! The [name (Naming)](https://docs.microsoft.com/en-us/typography/opentype/spec/name) table

use types::Tag;

use crate::{FontData, FontRead, ReadError, TopLevelTable};

pub use types::NameId;

/// The naming table.
#[derive(Clone, Debug)]
pub struct Name<'a> {
    pub format: u16,
    records: Vec<NameRecord>,
    lang_tag_records: Vec<LangTagRecord>,
    storage: FontData<'a>,
}

/// An entry in the name table's record list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: NameId,
    /// Length of the string, in bytes.
    pub length: u16,
    /// Offset of the string from the start of string storage.
    pub string_offset: u16,
}

/// A language tag record, present in format 1 tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LangTagRecord {
    pub length: u16,
    pub lang_tag_offset: u16,
}

impl TopLevelTable for Name<'_> {
    const TAG: Tag = Tag::new(b"name");
}

impl<'a> FontRead<'a> for Name<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let format = cursor.read_u16()?;
        let count = cursor.read_u16()?;
        let storage_offset = cursor.read_u16()?;
        let records = (0..count)
            .map(|_| {
                Ok(NameRecord {
                    platform_id: cursor.read()?,
                    encoding_id: cursor.read()?,
                    language_id: cursor.read()?,
                    name_id: cursor.read()?,
                    length: cursor.read()?,
                    string_offset: cursor.read()?,
                })
            })
            .collect::<Result<Vec<_>, ReadError>>()?;
        let lang_tag_records = if format == 1 {
            let lang_tag_count = cursor.read_u16()?;
            (0..lang_tag_count)
                .map(|_| {
                    Ok(LangTagRecord {
                        length: cursor.read()?,
                        lang_tag_offset: cursor.read()?,
                    })
                })
                .collect::<Result<Vec<_>, ReadError>>()?
        } else {
            Vec::new()
        };
        let storage = data
            .split_off(storage_offset as usize)
            .ok_or(ReadError::OutOfBounds)?;
        Ok(Name {
            format,
            records,
            lang_tag_records,
            storage,
        })
    }
}

impl<'a> Name<'a> {
    pub fn name_record(&self) -> &[NameRecord] {
        &self.records
    }

    pub fn lang_tag_record(&self) -> &[LangTagRecord] {
        &self.lang_tag_records
    }

    /// The FontData containing the encoded name strings.
    pub fn string_data(&self) -> FontData<'a> {
        self.storage
    }

    /// The most suitable decodable string for this id.
    ///
    /// Only Unicode and Windows Unicode BMP records are considered. The first
    /// such record with language id 0 wins; otherwise the last one found.
    pub fn find(&self, name_id: NameId) -> Option<NameString<'a>> {
        let mut found = None;
        for record in self
            .records
            .iter()
            .filter(|rec| rec.name_id == name_id && rec.is_unicode())
        {
            let Ok(string) = record.string(self.storage) else {
                continue;
            };
            if record.language_id == 0 {
                return Some(string);
            }
            found = Some(string);
        }
        found
    }
}

impl NameRecord {
    /// Return a type that can decode the string data for this name entry.
    pub fn string<'a>(&self, data: FontData<'a>) -> Result<NameString<'a>, ReadError> {
        data.slice_len(self.string_offset as usize, self.length as usize)
            .map(|data| NameString {
                data: data.as_bytes(),
            })
    }

    /// `true` for records whose strings we decode as UTF-16BE.
    pub fn is_unicode(&self) -> bool {
        self.platform_id == 0 || (self.platform_id == 3 && self.encoding_id == 1)
    }
}

impl LangTagRecord {
    /// Return a type that can decode the string data for this language tag.
    pub fn lang_tag<'a>(&self, data: FontData<'a>) -> Result<NameString<'a>, ReadError> {
        data.slice_len(self.lang_tag_offset as usize, self.length as usize)
            .map(|data| NameString {
                data: data.as_bytes(),
            })
    }
}

/// A UTF-16BE encoded entry in the naming table.
///
/// This provides an iterator over characters.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct NameString<'a> {
    data: &'a [u8],
}

impl<'a> NameString<'a> {
    /// An iterator over the `char`s in this name.
    pub fn chars(&self) -> CharIter<'a> {
        CharIter {
            data: self.data,
            pos: 0,
        }
    }
}

impl<'a> IntoIterator for NameString<'a> {
    type Item = char;
    type IntoIter = CharIter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.chars()
    }
}

impl std::fmt::Display for NameString<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for c in self.chars() {
            c.fmt(f)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for NameString<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "\"{self}\"")
    }
}

/// An iterator over the chars of a name record.
#[derive(Clone)]
pub struct CharIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl CharIter<'_> {
    fn bump_u16(&mut self) -> Option<u16> {
        let result = self
            .data
            .get(self.pos..self.pos + 2)
            .map(|x| u16::from_be_bytes([x[0], x[1]]))?;
        self.pos += 2;
        Some(result)
    }
}

impl Iterator for CharIter<'_> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        let rep = char::REPLACEMENT_CHARACTER;
        let c1 = self.bump_u16()? as u32;
        let raw_c = if (0xD800..0xDC00).contains(&c1) {
            let Some(c2) = self.bump_u16() else {
                return Some(rep);
            };
            ((c1 & 0x3FF) << 10) + (c2 as u32 & 0x3FF) + 0x10000
        } else {
            c1
        };
        Some(char::from_u32(raw_c).unwrap_or(rep))
    }
}
