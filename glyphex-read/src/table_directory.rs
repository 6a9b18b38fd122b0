//! The [table directory] and [ttc header]
//!
//! [table directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
//! [ttc header]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#ttc-header

use types::Tag;

use crate::{FontData, FontRead, ReadError};

/// A single entry in the table directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableRecord {
    pub tag: Tag,
    /// Table checksum; not validated.
    pub checksum: u32,
    /// Offset from the start of the file.
    pub offset: u32,
    pub length: u32,
}

/// The tables this crate knows how to decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    Head,
    Maxp,
    Hhea,
    Hmtx,
    Loca,
    Name,
    Cmap,
    Glyf,
    Unknown,
}

impl TableKind {
    pub fn from_tag(tag: Tag) -> Self {
        match &tag.to_be_bytes() {
            b"head" => Self::Head,
            b"maxp" => Self::Maxp,
            b"hhea" => Self::Hhea,
            b"hmtx" => Self::Hmtx,
            b"loca" => Self::Loca,
            b"name" => Self::Name,
            b"cmap" => Self::Cmap,
            b"glyf" => Self::Glyf,
            _ => Self::Unknown,
        }
    }
}

/// Records for the known tables, by kind.
///
/// When a tag appears more than once the last record wins.
#[derive(Clone, Debug, Default)]
pub struct KnownTables {
    pub head: Option<TableRecord>,
    pub maxp: Option<TableRecord>,
    pub hhea: Option<TableRecord>,
    pub hmtx: Option<TableRecord>,
    pub loca: Option<TableRecord>,
    pub name: Option<TableRecord>,
    pub cmap: Option<TableRecord>,
    pub glyf: Option<TableRecord>,
}

impl KnownTables {
    fn slot(&mut self, kind: TableKind) -> Option<&mut Option<TableRecord>> {
        Some(match kind {
            TableKind::Head => &mut self.head,
            TableKind::Maxp => &mut self.maxp,
            TableKind::Hhea => &mut self.hhea,
            TableKind::Hmtx => &mut self.hmtx,
            TableKind::Loca => &mut self.loca,
            TableKind::Name => &mut self.name,
            TableKind::Cmap => &mut self.cmap,
            TableKind::Glyf => &mut self.glyf,
            TableKind::Unknown => return None,
        })
    }

    /// The record for a known kind.
    pub fn get(&self, kind: TableKind) -> Option<TableRecord> {
        match kind {
            TableKind::Head => self.head,
            TableKind::Maxp => self.maxp,
            TableKind::Hhea => self.hhea,
            TableKind::Hmtx => self.hmtx,
            TableKind::Loca => self.loca,
            TableKind::Name => self.name,
            TableKind::Cmap => self.cmap,
            TableKind::Glyf => self.glyf,
            TableKind::Unknown => None,
        }
    }
}

/// The sfnt offset table and its table records.
#[derive(Clone, Debug)]
pub struct TableDirectory {
    pub sfnt_version: u32,
    /// All records, in file order.
    pub records: Vec<TableRecord>,
    pub known: KnownTables,
}

impl<'a> FontRead<'a> for TableDirectory {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let sfnt_version = cursor.read_u32()?;
        let num_tables = cursor.read_u16()?;
        // searchRange, entrySelector, rangeShift
        cursor.advance_by(6);
        let mut known = KnownTables::default();
        let records = (0..num_tables)
            .map(|_| {
                let record = TableRecord {
                    tag: cursor.read()?,
                    checksum: cursor.read()?,
                    offset: cursor.read()?,
                    length: cursor.read()?,
                };
                if let Some(slot) = known.slot(TableKind::from_tag(record.tag)) {
                    *slot = Some(record);
                }
                Ok(record)
            })
            .collect::<Result<Vec<_>, ReadError>>()?;
        Ok(TableDirectory {
            sfnt_version,
            records,
            known,
        })
    }
}

impl TableDirectory {
    pub fn num_tables(&self) -> usize {
        self.records.len()
    }

    /// The record for the given tag.
    pub fn find(&self, tag: Tag) -> Option<TableRecord> {
        match TableKind::from_tag(tag) {
            TableKind::Unknown => self.records.iter().rev().find(|rec| rec.tag == tag).copied(),
            kind => self.known.get(kind),
        }
    }

    /// Records for tables that are not decoded, kept for pass-through.
    pub fn unknown(&self) -> impl Iterator<Item = &TableRecord> + '_ {
        self.records
            .iter()
            .filter(|rec| TableKind::from_tag(rec.tag) == TableKind::Unknown)
    }
}

/// The header of a TrueType collection file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectionHeader {
    pub ttc_tag: Tag,
    pub major_version: u16,
    pub minor_version: u16,
    /// Offset of each font's table directory from the start of the file.
    pub table_directory_offsets: Vec<u32>,
    /// The DSIG fields, present from version 2.0. Not validated.
    pub dsig: Option<DsigInfo>,
}

/// Location of the digital signature table of a collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DsigInfo {
    pub tag: Tag,
    pub length: u32,
    pub offset: u32,
}

impl<'a> FontRead<'a> for CollectionHeader {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let ttc_tag: Tag = cursor.read()?;
        let major_version = cursor.read_u16()?;
        let minor_version = cursor.read_u16()?;
        let num_fonts = cursor.read_u32()?;
        let table_directory_offsets = cursor
            .read_array::<u32>(num_fonts as usize)?
            .iter()
            .map(|offset| offset.get())
            .collect();
        let dsig = if major_version >= 2 {
            Some(DsigInfo {
                tag: cursor.read()?,
                length: cursor.read()?,
                offset: cursor.read()?,
            })
        } else {
            None
        };
        Ok(CollectionHeader {
            ttc_tag,
            major_version,
            minor_version,
            table_directory_offsets,
            dsig,
        })
    }
}

impl CollectionHeader {
    pub fn num_fonts(&self) -> u32 {
        self.table_directory_offsets.len() as u32
    }
}
