//! The [cmap](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap) table

use std::ops::Range;

use types::{BigEndian, GlyphId, Tag};

use crate::{FontData, FontRead, ReadError, TopLevelTable};

/// The highest valid Unicode scalar value; format 12 groups are clamped to it.
const MAX_CODEPOINT: u32 = 0x10FFFF;

/// The character to glyph index mapping table.
#[derive(Clone, Debug)]
pub struct Cmap<'a> {
    data: FontData<'a>,
    pub version: u16,
    encoding_records: Vec<EncodingRecord>,
}

/// An entry in the cmap subtable directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodingRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    /// Offset of the subtable from the start of the cmap table.
    pub subtable_offset: u32,
}

impl EncodingRecord {
    /// `true` for Unicode (platform 0) and Windows Unicode BMP or full
    /// repertoire (3, 1) and (3, 10) encodings.
    pub fn is_unicode(&self) -> bool {
        self.platform_id == 0
            || (self.platform_id == 3 && matches!(self.encoding_id, 1 | 10))
    }
}

/// A decoded cmap subtable.
#[derive(Clone, Debug)]
pub enum CmapSubtable<'a> {
    Format4(Cmap4<'a>),
    Format12(Cmap12<'a>),
    /// A subtable in a format we do not decode, holding that format.
    Unsupported(u16),
}

impl TopLevelTable for Cmap<'_> {
    const TAG: Tag = Tag::new(b"cmap");
}

impl<'a> FontRead<'a> for Cmap<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version = cursor.read_u16()?;
        let num_tables = cursor.read_u16()?;
        let encoding_records = (0..num_tables)
            .map(|_| {
                Ok(EncodingRecord {
                    platform_id: cursor.read()?,
                    encoding_id: cursor.read()?,
                    subtable_offset: cursor.read()?,
                })
            })
            .collect::<Result<Vec<_>, ReadError>>()?;
        Ok(Cmap {
            data,
            version,
            encoding_records,
        })
    }
}

impl<'a> Cmap<'a> {
    pub fn encoding_records(&self) -> &[EncodingRecord] {
        &self.encoding_records
    }

    /// Decode the subtable for the given record.
    pub fn subtable(&self, record: &EncodingRecord) -> Result<CmapSubtable<'a>, ReadError> {
        let data = self
            .data
            .split_off(record.subtable_offset as usize)
            .ok_or(ReadError::OutOfBounds)?;
        match data.read_at::<u16>(0)? {
            4 => Cmap4::read(data).map(CmapSubtable::Format4),
            12 => Cmap12::read(data).map(CmapSubtable::Format12),
            other => Ok(CmapSubtable::Unsupported(other)),
        }
    }
}

impl<'a> CmapSubtable<'a> {
    /// Returns an iterator over all (codepoint, glyph identifier) pairs
    /// in the subtable. Empty for unsupported formats.
    pub fn iter(&self) -> impl Iterator<Item = (u32, GlyphId)> + 'a {
        let (four, twelve) = match self {
            CmapSubtable::Format4(table) => (Some(table.iter()), None),
            CmapSubtable::Format12(table) => (None, Some(table.iter())),
            CmapSubtable::Unsupported(_) => (None, None),
        };
        four.into_iter().flatten().chain(twelve.into_iter().flatten())
    }
}

/// A [format 4](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values)
/// segmented mapping subtable.
#[derive(Clone, Debug)]
pub struct Cmap4<'a> {
    pub language: u16,
    end_code: &'a [BigEndian<u16>],
    start_code: &'a [BigEndian<u16>],
    id_delta: &'a [BigEndian<i16>],
    id_range_offsets: &'a [BigEndian<u16>],
    glyph_id_array: &'a [BigEndian<u16>],
}

impl<'a> FontRead<'a> for Cmap4<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _format = cursor.read_u16()?;
        let length = cursor.read_u16()? as usize;
        let language = cursor.read_u16()?;
        let seg_count = cursor.read_u16()? as usize / 2;
        // searchRange, entrySelector, rangeShift
        cursor.advance_by(6);
        let end_code = cursor.read_array(seg_count)?;
        let _reserved_pad = cursor.read_u16()?;
        let start_code = cursor.read_array(seg_count)?;
        let id_delta = cursor.read_array(seg_count)?;
        let id_range_offsets = cursor.read_array(seg_count)?;
        // some fonts have a bogus length; take whatever fits in both
        let array_end = length.min(data.len()).max(cursor.position());
        let glyph_id_len = (array_end - cursor.position()) / 2;
        let glyph_id_array = cursor.read_array(glyph_id_len)?;
        Ok(Cmap4 {
            language,
            end_code,
            start_code,
            id_delta,
            id_range_offsets,
            glyph_id_array,
        })
    }
}

impl<'a> Cmap4<'a> {
    pub fn seg_count(&self) -> usize {
        self.end_code.len()
    }

    /// Maps a codepoint to a nominal glyph identifier.
    ///
    /// Segments are searched in order and the first one containing the
    /// codepoint is used.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let codepoint = codepoint.into();
        if codepoint > 0xFFFF {
            return None;
        }
        let codepoint = codepoint as u16;
        let index = (0..self.seg_count()).find(|ix| {
            self.code_range(*ix)
                .is_some_and(|range| range.contains(&(codepoint as u32)))
        })?;
        let start_code = self.start_code.get(index)?.get();
        self.lookup_glyph_id(codepoint, index, start_code)
            .filter(|gid| *gid != GlyphId::NOTDEF)
    }

    /// Returns an iterator over all (codepoint, glyph identifier) pairs
    /// in the subtable.
    ///
    /// Codepoints covered by an earlier segment are not repeated, and
    /// codepoints mapped to glyph 0 are skipped.
    pub fn iter(&self) -> Cmap4Iter<'a> {
        Cmap4Iter::new(self.clone())
    }

    /// Does the final phase of glyph id lookup.
    ///
    /// Shared between Self::map and Cmap4Iter.
    fn lookup_glyph_id(&self, codepoint: u16, index: usize, start_code: u16) -> Option<GlyphId> {
        let delta = self.id_delta.get(index)?.get() as i32;
        let range_offset = self.id_range_offsets.get(index)?.get() as usize;
        if range_offset == 0 {
            return Some(GlyphId::new((codepoint as i32 + delta) as u16));
        }
        // the offset is relative to this segment's entry in idRangeOffsets,
        // which is immediately followed by the glyph id array
        let offset = (range_offset / 2 + codepoint.wrapping_sub(start_code) as usize)
            .checked_sub(self.id_range_offsets.len() - index)?;
        let gid = self.glyph_id_array.get(offset)?.get();
        (gid != 0).then_some(GlyphId::new((gid as i32 + delta) as u16))
    }

    /// Returns the [start_code, end_code] range at the given index.
    fn code_range(&self, index: usize) -> Option<Range<u32>> {
        // Extend to u32 to ensure we don't overflow on the end + 1 bound
        // below.
        let start = self.start_code.get(index)?.get() as u32;
        let end = self.end_code.get(index)?.get() as u32;
        // Use end + 1 here because the range in the table is inclusive
        Some(start..(end + 1).max(start))
    }
}

/// Iterator over all (codepoint, glyph identifier) pairs in
/// the subtable.
#[derive(Clone)]
pub struct Cmap4Iter<'a> {
    subtable: Cmap4<'a>,
    cur_range: Range<u32>,
    cur_start_code: u16,
    cur_range_ix: usize,
}

impl<'a> Cmap4Iter<'a> {
    fn new(subtable: Cmap4<'a>) -> Self {
        let cur_range = subtable.code_range(0).unwrap_or_default();
        let cur_start_code = cur_range.start as u16;
        Self {
            subtable,
            cur_range,
            cur_start_code,
            cur_range_ix: 0,
        }
    }

    /// `true` if an earlier segment already covers this codepoint.
    fn is_shadowed(&self, codepoint: u32) -> bool {
        (0..self.cur_range_ix).any(|ix| {
            self.subtable
                .code_range(ix)
                .is_some_and(|range| range.contains(&codepoint))
        })
    }
}

impl Iterator for Cmap4Iter<'_> {
    type Item = (u32, GlyphId);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(codepoint) = self.cur_range.next() {
                if self.is_shadowed(codepoint) {
                    continue;
                }
                let Some(glyph_id) = self.subtable.lookup_glyph_id(
                    codepoint as u16,
                    self.cur_range_ix,
                    self.cur_start_code,
                ) else {
                    continue;
                };
                // The table might explicitly map some codepoints to 0. Avoid
                // returning those here.
                if glyph_id == GlyphId::NOTDEF {
                    continue;
                }
                return Some((codepoint, glyph_id));
            } else {
                self.cur_range_ix += 1;
                self.cur_range = self.subtable.code_range(self.cur_range_ix)?;
                self.cur_start_code = self.cur_range.start as u16;
            }
        }
    }
}

/// A [format 12](https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-12-segmented-coverage)
/// segmented coverage subtable.
#[derive(Clone, Debug)]
pub struct Cmap12<'a> {
    pub language: u32,
    // (start char code, end char code, start glyph id) triples
    groups: &'a [BigEndian<u32>],
}

impl<'a> FontRead<'a> for Cmap12<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _format = cursor.read_u16()?;
        let _reserved = cursor.read_u16()?;
        let _length = cursor.read_u32()?;
        let language = cursor.read_u32()?;
        let num_groups = cursor.read_u32()? as usize;
        let groups = cursor.read_array(num_groups.saturating_mul(3))?;
        Ok(Cmap12 { language, groups })
    }
}

impl<'a> Cmap12<'a> {
    pub fn num_groups(&self) -> usize {
        self.groups.len() / 3
    }

    /// Maps a codepoint to a nominal glyph identifier.
    pub fn map_codepoint(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        let codepoint = codepoint.into();
        (0..self.num_groups())
            .filter_map(|ix| self.group(ix))
            .find(|(range, _)| range.contains(&codepoint))
            .and_then(|(range, start_glyph_id)| {
                self.lookup_glyph_id(codepoint, range.start, start_glyph_id)
            })
            .filter(|gid| *gid != GlyphId::NOTDEF)
    }

    /// Returns an iterator over all (codepoint, glyph identifier) pairs
    /// in the subtable.
    pub fn iter(&self) -> Cmap12Iter<'a> {
        Cmap12Iter::new(self.clone())
    }

    /// Does the final phase of glyph id lookup.
    ///
    /// Shared between Self::map and Cmap12Iter. Glyph identifiers that do
    /// not fit in 16 bits are unmapped.
    fn lookup_glyph_id(
        &self,
        codepoint: u32,
        start_char_code: u32,
        start_glyph_id: u32,
    ) -> Option<GlyphId> {
        start_glyph_id
            .checked_add(codepoint.wrapping_sub(start_char_code))
            .and_then(|id| u16::try_from(id).ok())
            .map(GlyphId::new)
    }

    /// Returns the codepoint range and start glyph id for the group
    /// at the given index.
    fn group(&self, index: usize) -> Option<(Range<u32>, u32)> {
        let start = self.groups.get(index * 3)?.get();
        let end = self.groups.get(index * 3 + 1)?.get().min(MAX_CODEPOINT);
        let start_glyph_id = self.groups.get(index * 3 + 2)?.get();
        // Use + 1 here because the group range is inclusive
        Some((start..(end + 1).max(start), start_glyph_id))
    }
}

/// Iterator over all (codepoint, glyph identifier) pairs in
/// the subtable.
#[derive(Clone)]
pub struct Cmap12Iter<'a> {
    subtable: Cmap12<'a>,
    cur_range: Range<u32>,
    cur_start_code: u32,
    cur_start_glyph_id: u32,
    cur_range_ix: usize,
}

impl<'a> Cmap12Iter<'a> {
    fn new(subtable: Cmap12<'a>) -> Self {
        let (cur_range, cur_start_glyph_id) = subtable.group(0).unwrap_or_default();
        let cur_start_code = cur_range.start;
        Self {
            subtable,
            cur_range,
            cur_start_code,
            cur_start_glyph_id,
            cur_range_ix: 0,
        }
    }
}

impl Iterator for Cmap12Iter<'_> {
    type Item = (u32, GlyphId);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(codepoint) = self.cur_range.next() {
                let glyph_id = self.subtable.lookup_glyph_id(
                    codepoint,
                    self.cur_start_code,
                    self.cur_start_glyph_id,
                );
                // The table might explicitly map some codepoints to 0, or
                // past the 16-bit glyph range. Avoid returning those here.
                match glyph_id {
                    Some(glyph_id) if glyph_id != GlyphId::NOTDEF => {
                        return Some((codepoint, glyph_id))
                    }
                    _ => continue,
                }
            } else {
                self.cur_range_ix += 1;
                (self.cur_range, self.cur_start_glyph_id) =
                    self.subtable.group(self.cur_range_ix)?;
                self.cur_start_code = self.cur_range.start;
            }
        }
    }
}
