//! Encoders for the tables a glyph extractor reads

use crate::{be_buffer, bebuffer::BeBuffer};

pub const HEAD_MAGIC_NUMBER: u32 = 0x5F0F3CF5;

/// A `head` table with the given units per em and `loca` format.
pub fn head(units_per_em: u16, long_loca: bool) -> Vec<u8> {
    head_with_loc_format(units_per_em, long_loca as i16)
}

/// A `head` table with an arbitrary (possibly invalid) `indexToLocFormat`.
pub fn head_with_loc_format(units_per_em: u16, index_to_loc_format: i16) -> Vec<u8> {
    be_buffer! {
        1u16, 0u16,           // version
        0x00010000u32,        // fontRevision
        0u32,                 // checksumAdjustment
        HEAD_MAGIC_NUMBER,
        0x000bu16,            // flags
        units_per_em,
        3_600_000_000i64,     // created
        3_700_000_000i64,     // modified
        0i16, -200i16, 600i16, 800i16, // bounds
        0u16,                 // macStyle
        8u16,                 // lowestRecPPEM
        2i16,                 // fontDirectionHint
        index_to_loc_format,
        0i16,                 // glyphDataFormat
    }
    .into_vec()
}

/// An `hhea` table.
pub fn hhea(ascender: i16, descender: i16, line_gap: i16, number_of_h_metrics: u16) -> Vec<u8> {
    be_buffer! {
        1u16, 0u16,
        ascender, descender, line_gap,
        700u16,               // advanceWidthMax
        0i16, 0i16,           // min left/right side bearing
        600i16,               // xMaxExtent
        1i16, 0i16, 0i16,     // caret slope rise, run, offset
        0i16, 0i16, 0i16, 0i16, // reserved
        0i16,                 // metricDataFormat
        number_of_h_metrics,
    }
    .into_vec()
}

/// A version 1.0 `maxp` table, as used with TrueType outlines.
pub fn maxp(num_glyphs: u16) -> Vec<u8> {
    BeBuffer::new()
        .push(0x00010000u32)
        .push(num_glyphs)
        .extend([64u16, 4, 128, 8, 2, 0, 0, 0, 0, 0, 0, 2, 2])
        .into_vec()
}

/// A version 0.5 `maxp` table, as used with CFF outlines.
pub fn maxp_v05(num_glyphs: u16) -> Vec<u8> {
    BeBuffer::new()
        .push(0x00005000u32)
        .push(num_glyphs)
        .into_vec()
}

/// An `hmtx` table from (advance, left side bearing) pairs followed by
/// bare left side bearings.
pub fn hmtx(metrics: &[(u16, i16)], trailing_bearings: &[i16]) -> Vec<u8> {
    let mut buf = BeBuffer::new();
    for (advance, lsb) in metrics {
        buf = buf.push(*advance).push(*lsb);
    }
    buf.extend(trailing_bearings.iter().copied()).into_vec()
}

/// `glyf` and `loca` tables holding the given glyph records.
///
/// An empty record produces an empty glyph. Records are padded to two bytes
/// for short offsets and four for long ones.
pub fn glyf_and_loca(glyphs: &[Vec<u8>], long_loca: bool) -> (Vec<u8>, Vec<u8>) {
    let alignment = if long_loca { 4 } else { 2 };
    let mut glyf = Vec::new();
    let mut offsets = vec![0usize];
    for glyph in glyphs {
        glyf.extend_from_slice(glyph);
        let rem = glyf.len() % alignment;
        if rem != 0 {
            glyf.resize(glyf.len() + alignment - rem, 0);
        }
        offsets.push(glyf.len());
    }
    let loca = if long_loca {
        BeBuffer::new().extend(offsets.iter().map(|offset| *offset as u32))
    } else {
        BeBuffer::new().extend(offsets.iter().map(|offset| (*offset / 2) as u16))
    };
    (glyf, loca.into_vec())
}

/// A `cmap` table from (platform id, encoding id, subtable) triples.
///
/// Identical subtables are not shared.
pub fn cmap(subtables: &[(u16, u16, Vec<u8>)]) -> Vec<u8> {
    let mut header = BeBuffer::new()
        .push(0u16)
        .push(subtables.len() as u16);
    let mut offset = 4 + subtables.len() * 8;
    for (platform_id, encoding_id, data) in subtables {
        header = header
            .push(*platform_id)
            .push(*encoding_id)
            .push(offset as u32);
        offset += data.len();
    }
    let mut bytes = header.into_vec();
    for (.., data) in subtables {
        bytes.extend_from_slice(data);
    }
    bytes
}

/// A format 4 subtable with one segment per (codepoint, glyph id) pair,
/// using `idDelta` only, plus the required final 0xFFFF segment.
pub fn cmap4(mappings: &[(u16, u16)]) -> Vec<u8> {
    let mut mappings = mappings.to_vec();
    mappings.sort_unstable();
    mappings.dedup_by_key(|(codepoint, _)| *codepoint);
    mappings.retain(|(codepoint, _)| *codepoint != 0xFFFF);
    let seg_count = mappings.len() + 1;
    let length = 16 + seg_count * 8;
    let codepoints = || {
        mappings
            .iter()
            .map(|(codepoint, _)| *codepoint)
            .chain(Some(0xFFFF))
    };
    BeBuffer::new()
        .extend([4u16, length as u16, 0, seg_count as u16 * 2, 0, 0, 0])
        .extend(codepoints())
        .push(0u16)
        .extend(codepoints())
        .extend(
            mappings
                .iter()
                .map(|(codepoint, gid)| gid.wrapping_sub(*codepoint))
                .chain(Some(1)),
        )
        .extend(std::iter::repeat(0u16).take(seg_count))
        .into_vec()
}

/// A format 12 subtable from (start, end, start glyph id) groups.
pub fn cmap12(groups: &[(u32, u32, u32)]) -> Vec<u8> {
    let mut buf = BeBuffer::new()
        .push(12u16)
        .push(0u16)
        .push(16 + groups.len() as u32 * 12)
        .push(0u32)
        .push(groups.len() as u32);
    for (start, end, start_glyph_id) in groups {
        buf = buf.extend([*start, *end, *start_glyph_id]);
    }
    buf.into_vec()
}

/// A format 6 (trimmed table) subtable.
pub fn cmap6(first_code: u16, glyph_ids: &[u16]) -> Vec<u8> {
    BeBuffer::new()
        .extend([6u16, 10 + glyph_ids.len() as u16 * 2, 0, first_code])
        .push(glyph_ids.len() as u16)
        .extend(glyph_ids.iter().copied())
        .into_vec()
}

/// A format 0 `name` table; every string is stored as UTF-16BE.
///
/// Records are (platform id, encoding id, language id, name id, string).
pub fn name(records: &[(u16, u16, u16, u16, &str)]) -> Vec<u8> {
    let storage_offset = 6 + records.len() * 12;
    let mut buf = BeBuffer::new()
        .push(0u16)
        .push(records.len() as u16)
        .push(storage_offset as u16);
    let mut offset = 0u16;
    for (platform_id, encoding_id, language_id, name_id, string) in records {
        let length = string.encode_utf16().count() as u16 * 2;
        buf = buf
            .extend([*platform_id, *encoding_id, *language_id, *name_id])
            .extend([length, offset]);
        offset += length;
    }
    for (.., string) in records {
        buf = buf.extend(string.encode_utf16());
    }
    buf.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lengths() {
        assert_eq!(head(1000, false).len(), 54);
        assert_eq!(hhea(800, -200, 0, 1).len(), 36);
        assert_eq!(maxp(4).len(), 32);
        assert_eq!(maxp_v05(4).len(), 6);
        assert_eq!(hmtx(&[(500, 0), (600, 10)], &[5]).len(), 10);
    }

    #[test]
    fn short_loca_halves_offsets() {
        let (glyf, loca) = glyf_and_loca(&[vec![], vec![1, 2, 3], vec![4; 4]], false);
        assert_eq!(glyf.len(), 8);
        assert_eq!(loca, [0, 0, 0, 0, 0, 2, 0, 4]);
    }

    #[test]
    fn cmap4_segments() {
        let data = cmap4(&[(0x42, 7), (0x41, 3)]);
        // three segments, including the terminator
        assert_eq!(&data[6..8], &[0, 6]);
        assert_eq!(data.len(), 16 + 3 * 8);
        // end codes are sorted
        assert_eq!(&data[14..20], &[0, 0x41, 0, 0x42, 0xff, 0xff]);
    }
}
