//! cmap subtables for scenarios the table encoders don't produce

use crate::{be_buffer, bebuffer::BeBuffer};

/// 'A'..='C' map to glyphs 1..=3 through idDelta.
pub fn format4_delta() -> BeBuffer {
    // <https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values>
    be_buffer! {
        4u16,       // format
        32u16,      // length
        0u16,       // language
        4u16,       // segCountX2, 2 segments
        4u16,       // searchRange
        1u16,       // entrySelector
        0u16,       // rangeShift
        // endCode
        0x43u16, 0xFFFFu16,
        0u16,       // reservedPad
        // startCode
        0x41u16, 0xFFFFu16,
        // idDelta
        -0x40i16, 1i16,
        // idRangeOffset
        0u16, 0u16,
    }
}

/// 'a'..='c' read glyph ids from the glyph id array, then add idDelta 5.
///
/// 'b' is stored as 0 and so stays unmapped.
pub fn format4_range_offset() -> BeBuffer {
    be_buffer! {
        4u16,       // format
        38u16,      // length
        0u16,       // language
        4u16,       // segCountX2, 2 segments
        4u16, 1u16, 0u16,
        // endCode
        0x63u16, 0xFFFFu16,
        0u16,       // reservedPad
        // startCode
        0x61u16, 0xFFFFu16,
        // idDelta
        5i16, 1i16,
        // idRangeOffset: the first points 4 bytes ahead, past the second
        // entry, to the start of glyphIdArray
        4u16, 0u16,
        // glyphIdArray
        10u16, 0u16, 12u16,
    }
}

/// Two groups: '0'..='1' from glyph 3, and three emoji from glyph 10.
pub fn format12() -> BeBuffer {
    be_buffer! {
        12u16,      // format
        0u16,       // reserved
        40u32,      // length
        0u32,       // language
        2u32,       // numGroups
        0x30u32, 0x31u32, 3u32,
        0x1F600u32, 0x1F602u32, 10u32,
    }
}
