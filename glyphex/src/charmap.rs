//! Mapping of Unicode codepoints to glyph identifiers.

use std::collections::HashMap;

use glyphex_read::{
    tables::cmap::{Cmap, CmapSubtable},
    types::GlyphId,
    ReadError, TopLevelTable,
};

use crate::Warning;

/// The merged codepoint to glyph mapping of a font.
///
/// Every Unicode subtable in a supported format contributes, in directory
/// order; a later subtable overrides the mappings of earlier ones. Several
/// codepoints may map to the same glyph. Codepoints mapped to glyph 0 are
/// absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Charmap {
    map: HashMap<u32, GlyphId>,
}

impl Charmap {
    /// Build the map, recording anything we skip in `warnings`.
    pub(crate) fn new(cmap: &Cmap, warnings: &mut Vec<Warning>) -> Result<Self, ReadError> {
        if cmap.version != 0 {
            Warning::InvalidVersion {
                tag: Cmap::TAG,
                version: cmap.version as u32,
            }
            .record(warnings);
        }
        let mut map = HashMap::new();
        for record in cmap.encoding_records().iter().filter(|rec| rec.is_unicode()) {
            match cmap.subtable(record)? {
                CmapSubtable::Unsupported(format) => Warning::UnsupportedCmapFormat {
                    platform_id: record.platform_id,
                    encoding_id: record.encoding_id,
                    format,
                }
                .record(warnings),
                subtable => map.extend(subtable.iter()),
            }
        }
        Ok(Self { map })
    }

    /// The glyph for a codepoint, if it is mapped.
    pub fn map(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        self.map.get(&codepoint.into()).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// All (codepoint, glyph) pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, GlyphId)> + '_ {
        self.map.iter().map(|(codepoint, gid)| (*codepoint, *gid))
    }

    /// All codepoints that map to `glyph_id`, in ascending order.
    pub fn codepoints_for(&self, glyph_id: GlyphId) -> Vec<u32> {
        let mut codepoints: Vec<_> = self
            .iter()
            .filter_map(|(codepoint, gid)| (gid == glyph_id).then_some(codepoint))
            .collect();
        codepoints.sort_unstable();
        codepoints
    }
}

#[cfg(test)]
mod tests {
    use glyphex_read::{FontData, FontRead};
    use glyphex_test_data::tables;

    use super::*;

    fn build(subtables: &[(u16, u16, Vec<u8>)]) -> (Charmap, Vec<Warning>) {
        let data = tables::cmap(subtables);
        let cmap = Cmap::read(FontData::new(&data)).unwrap();
        let mut warnings = Vec::new();
        let charmap = Charmap::new(&cmap, &mut warnings).unwrap();
        (charmap, warnings)
    }

    #[test]
    fn later_subtables_override() {
        let (charmap, warnings) = build(&[
            (0, 3, tables::cmap4(&[(0x41, 1), (0x42, 2)])),
            (3, 10, tables::cmap12(&[(0x42, 0x43, 7)])),
        ]);
        assert!(warnings.is_empty());
        assert_eq!(charmap.map('A'), Some(GlyphId::new(1)));
        assert_eq!(charmap.map('B'), Some(GlyphId::new(7)));
        assert_eq!(charmap.map('C'), Some(GlyphId::new(8)));
        assert_eq!(charmap.map('D'), None);
        assert_eq!(charmap.len(), 3);
    }

    #[test]
    fn non_unicode_subtables_are_ignored() {
        let (charmap, warnings) = build(&[
            (1, 0, tables::cmap4(&[(0x41, 1)])),
            (3, 0, tables::cmap4(&[(0x42, 2)])),
        ]);
        assert!(charmap.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn unsupported_format_warns() {
        let (charmap, warnings) = build(&[
            (0, 4, tables::cmap6(0x30, &[1, 2])),
            (3, 1, tables::cmap4(&[(0x30, 5)])),
        ]);
        assert_eq!(
            warnings,
            [Warning::UnsupportedCmapFormat {
                platform_id: 0,
                encoding_id: 4,
                format: 6
            }]
        );
        assert_eq!(charmap.map(0x30u32), Some(GlyphId::new(5)));
    }

    #[test]
    fn many_codepoints_one_glyph() {
        let (charmap, _) = build(&[(0, 3, tables::cmap4(&[(0x61, 3), (0x6F, 3), (0x41, 1)]))]);
        assert_eq!(charmap.codepoints_for(GlyphId::new(3)), [0x61, 0x6F]);
    }

    #[test]
    fn bad_version_warns() {
        let mut data = tables::cmap(&[(0, 3, tables::cmap4(&[(0x41, 1)]))]);
        data[1] = 1;
        let cmap = Cmap::read(FontData::new(&data)).unwrap();
        let mut warnings = Vec::new();
        let charmap = Charmap::new(&cmap, &mut warnings).unwrap();
        assert_eq!(charmap.len(), 1);
        assert!(matches!(
            warnings.as_slice(),
            [Warning::InvalidVersion { version: 1, .. }]
        ));
    }
}
