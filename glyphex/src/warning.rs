//! Recoverable problems found while loading a font.

use std::fmt;

use glyphex_read::types::{GlyphId, Tag};

/// A format anomaly that does not prevent the font from being used.
///
/// Warnings are collected on the [`Font`](crate::Font) and also emitted
/// through the `log` facade as they are found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    /// A table version field did not hold the expected value.
    InvalidVersion { tag: Tag, version: u32 },
    /// A Unicode cmap subtable is in a format we do not decode; its
    /// mappings are skipped.
    UnsupportedCmapFormat {
        platform_id: u16,
        encoding_id: u16,
        format: u16,
    },
    /// A composite glyph positions a component by point matching. The
    /// record is readable but the glyph has no geometry.
    PointMatchingComponent { glyph_id: GlyphId },
}

impl Warning {
    /// Log the warning and append it to `warnings`.
    pub(crate) fn record(self, warnings: &mut Vec<Warning>) {
        log::warn!("{self}");
        warnings.push(self);
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::InvalidVersion { tag, version } => {
                write!(f, "invalid `{tag}` version 0x{version:08X}")
            }
            Warning::UnsupportedCmapFormat {
                platform_id,
                encoding_id,
                format,
            } => write!(
                f,
                "unsupported `cmap` subtable format {format} ({platform_id}, {encoding_id})"
            ),
            Warning::PointMatchingComponent { glyph_id } => write!(
                f,
                "glyph {glyph_id}: unsupported cleared ARGS_ARE_XY_VALUES flag"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let warning = Warning::InvalidVersion {
            tag: Tag::new(b"maxp"),
            version: 0x5000,
        };
        assert_eq!(warning.to_string(), "invalid `maxp` version 0x00005000");
        let warning = Warning::PointMatchingComponent {
            glyph_id: GlyphId::new(12),
        };
        assert_eq!(
            warning.to_string(),
            "glyph GID_12: unsupported cleared ARGS_ARE_XY_VALUES flag"
        );
    }

    #[test]
    fn record_appends() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut warnings = Vec::new();
        Warning::UnsupportedCmapFormat {
            platform_id: 0,
            encoding_id: 4,
            format: 6,
        }
        .record(&mut warnings);
        assert_eq!(warnings.len(), 1);
    }
}
