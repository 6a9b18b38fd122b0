//! A single font, parsed and ready to answer glyph queries.

use std::sync::{Arc, RwLock};

use glyphex_read::{
    tables::{
        glyf::{Glyf, Glyph},
        head::Head,
        hhea::Hhea,
        hmtx::Hmtx,
        loca::Loca,
        maxp::Maxp,
    },
    types::GlyphId,
    FontRef, ReadError, TableProvider, TopLevelTable,
};

use crate::{
    outline::{self, Geometry},
    Charmap, FontNames, GlyphMetrics, LineMetrics, Warning,
};

/// When glyph records are decoded.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GlyphLoading {
    /// Decode each glyph when it is requested.
    ///
    /// Warnings about a glyph record are added to the font the first time
    /// that glyph is decoded.
    #[default]
    Lazy,
    /// Decode every glyph while loading the font.
    ///
    /// Malformed glyphs fail the load, and warnings about glyph records are
    /// collected on the font.
    Eager,
}

/// Options controlling how a font is loaded.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub glyph_loading: GlyphLoading,
}

impl LoadOptions {
    pub fn eager() -> Self {
        Self {
            glyph_loading: GlyphLoading::Eager,
        }
    }
}

/// Access to glyph records by identifier.
#[derive(Clone)]
enum GlyphStore<'a> {
    Lazy {
        loca: Loca<'a>,
        glyf: Glyf<'a>,
        warnings: Arc<RwLock<Vec<Warning>>>,
    },
    Eager(Vec<Option<Glyph<'a>>>),
}

impl<'a> GlyphStore<'a> {
    fn eager(
        loca: &Loca<'a>,
        glyf: &Glyf<'a>,
        warnings: &mut Vec<Warning>,
    ) -> Result<Self, ReadError> {
        let glyphs = (0..loca.len())
            .map(|ix| -> Result<Option<Glyph<'a>>, ReadError> {
                let glyph_id = GlyphId::new(ix as u16);
                let glyph = read_glyph(loca, glyf, glyph_id)?;
                if let Some(glyph) = &glyph {
                    if has_point_matching(glyph) {
                        Warning::PointMatchingComponent { glyph_id }.record(warnings);
                    }
                }
                Ok(glyph)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GlyphStore::Eager(glyphs))
    }

    fn get(&self, glyph_id: GlyphId) -> Result<Option<Glyph<'a>>, ReadError> {
        match self {
            GlyphStore::Lazy {
                loca,
                glyf,
                warnings,
            } => {
                if glyph_id.to_usize() >= loca.len() {
                    return Ok(None);
                }
                let glyph = read_glyph(loca, glyf, glyph_id)?;
                if glyph.as_ref().is_some_and(has_point_matching) {
                    let warning = Warning::PointMatchingComponent { glyph_id };
                    if let Ok(mut warnings) = warnings.write() {
                        if !warnings.contains(&warning) {
                            warning.record(&mut warnings);
                        }
                    }
                }
                Ok(glyph)
            }
            GlyphStore::Eager(glyphs) => Ok(glyphs.get(glyph_id.to_usize()).cloned().flatten()),
        }
    }

    /// Warnings found while decoding glyphs on request.
    fn lazy_warnings(&self) -> Vec<Warning> {
        match self {
            GlyphStore::Lazy { warnings, .. } => warnings
                .read()
                .map(|warnings| warnings.clone())
                .unwrap_or_default(),
            GlyphStore::Eager(_) => Vec::new(),
        }
    }

    fn loading(&self) -> GlyphLoading {
        match self {
            GlyphStore::Lazy { .. } => GlyphLoading::Lazy,
            GlyphStore::Eager(_) => GlyphLoading::Eager,
        }
    }
}

fn read_glyph<'a>(
    loca: &Loca<'a>,
    glyf: &Glyf<'a>,
    glyph_id: GlyphId,
) -> Result<Option<Glyph<'a>>, ReadError> {
    loca.glyph_range(glyph_id)?
        .map(|range| glyf.glyph(glyph_id, range))
        .transpose()
}

fn has_point_matching(glyph: &Glyph) -> bool {
    match glyph {
        Glyph::Composite(composite) => composite
            .components
            .iter()
            .any(|component| !component.args_are_xy_values()),
        Glyph::Simple(_) => false,
    }
}

/// A font with its tables decoded.
///
/// Everything needed to answer queries is read up front, apart from glyph
/// records in [lazy](GlyphLoading::Lazy) mode. Apart from the warnings
/// gathered by lazy decoding, the font is immutable once loaded, so queries
/// for different glyphs are independent.
#[derive(Clone)]
pub struct Font<'a> {
    font: FontRef<'a>,
    head: Head,
    maxp: Maxp,
    hhea: Hhea,
    hmtx: Hmtx<'a>,
    glyphs: GlyphStore<'a>,
    names: FontNames,
    charmap: Charmap,
    warnings: Vec<Warning>,
}

impl<'a> Font<'a> {
    /// Load a single font (not a collection) with default options.
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        Self::from_ref(FontRef::new(data)?, LoadOptions::default())
    }

    /// Load the tables of an already located font.
    pub fn from_ref(font: FontRef<'a>, options: LoadOptions) -> Result<Self, ReadError> {
        let mut warnings = Vec::new();
        let head = font.head()?;
        let maxp = font.maxp()?;
        let truetype_outlines = font.truetype_outlines();
        if maxp.version != Maxp::expected_version(truetype_outlines) {
            Warning::InvalidVersion {
                tag: Maxp::TAG,
                version: maxp.version,
            }
            .record(&mut warnings);
        }
        let hhea = font.hhea()?;
        let hmtx = font.hmtx()?;
        let loca = font.loca(head.has_long_loca())?;
        let glyf = font.glyf()?;
        let glyphs = match options.glyph_loading {
            GlyphLoading::Lazy => GlyphStore::Lazy {
                loca,
                glyf,
                warnings: Default::default(),
            },
            GlyphLoading::Eager => GlyphStore::eager(&loca, &glyf, &mut warnings)?,
        };
        let names = FontNames::new(&font.name()?);
        let charmap = Charmap::new(&font.cmap()?, &mut warnings)?;
        log::debug!(
            "loaded font {:?}: {} tables, {} glyphs, {:?} glyph loading, {} warnings",
            names.full_name.as_deref().unwrap_or("<unnamed>"),
            font.table_directory.num_tables(),
            maxp.num_glyphs,
            options.glyph_loading,
            warnings.len(),
        );
        Ok(Self {
            font,
            head,
            maxp,
            hhea,
            hmtx,
            glyphs,
            names,
            charmap,
            warnings,
        })
    }

    /// The underlying table data.
    pub fn font_ref(&self) -> &FontRef<'a> {
        &self.font
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    pub fn maxp(&self) -> &Maxp {
        &self.maxp
    }

    pub fn hhea(&self) -> &Hhea {
        &self.hhea
    }

    pub fn units_per_em(&self) -> u16 {
        self.head.units_per_em
    }

    pub fn glyph_count(&self) -> u16 {
        self.maxp.num_glyphs
    }

    /// All glyph identifiers, `0..glyph_count`.
    pub fn glyph_ids(&self) -> impl Iterator<Item = GlyphId> + Clone {
        (0..self.glyph_count()).map(GlyphId::new)
    }

    pub fn glyph_loading(&self) -> GlyphLoading {
        self.glyphs.loading()
    }

    /// The nominal glyph for a Unicode codepoint.
    pub fn unicode_to_glyph_id(&self, codepoint: impl Into<u32>) -> Option<GlyphId> {
        self.charmap.map(codepoint)
    }

    pub fn charmap(&self) -> &Charmap {
        &self.charmap
    }

    /// The decoded glyph record, or `None` for glyphs without one.
    pub fn glyph_data(&self, glyph_id: GlyphId) -> Result<Option<Glyph<'a>>, ReadError> {
        self.glyphs.get(glyph_id)
    }

    /// The resolved outline of a glyph, in em units with y down.
    ///
    /// With `simplify_steps > 0` each quadratic segment is flattened into
    /// that many lines. Returns `None` for glyphs with no outline.
    pub fn glyph_geometry(
        &self,
        glyph_id: GlyphId,
        simplify_steps: usize,
    ) -> Result<Option<Geometry>, ReadError> {
        let geometry = outline::resolve(self, glyph_id)?;
        Ok(geometry.map(|geometry| geometry.simplified(simplify_steps)))
    }

    /// The advance width of a glyph, in em units.
    pub fn advance_width(&self, glyph_id: GlyphId) -> f64 {
        self.glyph_metrics(glyph_id).advance_width
    }

    pub fn glyph_metrics(&self, glyph_id: GlyphId) -> GlyphMetrics {
        GlyphMetrics::new(&self.hmtx, glyph_id, self.units_per_em())
    }

    pub fn horizontal_line_metrics(&self) -> LineMetrics {
        LineMetrics::new(&self.hhea, self.units_per_em())
    }

    pub fn names(&self) -> &FontNames {
        &self.names
    }

    /// Recoverable problems found while loading, followed by those found
    /// while decoding glyphs in [lazy](GlyphLoading::Lazy) mode so far.
    pub fn warnings(&self) -> Vec<Warning> {
        let mut warnings = self.warnings.clone();
        warnings.extend(self.glyphs.lazy_warnings());
        warnings
    }
}
