//! The [glyf (Glyph Data)](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) table

use std::ops::Range;

use types::{BoundingBox, F2Dot14, GlyphId, Tag};

use crate::{Cursor, FontData, FontRead, ReadError, TopLevelTable};

/// The glyph data table.
///
/// Glyph records are located with the byte ranges from [`Loca`](super::loca::Loca).
#[derive(Clone, Copy, Debug)]
pub struct Glyf<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Glyf<'_> {
    const TAG: Tag = Tag::new(b"glyf");
}

impl<'a> FontRead<'a> for Glyf<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        Ok(Glyf { data })
    }
}

impl<'a> Glyf<'a> {
    /// Decode the glyph stored at `range`.
    pub fn glyph(&self, glyph_id: GlyphId, range: Range<usize>) -> Result<Glyph<'a>, ReadError> {
        let data = self.data.slice(range).ok_or(ReadError::OutOfBounds)?;
        Glyph::read(data, glyph_id)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Flags for a point in a simple glyph.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SimpleGlyphFlags(u8);

impl SimpleGlyphFlags {
    pub const ON_CURVE_POINT: Self = Self(0x01);
    pub const X_SHORT_VECTOR: Self = Self(0x02);
    pub const Y_SHORT_VECTOR: Self = Self(0x04);
    pub const REPEAT_FLAG: Self = Self(0x08);
    pub const X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR: Self = Self(0x10);
    pub const Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR: Self = Self(0x20);
    pub const OVERLAP_SIMPLE: Self = Self(0x40);

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::fmt::Debug for SimpleGlyphFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimpleGlyphFlags({:#04x})", self.0)
    }
}

/// Flags for a component of a composite glyph.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CompositeGlyphFlags(u16);

impl CompositeGlyphFlags {
    pub const ARG_1_AND_2_ARE_WORDS: Self = Self(0x0001);
    pub const ARGS_ARE_XY_VALUES: Self = Self(0x0002);
    pub const ROUND_XY_TO_GRID: Self = Self(0x0004);
    pub const WE_HAVE_A_SCALE: Self = Self(0x0008);
    pub const MORE_COMPONENTS: Self = Self(0x0020);
    pub const WE_HAVE_AN_X_AND_Y_SCALE: Self = Self(0x0040);
    pub const WE_HAVE_A_TWO_BY_TWO: Self = Self(0x0080);
    pub const WE_HAVE_INSTRUCTIONS: Self = Self(0x0100);
    pub const USE_MY_METRICS: Self = Self(0x0200);
    pub const OVERLAP_COMPOUND: Self = Self(0x0400);
    pub const SCALED_COMPONENT_OFFSET: Self = Self(0x0800);
    pub const UNSCALED_COMPONENT_OFFSET: Self = Self(0x1000);

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::fmt::Debug for CompositeGlyphFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompositeGlyphFlags({:#06x})", self.0)
    }
}

/// A decoded glyph record.
#[derive(Clone, Debug, PartialEq)]
pub enum Glyph<'a> {
    Simple(SimpleGlyph<'a>),
    Composite(CompositeGlyph<'a>),
}

impl<'a> Glyph<'a> {
    /// Decode a glyph record.
    ///
    /// `glyph_id` is only used to identify the glyph in errors.
    pub fn read(data: FontData<'a>, glyph_id: GlyphId) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let number_of_contours = cursor.read_i16()?;
        let bounds = BoundingBox {
            x_min: cursor.read()?,
            y_min: cursor.read()?,
            x_max: cursor.read()?,
            y_max: cursor.read()?,
        };
        if number_of_contours >= 0 {
            SimpleGlyph::read(&mut cursor, bounds, number_of_contours as u16, glyph_id)
                .map(Glyph::Simple)
        } else {
            CompositeGlyph::read(&mut cursor, bounds).map(Glyph::Composite)
        }
    }

    /// The bounding box stored in the glyph header, in font units.
    pub fn bounds(&self) -> BoundingBox<i16> {
        match self {
            Self::Simple(glyph) => glyph.bounds,
            Self::Composite(glyph) => glyph.bounds,
        }
    }

    /// The TrueType interpreter instructions. Never executed.
    pub fn instructions(&self) -> &'a [u8] {
        match self {
            Self::Simple(glyph) => glyph.instructions,
            Self::Composite(glyph) => glyph.instructions,
        }
    }
}

/// Point with an associated on-curve flag in a simple glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurvePoint {
    /// X cooordinate.
    pub x: i16,
    /// Y cooordinate.
    pub y: i16,
    /// True if this is an on-curve point.
    pub on_curve: bool,
}

impl CurvePoint {
    /// Construct a new `CurvePoint`
    pub fn new(x: i16, y: i16, on_curve: bool) -> Self {
        Self { x, y, on_curve }
    }

    /// Convenience method to construct an on-curve point
    pub fn on_curve(x: i16, y: i16) -> Self {
        Self::new(x, y, true)
    }

    /// Convenience method to construct an off-curve point
    pub fn off_curve(x: i16, y: i16) -> Self {
        Self::new(x, y, false)
    }
}

/// A glyph outline made of on and off curve points.
#[derive(Clone, Debug, PartialEq)]
pub struct SimpleGlyph<'a> {
    pub bounds: BoundingBox<i16>,
    /// Index of the last point of each contour.
    pub end_pts_of_contours: Vec<u16>,
    pub instructions: &'a [u8],
    /// One flag per point, after run-length expansion.
    pub flags: Vec<SimpleGlyphFlags>,
    /// Absolute coordinates in font units.
    pub points: Vec<CurvePoint>,
}

impl<'a> SimpleGlyph<'a> {
    fn read(
        cursor: &mut Cursor<'a>,
        bounds: BoundingBox<i16>,
        number_of_contours: u16,
        glyph_id: GlyphId,
    ) -> Result<Self, ReadError> {
        let end_pts_of_contours = (0..number_of_contours)
            .map(|_| cursor.read_u16())
            .collect::<Result<Vec<_>, _>>()?;
        if end_pts_of_contours.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(ReadError::MalformedGlyph {
                glyph_id,
                detail: "contour end points are decreasing",
            });
        }
        let instruction_length = cursor.read_u16()? as usize;
        let instructions = cursor.read_bytes(instruction_length)?;
        let n_points = end_pts_of_contours
            .last()
            .map(|last| *last as usize + 1)
            .unwrap_or(0);

        let mut flags = Vec::with_capacity(n_points);
        while flags.len() < n_points {
            let flag = SimpleGlyphFlags::from_bits(cursor.read_u8()?);
            let count = if flag.contains(SimpleGlyphFlags::REPEAT_FLAG) {
                cursor.read_u8()? as usize + 1
            } else {
                1
            };
            if flags.len() + count > n_points {
                return Err(ReadError::MalformedGlyph {
                    glyph_id,
                    detail: "flag repeat count runs past the last point",
                });
            }
            flags.extend(std::iter::repeat(flag).take(count));
        }

        let xs = read_coordinates(
            cursor,
            &flags,
            SimpleGlyphFlags::X_SHORT_VECTOR,
            SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR,
        )?;
        let ys = read_coordinates(
            cursor,
            &flags,
            SimpleGlyphFlags::Y_SHORT_VECTOR,
            SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR,
        )?;
        let points = flags
            .iter()
            .zip(xs.into_iter().zip(ys))
            .map(|(flag, (x, y))| {
                CurvePoint::new(x, y, flag.contains(SimpleGlyphFlags::ON_CURVE_POINT))
            })
            .collect();
        Ok(SimpleGlyph {
            bounds,
            end_pts_of_contours,
            instructions,
            flags,
            points,
        })
    }

    /// Returns the total number of points.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The points of each contour, in order.
    ///
    /// Contours with no points are skipped.
    pub fn contours(&self) -> impl Iterator<Item = &[CurvePoint]> + '_ {
        let mut start = 0;
        self.end_pts_of_contours.iter().filter_map(move |end| {
            let end = *end as usize + 1;
            let contour = self.points.get(start..end)?;
            start = end;
            (!contour.is_empty()).then_some(contour)
        })
    }
}

/// Decode one coordinate stream.
///
/// Each delta is a signed byte when the short bit is set (with the sign
/// taken from the same-or-positive bit), otherwise zero when the
/// same-or-positive bit is set, otherwise a signed word. Deltas accumulate
/// from zero across the whole glyph.
fn read_coordinates(
    cursor: &mut Cursor,
    flags: &[SimpleGlyphFlags],
    short: SimpleGlyphFlags,
    same_or_positive: SimpleGlyphFlags,
) -> Result<Vec<i16>, ReadError> {
    let mut value = 0i16;
    flags
        .iter()
        .map(|flag| -> Result<i16, ReadError> {
            let delta = match (flag.contains(short), flag.contains(same_or_positive)) {
                (true, true) => cursor.read_u8()? as i16,
                (true, false) => -(cursor.read_u8()? as i16),
                (false, true) => 0,
                (false, false) => cursor.read_i16()?,
            };
            value = value.wrapping_add(delta);
            Ok(value)
        })
        .collect()
}

/// Transform for a composite component.
///
/// A two by two matrix is stored in the order `xx`, `yx`, `xy`, `yy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transform {
    /// X scale factor.
    pub xx: F2Dot14,
    /// YX skew factor.
    pub yx: F2Dot14,
    /// XY skew factor.
    pub xy: F2Dot14,
    /// Y scale factor.
    pub yy: F2Dot14,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            xx: F2Dot14::ONE,
            yx: F2Dot14::ZERO,
            xy: F2Dot14::ZERO,
            yy: F2Dot14::ONE,
        }
    }
}

/// Anchor position for a composite component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Offset in font units.
    Offset { x: i16, y: i16 },
    /// Point matching: align point `component` of the child with point
    /// `base` of the glyph assembled so far.
    Point { base: u16, component: u16 },
}

/// A reference to another glyph. Part of [CompositeGlyph].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Component {
    /// Component flags.
    pub flags: CompositeGlyphFlags,
    /// Glyph identifier.
    pub glyph: GlyphId,
    /// Anchor for component placement.
    pub anchor: Anchor,
    /// Component transformation matrix.
    pub transform: Transform,
}

impl Component {
    /// `true` when the arguments are an offset rather than point indices.
    pub fn args_are_xy_values(&self) -> bool {
        self.flags.contains(CompositeGlyphFlags::ARGS_ARE_XY_VALUES)
    }
}

/// A glyph assembled from transformed references to other glyphs.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeGlyph<'a> {
    pub bounds: BoundingBox<i16>,
    pub components: Vec<Component>,
    pub instructions: &'a [u8],
}

impl<'a> CompositeGlyph<'a> {
    fn read(cursor: &mut Cursor<'a>, bounds: BoundingBox<i16>) -> Result<Self, ReadError> {
        let mut components = Vec::new();
        let mut flags;
        loop {
            flags = CompositeGlyphFlags::from_bits(cursor.read_u16()?);
            let glyph = GlyphId::new(cursor.read_u16()?);
            let args_are_words = flags.contains(CompositeGlyphFlags::ARG_1_AND_2_ARE_WORDS);
            let args_are_xy_values = flags.contains(CompositeGlyphFlags::ARGS_ARE_XY_VALUES);
            let anchor = match (args_are_xy_values, args_are_words) {
                (true, true) => Anchor::Offset {
                    x: cursor.read_i16()?,
                    y: cursor.read_i16()?,
                },
                (true, false) => Anchor::Offset {
                    x: cursor.read_i8()? as _,
                    y: cursor.read_i8()? as _,
                },
                (false, true) => Anchor::Point {
                    base: cursor.read_u16()?,
                    component: cursor.read_u16()?,
                },
                (false, false) => Anchor::Point {
                    base: cursor.read_u8()? as _,
                    component: cursor.read_u8()? as _,
                },
            };
            let mut transform = Transform::default();
            if flags.contains(CompositeGlyphFlags::WE_HAVE_A_SCALE) {
                transform.xx = cursor.read_f2dot14()?;
                transform.yy = transform.xx;
            } else if flags.contains(CompositeGlyphFlags::WE_HAVE_AN_X_AND_Y_SCALE) {
                transform.xx = cursor.read_f2dot14()?;
                transform.yy = cursor.read_f2dot14()?;
            } else if flags.contains(CompositeGlyphFlags::WE_HAVE_A_TWO_BY_TWO) {
                transform.xx = cursor.read_f2dot14()?;
                transform.yx = cursor.read_f2dot14()?;
                transform.xy = cursor.read_f2dot14()?;
                transform.yy = cursor.read_f2dot14()?;
            }
            components.push(Component {
                flags,
                glyph,
                anchor,
                transform,
            });
            if !flags.contains(CompositeGlyphFlags::MORE_COMPONENTS) {
                break;
            }
        }
        let instructions = if flags.contains(CompositeGlyphFlags::WE_HAVE_INSTRUCTIONS) {
            let len = cursor.read_u16()? as usize;
            cursor.read_bytes(len)?
        } else {
            &[]
        };
        Ok(CompositeGlyph {
            bounds,
            components,
            instructions,
        })
    }
}
