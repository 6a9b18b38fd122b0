//! The [maxp (Maximum Profile)](https://docs.microsoft.com/en-us/typography/opentype/spec/maxp) table

use types::Tag;

use crate::{FontData, FontReadWithArgs, ReadArgs, ReadError, TopLevelTable};

/// The version used by fonts with CFF outlines.
pub const VERSION_0_5: u32 = 0x00005000;
/// The version used by fonts with TrueType outlines.
pub const VERSION_1_0: u32 = 0x00010000;

/// The maximum profile table.
///
/// Only the glyph count is present in fonts without TrueType outlines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maxp {
    pub version: u32,
    pub num_glyphs: u16,
    pub limits: Option<TrueTypeLimits>,
}

/// The version 1.0 fields, used to size the hinting interpreter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrueTypeLimits {
    pub max_points: u16,
    pub max_contours: u16,
    pub max_composite_points: u16,
    pub max_composite_contours: u16,
    pub max_zones: u16,
    pub max_twilight_points: u16,
    pub max_storage: u16,
    pub max_function_defs: u16,
    pub max_instruction_defs: u16,
    pub max_stack_elements: u16,
    pub max_size_of_instructions: u16,
    pub max_component_elements: u16,
    pub max_component_depth: u16,
}

impl Maxp {
    /// The version this table should have, given the kind of outlines.
    pub fn expected_version(truetype_outlines: bool) -> u32 {
        if truetype_outlines {
            VERSION_1_0
        } else {
            VERSION_0_5
        }
    }

    /// Read the table; the full field set is read only for TrueType outlines.
    pub fn read(data: FontData<'_>, truetype_outlines: bool) -> Result<Self, ReadError> {
        Self::read_with_args(data, &truetype_outlines)
    }
}

impl TopLevelTable for Maxp {
    const TAG: Tag = Tag::new(b"maxp");
}

impl ReadArgs for Maxp {
    type Args = bool;
}

impl<'a> FontReadWithArgs<'a> for Maxp {
    fn read_with_args(data: FontData<'a>, args: &bool) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version = cursor.read()?;
        let num_glyphs = cursor.read()?;
        let limits = if *args {
            Some(TrueTypeLimits {
                max_points: cursor.read()?,
                max_contours: cursor.read()?,
                max_composite_points: cursor.read()?,
                max_composite_contours: cursor.read()?,
                max_zones: cursor.read()?,
                max_twilight_points: cursor.read()?,
                max_storage: cursor.read()?,
                max_function_defs: cursor.read()?,
                max_instruction_defs: cursor.read()?,
                max_stack_elements: cursor.read()?,
                max_size_of_instructions: cursor.read()?,
                max_component_elements: cursor.read()?,
                max_component_depth: cursor.read()?,
            })
        } else {
            None
        };
        Ok(Maxp {
            version,
            num_glyphs,
            limits,
        })
    }
}
