//! Encoders for `glyf` records

use glyphex_types::F2Dot14;

use crate::bebuffer::BeBuffer;

const ON_CURVE_POINT: u8 = 0x01;
const X_SHORT_VECTOR: u8 = 0x02;
const Y_SHORT_VECTOR: u8 = 0x04;
const REPEAT_FLAG: u8 = 0x08;
const X_IS_SAME_OR_POSITIVE: u8 = 0x10;
const Y_IS_SAME_OR_POSITIVE: u8 = 0x20;

const ARG_1_AND_2_ARE_WORDS: u16 = 0x0001;
const ARGS_ARE_XY_VALUES: u16 = 0x0002;
const WE_HAVE_A_SCALE: u16 = 0x0008;
const MORE_COMPONENTS: u16 = 0x0020;
const WE_HAVE_AN_X_AND_Y_SCALE: u16 = 0x0040;
const WE_HAVE_A_TWO_BY_TWO: u16 = 0x0080;
const WE_HAVE_INSTRUCTIONS: u16 = 0x0100;

/// Builds a simple glyph record from contours of (x, y, on curve) points.
///
/// Deltas use the short forms where they fit, and runs of equal flags are
/// compressed with the repeat flag.
#[derive(Clone, Debug, Default)]
pub struct SimpleGlyphBuilder {
    contours: Vec<Vec<(i16, i16, bool)>>,
    instructions: Vec<u8>,
}

impl SimpleGlyphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contour(mut self, points: &[(i16, i16, bool)]) -> Self {
        self.contours.push(points.to_vec());
        self
    }

    /// A closed contour of on-curve points.
    pub fn polygon(self, points: &[(i16, i16)]) -> Self {
        let points: Vec<_> = points.iter().map(|(x, y)| (*x, *y, true)).collect();
        self.contour(&points)
    }

    pub fn instructions(mut self, bytes: &[u8]) -> Self {
        self.instructions = bytes.to_vec();
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let points: Vec<_> = self.contours.iter().flatten().copied().collect();
        let (x_min, x_max) = min_max(points.iter().map(|p| p.0));
        let (y_min, y_max) = min_max(points.iter().map(|p| p.1));
        let mut buf = BeBuffer::new()
            .push(self.contours.len() as i16)
            .extend([x_min, y_min, x_max, y_max]);
        let mut end = 0usize;
        for contour in &self.contours {
            end += contour.len();
            buf = buf.push(end as u16 - 1);
        }
        buf = buf
            .push(self.instructions.len() as u16)
            .extend_bytes(&self.instructions);

        let mut flags = Vec::with_capacity(points.len());
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        let mut prev = (0i16, 0i16);
        for (x, y, on_curve) in &points {
            let mut flag = if *on_curve { ON_CURVE_POINT } else { 0 };
            flag |= encode_delta(
                x.wrapping_sub(prev.0),
                X_SHORT_VECTOR,
                X_IS_SAME_OR_POSITIVE,
                &mut xs,
            );
            flag |= encode_delta(
                y.wrapping_sub(prev.1),
                Y_SHORT_VECTOR,
                Y_IS_SAME_OR_POSITIVE,
                &mut ys,
            );
            flags.push(flag);
            prev = (*x, *y);
        }
        let mut i = 0;
        while i < flags.len() {
            let flag = flags[i];
            let run = flags[i..]
                .iter()
                .take(256)
                .take_while(|other| **other == flag)
                .count();
            if run > 1 {
                buf = buf.push(flag | REPEAT_FLAG).push((run - 1) as u8);
            } else {
                buf = buf.push(flag);
            }
            i += run;
        }
        buf.extend_bytes(&xs).extend_bytes(&ys).into_vec()
    }
}

/// Append the encoded delta, returning the flag bits that describe it.
fn encode_delta(delta: i16, short: u8, same_or_positive: u8, out: &mut Vec<u8>) -> u8 {
    if delta == 0 {
        same_or_positive
    } else if (-255..=255).contains(&delta) {
        out.push(delta.unsigned_abs() as u8);
        if delta > 0 {
            short | same_or_positive
        } else {
            short
        }
    } else {
        out.extend(delta.to_be_bytes());
        0
    }
}

fn min_max(values: impl Iterator<Item = i16>) -> (i16, i16) {
    values.fold((0, 0), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// The scale part of a component transform.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ComponentScale {
    #[default]
    Identity,
    Uniform(f32),
    XY(f32, f32),
    /// `[xx, yx, xy, yy]`
    TwoByTwo([f32; 4]),
}

#[derive(Clone, Copy, Debug)]
struct ComponentRecord {
    glyph: u16,
    arg1: i16,
    arg2: i16,
    xy_values: bool,
    scale: ComponentScale,
}

/// Builds a composite glyph record.
#[derive(Clone, Debug, Default)]
pub struct CompositeGlyphBuilder {
    components: Vec<ComponentRecord>,
    instructions: Vec<u8>,
    bounds: [i16; 4],
}

impl CompositeGlyphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A component placed at an offset in font units.
    pub fn offset(self, glyph: u16, dx: i16, dy: i16) -> Self {
        self.transformed(glyph, dx, dy, ComponentScale::Identity)
    }

    /// A scaled component placed at an offset in font units.
    pub fn transformed(mut self, glyph: u16, dx: i16, dy: i16, scale: ComponentScale) -> Self {
        self.components.push(ComponentRecord {
            glyph,
            arg1: dx,
            arg2: dy,
            xy_values: true,
            scale,
        });
        self
    }

    /// A component positioned by matching two point indices.
    pub fn point_matched(mut self, glyph: u16, base: u16, component: u16) -> Self {
        self.components.push(ComponentRecord {
            glyph,
            arg1: base as i16,
            arg2: component as i16,
            xy_values: false,
            scale: ComponentScale::Identity,
        });
        self
    }

    pub fn instructions(mut self, bytes: &[u8]) -> Self {
        self.instructions = bytes.to_vec();
        self
    }

    /// The bounds stored in the header; `[x_min, y_min, x_max, y_max]`.
    pub fn bounds(mut self, bounds: [i16; 4]) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = BeBuffer::new().push(-1i16).extend(self.bounds);
        let last = self.components.len().saturating_sub(1);
        for (i, component) in self.components.iter().enumerate() {
            let words = !(-128..=127).contains(&component.arg1)
                || !(-128..=127).contains(&component.arg2);
            let mut flags = 0u16;
            if words {
                flags |= ARG_1_AND_2_ARE_WORDS;
            }
            if component.xy_values {
                flags |= ARGS_ARE_XY_VALUES;
            }
            if i < last {
                flags |= MORE_COMPONENTS;
            } else if !self.instructions.is_empty() {
                flags |= WE_HAVE_INSTRUCTIONS;
            }
            let scale: Vec<F2Dot14> = match component.scale {
                ComponentScale::Identity => vec![],
                ComponentScale::Uniform(s) => {
                    flags |= WE_HAVE_A_SCALE;
                    vec![F2Dot14::from_f32(s)]
                }
                ComponentScale::XY(x, y) => {
                    flags |= WE_HAVE_AN_X_AND_Y_SCALE;
                    vec![F2Dot14::from_f32(x), F2Dot14::from_f32(y)]
                }
                ComponentScale::TwoByTwo(m) => {
                    flags |= WE_HAVE_A_TWO_BY_TWO;
                    m.iter().map(|v| F2Dot14::from_f32(*v)).collect()
                }
            };
            buf = buf.push(flags).push(component.glyph);
            buf = match (words, component.xy_values) {
                (true, _) => buf.push(component.arg1).push(component.arg2),
                (false, true) => buf.push(component.arg1 as i8).push(component.arg2 as i8),
                (false, false) => buf.push(component.arg1 as u8).push(component.arg2 as u8),
            };
            buf = buf.extend(scale);
        }
        if !self.instructions.is_empty() {
            buf = buf
                .push(self.instructions.len() as u16)
                .extend_bytes(&self.instructions);
        }
        buf.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_uses_short_vectors() {
        let glyph = SimpleGlyphBuilder::new()
            .polygon(&[(0, 0), (0, 100), (100, 100), (100, 0)])
            .build();
        // header, one end point, no instructions
        assert_eq!(&glyph[..14], &[0, 1, 0, 0, 0, 0, 0, 100, 0, 100, 0, 3, 0, 0]);
        // flags: same/same, same/+y, +x/same, same/-y
        assert_eq!(&glyph[14..18], &[0x31, 0x35, 0x33, 0x15]);
        // x deltas, then y deltas
        assert_eq!(&glyph[18..], &[100, 100, 100]);
    }

    #[test]
    fn runs_of_flags_repeat() {
        let glyph = SimpleGlyphBuilder::new()
            .contour(&[(0, 0, true), (0, 0, true), (0, 0, true)])
            .build();
        assert_eq!(&glyph[14..], &[0x39, 2]);
    }

    #[test]
    fn long_deltas() {
        let glyph = SimpleGlyphBuilder::new()
            .contour(&[(1000, -300, false)])
            .build();
        assert_eq!(&glyph[14..], &[0x00, 0x03, 0xe8, 0xfe, 0xd4]);
    }

    #[test]
    fn composite_flags() {
        let glyph = CompositeGlyphBuilder::new()
            .offset(3, 300, -2)
            .transformed(4, 1, 2, ComponentScale::Uniform(0.5))
            .build();
        assert_eq!(&glyph[10..18], &[0x00, 0x23, 0, 3, 0x01, 0x2c, 0xff, 0xfe]);
        assert_eq!(&glyph[18..26], &[0x00, 0x0a, 0, 4, 1, 2, 0x20, 0x00]);
        assert_eq!(glyph.len(), 26);
    }
}
