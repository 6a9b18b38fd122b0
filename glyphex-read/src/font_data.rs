//! raw font bytes

use std::ops::{Bound, Range, RangeBounds};

use types::{BigEndian, F2Dot14, Scalar};

use crate::read::ReadError;

/// A reference to raw binary font data.
///
/// This is a wrapper around a byte slice, that provides convenience methods
/// for parsing and validating that data. Copying it never copies the bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    bytes: &'a [u8],
}

/// A read position over some [`FontData`].
///
/// Seeking is never validated; a read that would run past the end of the
/// data fails with [`ReadError::OutOfBounds`] instead. Cloning a cursor
/// yields an independent position over the same bytes.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    pos: usize,
    data: FontData<'a>,
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData { bytes }
    }

    /// The length of the data, in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn split_off(&self, pos: usize) -> Option<FontData<'a>> {
        self.bytes.get(pos..).map(FontData::new)
    }

    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<FontData<'a>> {
        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        self.bytes.get(bounds).map(FontData::new)
    }

    /// Returns the data in `offset..offset + len`, or an error if any of it
    /// is out of bounds.
    pub fn slice_len(&self, offset: usize, len: usize) -> Result<FontData<'a>, ReadError> {
        let end = offset.checked_add(len).ok_or(ReadError::OutOfBounds)?;
        self.slice(offset..end).ok_or(ReadError::OutOfBounds)
    }

    pub fn read_at<T: Scalar>(&self, offset: usize) -> Result<T, ReadError> {
        let end = offset
            .checked_add(T::RAW_BYTE_LEN)
            .ok_or(ReadError::OutOfBounds)?;
        self.bytes
            .get(offset..end)
            .and_then(T::read)
            .ok_or(ReadError::OutOfBounds)
    }

    /// Borrow an array of big-endian values without copying.
    pub fn read_array<T>(&self, range: Range<usize>) -> Result<&'a [BigEndian<T>], ReadError>
    where
        T: Scalar + Copy + 'static,
    {
        let bytes = self.bytes.get(range).ok_or(ReadError::OutOfBounds)?;
        bytemuck::try_cast_slice(bytes).map_err(|_| ReadError::OutOfBounds)
    }

    /// A cursor positioned at the start of the data.
    pub fn cursor(&self) -> Cursor<'a> {
        Cursor {
            pos: 0,
            data: *self,
        }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> Cursor<'a> {
    /// Move to an absolute position. Not validated until the next read.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub fn advance_by(&mut self, n_bytes: usize) {
        self.pos = self.pos.saturating_add(n_bytes);
    }

    /// The current absolute position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The length of the underlying data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining_bytes(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn read<T: Scalar>(&mut self) -> Result<T, ReadError> {
        let temp = self.data.read_at(self.pos);
        self.pos = self.pos.saturating_add(T::RAW_BYTE_LEN);
        temp
    }

    pub fn read_u8(&mut self) -> Result<u8, ReadError> {
        self.read()
    }

    pub fn read_i8(&mut self) -> Result<i8, ReadError> {
        self.read()
    }

    pub fn read_u16(&mut self) -> Result<u16, ReadError> {
        self.read()
    }

    pub fn read_i16(&mut self) -> Result<i16, ReadError> {
        self.read()
    }

    pub fn read_u32(&mut self) -> Result<u32, ReadError> {
        self.read()
    }

    pub fn read_i32(&mut self) -> Result<i32, ReadError> {
        self.read()
    }

    pub fn read_u64(&mut self) -> Result<u64, ReadError> {
        self.read()
    }

    pub fn read_i64(&mut self) -> Result<i64, ReadError> {
        self.read()
    }

    /// An IEEE-754 single precision float, big-endian.
    pub fn read_f32(&mut self) -> Result<f32, ReadError> {
        self.read()
    }

    pub fn read_f2dot14(&mut self) -> Result<F2Dot14, ReadError> {
        self.read()
    }

    pub fn read_u16_le(&mut self) -> Result<u16, ReadError> {
        self.read::<u16>().map(u16::swap_bytes)
    }

    pub fn read_u32_le(&mut self) -> Result<u32, ReadError> {
        self.read::<u32>().map(u32::swap_bytes)
    }

    /// Borrow the next `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ReadError> {
        let temp = self.data.slice_len(self.pos, len).map(|d| d.as_bytes());
        self.pos = self.pos.saturating_add(len);
        temp
    }

    /// Borrow the next `len` big-endian values.
    pub fn read_array<T>(&mut self, len: usize) -> Result<&'a [BigEndian<T>], ReadError>
    where
        T: Scalar + Copy + 'static,
    {
        let n_bytes = len.saturating_mul(T::RAW_BYTE_LEN);
        let end = self.pos.saturating_add(n_bytes);
        let temp = self.data.read_array(self.pos..end);
        self.pos = end;
        temp
    }

    /// A fixed-length string of single byte characters.
    pub fn read_ascii(&mut self, len: usize) -> Result<String, ReadError> {
        self.read_bytes(len)
            .map(|bytes| bytes.iter().map(|b| *b as char).collect())
    }

    /// Single byte characters up to (and consuming) a zero byte.
    pub fn read_ascii_zero_terminated(&mut self) -> Result<String, ReadError> {
        let mut result = String::new();
        loop {
            match self.read_u8()? {
                0 => return Ok(result),
                byte => result.push(byte as char),
            }
        }
    }

    /// `n_units` UTF-16 code units, big-endian.
    ///
    /// Unpaired surrogates decode to U+FFFD.
    pub fn read_utf16_be(&mut self, n_units: usize) -> Result<String, ReadError> {
        let units = self.read_array::<u16>(n_units)?;
        Ok(char::decode_utf16(units.iter().map(BigEndian::get))
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect())
    }
}

impl AsRef<[u8]> for FontData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for FontData<'a> {
    fn from(src: &'a [u8]) -> FontData<'a> {
        FontData::new(src)
    }
}
