//! Binary buffer reader with cursor tracking.

use std::str;

use crate::{read_uint, BufferError};

/// A binary buffer reader over a borrowed byte slice.
///
/// The reader maintains a cursor position. Every read is bounds checked and
/// fails with [`BufferError::EndOfBuffer`] rather than panicking, so a short
/// payload surfaces as an error at the call site.
///
/// # Example
///
/// ```
/// use tasd_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8().unwrap(), 0x01);
/// assert_eq!(reader.u16().unwrap(), 0x0203);
/// assert!(reader.u16().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader positioned at the start of `uint8`.
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Creates a reader positioned at `x`.
    pub fn at(uint8: &'a [u8], x: usize) -> Self {
        Self { uint8, x }
    }

    /// Returns the number of remaining bytes.
    pub fn remaining(&self) -> usize {
        self.uint8.len().saturating_sub(self.x)
    }

    /// Returns `true` when the cursor has reached the end.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn assert_size(&self, needed: usize) -> Result<(), BufferError> {
        let available = self.remaining();
        if needed > available {
            return Err(BufferError::EndOfBuffer {
                offset: self.x,
                needed,
                available,
            });
        }
        Ok(())
    }

    /// Advances the cursor by the given number of bytes.
    pub fn skip(&mut self, length: usize) -> Result<(), BufferError> {
        self.assert_size(length)?;
        self.x += length;
        Ok(())
    }

    /// Returns a subslice of the given size and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.assert_size(size)?;
        let x = self.x;
        self.x += size;
        Ok(&self.uint8[x..x + size])
    }

    /// Returns everything after the cursor and moves it to the end.
    pub fn rest(&mut self) -> &'a [u8] {
        let x = self.x.min(self.uint8.len());
        self.x = self.uint8.len();
        &self.uint8[x..]
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        self.assert_size(1)?;
        let val = self.uint8[self.x];
        self.x += 1;
        Ok(val)
    }

    /// Reads a one-byte boolean: zero is `false`, anything else `true`.
    #[inline]
    pub fn bool(&mut self) -> Result<bool, BufferError> {
        Ok(self.u8()? != 0)
    }

    /// Reads an unsigned 16-bit integer (big-endian).
    #[inline]
    pub fn u16(&mut self) -> Result<u16, BufferError> {
        self.assert_size(2)?;
        let x = self.x;
        let val = ((self.uint8[x] as u16) << 8) | (self.uint8[x + 1] as u16);
        self.x += 2;
        Ok(val)
    }

    /// Reads an unsigned 32-bit integer (big-endian).
    #[inline]
    pub fn u32(&mut self) -> Result<u32, BufferError> {
        let val = read_uint(self.uint8, self.x, 4)?;
        self.x += 4;
        Ok(val)
    }

    /// Reads an unsigned 64-bit integer (big-endian).
    ///
    /// The value is assembled from two 32-bit halves, high word first.
    #[inline]
    pub fn u64(&mut self) -> Result<u64, BufferError> {
        self.assert_size(8)?;
        let high = self.u32()? as u64;
        let low = self.u32()? as u64;
        Ok((high << 32) | low)
    }

    /// Reads a `width`-byte (1..=4) big-endian unsigned integer.
    pub fn uint(&mut self, width: usize) -> Result<u32, BufferError> {
        let val = read_uint(self.uint8, self.x, width)?;
        self.x += width;
        Ok(val)
    }

    /// Reads a UTF-8 string of the given byte length.
    pub fn utf8(&mut self, size: usize) -> Result<&'a str, BufferError> {
        let start = self.x;
        let bytes = self.buf(size)?;
        str::from_utf8(bytes).map_err(|e| BufferError::InvalidUtf8(start + e.valid_up_to()))
    }

    /// Reads the rest of the buffer as a UTF-8 string.
    pub fn utf8_rest(&mut self) -> Result<&'a str, BufferError> {
        let size = self.remaining();
        self.utf8(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u8().unwrap(), 0x01);
        assert_eq!(reader.u8().unwrap(), 0x02);
        assert_eq!(reader.u8().unwrap(), 0x03);
        assert!(reader.u8().is_err());
    }

    #[test]
    fn test_u16() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u16().unwrap(), 0x0102);
        assert_eq!(reader.u16().unwrap(), 0x0304);
    }

    #[test]
    fn test_u32() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u32().unwrap(), 0x01020304);
    }

    #[test]
    fn test_u64_high_bit() {
        let data = [0xFF, 0xFF, 0xFF, 0xFF, 0x80, 0x00, 0x00, 0x01];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u64().unwrap(), 0xFFFF_FFFF_8000_0001);
    }

    #[test]
    fn test_u64_short_leaves_cursor() {
        let data = [0x00; 7];
        let mut reader = Reader::new(&data);
        assert_eq!(
            reader.u64(),
            Err(BufferError::EndOfBuffer {
                offset: 0,
                needed: 8,
                available: 7
            })
        );
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_skip() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        reader.skip(2).unwrap();
        assert_eq!(reader.u8().unwrap(), 0x03);
        assert!(reader.skip(2).is_err());
    }

    #[test]
    fn test_rest() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        reader.u8().unwrap();
        assert_eq!(reader.rest(), &[0x02, 0x03]);
        assert!(reader.is_empty());
        assert_eq!(reader.rest(), &[] as &[u8]);
    }

    #[test]
    fn test_utf8() {
        let data = b"hello world";
        let mut reader = Reader::new(data);
        assert_eq!(reader.utf8(5).unwrap(), "hello");
        assert_eq!(reader.utf8_rest().unwrap(), " world");
    }

    #[test]
    fn test_utf8_invalid() {
        let data = [b'a', 0xFF];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.utf8(2), Err(BufferError::InvalidUtf8(1)));
    }
}
