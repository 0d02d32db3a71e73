//! Append-only binary buffer writer.

use crate::{write_uint, BufferError, MAX_UINT_WIDTH};

/// A binary buffer writer.
///
/// Output sizes in the TASD format are always known before encoding starts
/// (every length prefix depends on them), so the writer is usually created
/// with [`Writer::with_capacity`] and never reallocates.
#[derive(Debug, Default, Clone)]
pub struct Writer {
    /// The bytes written so far.
    pub uint8: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            uint8: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        self.uint8.len()
    }

    /// Returns `true` when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    /// Clears the written bytes, keeping the allocation.
    pub fn reset(&mut self) {
        self.uint8.clear();
    }

    /// Takes the written bytes, leaving the writer empty.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.uint8)
    }

    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.uint8.push(val);
    }

    /// Writes a boolean as exactly `0` or `1`.
    #[inline]
    pub fn bool(&mut self, val: bool) {
        self.uint8.push(val as u8);
    }

    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.uint8.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a 64-bit value as two big-endian 32-bit halves, high word first.
    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.u32((val >> 32) as u32);
        self.u32(val as u32);
    }

    /// Writes the low `width` bytes (1..=4) of `val`, big-endian.
    pub fn uint(&mut self, val: u32, width: usize) -> Result<(), BufferError> {
        let mut tmp = [0u8; MAX_UINT_WIDTH];
        write_uint(val, &mut tmp, 0, width)?;
        self.uint8.extend_from_slice(&tmp[..width]);
        Ok(())
    }

    /// Appends raw bytes.
    pub fn buf(&mut self, data: &[u8]) {
        self.uint8.extend_from_slice(data);
    }

    /// Appends the UTF-8 bytes of `s`.
    pub fn utf8(&mut self, s: &str) {
        self.uint8.extend_from_slice(s.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_width() {
        let mut w = Writer::new();
        w.u8(0xAB);
        w.u16(0x0102);
        w.u32(0x0304_0506);
        assert_eq!(w.flush(), vec![0xAB, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        assert!(w.is_empty());
    }

    #[test]
    fn test_u64() {
        let mut w = Writer::new();
        w.u64(0x0102_0304_0506_0708);
        assert_eq!(w.flush(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_uint_width_3() {
        let mut w = Writer::new();
        w.uint(0x0A0B0C, 3).unwrap();
        assert_eq!(w.flush(), vec![0x0A, 0x0B, 0x0C]);
    }

    #[test]
    fn test_uint_bad_width_writes_nothing() {
        let mut w = Writer::new();
        assert_eq!(w.uint(1, 0), Err(BufferError::UnsupportedWidth(0)));
        assert!(w.is_empty());
    }

    #[test]
    fn test_bool_is_zero_or_one() {
        let mut w = Writer::new();
        w.bool(true);
        w.bool(false);
        assert_eq!(w.flush(), vec![1, 0]);
    }
}
