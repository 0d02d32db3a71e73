//! Variable-width unsigned integers (1 to 4 bytes, big-endian).
//!
//! Record keys and payload lengths are stored with the smallest width that
//! can hold them, so the width itself has to travel on the wire. These
//! helpers are the only place that knows the width boundaries.

use crate::BufferError;

/// Largest width accepted by [`read_uint`] and [`write_uint`].
pub const MAX_UINT_WIDTH: usize = 4;

/// Returns the smallest byte width (1..=4) that can hold `n`.
///
/// # Example
///
/// ```
/// use tasd_buffers::min_uint_width;
///
/// assert_eq!(min_uint_width(255).unwrap(), 1);
/// assert_eq!(min_uint_width(256).unwrap(), 2);
/// assert!(min_uint_width(1 << 32).is_err());
/// ```
pub fn min_uint_width(n: u64) -> Result<usize, BufferError> {
    match n {
        0..=0xFF => Ok(1),
        0x100..=0xFFFF => Ok(2),
        0x1_0000..=0xFF_FFFF => Ok(3),
        0x100_0000..=0xFFFF_FFFF => Ok(4),
        _ => Err(BufferError::UnsupportedWidth(n)),
    }
}

fn check_width(width: usize) -> Result<(), BufferError> {
    if (1..=MAX_UINT_WIDTH).contains(&width) {
        Ok(())
    } else {
        Err(BufferError::UnsupportedWidth(width as u64))
    }
}

fn check_bounds(buf_len: usize, offset: usize, width: usize) -> Result<(), BufferError> {
    let available = buf_len.saturating_sub(offset);
    if available < width {
        return Err(BufferError::EndOfBuffer {
            offset,
            needed: width,
            available,
        });
    }
    Ok(())
}

/// Reads a `width`-byte big-endian unsigned integer at `offset`.
///
/// ```
/// use tasd_buffers::read_uint;
///
/// assert_eq!(read_uint(&[0x01, 0x02, 0x03], 0, 3).unwrap(), 0x010203);
/// assert!(read_uint(&[0x01], 0, 5).is_err());
/// ```
pub fn read_uint(buf: &[u8], offset: usize, width: usize) -> Result<u32, BufferError> {
    check_width(width)?;
    check_bounds(buf.len(), offset, width)?;
    Ok(buf[offset..offset + width]
        .iter()
        .fold(0u32, |acc, &b| (acc << 8) | b as u32))
}

/// Writes the low `width * 8` bits of `value` at `offset`, big-endian.
///
/// Higher bits are dropped. Callers that need the value preserved pick the
/// width with [`min_uint_width`] first.
pub fn write_uint(value: u32, buf: &mut [u8], offset: usize, width: usize) -> Result<(), BufferError> {
    check_width(width)?;
    check_bounds(buf.len(), offset, width)?;
    let bytes = value.to_be_bytes();
    buf[offset..offset + width].copy_from_slice(&bytes[MAX_UINT_WIDTH - width..]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_min_uint_width_boundaries() {
        assert_eq!(min_uint_width(0).unwrap(), 1);
        assert_eq!(min_uint_width(255).unwrap(), 1);
        assert_eq!(min_uint_width(256).unwrap(), 2);
        assert_eq!(min_uint_width(65535).unwrap(), 2);
        assert_eq!(min_uint_width(65536).unwrap(), 3);
        assert_eq!(min_uint_width(16_777_215).unwrap(), 3);
        assert_eq!(min_uint_width(16_777_216).unwrap(), 4);
        assert_eq!(min_uint_width(4_294_967_295).unwrap(), 4);
        assert_eq!(
            min_uint_width(4_294_967_296),
            Err(BufferError::UnsupportedWidth(4_294_967_296))
        );
    }

    #[test]
    fn test_read_uint_widths() {
        let data = [0xFF, 0x01, 0x02, 0x03];
        assert_eq!(read_uint(&data, 0, 1).unwrap(), 0xFF);
        assert_eq!(read_uint(&data, 1, 2).unwrap(), 0x0102);
        assert_eq!(read_uint(&data, 1, 3).unwrap(), 0x010203);
        assert_eq!(read_uint(&data, 0, 4).unwrap(), 0xFF01_0203);
    }

    #[test]
    fn test_read_uint_rejects_bad_width() {
        assert_eq!(read_uint(&[0; 8], 0, 0), Err(BufferError::UnsupportedWidth(0)));
        assert_eq!(read_uint(&[0; 8], 0, 8), Err(BufferError::UnsupportedWidth(8)));
    }

    #[test]
    fn test_read_uint_out_of_bounds() {
        assert_eq!(
            read_uint(&[0x01, 0x02], 1, 2),
            Err(BufferError::EndOfBuffer {
                offset: 1,
                needed: 2,
                available: 1
            })
        );
    }

    #[test]
    fn test_write_uint_truncates() {
        let mut buf = [0u8; 2];
        write_uint(0x0001_0203, &mut buf, 0, 2).unwrap();
        assert_eq!(buf, [0x02, 0x03]);
    }

    #[test]
    fn test_write_uint_rejects_bad_width() {
        let mut buf = [0u8; 8];
        assert!(write_uint(1, &mut buf, 0, 5).is_err());
    }

    proptest! {
        #[test]
        fn proptest_min_width_roundtrip(val in 0u64..=0xFFFF_FFFF) {
            let width = min_uint_width(val).unwrap();
            let mut buf = [0u8; 4];
            write_uint(val as u32, &mut buf, 0, width).unwrap();
            prop_assert_eq!(read_uint(&buf, 0, width).unwrap() as u64, val);
        }

        #[test]
        fn proptest_min_width_is_minimal(val in 0x100u64..=0xFFFF_FFFF) {
            let width = min_uint_width(val).unwrap();
            prop_assert!(val >= 1u64 << (8 * (width - 1)));
        }
    }
}
