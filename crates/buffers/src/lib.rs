//! Binary buffer utilities for the TASD container format.
//!
//! Everything in a TASD file is big-endian and unsigned. This crate holds the
//! pieces shared by every packet codec:
//!
//! - [`min_uint_width`], [`read_uint`], [`write_uint`] - the 1 to 4 byte
//!   variable-width integers used for record keys and payload lengths
//! - [`Reader`] - bounds-checked cursor over a borrowed byte slice
//! - [`Writer`] - append-only output buffer, sized up front
//! - [`print_octets`] - short hex rendering for diagnostics
//!
//! # Example
//!
//! ```
//! use tasd_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::with_capacity(8);
//! writer.u8(0x01);
//! writer.u16(0x0203);
//! writer.utf8("hello");
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8().unwrap(), 0x01);
//! assert_eq!(reader.u16().unwrap(), 0x0203);
//! assert_eq!(reader.utf8(5).unwrap(), "hello");
//! ```

mod print_octets;
mod reader;
mod uint;
mod writer;

pub use print_octets::{print_octets, print_octets_default, DEFAULT_OCTETS};
pub use reader::Reader;
pub use uint::{min_uint_width, read_uint, write_uint, MAX_UINT_WIDTH};
pub use writer::Writer;

use thiserror::Error;

/// Error type for buffer operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    #[error("end of buffer: needed {needed} bytes at offset {offset}, {available} available")]
    EndOfBuffer {
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// Integer width outside 1..=4, or a value too large for any of them.
    #[error("unsupported uint size: {0}")]
    UnsupportedWidth(u64),
    /// Invalid UTF-8 sequence.
    #[error("invalid UTF-8 sequence at offset {0}")]
    InvalidUtf8(usize),
}
