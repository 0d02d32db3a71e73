//! TASD codec error type.

use tasd_buffers::BufferError;
use thiserror::Error;

use crate::constants::packet_name;

/// Errors raised while parsing or serializing a TASD file.
///
/// Every variant aborts the call in progress. Unknown packet keys are not
/// errors; they decode to [`UnknownPacket`](crate::UnknownPacket).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TasdError {
    #[error("invalid magic bytes: not a TASD file")]
    InvalidMagic,
    #[error("unsupported version {0}")]
    UnsupportedVersion(u16),
    #[error("unsupported key width {0}")]
    UnsupportedKeyWidth(u8),
    /// The header or a record is shorter than its declared field widths.
    #[error("truncated input: needed {needed} bytes at offset {offset}, {available} available")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// A record is well framed but its payload does not fit the variant.
    #[error("malformed {} packet: {reason}", packet_name(*key))]
    MalformedPacket { key: u16, reason: String },
    /// An integer width outside 1..=4, or a length too large for 4 bytes.
    #[error("unsupported uint size: {0}")]
    UnsupportedWidth(u64),
    /// A field with a one-byte length prefix is longer than 255 bytes.
    #[error("{field} is {len} bytes long, at most {max} fit")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

impl TasdError {
    pub(crate) fn malformed(key: impl Into<u16>, err: BufferError) -> Self {
        TasdError::MalformedPacket {
            key: key.into(),
            reason: err.to_string(),
        }
    }
}

/// Framing-level conversion: a short read while walking records is
/// truncation, not a malformed payload.
impl From<BufferError> for TasdError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer {
                offset,
                needed,
                available,
            } => TasdError::TruncatedInput {
                offset,
                needed,
                available,
            },
            BufferError::UnsupportedWidth(width) => TasdError::UnsupportedWidth(width),
            BufferError::InvalidUtf8(offset) => TasdError::MalformedPacket {
                key: 0,
                reason: format!("invalid UTF-8 at offset {offset}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_error_maps_to_truncation() {
        let err: TasdError = BufferError::EndOfBuffer {
            offset: 9,
            needed: 2,
            available: 1,
        }
        .into();
        assert_eq!(
            err,
            TasdError::TruncatedInput {
                offset: 9,
                needed: 2,
                available: 1
            }
        );
    }

    #[test]
    fn test_malformed_message_names_packet() {
        let err = TasdError::malformed(0x000Du16, BufferError::UnsupportedWidth(7));
        assert_eq!(
            err.to_string(),
            "malformed TOTAL_FRAMES packet: unsupported uint size: 7"
        );
    }
}
