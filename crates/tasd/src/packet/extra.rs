//! Free-form extras: comments, the experimental flag and unspecified data.

use std::fmt;

use serde::Serialize;
use tasd_buffers::Writer;

use super::{read_payload, DecodePayload, PacketCodec};
use crate::constants::PacketKey;
use crate::TasdError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentPacket {
    pub comment: String,
}

impl CommentPacket {
    pub fn new(comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
        }
    }
}

impl PacketCodec for CommentPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        self.comment.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.utf8(&self.comment);
        Ok(())
    }
}

impl DecodePayload for CommentPacket {
    const KEY: PacketKey = PacketKey::Comment;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.utf8_rest()?)))
    }
}

impl fmt::Display for CommentPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Comment {}", self.comment)
    }
}

/// Marks a file that uses experimental, non-standard features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExperimentalPacket {
    pub experimental: bool,
}

impl ExperimentalPacket {
    pub fn new(experimental: bool) -> Self {
        Self { experimental }
    }
}

impl PacketCodec for ExperimentalPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        1
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.bool(self.experimental);
        Ok(())
    }
}

impl DecodePayload for ExperimentalPacket {
    const KEY: PacketKey = PacketKey::Experimental;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.bool()?)))
    }
}

impl fmt::Display for ExperimentalPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Experimental {}", self.experimental)
    }
}

/// Opaque data under the reserved `UNSPECIFIED` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnspecifiedPacket {
    pub data: Vec<u8>,
}

impl UnspecifiedPacket {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl PacketCodec for UnspecifiedPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        self.data.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.buf(&self.data);
        Ok(())
    }
}

impl DecodePayload for UnspecifiedPacket {
    const KEY: PacketKey = PacketKey::Unspecified;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        Ok(Self::new(payload.to_vec()))
    }
}

impl fmt::Display for UnspecifiedPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unspecified {} bytes", self.data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_layout() {
        let p = CommentPacket::new("hi");
        assert_eq!(p.encode(2).unwrap(), vec![0xFF, 0x01, 0x01, 0x02, b'h', b'i']);
        assert_eq!(CommentPacket::decode(b"hi").unwrap(), p);
        assert_eq!(p.to_string(), "Comment hi");
    }

    #[test]
    fn test_comment_invalid_utf8_is_malformed() {
        assert!(matches!(
            CommentPacket::decode(&[0x61, 0xC3]),
            Err(TasdError::MalformedPacket { key: 0xFF01, .. })
        ));
    }

    #[test]
    fn test_experimental_flag() {
        let p = ExperimentalPacket::new(true);
        assert_eq!(p.encode(2).unwrap(), vec![0xFF, 0xFE, 0x01, 0x01, 0x01]);
        assert_eq!(ExperimentalPacket::decode(&[0x02]).unwrap(), p);
        assert!(!ExperimentalPacket::decode(&[0x00]).unwrap().experimental);
        assert!(ExperimentalPacket::decode(&[]).is_err());
    }

    #[test]
    fn test_unspecified_is_opaque() {
        let p = UnspecifiedPacket::decode(&[0x00, 0xFF, 0x10]).unwrap();
        assert_eq!(p.data, vec![0x00, 0xFF, 0x10]);
        assert_eq!(p.payload_size(), 3);
        assert_eq!(p.to_string(), "Unspecified 3 bytes");
    }
}
