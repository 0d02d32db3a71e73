//! Genesis-specific packets.

use std::fmt;

use serde::Serialize;
use tasd_buffers::Writer;

use super::{read_payload, DecodePayload, PacketCodec};
use crate::constants::PacketKey;
use crate::TasdError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenesisGameGenieCodePacket {
    pub code: String,
}

impl GenesisGameGenieCodePacket {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl PacketCodec for GenesisGameGenieCodePacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        self.code.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.utf8(&self.code);
        Ok(())
    }
}

impl DecodePayload for GenesisGameGenieCodePacket {
    const KEY: PacketKey = PacketKey::GenesisGameGenieCode;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.utf8_rest()?)))
    }
}

impl fmt::Display for GenesisGameGenieCodePacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GenesisGameGenieCode {}", self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_genie_code_layout() {
        let p = GenesisGameGenieCodePacket::new("RFAA-A6VR");
        let bytes = p.encode(2).unwrap();
        assert_eq!(&bytes[..4], &[0x08, 0x04, 0x01, 9]);
        assert_eq!(&bytes[4..], b"RFAA-A6VR");
        assert_eq!(GenesisGameGenieCodePacket::decode(&bytes[4..]).unwrap(), p);
        assert_eq!(p.to_string(), "GenesisGameGenieCode RFAA-A6VR");
    }

    #[test]
    fn test_empty_code() {
        assert!(GenesisGameGenieCodePacket::decode(&[]).unwrap().code.is_empty());
    }
}
