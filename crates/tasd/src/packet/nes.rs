//! NES-specific packets.

use std::fmt;

use serde::Serialize;
use tasd_buffers::Writer;

use super::{read_payload, DecodePayload, PacketCodec};
use crate::constants::PacketKey;
use crate::TasdError;

/// Latch filter time, in units of 0.1 microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NesLatchFilterPacket {
    pub time: u16,
}

impl NesLatchFilterPacket {
    pub fn new(time: u16) -> Self {
        Self { time }
    }
}

impl PacketCodec for NesLatchFilterPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        2
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.u16(self.time);
        Ok(())
    }
}

impl DecodePayload for NesLatchFilterPacket {
    const KEY: PacketKey = PacketKey::NesLatchFilter;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.u16()?)))
    }
}

impl fmt::Display for NesLatchFilterPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NesLatchFilter {}", self.time)
    }
}

/// Clock filter time, in units of 0.25 microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NesClockFilterPacket {
    pub time: u8,
}

impl NesClockFilterPacket {
    pub fn new(time: u8) -> Self {
        Self { time }
    }
}

impl PacketCodec for NesClockFilterPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        1
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.u8(self.time);
        Ok(())
    }
}

impl DecodePayload for NesClockFilterPacket {
    const KEY: PacketKey = PacketKey::NesClockFilter;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.u8()?)))
    }
}

impl fmt::Display for NesClockFilterPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NesClockFilter {}", self.time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NesOverreadPacket {
    pub high: bool,
}

impl NesOverreadPacket {
    pub fn new(high: bool) -> Self {
        Self { high }
    }
}

impl PacketCodec for NesOverreadPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        1
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.bool(self.high);
        Ok(())
    }
}

impl DecodePayload for NesOverreadPacket {
    const KEY: PacketKey = PacketKey::NesOverread;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.bool()?)))
    }
}

impl fmt::Display for NesOverreadPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NesOverread high={}", self.high)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NesGameGenieCodePacket {
    pub code: String,
}

impl NesGameGenieCodePacket {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl PacketCodec for NesGameGenieCodePacket {
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

impl DecodePayload for NesGameGenieCodePacket {
    const KEY: PacketKey = PacketKey::NesGameGenieCode;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.utf8_rest()?)))
    }
}

impl fmt::Display for NesGameGenieCodePacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NesGameGenieCode {}", self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_filter_big_endian() {
        let p = NesLatchFilterPacket::decode(&[0x01, 0x2C]).unwrap();
        assert_eq!(p.time, 300);
        assert_eq!(p.encode(2).unwrap(), vec![0x01, 0x01, 0x01, 0x02, 0x01, 0x2C]);
    }

    #[test]
    fn test_game_genie_code() {
        let p = NesGameGenieCodePacket::decode(b"SXIOPO").unwrap();
        assert_eq!(p.code, "SXIOPO");
        assert_eq!(p.to_string(), "NesGameGenieCode SXIOPO");
    }

    #[test]
    fn test_overread_empty_is_malformed() {
        assert!(NesOverreadPacket::decode(&[]).is_err());
    }
}
