//! SNES-specific packets.

use std::fmt;

use serde::Serialize;
use tasd_buffers::{BufferError, Writer};

use super::{read_payload, DecodePayload, PacketCodec};
use crate::constants::PacketKey;
use crate::TasdError;

/// Clock filter time, in units of 0.25 microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnesClockFilterPacket {
    pub time: u8,
}

impl SnesClockFilterPacket {
    pub fn new(time: u8) -> Self {
        Self { time }
    }
}

impl PacketCodec for SnesClockFilterPacket {
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

impl DecodePayload for SnesClockFilterPacket {
    const KEY: PacketKey = PacketKey::SnesClockFilter;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.u8()?)))
    }
}

impl fmt::Display for SnesClockFilterPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SnesClockFilter {}", self.time)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnesOverreadPacket {
    pub high: bool,
}

impl SnesOverreadPacket {
    pub fn new(high: bool) -> Self {
        Self { high }
    }
}

impl PacketCodec for SnesOverreadPacket {
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

impl DecodePayload for SnesOverreadPacket {
    const KEY: PacketKey = PacketKey::SnesOverread;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.bool()?)))
    }
}

impl fmt::Display for SnesOverreadPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SnesOverread high={}", self.high)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnesGameGenieCodePacket {
    pub code: String,
}

impl SnesGameGenieCodePacket {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

impl PacketCodec for SnesGameGenieCodePacket {
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

impl DecodePayload for SnesGameGenieCodePacket {
    const KEY: PacketKey = PacketKey::SnesGameGenieCode;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.utf8_rest()?)))
    }
}

impl fmt::Display for SnesGameGenieCodePacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SnesGameGenieCode {}", self.code)
    }
}

/// Latch trains: the number of latches per frame, one u64 per train.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnesLatchTrainPacket {
    pub trains: Vec<u64>,
}

impl SnesLatchTrainPacket {
    pub fn new(trains: Vec<u64>) -> Self {
        Self { trains }
    }
}

impl PacketCodec for SnesLatchTrainPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        self.trains.len() * 8
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        for &train in &self.trains {
            writer.u64(train);
        }
        Ok(())
    }
}

impl DecodePayload for SnesLatchTrainPacket {
    const KEY: PacketKey = PacketKey::SnesLatchTrain;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| {
            if r.remaining() % 8 != 0 {
                // A partial trailing train is a short read of its last u64.
                return Err(BufferError::EndOfBuffer {
                    offset: payload.len() - payload.len() % 8,
                    needed: 8,
                    available: payload.len() % 8,
                });
            }
            let mut trains = Vec::with_capacity(r.remaining() / 8);
            while !r.is_empty() {
                trains.push(r.u64()?);
            }
            Ok(Self::new(trains))
        })
    }
}

impl fmt::Display for SnesLatchTrainPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SnesLatchTrain {} trains", self.trains.len())
    }
}
