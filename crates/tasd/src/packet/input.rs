//! Input and timing packets (keys `0xFE01`..=`0xFE05`).
//!
//! A file stores its inputs either as chunks (a raw run of samples per port)
//! or as moments (single samples anchored to a timeline index), never both.
//! Input bytes are console specific and opaque here.

use std::fmt;

use serde::Serialize;
use tasd_buffers::{print_octets_default, Writer};

use super::{read_payload, DecodePayload, PacketCodec};
use crate::constants::{label, IndexType, PacketKey, TransitionType};
use crate::TasdError;

/// A contiguous run of raw input samples for one port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputChunkPacket {
    pub port: u8,
    pub inputs: Vec<u8>,
}

impl InputChunkPacket {
    pub fn new(port: u8, inputs: Vec<u8>) -> Self {
        Self { port, inputs }
    }
}

impl PacketCodec for InputChunkPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        1 + self.inputs.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.u8(self.port);
        writer.buf(&self.inputs);
        Ok(())
    }
}

impl DecodePayload for InputChunkPacket {
    const KEY: PacketKey = PacketKey::InputChunk;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| {
            let port = r.u8()?;
            Ok(Self::new(port, r.rest().to_vec()))
        })
    }
}

impl fmt::Display for InputChunkPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InputChunk {}, {} bytes",
            self.port,
            self.inputs.len()
        )
    }
}

/// A single input sample at a point on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputMomentPacket {
    pub port: u8,
    /// Whether the input is held until the next moment for this port.
    pub hold: bool,
    pub index_type: u8,
    pub index: u64,
    pub inputs: Vec<u8>,
}

impl InputMomentPacket {
    pub fn new(port: u8, hold: bool, index_type: u8, index: u64, inputs: Vec<u8>) -> Self {
        Self {
            port,
            hold,
            index_type,
            index,
            inputs,
        }
    }
}

impl PacketCodec for InputMomentPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        11 + self.inputs.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.u8(self.port);
        writer.bool(self.hold);
        writer.u8(self.index_type);
        writer.u64(self.index);
        writer.buf(&self.inputs);
        Ok(())
    }
}

impl DecodePayload for InputMomentPacket {
    const KEY: PacketKey = PacketKey::InputMoment;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| {
            let port = r.u8()?;
            let hold = r.bool()?;
            let index_type = r.u8()?;
            let index = r.u64()?;
            Ok(Self::new(port, hold, index_type, index, r.rest().to_vec()))
        })
    }
}

impl fmt::Display for InputMomentPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InputMoment {}, hold={}, {} {}, {}",
            self.port,
            self.hold,
            label::<IndexType, u8>(self.index_type),
            self.index,
            print_octets_default(&self.inputs)
        )
    }
}

/// A console transition (reset, power cycle, ...) at a point on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionPacket {
    pub index_type: u8,
    pub port: u8,
    pub index: u64,
    pub transition: u8,
    /// Extra data; for [`TransitionType::PacketDerived`] an embedded packet.
    pub data: Vec<u8>,
}

impl TransitionPacket {
    pub fn new(index_type: u8, port: u8, index: u64, transition: u8, data: Vec<u8>) -> Self {
        Self {
            index_type,
            port,
            index,
            transition,
            data,
        }
    }
}

impl PacketCodec for TransitionPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        11 + self.data.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.u8(self.index_type);
        writer.u8(self.port);
        writer.u64(self.index);
        writer.u8(self.transition);
        writer.buf(&self.data);
        Ok(())
    }
}

impl DecodePayload for TransitionPacket {
    const KEY: PacketKey = PacketKey::Transition;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| {
            let index_type = r.u8()?;
            let port = r.u8()?;
            let index = r.u64()?;
            let transition = r.u8()?;
            Ok(Self::new(index_type, port, index, transition, r.rest().to_vec()))
        })
    }
}

impl fmt::Display for TransitionPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transition {}, port {}, {} {}, {} bytes",
            label::<TransitionType, u8>(self.transition),
            self.port,
            label::<IndexType, u8>(self.index_type),
            self.index,
            self.data.len()
        )
    }
}

/// `count` consecutive lag frames starting at `frame`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LagFrameChunkPacket {
    pub frame: u32,
    pub count: u32,
}

impl LagFrameChunkPacket {
    pub fn new(frame: u32, count: u32) -> Self {
        Self { frame, count }
    }
}

impl PacketCodec for LagFrameChunkPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        8
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.u32(self.frame);
        writer.u32(self.count);
        Ok(())
    }
}

impl DecodePayload for LagFrameChunkPacket {
    const KEY: PacketKey = PacketKey::LagFrameChunk;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| {
            let frame = r.u32()?;
            Ok(Self::new(frame, r.u32()?))
        })
    }
}

impl fmt::Display for LagFrameChunkPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LagFrameChunk {}, {}", self.frame, self.count)
    }
}

/// A transition recorded by the emulator's movie, indexed by frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieTransitionPacket {
    pub frame: u32,
    pub transition: u8,
    pub data: Vec<u8>,
}

impl MovieTransitionPacket {
    pub fn new(frame: u32, transition: u8, data: Vec<u8>) -> Self {
        Self {
            frame,
            transition,
            data,
        }
    }
}

impl PacketCodec for MovieTransitionPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        5 + self.data.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.u32(self.frame);
        writer.u8(self.transition);
        writer.buf(&self.data);
        Ok(())
    }
}

impl DecodePayload for MovieTransitionPacket {
    const KEY: PacketKey = PacketKey::MovieTransition;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| {
            let frame = r.u32()?;
            let transition = r.u8()?;
            Ok(Self::new(frame, transition, r.rest().to_vec()))
        })
    }
}

impl fmt::Display for MovieTransitionPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MovieTransition {}, {}, {} bytes",
            self.frame,
            label::<TransitionType, u8>(self.transition),
            self.data.len()
        )
    }
}
