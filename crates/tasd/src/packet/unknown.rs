//! Passthrough for keys without a registered variant.

use std::fmt;

use serde::Serialize;
use tasd_buffers::{print_octets_default, Writer};

use super::PacketCodec;
use crate::constants::packet_name;
use crate::TasdError;

/// A record whose key this crate does not know. The payload is kept as-is
/// so the record re-encodes byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownPacket {
    pub key: u16,
    pub payload: Vec<u8>,
}

impl UnknownPacket {
    /// Accepts any key. Container logic looks at keys, not variants, so an
    /// `UnknownPacket` under a registered key counts as that packet type, and
    /// it is read back from the wire as the typed variant (or rejected as
    /// malformed when the payload does not fit it).
    pub fn new(key: u16, payload: Vec<u8>) -> Self {
        Self { key, payload }
    }
}

impl PacketCodec for UnknownPacket {
    fn key(&self) -> u16 {
        self.key
    }
    fn payload_size(&self) -> usize {
        self.payload.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.buf(&self.payload);
        Ok(())
    }
}

impl fmt::Display for UnknownPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} bytes: {}",
            packet_name(self.key),
            self.payload.len(),
            print_octets_default(&self.payload)
        )
    }
}
