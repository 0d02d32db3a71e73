//! The TASD container: header plus an ordered packet list.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tasd_buffers::{Reader, Writer};

use crate::clock::{Clock, SystemClock};
use crate::constants::{
    PacketKey, HEADER_SIZE, MAGIC, SUPPORTED_KEY_WIDTH, SUPPORTED_VERSION,
};
use crate::packet::{DumpLastModifiedPacket, InputChunkPacket, Packet};
use crate::registry;
use crate::TasdError;

/// A whole TASD file held in memory.
///
/// Packets are kept in wire order. Every mutation marks the container dirty;
/// the next [`Tasd::to_buffer`] then replaces any `DUMP_LAST_MODIFIED`
/// packets with one stamped with the current time.
///
/// ```
/// use tasd::{FixedClock, GameTitlePacket, Packet, Tasd};
///
/// let mut tasd = Tasd::new();
/// tasd.push(Packet::GameTitle(GameTitlePacket::new("Super Mario Bros.")));
/// let bytes = tasd.to_buffer_with(&FixedClock(0)).unwrap();
///
/// let parsed = Tasd::parse_file(&bytes).unwrap();
/// assert_eq!(parsed.packets().len(), 2);
/// assert!(!tasd.is_dirty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tasd {
    version: u16,
    key_width: u8,
    packets: Vec<Packet>,
    #[serde(skip)]
    dirty: bool,
}

impl Default for Tasd {
    fn default() -> Self {
        Self::new()
    }
}

impl Tasd {
    /// An empty, clean container with the supported header.
    pub fn new() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            key_width: SUPPORTED_KEY_WIDTH,
            packets: Vec::new(),
            dirty: false,
        }
    }

    /// An empty container with an explicit header, validated the same way
    /// [`Tasd::parse_file`] validates one.
    pub fn with_header(version: u16, key_width: u8) -> Result<Self, TasdError> {
        check_header(version, key_width)?;
        Ok(Self {
            version,
            key_width,
            ..Self::new()
        })
    }

    /// Parses a complete file. Any malformed record aborts the whole parse.
    pub fn parse_file(buf: &[u8]) -> Result<Self, TasdError> {
        if buf.len() < HEADER_SIZE {
            return Err(TasdError::TruncatedInput {
                offset: 0,
                needed: HEADER_SIZE,
                available: buf.len(),
            });
        }
        let mut reader = Reader::new(buf);
        if reader.buf(MAGIC.len())? != MAGIC.as_slice() {
            return Err(TasdError::InvalidMagic);
        }
        let version = reader.u16()?;
        let key_width = reader.u8()?;
        check_header(version, key_width)?;

        let mut packets = Vec::new();
        while !reader.is_empty() {
            let offset = reader.x;
            let key = reader.uint(key_width as usize)? as u16;
            let pexp = reader.u8()? as usize;
            let plen = reader.uint(pexp)? as usize;
            let payload = reader.buf(plen)?;
            tracing::trace!(offset, key, plen, "framed record");
            packets.push(registry::decode(key, payload)?);
        }
        tracing::debug!(version, packets = packets.len(), "parsed TASD file");

        Ok(Self {
            version,
            key_width,
            packets,
            dirty: false,
        })
    }

    pub fn version(&self) -> u16 {
        self.version
    }

    pub fn key_width(&self) -> u8 {
        self.key_width
    }

    pub fn packets(&self) -> &[Packet] {
        &self.packets
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn push(&mut self, packet: Packet) {
        self.packets.push(packet);
        self.dirty = true;
    }

    /// Inserts at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, like [`Vec::insert`].
    pub fn insert(&mut self, index: usize, packet: Packet) {
        self.packets.insert(index, packet);
        self.dirty = true;
    }

    /// Removes and returns the packet at `index`, if there is one.
    pub fn remove(&mut self, index: usize) -> Option<Packet> {
        if index >= self.packets.len() {
            return None;
        }
        self.dirty = true;
        Some(self.packets.remove(index))
    }

    /// Swaps in `packet` at `index` and returns the old one.
    pub fn replace(&mut self, index: usize, packet: Packet) -> Option<Packet> {
        let slot = self.packets.get_mut(index)?;
        self.dirty = true;
        Some(std::mem::replace(slot, packet))
    }

    pub fn retain(&mut self, f: impl FnMut(&Packet) -> bool) {
        self.packets.retain(f);
        self.dirty = true;
    }

    /// Direct access to the list. Marks the container dirty up front.
    pub fn packets_mut(&mut self) -> &mut Vec<Packet> {
        self.dirty = true;
        &mut self.packets
    }

    /// First packet with the given key.
    pub fn find(&self, key: impl Into<u16>) -> Option<&Packet> {
        let key = key.into();
        self.packets.iter().find(|p| p.key() == key)
    }

    /// Every packet with the given key, in list order.
    pub fn iter_key(&self, key: impl Into<u16>) -> impl Iterator<Item = &Packet> + '_ {
        let key = key.into();
        self.packets.iter().filter(move |p| p.key() == key)
    }

    /// Size of the serialized file for the packets as they stand, before any
    /// timestamp rewrite.
    pub fn encoded_len(&self) -> Result<usize, TasdError> {
        encoded_len(&self.packets, self.key_width as usize)
    }

    /// Serializes with the wall clock. See [`Tasd::to_buffer_with`].
    pub fn to_buffer(&mut self) -> Result<Vec<u8>, TasdError> {
        self.to_buffer_with(&SystemClock)
    }

    /// Serializes the header and every packet in list order.
    ///
    /// When the container is dirty, all `DUMP_LAST_MODIFIED` packets are first
    /// dropped and a single one stamped with `clock.now()` is appended. The
    /// container is clean afterwards. On error it is left untouched.
    pub fn to_buffer_with(&mut self, clock: &impl Clock) -> Result<Vec<u8>, TasdError> {
        let key_width = self.key_width as usize;
        if !self.dirty {
            return write_file(self.version, key_width, &self.packets);
        }

        let now = clock.now();
        let mut packets: Vec<Packet> = self
            .packets
            .iter()
            .filter(|p| !p.is(PacketKey::DumpLastModified))
            .cloned()
            .collect();
        let dropped = self.packets.len() - packets.len();
        packets.push(Packet::DumpLastModified(DumpLastModifiedPacket::new(now)));
        let bytes = write_file(self.version, key_width, &packets)?;
        tracing::debug!(timestamp = now, dropped, "restamped dump last modified");

        self.packets = packets;
        self.dirty = false;
        Ok(bytes)
    }

    /// Merges every port's input chunks into one chunk per port.
    ///
    /// Does nothing when the file has input moments. Otherwise chunks for
    /// ports 1 to 255 are concatenated in list order and appended after the
    /// remaining packets, ascending by port. Ports named by `PORT_CONTROLLER`
    /// packets get a chunk even when it is empty. Chunks for port 0 stay
    /// where they are.
    ///
    /// A list where every port already has at most one chunk, and every
    /// controller port has one, is left exactly as it is and stays clean.
    pub fn compact_inputs(&mut self) {
        if self.packets.iter().any(|p| p.is(PacketKey::InputMoment)) {
            tracing::debug!("input moments present, skipping compaction");
            return;
        }

        let mut chunks_per_port = [0usize; 256];
        let mut controller_ports = [false; 256];
        for packet in &self.packets {
            match packet {
                Packet::InputChunk(chunk) => chunks_per_port[chunk.port as usize] += 1,
                Packet::PortController(pc) => controller_ports[pc.port as usize] = true,
                _ => {}
            }
        }
        let compact = (1..=255).all(|port| match chunks_per_port[port] {
            0 => !controller_ports[port],
            1 => true,
            _ => false,
        });
        if compact {
            tracing::debug!("input chunks already compact");
            return;
        }

        let mut merged: BTreeMap<u8, Vec<u8>> = BTreeMap::new();
        let mut rest = Vec::with_capacity(self.packets.len());
        for packet in self.packets.drain(..) {
            match packet {
                Packet::InputChunk(chunk) if chunk.port != 0 => {
                    merged
                        .entry(chunk.port)
                        .or_default()
                        .extend_from_slice(&chunk.inputs);
                }
                Packet::PortController(pc) => {
                    if pc.port != 0 {
                        merged.entry(pc.port).or_default();
                    }
                    rest.push(Packet::PortController(pc));
                }
                other => rest.push(other),
            }
        }

        let chunks: usize = chunks_per_port[1..].iter().sum();
        let ports = merged.len();
        rest.extend(
            merged
                .into_iter()
                .map(|(port, inputs)| Packet::InputChunk(InputChunkPacket::new(port, inputs))),
        );
        tracing::debug!(chunks, ports, "compacted input chunks");
        self.packets = rest;
        self.dirty = true;
    }

    /// Multi-line diagnostic dump: header fields, then one line per packet.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Tasd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "VERSION {}", self.version)?;
        writeln!(f, "KEY_WIDTH {}", self.key_width)?;
        for packet in &self.packets {
            writeln!(f, "{packet}")?;
        }
        Ok(())
    }
}

fn check_header(version: u16, key_width: u8) -> Result<(), TasdError> {
    if version != SUPPORTED_VERSION {
        return Err(TasdError::UnsupportedVersion(version));
    }
    if key_width != SUPPORTED_KEY_WIDTH {
        return Err(TasdError::UnsupportedKeyWidth(key_width));
    }
    Ok(())
}

fn encoded_len(packets: &[Packet], key_width: usize) -> Result<usize, TasdError> {
    packets.iter().try_fold(HEADER_SIZE, |acc, p| {
        Ok(acc + p.record_size(key_width)?)
    })
}

fn write_file(version: u16, key_width: usize, packets: &[Packet]) -> Result<Vec<u8>, TasdError> {
    let mut writer = Writer::with_capacity(encoded_len(packets, key_width)?);
    writer.buf(&MAGIC);
    writer.u16(version);
    writer.u8(key_width as u8);
    for packet in packets {
        packet.encode_into(&mut writer, key_width)?;
    }
    Ok(writer.flush())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::packet::{CommentPacket, InputMomentPacket, PortControllerPacket, UnknownPacket};

    fn chunk(port: u8, inputs: &[u8]) -> Packet {
        Packet::InputChunk(InputChunkPacket::new(port, inputs.to_vec()))
    }

    #[test]
    fn test_new_is_clean_and_empty() {
        let mut tasd = Tasd::new();
        assert!(!tasd.is_dirty());
        assert_eq!(tasd.encoded_len().unwrap(), HEADER_SIZE);
        assert_eq!(
            tasd.to_buffer().unwrap(),
            vec![0x54, 0x41, 0x53, 0x44, 0x00, 0x01, 0x02]
        );
    }

    #[test]
    fn test_with_header_validates() {
        assert_eq!(
            Tasd::with_header(2, 2),
            Err(TasdError::UnsupportedVersion(2))
        );
        assert_eq!(
            Tasd::with_header(1, 1),
            Err(TasdError::UnsupportedKeyWidth(1))
        );
        assert!(Tasd::with_header(1, 2).is_ok());
    }

    #[test]
    fn test_mutations_mark_dirty() {
        let mut tasd = Tasd::new();
        tasd.push(Packet::Comment(CommentPacket::new("a")));
        assert!(tasd.is_dirty());
        tasd.to_buffer_with(&FixedClock(1)).unwrap();
        assert!(!tasd.is_dirty());

        assert!(tasd.remove(10).is_none());
        assert!(!tasd.is_dirty());
        assert!(tasd.replace(0, chunk(1, &[])).is_some());
        assert!(tasd.is_dirty());
    }

    #[test]
    fn test_clean_serialization_keeps_packets() {
        let mut tasd = Tasd::new();
        tasd.push(Packet::DumpLastModified(DumpLastModifiedPacket::new(5)));
        let bytes = tasd.to_buffer_with(&FixedClock(99)).unwrap();
        let mut parsed = Tasd::parse_file(&bytes).unwrap();
        let again = parsed.to_buffer_with(&FixedClock(12345)).unwrap();
        assert_eq!(bytes, again);
    }

    #[test]
    fn test_dirty_serialization_restamps_once() {
        let mut tasd = Tasd::new();
        tasd.push(Packet::DumpLastModified(DumpLastModifiedPacket::new(1)));
        tasd.push(Packet::Comment(CommentPacket::new("x")));
        tasd.push(Packet::DumpLastModified(DumpLastModifiedPacket::new(2)));
        tasd.to_buffer_with(&FixedClock(1_700_000_000)).unwrap();

        let stamps: Vec<_> = tasd.iter_key(PacketKey::DumpLastModified).collect();
        assert_eq!(
            stamps,
            vec![&Packet::DumpLastModified(DumpLastModifiedPacket::new(1_700_000_000))]
        );
        assert!(tasd.find(PacketKey::Comment).is_some());
        assert_eq!(tasd.packets().len(), 2);
    }

    #[test]
    fn test_compact_merges_by_port() {
        let mut tasd = Tasd::new();
        tasd.packets = vec![
            chunk(2, &[0x10]),
            Packet::Comment(CommentPacket::new("c")),
            chunk(1, &[0xAA]),
            chunk(2, &[0x20]),
            chunk(1, &[0xBB]),
        ];
        tasd.compact_inputs();
        assert!(tasd.is_dirty());
        assert_eq!(
            tasd.packets(),
            &[
                Packet::Comment(CommentPacket::new("c")),
                chunk(1, &[0xAA, 0xBB]),
                chunk(2, &[0x10, 0x20]),
            ]
        );
    }

    #[test]
    fn test_compact_is_idempotent() {
        let mut tasd = Tasd::new();
        tasd.push(chunk(1, &[0xAA]));
        tasd.push(chunk(1, &[0xBB]));
        tasd.compact_inputs();
        tasd.to_buffer_with(&FixedClock(0)).unwrap();
        let before = tasd.packets().to_vec();

        tasd.compact_inputs();
        assert_eq!(tasd.packets(), before.as_slice());
        assert!(!tasd.is_dirty());
    }

    #[test]
    fn test_compact_skips_when_moments_present() {
        let mut tasd = Tasd::new();
        tasd.push(chunk(1, &[0xAA]));
        tasd.push(chunk(1, &[0xBB]));
        tasd.push(Packet::InputMoment(InputMomentPacket::new(1, false, 1, 0, vec![])));
        let before = tasd.packets().to_vec();
        tasd.compact_inputs();
        assert_eq!(tasd.packets(), before.as_slice());
    }

    #[test]
    fn test_compact_includes_controller_ports() {
        let mut tasd = Tasd::new();
        tasd.push(Packet::PortController(PortControllerPacket::new(3, 0x0101)));
        tasd.push(chunk(1, &[0x01]));
        tasd.compact_inputs();
        assert_eq!(
            &tasd.packets()[1..],
            &[chunk(1, &[0x01]), chunk(3, &[])]
        );
    }

    #[test]
    fn test_compact_leaves_port_zero_in_place() {
        let mut tasd = Tasd::new();
        tasd.push(chunk(0, &[0x01]));
        tasd.push(chunk(1, &[0x02]));
        tasd.push(chunk(0, &[0x03]));
        tasd.push(chunk(1, &[0x04]));
        tasd.compact_inputs();
        assert_eq!(
            tasd.packets(),
            &[chunk(0, &[0x01]), chunk(0, &[0x03]), chunk(1, &[0x02, 0x04])]
        );
    }

    #[test]
    fn test_compact_after_restamp_keeps_order() {
        let mut tasd = Tasd::new();
        tasd.push(chunk(1, &[0xAA]));
        tasd.push(chunk(1, &[0xBB]));
        tasd.compact_inputs();
        let bytes = tasd.to_buffer_with(&FixedClock(10)).unwrap();

        let mut parsed = Tasd::parse_file(&bytes).unwrap();
        let before = parsed.packets().to_vec();
        assert!(before[1].is(PacketKey::DumpLastModified));
        parsed.compact_inputs();
        assert_eq!(parsed.packets(), before.as_slice());
        assert!(!parsed.is_dirty());
        assert_eq!(parsed.to_buffer_with(&FixedClock(20)).unwrap(), bytes);
    }

    #[test]
    fn test_compact_leaves_single_chunks_in_place() {
        let mut tasd = Tasd::new();
        tasd.packets = vec![
            chunk(2, &[0x02]),
            Packet::Comment(CommentPacket::new("between")),
            chunk(1, &[0x01]),
        ];
        let before = tasd.packets().to_vec();
        tasd.compact_inputs();
        assert_eq!(tasd.packets(), before.as_slice());
        assert!(!tasd.is_dirty());
    }

    #[test]
    fn test_compact_skips_moment_carried_as_unknown() {
        let mut tasd = Tasd::new();
        tasd.push(chunk(1, &[0xAA]));
        tasd.push(chunk(1, &[0xBB]));
        tasd.push(Packet::Unknown(UnknownPacket::new(0xFE02, vec![0; 11])));
        tasd.to_buffer_with(&FixedClock(0)).unwrap();
        let before = tasd.packets().to_vec();
        tasd.compact_inputs();
        assert_eq!(tasd.packets(), before.as_slice());
        assert!(!tasd.is_dirty());
    }

    #[test]
    fn test_describe() {
        let mut tasd = Tasd::new();
        tasd.push(Packet::Comment(CommentPacket::new("hello")));
        assert_eq!(tasd.describe(), "VERSION 1\nKEY_WIDTH 2\nComment hello\n");
    }
}
