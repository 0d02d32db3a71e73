//! The packet contract and the closed set of packet variants.
//!
//! A packet on the wire is a TLV record:
//!
//! ```text
//! key (key width bytes) | length width (1 byte) | length (1..=4 bytes) | payload
//! ```
//!
//! Each variant only knows how to size, write and read its own payload.
//! Framing lives in [`PacketCodec::encode_into`] so every variant frames the
//! same way.

mod extra;
mod general;
mod genesis;
mod input;
mod nes;
mod snes;
mod unknown;

use std::fmt;

use serde::Serialize;
use tasd_buffers::{min_uint_width, BufferError, Reader, Writer};

use crate::constants::PacketKey;
use crate::TasdError;

pub use extra::{CommentPacket, ExperimentalPacket, UnspecifiedPacket};
pub use general::{
    AttributionPacket, BlankFramesPacket, CategoryPacket, ConsoleRegionPacket, ConsoleTypePacket,
    DumpCreatedPacket, DumpLastModifiedPacket, EmulatorCorePacket, EmulatorNamePacket,
    EmulatorVersionPacket, GameIdentifierPacket, GameTitlePacket, MemoryInitPacket,
    MovieFilePacket, MovieLicensePacket, PortControllerPacket, PortOverreadPacket,
    RerecordsPacket, RomNamePacket, SourceLinkPacket, TasLastModifiedPacket, TotalFramesPacket,
    VerifiedPacket,
};
pub use genesis::GenesisGameGenieCodePacket;
pub use input::{
    InputChunkPacket, InputMomentPacket, LagFrameChunkPacket, MovieTransitionPacket,
    TransitionPacket,
};
pub use nes::{NesClockFilterPacket, NesGameGenieCodePacket, NesLatchFilterPacket, NesOverreadPacket};
pub use snes::{
    SnesClockFilterPacket, SnesGameGenieCodePacket, SnesLatchTrainPacket, SnesOverreadPacket,
};
pub use unknown::UnknownPacket;

// ── Contract ───────────────────────────────────────────────────────────────

/// What every packet variant provides for encoding.
///
/// `payload_size` is computed from the current field values on every call and
/// must equal the number of bytes `write_payload` emits.
pub trait PacketCodec: fmt::Display {
    /// The record key; constant for every variant except [`UnknownPacket`].
    fn key(&self) -> u16;

    /// Exact byte length of the encoded payload.
    fn payload_size(&self) -> usize;

    /// Appends the payload (without framing) to `writer`.
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError>;

    /// Size of the full wire record for the given key width.
    fn record_size(&self, key_width: usize) -> Result<usize, TasdError> {
        let plen = self.payload_size();
        let pexp = min_uint_width(plen as u64)?;
        Ok(key_width + 1 + pexp + plen)
    }

    /// Appends the full wire record: key, length width, length, payload.
    fn encode_into(&self, writer: &mut Writer, key_width: usize) -> Result<(), TasdError> {
        let plen = self.payload_size();
        let pexp = min_uint_width(plen as u64)?;
        writer.uint(self.key() as u32, key_width)?;
        writer.u8(pexp as u8);
        writer.uint(plen as u32, pexp)?;
        let start = writer.len();
        self.write_payload(writer)?;
        debug_assert_eq!(
            writer.len() - start,
            plen,
            "payload_size disagrees with write_payload for {self}"
        );
        Ok(())
    }

    /// Encodes the full wire record into a fresh buffer.
    fn encode(&self, key_width: usize) -> Result<Vec<u8>, TasdError> {
        let mut writer = Writer::with_capacity(self.record_size(key_width)?);
        self.encode_into(&mut writer, key_width)?;
        Ok(writer.flush())
    }
}

/// Construction of a variant from its payload bytes.
pub trait DecodePayload: Sized {
    const KEY: PacketKey;

    /// Decodes the payload. Fails with [`TasdError::MalformedPacket`] when the
    /// payload is shorter than the variant's fixed fields.
    fn decode(payload: &[u8]) -> Result<Self, TasdError>;
}

/// Runs `read` over `payload`, reporting any short read as a malformed packet.
pub(crate) fn read_payload<T>(
    key: PacketKey,
    payload: &[u8],
    read: impl FnOnce(&mut Reader<'_>) -> Result<T, BufferError>,
) -> Result<T, TasdError> {
    let mut reader = Reader::new(payload);
    read(&mut reader).map_err(|err| TasdError::malformed(key, err))
}

/// Largest string or blob that fits behind a one-byte length prefix.
pub(crate) const MAX_SHORT_LEN: usize = u8::MAX as usize;

pub(crate) fn short_len(field: &'static str, len: usize) -> Result<u8, TasdError> {
    u8::try_from(len).map_err(|_| TasdError::FieldTooLong {
        field,
        len,
        max: MAX_SHORT_LEN,
    })
}

/// Reads a one-byte length followed by that many UTF-8 bytes.
pub(crate) fn read_short_utf8(reader: &mut Reader<'_>) -> Result<String, BufferError> {
    let len = reader.u8()? as usize;
    Ok(reader.utf8(len)?.to_owned())
}

// ── Packet ─────────────────────────────────────────────────────────────────

/// One TASD record, as a closed union over every known variant plus the
/// [`UnknownPacket`] passthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "fields")]
pub enum Packet {
    // ── General ──────────────────────────────────────────────────────────
    ConsoleType(ConsoleTypePacket),
    ConsoleRegion(ConsoleRegionPacket),
    GameTitle(GameTitlePacket),
    RomName(RomNamePacket),
    Attribution(AttributionPacket),
    Category(CategoryPacket),
    EmulatorName(EmulatorNamePacket),
    EmulatorVersion(EmulatorVersionPacket),
    EmulatorCore(EmulatorCorePacket),
    TasLastModified(TasLastModifiedPacket),
    DumpCreated(DumpCreatedPacket),
    DumpLastModified(DumpLastModifiedPacket),
    TotalFrames(TotalFramesPacket),
    Rerecords(RerecordsPacket),
    SourceLink(SourceLinkPacket),
    BlankFrames(BlankFramesPacket),
    Verified(VerifiedPacket),
    MemoryInit(MemoryInitPacket),
    GameIdentifier(GameIdentifierPacket),
    MovieLicense(MovieLicensePacket),
    MovieFile(MovieFilePacket),
    PortController(PortControllerPacket),
    PortOverread(PortOverreadPacket),

    // ── NES ──────────────────────────────────────────────────────────────
    NesLatchFilter(NesLatchFilterPacket),
    NesClockFilter(NesClockFilterPacket),
    NesOverread(NesOverreadPacket),
    NesGameGenieCode(NesGameGenieCodePacket),

    // ── SNES ─────────────────────────────────────────────────────────────
    SnesClockFilter(SnesClockFilterPacket),
    SnesOverread(SnesOverreadPacket),
    SnesGameGenieCode(SnesGameGenieCodePacket),
    SnesLatchTrain(SnesLatchTrainPacket),

    // ── Genesis ──────────────────────────────────────────────────────────
    GenesisGameGenieCode(GenesisGameGenieCodePacket),

    // ── Input / timing ───────────────────────────────────────────────────
    InputChunk(InputChunkPacket),
    InputMoment(InputMomentPacket),
    Transition(TransitionPacket),
    LagFrameChunk(LagFrameChunkPacket),
    MovieTransition(MovieTransitionPacket),

    // ── Extras ───────────────────────────────────────────────────────────
    Comment(CommentPacket),
    Experimental(ExperimentalPacket),
    Unspecified(UnspecifiedPacket),

    /// Any key without a registered variant, kept byte for byte.
    Unknown(UnknownPacket),
}

impl Packet {
    /// The variant's codec, for the methods every variant shares.
    pub fn codec(&self) -> &dyn PacketCodec {
        match self {
            Packet::ConsoleType(p) => p,
            Packet::ConsoleRegion(p) => p,
            Packet::GameTitle(p) => p,
            Packet::RomName(p) => p,
            Packet::Attribution(p) => p,
            Packet::Category(p) => p,
            Packet::EmulatorName(p) => p,
            Packet::EmulatorVersion(p) => p,
            Packet::EmulatorCore(p) => p,
            Packet::TasLastModified(p) => p,
            Packet::DumpCreated(p) => p,
            Packet::DumpLastModified(p) => p,
            Packet::TotalFrames(p) => p,
            Packet::Rerecords(p) => p,
            Packet::SourceLink(p) => p,
            Packet::BlankFrames(p) => p,
            Packet::Verified(p) => p,
            Packet::MemoryInit(p) => p,
            Packet::GameIdentifier(p) => p,
            Packet::MovieLicense(p) => p,
            Packet::MovieFile(p) => p,
            Packet::PortController(p) => p,
            Packet::PortOverread(p) => p,
            Packet::NesLatchFilter(p) => p,
            Packet::NesClockFilter(p) => p,
            Packet::NesOverread(p) => p,
            Packet::NesGameGenieCode(p) => p,
            Packet::SnesClockFilter(p) => p,
            Packet::SnesOverread(p) => p,
            Packet::SnesGameGenieCode(p) => p,
            Packet::SnesLatchTrain(p) => p,
            Packet::GenesisGameGenieCode(p) => p,
            Packet::InputChunk(p) => p,
            Packet::InputMoment(p) => p,
            Packet::Transition(p) => p,
            Packet::LagFrameChunk(p) => p,
            Packet::MovieTransition(p) => p,
            Packet::Comment(p) => p,
            Packet::Experimental(p) => p,
            Packet::Unspecified(p) => p,
            Packet::Unknown(p) => p,
        }
    }

    pub fn key(&self) -> u16 {
        self.codec().key()
    }

    pub fn payload_size(&self) -> usize {
        self.codec().payload_size()
    }

    pub fn record_size(&self, key_width: usize) -> Result<usize, TasdError> {
        self.codec().record_size(key_width)
    }

    pub fn encode_into(&self, writer: &mut Writer, key_width: usize) -> Result<(), TasdError> {
        self.codec().encode_into(writer, key_width)
    }

    /// Encodes the full wire record (key, length width, length, payload).
    pub fn encode(&self, key_width: usize) -> Result<Vec<u8>, TasdError> {
        self.codec().encode(key_width)
    }

    /// Returns `true` if this packet carries the given key.
    pub fn is(&self, key: PacketKey) -> bool {
        self.key() == key as u16
    }

    /// Human-readable one-line description (diagnostic only).
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.codec(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_frames_with_minimal_length_width() {
        let packet = Packet::GameTitle(GameTitlePacket::new("ab"));
        assert_eq!(
            packet.encode(2).unwrap(),
            vec![0x00, 0x03, 0x01, 0x02, b'a', b'b']
        );
    }

    #[test]
    fn test_encode_uses_two_byte_length_for_256_bytes() {
        let packet = Packet::Comment(CommentPacket::new("x".repeat(256)));
        let bytes = packet.encode(2).unwrap();
        assert_eq!(&bytes[..5], &[0xFF, 0x01, 0x02, 0x01, 0x00]);
        assert_eq!(bytes.len(), 2 + 1 + 2 + 256);
        assert_eq!(packet.record_size(2).unwrap(), bytes.len());
    }

    #[test]
    fn test_empty_payload_still_has_length_byte() {
        let packet = Packet::Unspecified(UnspecifiedPacket::new(Vec::new()));
        assert_eq!(packet.encode(2).unwrap(), vec![0xFF, 0xFF, 0x01, 0x00]);
    }

    #[test]
    fn test_short_len_limit() {
        assert_eq!(short_len("name", 255).unwrap(), 255);
        assert_eq!(
            short_len("name", 256),
            Err(TasdError::FieldTooLong {
                field: "name",
                len: 256,
                max: 255
            })
        );
    }

    #[test]
    fn test_is_key() {
        let packet = Packet::TotalFrames(TotalFramesPacket::new(10));
        assert!(packet.is(PacketKey::TotalFrames));
        assert!(!packet.is(PacketKey::Rerecords));
    }
}
