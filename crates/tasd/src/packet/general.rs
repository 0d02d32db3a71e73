//! General metadata packets (keys `0x0001`..=`0x00F1`).

use std::fmt;

use chrono::DateTime;
use serde::Serialize;
use tasd_buffers::{print_octets_default, Writer};

use super::{read_payload, read_short_utf8, short_len, DecodePayload, PacketCodec};
use crate::constants::{
    label, AttributionType, ConsoleRegion, ConsoleType, ControllerType, IdentifierBase,
    IdentifierType, MemoryDevice, MemoryInitType, PacketKey,
};
use crate::TasdError;

/// Renders seconds since the Unix epoch as an RFC 1123 style UTC date.
fn format_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|s| DateTime::from_timestamp(s, 0))
        .map(|dt| dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
        .unwrap_or_else(|| format!("{secs}s"))
}

// ── Tagged text ────────────────────────────────────────────────────────────

/// Console the movie was made for, plus a free-form name (used with
/// [`ConsoleType::Custom`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsoleTypePacket {
    pub console: u8,
    pub name: String,
}

impl ConsoleTypePacket {
    pub fn new(console: u8, name: impl Into<String>) -> Self {
        Self {
            console,
            name: name.into(),
        }
    }
}

impl PacketCodec for ConsoleTypePacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        1 + self.name.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.u8(self.console);
        writer.utf8(&self.name);
        Ok(())
    }
}

impl DecodePayload for ConsoleTypePacket {
    const KEY: PacketKey = PacketKey::ConsoleType;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| {
            let console = r.u8()?;
            Ok(Self::new(console, r.utf8_rest()?))
        })
    }
}

impl fmt::Display for ConsoleTypePacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConsoleType {}, {}",
            label::<ConsoleType, u8>(self.console),
            self.name
        )
    }
}

/// A person or tool credited for the movie or the dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributionPacket {
    pub kind: u8,
    pub name: String,
}

impl AttributionPacket {
    pub fn new(kind: u8, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl PacketCodec for AttributionPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        1 + self.name.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.u8(self.kind);
        writer.utf8(&self.name);
        Ok(())
    }
}

impl DecodePayload for AttributionPacket {
    const KEY: PacketKey = PacketKey::Attribution;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| {
            let kind = r.u8()?;
            Ok(Self::new(kind, r.utf8_rest()?))
        })
    }
}

impl fmt::Display for AttributionPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Attribution {}, {}",
            label::<AttributionType, u8>(self.kind),
            self.name
        )
    }
}

// ── Scalars ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConsoleRegionPacket {
    pub region: u8,
}

impl ConsoleRegionPacket {
    pub fn new(region: u8) -> Self {
        Self { region }
    }
}

impl PacketCodec for ConsoleRegionPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        1
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.u8(self.region);
        Ok(())
    }
}

impl DecodePayload for ConsoleRegionPacket {
    const KEY: PacketKey = PacketKey::ConsoleRegion;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.u8()?)))
    }
}

impl fmt::Display for ConsoleRegionPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConsoleRegion {}", label::<ConsoleRegion, u8>(self.region))
    }
}

/// Number of frames in the movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TotalFramesPacket {
    pub frames: u32,
}

impl TotalFramesPacket {
    pub fn new(frames: u32) -> Self {
        Self { frames }
    }
}

impl PacketCodec for TotalFramesPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        4
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.u32(self.frames);
        Ok(())
    }
}

impl DecodePayload for TotalFramesPacket {
    const KEY: PacketKey = PacketKey::TotalFrames;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.u32()?)))
    }
}

impl fmt::Display for TotalFramesPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TotalFrames {}", self.frames)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RerecordsPacket {
    pub rerecords: u32,
}

impl RerecordsPacket {
    pub fn new(rerecords: u32) -> Self {
        Self { rerecords }
    }
}

impl PacketCodec for RerecordsPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        4
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.u32(self.rerecords);
        Ok(())
    }
}

impl DecodePayload for RerecordsPacket {
    const KEY: PacketKey = PacketKey::Rerecords;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.u32()?)))
    }
}

impl fmt::Display for RerecordsPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rerecords {}", self.rerecords)
    }
}

/// Frames of blank input the replay device must insert before the movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlankFramesPacket {
    pub frames: u16,
}

impl BlankFramesPacket {
    pub fn new(frames: u16) -> Self {
        Self { frames }
    }
}

impl PacketCodec for BlankFramesPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        2
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.u16(self.frames);
        Ok(())
    }
}

impl DecodePayload for BlankFramesPacket {
    const KEY: PacketKey = PacketKey::BlankFrames;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.u16()?)))
    }
}

impl fmt::Display for BlankFramesPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlankFrames {}", self.frames)
    }
}

/// Whether the movie has been verified on real hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerifiedPacket {
    pub verified: bool,
}

impl VerifiedPacket {
    pub fn new(verified: bool) -> Self {
        Self { verified }
    }
}

impl PacketCodec for VerifiedPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        1
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.bool(self.verified);
        Ok(())
    }
}

impl DecodePayload for VerifiedPacket {
    const KEY: PacketKey = PacketKey::Verified;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.bool()?)))
    }
}

impl fmt::Display for VerifiedPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Verified {}", self.verified)
    }
}

// ── Free text ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameTitlePacket {
    pub title: String,
}

impl GameTitlePacket {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl PacketCodec for GameTitlePacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        self.title.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.utf8(&self.title);
        Ok(())
    }
}

impl DecodePayload for GameTitlePacket {
    const KEY: PacketKey = PacketKey::GameTitle;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.utf8_rest()?)))
    }
}

impl fmt::Display for GameTitlePacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameTitle {}", self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RomNamePacket {
    pub name: String,
}

impl RomNamePacket {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl PacketCodec for RomNamePacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        self.name.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.utf8(&self.name);
        Ok(())
    }
}

impl DecodePayload for RomNamePacket {
    const KEY: PacketKey = PacketKey::RomName;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.utf8_rest()?)))
    }
}

impl fmt::Display for RomNamePacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RomName {}", self.name)
    }
}

/// Run category, e.g. `any%`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPacket {
    pub name: String,
}

impl CategoryPacket {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl PacketCodec for CategoryPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        self.name.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.utf8(&self.name);
        Ok(())
    }
}

impl DecodePayload for CategoryPacket {
    const KEY: PacketKey = PacketKey::Category;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.utf8_rest()?)))
    }
}

impl fmt::Display for CategoryPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category {}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmulatorNamePacket {
    pub name: String,
}

impl EmulatorNamePacket {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl PacketCodec for EmulatorNamePacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        self.name.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.utf8(&self.name);
        Ok(())
    }
}

impl DecodePayload for EmulatorNamePacket {
    const KEY: PacketKey = PacketKey::EmulatorName;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.utf8_rest()?)))
    }
}

impl fmt::Display for EmulatorNamePacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EmulatorName {}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmulatorVersionPacket {
    pub version: String,
}

impl EmulatorVersionPacket {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

impl PacketCodec for EmulatorVersionPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        self.version.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.utf8(&self.version);
        Ok(())
    }
}

impl DecodePayload for EmulatorVersionPacket {
    const KEY: PacketKey = PacketKey::EmulatorVersion;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.utf8_rest()?)))
    }
}

impl fmt::Display for EmulatorVersionPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EmulatorVersion {}", self.version)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmulatorCorePacket {
    pub core: String,
}

impl EmulatorCorePacket {
    pub fn new(core: impl Into<String>) -> Self {
        Self { core: core.into() }
    }
}

impl PacketCodec for EmulatorCorePacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        self.core.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.utf8(&self.core);
        Ok(())
    }
}

impl DecodePayload for EmulatorCorePacket {
    const KEY: PacketKey = PacketKey::EmulatorCore;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.utf8_rest()?)))
    }
}

impl fmt::Display for EmulatorCorePacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EmulatorCore {}", self.core)
    }
}

/// Link to the published movie or its submission page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLinkPacket {
    pub link: String,
}

impl SourceLinkPacket {
    pub fn new(link: impl Into<String>) -> Self {
        Self { link: link.into() }
    }
}

impl PacketCodec for SourceLinkPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        self.link.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.utf8(&self.link);
        Ok(())
    }
}

impl DecodePayload for SourceLinkPacket {
    const KEY: PacketKey = PacketKey::SourceLink;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.utf8_rest()?)))
    }
}

impl fmt::Display for SourceLinkPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceLink {}", self.link)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieLicensePacket {
    pub license: String,
}

impl MovieLicensePacket {
    pub fn new(license: impl Into<String>) -> Self {
        Self {
            license: license.into(),
        }
    }
}

impl PacketCodec for MovieLicensePacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        self.license.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.utf8(&self.license);
        Ok(())
    }
}

impl DecodePayload for MovieLicensePacket {
    const KEY: PacketKey = PacketKey::MovieLicense;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.utf8_rest()?)))
    }
}

impl fmt::Display for MovieLicensePacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MovieLicense {}", self.license)
    }
}

// ── Timestamps ─────────────────────────────────────────────────────────────

/// When the TAS itself was last edited, in seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TasLastModifiedPacket {
    pub timestamp: u64,
}

impl TasLastModifiedPacket {
    pub fn new(timestamp: u64) -> Self {
        Self { timestamp }
    }
}

impl PacketCodec for TasLastModifiedPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        8
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.u64(self.timestamp);
        Ok(())
    }
}

impl DecodePayload for TasLastModifiedPacket {
    const KEY: PacketKey = PacketKey::TasLastModified;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.u64()?)))
    }
}

impl fmt::Display for TasLastModifiedPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TasLastModified {}", format_timestamp(self.timestamp))
    }
}

/// When this dump was first created, in seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DumpCreatedPacket {
    pub timestamp: u64,
}

impl DumpCreatedPacket {
    pub fn new(timestamp: u64) -> Self {
        Self { timestamp }
    }
}

impl PacketCodec for DumpCreatedPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        8
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.u64(self.timestamp);
        Ok(())
    }
}

impl DecodePayload for DumpCreatedPacket {
    const KEY: PacketKey = PacketKey::DumpCreated;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.u64()?)))
    }
}

impl fmt::Display for DumpCreatedPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DumpCreated {}", format_timestamp(self.timestamp))
    }
}

/// When this dump was last written. Rewritten by
/// [`Tasd::to_buffer`](crate::Tasd::to_buffer) whenever the file is dirty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DumpLastModifiedPacket {
    pub timestamp: u64,
}

impl DumpLastModifiedPacket {
    pub fn new(timestamp: u64) -> Self {
        Self { timestamp }
    }
}

impl PacketCodec for DumpLastModifiedPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        8
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.u64(self.timestamp);
        Ok(())
    }
}

impl DecodePayload for DumpLastModifiedPacket {
    const KEY: PacketKey = PacketKey::DumpLastModified;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| Ok(Self::new(r.u64()?)))
    }
}

impl fmt::Display for DumpLastModifiedPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DumpLastModified {}", format_timestamp(self.timestamp))
    }
}

// ── Blobs with names ───────────────────────────────────────────────────────

/// Initial contents of a memory device.
///
/// Layout: data type, device (u16), required flag, name length, name, data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryInitPacket {
    pub data_type: u8,
    pub device: u16,
    pub required: bool,
    pub name: String,
    pub data: Vec<u8>,
}

impl MemoryInitPacket {
    pub fn new(
        data_type: u8,
        device: u16,
        required: bool,
        name: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            data_type,
            device,
            required,
            name: name.into(),
            data,
        }
    }
}

impl PacketCodec for MemoryInitPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        5 + self.name.len() + self.data.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        let nlen = short_len("memory init name", self.name.len())?;
        writer.u8(self.data_type);
        writer.u16(self.device);
        writer.bool(self.required);
        writer.u8(nlen);
        writer.utf8(&self.name);
        writer.buf(&self.data);
        Ok(())
    }
}

impl DecodePayload for MemoryInitPacket {
    const KEY: PacketKey = PacketKey::MemoryInit;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| {
            let data_type = r.u8()?;
            let device = r.u16()?;
            let required = r.bool()?;
            let name = read_short_utf8(r)?;
            Ok(Self::new(data_type, device, required, name, r.rest().to_vec()))
        })
    }
}

impl fmt::Display for MemoryInitPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MemoryInit {}, {}, required={}, {}, {} bytes",
            label::<MemoryInitType, u8>(self.data_type),
            label::<MemoryDevice, u16>(self.device),
            self.required,
            self.name,
            self.data.len()
        )
    }
}

/// Hash or other identifier of the game image.
///
/// Layout: identifier type, base, name length, name, identifier bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameIdentifierPacket {
    pub kind: u8,
    pub base: u8,
    pub name: String,
    pub identifier: Vec<u8>,
}

impl GameIdentifierPacket {
    pub fn new(kind: u8, base: u8, name: impl Into<String>, identifier: Vec<u8>) -> Self {
        Self {
            kind,
            base,
            name: name.into(),
            identifier,
        }
    }
}

impl PacketCodec for GameIdentifierPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        3 + self.name.len() + self.identifier.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        let nlen = short_len("game identifier name", self.name.len())?;
        writer.u8(self.kind);
        writer.u8(self.base);
        writer.u8(nlen);
        writer.utf8(&self.name);
        writer.buf(&self.identifier);
        Ok(())
    }
}

impl DecodePayload for GameIdentifierPacket {
    const KEY: PacketKey = PacketKey::GameIdentifier;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| {
            let kind = r.u8()?;
            let base = r.u8()?;
            let name = read_short_utf8(r)?;
            Ok(Self::new(kind, base, name, r.rest().to_vec()))
        })
    }
}

impl fmt::Display for GameIdentifierPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GameIdentifier {}, {}, {}, {}",
            label::<IdentifierType, u8>(self.kind),
            label::<IdentifierBase, u8>(self.base),
            self.name,
            print_octets_default(&self.identifier)
        )
    }
}

/// The emulator's own movie file, embedded verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieFilePacket {
    pub name: String,
    pub data: Vec<u8>,
}

impl MovieFilePacket {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

impl PacketCodec for MovieFilePacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        1 + self.name.len() + self.data.len()
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        let nlen = short_len("movie file name", self.name.len())?;
        writer.u8(nlen);
        writer.utf8(&self.name);
        writer.buf(&self.data);
        Ok(())
    }
}

impl DecodePayload for MovieFilePacket {
    const KEY: PacketKey = PacketKey::MovieFile;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| {
            let name = read_short_utf8(r)?;
            Ok(Self::new(name, r.rest().to_vec()))
        })
    }
}

impl fmt::Display for MovieFilePacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MovieFile {}, {} bytes", self.name, self.data.len())
    }
}

// ── Ports ──────────────────────────────────────────────────────────────────

/// Controller attached to a (1-based) port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PortControllerPacket {
    pub port: u8,
    pub controller: u16,
}

impl PortControllerPacket {
    pub fn new(port: u8, controller: u16) -> Self {
        Self { port, controller }
    }
}

impl PacketCodec for PortControllerPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        3
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.u8(self.port);
        writer.u16(self.controller);
        Ok(())
    }
}

impl DecodePayload for PortControllerPacket {
    const KEY: PacketKey = PacketKey::PortController;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| {
            let port = r.u8()?;
            Ok(Self::new(port, r.u16()?))
        })
    }
}

impl fmt::Display for PortControllerPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PortController {}, {}",
            self.port,
            label::<ControllerType, u16>(self.controller)
        )
    }
}

/// Value a port returns when read past the end of the controller's report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PortOverreadPacket {
    pub port: u8,
    pub high: bool,
}

impl PortOverreadPacket {
    pub fn new(port: u8, high: bool) -> Self {
        Self { port, high }
    }
}

impl PacketCodec for PortOverreadPacket {
    fn key(&self) -> u16 {
        Self::KEY.into()
    }
    fn payload_size(&self) -> usize {
        2
    }
    fn write_payload(&self, writer: &mut Writer) -> Result<(), TasdError> {
        writer.u8(self.port);
        writer.bool(self.high);
        Ok(())
    }
}

impl DecodePayload for PortOverreadPacket {
    const KEY: PacketKey = PacketKey::PortOverread;
    fn decode(payload: &[u8]) -> Result<Self, TasdError> {
        read_payload(Self::KEY, payload, |r| {
            let port = r.u8()?;
            Ok(Self::new(port, r.bool()?))
        })
    }
}

impl fmt::Display for PortOverreadPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PortOverread {}, high={}", self.port, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TasdError;

    fn payload_of(p: &impl PacketCodec) -> Vec<u8> {
        let mut w = Writer::new();
        p.write_payload(&mut w).unwrap();
        let bytes = w.flush();
        assert_eq!(bytes.len(), p.payload_size());
        bytes
    }

    #[test]
    fn test_console_type_layout() {
        let p = ConsoleTypePacket::new(ConsoleType::Nes as u8, "");
        assert_eq!(payload_of(&p), vec![0x01]);
        assert_eq!(ConsoleTypePacket::decode(&[0x01]).unwrap(), p);
        assert_eq!(p.to_string(), "ConsoleType NES, ");
    }

    #[test]
    fn test_console_type_requires_tag() {
        assert!(matches!(
            ConsoleTypePacket::decode(&[]),
            Err(TasdError::MalformedPacket { key: 0x0001, .. })
        ));
    }

    #[test]
    fn test_verified_writes_single_byte() {
        assert_eq!(payload_of(&VerifiedPacket::new(true)), vec![1]);
        assert_eq!(VerifiedPacket::decode(&[0x7F]).unwrap(), VerifiedPacket::new(true));
        assert_eq!(VerifiedPacket::decode(&[0x00]).unwrap(), VerifiedPacket::new(false));
    }

    #[test]
    fn test_total_frames_short_payload() {
        let err = TotalFramesPacket::decode(&[0, 0, 1]).unwrap_err();
        assert!(matches!(err, TasdError::MalformedPacket { key: 0x000D, .. }));
    }

    #[test]
    fn test_fixed_size_ignores_trailing_bytes() {
        let p = BlankFramesPacket::decode(&[0x01, 0x02, 0xFF]).unwrap();
        assert_eq!(p.frames, 0x0102);
        assert_eq!(payload_of(&p), vec![0x01, 0x02]);
    }

    #[test]
    fn test_timestamp_layout_and_display() {
        let p = DumpCreatedPacket::new(0);
        assert_eq!(payload_of(&p), vec![0; 8]);
        assert_eq!(p.to_string(), "DumpCreated Thu, 01 Jan 1970 00:00:00 GMT");
        let big = TasLastModifiedPacket::new(u64::MAX);
        assert_eq!(TasLastModifiedPacket::decode(&payload_of(&big)).unwrap(), big);
    }

    #[test]
    fn test_memory_init_layout() {
        let p = MemoryInitPacket::new(0x02, 0x0101, true, "ram", vec![0xAA, 0xBB]);
        assert_eq!(
            payload_of(&p),
            vec![0x02, 0x01, 0x01, 0x01, 0x03, b'r', b'a', b'm', 0xAA, 0xBB]
        );
        assert_eq!(MemoryInitPacket::decode(&payload_of(&p)).unwrap(), p);
    }

    #[test]
    fn test_memory_init_name_overruns_payload() {
        let err = MemoryInitPacket::decode(&[0x02, 0x01, 0x01, 0x01, 0x09, b'r']).unwrap_err();
        assert!(matches!(err, TasdError::MalformedPacket { key: 0x0012, .. }));
    }

    #[test]
    fn test_game_identifier_roundtrip() {
        let p = GameIdentifierPacket::new(
            IdentifierType::Md5 as u8,
            IdentifierBase::RawBinary as u8,
            "rom",
            vec![0xDE, 0xAD],
        );
        let bytes = payload_of(&p);
        assert_eq!(&bytes[..3], &[0x01, 0x01, 0x03]);
        assert_eq!(GameIdentifierPacket::decode(&bytes).unwrap(), p);
    }

    #[test]
    fn test_movie_file_name_too_long() {
        let p = MovieFilePacket::new("n".repeat(256), vec![]);
        let mut w = Writer::new();
        assert!(matches!(
            p.write_payload(&mut w),
            Err(TasdError::FieldTooLong { len: 256, .. })
        ));
    }

    #[test]
    fn test_movie_file_name_at_limit() {
        let p = MovieFilePacket::new("n".repeat(255), vec![1, 2, 3]);
        let bytes = payload_of(&p);
        assert_eq!(bytes[0], 0xFF);
        assert_eq!(MovieFilePacket::decode(&bytes).unwrap(), p);
    }

    #[test]
    fn test_port_controller_display() {
        let p = PortControllerPacket::decode(&[0x01, 0x01, 0x01]).unwrap();
        assert_eq!(p, PortControllerPacket::new(1, 0x0101));
        assert_eq!(p.to_string(), "PortController 1, NES_STANDARD_CONTROLLER");
    }

    #[test]
    fn test_invalid_utf8_text_is_malformed() {
        assert!(matches!(
            GameTitlePacket::decode(&[0xC3]),
            Err(TasdError::MalformedPacket { key: 0x0003, .. })
        ));
    }
}
