//! Codec for TASD files, the binary dump format for tool-assisted speedruns.
//!
//! A file is a 7-byte header (`"TASD"`, version, key width) followed by TLV
//! records. Each record decodes to a typed [`Packet`]; keys this crate does
//! not know become [`UnknownPacket`] and re-encode byte for byte.
//!
//! ```
//! use tasd::{FixedClock, InputChunkPacket, Packet, PacketKey, Tasd};
//!
//! let mut tasd = Tasd::new();
//! tasd.push(Packet::InputChunk(InputChunkPacket::new(1, vec![0xAA])));
//! tasd.push(Packet::InputChunk(InputChunkPacket::new(1, vec![0xBB])));
//! tasd.compact_inputs();
//!
//! let bytes = tasd.to_buffer_with(&FixedClock(1_700_000_000)).unwrap();
//! let parsed = Tasd::parse_file(&bytes).unwrap();
//! assert_eq!(parsed.iter_key(PacketKey::InputChunk).count(), 1);
//! ```

mod clock;
mod constants;
mod error;
mod file;

pub mod packet;
pub mod registry;

pub use clock::{Clock, FixedClock, SystemClock};
pub use constants::{
    packet_name, AttributionType, ConsoleRegion, ConsoleType, ControllerType, IdentifierBase,
    IdentifierType, IndexType, MemoryDevice, MemoryInitType, PacketKey, TransitionType, ValueName,
    HEADER_SIZE, MAGIC, SUPPORTED_KEY_WIDTH, SUPPORTED_VERSION,
};
pub use error::TasdError;
pub use file::Tasd;
pub use packet::*;
