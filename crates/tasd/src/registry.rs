//! Key to variant dispatch.

use crate::constants::PacketKey;
use crate::packet::*;
use crate::TasdError;

/// Builds the packet for `key` from its payload.
///
/// Total over the key space: keys without a registered variant become
/// [`Packet::Unknown`] and keep their payload untouched. A registered
/// variant whose payload is too short fails with
/// [`TasdError::MalformedPacket`].
pub fn decode(key: u16, payload: &[u8]) -> Result<Packet, TasdError> {
    let known = match PacketKey::try_from(key) {
        Ok(known) => known,
        Err(_) => return Ok(Packet::Unknown(UnknownPacket::new(key, payload.to_vec()))),
    };
    let packet = match known {
        PacketKey::ConsoleType => Packet::ConsoleType(ConsoleTypePacket::decode(payload)?),
        PacketKey::ConsoleRegion => Packet::ConsoleRegion(ConsoleRegionPacket::decode(payload)?),
        PacketKey::GameTitle => Packet::GameTitle(GameTitlePacket::decode(payload)?),
        PacketKey::RomName => Packet::RomName(RomNamePacket::decode(payload)?),
        PacketKey::Attribution => Packet::Attribution(AttributionPacket::decode(payload)?),
        PacketKey::Category => Packet::Category(CategoryPacket::decode(payload)?),
        PacketKey::EmulatorName => Packet::EmulatorName(EmulatorNamePacket::decode(payload)?),
        PacketKey::EmulatorVersion => {
            Packet::EmulatorVersion(EmulatorVersionPacket::decode(payload)?)
        }
        PacketKey::EmulatorCore => Packet::EmulatorCore(EmulatorCorePacket::decode(payload)?),
        PacketKey::TasLastModified => {
            Packet::TasLastModified(TasLastModifiedPacket::decode(payload)?)
        }
        PacketKey::DumpCreated => Packet::DumpCreated(DumpCreatedPacket::decode(payload)?),
        PacketKey::DumpLastModified => {
            Packet::DumpLastModified(DumpLastModifiedPacket::decode(payload)?)
        }
        PacketKey::TotalFrames => Packet::TotalFrames(TotalFramesPacket::decode(payload)?),
        PacketKey::Rerecords => Packet::Rerecords(RerecordsPacket::decode(payload)?),
        PacketKey::SourceLink => Packet::SourceLink(SourceLinkPacket::decode(payload)?),
        PacketKey::BlankFrames => Packet::BlankFrames(BlankFramesPacket::decode(payload)?),
        PacketKey::Verified => Packet::Verified(VerifiedPacket::decode(payload)?),
        PacketKey::MemoryInit => Packet::MemoryInit(MemoryInitPacket::decode(payload)?),
        PacketKey::GameIdentifier => {
            Packet::GameIdentifier(GameIdentifierPacket::decode(payload)?)
        }
        PacketKey::MovieLicense => Packet::MovieLicense(MovieLicensePacket::decode(payload)?),
        PacketKey::MovieFile => Packet::MovieFile(MovieFilePacket::decode(payload)?),
        PacketKey::PortController => {
            Packet::PortController(PortControllerPacket::decode(payload)?)
        }
        PacketKey::PortOverread => Packet::PortOverread(PortOverreadPacket::decode(payload)?),
        PacketKey::NesLatchFilter => {
            Packet::NesLatchFilter(NesLatchFilterPacket::decode(payload)?)
        }
        PacketKey::NesClockFilter => {
            Packet::NesClockFilter(NesClockFilterPacket::decode(payload)?)
        }
        PacketKey::NesOverread => Packet::NesOverread(NesOverreadPacket::decode(payload)?),
        PacketKey::NesGameGenieCode => {
            Packet::NesGameGenieCode(NesGameGenieCodePacket::decode(payload)?)
        }
        PacketKey::SnesClockFilter => {
            Packet::SnesClockFilter(SnesClockFilterPacket::decode(payload)?)
        }
        PacketKey::SnesOverread => Packet::SnesOverread(SnesOverreadPacket::decode(payload)?),
        PacketKey::SnesGameGenieCode => {
            Packet::SnesGameGenieCode(SnesGameGenieCodePacket::decode(payload)?)
        }
        PacketKey::SnesLatchTrain => {
            Packet::SnesLatchTrain(SnesLatchTrainPacket::decode(payload)?)
        }
        PacketKey::GenesisGameGenieCode => {
            Packet::GenesisGameGenieCode(GenesisGameGenieCodePacket::decode(payload)?)
        }
        PacketKey::InputChunk => Packet::InputChunk(InputChunkPacket::decode(payload)?),
        PacketKey::InputMoment => Packet::InputMoment(InputMomentPacket::decode(payload)?),
        PacketKey::Transition => Packet::Transition(TransitionPacket::decode(payload)?),
        PacketKey::LagFrameChunk => Packet::LagFrameChunk(LagFrameChunkPacket::decode(payload)?),
        PacketKey::MovieTransition => {
            Packet::MovieTransition(MovieTransitionPacket::decode(payload)?)
        }
        PacketKey::Comment => Packet::Comment(CommentPacket::decode(payload)?),
        PacketKey::Experimental => Packet::Experimental(ExperimentalPacket::decode(payload)?),
        PacketKey::Unspecified => Packet::Unspecified(UnspecifiedPacket::decode(payload)?),
    };
    Ok(packet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_key_decodes_to_its_variant() {
        // Long enough for every fixed layout; strings are empty.
        let payload = [0u8; 16];
        for key in PacketKey::ALL {
            let packet = decode(key.into(), &payload)
                .unwrap_or_else(|e| panic!("{key} failed to decode: {e}"));
            assert_eq!(packet.key(), u16::from(key), "{key}");
            assert!(!matches!(packet, Packet::Unknown(_)), "{key}");
        }
    }

    #[test]
    fn test_unknown_key_passthrough() {
        let packet = decode(0x1234, &[0xDE, 0xAD]).unwrap();
        assert_eq!(
            packet,
            Packet::Unknown(UnknownPacket::new(0x1234, vec![0xDE, 0xAD]))
        );
        assert_eq!(packet.encode(2).unwrap(), vec![0x12, 0x34, 0x01, 0x02, 0xDE, 0xAD]);
    }

    #[test]
    fn test_short_payload_is_malformed() {
        let err = decode(PacketKey::TotalFrames.into(), &[0x00, 0x01]).unwrap_err();
        assert!(matches!(err, TasdError::MalformedPacket { key: 0x000D, .. }));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let err = decode(PacketKey::Comment.into(), &[0xFF, 0xFE]).unwrap_err();
        assert!(matches!(err, TasdError::MalformedPacket { key: 0xFF01, .. }));
    }
}
