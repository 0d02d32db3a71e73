//! Packet keys and the named value tables used inside packet payloads.
//!
//! The numeric values are fixed by the TASD format and must never be
//! renumbered. Value tables are descriptive: packet fields keep the raw
//! integer so values outside a table still round-trip unchanged.

use std::fmt;

/// Magic bytes at the start of every TASD file (`"TASD"`).
pub const MAGIC: [u8; 4] = [0x54, 0x41, 0x53, 0x44];

/// The only format version this crate reads and writes.
pub const SUPPORTED_VERSION: u16 = 1;

/// The only global key width (bytes per record key) this crate supports.
pub const SUPPORTED_KEY_WIDTH: u8 = 2;

/// Size of the fixed file header: magic, version, key width.
pub const HEADER_SIZE: usize = 7;

// ── Packet keys ────────────────────────────────────────────────────────────

/// Every packet key known to the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum PacketKey {
    // General
    ConsoleType = 0x0001,
    ConsoleRegion = 0x0002,
    GameTitle = 0x0003,
    RomName = 0x0004,
    Attribution = 0x0005,
    Category = 0x0006,
    EmulatorName = 0x0007,
    EmulatorVersion = 0x0008,
    EmulatorCore = 0x0009,
    TasLastModified = 0x000A,
    DumpCreated = 0x000B,
    DumpLastModified = 0x000C,
    TotalFrames = 0x000D,
    Rerecords = 0x000E,
    SourceLink = 0x000F,
    BlankFrames = 0x0010,
    Verified = 0x0011,
    MemoryInit = 0x0012,
    GameIdentifier = 0x0013,
    MovieLicense = 0x0014,
    MovieFile = 0x0015,
    PortController = 0x00F0,
    PortOverread = 0x00F1,
    // NES
    NesLatchFilter = 0x0101,
    NesClockFilter = 0x0102,
    NesOverread = 0x0103,
    NesGameGenieCode = 0x0104,
    // SNES
    SnesClockFilter = 0x0202,
    SnesOverread = 0x0203,
    SnesGameGenieCode = 0x0204,
    SnesLatchTrain = 0x0205,
    // Genesis
    GenesisGameGenieCode = 0x0804,
    // Input frame / timing
    InputChunk = 0xFE01,
    InputMoment = 0xFE02,
    Transition = 0xFE03,
    LagFrameChunk = 0xFE04,
    MovieTransition = 0xFE05,
    // Extras
    Comment = 0xFF01,
    Experimental = 0xFFFE,
    Unspecified = 0xFFFF,
}

impl PacketKey {
    /// All keys, in numeric order.
    pub const ALL: [PacketKey; 40] = [
        Self::ConsoleType,
        Self::ConsoleRegion,
        Self::GameTitle,
        Self::RomName,
        Self::Attribution,
        Self::Category,
        Self::EmulatorName,
        Self::EmulatorVersion,
        Self::EmulatorCore,
        Self::TasLastModified,
        Self::DumpCreated,
        Self::DumpLastModified,
        Self::TotalFrames,
        Self::Rerecords,
        Self::SourceLink,
        Self::BlankFrames,
        Self::Verified,
        Self::MemoryInit,
        Self::GameIdentifier,
        Self::MovieLicense,
        Self::MovieFile,
        Self::PortController,
        Self::PortOverread,
        Self::NesLatchFilter,
        Self::NesClockFilter,
        Self::NesOverread,
        Self::NesGameGenieCode,
        Self::SnesClockFilter,
        Self::SnesOverread,
        Self::SnesGameGenieCode,
        Self::SnesLatchTrain,
        Self::GenesisGameGenieCode,
        Self::InputChunk,
        Self::InputMoment,
        Self::Transition,
        Self::LagFrameChunk,
        Self::MovieTransition,
        Self::Comment,
        Self::Experimental,
        Self::Unspecified,
    ];

    /// The upper-snake name used by the format documentation.
    pub fn name(self) -> &'static str {
        match self {
            Self::ConsoleType => "CONSOLE_TYPE",
            Self::ConsoleRegion => "CONSOLE_REGION",
            Self::GameTitle => "GAME_TITLE",
            Self::RomName => "ROM_NAME",
            Self::Attribution => "ATTRIBUTION",
            Self::Category => "CATEGORY",
            Self::EmulatorName => "EMULATOR_NAME",
            Self::EmulatorVersion => "EMULATOR_VERSION",
            Self::EmulatorCore => "EMULATOR_CORE",
            Self::TasLastModified => "TAS_LAST_MODIFIED",
            Self::DumpCreated => "DUMP_CREATED",
            Self::DumpLastModified => "DUMP_LAST_MODIFIED",
            Self::TotalFrames => "TOTAL_FRAMES",
            Self::Rerecords => "RERECORDS",
            Self::SourceLink => "SOURCE_LINK",
            Self::BlankFrames => "BLANK_FRAMES",
            Self::Verified => "VERIFIED",
            Self::MemoryInit => "MEMORY_INIT",
            Self::GameIdentifier => "GAME_IDENTIFIER",
            Self::MovieLicense => "MOVIE_LICENSE",
            Self::MovieFile => "MOVIE_FILE",
            Self::PortController => "PORT_CONTROLLER",
            Self::PortOverread => "PORT_OVERREAD",
            Self::NesLatchFilter => "NES_LATCH_FILTER",
            Self::NesClockFilter => "NES_CLOCK_FILTER",
            Self::NesOverread => "NES_OVERREAD",
            Self::NesGameGenieCode => "NES_GAME_GENIE_CODE",
            Self::SnesClockFilter => "SNES_CLOCK_FILTER",
            Self::SnesOverread => "SNES_OVERREAD",
            Self::SnesGameGenieCode => "SNES_GAME_GENIE_CODE",
            Self::SnesLatchTrain => "SNES_LATCH_TRAIN",
            Self::GenesisGameGenieCode => "GENESIS_GAME_GENIE_CODE",
            Self::InputChunk => "INPUT_CHUNK",
            Self::InputMoment => "INPUT_MOMENT",
            Self::Transition => "TRANSITION",
            Self::LagFrameChunk => "LAG_FRAME_CHUNK",
            Self::MovieTransition => "MOVIE_TRANSITION",
            Self::Comment => "COMMENT",
            Self::Experimental => "EXPERIMENTAL",
            Self::Unspecified => "UNSPECIFIED",
        }
    }
}

impl From<PacketKey> for u16 {
    fn from(key: PacketKey) -> u16 {
        key as u16
    }
}

impl TryFrom<u16> for PacketKey {
    type Error = u16;
    fn try_from(v: u16) -> Result<Self, u16> {
        Self::ALL.iter().copied().find(|k| *k as u16 == v).ok_or(v)
    }
}

impl fmt::Display for PacketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name of a raw packet key, or `Unknown Packet <HEX>` when it is not known.
///
/// ```
/// use tasd::packet_name;
///
/// assert_eq!(packet_name(0xFE01), "INPUT_CHUNK");
/// assert_eq!(packet_name(0x1234), "Unknown Packet 1234");
/// ```
pub fn packet_name(key: u16) -> String {
    match PacketKey::try_from(key) {
        Ok(k) => k.name().to_owned(),
        Err(raw) => format!("Unknown Packet {raw:X}"),
    }
}

// ── Value tables ───────────────────────────────────────────────────────────

/// A table of named values for one payload field.
pub trait ValueName: Copy {
    fn name(self) -> &'static str;
}

/// Renders a raw field value with its table name when it has one.
pub(crate) fn label<T, R>(raw: R) -> String
where
    T: ValueName + TryFrom<R>,
    R: Copy + fmt::LowerHex,
{
    match T::try_from(raw) {
        Ok(v) => v.name().to_owned(),
        Err(_) => format!("0x{raw:x}"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConsoleType {
    Nes = 0x01,
    Snes = 0x02,
    N64 = 0x03,
    Gc = 0x04,
    Gb = 0x05,
    Gbc = 0x06,
    Gba = 0x07,
    Genesis = 0x08,
    A2600 = 0x09,
    Custom = 0xFF,
}

impl TryFrom<u8> for ConsoleType {
    type Error = u8;
    fn try_from(v: u8) -> Result<Self, u8> {
        match v {
            0x01 => Ok(Self::Nes),
            0x02 => Ok(Self::Snes),
            0x03 => Ok(Self::N64),
            0x04 => Ok(Self::Gc),
            0x05 => Ok(Self::Gb),
            0x06 => Ok(Self::Gbc),
            0x07 => Ok(Self::Gba),
            0x08 => Ok(Self::Genesis),
            0x09 => Ok(Self::A2600),
            0xFF => Ok(Self::Custom),
            other => Err(other),
        }
    }
}

impl ValueName for ConsoleType {
    fn name(self) -> &'static str {
        match self {
            Self::Nes => "NES",
            Self::Snes => "SNES",
            Self::N64 => "N64",
            Self::Gc => "GC",
            Self::Gb => "GB",
            Self::Gbc => "GBC",
            Self::Gba => "GBA",
            Self::Genesis => "GENESIS",
            Self::A2600 => "A2600",
            Self::Custom => "CUSTOM",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConsoleRegion {
    Ntsc = 0x01,
    Pal = 0x02,
    Other = 0xFF,
}

impl TryFrom<u8> for ConsoleRegion {
    type Error = u8;
    fn try_from(v: u8) -> Result<Self, u8> {
        match v {
            0x01 => Ok(Self::Ntsc),
            0x02 => Ok(Self::Pal),
            0xFF => Ok(Self::Other),
            other => Err(other),
        }
    }
}

impl ValueName for ConsoleRegion {
    fn name(self) -> &'static str {
        match self {
            Self::Ntsc => "NTSC",
            Self::Pal => "PAL",
            Self::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AttributionType {
    Author = 0x01,
    Verifier = 0x02,
    TasdFileCreator = 0x03,
    TasdFileEditor = 0x04,
    Other = 0xFF,
}

impl TryFrom<u8> for AttributionType {
    type Error = u8;
    fn try_from(v: u8) -> Result<Self, u8> {
        match v {
            0x01 => Ok(Self::Author),
            0x02 => Ok(Self::Verifier),
            0x03 => Ok(Self::TasdFileCreator),
            0x04 => Ok(Self::TasdFileEditor),
            0xFF => Ok(Self::Other),
            other => Err(other),
        }
    }
}

impl ValueName for AttributionType {
    fn name(self) -> &'static str {
        match self {
            Self::Author => "AUTHOR",
            Self::Verifier => "VERIFIER",
            Self::TasdFileCreator => "TASD_FILE_CREATOR",
            Self::TasdFileEditor => "TASD_FILE_EDITOR",
            Self::Other => "OTHER",
        }
    }
}

/// How a memory region is initialised before playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MemoryInitType {
    None = 0x01,
    All00 = 0x02,
    AllFf = 0x03,
    Pattern00000000Ffffffff = 0x04,
    Random = 0x05,
    Custom = 0xFF,
}

impl TryFrom<u8> for MemoryInitType {
    type Error = u8;
    fn try_from(v: u8) -> Result<Self, u8> {
        match v {
            0x01 => Ok(Self::None),
            0x02 => Ok(Self::All00),
            0x03 => Ok(Self::AllFf),
            0x04 => Ok(Self::Pattern00000000Ffffffff),
            0x05 => Ok(Self::Random),
            0xFF => Ok(Self::Custom),
            other => Err(other),
        }
    }
}

impl ValueName for MemoryInitType {
    fn name(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::All00 => "ALL_00",
            Self::AllFf => "ALL_FF",
            Self::Pattern00000000Ffffffff => "PATTERN_00000000FFFFFFFF",
            Self::Random => "RANDOM",
            Self::Custom => "CUSTOM",
        }
    }
}

/// Memory device targeted by a memory-init packet. High byte is the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum MemoryDevice {
    NesCpuRam = 0x0101,
    NesCartSram = 0x0102,
    SnesCpuRam = 0x0201,
    SnesCartSram = 0x0202,
    GbCpuRam = 0x0501,
    GbCartSram = 0x0502,
    GbcCpuRam = 0x0601,
    GbcCartSram = 0x0602,
    GbaCpuRam = 0x0701,
    GbaCartSram = 0x0702,
    GenesisCpuRam = 0x0801,
    GenesisCartSram = 0x0802,
    A2600CpuRam = 0x0901,
    A2600CartSram = 0x0902,
    Custom = 0xFFFF,
}

impl TryFrom<u16> for MemoryDevice {
    type Error = u16;
    fn try_from(v: u16) -> Result<Self, u16> {
        match v {
            0x0101 => Ok(Self::NesCpuRam),
            0x0102 => Ok(Self::NesCartSram),
            0x0201 => Ok(Self::SnesCpuRam),
            0x0202 => Ok(Self::SnesCartSram),
            0x0501 => Ok(Self::GbCpuRam),
            0x0502 => Ok(Self::GbCartSram),
            0x0601 => Ok(Self::GbcCpuRam),
            0x0602 => Ok(Self::GbcCartSram),
            0x0701 => Ok(Self::GbaCpuRam),
            0x0702 => Ok(Self::GbaCartSram),
            0x0801 => Ok(Self::GenesisCpuRam),
            0x0802 => Ok(Self::GenesisCartSram),
            0x0901 => Ok(Self::A2600CpuRam),
            0x0902 => Ok(Self::A2600CartSram),
            0xFFFF => Ok(Self::Custom),
            other => Err(other),
        }
    }
}

impl ValueName for MemoryDevice {
    fn name(self) -> &'static str {
        match self {
            Self::NesCpuRam => "NES_CPU_RAM",
            Self::NesCartSram => "NES_CART_SRAM",
            Self::SnesCpuRam => "SNES_CPU_RAM",
            Self::SnesCartSram => "SNES_CART_SRAM",
            Self::GbCpuRam => "GB_CPU_RAM",
            Self::GbCartSram => "GB_CART_SRAM",
            Self::GbcCpuRam => "GBC_CPU_RAM",
            Self::GbcCartSram => "GBC_CART_SRAM",
            Self::GbaCpuRam => "GBA_CPU_RAM",
            Self::GbaCartSram => "GBA_CART_SRAM",
            Self::GenesisCpuRam => "GENESIS_CPU_RAM",
            Self::GenesisCartSram => "GENESIS_CART_SRAM",
            Self::A2600CpuRam => "A2600_CPU_RAM",
            Self::A2600CartSram => "A2600_CART_SRAM",
            Self::Custom => "CUSTOM",
        }
    }
}

/// Hash or identifier algorithm of a game-identifier packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IdentifierType {
    Md5 = 0x01,
    Sha1 = 0x02,
    Sha224 = 0x03,
    Sha256 = 0x04,
    Sha384 = 0x05,
    Sha512 = 0x06,
    Sha512_224 = 0x07,
    Sha512_256 = 0x08,
    Sha3_224 = 0x09,
    Sha3_256 = 0x0A,
    Sha3_384 = 0x0B,
    Sha3_512 = 0x0C,
    Shake128 = 0x0D,
    Shake256 = 0x0E,
    Other = 0xFF,
}

impl TryFrom<u8> for IdentifierType {
    type Error = u8;
    fn try_from(v: u8) -> Result<Self, u8> {
        match v {
            0x01 => Ok(Self::Md5),
            0x02 => Ok(Self::Sha1),
            0x03 => Ok(Self::Sha224),
            0x04 => Ok(Self::Sha256),
            0x05 => Ok(Self::Sha384),
            0x06 => Ok(Self::Sha512),
            0x07 => Ok(Self::Sha512_224),
            0x08 => Ok(Self::Sha512_256),
            0x09 => Ok(Self::Sha3_224),
            0x0A => Ok(Self::Sha3_256),
            0x0B => Ok(Self::Sha3_384),
            0x0C => Ok(Self::Sha3_512),
            0x0D => Ok(Self::Shake128),
            0x0E => Ok(Self::Shake256),
            0xFF => Ok(Self::Other),
            other => Err(other),
        }
    }
}

impl ValueName for IdentifierType {
    fn name(self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA1",
            Self::Sha224 => "SHA224",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
            Self::Sha512_224 => "SHA512_224",
            Self::Sha512_256 => "SHA512_256",
            Self::Sha3_224 => "SHA3_224",
            Self::Sha3_256 => "SHA3_256",
            Self::Sha3_384 => "SHA3_384",
            Self::Sha3_512 => "SHA3_512",
            Self::Shake128 => "SHAKE_128",
            Self::Shake256 => "SHAKE_256",
            Self::Other => "OTHER",
        }
    }
}

/// Text encoding of the identifier bytes in a game-identifier packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IdentifierBase {
    RawBinary = 0x01,
    Base16 = 0x02,
    Base32 = 0x03,
    Base64 = 0x04,
    Other = 0xFF,
}

impl TryFrom<u8> for IdentifierBase {
    type Error = u8;
    fn try_from(v: u8) -> Result<Self, u8> {
        match v {
            0x01 => Ok(Self::RawBinary),
            0x02 => Ok(Self::Base16),
            0x03 => Ok(Self::Base32),
            0x04 => Ok(Self::Base64),
            0xFF => Ok(Self::Other),
            other => Err(other),
        }
    }
}

impl ValueName for IdentifierBase {
    fn name(self) -> &'static str {
        match self {
            Self::RawBinary => "RAW_BINARY",
            Self::Base16 => "BASE16",
            Self::Base32 => "BASE32",
            Self::Base64 => "BASE64",
            Self::Other => "OTHER",
        }
    }
}

/// Controller plugged into a port. High byte is the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ControllerType {
    NesStandardController = 0x0101,
    NesFourScore = 0x0102,
    NesZapper = 0x0103,
    NesPowerPad = 0x0104,
    FamicomFamilyBasicKeyboard = 0x0105,
    SnesStandardController = 0x0201,
    SnesSuperMultitap = 0x0202,
    SnesMouse = 0x0203,
    SnesSuperscope = 0x0204,
    N64StandardController = 0x0301,
    N64StandardControllerWithRumblePak = 0x0302,
    N64StandardControllerWithControllerPak = 0x0303,
    N64StandardControllerWithTransferPak = 0x0304,
    N64Mouse = 0x0305,
    N64VoiceRecognitionUnit = 0x0306,
    N64RandnetKeyboard = 0x0307,
    N64DenshaDeGo = 0x0308,
    GcStandardController = 0x0401,
    GcKeyboard = 0x0402,
    GbGamepad = 0x0501,
    GbcGamepad = 0x0601,
    GbaGamepad = 0x0701,
    Genesis3Button = 0x0801,
    Genesis6Button = 0x0802,
    A2600Joystick = 0x0901,
    A2600Paddle = 0x0902,
    A2600KeyboardController = 0x0903,
    OtherUnspecified = 0xFFFF,
}

impl ControllerType {
    const ALL: [ControllerType; 28] = [
        Self::NesStandardController,
        Self::NesFourScore,
        Self::NesZapper,
        Self::NesPowerPad,
        Self::FamicomFamilyBasicKeyboard,
        Self::SnesStandardController,
        Self::SnesSuperMultitap,
        Self::SnesMouse,
        Self::SnesSuperscope,
        Self::N64StandardController,
        Self::N64StandardControllerWithRumblePak,
        Self::N64StandardControllerWithControllerPak,
        Self::N64StandardControllerWithTransferPak,
        Self::N64Mouse,
        Self::N64VoiceRecognitionUnit,
        Self::N64RandnetKeyboard,
        Self::N64DenshaDeGo,
        Self::GcStandardController,
        Self::GcKeyboard,
        Self::GbGamepad,
        Self::GbcGamepad,
        Self::GbaGamepad,
        Self::Genesis3Button,
        Self::Genesis6Button,
        Self::A2600Joystick,
        Self::A2600Paddle,
        Self::A2600KeyboardController,
        Self::OtherUnspecified,
    ];
}

impl TryFrom<u16> for ControllerType {
    type Error = u16;
    fn try_from(v: u16) -> Result<Self, u16> {
        Self::ALL.iter().copied().find(|c| *c as u16 == v).ok_or(v)
    }
}

impl ValueName for ControllerType {
    fn name(self) -> &'static str {
        match self {
            Self::NesStandardController => "NES_STANDARD_CONTROLLER",
            Self::NesFourScore => "NES_FOUR_SCORE",
            Self::NesZapper => "NES_ZAPPER",
            Self::NesPowerPad => "NES_POWER_PAD",
            Self::FamicomFamilyBasicKeyboard => "FAMICOM_FAMILY_BASIC_KEYBOARD",
            Self::SnesStandardController => "SNES_STANDARD_CONTROLLER",
            Self::SnesSuperMultitap => "SNES_SUPER_MULTITAP",
            Self::SnesMouse => "SNES_MOUSE",
            Self::SnesSuperscope => "SNES_SUPERSCOPE",
            Self::N64StandardController => "N64_STANDARD_CONTROLLER",
            Self::N64StandardControllerWithRumblePak => "N64_STANDARD_CONTROLLER_WITH_RUMBLE_PAK",
            Self::N64StandardControllerWithControllerPak => {
                "N64_STANDARD_CONTROLLER_WITH_CONTROLLER_PAK"
            }
            Self::N64StandardControllerWithTransferPak => {
                "N64_STANDARD_CONTROLLER_WITH_TRANSFER_PAK"
            }
            Self::N64Mouse => "N64_MOUSE",
            Self::N64VoiceRecognitionUnit => "N64_VOICE_RECOGNITION_UNIT",
            Self::N64RandnetKeyboard => "N64_RANDNET_KEYBOARD",
            Self::N64DenshaDeGo => "N64_DENSHA_DE_GO",
            Self::GcStandardController => "GC_STANDARD_CONTROLLER",
            Self::GcKeyboard => "GC_KEYBOARD",
            Self::GbGamepad => "GB_GAMEPAD",
            Self::GbcGamepad => "GBC_GAMEPAD",
            Self::GbaGamepad => "GBA_GAMEPAD",
            Self::Genesis3Button => "GENESIS_3BUTTON",
            Self::Genesis6Button => "GENESIS_6BUTTON",
            Self::A2600Joystick => "A2600_JOYSTICK",
            Self::A2600Paddle => "A2600_PADDLE",
            Self::A2600KeyboardController => "A2600_KEYBOARD_CONTROLLER",
            Self::OtherUnspecified => "OTHER_UNSPECIFIED",
        }
    }
}

/// Unit of the timeline index carried by input moments and transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IndexType {
    Frame = 0x01,
    CycleCount = 0x02,
    Milliseconds = 0x03,
    MicrosecondsX10 = 0x04,
}

impl TryFrom<u8> for IndexType {
    type Error = u8;
    fn try_from(v: u8) -> Result<Self, u8> {
        match v {
            0x01 => Ok(Self::Frame),
            0x02 => Ok(Self::CycleCount),
            0x03 => Ok(Self::Milliseconds),
            0x04 => Ok(Self::MicrosecondsX10),
            other => Err(other),
        }
    }
}

impl ValueName for IndexType {
    fn name(self) -> &'static str {
        match self {
            Self::Frame => "FRAME",
            Self::CycleCount => "CYCLE_COUNT",
            Self::Milliseconds => "MILLISECONDS",
            Self::MicrosecondsX10 => "MICROSECONDS_X10",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TransitionType {
    SoftReset = 0x01,
    PowerReset = 0x02,
    RestartTasdFile = 0x03,
    PacketDerived = 0xFF,
}

impl TryFrom<u8> for TransitionType {
    type Error = u8;
    fn try_from(v: u8) -> Result<Self, u8> {
        match v {
            0x01 => Ok(Self::SoftReset),
            0x02 => Ok(Self::PowerReset),
            0x03 => Ok(Self::RestartTasdFile),
            0xFF => Ok(Self::PacketDerived),
            other => Err(other),
        }
    }
}

impl ValueName for TransitionType {
    fn name(self) -> &'static str {
        match self {
            Self::SoftReset => "SOFT_RESET",
            Self::PowerReset => "POWER_RESET",
            Self::RestartTasdFile => "RESTART_TASD_FILE",
            Self::PacketDerived => "PACKET_DERIVED",
        }
    }
}
