use crate::file::MetaType;
use thiserror::Error;

#[doc = r#"
Structural problems that make a MIDI file unreadable.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The file does not begin with an `MThd` chunk
    #[error("Invalid header chunk id {0:02X?}, expected \"MThd\"")]
    InvalidHeaderMagic([u8; 4]),
    /// A track chunk does not begin with `MTrk`
    #[error("Invalid track chunk id {0:02X?}, expected \"MTrk\"")]
    InvalidTrackMagic([u8; 4]),
    /// A variable length quantity overflowed 32 bits
    #[error("Variable length quantity does not fit in 32 bits")]
    VlqOverflow,
    /// A key value had its leading bit set
    #[error("Key {0} is out of range (0-127)")]
    KeyOutOfRange(u8),
    /// The header names a format other than 0, 1 or 2
    #[error("Unknown file format {0}")]
    UnknownFormat(u16),
    /// Smpte timing errors
    #[error("Smpte: {0}")]
    Smpte(#[from] SmpteError),
}

/// A meta event payload that could not be interpreted.
///
/// These are never fatal, see [`Diagnostic::MalformedMeta`](crate::Diagnostic::MalformedMeta).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetaError {
    /// The payload length does not match what the meta type requires
    #[error("{meta_type:?} expects {expected} bytes, found {found}")]
    Length {
        /// The meta type being interpreted
        meta_type: MetaType,
        /// Payload bytes the type requires
        expected: usize,
        /// Payload bytes declared by the event
        found: usize,
    },
    /// The SMPTE offset payload is invalid
    #[error("Smpte: {0}")]
    Smpte(#[from] SmpteError),
}

/// Errors reading SMPTE header timing or SMPTE offset payloads
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteError {
    /// The header division names a frame rate other than -24, -25, -29 or -30
    #[error("Invalid frame rate in header division: {0}")]
    HeaderFrameTime(i8),
    /// Offset payloads are exactly five bytes
    #[error("Invalid offset length: {0}")]
    Length(usize),
    /// The two frame rate bits are outside 0-3
    #[error("Invalid frame rate bits: {0}")]
    TrackFrame(u8),
    /// Hours above 23
    #[error("Invalid hour offset: {0}")]
    HourOffset(u8),
    /// Minutes above 59
    #[error("Invalid minute offset: {0}")]
    MinuteOffset(u8),
    /// Seconds above 59
    #[error("Invalid second offset: {0}")]
    SecondOffset(u8),
    /// Subframes above 99
    #[error("Invalid subframe offset: {0}")]
    Subframe(u8),
}

/// Errors produced by [`MidiFile::load`](crate::file::MidiFile::load)
#[cfg(feature = "std")]
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read from disk
    #[error("Io: {0}")]
    Io(#[from] std::io::Error),
    /// The bytes could not be decoded
    #[error(transparent)]
    Read(#[from] crate::reader::ReaderError),
}
