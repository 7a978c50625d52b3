use crate::{MetaError, file::MetaType};
use alloc::vec::Vec;
use thiserror::Error;

#[doc = r#"
A recoverable anomaly found while decoding a file.

Diagnostics never abort decoding. They are collected on the
[`MidiFile`](crate::file::MidiFile) in the order they were found and,
with the `tracing` feature, logged as warnings.

An [`UnrecognizedStatusByte`](Diagnostic::UnrecognizedStatusByte) means the
length of that event could not be known. Everything decoded after it in the
same track is best-effort.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Diagnostic {
    /// The header chunk declared a length other than 6
    #[error("Header declares length {declared}, expected 6")]
    HeaderLength {
        /// Declared header length
        declared: u32,
    },
    /// A status byte that starts no known event
    #[error("Track {track}: unrecognized status byte {status:#04X} at {position}")]
    UnrecognizedStatusByte {
        /// Index of the track chunk
        track: usize,
        /// Byte offset of the status byte
        position: usize,
        /// The offending byte
        status: u8,
    },
    /// A meta event type with no known meaning. Its payload was skipped.
    #[error("Track {track}: unrecognized meta type {meta_type:#04X} ({length} bytes) at {position}")]
    UnrecognizedMetaType {
        /// Index of the track chunk
        track: usize,
        /// Byte offset of the meta type byte
        position: usize,
        /// The unknown type byte
        meta_type: u8,
        /// Declared payload length
        length: u32,
    },
    /// A known meta event whose payload could not be interpreted
    #[error("Track {track}: malformed meta event at {position}: {error}")]
    MalformedMeta {
        /// Index of the track chunk
        track: usize,
        /// Byte offset of the meta type byte
        position: usize,
        /// What was wrong with the payload
        error: MetaError,
    },
    /// A track chunk ended without an end of track meta event
    #[error("Track {track}: no end of track event before the chunk ended")]
    MissingEndOfTrack {
        /// Index of the track chunk
        track: usize,
    },
    /// The bytes consumed by a track differ from its declared chunk length
    #[error("Track {track}: declared {declared} bytes, decoded {consumed}")]
    TrackLengthMismatch {
        /// Index of the track chunk
        track: usize,
        /// Chunk length from the chunk header
        declared: u32,
        /// Bytes actually consumed by the event decoder
        consumed: usize,
    },
    /// A chunk that is not a track was skipped
    #[error("Skipped unknown chunk {id:02X?} ({length} bytes)")]
    SkippedChunk {
        /// The chunk identifier
        id: [u8; 4],
        /// Declared chunk length
        length: u32,
    },
    /// Note ons that were never closed. They are not part of the track's notes.
    #[error("Track {track}: {count} note(s) were never released")]
    UnclosedNotes {
        /// Index of the track
        track: usize,
        /// Number of dropped notes
        count: usize,
    },
}

impl Diagnostic {
    /// The track this diagnostic refers to, if any
    pub const fn track(&self) -> Option<usize> {
        use Diagnostic::*;
        match self {
            HeaderLength { .. } | SkippedChunk { .. } => None,
            UnrecognizedStatusByte { track, .. }
            | UnrecognizedMetaType { track, .. }
            | MalformedMeta { track, .. }
            | MissingEndOfTrack { track }
            | TrackLengthMismatch { track, .. }
            | UnclosedNotes { track, .. } => Some(*track),
        }
    }

    /// True if decoding of the rest of the track may be unreliable
    pub const fn desynchronizes(&self) -> bool {
        matches!(self, Diagnostic::UnrecognizedStatusByte { .. })
    }
}

/// Records a diagnostic, logging it when tracing is enabled
pub(crate) fn report(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    #[cfg(feature = "tracing")]
    tracing::warn!("{diagnostic}");
    diagnostics.push(diagnostic);
}
