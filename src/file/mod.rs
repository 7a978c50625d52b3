#![doc = r#"
Rusty representation of a [`MidiFile`]

# Layout
```text
[Header Chunk: "MThd"]
[Track Chunk 1: "MTrk"]
...
[Track Chunk N: "MTrk"]
```
The header announces how many track chunks follow. Each track chunk is a
stream of delta-timed events, decoded into a [`Track`].
"#]

/// Contains the [`MidiFileBuilder`](builder::MidiFileBuilder)
pub mod builder;

mod format;
pub use format::*;

mod header;
pub use header::*;

mod meta;
pub use meta::*;

mod timing;
pub use timing::*;

mod track;
pub use track::{EventKind, KEY_SENTINEL, RawEvent, Ticked, TickedEvents, Track};

use crate::{
    Diagnostic, ParseError, SmpteError,
    reader::{ReadResult, Reader},
};
use alloc::{borrow::Cow, vec::Vec};
use builder::MidiFileBuilder;

/// Settings for [`MidiFile::parse_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Skip chunks that are not `MTrk` instead of failing.
    ///
    /// Skipped chunks do not count towards the header's track count.
    pub skip_unknown_chunks: bool,
    /// Reconstruct each track's notes after decoding it
    pub reconstruct_notes: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            skip_unknown_chunks: false,
            reconstruct_notes: true,
        }
    }
}

impl ParseOptions {
    /// Set [`ParseOptions::skip_unknown_chunks`]
    pub const fn with_skip_unknown_chunks(mut self, skip: bool) -> Self {
        self.skip_unknown_chunks = skip;
        self
    }

    /// Set [`ParseOptions::reconstruct_notes`]
    pub const fn with_reconstruct_notes(mut self, reconstruct: bool) -> Self {
        self.reconstruct_notes = reconstruct;
        self
    }
}

#[doc = r#"
A decoded Standard MIDI File.

Decoding is a single deterministic pass: structural problems (a bad chunk
id, input that ends early) fail the whole decode with a
[`ReaderError`](crate::reader::ReaderError), while problems inside events
are recovered from and listed in [`MidiFile::diagnostics`].
"#]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFile {
    pub(crate) header: RawHeader,
    pub(crate) tempo: Tempo,
    pub(crate) tracks: Vec<Track>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl MidiFile {
    /// Parse a set of bytes into a file struct
    pub fn parse<'a, B>(bytes: B) -> ReadResult<Self>
    where
        B: Into<Cow<'a, [u8]>>,
    {
        Self::parse_with(bytes, ParseOptions::default())
    }

    /// Parse a set of bytes with the given options
    pub fn parse_with<'a, B>(bytes: B, options: ParseOptions) -> ReadResult<Self>
    where
        B: Into<Cow<'a, [u8]>>,
    {
        let mut reader = Reader::from_bytes(bytes);
        let header = RawHeader::read(&mut reader)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            format = header.format(),
            tracks = header.track_count(),
            division = header.division(),
            "decoded header"
        );

        let mut builder = MidiFileBuilder::new(header, options);
        while !builder.is_complete() {
            builder.handle_chunk(&mut reader)?;
        }
        Ok(builder.build())
    }

    /// Reads and parses a file from disk
    #[cfg(feature = "std")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, crate::LoadError> {
        let bytes = std::fs::read(path)?;
        Ok(Self::parse(bytes)?)
    }

    /// Returns the header as read
    pub fn header(&self) -> &RawHeader {
        &self.header
    }

    /// The raw format number from the header
    pub fn format(&self) -> u16 {
        self.header.format()
    }

    /// Returns the format type for the file.
    pub fn format_type(&self) -> Result<FormatType, ParseError> {
        self.header.format_type()
    }

    /// Returns header timing info
    pub fn timing(&self) -> Result<Timing, SmpteError> {
        self.header.timing()
    }

    /// Microseconds per quarter note from the file's first tempo event,
    /// or 0 if there is none
    pub fn tempo(&self) -> u32 {
        self.tempo.micros_per_quarter_note()
    }

    /// Beats per minute derived from [`MidiFile::tempo`], or 0 if there is none
    pub fn bpm(&self) -> u32 {
        self.tempo.bpm()
    }

    /// Returns the track list
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Takes the track list
    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }

    /// Recoverable problems found while decoding, in the order found
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// True if an unrecognized status byte may have thrown off decoding
    pub fn is_desynchronized(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::desynchronizes)
    }

    /// Every event of every track with its track index and absolute tick.
    ///
    /// Tracks follow one another; events are not merged across tracks.
    pub fn ticked_events(&self) -> impl Iterator<Item = (usize, Ticked<&RawEvent>)> + '_ {
        self.tracks
            .iter()
            .enumerate()
            .flat_map(|(index, track)| track.ticked_events().map(move |event| (index, event)))
    }
}
