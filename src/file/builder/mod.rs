use super::{
    MidiFile, ParseOptions, RawHeader, Tempo, Track, header::HEADER_LENGTH, track::TrackDecoder,
};
use crate::{
    Diagnostic, ParseError,
    diagnostic::report,
    reader::{ReadResult, Reader, ReaderError},
};
use alloc::vec::Vec;

/// Assembles a [`MidiFile`] from its header and chunks.
///
/// Tracks are decoded in file order, which is also the order the file tempo
/// is resolved in: the first nonzero tempo of the lowest-indexed track wins.
#[derive(Debug)]
pub struct MidiFileBuilder {
    options: ParseOptions,
    header: RawHeader,
    tempo: Tempo,
    tracks: Vec<Track>,
    diagnostics: Vec<Diagnostic>,
}

impl MidiFileBuilder {
    /// Start a file from its decoded header
    pub fn new(header: RawHeader, options: ParseOptions) -> Self {
        let mut diagnostics = Vec::new();
        if header.length() != HEADER_LENGTH {
            report(
                &mut diagnostics,
                Diagnostic::HeaderLength {
                    declared: header.length(),
                },
            );
        }
        Self {
            options,
            header,
            tempo: Tempo::UNSET,
            tracks: Vec::new(),
            diagnostics,
        }
    }

    /// Tracks decoded so far
    pub fn tracks_read(&self) -> usize {
        self.tracks.len()
    }

    /// True once as many tracks as the header announced have been decoded
    pub fn is_complete(&self) -> bool {
        self.tracks.len() >= self.header.track_count() as usize
    }

    /// Handles the chunk at the reader's position.
    ///
    /// `MTrk` chunks are decoded into a track. Other chunks are skipped if
    /// [`ParseOptions::skip_unknown_chunks`] is set, and fail with
    /// [`ParseError::InvalidTrackMagic`] otherwise.
    pub fn handle_chunk(&mut self, reader: &mut Reader<'_>) -> ReadResult<()> {
        let start = reader.buffer_position();
        let id: [u8; 4] = reader.read_exact_size()?;
        let length = reader.read_u32_be()?;

        if &id != b"MTrk" {
            if !self.options.skip_unknown_chunks {
                return Err(ReaderError::parse_error(
                    start,
                    ParseError::InvalidTrackMagic(id),
                ));
            }
            reader.skip(length as usize)?;
            report(&mut self.diagnostics, Diagnostic::SkippedChunk { id, length });
            return Ok(());
        }

        let index = self.tracks.len();
        let decoded = TrackDecoder::new(index, &mut self.diagnostics).decode(reader, length)?;
        let mut track = decoded.track;

        if self.tempo.is_unset() {
            if let Some(tempo) = decoded.tempo {
                self.tempo = tempo;
            }
        }

        if self.options.reconstruct_notes {
            let unclosed = track.reconstruct_notes();
            if unclosed > 0 {
                report(
                    &mut self.diagnostics,
                    Diagnostic::UnclosedNotes {
                        track: index,
                        count: unclosed,
                    },
                );
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            track = index,
            name = track.name(),
            events = track.events().len(),
            notes = track.notes().len(),
            "decoded track"
        );

        self.tracks.push(track);
        Ok(())
    }

    /// Finish the file
    pub fn build(self) -> MidiFile {
        MidiFile {
            header: self.header,
            tempo: self.tempo,
            tracks: self.tracks,
            diagnostics: self.diagnostics,
        }
    }
}
