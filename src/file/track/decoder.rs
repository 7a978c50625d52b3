use super::{EventKind, RawEvent, Ticked, Track};
use crate::{
    Diagnostic,
    diagnostic::report,
    file::{MetaEvent, MetaType, Tempo},
    reader::{ReadResult, Reader, ReaderError},
};
use alloc::vec::Vec;

/// Channel voice messages, identified by the high nibble of their status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VoiceMessage {
    NoteOff,
    NoteOn,
    PolyAftertouch,
    ControlChange,
    ProgramChange,
    ChannelPressure,
    PitchBend,
}

impl VoiceMessage {
    /// Data bytes following the status byte
    const fn operand_count(self) -> usize {
        match self {
            Self::ProgramChange | Self::ChannelPressure => 1,
            _ => 2,
        }
    }
}

/// A status byte, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusClass {
    Voice {
        message: VoiceMessage,
        channel: u8,
        operands: usize,
    },
    /// `F0`
    SysEx,
    /// `F7`
    SysExContinuation,
    /// `FF`
    Meta,
    Unrecognized(u8),
}

impl StatusClass {
    pub(crate) const fn from_status(status: u8) -> Self {
        use VoiceMessage::*;
        let message = match status & 0xF0 {
            0x80 => NoteOff,
            0x90 => NoteOn,
            0xA0 => PolyAftertouch,
            0xB0 => ControlChange,
            0xC0 => ProgramChange,
            0xD0 => ChannelPressure,
            0xE0 => PitchBend,
            _ => {
                return match status {
                    0xF0 => Self::SysEx,
                    0xF7 => Self::SysExContinuation,
                    0xFF => Self::Meta,
                    other => Self::Unrecognized(other),
                };
            }
        };
        Self::Voice {
            message,
            channel: status & 0x0F,
            operands: message.operand_count(),
        }
    }

    /// Channel voice messages are the only ones running status applies to
    const fn keeps_running_status(&self) -> bool {
        matches!(self, Self::Voice { .. })
    }
}

/// What a decoded track contributes to the file
#[derive(Debug)]
pub(crate) struct DecodedTrack {
    pub track: Track,
    /// The first nonzero tempo in the track
    pub tempo: Option<Tempo>,
}

#[doc = r#"
Decodes the body of one `MTrk` chunk.

Holds the per-track state of the scan: the running status, the absolute tick
of the last event, and the first tempo seen. A decoder is consumed by
[`TrackDecoder::decode`], so no state leaks between tracks.
"#]
pub(crate) struct TrackDecoder<'d> {
    index: usize,
    diagnostics: &'d mut Vec<Diagnostic>,
    running_status: Option<u8>,
    tick: u64,
    tempo: Option<Tempo>,
    track: Track,
}

impl<'d> TrackDecoder<'d> {
    pub(crate) fn new(index: usize, diagnostics: &'d mut Vec<Diagnostic>) -> Self {
        Self {
            index,
            diagnostics,
            running_status: None,
            tick: 0,
            tempo: None,
            track: Track::default(),
        }
    }

    /// Decodes events from the reader's position, which must be just past the
    /// chunk's length field.
    ///
    /// Stops at an end of track event, or once the declared length is used up
    /// on an event boundary. Afterwards the reader is at the end of the chunk,
    /// or past it if the events overran the declared length.
    ///
    /// A declared length reaching past the end of the input is an
    /// [`UnexpectedEndOfInput`](crate::reader::ReaderErrorKind::UnexpectedEndOfInput).
    pub(crate) fn decode(
        mut self,
        reader: &mut Reader<'_>,
        declared: u32,
    ) -> ReadResult<DecodedTrack> {
        let start = reader.buffer_position();
        let end = start
            .checked_add(declared as usize)
            .filter(|end| *end <= reader.len())
            .ok_or(ReaderError::eoi(reader.len()))?;

        let mut ended = false;
        while reader.buffer_position() < end {
            if self.read_event(reader)? {
                ended = true;
                break;
            }
        }

        if !ended {
            self.report(Diagnostic::MissingEndOfTrack { track: self.index });
        }
        let consumed = reader.buffer_position() - start;
        if consumed != declared as usize {
            self.report(Diagnostic::TrackLengthMismatch {
                track: self.index,
                declared,
                consumed,
            });
        }
        if reader.buffer_position() < end {
            reader.set_buffer_position(end);
        }

        Ok(DecodedTrack {
            track: self.track,
            tempo: self.tempo,
        })
    }

    /// Reads one event. Returns true at the end of the track.
    fn read_event(&mut self, reader: &mut Reader<'_>) -> ReadResult<bool> {
        let delta_ticks = reader.read_vlq()?;
        self.tick += delta_ticks as u64;

        let position = reader.buffer_position();
        let mut status = reader.read_u8()?;
        if status < 0x80 {
            if let Some(running) = self.running_status {
                // a data byte: the status is implied by the previous event
                reader.unread_u8();
                status = running;
            }
        }

        let class = StatusClass::from_status(status);
        if !class.keeps_running_status() {
            self.running_status = None;
        }

        let mut event = RawEvent::other(delta_ticks);
        let mut end_of_track = false;

        match class {
            StatusClass::Voice {
                message,
                channel,
                operands,
            } => {
                self.running_status = Some(status);
                let data = reader.read_slice(operands)?;
                let (key, velocity) = (data[0], data.get(1).copied().unwrap_or(0));
                let kind = match message {
                    VoiceMessage::NoteOn if velocity == 0 => Some(EventKind::NoteOff),
                    VoiceMessage::NoteOn => Some(EventKind::NoteOn),
                    VoiceMessage::NoteOff => Some(EventKind::NoteOff),
                    _ => None,
                };
                if let Some(kind) = kind {
                    event = RawEvent {
                        kind,
                        key,
                        velocity,
                        channel,
                        delta_ticks,
                    };
                }
            }
            StatusClass::Meta => {
                let type_position = reader.buffer_position();
                let meta_type = reader.read_u8()?;
                let length = reader.read_vlq()?;
                let payload = reader.read_slice(length as usize)?;
                end_of_track = self.handle_meta(type_position, meta_type, length, payload);
            }
            StatusClass::SysEx | StatusClass::SysExContinuation => {
                let length = reader.read_vlq()?;
                reader.skip(length as usize)?;
            }
            StatusClass::Unrecognized(status) => {
                self.report(Diagnostic::UnrecognizedStatusByte {
                    track: self.index,
                    position,
                    status,
                });
            }
        }

        self.track.events.push(event);
        Ok(end_of_track)
    }

    /// Interprets a meta payload. Returns true for an end of track event.
    fn handle_meta(&mut self, position: usize, meta_type: u8, length: u32, payload: &[u8]) -> bool {
        let Ok(meta_type) = MetaType::try_from(meta_type) else {
            self.report(Diagnostic::UnrecognizedMetaType {
                track: self.index,
                position,
                meta_type,
                length,
            });
            return false;
        };

        let event = match MetaEvent::interpret(meta_type, payload) {
            Ok(event) => event,
            Err(error) => {
                self.report(Diagnostic::MalformedMeta {
                    track: self.index,
                    position,
                    error,
                });
                return false;
            }
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(track = self.index, tick = self.tick, "{event:?}");

        match &event {
            MetaEvent::TrackName(name) => self.track.name = Some(name.clone()),
            MetaEvent::InstrumentName(name) => self.track.instrument_name = Some(name.clone()),
            MetaEvent::Tempo(tempo) if self.tempo.is_none() && !tempo.is_unset() => {
                self.tempo = Some(*tempo)
            }
            _ => {}
        }
        let end_of_track = event == MetaEvent::EndOfTrack;
        self.track.meta.push(Ticked::new(self.tick, event));
        end_of_track
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        report(self.diagnostics, diagnostic);
    }
}

#[cfg(test)]
fn decode_body(body: &[u8]) -> (DecodedTrack, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let mut reader = Reader::from_byte_slice(body);
    let decoded = TrackDecoder::new(0, &mut diagnostics)
        .decode(&mut reader, body.len() as u32)
        .unwrap();
    (decoded, diagnostics)
}

#[test]
fn classify_status_bytes() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        StatusClass::from_status(0x93),
        StatusClass::Voice {
            message: VoiceMessage::NoteOn,
            channel: 3,
            operands: 2
        }
    );
    assert_eq!(
        StatusClass::from_status(0xC9),
        StatusClass::Voice {
            message: VoiceMessage::ProgramChange,
            channel: 9,
            operands: 1
        }
    );
    assert_eq!(StatusClass::from_status(0xF0), StatusClass::SysEx);
    assert_eq!(StatusClass::from_status(0xF7), StatusClass::SysExContinuation);
    assert_eq!(StatusClass::from_status(0xFF), StatusClass::Meta);
    assert_eq!(StatusClass::from_status(0xF8), StatusClass::Unrecognized(0xF8));
    assert_eq!(StatusClass::from_status(0x3C), StatusClass::Unrecognized(0x3C));
}

#[test]
fn running_status_matches_explicit_status() {
    use pretty_assertions::assert_eq;
    let explicit = [0x00, 0x91, 60, 80, 0x10, 0x91, 64, 70, 0x00, 0xFF, 0x2F, 0x00];
    let running = [0x00, 0x91, 60, 80, 0x10, 64, 70, 0x00, 0xFF, 0x2F, 0x00];
    let (explicit, _) = decode_body(&explicit);
    let (running, diagnostics) = decode_body(&running);
    assert_eq!(explicit.track.events, running.track.events);
    assert_eq!(
        running.track.events[1],
        RawEvent::note_on(0x10, 64, 70).with_channel(1)
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn running_status_across_other_voice_messages() {
    use pretty_assertions::assert_eq;
    // program change then a second program change in running status
    let body = [0x00, 0xC0, 5, 0x00, 6, 0x00, 0xFF, 0x2F, 0x00];
    let (decoded, diagnostics) = decode_body(&body);
    assert_eq!(decoded.track.events.len(), 3);
    assert!(decoded.track.events.iter().all(|e| e.kind == EventKind::Other));
    assert!(diagnostics.is_empty());
}

#[test]
fn zero_velocity_note_on_is_note_off() {
    use pretty_assertions::assert_eq;
    let body = [0x00, 0x90, 60, 0, 0x00, 0xFF, 0x2F, 0x00];
    let (decoded, _) = decode_body(&body);
    assert_eq!(decoded.track.events[0], RawEvent::note_off(0, 60));
}

#[test]
fn meta_resets_running_status() {
    use pretty_assertions::assert_eq;
    // the data byte after the text event has no status to borrow
    let body = [
        0x00, 0x90, 60, 80, 0x00, 0xFF, 0x01, 0x01, b'x', 0x00, 62, 0x00, 0xFF, 0x2F, 0x00,
    ];
    let (decoded, diagnostics) = decode_body(&body);
    assert_eq!(
        diagnostics[0],
        Diagnostic::UnrecognizedStatusByte {
            track: 0,
            position: 10,
            status: 62
        }
    );
    assert_eq!(decoded.track.events.len(), 4);
}

#[test]
fn sysex_is_skipped() {
    use pretty_assertions::assert_eq;
    let body = [
        0x00, 0xF0, 0x04, 0x43, 0x12, 0x00, 0xF7, 0x05, 0xF7, 0x01, 0xF7, 0x00, 0xFF, 0x2F, 0x00,
    ];
    let (decoded, diagnostics) = decode_body(&body);
    let deltas: Vec<u32> = decoded.track.events.iter().map(|e| e.delta_ticks).collect();
    assert_eq!(deltas, [0, 5, 0]);
    assert!(diagnostics.is_empty());
}

#[test]
fn unknown_meta_consumes_its_payload() {
    use pretty_assertions::assert_eq;
    let body = [
        0x00, 0xFF, 0x60, 0x03, 0x90, 0x90, 0x90, 0x00, 0x90, 60, 80, 0x00, 0xFF, 0x2F, 0x00,
    ];
    let (decoded, diagnostics) = decode_body(&body);
    assert_eq!(
        diagnostics,
        [Diagnostic::UnrecognizedMetaType {
            track: 0,
            position: 2,
            meta_type: 0x60,
            length: 3
        }]
    );
    assert_eq!(decoded.track.events[1], RawEvent::note_on(0, 60, 80));
}

#[test]
fn names_and_first_tempo() {
    use pretty_assertions::assert_eq;
    let body = [
        0x00, 0xFF, 0x03, 0x04, b'L', b'e', b'a', b'd', //
        0x00, 0xFF, 0x04, 0x05, b'P', b'i', b'a', b'n', b'o', //
        0x00, 0xFF, 0x51, 0x03, 0x00, 0x00, 0x00, // unset tempo
        0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, //
        0x00, 0xFF, 0x51, 0x03, 0x09, 0x27, 0xC0, //
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let (decoded, _) = decode_body(&body);
    assert_eq!(decoded.track.name(), Some("Lead"));
    assert_eq!(decoded.track.instrument_name(), Some("Piano"));
    assert_eq!(decoded.tempo, Some(Tempo::new(500_000)));
    assert_eq!(decoded.track.meta().len(), 6);
}

#[test]
fn stops_at_end_of_track() {
    use pretty_assertions::assert_eq;
    // bytes after the end of track are padding inside the chunk
    let body = [0x00, 0xFF, 0x2F, 0x00, 0xAA, 0xBB];
    let mut diagnostics = Vec::new();
    let mut reader = Reader::from_byte_slice(&body);
    let decoded = TrackDecoder::new(2, &mut diagnostics)
        .decode(&mut reader, body.len() as u32)
        .unwrap();
    assert_eq!(decoded.track.events.len(), 1);
    assert!(reader.is_empty());
    assert_eq!(
        diagnostics,
        [Diagnostic::TrackLengthMismatch {
            track: 2,
            declared: 6,
            consumed: 4
        }]
    );
}

#[test]
fn missing_end_of_track_is_tolerated() {
    use pretty_assertions::assert_eq;
    let body = [0x00, 0x90, 60, 80, 0x60, 0x80, 60, 0];
    let (decoded, diagnostics) = decode_body(&body);
    assert_eq!(decoded.track.events.len(), 2);
    assert_eq!(diagnostics, [Diagnostic::MissingEndOfTrack { track: 0 }]);
}

#[test]
fn truncated_event_is_fatal() {
    let body = [0x00, 0x90, 60];
    let mut diagnostics = Vec::new();
    let mut reader = Reader::from_byte_slice(&body);
    let err = TrackDecoder::new(0, &mut diagnostics)
        .decode(&mut reader, 10)
        .unwrap_err();
    assert!(err.is_unexpected_end());
}

#[test]
fn chunk_longer_than_input_is_fatal() {
    use pretty_assertions::assert_eq;
    // a complete note pair, but the chunk claims the end of track too
    let body = [0x00, 0x90, 60, 80, 0x60, 0x80, 60, 0];
    let mut diagnostics = Vec::new();
    let mut reader = Reader::from_byte_slice(&body);
    let err = TrackDecoder::new(0, &mut diagnostics)
        .decode(&mut reader, 12)
        .unwrap_err();
    assert!(err.is_unexpected_end());
    assert_eq!(err.position(), body.len());
    assert!(diagnostics.is_empty());
}
