#![doc = r#"
Meta events: the `FF <type> <length> <payload>` sub-format of a track.

Only a handful of meta events matter outside of display:
[`MetaEvent::TrackName`] and [`MetaEvent::InstrumentName`] name the track,
the first [`MetaEvent::Tempo`] in the file sets the file tempo, and
[`MetaEvent::EndOfTrack`] stops the track decoder.
"#]

mod smpte_offset;
pub use smpte_offset::*;

mod signature;
pub use signature::*;

mod tempo;
pub use tempo::*;

use crate::MetaError;
use alloc::{string::String, vec::Vec};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Known meta event type bytes
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MetaType {
    SequenceNumber = 0x00,
    Text = 0x01,
    Copyright = 0x02,
    TrackName = 0x03,
    InstrumentName = 0x04,
    Lyric = 0x05,
    Marker = 0x06,
    CuePoint = 0x07,
    ProgramName = 0x08,
    DeviceName = 0x09,
    ChannelPrefix = 0x20,
    MidiPort = 0x21,
    EndOfTrack = 0x2F,
    SetTempo = 0x51,
    SmpteOffset = 0x54,
    TimeSignature = 0x58,
    KeySignature = 0x59,
    SequencerSpecific = 0x7F,
}

#[doc = r#"
A decoded meta event.

Text payloads are decoded lossily; MIDI text is nominally ASCII but files in
the wild carry Latin-1 and Shift JIS.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetaEvent {
    /// Pattern number. Absent when the payload is empty.
    SequenceNumber(Option<u16>),
    /// Free text
    Text(String),
    /// Copyright notice
    Copyright(String),
    /// Sequence or track name
    TrackName(String),
    /// Instrument name
    InstrumentName(String),
    /// A lyric syllable
    Lyric(String),
    /// Rehearsal letter or section name
    Marker(String),
    /// Something happening on stage or film at this point
    CuePoint(String),
    /// Program (patch) name
    ProgramName(String),
    /// Device (port) name
    DeviceName(String),
    /// Channel that following sysex and meta events refer to
    ChannelPrefix(u8),
    /// Output port of the track
    MidiPort(u8),
    /// The end of the track
    EndOfTrack,
    /// Microseconds per quarter note
    Tempo(Tempo),
    /// Track start time
    SmpteOffset(SmpteOffset),
    /// Time signature
    TimeSignature(TimeSignature),
    /// Key signature
    KeySignature(KeySignature),
    /// Opaque sequencer data
    SequencerSpecific(Vec<u8>),
}

impl MetaEvent {
    /// Interprets a meta payload.
    ///
    /// The payload must already be exactly the declared length, so an error
    /// here never leaves the stream out of step.
    pub fn interpret(meta_type: MetaType, payload: &[u8]) -> Result<Self, MetaError> {
        use MetaType as T;
        let text = || String::from_utf8_lossy(payload).into_owned();
        let event = match meta_type {
            T::SequenceNumber => match *payload {
                [] => Self::SequenceNumber(None),
                [msb, lsb] => Self::SequenceNumber(Some(u16::from_be_bytes([msb, lsb]))),
                _ => return Err(length_error(meta_type, 2, payload)),
            },
            T::Text => Self::Text(text()),
            T::Copyright => Self::Copyright(text()),
            T::TrackName => Self::TrackName(text()),
            T::InstrumentName => Self::InstrumentName(text()),
            T::Lyric => Self::Lyric(text()),
            T::Marker => Self::Marker(text()),
            T::CuePoint => Self::CuePoint(text()),
            T::ProgramName => Self::ProgramName(text()),
            T::DeviceName => Self::DeviceName(text()),
            T::ChannelPrefix => Self::ChannelPrefix(single_byte(meta_type, payload)?),
            T::MidiPort => Self::MidiPort(single_byte(meta_type, payload)?),
            T::EndOfTrack => Self::EndOfTrack,
            T::SetTempo => {
                let bytes = fixed::<3>(meta_type, payload)?;
                Self::Tempo(Tempo::from_be_bytes(bytes))
            }
            T::SmpteOffset => Self::SmpteOffset(SmpteOffset::parse(payload)?),
            T::TimeSignature => {
                Self::TimeSignature(TimeSignature::from_bytes(fixed(meta_type, payload)?))
            }
            T::KeySignature => {
                Self::KeySignature(KeySignature::from_bytes(fixed(meta_type, payload)?))
            }
            T::SequencerSpecific => Self::SequencerSpecific(payload.to_vec()),
        };
        Ok(event)
    }

    /// The type byte this event was decoded from
    pub const fn meta_type(&self) -> MetaType {
        use MetaType as T;
        match self {
            Self::SequenceNumber(_) => T::SequenceNumber,
            Self::Text(_) => T::Text,
            Self::Copyright(_) => T::Copyright,
            Self::TrackName(_) => T::TrackName,
            Self::InstrumentName(_) => T::InstrumentName,
            Self::Lyric(_) => T::Lyric,
            Self::Marker(_) => T::Marker,
            Self::CuePoint(_) => T::CuePoint,
            Self::ProgramName(_) => T::ProgramName,
            Self::DeviceName(_) => T::DeviceName,
            Self::ChannelPrefix(_) => T::ChannelPrefix,
            Self::MidiPort(_) => T::MidiPort,
            Self::EndOfTrack => T::EndOfTrack,
            Self::Tempo(_) => T::SetTempo,
            Self::SmpteOffset(_) => T::SmpteOffset,
            Self::TimeSignature(_) => T::TimeSignature,
            Self::KeySignature(_) => T::KeySignature,
            Self::SequencerSpecific(_) => T::SequencerSpecific,
        }
    }

    /// The text of any of the text-carrying events
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(s)
            | Self::Copyright(s)
            | Self::TrackName(s)
            | Self::InstrumentName(s)
            | Self::Lyric(s)
            | Self::Marker(s)
            | Self::CuePoint(s)
            | Self::ProgramName(s)
            | Self::DeviceName(s) => Some(s),
            _ => None,
        }
    }
}

fn length_error(meta_type: MetaType, expected: usize, payload: &[u8]) -> MetaError {
    MetaError::Length {
        meta_type,
        expected,
        found: payload.len(),
    }
}

fn fixed<const N: usize>(meta_type: MetaType, payload: &[u8]) -> Result<[u8; N], MetaError> {
    payload
        .try_into()
        .map_err(|_| length_error(meta_type, N, payload))
}

fn single_byte(meta_type: MetaType, payload: &[u8]) -> Result<u8, MetaError> {
    fixed::<1>(meta_type, payload).map(|[b]| b)
}

#[test]
fn interpret_text_events() {
    use pretty_assertions::assert_eq;
    let event = MetaEvent::interpret(MetaType::TrackName, b"Violin I").unwrap();
    assert_eq!(event, MetaEvent::TrackName("Violin I".into()));
    assert_eq!(event.text(), Some("Violin I"));
    assert_eq!(event.meta_type(), MetaType::TrackName);

    let event = MetaEvent::interpret(MetaType::Marker, b"").unwrap();
    assert_eq!(event, MetaEvent::Marker(String::new()));
}

#[test]
fn interpret_tempo() {
    use pretty_assertions::assert_eq;
    let event = MetaEvent::interpret(MetaType::SetTempo, &[0x07, 0xA1, 0x20]).unwrap();
    let MetaEvent::Tempo(tempo) = event else {
        panic!("expected tempo");
    };
    assert_eq!(tempo.micros_per_quarter_note(), 500_000);
    assert_eq!(tempo.bpm(), 120);

    let err = MetaEvent::interpret(MetaType::SetTempo, &[0x07, 0xA1]).unwrap_err();
    assert_eq!(
        err,
        MetaError::Length {
            meta_type: MetaType::SetTempo,
            expected: 3,
            found: 2
        }
    );
}

#[test]
fn interpret_sequence_number() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        MetaEvent::interpret(MetaType::SequenceNumber, &[0x01, 0x02]).unwrap(),
        MetaEvent::SequenceNumber(Some(0x0102))
    );
    assert_eq!(
        MetaEvent::interpret(MetaType::SequenceNumber, &[]).unwrap(),
        MetaEvent::SequenceNumber(None)
    );
    assert!(MetaEvent::interpret(MetaType::SequenceNumber, &[0x01]).is_err());
}

#[test]
fn interpret_signatures() {
    use pretty_assertions::assert_eq;
    let MetaEvent::TimeSignature(ts) =
        MetaEvent::interpret(MetaType::TimeSignature, &[6, 3, 24, 8]).unwrap()
    else {
        panic!("expected time signature");
    };
    assert_eq!(ts.numerator(), 6);
    assert_eq!(ts.denominator(), 8);

    let MetaEvent::KeySignature(ks) =
        MetaEvent::interpret(MetaType::KeySignature, &[0xFD, 1]).unwrap()
    else {
        panic!("expected key signature");
    };
    assert_eq!(ks.sharps_flats(), -3);
    assert!(ks.is_minor());
}

#[test]
fn unknown_meta_type_byte() {
    assert!(MetaType::try_from(0x60u8).is_err());
    assert_eq!(MetaType::try_from(0x2Fu8).unwrap(), MetaType::EndOfTrack);
}
