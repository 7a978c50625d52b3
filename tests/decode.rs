mod common;

use common::{TrackBytes, file, header};
use midinotes::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn pairs_a_single_note() {
    let bytes = file(&[TrackBytes::new()
        .note_on(0, 0, 60, 80)
        .note_off(100, 0, 60)
        .end_of_track(0)]);
    let parsed = MidiFile::parse(bytes).unwrap();
    let track = &parsed.tracks()[0];

    assert_eq!(
        track.notes(),
        [Note {
            key: 60,
            velocity: 80,
            start_tick: 0,
            duration_ticks: 100
        }]
    );
    assert!(parsed.diagnostics().is_empty());
}

#[test]
fn running_status_decodes_like_explicit_status() {
    let explicit = file(&[TrackBytes::new()
        .event(0, &[0x92, 60, 80])
        .event(10, &[0x92, 64, 80])
        .event(10, &[0x92, 60, 0])
        .event(0, &[0x92, 64, 0])
        .end_of_track(0)]);
    let running = file(&[TrackBytes::new()
        .event(0, &[0x92, 60, 80])
        .event(10, &[64, 80])
        .event(10, &[60, 0])
        .event(0, &[64, 0])
        .end_of_track(0)]);

    let explicit = MidiFile::parse(explicit).unwrap();
    let running = MidiFile::parse(running).unwrap();
    assert_eq!(explicit.tracks(), running.tracks());
    assert_eq!(running.tracks()[0].notes().len(), 2);
}

#[test]
fn zero_velocity_note_on_is_a_note_off() {
    let bytes = file(&[TrackBytes::new()
        .event(0, &[0x90, 67, 0])
        .end_of_track(0)]);
    let parsed = MidiFile::parse(bytes).unwrap();
    let event = parsed.tracks()[0].events()[0];
    assert_eq!(event.kind, EventKind::NoteOff);
    assert_eq!(event.key, 67);
    assert_eq!(event.velocity, 0);
}

#[test]
fn decoding_twice_is_identical() {
    let bytes = file(&[
        TrackBytes::new().tempo(0, 400_000).end_of_track(0),
        TrackBytes::new()
            .note_on(0, 1, 40, 10)
            .event(5, &[0xB1, 7, 100])
            .note_off(20, 1, 40)
            .end_of_track(0),
    ]);
    assert_eq!(
        MidiFile::parse(&bytes[..]).unwrap(),
        MidiFile::parse(&bytes[..]).unwrap()
    );
}

#[test]
fn first_tempo_in_a_track_wins() {
    let bytes = file(&[TrackBytes::new()
        .tempo(0, 500_000)
        .tempo(96, 250_000)
        .end_of_track(0)]);
    let parsed = MidiFile::parse(bytes).unwrap();
    assert_eq!(parsed.tempo(), 500_000);
    assert_eq!(parsed.bpm(), 120);
}

#[test]
fn first_tempo_across_tracks_wins() {
    let bytes = file(&[
        TrackBytes::new().end_of_track(0),
        TrackBytes::new().tempo(10, 600_000).end_of_track(0),
        TrackBytes::new().tempo(0, 500_000).end_of_track(0),
    ]);
    let parsed = MidiFile::parse(bytes).unwrap();
    assert_eq!(parsed.tempo(), 600_000);
    assert_eq!(parsed.bpm(), 100);
}

#[test]
fn no_tempo_is_zero() {
    let bytes = file(&[TrackBytes::new().note_on(0, 0, 60, 1).end_of_track(0)]);
    let parsed = MidiFile::parse(bytes).unwrap();
    assert_eq!(parsed.tempo(), 0);
    assert_eq!(parsed.bpm(), 0);
}

#[test]
fn orphan_note_off_is_not_an_error() {
    let bytes = file(&[TrackBytes::new().note_off(0, 0, 60).end_of_track(0)]);
    let parsed = MidiFile::parse(bytes).unwrap();
    let track = &parsed.tracks()[0];
    assert!(track.notes().is_empty());
    assert_eq!(track.orphan_note_offs(), 1);
    assert_eq!(track.key_range(), None);
}

#[test]
fn unclosed_notes_are_reported() {
    let bytes = file(&[TrackBytes::new()
        .note_on(0, 0, 60, 90)
        .note_on(0, 0, 62, 90)
        .note_off(10, 0, 62)
        .end_of_track(0)]);
    let parsed = MidiFile::parse(bytes).unwrap();
    assert_eq!(parsed.tracks()[0].notes().len(), 1);
    assert_eq!(
        parsed.diagnostics(),
        [Diagnostic::UnclosedNotes { track: 0, count: 1 }]
    );
}

#[test]
fn notes_are_ordered_by_start() {
    let bytes = file(&[TrackBytes::new()
        .note_on(0, 0, 48, 90)
        .note_on(0, 0, 52, 90)
        .note_on(10, 0, 60, 90)
        .note_off(10, 0, 60)
        .note_off(10, 0, 52)
        .note_off(0, 0, 48)
        .end_of_track(0)]);
    let parsed = MidiFile::parse(bytes).unwrap();
    let notes: Vec<(u8, u64)> = parsed.tracks()[0]
        .notes()
        .iter()
        .map(|note| (note.key, note.start_tick))
        .collect();
    // 60 is released first; 52 and 48 share a start and keep release order
    assert_eq!(notes, [(52, 0), (48, 0), (60, 10)]);
}

#[test]
fn key_range_spans_the_notes() {
    let bytes = file(&[TrackBytes::new()
        .note_on(0, 0, 60, 90)
        .note_off(10, 0, 60)
        .note_on(0, 0, 67, 90)
        .note_off(10, 0, 67)
        .note_on(0, 0, 55, 90)
        .note_off(10, 0, 55)
        .end_of_track(0)]);
    let parsed = MidiFile::parse(bytes).unwrap();
    let track = &parsed.tracks()[0];
    assert_eq!(track.min_key(), 55);
    assert_eq!(track.max_key(), 67);
}

#[test]
fn truncated_header_fails() {
    let bytes = header(0, 1, 96);
    for len in 0..bytes.len() {
        let err = MidiFile::parse(&bytes[..len]).unwrap_err();
        assert!(err.is_unexpected_end(), "cut at {len}: {err}");
    }
}

#[test]
fn truncated_track_fails() {
    let mut bytes = file(&[TrackBytes::new()
        .note_on(0, 0, 60, 80)
        .note_off(100, 0, 60)
        .end_of_track(0)]);
    bytes.truncate(bytes.len() - 6);
    let err = MidiFile::parse(bytes).unwrap_err();
    assert!(err.is_unexpected_end());
}

#[test]
fn file_cut_before_end_of_track_fails() {
    let bytes = file(&[TrackBytes::new()
        .note_on(0, 0, 60, 80)
        .note_off(100, 0, 60)
        .end_of_track(0)]);
    // drop the whole `00 FF 2F 00` event, leaving the note pair intact
    let cut = &bytes[..bytes.len() - 4];
    let err = MidiFile::parse(cut).unwrap_err();
    assert!(err.is_unexpected_end());
    assert_eq!(err.position(), cut.len());
}

#[test]
fn second_track_cut_short_fails() {
    let bytes = file(&[
        TrackBytes::new().tempo(0, 500_000).end_of_track(0),
        TrackBytes::new()
            .note_on(0, 0, 60, 80)
            .note_off(100, 0, 60)
            .end_of_track(0),
    ]);
    let err = MidiFile::parse(&bytes[..bytes.len() - 8]).unwrap_err();
    assert!(err.is_unexpected_end());
}

#[test]
fn missing_track_chunk_fails() {
    let mut bytes = header(1, 2, 96);
    bytes.extend(TrackBytes::new().end_of_track(0).chunk());
    let err = MidiFile::parse(bytes).unwrap_err();
    assert!(err.is_unexpected_end());
}

#[test]
fn bad_header_magic_fails() {
    let mut bytes = file(&[TrackBytes::new().end_of_track(0)]);
    bytes[..4].copy_from_slice(b"RIFF");
    let err = MidiFile::parse(bytes).unwrap_err();
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::ParseError(ParseError::InvalidHeaderMagic(*b"RIFF"))
    );
}

#[test]
fn bad_track_magic_fails() {
    let mut bytes = file(&[TrackBytes::new().end_of_track(0)]);
    bytes[14..18].copy_from_slice(b"XFIH");
    let err = MidiFile::parse(bytes).unwrap_err();
    assert_eq!(
        err.parse_error_kind(),
        Some(&ParseError::InvalidTrackMagic(*b"XFIH"))
    );
    assert_eq!(err.position(), 14);
}

#[test]
fn unknown_chunks_can_be_skipped() {
    let mut bytes = header(0, 1, 96);
    bytes.extend_from_slice(b"XFIH");
    bytes.extend_from_slice(&3u32.to_be_bytes());
    bytes.extend_from_slice(&[1, 2, 3]);
    bytes.extend(
        TrackBytes::new()
            .note_on(0, 0, 60, 80)
            .note_off(10, 0, 60)
            .end_of_track(0)
            .chunk(),
    );

    assert!(MidiFile::parse(&bytes[..]).is_err());

    let options = ParseOptions::default().with_skip_unknown_chunks(true);
    let parsed = MidiFile::parse_with(&bytes[..], options).unwrap();
    assert_eq!(parsed.tracks().len(), 1);
    assert_eq!(parsed.tracks()[0].notes().len(), 1);
    assert_eq!(
        parsed.diagnostics(),
        [Diagnostic::SkippedChunk {
            id: *b"XFIH",
            length: 3
        }]
    );
}

#[test]
fn unrecognized_status_is_a_diagnostic() {
    let bytes = file(&[TrackBytes::new()
        .note_on(0, 0, 60, 80)
        .event(0, &[0xF8])
        .note_off(10, 0, 60)
        .end_of_track(0)]);
    let parsed = MidiFile::parse(bytes).unwrap();

    assert!(parsed.is_desynchronized());
    assert_eq!(
        parsed.diagnostics(),
        [Diagnostic::UnrecognizedStatusByte {
            track: 0,
            position: 27,
            status: 0xF8
        }]
    );
    // the delta of the unrecognized event is still counted
    assert_eq!(parsed.tracks()[0].events().len(), 4);
    assert_eq!(parsed.tracks()[0].notes()[0].duration_ticks, 10);
}

#[test]
fn malformed_tempo_is_ignored() {
    let bytes = file(&[TrackBytes::new()
        .meta(0, 0x51, &[0x07, 0xA1])
        .tempo(0, 500_000)
        .end_of_track(0)]);
    let parsed = MidiFile::parse(bytes).unwrap();
    assert_eq!(parsed.tempo(), 500_000);
    assert_eq!(
        parsed.diagnostics(),
        [Diagnostic::MalformedMeta {
            track: 0,
            position: 24,
            error: MetaError::Length {
                meta_type: MetaType::SetTempo,
                expected: 3,
                found: 2
            }
        }]
    );
}

#[test]
fn skipping_note_reconstruction() {
    let bytes = file(&[TrackBytes::new()
        .note_on(0, 0, 60, 80)
        .note_off(10, 0, 60)
        .end_of_track(0)]);
    let options = ParseOptions::default().with_reconstruct_notes(false);
    let mut parsed = MidiFile::parse_with(bytes, options).unwrap().into_tracks();
    assert!(parsed[0].notes().is_empty());
    assert_eq!(parsed[0].reconstruct_notes(), 0);
    assert_eq!(parsed[0].notes().len(), 1);
}

#[test]
fn ticked_events_carry_track_and_tick() {
    let bytes = file(&[
        TrackBytes::new().tempo(0, 500_000).end_of_track(96),
        TrackBytes::new()
            .note_on(48, 3, 60, 80)
            .note_off(48, 3, 60)
            .end_of_track(0),
    ]);
    let parsed = MidiFile::parse(bytes).unwrap();
    let ticks: Vec<(usize, u64)> = parsed
        .ticked_events()
        .map(|(track, event)| (track, event.accumulated_ticks()))
        .collect();
    assert_eq!(ticks, [(0, 0), (0, 96), (1, 48), (1, 96), (1, 96)]);
    let (_, first_note) = parsed.ticked_events().nth(2).unwrap();
    assert_eq!(first_note.event().channel, 3);
}

#[test]
fn smpte_division() {
    let mut bytes = header(0, 1, 0xE728);
    bytes.extend(TrackBytes::new().end_of_track(0).chunk());
    let parsed = MidiFile::parse(bytes).unwrap();
    let Ok(Timing::Smpte(smpte)) = parsed.timing() else {
        panic!("expected smpte timing");
    };
    assert_eq!(smpte.fps(), SmpteFps::TwentyFive);
    assert_eq!(smpte.ticks_per_frame(), 40);
    assert_eq!(parsed.timing().unwrap().ticks_per_quarter_note(), None);
}
