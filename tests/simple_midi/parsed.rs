use midinotes::prelude::*;
use pretty_assertions::assert_eq;

fn parsed() -> MidiFile {
    MidiFile::parse(&include_bytes!("./simple.mid")[..]).unwrap()
}

#[test]
fn test_header() {
    let parsed = parsed();
    assert_eq!(parsed.format_type(), Ok(FormatType::Simultaneous));
    assert_eq!(parsed.header().track_count(), 2);
    assert_eq!(parsed.timing(), Ok(Timing::TicksPerQuarterNote(96)));
    assert!(parsed.diagnostics().is_empty());
}

#[test]
fn test_first_tempo_wins() {
    let parsed = parsed();
    assert_eq!(parsed.tempo(), 500_000);
    assert_eq!(parsed.bpm(), 120);
}

#[test]
fn test_conductor_track() {
    let parsed = parsed();
    let conductor = &parsed.tracks()[0];

    assert_eq!(conductor.name(), Some("Conductor"));
    assert_eq!(conductor.events().len(), 5);
    assert!(conductor.notes().is_empty());
    assert_eq!(conductor.key_range(), None);

    let ticks: Vec<u64> = conductor
        .meta()
        .iter()
        .map(|m| m.accumulated_ticks())
        .collect();
    assert_eq!(ticks, [0, 0, 0, 384, 384]);

    let MetaEvent::TimeSignature(ts) = conductor.meta()[1].event() else {
        panic!("expected a time signature");
    };
    assert_eq!((ts.numerator(), ts.denominator()), (4, 4));
}

#[test]
fn test_piano_events() {
    let parsed = parsed();
    let piano = &parsed.tracks()[1];

    assert_eq!(piano.name(), Some("Piano"));
    assert_eq!(piano.instrument_name(), Some("Acoustic Grand"));

    use EventKind::*;
    let kinds: Vec<EventKind> = piano.events().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        [
            Other, Other, Other, NoteOn, NoteOn, NoteOn, NoteOff, Other, NoteOff, NoteOff, NoteOn,
            Other, NoteOff, Other
        ]
    );

    // the third chord note is written in running status
    assert_eq!(piano.events()[5], RawEvent::note_on(0, 55, 80));
    // a zero velocity note on, also in running status
    assert_eq!(piano.events()[6], RawEvent::note_off(96, 48));
    assert_eq!(piano.total_ticks(), 576);
}

#[test]
fn test_piano_notes() {
    let parsed = parsed();
    let piano = &parsed.tracks()[1];

    assert_eq!(
        piano.notes(),
        [
            Note {
                key: 48,
                velocity: 100,
                start_tick: 0,
                duration_ticks: 96
            },
            Note {
                key: 52,
                velocity: 90,
                start_tick: 0,
                duration_ticks: 192
            },
            Note {
                key: 55,
                velocity: 80,
                start_tick: 0,
                duration_ticks: 192
            },
            Note {
                key: 72,
                velocity: 110,
                start_tick: 192,
                duration_ticks: 384
            },
        ]
    );
    assert_eq!(piano.key_range(), Some(48..=72));
    assert_eq!(piano.unclosed_notes(), 0);
    assert_eq!(piano.orphan_note_offs(), 0);

    let top = piano.notes()[3].pitch().unwrap();
    assert_eq!((top.class(), top.octave().value()), (PitchClass::C, 5));
}

#[test]
fn test_parse_is_idempotent() {
    assert_eq!(parsed(), parsed());
}

#[test]
fn test_load_from_disk() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/simple_midi/simple.mid");
    assert_eq!(MidiFile::load(path).unwrap(), parsed());
}
