#![doc = r#"
Note reconstruction: pairing note ons with note offs.

A [`NoteTracker`] walks a track's events in file order, keeping an absolute
tick and the notes currently held down. A note off closes the *earliest*
still-open note of the same key, so retriggered keys release first-in,
first-out. Channels play no part in matching.

Note offs that close nothing are dropped, as are notes still held when the
events run out.
"#]

use crate::{
    ParseError, Pitch,
    file::{EventKind, RawEvent},
};
use alloc::vec::Vec;

/// A note with a resolved start and duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    /// Key number
    pub key: u8,
    /// Velocity of the note on
    pub velocity: u8,
    /// Absolute tick of the note on
    pub start_tick: u64,
    /// Ticks between the note on and its note off
    pub duration_ticks: u64,
}

impl Note {
    /// Absolute tick of the note off
    pub const fn end_tick(&self) -> u64 {
        self.start_tick + self.duration_ticks
    }

    /// The key as a pitch class and octave
    pub const fn pitch(&self) -> Result<Pitch, ParseError> {
        Pitch::from_key(self.key)
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenNote {
    key: u8,
    velocity: u8,
    start_tick: u64,
}

/// The outcome of a [`NoteTracker`] run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconstruction {
    /// Completed notes in release order
    pub notes: Vec<Note>,
    /// Lowest and highest key over `notes`, if there are any
    pub key_range: Option<(u8, u8)>,
    /// Note ons never released
    pub unclosed_notes: usize,
    /// Note offs that released nothing
    pub orphan_note_offs: usize,
}

#[doc = r#"
Incrementally pairs note ons and note offs.

# Example
```rust
# use midinotes::prelude::*;
let mut tracker = NoteTracker::new();
tracker.push(&RawEvent::note_on(0, 60, 80));
tracker.push(&RawEvent::note_off(100, 60));

let done = tracker.finish();
assert_eq!(
    done.notes,
    [Note { key: 60, velocity: 80, start_tick: 0, duration_ticks: 100 }]
);
```
"#]
#[derive(Debug, Clone, Default)]
pub struct NoteTracker {
    wall_time: u64,
    open: Vec<OpenNote>,
    done: Reconstruction,
}

impl NoteTracker {
    /// Create a tracker at tick zero
    pub fn new() -> Self {
        Self::default()
    }

    /// The absolute tick of the last event pushed
    pub fn wall_time(&self) -> u64 {
        self.wall_time
    }

    /// Notes currently held down
    pub fn open_notes(&self) -> usize {
        self.open.len()
    }

    /// Feeds the next event in file order
    pub fn push(&mut self, event: &RawEvent) {
        self.wall_time += event.delta_ticks as u64;

        match event.kind {
            EventKind::NoteOn => self.open.push(OpenNote {
                key: event.key,
                velocity: event.velocity,
                start_tick: self.wall_time,
            }),
            EventKind::NoteOff => self.release(event.key),
            EventKind::Other => {}
        }
    }

    fn release(&mut self, key: u8) {
        let Some(index) = self.open.iter().position(|note| note.key == key) else {
            #[cfg(feature = "tracing")]
            tracing::trace!(key, tick = self.wall_time, "note off without a note on");
            self.done.orphan_note_offs += 1;
            return;
        };
        let open = self.open.remove(index);
        self.done.notes.push(Note {
            key: open.key,
            velocity: open.velocity,
            start_tick: open.start_tick,
            duration_ticks: self.wall_time - open.start_tick,
        });
        self.done.key_range = Some(match self.done.key_range {
            Some((min, max)) => (min.min(key), max.max(key)),
            None => (key, key),
        });
    }

    /// Ends the run. Notes still held are dropped and counted.
    pub fn finish(mut self) -> Reconstruction {
        self.done.unclosed_notes = self.open.len();
        self.done
    }
}

#[test]
fn pairs_note_on_and_off() {
    use pretty_assertions::assert_eq;
    let mut tracker = NoteTracker::new();
    tracker.push(&RawEvent::note_on(0, 60, 80));
    tracker.push(&RawEvent::note_off(100, 60));
    let done = tracker.finish();
    assert_eq!(
        done.notes,
        [Note {
            key: 60,
            velocity: 80,
            start_tick: 0,
            duration_ticks: 100
        }]
    );
    assert_eq!(done.key_range, Some((60, 60)));
}

#[test]
fn note_off_velocity_is_ignored() {
    use pretty_assertions::assert_eq;
    let mut tracker = NoteTracker::new();
    tracker.push(&RawEvent::note_on(5, 60, 80));
    let mut off = RawEvent::note_off(10, 60);
    off.velocity = 64;
    tracker.push(&off);
    let note = tracker.finish().notes[0];
    assert_eq!(note.velocity, 80);
    assert_eq!(note.start_tick, 5);
    assert_eq!(note.end_tick(), 15);
}

#[test]
fn every_delta_advances_time() {
    use pretty_assertions::assert_eq;
    let mut tracker = NoteTracker::new();
    tracker.push(&RawEvent::other(30));
    tracker.push(&RawEvent::note_on(10, 60, 80));
    tracker.push(&RawEvent::other(20));
    tracker.push(&RawEvent::note_off(5, 60));
    assert_eq!(tracker.wall_time(), 65);
    let note = tracker.finish().notes[0];
    assert_eq!(note.start_tick, 40);
    assert_eq!(note.duration_ticks, 25);
}

#[test]
fn orphan_note_off_is_dropped() {
    use pretty_assertions::assert_eq;
    let mut tracker = NoteTracker::new();
    tracker.push(&RawEvent::note_on(0, 62, 80));
    tracker.push(&RawEvent::note_off(10, 60));
    assert_eq!(tracker.open_notes(), 1);
    let done = tracker.finish();
    assert!(done.notes.is_empty());
    assert_eq!(done.key_range, None);
    assert_eq!(done.orphan_note_offs, 1);
    assert_eq!(done.unclosed_notes, 1);
}

#[test]
fn same_key_releases_first_in_first_out() {
    use pretty_assertions::assert_eq;
    let mut tracker = NoteTracker::new();
    tracker.push(&RawEvent::note_on(0, 60, 10));
    tracker.push(&RawEvent::note_on(10, 60, 20));
    tracker.push(&RawEvent::note_off(10, 60));
    tracker.push(&RawEvent::note_off(10, 60));
    let done = tracker.finish();
    assert_eq!(
        done.notes,
        [
            Note {
                key: 60,
                velocity: 10,
                start_tick: 0,
                duration_ticks: 20
            },
            Note {
                key: 60,
                velocity: 20,
                start_tick: 10,
                duration_ticks: 20
            },
        ]
    );
}

#[test]
fn channels_are_not_distinguished() {
    use pretty_assertions::assert_eq;
    let mut tracker = NoteTracker::new();
    tracker.push(&RawEvent::note_on(0, 60, 80).with_channel(0));
    tracker.push(&RawEvent::note_off(10, 60).with_channel(9));
    assert_eq!(tracker.finish().notes.len(), 1);
}
