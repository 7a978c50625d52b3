mod decoder;
pub(crate) use decoder::*;

mod event;
pub use event::*;

mod ticked;
pub use ticked::*;

use crate::{
    file::MetaEvent,
    notes::{Note, NoteTracker},
};
use alloc::{string::String, vec::Vec};
use core::ops::RangeInclusive;

/// Value of [`Track::min_key`] and [`Track::max_key`] before any note is complete
pub const KEY_SENTINEL: u8 = 64;

#[doc = r#"
One decoded `MTrk` chunk.

A track holds its events exactly as they appear in the file, and the notes
reconstructed from them.

The key range ([`Track::min_key`], [`Track::max_key`]) only means something
when the track has at least one note. Prefer [`Track::key_range`], which is
`None` otherwise.

# Overlap
Notes of a track may overlap, including notes of the same key.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    pub(crate) name: Option<String>,
    pub(crate) instrument_name: Option<String>,
    pub(crate) events: Vec<RawEvent>,
    pub(crate) meta: Vec<Ticked<MetaEvent>>,
    notes: Vec<Note>,
    min_key: u8,
    max_key: u8,
    unclosed_notes: usize,
    orphan_note_offs: usize,
}

impl Default for Track {
    fn default() -> Self {
        Self {
            name: None,
            instrument_name: None,
            events: Vec::new(),
            meta: Vec::new(),
            notes: Vec::new(),
            min_key: KEY_SENTINEL,
            max_key: KEY_SENTINEL,
            unclosed_notes: 0,
            orphan_note_offs: 0,
        }
    }
}

impl Track {
    /// Create a track from a list of events and reconstruct its notes
    pub fn new(events: Vec<RawEvent>) -> Self {
        let mut track = Self {
            events,
            ..Default::default()
        };
        track.reconstruct_notes();
        track
    }

    /// Rebuilds [`Track::notes`] and the key range from the events.
    ///
    /// Returns the number of note ons that were never released.
    pub fn reconstruct_notes(&mut self) -> usize {
        let mut tracker = NoteTracker::new();
        for event in &self.events {
            tracker.push(event);
        }
        let mut done = tracker.finish();
        done.notes.sort_by_key(|note| note.start_tick);

        (self.min_key, self.max_key) = done.key_range.unwrap_or((KEY_SENTINEL, KEY_SENTINEL));
        self.notes = done.notes;
        self.unclosed_notes = done.unclosed_notes;
        self.orphan_note_offs = done.orphan_note_offs;
        self.unclosed_notes
    }

    /// The name from the last track name meta event
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The name from the last instrument name meta event
    pub fn instrument_name(&self) -> Option<&str> {
        self.instrument_name.as_deref()
    }

    /// Every event of the track, in file order
    pub fn events(&self) -> &[RawEvent] {
        &self.events
    }

    /// Every meta event of the track, with its absolute tick
    pub fn meta(&self) -> &[Ticked<MetaEvent>] {
        &self.meta
    }

    /// Completed notes ordered by their start tick.
    ///
    /// Notes starting on the same tick keep their release order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Lowest completed key. Meaningless if there are no notes.
    pub fn min_key(&self) -> u8 {
        self.min_key
    }

    /// Highest completed key. Meaningless if there are no notes.
    pub fn max_key(&self) -> u8 {
        self.max_key
    }

    /// The range of keys across the track's notes
    pub fn key_range(&self) -> Option<RangeInclusive<u8>> {
        if self.notes.is_empty() {
            None
        } else {
            Some(self.min_key..=self.max_key)
        }
    }

    /// Note ons still held when the track ended
    pub fn unclosed_notes(&self) -> usize {
        self.unclosed_notes
    }

    /// Note offs that released nothing
    pub fn orphan_note_offs(&self) -> usize {
        self.orphan_note_offs
    }

    /// The absolute tick of the last event
    pub fn total_ticks(&self) -> u64 {
        self.events.iter().map(|e| e.delta_ticks as u64).sum()
    }

    /// Iterates the events along with their absolute tick
    pub fn ticked_events(&self) -> TickedEvents<'_> {
        TickedEvents::new(&self.events)
    }
}

#[test]
fn key_range_of_notes() {
    use pretty_assertions::assert_eq;
    let track = Track::new(alloc::vec![
        RawEvent::note_on(0, 60, 90),
        RawEvent::note_on(0, 67, 90),
        RawEvent::note_on(0, 55, 90),
        RawEvent::note_off(10, 60),
        RawEvent::note_off(0, 67),
        RawEvent::note_off(0, 55),
    ]);
    assert_eq!(track.notes().len(), 3);
    assert_eq!(track.min_key(), 55);
    assert_eq!(track.max_key(), 67);
    assert_eq!(track.key_range(), Some(55..=67));
}

#[test]
fn key_range_above_sentinel() {
    use pretty_assertions::assert_eq;
    let track = Track::new(alloc::vec![
        RawEvent::note_on(0, 72, 90),
        RawEvent::note_off(10, 72),
        RawEvent::note_on(0, 76, 90),
        RawEvent::note_off(10, 76),
    ]);
    assert_eq!(track.key_range(), Some(72..=76));
}

#[test]
fn empty_track_has_no_key_range() {
    use pretty_assertions::assert_eq;
    let track = Track::new(alloc::vec![RawEvent::other(10), RawEvent::note_on(0, 60, 1)]);
    assert_eq!(track.key_range(), None);
    assert_eq!(track.min_key(), KEY_SENTINEL);
    assert_eq!(track.max_key(), KEY_SENTINEL);
    assert_eq!(track.unclosed_notes(), 1);
    assert_eq!(track.total_ticks(), 10);
}

#[test]
fn notes_sorted_by_start() {
    use pretty_assertions::assert_eq;
    let track = Track::new(alloc::vec![
        RawEvent::note_on(0, 48, 90),
        RawEvent::note_on(10, 60, 90),
        RawEvent::note_off(10, 60),
        RawEvent::note_off(10, 48),
    ]);
    // 60 is released first but 48 starts first
    let started: Vec<u8> = track.notes().iter().map(|n| n.key).collect();
    assert_eq!(started, [48, 60]);
}
