use super::RawEvent;

/// A value paired with the absolute tick it occurs at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ticked<T> {
    tick: u64,
    event: T,
}

impl<T> Ticked<T> {
    /// Pair an event with its tick
    pub const fn new(tick: u64, event: T) -> Self {
        Self { tick, event }
    }

    /// Ticks since the start of the track
    pub const fn accumulated_ticks(&self) -> u64 {
        self.tick
    }

    /// The event
    pub const fn event(&self) -> &T {
        &self.event
    }

    /// Take the event
    pub fn into_event(self) -> T {
        self.event
    }
}

/// An iterator returned from [`Track::ticked_events`](super::Track::ticked_events).
///
/// Accumulates each event's delta into an absolute tick.
#[derive(Debug, Clone)]
pub struct TickedEvents<'t> {
    tick: u64,
    events: core::slice::Iter<'t, RawEvent>,
}

impl<'t> TickedEvents<'t> {
    pub(crate) fn new(events: &'t [RawEvent]) -> Self {
        Self {
            tick: 0,
            events: events.iter(),
        }
    }
}

impl<'t> Iterator for TickedEvents<'t> {
    type Item = Ticked<&'t RawEvent>;
    fn next(&mut self) -> Option<Self::Item> {
        let event = self.events.next()?;
        self.tick += event.delta_ticks as u64;
        Some(Ticked::new(self.tick, event))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.events.size_hint()
    }
}

impl ExactSizeIterator for TickedEvents<'_> {}

#[test]
fn accumulates_deltas() {
    use pretty_assertions::assert_eq;
    let events = [
        RawEvent::other(0),
        RawEvent::note_on(0, 60, 100),
        RawEvent::note_off(480, 60),
        RawEvent::note_on(240, 62, 80),
    ];
    let ticks: alloc::vec::Vec<u64> = TickedEvents::new(&events)
        .map(|e| e.accumulated_ticks())
        .collect();
    assert_eq!(ticks, [0, 0, 480, 720]);
}
