/// What a [`RawEvent`] means for note reconstruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// A key was pressed
    NoteOn,
    /// A key was released. Includes note ons with zero velocity.
    NoteOff,
    /// Anything else: controllers, program changes, pitch bend, meta and
    /// system exclusive events, and unrecognized bytes.
    Other,
}

#[doc = r#"
One event of a track's stream.

`key`, `velocity` and `channel` are only meaningful for
[`EventKind::NoteOn`] and [`EventKind::NoteOff`]; they are zero otherwise.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawEvent {
    /// Kind of the event
    pub kind: EventKind,
    /// Key number
    pub key: u8,
    /// Key velocity
    pub velocity: u8,
    /// Channel, 0-15
    pub channel: u8,
    /// Ticks since the previous event in the same track
    pub delta_ticks: u32,
}

impl RawEvent {
    /// A note on for channel 0
    pub const fn note_on(delta_ticks: u32, key: u8, velocity: u8) -> Self {
        Self {
            kind: EventKind::NoteOn,
            key,
            velocity,
            channel: 0,
            delta_ticks,
        }
    }

    /// A zero velocity note off for channel 0
    pub const fn note_off(delta_ticks: u32, key: u8) -> Self {
        Self {
            kind: EventKind::NoteOff,
            key,
            velocity: 0,
            channel: 0,
            delta_ticks,
        }
    }

    /// An event that does not affect notes
    pub const fn other(delta_ticks: u32) -> Self {
        Self {
            kind: EventKind::Other,
            key: 0,
            velocity: 0,
            channel: 0,
            delta_ticks,
        }
    }

    /// Sets the channel
    pub const fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    /// True for note ons and note offs
    pub const fn is_note(&self) -> bool {
        matches!(self.kind, EventKind::NoteOn | EventKind::NoteOff)
    }
}
