/// Microseconds per quarter note, as set by the `FF 51 03` meta event.
///
/// A value of zero means no tempo has been set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo(u32);

impl Tempo {
    /// No tempo set
    pub const UNSET: Self = Self(0);

    /// Create a tempo from microseconds per quarter note
    pub const fn new(micros_per_quarter_note: u32) -> Self {
        Self(micros_per_quarter_note)
    }

    /// Create a tempo from the three payload bytes
    pub const fn from_be_bytes(bytes: [u8; 3]) -> Self {
        Self(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
    }

    /// Microseconds per quarter note
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.0
    }

    /// True if no tempo has been set
    pub const fn is_unset(&self) -> bool {
        self.0 == 0
    }

    /// Whole beats per minute, or 0 if unset
    pub const fn bpm(&self) -> u32 {
        if self.0 == 0 { 0 } else { 60_000_000 / self.0 }
    }
}

#[test]
fn tempo_bpm() {
    assert_eq!(Tempo::new(500_000).bpm(), 120);
    assert_eq!(Tempo::new(600_000).bpm(), 100);
    assert_eq!(Tempo::from_be_bytes([0x0F, 0x42, 0x40]).bpm(), 60);
    assert_eq!(Tempo::UNSET.bpm(), 0);
}
