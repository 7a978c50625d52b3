/// The `FF 58 04` time signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    numerator: u8,
    denominator_exponent: u8,
    clocks_per_click: u8,
    notated_32nds_per_quarter: u8,
}

impl TimeSignature {
    /// Create from `nn dd cc bb`
    pub const fn from_bytes([nn, dd, cc, bb]: [u8; 4]) -> Self {
        Self {
            numerator: nn,
            denominator_exponent: dd,
            clocks_per_click: cc,
            notated_32nds_per_quarter: bb,
        }
    }

    /// Beats per bar
    pub const fn numerator(&self) -> u8 {
        self.numerator
    }

    /// The beat unit. The payload stores it as a power of two.
    ///
    /// Saturates for nonsensical exponents.
    pub const fn denominator(&self) -> u32 {
        match 1u32.checked_shl(self.denominator_exponent as u32) {
            Some(d) => d,
            None => u32::MAX,
        }
    }

    /// MIDI clocks per metronome click
    pub const fn clocks_per_click(&self) -> u8 {
        self.clocks_per_click
    }

    /// Notated 32nd notes in a MIDI quarter note
    pub const fn notated_32nds_per_quarter(&self) -> u8 {
        self.notated_32nds_per_quarter
    }
}

/// The `FF 59 02` key signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeySignature {
    sharps_flats: i8,
    minor: bool,
}

impl KeySignature {
    /// Create from `sf mi`
    pub const fn from_bytes([sf, mi]: [u8; 2]) -> Self {
        Self {
            sharps_flats: sf as i8,
            minor: mi != 0,
        }
    }

    /// Positive for sharps, negative for flats
    pub const fn sharps_flats(&self) -> i8 {
        self.sharps_flats
    }

    /// True for a minor key
    pub const fn is_minor(&self) -> bool {
        self.minor
    }
}
