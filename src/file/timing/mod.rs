mod smpte;
pub use smpte::*;

use crate::SmpteError;

/// The header timing type.
///
/// This is either the number of ticks per quarter note or
/// the alternative SMPTE format, selected by the leading bit of the division word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timing {
    /// The midi file's delta times are defined using a tick rate per quarter note
    TicksPerQuarterNote(u16),

    /// The midi file's delta times are defined using an SMPTE and MIDI Time Code
    Smpte(SmpteHeader),
}

impl Timing {
    /// Interprets the header's division word.
    pub const fn from_division(division: u16) -> Result<Self, SmpteError> {
        let [msb, lsb] = division.to_be_bytes();
        if msb >> 7 == 0 {
            return Ok(Self::TicksPerQuarterNote(division & 0x7FFF));
        }
        match SmpteHeader::new(msb as i8, lsb) {
            Ok(header) => Ok(Self::Smpte(header)),
            Err(e) => Err(e),
        }
    }

    /// Returns Some if the midi timing is defined
    /// as ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(*t),
            Self::Smpte(_) => None,
        }
    }
}

/// A representation of the `smpte` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteHeader {
    fps: SmpteFps,
    ticks_per_frame: u8,
}

impl SmpteHeader {
    const fn new(frames: i8, ticks_per_frame: u8) -> Result<Self, SmpteError> {
        //Bits 14 thru 8 contain one of the four values -24, -25, -29, or -30
        let fps = match frames {
            -24 => SmpteFps::TwentyFour,
            -25 => SmpteFps::TwentyFive,
            -29 => SmpteFps::TwentyNine,
            -30 => SmpteFps::Thirty,
            _ => return Err(SmpteError::HeaderFrameTime(frames)),
        };
        Ok(Self {
            fps,
            ticks_per_frame,
        })
    }

    /// Returns the frames per second
    pub const fn fps(&self) -> SmpteFps {
        self.fps
    }

    /// Returns the ticks per frame
    pub const fn ticks_per_frame(&self) -> u8 {
        self.ticks_per_frame
    }
}

#[test]
fn ticks_per_quarter_note_division() {
    assert_eq!(
        Timing::from_division(0x01E0),
        Ok(Timing::TicksPerQuarterNote(480))
    );
}

#[test]
fn smpte_division() {
    // -25 fps, 40 ticks per frame
    let timing = Timing::from_division(0xE728).unwrap();
    let Timing::Smpte(smpte) = timing else {
        panic!("expected smpte timing");
    };
    assert_eq!(smpte.fps(), SmpteFps::TwentyFive);
    assert_eq!(smpte.ticks_per_frame(), 40);
    assert_eq!(timing.ticks_per_quarter_note(), None);

    // -20 is not a frame rate
    assert_eq!(
        Timing::from_division(0xEC28),
        Err(SmpteError::HeaderFrameTime(-20))
    );
}
