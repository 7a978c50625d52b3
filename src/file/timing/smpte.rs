/// The frame rates SMPTE timing can name.
///
/// The header division and the SMPTE offset meta event both pick from these
/// four rates, using different encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 frames per second
    TwentyFour,
    /// 25 frames per second
    TwentyFive,
    /// 29.97 frames per second, drop frame
    TwentyNine,
    /// 30 frames per second
    Thirty,
}

impl SmpteFps {
    /// The nominal frame rate. Drop frame 29.97 counts as 30.
    pub const fn as_division(&self) -> u8 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::TwentyNine | Self::Thirty => 30,
        }
    }

    /// The exact frame rate
    pub const fn as_f64(&self) -> f64 {
        match self {
            Self::TwentyFour => 24.,
            Self::TwentyFive => 25.,
            Self::TwentyNine => DROP_FRAME,
            Self::Thirty => 30.,
        }
    }
}

/// 30000/1001 fps
const DROP_FRAME: f64 = 30_000. / 1001.;

#[test]
fn drop_frame_rounds_to_thirty() {
    use pretty_assertions::assert_eq;
    assert_eq!(SmpteFps::TwentyNine.as_division(), 30);
    assert!((SmpteFps::TwentyNine.as_f64() - 29.97).abs() < 0.001);
    assert_eq!(SmpteFps::TwentyFive.as_division(), 25);
}
