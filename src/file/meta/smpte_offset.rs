use crate::{SmpteError, file::SmpteFps};

/// The time a track is meant to start at, in SMPTE time code.
///
/// ```text
/// 0rrhhhhh | minutes | seconds | frames | subframes
/// ```
/// where `rr` selects 24, 25, 29.97 or 30 fps.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteOffset {
    /// The frame rate for this offset
    pub fps: SmpteFps,
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-59
    pub second: u8,
    /// Frame within the second
    pub frame: u8,
    /// Hundredths of a frame, 0-99
    pub subframe: u8,
}

impl SmpteOffset {
    /// Parse an offset from its 5 byte payload.
    pub const fn parse(data: &[u8]) -> Result<Self, SmpteError> {
        let [rate_hour, minute, second, frame, subframe] = *data else {
            return Err(SmpteError::Length(data.len()));
        };

        let fps = match rate_hour >> 5 {
            0 => SmpteFps::TwentyFour,
            1 => SmpteFps::TwentyFive,
            2 => SmpteFps::TwentyNine,
            3 => SmpteFps::Thirty,
            v => return Err(SmpteError::TrackFrame(v)),
        };
        let hour = rate_hour & 0b0001_1111;
        if hour > 23 {
            return Err(SmpteError::HourOffset(hour));
        }
        if minute > 59 {
            return Err(SmpteError::MinuteOffset(minute));
        }
        if second > 59 {
            return Err(SmpteError::SecondOffset(second));
        }
        if subframe > 99 {
            return Err(SmpteError::Subframe(subframe));
        }
        Ok(Self {
            fps,
            hour,
            minute,
            second,
            frame,
            subframe,
        })
    }
}

#[test]
fn parse_smpte_offset() {
    use pretty_assertions::assert_eq;
    // the bytes after 00 FF 54 05
    let offset = SmpteOffset::parse(&[0x41, 0x17, 0x2D, 0x0C, 0x22]).unwrap();

    assert_eq!(
        offset,
        SmpteOffset {
            fps: SmpteFps::TwentyNine,
            hour: 1,
            minute: 23,
            second: 45,
            frame: 12,
            subframe: 34,
        }
    );
}

#[test]
fn parse_invalid_smpte_offset() {
    use pretty_assertions::assert_eq;
    let err = SmpteOffset::parse(&[0x7F, 0x17, 0x2D, 0x0C, 0x22]).unwrap_err();
    assert_eq!(err, SmpteError::HourOffset(31));

    let err = SmpteOffset::parse(&[0x41, 0x50, 0x2D, 0x0C, 0x22]).unwrap_err();
    assert_eq!(err, SmpteError::MinuteOffset(80));

    let err = SmpteOffset::parse(&[0xE1, 0x00, 0x00, 0x00, 0x00]).unwrap_err();
    assert_eq!(err, SmpteError::TrackFrame(7));

    let err = SmpteOffset::parse(&[0x41, 0x17, 0x2D]).unwrap_err();
    assert_eq!(err, SmpteError::Length(3));
}
