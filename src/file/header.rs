use crate::{
    ParseError, SmpteError,
    file::{FormatType, Timing},
    reader::{ReadResult, Reader, ReaderError},
};

/// The fixed header chunk length the format defines
pub const HEADER_LENGTH: u32 = 6;

#[doc = r#"
The decoded `MThd` chunk.

```text
"MThd" | length: u32 | format: u16 | tracks: u16 | division: u16
```

Values are kept as read. [`RawHeader::format_type`] and [`RawHeader::timing`]
give typed views of them.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawHeader {
    length: u32,
    format: u16,
    track_count: u16,
    division: u16,
}

impl RawHeader {
    /// Create a header from its field values
    pub const fn new(format: u16, track_count: u16, division: u16) -> Self {
        Self {
            length: HEADER_LENGTH,
            format,
            track_count,
            division,
        }
    }

    /// Reads the header chunk from the start of a file.
    ///
    /// Any declared length beyond six bytes is skipped.
    pub fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let start = reader.buffer_position();
        let magic: [u8; 4] = reader.read_exact_size()?;
        if &magic != b"MThd" {
            return Err(ReaderError::parse_error(
                start,
                ParseError::InvalidHeaderMagic(magic),
            ));
        }
        let length = reader.read_u32_be()?;
        let format = reader.read_u16_be()?;
        let track_count = reader.read_u16_be()?;
        let division = reader.read_u16_be()?;

        if length > HEADER_LENGTH {
            reader.skip((length - HEADER_LENGTH) as usize)?;
        }

        Ok(Self {
            length,
            format,
            track_count,
            division,
        })
    }

    /// The declared chunk length. Expected to be 6.
    pub const fn length(&self) -> u32 {
        self.length
    }

    /// The raw format number
    pub const fn format(&self) -> u16 {
        self.format
    }

    /// The format, if it is one of 0, 1 or 2
    pub fn format_type(&self) -> Result<FormatType, ParseError> {
        FormatType::try_from(self.format).map_err(|e| ParseError::UnknownFormat(e.number))
    }

    /// The number of track chunks the header announces
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }

    /// The raw division word
    pub const fn division(&self) -> u16 {
        self.division
    }

    /// Interprets the division word
    pub fn timing(&self) -> Result<Timing, SmpteError> {
        Timing::from_division(self.division)
    }
}

#[test]
fn read_header() {
    use pretty_assertions::assert_eq;
    let bytes = [b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 3, 0x01, 0xE0];
    let mut reader = Reader::from_byte_slice(&bytes);
    let header = RawHeader::read(&mut reader).unwrap();
    assert_eq!(header, RawHeader::new(1, 3, 480));
    assert_eq!(header.format_type(), Ok(FormatType::Simultaneous));
    assert_eq!(header.timing().unwrap().ticks_per_quarter_note(), Some(480));
    assert!(reader.is_empty());
}

#[test]
fn read_header_skips_extra_length() {
    use pretty_assertions::assert_eq;
    let bytes = [
        b'M', b'T', b'h', b'd', 0, 0, 0, 8, 0, 0, 0, 1, 0, 96, 0xAA, 0xBB, b'M',
    ];
    let mut reader = Reader::from_byte_slice(&bytes);
    let header = RawHeader::read(&mut reader).unwrap();
    assert_eq!(header.length(), 8);
    assert_eq!(reader.peek_u8().unwrap(), b'M');
}

#[test]
fn read_header_bad_magic() {
    let bytes = [b'R', b'I', b'F', b'F', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96];
    let err = RawHeader::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert_eq!(
        err.parse_error_kind(),
        Some(&ParseError::InvalidHeaderMagic(*b"RIFF"))
    );
    assert_eq!(err.position(), 0);
}

#[test]
fn read_header_truncated() {
    let bytes = [b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0];
    let err = RawHeader::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert!(err.is_unexpected_end());
}
