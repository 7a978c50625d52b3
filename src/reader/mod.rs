#![doc = r#"
Contains the [`Reader`], a sequential big-endian cursor over MIDI bytes.

Every read either consumes exactly what it asks for or fails with
[`ReaderErrorKind::UnexpectedEndOfInput`]. Nothing is ever padded with a
default value.
"#]

mod error;
pub use error::*;

use crate::ParseError;
use alloc::{borrow::Cow, string::String};

/// A cursor over a finite MIDI byte source.
///
/// The reader owns or borrows its bytes and tracks a single read position.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: Cow<'a, [u8]>,
    position: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader from anything that converts into a [`Cow`] of bytes
    pub fn from_bytes<B>(bytes: B) -> Self
    where
        B: Into<Cow<'a, [u8]>>,
    {
        Self {
            buf: bytes.into(),
            position: 0,
        }
    }

    /// Create a reader over a borrowed slice
    pub const fn from_byte_slice(bytes: &'a [u8]) -> Self {
        Self {
            buf: Cow::Borrowed(bytes),
            position: 0,
        }
    }

    /// The current read offset from the start of the input
    #[inline]
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Moves the read offset. Offsets past the end are clamped to the end.
    pub fn set_buffer_position(&mut self, position: usize) {
        self.position = position.min(self.buf.len());
    }

    /// Total length of the input
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Number of bytes left to read
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.position
    }

    /// True if every byte has been consumed.
    ///
    /// This is about the bytes left to read, not [`Reader::len`], which
    /// stays the total input length as the cursor moves.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the next byte without consuming it
    pub fn peek_u8(&self) -> ReadResult<u8> {
        self.buf
            .get(self.position)
            .copied()
            .ok_or(ReaderError::eoi(self.position))
    }

    /// Consumes one byte
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let byte = self.peek_u8()?;
        self.position += 1;
        Ok(byte)
    }

    /// Un-consumes the last byte read.
    ///
    /// Does nothing at the start of the input.
    pub fn unread_u8(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    /// Consumes exactly `len` bytes, returning them as a slice
    pub fn read_slice(&mut self, len: usize) -> ReadResult<&[u8]> {
        let start = self.position;
        let end = start
            .checked_add(len)
            .filter(|end| *end <= self.buf.len())
            .ok_or(ReaderError::eoi(start))?;
        self.position = end;
        Ok(&self.buf[start..end])
    }

    /// Consumes exactly `N` bytes into an array
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let slice = self.read_slice(N)?;
        let mut bytes = [0; N];
        bytes.copy_from_slice(slice);
        Ok(bytes)
    }

    /// Consumes exactly `len` bytes without looking at them
    pub fn skip(&mut self, len: usize) -> ReadResult<()> {
        self.read_slice(len).map(|_| ())
    }

    /// Consumes two bytes as a big-endian `u16`
    pub fn read_u16_be(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_be_bytes)
    }

    /// Consumes four bytes as a big-endian `u32`
    pub fn read_u32_be(&mut self) -> ReadResult<u32> {
        self.read_exact_size().map(u32::from_be_bytes)
    }

    /// Consumes a MIDI variable length quantity.
    ///
    /// Each byte contributes its low seven bits, most significant group
    /// first. A byte with its high bit clear ends the quantity.
    ///
    /// # Errors
    /// - [`ParseError::VlqOverflow`] if the value does not fit in 32 bits
    /// - [`ReaderErrorKind::UnexpectedEndOfInput`] if the input ends mid-quantity
    pub fn read_vlq(&mut self) -> ReadResult<u32> {
        let start = self.position;
        let mut value: u32 = 0;
        loop {
            let byte = self.read_u8()?;
            if value > (u32::MAX >> 7) {
                return Err(ReaderError::parse_error(start, ParseError::VlqOverflow));
            }
            value = (value << 7) | (byte & 0x7F) as u32;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
    }

    /// Consumes exactly `len` bytes as text.
    ///
    /// MIDI text is nominally ASCII; anything that is not valid UTF-8 is
    /// replaced rather than rejected.
    pub fn read_string(&mut self, len: usize) -> ReadResult<String> {
        self.read_slice(len)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

#[cfg(test)]
pub(crate) fn encode_vlq(mut value: u32) -> alloc::vec::Vec<u8> {
    let mut bytes = alloc::vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        bytes.push(((value & 0x7F) as u8) | 0x80);
        value >>= 7;
    }
    bytes.reverse();
    bytes
}

#[test]
fn read_big_endian() {
    use pretty_assertions::assert_eq;
    let mut reader = Reader::from_byte_slice(&[0x01, 0x02, 0x00, 0x00, 0x01, 0xE0]);
    assert_eq!(reader.read_u16_be().unwrap(), 0x0102);
    assert_eq!(reader.read_u32_be().unwrap(), 480);
    assert!(reader.is_empty());
}

#[test]
fn read_vlq_examples() {
    use pretty_assertions::assert_eq;
    let cases: &[(&[u8], u32)] = &[
        (&[0x00], 0),
        (&[0x40], 0x40),
        (&[0x7F], 0x7F),
        (&[0x81, 0x00], 0x80),
        (&[0xC0, 0x00], 0x2000),
        (&[0xFF, 0x7F], 0x3FFF),
        (&[0x81, 0x80, 0x00], 0x4000),
        (&[0xFF, 0xFF, 0x7F], 0x1F_FFFF),
        (&[0x81, 0x80, 0x80, 0x00], 0x20_0000),
        (&[0xFF, 0xFF, 0xFF, 0x7F], 0x0FFF_FFFF),
    ];
    for (bytes, expected) in cases {
        let mut reader = Reader::from_byte_slice(bytes);
        assert_eq!(reader.read_vlq().unwrap(), *expected);
        assert!(reader.is_empty());
    }
}

#[test]
fn vlq_round_trip_boundaries() {
    use pretty_assertions::assert_eq;
    let mut value = 1u32;
    while value <= 0x0FFF_FFFF {
        for v in [value - 1, value, value + 1] {
            let bytes = encode_vlq(v);
            assert!(bytes.len() <= 4);
            assert_eq!(Reader::from_byte_slice(&bytes).read_vlq().unwrap(), v);
        }
        value <<= 1;
    }
    let bytes = encode_vlq(0x0FFF_FFFF);
    assert_eq!(Reader::from_byte_slice(&bytes).read_vlq().unwrap(), 0x0FFF_FFFF);
}

#[test]
fn vlq_overflow_is_an_error() {
    let bytes = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F];
    let err = Reader::from_byte_slice(&bytes).read_vlq().unwrap_err();
    assert_eq!(err.parse_error_kind(), Some(&ParseError::VlqOverflow));
}

#[test]
fn reads_past_end_fail() {
    let mut reader = Reader::from_byte_slice(&[0x81]);
    assert!(reader.read_vlq().unwrap_err().is_unexpected_end());

    let mut reader = Reader::from_byte_slice(&[0x00, 0x01, 0x02]);
    assert!(reader.read_u32_be().unwrap_err().is_unexpected_end());
    // a failed read does not move the cursor
    assert_eq!(reader.buffer_position(), 0);
    assert!(reader.read_string(4).unwrap_err().is_unexpected_end());
    assert_eq!(reader.read_u16_be().unwrap(), 1);
}

#[test]
fn end_of_input_is_reported_at_the_cursor() {
    use pretty_assertions::assert_eq;
    let mut reader = Reader::from_byte_slice(&[0x00, 0x01, 0x02]);
    reader.skip(1).unwrap();
    assert_eq!(reader.read_slice(4).unwrap_err().position(), 1);
    assert_eq!(reader.read_u32_be().unwrap_err().position(), 1);
    reader.skip(2).unwrap();
    assert_eq!(reader.peek_u8().unwrap_err().position(), 3);
    assert_eq!(reader.read_u16_be().unwrap_err().position(), 3);
    assert!(reader.is_empty());
    assert_eq!(reader.len(), 3);
}

#[test]
fn peek_and_unread() {
    use pretty_assertions::assert_eq;
    let mut reader = Reader::from_byte_slice(&[0x3C, 0x40]);
    assert_eq!(reader.peek_u8().unwrap(), 0x3C);
    assert_eq!(reader.read_u8().unwrap(), 0x3C);
    reader.unread_u8();
    assert_eq!(reader.read_u8().unwrap(), 0x3C);
    assert_eq!(reader.read_u8().unwrap(), 0x40);
    assert!(reader.peek_u8().unwrap_err().is_unexpected_end());
}

#[test]
fn read_lossy_string() {
    use pretty_assertions::assert_eq;
    let mut reader = Reader::from_byte_slice(b"Piano\xFFx");
    assert_eq!(reader.read_string(5).unwrap(), "Piano");
    assert_eq!(reader.read_string(2).unwrap(), "\u{FFFD}x");
}
