use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
The three SMF formats, as named by the header chunk.

Format 0 holds a single multi-channel track, format 1 holds tracks that play
simultaneously, and format 2 holds sequentially independent patterns.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum FormatType {
    /// Format 0
    SingleMultiChannel = 0,
    /// Format 1
    Simultaneous = 1,
    /// Format 2
    SequentiallyIndependent = 2,
}

#[test]
fn format_from_header_value() {
    assert_eq!(FormatType::try_from(1u16).unwrap(), FormatType::Simultaneous);
    assert!(FormatType::try_from(3u16).is_err());
    assert_eq!(u16::from(FormatType::SequentiallyIndependent), 2);
}
