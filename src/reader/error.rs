use crate::ParseError;
use thiserror::Error;

#[doc = r#"
A set of errors that can occur while reading data into the midi representation.

Every variant is fatal for the file being decoded. Problems that decoding can
recover from are reported as [`Diagnostic`](crate::Diagnostic)s instead.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Reading at Position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReaderErrorKind {
    /// Parsing errors
    #[error("Parsing {0}")]
    ParseError(#[from] ParseError),
    /// A fixed size or length prefixed read ran past the end of the input.
    #[error("Unexpected end of input!")]
    UnexpectedEndOfInput,
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }
    /// True if the input ended before a read could complete
    pub const fn is_unexpected_end(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::UnexpectedEndOfInput)
    }
    /// Returns the parse error, if this is not an end of input error.
    pub const fn parse_error_kind(&self) -> Option<&ParseError> {
        match &self.kind {
            ReaderErrorKind::ParseError(e) => Some(e),
            ReaderErrorKind::UnexpectedEndOfInput => None,
        }
    }
    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }
    /// Returns the position where the read error occurred.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Create a new invalid data error
    pub const fn parse_error(position: usize, error: ParseError) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::ParseError(error),
        }
    }

    /// Create a new end of input error
    pub const fn eoi(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::UnexpectedEndOfInput,
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;
