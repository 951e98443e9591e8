use bstr::{BString, ByteSlice};
use thiserror::Error;

/// Bytes of unread input captured in a [`ParseError`] for diagnostics.
const EXCERPT_LEN: usize = 16;

/// Appending to a [`Buffer`](crate::Buffer) failed. Nothing was appended.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    /// The write would grow the buffer past its configured limit.
    #[error("buffer limit exceeded: {attempted} bytes requested, limit is {limit}")]
    LimitExceeded {
        /// Length the buffer would have after the write.
        attempted: usize,
        /// Configured maximum length.
        limit: usize,
    },
    /// The allocator could not provide room for the write.
    #[error("buffer too large: cannot reserve {requested} more bytes")]
    TooLarge {
        /// Bytes the write needed to reserve.
        requested: usize,
    },
}

/// What was wrong with the input at the position a [`ParseError`] reports.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum SyntaxError {
    #[error("invalid character {found:?} {context}")]
    InvalidCharacter {
        found: char,
        context: &'static str,
    },
    #[error("invalid character {found:?} in literal {literal}")]
    InvalidLiteral { found: char, literal: &'static str },
    #[error("invalid escape sequence '\\{0}' in string literal")]
    InvalidEscape(char),
    #[error("invalid character {0:?} in \\u hexadecimal character escape")]
    InvalidUnicodeEscape(char),
    #[error("control character {0:?} in string literal")]
    ControlCharacterInString(char),
    #[error("number {0} is out of range for a 64-bit float")]
    NumberOutOfRange(BString),
    #[error("exceeded max nesting depth of {0}")]
    DepthLimitExceeded(usize),
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}

/// A malformed token, or input that ended in the middle of a token.
///
/// Parse errors are fatal to the decode loop: once a [`Decoder`] reports
/// one, every later call reports it again.
///
/// [`Decoder`]: crate::Decoder
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at {line}:{column}")]
pub struct ParseError {
    kind: SyntaxError,
    offset: usize,
    line: usize,
    column: usize,
    excerpt: BString,
}

impl ParseError {
    /// Locate `kind` at byte `offset` of `input`.
    pub(crate) fn new(kind: SyntaxError, input: &[u8], offset: usize) -> Self {
        let offset = offset.min(input.len());
        let consumed = &input[..offset];
        let line = consumed.find_iter(b"\n").count() + 1;
        let line_start = consumed.rfind_byte(b'\n').map_or(0, |nl| nl + 1);
        let end = (offset + EXCERPT_LEN).min(input.len());
        Self {
            kind,
            offset,
            line,
            column: offset - line_start + 1,
            excerpt: BString::from(&input[offset..end]),
        }
    }

    /// The kind of syntax error.
    #[must_use]
    pub fn kind(&self) -> &SyntaxError {
        &self.kind
    }

    /// Byte offset of the error within the decoded input.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// One-based line of the error.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// One-based byte column of the error within its line.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Up to sixteen bytes of input starting at the error.
    #[must_use]
    pub fn excerpt(&self) -> &BString {
        &self.excerpt
    }

    /// Whether the input ended before the token was complete.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, SyntaxError::UnexpectedEndOfInput)
    }
}

/// Any failure surfaced by the write-then-decode routine in [`demo`].
///
/// [`demo`]: crate::demo
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Appending a chunk to the buffer failed.
    #[error("write error: {0}")]
    Write(#[from] WriteError),
    /// A token in the buffer was malformed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    /// Writing the transcript failed.
    #[error("output error")]
    Output(#[from] core::fmt::Error),
}
