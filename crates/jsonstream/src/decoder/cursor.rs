//! Read position over the borrowed input.
//!
//! The cursor only moves forward. Every error the decoder raises is built
//! here so it carries the input it refers to.

use bstr::ByteSlice;

use crate::{ParseError, SyntaxError};

#[derive(Debug, Clone)]
pub(crate) struct Cursor<'src> {
    input: &'src [u8],
    pos: usize,
}

impl<'src> Cursor<'src> {
    pub(crate) fn new(input: &'src [u8]) -> Self {
        Self { input, pos: 0 }
    }

    #[inline]
    pub(crate) fn offset(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn remaining(&self) -> &'src [u8] {
        &self.input[self.pos..]
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline]
    pub(crate) fn bump(&mut self) {
        debug_assert!(!self.is_at_end());
        self.pos += 1;
    }

    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        debug_assert!(self.pos + n <= self.input.len());
        self.pos += n;
    }

    /// Consume the next byte, failing at end of input.
    #[inline]
    pub(crate) fn next_byte(&mut self) -> Result<u8, ParseError> {
        let b = self.peek().ok_or_else(|| self.eof())?;
        self.pos += 1;
        Ok(b)
    }

    /// Consume bytes while `pred` holds and return them.
    pub(crate) fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'src [u8] {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    /// JSON whitespace only: space, tab, line feed, carriage return.
    pub(crate) fn skip_whitespace(&mut self) {
        self.take_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'));
    }

    pub(crate) fn slice(&self, start: usize) -> &'src [u8] {
        &self.input[start..self.pos]
    }

    /// The character starting at the cursor, or U+FFFD for invalid UTF-8.
    pub(crate) fn current_char(&self) -> char {
        self.char_at(self.pos)
    }

    pub(crate) fn char_at(&self, offset: usize) -> char {
        self.input
            .get(offset..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or('\u{FFFD}')
    }

    pub(crate) fn error_at(&self, offset: usize, kind: SyntaxError) -> ParseError {
        ParseError::new(kind, self.input, offset)
    }

    pub(crate) fn error(&self, kind: SyntaxError) -> ParseError {
        self.error_at(self.pos, kind)
    }

    pub(crate) fn eof(&self) -> ParseError {
        self.error_at(self.input.len(), SyntaxError::UnexpectedEndOfInput)
    }

    /// An error for the byte at the cursor: the input ended, or the character
    /// there is not allowed in `context`.
    pub(crate) fn unexpected(&self, context: &'static str) -> ParseError {
        if self.is_at_end() {
            self.eof()
        } else {
            self.error(SyntaxError::InvalidCharacter {
                found: self.current_char(),
                context,
            })
        }
    }
}
