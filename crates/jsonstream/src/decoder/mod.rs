//! The streaming value decoder.
//!
//! A [`Decoder`] walks a borrowed byte slice that holds zero or more JSON
//! values written back to back, and returns them one at a time.
//!
//! Each call to [`Decoder::decode_next`] skips leading whitespace, looks at
//! the first byte to decide what kind of token follows, and scans exactly
//! that token:
//!
//! | first byte      | token   | result            |
//! |-----------------|---------|-------------------|
//! | `-`, `0`..=`9`  | number  | [`Value::Number`] |
//! | `"`             | string  | [`Value::String`] |
//! | `{`             | object  | [`Value::Object`] |
//! | `[`             | array   | [`Value::Array`]  |
//! | `n`, `t`, `f`   | literal | [`Value::Null`] / [`Value::Boolean`] |
//!
//! Object members and array elements go through the same dispatch, so values
//! nest to any depth unless [`DecoderOptions::max_depth`] says otherwise.
//!
//! Strings, objects, and arrays end at their closing delimiter. A number ends
//! at the first byte that cannot continue it, so two numbers written back to
//! back must be separated by whitespace. Concatenated digits (`12` then `34`)
//! read as one number (`1234`); that framing is not supported.
//!
//! ```rust
//! use jsonstream::{Decoder, Value};
//!
//! let mut decoder = Decoder::new(b"1\n2 {\"a\":[true,null]}");
//! assert_eq!(decoder.decode_next().unwrap(), Some(Value::Number(1.0)));
//! assert_eq!(decoder.decode_next().unwrap(), Some(Value::Number(2.0)));
//! assert!(decoder.decode_next().unwrap().unwrap().is_object());
//! assert_eq!(decoder.decode_next().unwrap(), None);
//! ```

mod cursor;
mod escape_buffer;
mod numbers;
mod strings;

use cursor::Cursor;
use log::{trace, warn};

use crate::{Array, DecoderOptions, Map, ParseError, SyntaxError, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Number,
    String,
    Object,
    Array,
    Literal(&'static str),
}

impl TokenKind {
    fn detect(b: u8) -> Option<Self> {
        Some(match b {
            b'-' | b'0'..=b'9' => Self::Number,
            b'"' => Self::String,
            b'{' => Self::Object,
            b'[' => Self::Array,
            b'n' => Self::Literal("null"),
            b't' => Self::Literal("true"),
            b'f' => Self::Literal("false"),
            _ => return None,
        })
    }
}

/// Decodes consecutive JSON values from a borrowed buffer.
///
/// End of input is reported as `Ok(None)`; a malformed token is a
/// [`ParseError`], after which the decoder is stuck and keeps returning the
/// same error.
///
/// The decoder is also an [`Iterator`] over `Result<Value, ParseError>`,
/// which stops after the end of input or after the first error.
#[derive(Debug, Clone)]
pub struct Decoder<'src> {
    cursor: Cursor<'src>,
    options: DecoderOptions,
    failed: Option<ParseError>,
    fused: bool,
}

impl<'src> Decoder<'src> {
    /// Create a decoder over `input` with default options.
    #[must_use]
    pub fn new(input: &'src [u8]) -> Self {
        Self::with_options(input, DecoderOptions::default())
    }

    /// Create a decoder over `input`.
    #[must_use]
    pub fn with_options(input: &'src [u8], options: DecoderOptions) -> Self {
        Self {
            cursor: Cursor::new(input),
            options,
            failed: None,
            fused: false,
        }
    }

    /// The options this decoder was created with.
    #[must_use]
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Decode the next value.
    ///
    /// Returns `Ok(None)` once only whitespace remains. The cursor is left
    /// directly after the decoded token; trailing whitespace is skipped by
    /// the next call.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the next token is malformed or the input
    /// ends inside it. The error is sticky: later calls return it again
    /// without consuming input.
    pub fn decode_next(&mut self) -> Result<Option<Value>, ParseError> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }

        self.cursor.skip_whitespace();
        if self.cursor.is_at_end() {
            trace!("end of stream at offset {}", self.cursor.offset());
            return Ok(None);
        }

        let start = self.cursor.offset();
        match self.decode_value(0) {
            Ok(value) => {
                trace!(
                    "decoded {} at {}..{}",
                    value.type_name(),
                    start,
                    self.cursor.offset()
                );
                Ok(Some(value))
            }
            Err(err) => {
                warn!("decode failed: {err} (near {:?})", err.excerpt());
                self.failed = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Whether a non-whitespace byte remains, i.e. whether
    /// [`decode_next`](Self::decode_next) would attempt another value.
    #[must_use]
    pub fn more(&self) -> bool {
        self.cursor
            .remaining()
            .iter()
            .any(|b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub fn input_offset(&self) -> usize {
        self.cursor.offset()
    }

    /// The unread part of the input.
    #[must_use]
    pub fn remaining(&self) -> &'src [u8] {
        self.cursor.remaining()
    }

    /// Start → DetectKind → Scan* → Complete, re-entered for every member of
    /// an object or array.
    fn decode_value(&mut self, depth: usize) -> Result<Value, ParseError> {
        let Some(b) = self.cursor.peek() else {
            return Err(self.cursor.eof());
        };
        let Some(kind) = TokenKind::detect(b) else {
            return Err(self.cursor.unexpected("looking for beginning of value"));
        };

        match kind {
            TokenKind::Number => numbers::scan_number(&mut self.cursor).map(Value::Number),
            TokenKind::String => strings::scan_string(&mut self.cursor).map(Value::String),
            TokenKind::Object => self.scan_object(depth + 1).map(Value::Object),
            TokenKind::Array => self.scan_array(depth + 1).map(Value::Array),
            TokenKind::Literal(literal) => self.scan_literal(literal),
        }
    }

    fn enter(&self, depth: usize) -> Result<(), ParseError> {
        match self.options.max_depth {
            Some(max) if depth > max => {
                Err(self.cursor.error(SyntaxError::DepthLimitExceeded(max)))
            }
            _ => Ok(()),
        }
    }

    fn scan_object(&mut self, depth: usize) -> Result<Map, ParseError> {
        self.enter(depth)?;
        self.cursor.bump();

        let mut map = Map::new();
        self.cursor.skip_whitespace();
        if self.cursor.peek() == Some(b'}') {
            self.cursor.bump();
            return Ok(map);
        }

        loop {
            self.cursor.skip_whitespace();
            if self.cursor.peek() != Some(b'"') {
                return Err(self
                    .cursor
                    .unexpected("looking for beginning of object key string"));
            }
            let key = strings::scan_string(&mut self.cursor)?;

            self.cursor.skip_whitespace();
            if self.cursor.peek() != Some(b':') {
                return Err(self.cursor.unexpected("after object key"));
            }
            self.cursor.bump();

            self.cursor.skip_whitespace();
            let value = self.decode_value(depth)?;
            // Duplicate keys: the last one wins.
            map.insert(key, value);

            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                Some(b',') => self.cursor.bump(),
                Some(b'}') => {
                    self.cursor.bump();
                    return Ok(map);
                }
                _ => return Err(self.cursor.unexpected("after object key:value pair")),
            }
        }
    }

    fn scan_array(&mut self, depth: usize) -> Result<Array, ParseError> {
        self.enter(depth)?;
        self.cursor.bump();

        let mut items = Array::new();
        self.cursor.skip_whitespace();
        if self.cursor.peek() == Some(b']') {
            self.cursor.bump();
            return Ok(items);
        }

        loop {
            self.cursor.skip_whitespace();
            items.push(self.decode_value(depth)?);

            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                Some(b',') => self.cursor.bump(),
                Some(b']') => {
                    self.cursor.bump();
                    return Ok(items);
                }
                _ => return Err(self.cursor.unexpected("after array element")),
            }
        }
    }

    fn scan_literal(&mut self, literal: &'static str) -> Result<Value, ParseError> {
        for &expected in literal.as_bytes() {
            match self.cursor.peek() {
                Some(b) if b == expected => self.cursor.bump(),
                Some(_) => {
                    return Err(self.cursor.error(SyntaxError::InvalidLiteral {
                        found: self.cursor.current_char(),
                        literal,
                    }));
                }
                None => return Err(self.cursor.eof()),
            }
        }
        Ok(match literal {
            "true" => Value::Boolean(true),
            "false" => Value::Boolean(false),
            _ => Value::Null,
        })
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<Value, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }
        match self.decode_next() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => {
                self.fused = true;
                None
            }
            Err(err) => {
                self.fused = true;
                Some(Err(err))
            }
        }
    }
}

impl core::iter::FusedIterator for Decoder<'_> {}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec, vec::Vec};

    use rstest::rstest;

    use super::*;

    fn decode_all(input: &str) -> Result<Vec<Value>, ParseError> {
        Decoder::new(input.as_bytes()).collect()
    }

    fn obj<const N: usize>(members: [(&str, Value); N]) -> Value {
        Value::Object(members.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    #[test]
    fn empty_input_is_end_of_stream() {
        let mut d = Decoder::new(b"");
        assert_eq!(d.decode_next().unwrap(), None);
        assert_eq!(d.decode_next().unwrap(), None);
        assert!(!d.more());
    }

    #[test]
    fn whitespace_only_input_is_end_of_stream() {
        let mut d = Decoder::new(b" \n\t\r ");
        assert!(!d.more());
        assert_eq!(d.decode_next().unwrap(), None);
        assert_eq!(d.input_offset(), 5);
    }

    #[test]
    fn self_delimiting_values_need_no_separator() {
        assert_eq!(
            decode_all(r#""a"{"k":1}[2]"b"truenull"#).unwrap(),
            vec![
                Value::from("a"),
                obj([("k", Value::Number(1.0))]),
                Value::Array(vec![Value::Number(2.0)]),
                Value::from("b"),
                Value::Boolean(true),
                Value::Null,
            ]
        );
    }

    #[test]
    fn numbers_split_on_newline() {
        assert_eq!(
            decode_all("123\n3.1415926\n-7e2").unwrap(),
            vec![
                Value::Number(123.0),
                Value::Number(3.141_592_6),
                Value::Number(-700.0)
            ]
        );
    }

    #[test]
    fn number_followed_by_string_needs_no_separator() {
        assert_eq!(
            decode_all(r#"3.1415926"Hello, World!""#).unwrap(),
            vec![Value::Number(3.141_592_6), Value::from("Hello, World!")]
        );
    }

    #[test]
    fn adjacent_digits_merge_into_one_number() {
        assert_eq!(decode_all("1234").unwrap(), vec![Value::Number(1234.0)]);
    }

    #[test]
    fn adjacent_fractions_fail_at_second_point() {
        let mut d = Decoder::new(b"1.52.5");
        assert_eq!(d.decode_next().unwrap(), Some(Value::Number(1.52)));
        let err = d.decode_next().unwrap_err();
        assert_eq!(err.offset(), 4);
        assert_eq!(
            err.kind(),
            &SyntaxError::InvalidCharacter {
                found: '.',
                context: "looking for beginning of value"
            }
        );
    }

    #[test]
    fn nested_values_decode_recursively() {
        let input = r#"
[
  {"brand":"Intel","model":"i7-9700K"},
  {"brand":"AMD","model":"3900X"}
]
"#;
        assert_eq!(
            decode_all(input).unwrap(),
            vec![Value::Array(vec![
                obj([("brand", "Intel".into()), ("model", "i7-9700K".into())]),
                obj([("brand", "AMD".into()), ("model", "3900X".into())]),
            ])]
        );
    }

    #[test]
    fn duplicate_keys_keep_last() {
        assert_eq!(
            decode_all(r#"{"a":1,"a":2}"#).unwrap(),
            vec![obj([("a", Value::Number(2.0))])]
        );
    }

    #[test]
    fn array_preserves_order() {
        let v = decode_all("[3,1,2]").unwrap();
        assert_eq!(v[0].to_string(), "[3,1,2]");
    }

    #[test]
    fn cursor_stops_after_token() {
        let mut d = Decoder::new(b"[1] \n\"x\"");
        d.decode_next().unwrap();
        assert_eq!(d.input_offset(), 3);
        assert_eq!(d.remaining(), b" \n\"x\"");
        assert!(d.more());
        d.decode_next().unwrap();
        assert!(!d.more());
    }

    #[rstest]
    #[case("x", 0, "invalid character 'x' looking for beginning of value at 1:1")]
    #[case("[1,]", 3, "invalid character ']' looking for beginning of value at 1:4")]
    #[case("[1 2]", 3, "invalid character '2' after array element at 1:4")]
    #[case("{1:2}", 1, "invalid character '1' looking for beginning of object key string at 1:2")]
    #[case(r#"{"a" 1}"#, 5, "invalid character '1' after object key at 1:6")]
    #[case(r#"{"a":1 "b":2}"#, 7, "invalid character '\"' after object key:value pair at 1:8")]
    #[case("nul!", 3, "invalid character '!' in literal null at 1:4")]
    #[case("[1]\n]", 4, "invalid character ']' looking for beginning of value at 2:1")]
    fn malformed_input(#[case] input: &str, #[case] offset: usize, #[case] message: &str) {
        let mut d = Decoder::new(input.as_bytes());
        let err = loop {
            match d.decode_next() {
                Ok(Some(_)) => {}
                Ok(None) => panic!("expected an error for {input:?}"),
                Err(err) => break err,
            }
        };
        assert_eq!(err.offset(), offset);
        assert_eq!(err.to_string(), message);
    }

    #[rstest]
    #[case("[")]
    #[case("[1,")]
    #[case(r#"{"a""#)]
    #[case(r#"{"a":"#)]
    #[case(r#""unterminated"#)]
    #[case("tru")]
    #[case("-")]
    fn truncated_input_is_eof(#[case] input: &str) {
        let err = Decoder::new(input.as_bytes()).decode_next().unwrap_err();
        assert!(err.is_eof(), "{input:?}: {err}");
        assert_eq!(err.offset(), input.len());
    }

    #[test]
    fn errors_are_sticky() {
        let mut d = Decoder::new(b"1 ? 2");
        assert_eq!(d.decode_next().unwrap(), Some(Value::Number(1.0)));
        let first = d.decode_next().unwrap_err();
        let offset = d.input_offset();
        assert_eq!(d.decode_next().unwrap_err(), first);
        assert_eq!(d.input_offset(), offset);
    }

    #[test]
    fn iterator_stops_after_error() {
        let results: Vec<_> = Decoder::new(b"1 ? 2").collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn depth_limit_applies_to_nesting() {
        let options = DecoderOptions { max_depth: Some(2) };
        let mut d = Decoder::with_options(b"[[1]] [[[1]]]", options);
        assert!(d.decode_next().unwrap().is_some());
        let err = d.decode_next().unwrap_err();
        assert_eq!(err.kind(), &SyntaxError::DepthLimitExceeded(2));
        assert_eq!(err.offset(), 8);
    }

    #[test]
    fn unlimited_depth_by_default() {
        let depth = 500;
        let input = "[".repeat(depth) + &"]".repeat(depth);
        let mut d = Decoder::new(input.as_bytes());
        let mut v = d.decode_next().unwrap().unwrap();
        let mut seen = 1;
        while let Value::Array(mut items) = v {
            match items.pop() {
                Some(inner) => {
                    v = inner;
                    seen += 1;
                }
                None => break,
            }
        }
        assert_eq!(seen, depth);
    }

    #[test_log::test]
    fn invalid_utf8_start_is_reported_as_replacement() {
        let err = Decoder::new(b"\xFF").decode_next().unwrap_err();
        assert_eq!(
            err.kind(),
            &SyntaxError::InvalidCharacter {
                found: '\u{FFFD}',
                context: "looking for beginning of value"
            }
        );
    }
}
