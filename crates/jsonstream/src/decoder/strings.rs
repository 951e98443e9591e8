use alloc::{string::String, vec::Vec};

use bstr::ByteSlice;

use super::{
    cursor::Cursor,
    escape_buffer::{UnicodeEscapeBuffer, combine_surrogates, is_high_surrogate, is_low_surrogate},
};
use crate::{ParseError, SyntaxError};

const REPLACEMENT: char = '\u{FFFD}';

/// Scan one string token, cursor on the opening quote.
///
/// Invalid UTF-8 and unpaired surrogate escapes decode to U+FFFD rather than
/// failing; raw control characters and malformed escapes are errors.
pub(super) fn scan_string(cursor: &mut Cursor<'_>) -> Result<String, ParseError> {
    debug_assert_eq!(cursor.peek(), Some(b'"'));
    cursor.bump();

    let mut out = Vec::new();
    loop {
        let run = cursor.take_while(|b| b != b'"' && b != b'\\' && b >= 0x20);
        out.extend_from_slice(run);

        match cursor.peek() {
            None => return Err(cursor.eof()),
            Some(b'"') => {
                cursor.bump();
                break;
            }
            Some(b'\\') => {
                cursor.bump();
                scan_escape(cursor, &mut out)?;
            }
            Some(b) => {
                return Err(cursor.error(SyntaxError::ControlCharacterInString(char::from(b))));
            }
        }
    }

    Ok(match String::from_utf8(out) {
        Ok(s) => s,
        Err(err) => repair_utf8(err.as_bytes()),
    })
}

/// One U+FFFD per invalid byte, so a truncated sequence keeps its width.
fn repair_utf8(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in ByteSlice::utf8_chunks(bytes) {
        text.push_str(chunk.valid());
        text.extend(core::iter::repeat_n(REPLACEMENT, chunk.invalid().len()));
    }
    text
}

fn scan_escape(cursor: &mut Cursor<'_>, out: &mut Vec<u8>) -> Result<(), ParseError> {
    let escape_at = cursor.offset();
    let c = match cursor.next_byte()? {
        b'"' => '"',
        b'\\' => '\\',
        b'/' => '/',
        b'b' => '\u{08}',
        b'f' => '\u{0C}',
        b'n' => '\n',
        b'r' => '\r',
        b't' => '\t',
        b'u' => scan_unicode_escape(cursor)?,
        _ => {
            return Err(cursor.error_at(
                escape_at,
                SyntaxError::InvalidEscape(cursor.char_at(escape_at)),
            ));
        }
    };
    push_char(out, c);
    Ok(())
}

/// Cursor just past `\u`. A high surrogate is paired with an immediately
/// following `\uXXXX` low surrogate when present.
fn scan_unicode_escape(cursor: &mut Cursor<'_>) -> Result<char, ParseError> {
    let unit = read_hex4(cursor)?;

    if is_high_surrogate(unit) {
        let rest = cursor.remaining();
        if rest.starts_with(b"\\u") {
            if let Some(low) = UnicodeEscapeBuffer::decode(&rest[2..]) {
                if is_low_surrogate(low) {
                    cursor.advance(6);
                    return Ok(combine_surrogates(unit, low).unwrap_or(REPLACEMENT));
                }
            }
        }
        return Ok(REPLACEMENT);
    }

    Ok(char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT))
}

fn read_hex4(cursor: &mut Cursor<'_>) -> Result<u16, ParseError> {
    let mut buf = UnicodeEscapeBuffer::new();
    loop {
        let at = cursor.offset();
        let b = cursor.next_byte()?;
        match buf.feed(b) {
            Ok(Some(unit)) => return Ok(unit),
            Ok(None) => {}
            Err(_) => {
                return Err(cursor.error_at(
                    at,
                    SyntaxError::InvalidUnicodeEscape(cursor.char_at(at)),
                ));
            }
        }
    }
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut tmp = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
}
