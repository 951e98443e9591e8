use bstr::BString;

use super::cursor::Cursor;
use crate::{ParseError, SyntaxError};

/// Scan one number token and convert it to `f64`.
///
/// The token ends at the first byte that cannot continue it, which is left
/// unconsumed. Running out of input after a complete number is fine; running
/// out after `-`, `.`, or an exponent marker is not.
pub(super) fn scan_number(cursor: &mut Cursor<'_>) -> Result<f64, ParseError> {
    let start = cursor.offset();

    if cursor.peek() == Some(b'-') {
        cursor.bump();
    }

    match cursor.peek() {
        Some(b'0') => cursor.bump(),
        Some(b'1'..=b'9') => {
            cursor.take_while(|b| b.is_ascii_digit());
        }
        _ => return Err(cursor.unexpected("in numeric literal")),
    }

    if cursor.peek() == Some(b'.') {
        cursor.bump();
        digits(cursor, "after decimal point in numeric literal")?;
    }

    if matches!(cursor.peek(), Some(b'e' | b'E')) {
        cursor.bump();
        if matches!(cursor.peek(), Some(b'+' | b'-')) {
            cursor.bump();
        }
        digits(cursor, "in exponent of numeric literal")?;
    }

    let lexeme = cursor.slice(start);
    core::str::from_utf8(lexeme)
        .ok()
        .and_then(|text| text.parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .ok_or_else(|| cursor.error_at(start, SyntaxError::NumberOutOfRange(BString::from(lexeme))))
}

fn digits(cursor: &mut Cursor<'_>, context: &'static str) -> Result<(), ParseError> {
    if cursor.take_while(|b| b.is_ascii_digit()).is_empty() {
        return Err(cursor.unexpected(context));
    }
    Ok(())
}
