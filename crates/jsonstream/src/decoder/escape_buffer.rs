//! Decoding of the four hex digits that follow `\u` in a string.
//!
//! The [`UnicodeEscapeBuffer`] type accumulates exactly four ASCII
//! hexadecimal digits (`0-9`, `A-F`, `a-f`) into a UTF-16 code unit as they
//! arrive, and resets itself once the fourth digit is provided.
//!
//! Pairing surrogates into a `char` is left to the caller, since a high
//! surrogate is only meaningful together with the escape that follows it.

use crate::SyntaxError;

#[derive(Debug, Default)]
/// Accumulates four hexadecimal digits into one UTF-16 code unit.
pub(crate) struct UnicodeEscapeBuffer {
    acc: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    /// Creates a new, empty `UnicodeEscapeBuffer`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears any accumulated digits.
    pub fn reset(&mut self) {
        self.acc = 0;
        self.len = 0;
    }

    #[inline]
    fn hex_val(b: u8) -> Option<u16> {
        match b {
            b'0'..=b'9' => Some(u16::from(b - b'0')),
            b'a'..=b'f' => Some(u16::from(b - b'a' + 10)),
            b'A'..=b'F' => Some(u16::from(b - b'A' + 10)),
            _ => None,
        }
    }

    /// Feeds a single ASCII hexadecimal digit.
    ///
    /// - Returns `Ok(None)` if fewer than four digits have been provided.
    /// - Returns `Ok(Some(unit))` on the fourth digit, and resets.
    /// - Returns `Err` if `b` is not an ASCII hex digit.
    pub fn feed(&mut self, b: u8) -> Result<Option<u16>, SyntaxError> {
        let d = Self::hex_val(b).ok_or(SyntaxError::InvalidUnicodeEscape(char::from(b)))?;

        self.acc = (self.acc << 4) | d;
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        let unit = self.acc;
        self.reset();
        Ok(Some(unit))
    }

    /// Decode a complete four-digit escape body, if `digits` starts with one.
    pub fn decode(digits: &[u8]) -> Option<u16> {
        let mut buf = Self::new();
        let mut out = None;
        for &b in digits.get(..4)? {
            out = buf.feed(b).ok()?;
        }
        out
    }
}

#[inline]
pub(crate) fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..0xDC00).contains(&unit)
}

#[inline]
pub(crate) fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..0xE000).contains(&unit)
}

/// Combine a surrogate pair into the character it encodes.
#[inline]
pub(crate) fn combine_surrogates(high: u16, low: u16) -> Option<char> {
    let code = 0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
    char::from_u32(code)
}
