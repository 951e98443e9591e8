//! JSON value types and utilities.
//!
//! This module defines the [`Value`] enum, the dynamically-typed result of
//! decoding one token, and the helpers that render it back to JSON text.
//!
use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::fmt::{self, Write};

/// Members of a decoded object. Key order is not preserved from the input.
pub type Map = BTreeMap<String, Value>;
/// Elements of a decoded array, in input order.
pub type Array = Vec<Value>;

/// A decoded JSON value as defined by [RFC 8259].
///
/// The decoder picks the variant from the token's syntax alone:
///
/// - `null` → [`Value::Null`]
/// - `true` / `false` → [`Value::Boolean`]
/// - number → [`Value::Number`]
/// - `"..."` → [`Value::String`]
/// - `[...]` → [`Value::Array`]
/// - `{...}` → [`Value::Object`]
///
/// # Examples
///
/// ```
/// use jsonstream::{Value, Map};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::String("value".into()));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// assert_eq!(v.type_name(), "object");
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
// Serde support is always on for tests and opt-in for downstream crates via
// the `serde` feature.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Array),
    Object(Map),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Name of the dynamic type held by this value.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonstream::Value;
    ///
    /// assert_eq!(Value::Number(1.5).type_name(), "number");
    /// assert_eq!(Value::from("x").type_name(), "string");
    /// ```
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// `true` for [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// `true` for [`Value::Boolean`].
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// `true` for [`Value::Number`]. Producers must separate two adjacent
    /// numbers with whitespace; every other pairing is self-delimiting.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// `true` for [`Value::String`].
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// `true` for [`Value::Array`].
    ///
    /// ```
    /// use jsonstream::Value;
    ///
    /// assert!(Value::Array(vec![Value::Null]).is_array());
    /// assert!(!Value::Null.is_array());
    /// ```
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// `true` for [`Value::Object`].
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// The number held by this value, if any.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        if let Self::Number(n) = self { Some(*n) } else { None }
    }

    /// The string held by this value, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(s) = self { Some(s) } else { None }
    }

    /// The elements of an array value.
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        if let Self::Array(a) = self { Some(a) } else { None }
    }

    /// The members of an object value.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        if let Self::Object(m) = self { Some(m) } else { None }
    }
}

/// Writes `src` as the body of a JSON string literal (without the quotes).
///
/// `\n`, `\r` and `\t` use their short escapes. Every other control
/// character, and U+2028/U+2029, is written as a `\u` escape so the output
/// is also valid JavaScript.
pub(crate) fn write_escaped_string<W: Write>(src: &str, out: &mut W) -> fmt::Result {
    let mut run_start = 0;
    for (i, c) in src.char_indices() {
        let short = match c {
            '"' => "\\\"",
            '\\' => "\\\\",
            '\n' => "\\n",
            '\r' => "\\r",
            '\t' => "\\t",
            '\u{2028}' | '\u{2029}' => "",
            c if c.is_control() => "",
            _ => continue,
        };
        out.write_str(&src[run_start..i])?;
        if short.is_empty() {
            write!(out, "\\u{:04x}", u32::from(c))?;
        } else {
            out.write_str(short)?;
        }
        run_start = i + c.len_utf8();
    }
    out.write_str(&src[run_start..])
}

fn write_quoted<W: Write>(s: &str, out: &mut W) -> fmt::Result {
    out.write_char('"')?;
    write_escaped_string(s, out)?;
    out.write_char('"')
}

/// Writes `items` between `open` and `close`, comma separated.
fn write_seq<I, F>(f: &mut fmt::Formatter<'_>, open: char, close: char, items: I, mut each: F) -> fmt::Result
where
    I: IntoIterator,
    F: FnMut(&mut fmt::Formatter<'_>, I::Item) -> fmt::Result,
{
    f.write_char(open)?;
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        each(f, item)?;
    }
    f.write_char(close)
}

/// Compact JSON text, without insignificant whitespace.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(true) => f.write_str("true"),
            Self::Boolean(false) => f.write_str("false"),
            // Decoded numbers are finite; `f64`'s `Display` is the shortest
            // text that parses back to the same value.
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write_quoted(s, f),
            Self::Array(items) => write_seq(f, '[', ']', items, |f, v| fmt::Display::fmt(v, f)),
            Self::Object(members) => write_seq(f, '{', '}', members, |f, (k, v)| {
                write_quoted(k, f)?;
                f.write_char(':')?;
                fmt::Display::fmt(v, f)
            }),
        }
    }
}
