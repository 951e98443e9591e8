//! The write-then-decode demonstration.
//!
//! [`run`] appends every chunk to a fresh [`Buffer`], then decodes the buffer
//! value by value, reporting each step to a transcript:
//!
//! ```text
//! Write() OK. n: 9, appended data: 3.1415926
//! Decode() OK. type: number, v: 3.1415926
//! ```
//!
//! The first failure is reported to the transcript and returned; nothing
//! after it runs.

use alloc::vec::Vec;
use core::fmt::Write;

use bstr::BStr;
use log::info;

use crate::{Buffer, Error, Value};

/// The chunks of the reference scenario: two newline-separated numbers, two
/// strings, an object, and a pretty-printed array.
pub const REFERENCE_CHUNKS: [&[u8]; 6] = [
    // A number needs a delimiter when another number follows.
    b"123\n",
    b"3.1415926",
    br#""Hello, World!""#,
    br#""JSON example""#,
    br#"{"name":"Frank","skills":["go","c"]}"#,
    br#"
[
  {"brand":"Intel","model":"i7-9700K"},
  {"brand":"AMD","model":"3900X"}
]
"#,
];

/// What a successful [`run`] did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// Byte count returned by each write, in order.
    pub writes: Vec<usize>,
    /// Every decoded value, in input order.
    pub values: Vec<Value>,
}

impl Report {
    /// Total bytes appended to the buffer.
    #[must_use]
    pub fn bytes_written(&self) -> usize {
        self.writes.iter().sum()
    }
}

/// Write `chunks` into a new unlimited buffer and decode it.
///
/// # Errors
///
/// See [`run_with_buffer`].
pub fn run<W: Write>(chunks: &[&[u8]], out: &mut W) -> Result<Report, Error> {
    run_with_buffer(Buffer::new(), chunks, out)
}

/// Write `chunks` into `buffer` and decode it, reporting each step to `out`.
///
/// # Errors
///
/// Returns the first [`WriteError`](crate::WriteError) or
/// [`ParseError`](crate::ParseError), after printing it to `out`. Failing to
/// write to `out` itself is [`Error::Output`].
pub fn run_with_buffer<W: Write>(
    mut buffer: Buffer,
    chunks: &[&[u8]],
    out: &mut W,
) -> Result<Report, Error> {
    let mut report = Report::default();

    for chunk in chunks {
        match buffer.write(chunk) {
            Ok(n) => {
                writeln!(out, "Write() OK. n: {n}, appended data: {}", BStr::new(chunk))?;
                report.writes.push(n);
            }
            Err(err) => {
                writeln!(out, "Write() error: {err}")?;
                return Err(err.into());
            }
        }
    }

    let mut decoder = buffer.decoder();
    loop {
        match decoder.decode_next() {
            Ok(Some(value)) => {
                writeln!(out, "Decode() OK. type: {}, v: {value}", value.type_name())?;
                report.values.push(value);
            }
            Ok(None) => break,
            Err(err) => {
                writeln!(out, "Decode() error: {err}")?;
                return Err(err.into());
            }
        }
    }

    info!(
        "decoded {} values from {} bytes",
        report.values.len(),
        report.bytes_written()
    );
    Ok(report)
}
