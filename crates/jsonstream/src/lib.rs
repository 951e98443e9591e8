//! Decode a sequence of concatenated JSON values from a single buffer.
//!
//! Bytes are appended to a [`Buffer`] chunk by chunk, then a [`Decoder`]
//! borrows the buffer and yields one [`Value`] per call until the input is
//! exhausted.
//!
//! Strings, objects, and arrays end with their own closing quote, brace, or
//! bracket, so they can be written back to back. Numbers have no terminator:
//! when a number is followed by another number, the producer must separate
//! them with whitespace (conventionally a newline).
//!
//! ```rust
//! use jsonstream::{Buffer, Value};
//!
//! let mut buf = Buffer::new();
//! buf.write(b"123\n").unwrap();
//! buf.write(b"4.5").unwrap();
//! buf.write(br#""text"[1,2]"#).unwrap();
//!
//! let mut decoder = buf.decoder();
//! assert_eq!(decoder.decode_next().unwrap(), Some(Value::Number(123.0)));
//! assert_eq!(decoder.decode_next().unwrap(), Some(Value::Number(4.5)));
//! assert_eq!(decoder.decode_next().unwrap(), Some(Value::from("text")));
//! assert!(decoder.decode_next().unwrap().unwrap().is_array());
//! assert_eq!(decoder.decode_next().unwrap(), None);
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod buffer;
mod decoder;
pub mod demo;
mod error;
mod options;
mod value;

#[cfg(test)]
mod tests;

pub use buffer::Buffer;
pub use decoder::Decoder;
pub use error::{Error, ParseError, SyntaxError, WriteError};
pub use options::DecoderOptions;
pub use value::{Array, Map, Value};
