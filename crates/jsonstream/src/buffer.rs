use alloc::vec::Vec;

use log::debug;

use crate::{Decoder, DecoderOptions, WriteError};

/// A growable byte buffer that collects chunks before they are decoded.
///
/// Chunks are appended in order with [`write`](Self::write). Once writing is
/// done, [`decoder`](Self::decoder) lends the contents to a [`Decoder`]; the
/// borrow keeps the buffer read-only for as long as decoding runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    bytes: Vec<u8>,
    limit: Option<usize>,
}

impl Buffer {
    /// An empty buffer without a size limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty buffer that refuses to grow past `limit` bytes.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            bytes: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Append `chunk`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError`] if the buffer would exceed its limit or the
    /// allocation fails. The buffer is left unchanged in that case.
    pub fn write(&mut self, chunk: &[u8]) -> Result<usize, WriteError> {
        let attempted = self.bytes.len().saturating_add(chunk.len());
        if let Some(limit) = self.limit {
            if attempted > limit {
                return Err(WriteError::LimitExceeded { attempted, limit });
            }
        }
        self.bytes
            .try_reserve(chunk.len())
            .map_err(|_| WriteError::TooLarge {
                requested: chunk.len(),
            })?;
        self.bytes.extend_from_slice(chunk);
        debug!("buffered {} bytes ({} total)", chunk.len(), self.bytes.len());
        Ok(chunk.len())
    }

    /// The bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The configured size limit, if any.
    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// A decoder over the buffered bytes with default options.
    #[must_use]
    pub fn decoder(&self) -> Decoder<'_> {
        Decoder::new(&self.bytes)
    }

    /// A decoder over the buffered bytes.
    #[must_use]
    pub fn decoder_with_options(&self, options: DecoderOptions) -> Decoder<'_> {
        Decoder::with_options(&self.bytes, options)
    }
}

impl AsRef<[u8]> for Buffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(feature = "std")]
impl std::io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Buffer::write(self, buf)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::OutOfMemory, err))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_reports_chunk_length() {
        let mut buf = Buffer::new();
        assert_eq!(buf.write(b"123\n"), Ok(4));
        assert_eq!(buf.write(b"3.1415926"), Ok(9));
        assert_eq!(buf.write(b""), Ok(0));
        assert_eq!(buf.as_bytes(), b"123\n3.1415926");
        assert_eq!(buf.len(), 13);
    }

    #[test]
    fn limit_rejects_whole_chunk() {
        let mut buf = Buffer::with_limit(8);
        assert_eq!(buf.write(b"[1,2,"), Ok(5));
        assert_eq!(
            buf.write(b"3,4]"),
            Err(WriteError::LimitExceeded {
                attempted: 9,
                limit: 8
            })
        );
        assert_eq!(buf.as_bytes(), b"[1,2,");
        assert_eq!(buf.write(b"3]"), Ok(2));
        assert_eq!(buf.len(), 7);
    }

    #[test]
    fn decoder_borrows_contents() {
        let mut buf = Buffer::new();
        buf.write(br#""a""b""#).unwrap();
        let values: Vec<_> = buf.decoder().map(Result::unwrap).collect();
        assert_eq!(values.len(), 2);
    }

    #[cfg(feature = "std")]
    #[test]
    fn io_write_maps_limit_to_out_of_memory() {
        use std::io::Write;

        let mut buf = Buffer::with_limit(2);
        write!(buf, "12").unwrap();
        let err = buf.write_all(b"3").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::OutOfMemory);
        assert_eq!(buf.as_bytes(), b"12");
    }
}
