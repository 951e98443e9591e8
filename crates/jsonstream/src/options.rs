/// Configuration options for the [`Decoder`](crate::Decoder).
///
/// # Examples
///
/// ```rust
/// use jsonstream::{Decoder, DecoderOptions};
///
/// let options = DecoderOptions {
///     max_depth: Some(64),
///     ..Default::default()
/// };
/// let mut decoder = Decoder::with_options(b"[[1]]", options);
/// assert!(decoder.decode_next().unwrap().is_some());
/// ```
///
/// # Default
///
/// No nesting limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Maximum number of nested arrays and objects in one value.
    ///
    /// A top-level `[]` has depth one. Exceeding the limit fails the decode
    /// with [`SyntaxError::DepthLimitExceeded`].
    ///
    /// When `None`, nesting is bounded only by available stack.
    ///
    /// # Default
    ///
    /// `None`
    ///
    /// [`SyntaxError::DepthLimitExceeded`]: crate::SyntaxError::DepthLimitExceeded
    pub max_depth: Option<usize>,
}
