use thiserror::Error;

/// An error when decoding a Modified Huffman encoded scanline
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// No code of the expected color, and no EOL, matches the accumulated bits
    #[error("Invalid code {bits:#016b} at bit {position}")]
    InvalidCode {
        /// Index of the bit that made the code too long
        position: usize,
        /// The unmatched bits
        bits: u16,
    },

    /// The row does not have the expected number of pixels
    #[error("Decoded {actual} pixels, expected {expected}")]
    WidthMismatch {
        /// The expected width of the row
        expected: usize,
        /// The number of pixels decoded
        actual: usize,
    },
}

/// Type alias for convenience
pub type DecodeResult<T> = Result<T, DecodeError>;
