use std::fmt;

use thiserror::Error;

/// A byte buffer, displayed as lowercase hex digits
pub struct Hex<'a>(pub &'a [u8]);

impl<'a> fmt::Display for Hex<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Failed to parse a hex string
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HexError {
    /// The string has an odd number of digits
    #[error("Odd number of hex digits ({0})")]
    OddLength(usize),
    /// Not a hex digit
    #[error("Invalid hex digit {digit:?} at {index}")]
    InvalidDigit {
        /// The offending character
        digit: char,
        /// The byte offset in the string
        index: usize,
    },
}

fn nibble(digit: u8, index: usize) -> Result<u8, HexError> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        _ => Err(HexError::InvalidDigit {
            digit: char::from(digit),
            index,
        }),
    }
}

/// Parse a string of hex digit pairs, ignoring surrounding whitespace
pub fn parse_hex(input: &str) -> Result<Vec<u8>, HexError> {
    let digits = input.trim().as_bytes();
    if digits.len() % 2 != 0 {
        return Err(HexError::OddLength(digits.len()));
    }
    digits
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| Ok(nibble(pair[0], 2 * i)? << 4 | nibble(pair[1], 2 * i + 1)?))
        .collect()
}
