#![warn(missing_docs)]
//! # CCITT Modified Huffman
//!
//! Encodes and decodes single scanlines of a bi-level image with the
//! one-dimensional run length coding of ITU-T T.4 (the "Modified Huffman"
//! scheme of Group 3 fax, TIFF compression 2).
//!
//! Every row starts with a white run (possibly of length 0), followed by
//! alternating black and white runs. In the uncompressed bitmap `1` is black;
//! the compressed stream is filled least significant bit first.
//!
//! ```
//! use ccitt_mh::{decode_row, encode_row, BitRow, Color};
//!
//! let row: BitRow = [Color::Black, Color::White, Color::White].iter().copied().collect();
//! let bytes = encode_row(&row);
//! assert_eq!(decode_row(&bytes).unwrap(), row);
//! ```
//!
//! Spec: ITU-T Recommendation T.4 (07/03) <https://www.itu.int/rec/T-REC-T.4-200307-I/en>

mod ascii_art;
pub mod bits;
mod color;
mod decode;
mod encode;
mod error;
mod row;
pub mod table;

pub use ascii_art::{ascii_art, BorderDrawing, BoxDrawing, ASCII, UNICODE};
pub use color::{Color, Run};
pub use decode::{DecodeOptions, Decoder, State};
pub use encode::Encoder;
pub use error::{DecodeError, DecodeResult};
pub use row::{BitRow, ColorLine, RunSink, Runs};

/// Encode a scanline
pub fn encode_row<L: ColorLine + ?Sized>(line: &L) -> Vec<u8> {
    Encoder::new().encode(line)
}

/// Encode the first `width` pixels of a packed bitmap row (`1` is black)
pub fn encode_packed(bytes: &[u8], width: usize) -> Vec<u8> {
    Encoder::new().encode_packed(bytes, width)
}

/// Decode a scanline, whatever its width
pub fn decode_row(input: &[u8]) -> DecodeResult<BitRow> {
    Decoder::default().decode(input)
}

/// Decode a scanline that must have exactly `width` pixels
pub fn decode_row_strict(input: &[u8], width: usize) -> DecodeResult<BitRow> {
    Decoder::new(DecodeOptions::strict(width)).decode(input)
}
