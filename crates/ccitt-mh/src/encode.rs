//! Encoder implementation

use crate::{
    bits::{NaturalBitReader, TransmissionBitWriter},
    table::{self, MAX_TERMINATING},
    Color, ColorLine,
};

/// The encoder
///
/// Every call to [`Encoder::encode`] produces the codes for exactly one
/// scanline, starting with a (possibly empty) white run.
#[derive(Debug, Default, Clone, Copy)]
pub struct Encoder {
    eol: bool,
}

impl Encoder {
    /// Create a new encoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Write an EOL code in front of every row
    pub fn eol(mut self, eol: bool) -> Self {
        self.eol = eol;
        self
    }

    /// Encode a scanline
    pub fn encode<L: ColorLine + ?Sized>(&self, line: &L) -> Vec<u8> {
        self.encode_colors(line.colors())
    }

    /// Encode the first `width` pixels of a packed bitmap row
    pub fn encode_packed(&self, bytes: &[u8], width: usize) -> Vec<u8> {
        self.encode_colors(NaturalBitReader::with_len(bytes, width).map(Color::from))
    }

    /// Encode a sequence of pixels
    pub fn encode_colors<I: IntoIterator<Item = Color>>(&self, pixels: I) -> Vec<u8> {
        let pixels = pixels.into_iter();
        let mut output = TransmissionBitWriter::with_capacity(pixels.size_hint().0);
        if self.eol {
            output.write_code(table::EOL);
        }

        let mut color = Color::White;
        let mut count = 0;
        let mut empty = true;
        for pixel in pixels {
            empty = false;
            if pixel != color {
                write_run(&mut output, color, count);
                color.invert();
                count = 0;
            }
            count += 1;
        }
        if !empty {
            write_run(&mut output, color, count);
        }
        output.done()
    }
}

fn write_run(output: &mut TransmissionBitWriter, color: Color, mut len: usize) {
    while len > MAX_TERMINATING {
        let (quantum, code) = table::largest_makeup(color, len);
        output.write_code(code);
        len -= quantum;
    }
    output.write_code(table::terminating(color, len));
}

#[cfg(test)]
mod tests {
    use super::Encoder;
    use crate::{bits::TransmissionBitReader, table, BitRow, Color};

    fn codes(bytes: &[u8], n: usize) -> String {
        TransmissionBitReader::new(bytes)
            .take(n)
            .map(|b| if b { '1' } else { '0' })
            .collect()
    }

    #[test]
    fn test_empty_row() {
        assert!(Encoder::new().encode(&BitRow::new()).is_empty());
        assert_eq!(Encoder::new().eol(true).encode(&BitRow::new()), vec![0x00, 0x08]);
    }

    #[test]
    fn test_leading_black() {
        let bytes = Encoder::new().encode(&vec![Color::Black]);
        // white 0, black 1
        assert_eq!(codes(&bytes, 11), "00110101010");
        assert_eq!(bytes.len(), 2);
    }

    #[test]
    fn test_short_runs() {
        let row: Vec<Color> = vec![Color::White, Color::White, Color::Black, Color::Black];
        let bytes = Encoder::new().encode(&row);
        // white 2, black 2
        assert_eq!(bytes, vec![0b00111110]);
    }

    #[test]
    fn test_makeup() {
        let bytes = Encoder::new().encode(&BitRow::with_width(64));
        // white 64, white 0
        assert_eq!(codes(&bytes, 13), "1101100110101");

        let bytes = Encoder::new().encode(&BitRow::with_width(130));
        // white 128, white 2
        assert_eq!(codes(&bytes, 9), "100100111");
    }

    #[test]
    fn test_repeated_makeup() {
        let width = 2560 * 2 + 64 + 5;
        let bytes = Encoder::new().encode(&BitRow::with_width(width));
        let expected = [
            table::makeup(Color::White, 2560).unwrap(),
            table::makeup(Color::White, 2560).unwrap(),
            table::makeup(Color::White, 64).unwrap(),
            table::terminating(Color::White, 5),
        ];
        let mut s = String::new();
        for code in &expected {
            for i in (0..code.len).rev() {
                s.push(if (code.bits >> i) & 1 == 1 { '1' } else { '0' });
            }
        }
        assert_eq!(codes(&bytes, s.len()), s);
    }

    #[test]
    fn test_encode_packed() {
        // the trailing bits must not be read
        let bytes = Encoder::new().encode_packed(&[0b00110000, 0xFF], 4);
        assert_eq!(bytes, vec![0b00111110]);
    }
}
