//! # Code tables
//!
//! The terminating and make-up codes of ITU-T T.4, tables 2 and 3, plus the
//! end-of-line marker.
//!
//! Spec: ITU-T Recommendation T.4 (07/03) <https://www.itu.int/rec/T-REC-T.4-200307-I/en>
use crate::Color;

/// The longest code in any of the tables (in bits)
pub const MAX_CODE_LEN: u8 = 13;

/// Run lengths at or below this value are written with a single terminating code
pub const MAX_TERMINATING: usize = 63;

/// The largest make-up quantum
pub const MAX_MAKEUP: usize = 2560;

/// A variable-length code, `len` bits of `bits`, most significant bit first
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Code {
    /// The value of the code
    pub bits: u16,
    /// The number of bits in the code
    pub len: u8,
}

impl Code {
    /// Create a new code
    pub const fn new(bits: u16, len: u8) -> Self {
        Self { bits, len }
    }

    /// Index into the lookup tables, unique across all lengths
    const fn key(&self) -> usize {
        (1 << self.len) | self.bits as usize
    }
}

/// The result of matching a code against the tables
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Matched {
    /// A terminating code for a run of `0..=63` pixels
    Terminating(u16),
    /// A make-up code for a multiple of 64 pixels
    Makeup(u16),
}

impl Matched {
    /// The number of pixels represented by the code
    pub fn run_len(&self) -> u16 {
        match self {
            Matched::Terminating(len) | Matched::Makeup(len) => *len,
        }
    }
}

const fn c(bits: u16, len: u8) -> Code {
    Code::new(bits, len)
}

/// End of line, `0000 0000 0001`
pub const EOL: Code = c(0b000000000001, 12);

#[rustfmt::skip]
/// White terminating codes, indexed by run length
pub const WHITE_TERMINATING: [Code; 64] = [
    c(0b00110101, 8), c(0b000111, 6), c(0b0111, 4), c(0b1000, 4),
    c(0b1011, 4), c(0b1100, 4), c(0b1110, 4), c(0b1111, 4),
    c(0b10011, 5), c(0b10100, 5), c(0b00111, 5), c(0b01000, 5),
    c(0b001000, 6), c(0b000011, 6), c(0b110100, 6), c(0b110101, 6),
    c(0b101010, 6), c(0b101011, 6), c(0b0100111, 7), c(0b0001100, 7),
    c(0b0001000, 7), c(0b0010111, 7), c(0b0000011, 7), c(0b0000100, 7),
    c(0b0101000, 7), c(0b0101011, 7), c(0b0010011, 7), c(0b0100100, 7),
    c(0b0011000, 7), c(0b00000010, 8), c(0b00000011, 8), c(0b00011010, 8),
    c(0b00011011, 8), c(0b00010010, 8), c(0b00010011, 8), c(0b00010100, 8),
    c(0b00010101, 8), c(0b00010110, 8), c(0b00010111, 8), c(0b00101000, 8),
    c(0b00101001, 8), c(0b00101010, 8), c(0b00101011, 8), c(0b00101100, 8),
    c(0b00101101, 8), c(0b00000100, 8), c(0b00000101, 8), c(0b00001010, 8),
    c(0b00001011, 8), c(0b01010010, 8), c(0b01010011, 8), c(0b01010100, 8),
    c(0b01010101, 8), c(0b00100100, 8), c(0b00100101, 8), c(0b01011000, 8),
    c(0b01011001, 8), c(0b01011010, 8), c(0b01011011, 8), c(0b01001010, 8),
    c(0b01001011, 8), c(0b00110010, 8), c(0b00110011, 8), c(0b00110100, 8),
];

#[rustfmt::skip]
/// Black terminating codes, indexed by run length
pub const BLACK_TERMINATING: [Code; 64] = [
    c(0b0000110111, 10), c(0b010, 3), c(0b11, 2), c(0b10, 2),
    c(0b011, 3), c(0b0011, 4), c(0b0010, 4), c(0b00011, 5),
    c(0b000101, 6), c(0b000100, 6), c(0b0000100, 7), c(0b0000101, 7),
    c(0b0000111, 7), c(0b00000100, 8), c(0b00000111, 8), c(0b000011000, 9),
    c(0b0000010111, 10), c(0b0000011000, 10), c(0b0000001000, 10), c(0b00001100111, 11),
    c(0b00001101000, 11), c(0b00001101100, 11), c(0b00000110111, 11), c(0b00000101000, 11),
    c(0b00000010111, 11), c(0b00000011000, 11), c(0b000011001010, 12), c(0b000011001011, 12),
    c(0b000011001100, 12), c(0b000011001101, 12), c(0b000001101000, 12), c(0b000001101001, 12),
    c(0b000001101010, 12), c(0b000001101011, 12), c(0b000011010010, 12), c(0b000011010011, 12),
    c(0b000011010100, 12), c(0b000011010101, 12), c(0b000011010110, 12), c(0b000011010111, 12),
    c(0b000001101100, 12), c(0b000001101101, 12), c(0b000011011010, 12), c(0b000011011011, 12),
    c(0b000001010100, 12), c(0b000001010101, 12), c(0b000001010110, 12), c(0b000001010111, 12),
    c(0b000001100100, 12), c(0b000001100101, 12), c(0b000001010010, 12), c(0b000001010011, 12),
    c(0b000000100100, 12), c(0b000000110111, 12), c(0b000000111000, 12), c(0b000000100111, 12),
    c(0b000000101000, 12), c(0b000001011000, 12), c(0b000001011001, 12), c(0b000000101011, 12),
    c(0b000000101100, 12), c(0b000001011010, 12), c(0b000001100110, 12), c(0b000001100111, 12),
];

#[rustfmt::skip]
/// White make-up codes for 64, 128, .., 1728
pub const WHITE_MAKEUP: [Code; 27] = [
    c(0b11011, 5), c(0b10010, 5), c(0b010111, 6), c(0b0110111, 7),
    c(0b00110110, 8), c(0b00110111, 8), c(0b01100100, 8), c(0b01100101, 8),
    c(0b01101000, 8), c(0b01100111, 8), c(0b011001100, 9), c(0b011001101, 9),
    c(0b011010010, 9), c(0b011010011, 9), c(0b011010100, 9), c(0b011010101, 9),
    c(0b011010110, 9), c(0b011010111, 9), c(0b011011000, 9), c(0b011011001, 9),
    c(0b011011010, 9), c(0b011011011, 9), c(0b010011000, 9), c(0b010011001, 9),
    c(0b010011010, 9), c(0b011000, 6), c(0b010011011, 9),
];

#[rustfmt::skip]
/// Black make-up codes for 64, 128, .., 1728
pub const BLACK_MAKEUP: [Code; 27] = [
    c(0b0000001111, 10), c(0b000011001000, 12), c(0b000011001001, 12), c(0b000001011011, 12),
    c(0b000000110011, 12), c(0b000000110100, 12), c(0b000000110101, 12), c(0b0000001101100, 13),
    c(0b0000001101101, 13), c(0b0000001001010, 13), c(0b0000001001011, 13), c(0b0000001001100, 13),
    c(0b0000001001101, 13), c(0b0000001110010, 13), c(0b0000001110011, 13), c(0b0000001110100, 13),
    c(0b0000001110101, 13), c(0b0000001110110, 13), c(0b0000001110111, 13), c(0b0000001010010, 13),
    c(0b0000001010011, 13), c(0b0000001010100, 13), c(0b0000001010101, 13), c(0b0000001011010, 13),
    c(0b0000001011011, 13), c(0b0000001100100, 13), c(0b0000001100101, 13),
];

#[rustfmt::skip]
/// Extended make-up codes for 1792, 1856, .., 2560, shared by both colors
pub const EXTENDED_MAKEUP: [Code; 13] = [
    c(0b00000001000, 11), c(0b00000001100, 11), c(0b00000001101, 11),
    c(0b000000010010, 12), c(0b000000010011, 12), c(0b000000010100, 12),
    c(0b000000010101, 12), c(0b000000010110, 12), c(0b000000010111, 12),
    c(0b000000011100, 12), c(0b000000011101, 12), c(0b000000011110, 12),
    c(0b000000011111, 12),
];

const NONE: u16 = u16::MAX;
const LOOKUP_SIZE: usize = 1 << (MAX_CODE_LEN + 1);

/// Maps `(1 << len) | bits` to a run length. Values below 64 come from a
/// terminating code, all others from a make-up code.
const fn build_lookup(terminating: &[Code; 64], makeup: &[Code; 27]) -> [u16; LOOKUP_SIZE] {
    let mut table = [NONE; LOOKUP_SIZE];
    let mut i = 0;
    while i < 64 {
        table[terminating[i].key()] = i as u16;
        i += 1;
    }
    let mut i = 0;
    while i < 27 {
        table[makeup[i].key()] = (i as u16 + 1) * 64;
        i += 1;
    }
    let mut i = 0;
    while i < 13 {
        table[EXTENDED_MAKEUP[i].key()] = (i as u16 + 28) * 64;
        i += 1;
    }
    table
}

static WHITE_LOOKUP: [u16; LOOKUP_SIZE] = build_lookup(&WHITE_TERMINATING, &WHITE_MAKEUP);
static BLACK_LOOKUP: [u16; LOOKUP_SIZE] = build_lookup(&BLACK_TERMINATING, &BLACK_MAKEUP);

/// Get the terminating code for a run of `len <= 63` pixels
///
/// # Panics
///
/// If `len` is greater than [`MAX_TERMINATING`].
pub fn terminating(color: Color, len: usize) -> Code {
    assert!(len <= MAX_TERMINATING, "no terminating code for {} pixels", len);
    match color {
        Color::White => WHITE_TERMINATING[len],
        Color::Black => BLACK_TERMINATING[len],
    }
}

/// Get the make-up code for `quantum` pixels, if there is one
pub fn makeup(color: Color, quantum: usize) -> Option<Code> {
    if quantum == 0 || quantum % 64 != 0 || quantum > MAX_MAKEUP {
        return None;
    }
    Some(makeup_at(color, quantum / 64))
}

fn makeup_at(color: Color, index: usize) -> Code {
    match (index, color) {
        (28..=40, _) => EXTENDED_MAKEUP[index - 28],
        (_, Color::White) => WHITE_MAKEUP[index - 1],
        (_, Color::Black) => BLACK_MAKEUP[index - 1],
    }
}

/// Get the largest make-up code for at most `len` pixels.
///
/// Returns the quantum and the code. `len` must be at least 64.
pub fn largest_makeup(color: Color, len: usize) -> (usize, Code) {
    debug_assert!(len > MAX_TERMINATING);
    let index = (len / 64).min(MAX_MAKEUP / 64);
    (index * 64, makeup_at(color, index))
}

/// Check whether `code` is the end-of-line marker
pub fn is_eol(code: Code) -> bool {
    code == EOL
}

/// Find the terminating or make-up code of the given color that matches
/// `code` exactly (both value and length)
pub fn lookup(color: Color, code: Code) -> Option<Matched> {
    if code.len == 0 || code.len > MAX_CODE_LEN || code.bits >> code.len != 0 {
        return None;
    }
    let table = match color {
        Color::White => &WHITE_LOOKUP,
        Color::Black => &BLACK_LOOKUP,
    };
    match table[code.key()] {
        NONE => None,
        len if len < 64 => Some(Matched::Terminating(len)),
        len => Some(Matched::Makeup(len)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_codes(color: Color) -> Vec<Code> {
        let (term, mk) = match color {
            Color::White => (&WHITE_TERMINATING, &WHITE_MAKEUP),
            Color::Black => (&BLACK_TERMINATING, &BLACK_MAKEUP),
        };
        let mut codes = vec![EOL];
        codes.extend_from_slice(term);
        codes.extend_from_slice(mk);
        codes.extend_from_slice(&EXTENDED_MAKEUP);
        codes
    }

    fn is_prefix(a: Code, b: Code) -> bool {
        a.len <= b.len && b.bits >> (b.len - a.len) == a.bits
    }

    #[test]
    fn test_codes_are_prefix_free() {
        for color in [Color::White, Color::Black] {
            let codes = all_codes(color);
            for (i, a) in codes.iter().enumerate() {
                assert!(a.len >= 2 && a.len <= MAX_CODE_LEN);
                assert_eq!(a.bits >> a.len, 0, "{:?} does not fit", a);
                for (j, b) in codes.iter().enumerate() {
                    if i != j {
                        assert!(!is_prefix(*a, *b), "{:?} is a prefix of {:?}", a, b);
                    }
                }
            }
        }
    }

    #[test]
    fn test_lookup_terminating() {
        for color in [Color::White, Color::Black] {
            for len in 0..=MAX_TERMINATING {
                let code = terminating(color, len);
                assert_eq!(lookup(color, code), Some(Matched::Terminating(len as u16)));
            }
        }
    }

    #[test]
    fn test_lookup_makeup() {
        for color in [Color::White, Color::Black] {
            for quantum in (64..=MAX_MAKEUP).step_by(64) {
                let code = makeup(color, quantum).unwrap();
                assert_eq!(lookup(color, code), Some(Matched::Makeup(quantum as u16)));
            }
        }
    }

    #[test]
    fn test_lookup_compares_length() {
        // `0111` is white 2, `00111` is white 10, `000111` is white 1
        assert_eq!(lookup(Color::White, c(0b0111, 4)), Some(Matched::Terminating(2)));
        assert_eq!(lookup(Color::White, c(0b0111, 5)), Some(Matched::Terminating(10)));
        assert_eq!(lookup(Color::White, c(0b0111, 6)), Some(Matched::Terminating(1)));
        assert_eq!(lookup(Color::White, c(0b0111, 7)), None);
        assert_eq!(lookup(Color::Black, c(0b0111, 7)), Some(Matched::Terminating(12)));
        // `11` is black 2, but no white code
        assert_eq!(lookup(Color::Black, c(0b11, 2)), Some(Matched::Terminating(2)));
        assert_eq!(lookup(Color::White, c(0b11, 2)), None);
    }

    #[test]
    fn test_eol_is_no_run() {
        assert!(is_eol(c(1, 12)));
        assert!(!is_eol(c(1, 11)));
        assert_eq!(lookup(Color::White, EOL), None);
        assert_eq!(lookup(Color::Black, EOL), None);
    }

    #[test]
    #[should_panic(expected = "no terminating code for 64 pixels")]
    fn test_terminating_out_of_range() {
        terminating(Color::Black, 64);
    }

    #[test]
    fn test_makeup_edges() {
        assert_eq!(makeup(Color::White, 0), None);
        assert_eq!(makeup(Color::White, 65), None);
        assert_eq!(makeup(Color::Black, 2624), None);
        assert_eq!(makeup(Color::White, 1728), Some(c(0b010011011, 9)));
        assert_eq!(makeup(Color::Black, 1792), makeup(Color::White, 1792));
    }

    #[test]
    fn test_largest_makeup() {
        assert_eq!(largest_makeup(Color::White, 64), (64, c(0b11011, 5)));
        assert_eq!(largest_makeup(Color::White, 127), (64, c(0b11011, 5)));
        assert_eq!(largest_makeup(Color::Black, 1791).0, 1728);
        assert_eq!(largest_makeup(Color::Black, 1792).0, 1792);
        assert_eq!(largest_makeup(Color::White, 2623).0, 2560);
        assert_eq!(largest_makeup(Color::White, 10_000), (2560, c(0b000000011111, 12)));
    }
}
