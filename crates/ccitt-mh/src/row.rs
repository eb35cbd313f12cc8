//! # Scanlines
//!
//! [`ColorLine`] is what the encoder reads from, [`RunSink`] is what the
//! decoder writes to. [`BitRow`] implements both on a packed bitmap.
use std::{fmt, iter::FromIterator};

use crate::{
    bits::{NaturalBitReader, NaturalBitWriter},
    Color, Run,
};

/// This struct can represent a scanline
pub trait ColorLine {
    /// The number of pixels in the line
    fn width(&self) -> usize;
    /// Get the color at index i
    fn color_at(&self, i: usize) -> Color;

    /// Iterate over all pixels
    fn colors(&self) -> Box<dyn Iterator<Item = Color> + '_> {
        Box::new((0..self.width()).map(move |i| self.color_at(i)))
    }
}

/// This struct can receive decoded runs
pub trait RunSink {
    /// The number of pixels received so far
    fn pixels(&self) -> usize;
    /// Append `len` pixels of the same color
    fn push_run(&mut self, color: Color, len: usize);
    /// Drop all pixels from `len` onwards
    fn truncate(&mut self, len: usize);
}

/// A single scanline, packed as one bit per pixel (`1` is black), with the
/// first pixel in the most significant bit of the first byte.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct BitRow {
    bits: NaturalBitWriter,
}

impl fmt::Debug for BitRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitRow({}; ", self.width())?;
        for color in self.colors() {
            f.write_str(match color {
                Color::White => "_",
                Color::Black => "#",
            })?;
        }
        f.write_str(")")
    }
}

impl BitRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a white row with the given width
    pub fn with_width(width: usize) -> Self {
        let mut row = Self {
            bits: NaturalBitWriter::with_capacity(width),
        };
        row.push_run(Color::White, width);
        row
    }

    /// Copy the first `width` pixels of a packed bitmap row
    pub fn from_packed(bytes: &[u8], width: usize) -> Self {
        NaturalBitReader::with_len(bytes, width)
            .map(Color::from)
            .collect()
    }

    /// The number of pixels in the row
    pub fn width(&self) -> usize {
        self.bits.position()
    }

    /// Check whether the row has no pixels
    pub fn is_empty(&self) -> bool {
        self.width() == 0
    }

    /// Get the color of pixel `i`
    pub fn get(&self, i: usize) -> Option<Color> {
        self.bits.get(i).map(Color::from)
    }

    /// Append a pixel
    pub fn push(&mut self, color: Color) {
        self.bits.write(color.into());
    }

    /// Append `len` pixels of `color`
    pub fn push_run(&mut self, color: Color, len: usize) {
        self.bits.write_repeat(color.into(), len);
    }

    /// Shorten the row to `width` pixels
    pub fn truncate(&mut self, width: usize) {
        self.bits.truncate(width);
    }

    /// The packed pixels, padded with white to a whole number of bytes
    pub fn as_packed(&self) -> &[u8] {
        self.bits.as_bytes()
    }

    /// Turn the row into its packed pixels
    pub fn into_packed(self) -> Vec<u8> {
        self.bits.done()
    }

    /// Iterate over the pixels
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        NaturalBitReader::with_len(self.as_packed(), self.width()).map(Color::from)
    }

    /// Iterate over the runs of the row
    ///
    /// The first run is always white and may be empty.
    pub fn runs(&self) -> Runs<'_> {
        Runs {
            inner: NaturalBitReader::with_len(self.as_packed(), self.width()).peekable(),
            color: Color::White,
            started: false,
        }
    }
}

impl FromIterator<Color> for BitRow {
    fn from_iter<T: IntoIterator<Item = Color>>(iter: T) -> Self {
        let mut row = BitRow::new();
        for color in iter {
            row.push(color);
        }
        row
    }
}

/// Iterator over the runs in a [`BitRow`]
pub struct Runs<'a> {
    inner: std::iter::Peekable<NaturalBitReader<'a>>,
    color: Color,
    started: bool,
}

impl Iterator for Runs<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Self::Item> {
        if self.started {
            self.color.invert();
            self.inner.peek()?;
        } else {
            self.started = true;
            self.inner.peek()?;
        }
        let color = self.color;
        let mut len = 0;
        while self.inner.next_if(|b| Color::from(*b) == color).is_some() {
            len += 1;
        }
        Some(Run::new(color, len))
    }
}

impl ColorLine for BitRow {
    fn width(&self) -> usize {
        BitRow::width(self)
    }

    fn color_at(&self, i: usize) -> Color {
        self.get(i).unwrap_or_default()
    }

    fn colors(&self) -> Box<dyn Iterator<Item = Color> + '_> {
        Box::new(BitRow::colors(self))
    }
}

impl ColorLine for [Color] {
    fn width(&self) -> usize {
        self.len()
    }

    fn color_at(&self, i: usize) -> Color {
        self[i]
    }
}

impl ColorLine for Vec<Color> {
    fn width(&self) -> usize {
        self.len()
    }

    fn color_at(&self, i: usize) -> Color {
        self[i]
    }
}

impl RunSink for BitRow {
    fn pixels(&self) -> usize {
        self.width()
    }

    fn push_run(&mut self, color: Color, len: usize) {
        BitRow::push_run(self, color, len);
    }

    fn truncate(&mut self, len: usize) {
        BitRow::truncate(self, len);
    }
}

impl RunSink for Vec<Color> {
    fn pixels(&self) -> usize {
        self.len()
    }

    fn push_run(&mut self, color: Color, len: usize) {
        self.resize(self.len() + len, color);
    }

    fn truncate(&mut self, len: usize) {
        Vec::truncate(self, len);
    }
}

#[cfg(test)]
mod tests {
    use super::{BitRow, ColorLine, RunSink};
    use crate::{Color, Run};

    const B: Color = Color::Black;
    const W: Color = Color::White;

    #[test]
    fn test_from_packed_ignores_trailing_bits() {
        let row = BitRow::from_packed(&[0b10100000, 0xFF], 3);
        assert_eq!(row.width(), 3);
        assert_eq!(row.as_packed(), &[0b10100000]);
        assert_eq!(row.colors().collect::<Vec<_>>(), vec![B, W, B]);

        let row = BitRow::from_packed(&[0xFF, 0xFF], 10);
        assert_eq!(row.as_packed(), &[0xFF, 0b11000000]);
    }

    #[test]
    fn test_with_width() {
        let row = BitRow::with_width(12);
        assert_eq!(row.width(), 12);
        assert_eq!(row.as_packed(), &[0, 0]);
        assert_eq!(row.get(11), Some(W));
        assert_eq!(row.get(12), None);
    }

    #[test]
    fn test_runs() {
        let row: BitRow = vec![B, B, W, B, W, W, W].into_iter().collect();
        let runs: Vec<Run> = row.runs().collect();
        assert_eq!(
            runs,
            vec![
                Run::new(W, 0),
                Run::new(B, 2),
                Run::new(W, 1),
                Run::new(B, 1),
                Run::new(W, 3),
            ]
        );
        assert_eq!(BitRow::new().runs().count(), 0);
        let white: Vec<Run> = BitRow::with_width(5).runs().collect();
        assert_eq!(white, vec![Run::new(W, 5)]);
    }

    fn fill(sink: &mut dyn RunSink) {
        sink.push_run(W, 3);
        sink.push_run(B, 9);
        sink.truncate(5);
        sink.push_run(W, 1);
        assert_eq!(sink.pixels(), 6);
    }

    #[test]
    fn test_sinks_agree() {
        let mut row = BitRow::new();
        let mut colors: Vec<Color> = Vec::new();
        fill(&mut row);
        fill(&mut colors);
        assert_eq!(row.colors().collect::<Vec<_>>(), colors);
        assert_eq!(ColorLine::colors(&colors).collect::<Vec<_>>(), vec![W, W, W, B, B, W]);
    }
}
