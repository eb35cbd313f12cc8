//! # Bit Reader and Writer
//!
//! The uncompressed bitmap and the compressed code stream store bits in
//! opposite orders within a byte (see the TIFF `FillOrder` tag). The order
//! is part of the type, so a [`NaturalBitReader`] can't be handed to code
//! expecting a [`TransmissionBitReader`].
use std::{fmt, iter::FusedIterator, marker::PhantomData};

use crate::table::Code;

mod private {
    pub trait Sealed {}
}

/// Order of writing/reading bits to/from a byte
pub trait BitOrder: private::Sealed + Copy + Default + fmt::Debug {
    /// The mask of the bit at `index` (`0..8`) within a byte
    fn mask(index: usize) -> u8;
}

/// A byte is iterated from most- to least-significant bit
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Msb0;

/// A byte is iterated from least- to most-significant bit
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Lsb0;

impl private::Sealed for Msb0 {}
impl private::Sealed for Lsb0 {}

impl BitOrder for Msb0 {
    #[inline]
    fn mask(index: usize) -> u8 {
        0x80 >> index
    }
}

impl BitOrder for Lsb0 {
    #[inline]
    fn mask(index: usize) -> u8 {
        1 << index
    }
}

/// Reads pixels from a packed bitmap
pub type NaturalBitReader<'a> = BitReader<'a, Msb0>;
/// Writes pixels to a packed bitmap
pub type NaturalBitWriter = BitWriter<Msb0>;
/// Reads bits from a compressed code stream
pub type TransmissionBitReader<'a> = BitReader<'a, Lsb0>;
/// Writes bits to a compressed code stream
pub type TransmissionBitWriter = BitWriter<Lsb0>;

/// Read bits from a slice
#[derive(Debug, Clone)]
pub struct BitReader<'a, O: BitOrder> {
    bytes: &'a [u8],
    pos: usize,
    end: usize,
    order: PhantomData<O>,
}

impl<'a, O: BitOrder> BitReader<'a, O> {
    /// Creates a new instance
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_len(bytes, bytes.len() * 8)
    }

    /// Creates a new instance that stops after `len` bits
    pub fn with_len(bytes: &'a [u8], len: usize) -> Self {
        Self {
            bytes,
            pos: 0,
            end: len.min(bytes.len() * 8),
            order: PhantomData,
        }
    }

    /// The number of bits read so far
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The number of bits left
    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    /// Read `count <= 32` bits, the first one becoming the most significant
    pub fn read_bits(&mut self, count: u8) -> Option<u32> {
        assert!(count <= 32);
        if self.remaining() < count as usize {
            return None;
        }
        let mut value = 0;
        for _ in 0..count {
            value = (value << 1) | u32::from(self.next()?);
        }
        Some(value)
    }
}

impl<O: BitOrder> Iterator for BitReader<'_, O> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.end {
            return None;
        }
        let byte = self.bytes[self.pos / 8];
        let bit = byte & O::mask(self.pos % 8) != 0;
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.remaining();
        (size, Some(size))
    }
}

impl<O: BitOrder> ExactSizeIterator for BitReader<'_, O> {}
impl<O: BitOrder> FusedIterator for BitReader<'_, O> {}

/// A bitwise writer
///
/// Bits past the current position in the last byte are always zero, so the
/// buffer is valid (zero padded) at any point.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct BitWriter<O: BitOrder> {
    buffer: Vec<u8>,
    pos: usize,
    order: PhantomData<O>,
}

impl<O: BitOrder> fmt::Debug for BitWriter<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitWriter")
            .field("order", &O::default())
            .field("pos", &self.pos)
            .field("buffer", &self.buffer)
            .finish()
    }
}

impl<O: BitOrder> BitWriter<O> {
    /// Creates a new instance
    pub fn new() -> Self {
        Self {
            buffer: vec![],
            pos: 0,
            order: PhantomData,
        }
    }

    /// Creates a new instance with the given capacity of bits
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity / 8 + (capacity % 8).min(1)),
            pos: 0,
            order: PhantomData,
        }
    }

    /// The number of bits written so far
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Write a single bit
    pub fn write(&mut self, b: bool) {
        let index = self.pos % 8;
        if index == 0 {
            self.buffer.push(0);
        }
        if b {
            if let Some(last) = self.buffer.last_mut() {
                *last |= O::mask(index);
            }
        }
        self.pos += 1;
    }

    /// Write the lowest {count} bits of {val}, most significant first
    pub fn write_bits(&mut self, val: u32, count: u8) {
        assert!(count <= 32);
        for i in (0..count).rev() {
            self.write((val >> i) & 1 == 1);
        }
    }

    /// Write a code from the tables
    pub fn write_code(&mut self, code: Code) {
        self.write_bits(u32::from(code.bits), code.len);
    }

    /// Write {count} copies of the same bit
    pub fn write_repeat(&mut self, b: bool, mut count: usize) {
        while count > 0 && self.pos % 8 != 0 {
            self.write(b);
            count -= 1;
        }
        // at this point, the writer is starting the next byte
        let fill = if b { 0xFF } else { 0x00 };
        let bytes = count / 8;
        self.buffer.resize(self.buffer.len() + bytes, fill);
        self.pos += bytes * 8;
        for _ in 0..count % 8 {
            self.write(b);
        }
    }

    /// Get the bit at `index`, if it was written
    pub fn get(&self, index: usize) -> Option<bool> {
        if index < self.pos {
            Some(self.buffer[index / 8] & O::mask(index % 8) != 0)
        } else {
            None
        }
    }

    /// Drop all bits from `len` onwards
    pub fn truncate(&mut self, len: usize) {
        if len >= self.pos {
            return;
        }
        self.buffer.truncate((len + 7) / 8);
        let index = len % 8;
        if index > 0 {
            if let Some(last) = self.buffer.last_mut() {
                for i in index..8 {
                    *last &= !O::mask(i);
                }
            }
        }
        self.pos = len;
    }

    /// The bytes written so far, the last one zero padded
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Pad the output with zero bits up to the next byte boundary
    pub fn flush(&mut self) {
        self.pos = self.buffer.len() * 8;
    }

    /// Flush and return the buffer
    pub fn done(mut self) -> Vec<u8> {
        self.flush();
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::{
        BitOrder, Lsb0, Msb0, NaturalBitReader, NaturalBitWriter, TransmissionBitReader,
        TransmissionBitWriter,
    };

    #[test]
    fn test_masks() {
        assert_eq!(Msb0::mask(0), 0b10000000);
        assert_eq!(Msb0::mask(7), 0b00000001);
        assert_eq!(Lsb0::mask(0), 0b00000001);
        assert_eq!(Lsb0::mask(7), 0b10000000);
    }

    #[test]
    fn test_bit_writer_write_bits() {
        let mut bw = NaturalBitWriter::new();
        bw.write_bits(0b000011110000, 12);
        bw.write_bits(0b1010, 4);

        assert_eq!(bw.as_bytes(), &[0b00001111, 0b00001010]);

        bw.write_bits(0b111111, 6);
        assert_eq!(bw.position(), 22);
        assert_eq!(bw.as_bytes(), &[0b00001111, 0b00001010, 0b11111100]);

        bw.write_bits(0b000000, 6);
        assert_eq!(bw.position(), 28);
        assert_eq!(bw.as_bytes(), &[0b00001111, 0b00001010, 0b11111100, 0]);

        bw.write_bits(0b1111, 4);
        assert_eq!(
            bw.as_bytes(),
            &[0b00001111, 0b00001010, 0b11111100, 0b00001111]
        );
        assert_eq!(bw.position(), 32);
    }

    #[test]
    fn test_bit_writer_write() {
        let mut bw = NaturalBitWriter::new();
        for &b in &[true, false, false, true, true, false, true, false] {
            bw.write(b);
        }
        assert_eq!(bw.as_bytes(), &[0b10011010]);

        for &b in &[true, true, true, true, false, false, false, false] {
            bw.write(b);
        }
        assert_eq!(bw.as_bytes(), &[0b10011010, 0b11110000]);

        bw.write(true);
        bw.write(false);
        bw.write(true);
        bw.flush();
        assert_eq!(bw.position(), 24);
        assert_eq!(bw.as_bytes(), &[0b10011010, 0b11110000, 0b10100000]);

        bw.flush();
        assert_eq!(bw.done(), vec![0b10011010, 0b11110000, 0b10100000]);
    }

    #[test]
    fn test_transmission_writer_order() {
        let mut bw = TransmissionBitWriter::new();
        // white run of 2 (`0111`) then black run of 2 (`11`)
        bw.write_bits(0b0111, 4);
        bw.write_bits(0b11, 2);
        assert_eq!(bw.done(), vec![0b00111110]);
    }

    #[test]
    fn test_write_repeat() {
        let mut bw = NaturalBitWriter::new();
        bw.write_repeat(true, 3);
        bw.write_repeat(false, 2);
        bw.write_repeat(true, 20);
        assert_eq!(bw.position(), 25);
        assert_eq!(bw.as_bytes(), &[0b11100111, 0xFF, 0xFF, 0b10000000]);

        let mut bw = TransmissionBitWriter::new();
        bw.write_repeat(true, 3);
        bw.write_repeat(false, 0);
        assert_eq!(bw.done(), vec![0b00000111]);
    }

    #[test]
    fn test_truncate() {
        let mut bw = NaturalBitWriter::new();
        bw.write_repeat(true, 20);
        bw.truncate(11);
        assert_eq!(bw.position(), 11);
        assert_eq!(bw.as_bytes(), &[0xFF, 0b11100000]);
        assert_eq!(bw.get(10), Some(true));
        assert_eq!(bw.get(11), None);

        bw.write(false);
        bw.write(true);
        assert_eq!(bw.as_bytes(), &[0xFF, 0b11101000]);

        bw.truncate(8);
        assert_eq!(bw.as_bytes(), &[0xFF]);
        bw.truncate(0);
        assert!(bw.as_bytes().is_empty());
    }

    #[test]
    fn test_reader() {
        let bytes = [0b10110000, 0b00000001];
        let mut natural = NaturalBitReader::new(&bytes);
        assert_eq!(natural.len(), 16);
        assert_eq!(natural.read_bits(4), Some(0b1011));
        assert_eq!(natural.position(), 4);

        let mut transmission = TransmissionBitReader::new(&bytes);
        assert_eq!(transmission.read_bits(5), Some(0b00001));
        assert_eq!(transmission.read_bits(3), Some(0b101));
        assert_eq!(transmission.next(), Some(true));
        assert_eq!(transmission.remaining(), 7);
        assert_eq!(transmission.read_bits(8), None);
    }

    #[test]
    fn test_reader_with_len() {
        let bytes = [0xFF];
        let reader = NaturalBitReader::with_len(&bytes, 5);
        assert_eq!(reader.count(), 5);
        let reader = NaturalBitReader::with_len(&bytes, 50);
        assert_eq!(reader.count(), 8);
    }
}
