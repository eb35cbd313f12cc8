//! # Portable Bitmap (PBM)
//!
//! Reads `P1` (plain) and `P4` (raw) bitmaps, writes `P4`. In both, `1` is
//! black, which is also the convention of [`BitRow`].
use std::io;

use ccitt_mh::{BitRow, Color};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, multispace1, not_line_ending},
    combinator::{map_res, value},
    error::ErrorKind,
    multi::many1,
    sequence::{pair, preceded},
    Finish, IResult,
};
use thiserror::Error;

/// The variant of the file
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    /// `P1`, ASCII digits
    Plain,
    /// `P4`, packed bits
    Raw,
}

/// An error when reading a PBM file
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PbmError {
    /// The header could not be parsed
    #[error("Invalid PBM header ({0:?})")]
    Header(ErrorKind),
    /// There are fewer pixels than the header announces
    #[error("Expected {expected} rows, found {actual}")]
    Truncated {
        /// The number of rows in the header
        expected: usize,
        /// The number of complete rows found
        actual: usize,
    },
    /// A plain PBM contains something other than `0` and `1`
    #[error("Invalid pixel {0:?}")]
    InvalidPixel(char),
}

/// A decoded bitmap
#[derive(Debug)]
pub struct Pbm {
    /// The width in pixels
    pub width: usize,
    /// The scanlines
    pub rows: Vec<BitRow>,
}

fn separator(input: &[u8]) -> IResult<&[u8], ()> {
    value(
        (),
        many1(alt((
            value((), multispace1),
            value((), pair(char('#'), not_line_ending)),
        ))),
    )(input)
}

fn number(input: &[u8]) -> IResult<&[u8], usize> {
    map_res(map_res(digit1, std::str::from_utf8), str::parse::<usize>)(input)
}

fn header(input: &[u8]) -> IResult<&[u8], (Format, usize, usize)> {
    let (input, format) = alt((
        value(Format::Plain, tag("P1")),
        value(Format::Raw, tag("P4")),
    ))(input)?;
    let (input, width) = preceded(separator, number)(input)?;
    let (input, height) = preceded(separator, number)(input)?;
    Ok((input, (format, width, height)))
}

/// Parse a PBM file
pub fn parse_pbm(input: &[u8]) -> Result<Pbm, PbmError> {
    let (rest, (format, width, height)) = header(input)
        .finish()
        .map_err(|e| PbmError::Header(e.code))?;
    let rows = match format {
        Format::Raw => {
            let data = match rest.split_first() {
                Some((b, data)) if b.is_ascii_whitespace() => data,
                _ => return Err(PbmError::Header(ErrorKind::MultiSpace)),
            };
            let stride = (width + 7) / 8;
            let rows: Vec<BitRow> = data
                .chunks_exact(stride.max(1))
                .take(height)
                .map(|line| BitRow::from_packed(line, width))
                .collect();
            if rows.len() < height && width > 0 {
                return Err(PbmError::Truncated {
                    expected: height,
                    actual: rows.len(),
                });
            }
            rows
        }
        Format::Plain => {
            let mut rows = Vec::with_capacity(height);
            let mut row = BitRow::new();
            for &b in rest {
                if rows.len() == height {
                    break;
                }
                match b {
                    b'0' => row.push(Color::White),
                    b'1' => row.push(Color::Black),
                    b if b.is_ascii_whitespace() => continue,
                    b => return Err(PbmError::InvalidPixel(char::from(b))),
                }
                if row.width() == width {
                    rows.push(std::mem::take(&mut row));
                }
            }
            if rows.len() < height && width > 0 {
                return Err(PbmError::Truncated {
                    expected: height,
                    actual: rows.len(),
                });
            }
            rows
        }
    };
    let rows = if width == 0 {
        vec![BitRow::new(); height]
    } else {
        rows
    };
    Ok(Pbm { width, rows })
}

/// Write the rows as a raw PBM image, padding or cutting them to `width`
pub fn write_pbm<W: io::Write>(writer: &mut W, rows: &[BitRow], width: usize) -> io::Result<()> {
    writeln!(writer, "P4")?;
    writeln!(writer, "{} {}", width, rows.len())?;
    for row in rows {
        if row.width() == width {
            writer.write_all(row.as_packed())?;
        } else {
            let mut fitted = BitRow::from_packed(row.as_packed(), width.min(row.width()));
            fitted.push_run(Color::White, width - fitted.width());
            writer.write_all(fitted.as_packed())?;
        }
    }
    Ok(())
}
