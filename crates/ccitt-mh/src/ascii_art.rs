//! # Draw scanlines as ascii-art
use std::fmt;

use crate::{BitRow, Color};

/// Characters for the top or bottom border
pub struct BorderDrawing {
    /// The left corner
    pub left: char,
    /// The edge
    pub middle: char,
    /// The right corner
    pub right: char,
}

/// Characters for drawing a bitmap in a box
pub struct BoxDrawing {
    /// The top border
    pub top: BorderDrawing,
    /// The left edge
    pub left: char,
    /// The right edge
    pub right: char,
    /// The bottom border
    pub bottom: BorderDrawing,
    /// A black pixel
    pub ink: char,
    /// A white pixel
    pub no_ink: char,
    /// A pixel past the end of a short row
    pub missing: char,
}

const ASCII_BORDER: BorderDrawing = BorderDrawing {
    left: '+',
    middle: '-',
    right: '+',
};

/// Plain ASCII
pub const ASCII: &BoxDrawing = &BoxDrawing {
    top: ASCII_BORDER,
    left: '|',
    right: '|',
    bottom: ASCII_BORDER,
    ink: '#',
    no_ink: ' ',
    missing: '.',
};

/// Unicode box drawing and block characters
pub const UNICODE: &BoxDrawing = &BoxDrawing {
    top: BorderDrawing {
        left: '╔',
        middle: '═',
        right: '╗',
    },
    left: '║',
    right: '║',
    bottom: BorderDrawing {
        left: '╚',
        middle: '═',
        right: '╝',
    },
    ink: '█',
    no_ink: ' ',
    missing: '·',
};

fn border<W: fmt::Write>(w: &mut W, b: &BorderDrawing, width: usize) -> fmt::Result {
    w.write_char(b.left)?;
    for _ in 0..width {
        w.write_char(b.middle)?;
    }
    w.write_char(b.right)?;
    w.write_char('\n')
}

/// Draw the rows using characters
///
/// Rows shorter than `width` are filled with `b.missing`, longer rows are cut.
pub fn ascii_art<W: fmt::Write>(
    w: &mut W,
    b: &BoxDrawing,
    rows: &[BitRow],
    width: usize,
    invert: bool,
) -> fmt::Result {
    border(w, &b.top, width)?;
    for row in rows {
        w.write_char(b.left)?;
        let mut colors = row.colors();
        for _ in 0..width {
            let c = match colors.next() {
                Some(color) if (color == Color::Black) ^ invert => b.ink,
                Some(_) => b.no_ink,
                None => b.missing,
            };
            w.write_char(c)?;
        }
        w.write_char(b.right)?;
        w.write_char('\n')?;
    }
    border(w, &b.bottom, width)
}
