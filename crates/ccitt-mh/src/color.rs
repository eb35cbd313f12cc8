//! Common structs and enums

/// Black or White Color
///
/// In a packed bitmap, `1` is [`Color::Black`] and `0` is [`Color::White`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// No-Ink
    #[default]
    White,
    /// Ink
    Black,
}

impl From<bool> for Color {
    fn from(b: bool) -> Color {
        if b {
            Color::Black
        } else {
            Color::White
        }
    }
}

impl From<Color> for bool {
    fn from(color: Color) -> bool {
        color == Color::Black
    }
}

impl Color {
    /// Invert a color
    pub fn invert(&mut self) {
        match self {
            Color::White => {
                *self = Color::Black;
            }
            Color::Black => {
                *self = Color::White;
            }
        }
    }

    /// The other color
    pub fn inverted(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// A sequence of pixels with the same color
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Run {
    /// The color of the pixels
    pub color: Color,
    /// The number of pixels
    pub len: usize,
}

impl Run {
    /// Create a new run
    pub fn new(color: Color, len: usize) -> Self {
        Self { color, len }
    }
}
