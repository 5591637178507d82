use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;
use std::ops::Neg;

/// The color of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    pub fn opp(self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Stone::Black => "B",
            Stone::White => "W",
        }
    }
}

impl Neg for Stone {
    type Output = Self;

    fn neg(self) -> Self {
        self.opp()
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stone::Black => write!(f, "Black"),
            Stone::White => write!(f, "White"),
        }
    }
}

/// State of a single intersection.
///
/// The discriminants double as the codec symbols, so they must not change
/// without also changing every stored board string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    White = 1,
    Black = 2,
}

impl Cell {
    pub fn stone(self) -> Option<Stone> {
        match self {
            Cell::Empty => None,
            Cell::White => Some(Stone::White),
            Cell::Black => Some(Stone::Black),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn symbol(self) -> u8 {
        self as u8
    }

    pub fn from_symbol(b: u8) -> Option<Self> {
        match b {
            0 => Some(Cell::Empty),
            1 => Some(Cell::White),
            2 => Some(Cell::Black),
            _ => None,
        }
    }

    /// Layout character used by the text rendering: `B`, `W` or `+`.
    pub fn glyph(self) -> char {
        match self {
            Cell::Empty => '+',
            Cell::White => 'W',
            Cell::Black => 'B',
        }
    }
}

impl From<Stone> for Cell {
    fn from(stone: Stone) -> Self {
        match stone {
            Stone::Black => Cell::Black,
            Stone::White => Cell::White,
        }
    }
}

impl From<Option<Stone>> for Cell {
    fn from(stone: Option<Stone>) -> Self {
        stone.map_or(Cell::Empty, Cell::from)
    }
}
