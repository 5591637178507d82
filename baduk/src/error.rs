use thiserror::Error;

use crate::board::{MAX_SIZE, MIN_SIZE};

/// Failures of board construction, access and stone placement.
///
/// None of these leave the board modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GoError {
    #[error("board size {0} is outside {min}..={max}", min = MIN_SIZE, max = MAX_SIZE)]
    InvalidSize(u8),
    #[error("({x}, {y}) is not on the board")]
    OutOfRange { x: u8, y: u8 },
    #[error("({x}, {y}) is occupied")]
    Occupied { x: u8, y: u8 },
    #[error("suicide at ({x}, {y})")]
    Suicide { x: u8, y: u8 },
}

/// Failures while reconstructing a board from its encoded string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("encoded board has no size byte")]
    MissingSize,
    #[error("encoded board size {0} is outside {min}..={max}", min = MIN_SIZE, max = MAX_SIZE)]
    InvalidSize(u8),
    #[error("corrupt deflate stream: {0}")]
    CorruptStream(String),
    #[error("stream ended after {found} of {expected} cells")]
    TruncatedStream { expected: usize, found: usize },
    #[error("unknown cell symbol {symbol:#04x} at cell {index}")]
    UnknownSymbol { symbol: u8, index: usize },
}
