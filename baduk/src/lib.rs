//! Rules engine for Go (Baduk): stone placement with captures and the
//! suicide rule, Chinese-style area scoring, and a compact URL-safe board
//! string.

pub mod board;
pub mod codec;
pub mod error;
pub mod score;
pub mod stone;

/// `(x, y)`: column then row, both zero-based from the top-left corner.
pub type Point = (u8, u8);

pub use board::{Board, CaptureReport, MAX_SIZE, MIN_SIZE};
pub use codec::{decode, encode};
pub use error::{DecodeError, GoError};
pub use score::Score;
pub use stone::{Cell, Stone};
