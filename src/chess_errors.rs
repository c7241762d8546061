//! Errors used throughout the board core.
//!
//! `ChessError` covers the recoverable failure modes: malformed text input
//! (FEN strings, squares, move text), an exhausted magic search, and a failed
//! invariant audit. Caller misuse on the make/unmake hot path is not reported
//! here; it panics, because the board would already be desynchronized.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// A required FEN field was absent.
    #[error("missing {0} in FEN")]
    MissingFenField(&'static str),

    /// A FEN field was present but could not be interpreted.
    #[error("invalid {field} in FEN: {value:?}")]
    InvalidFenField { field: &'static str, value: String },

    /// An unexpected character in the FEN piece placement.
    #[error("invalid FEN token {0:?}")]
    InvalidFenToken(char),

    /// FEN had more than six whitespace separated fields.
    #[error("FEN has extra trailing fields")]
    TrailingFenFields,

    /// A square name outside `a1..=h8`.
    #[error("invalid algebraic square {0:?}")]
    InvalidAlgebraicSquare(String),

    /// Long algebraic move text that does not parse.
    #[error("invalid long algebraic move {0:?}")]
    InvalidLongAlgebraic(String),

    /// Well-formed move text that matches no pseudo-legal move.
    #[error("no pseudo-legal move matches {0:?}")]
    NoSuchMove(String),

    /// The magic finder ran out of attempts for a square.
    #[error("no collision-free magic for square {square} after {attempts} attempts")]
    MagicSearchExhausted { square: u8, attempts: u64 },

    /// A board invariant does not hold.
    #[error("board invariant violated: {0}")]
    InvariantViolation(String),
}

pub type ChessResult<T> = Result<T, ChessError>;
