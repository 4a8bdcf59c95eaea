//! Error types for the minesweeper player

use thiserror::Error;

use crate::board::Point;

/// Caller-side contract violations. Internal invariant breaks panic instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("cell {point:?} is outside a {height}x{width} board")]
    OutOfBounds {
        point: Point,
        height: usize,
        width: usize,
    },

    #[error("hint {count} at {point:?} is out of range (cell has {neighbors} neighbors)")]
    CountOutOfRange {
        point: Point,
        count: usize,
        neighbors: usize,
    },

    #[error("hint {count} at {point:?} contradicts what is already known about its neighbors")]
    InconsistentHint { point: Point, count: usize },

    #[error("cell {point:?} has already been played")]
    AlreadyPlayed { point: Point },

    #[error("cell {point:?} cannot be marked a {requested}: it is already known to be {known}")]
    ConflictingMark {
        point: Point,
        requested: &'static str,
        known: &'static str,
    },

    #[error("cannot place {mines} mines on a board with {area} cells")]
    TooManyMines { mines: usize, area: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
