//! Engine errors.
//!
//! Every error is recoverable and local: operations reject before they
//! mutate anything, so a rejected call leaves grid and session untouched.

use thiserror::Error;

use super::position::Position;
use super::state::{Counter, GameStatus};

/// Errors emitted by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Row or column outside the grid.
    #[error("position ({row}, {col}) is outside the grid")]
    InvalidPosition { row: usize, col: usize },

    /// A counter that an action spends is already zero.
    #[error("no {0} remaining")]
    InsufficientCharge(Counter),

    /// The clicked region is smaller than the minimum match.
    #[error("match of {size} is below the minimum of {min}")]
    NoLegalMatch { size: usize, min: usize },

    /// A turn is already in flight.
    #[error("a turn is already being processed")]
    AlreadyProcessing,

    /// The session has ended.
    #[error("game is over ({0:?})")]
    GameFinished(GameStatus),

    /// The operation needs a tile but the cell is empty.
    #[error("cell {0} is empty")]
    EmptyCell(Position),

    /// The pending turn is not the one currently in flight.
    #[error("pending turn does not belong to the turn in flight")]
    StaleTurn,

    /// Configuration rejected at construction.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// Board notation could not be parsed.
    #[error("invalid board layout: {0}")]
    InvalidLayout(String),
}

/// Result alias used throughout the crate.
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Build an `InvalidPosition` for a position.
    #[must_use]
    pub const fn out_of_bounds(pos: Position) -> Self {
        EngineError::InvalidPosition { row: pos.row, col: pos.col }
    }
}
