//! Error types for the conquest engine.

use thiserror::Error;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Top-level error type for all engine errors.
///
/// Commands issued in the wrong phase are not errors: they are ignored
/// and reported through their return value instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// More players were requested than the grid has cells.
    #[error("Cannot seat {players} players on a grid of {cells} cells")]
    Capacity {
        /// Requested player count.
        players: usize,
        /// Total cells on the grid.
        cells: usize,
    },

    /// Region growing exceeded its round cap.
    #[error("Map generation gave up after {rounds} rounds with {unowned} cells unowned")]
    MapGeneration {
        /// Rounds performed before giving up.
        rounds: usize,
        /// Cells still unowned.
        unowned: usize,
    },

    /// Settings outside the supported range.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// A question rejected by the bank.
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    /// Snapshot encoding or decoding failed.
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Snapshot(err.to_string())
    }
}

impl From<bincode::Error> for GameError {
    fn from(err: bincode::Error) -> Self {
        GameError::Snapshot(err.to_string())
    }
}
