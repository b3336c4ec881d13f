use thiserror::Error;

use crate::board::COLS;

/// Boxed failure raised by a [`SnapshotStore`](crate::SnapshotStore) implementation.
pub type StoreFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("column {column} is full")]
    ColumnFull { column: usize },
    #[error("column {column} is out of bounds (0-{max})", max = COLS - 1)]
    ColumnOutOfBounds { column: usize },
    #[error("no legal moves remain")]
    NoValidMove,
    #[error("the game is already over")]
    GameOver,
    #[error("it is not the computer's turn")]
    NotComputerTurn,
    #[error("it is the computer's turn")]
    ComputerToMove,
    #[error("depth {0} is out of range (1-8)")]
    DepthOutOfRange(u8),
    #[error("player vs computer requires a difficulty")]
    MissingDifficulty,
    #[error("failed to persist game state: {0}")]
    Persistence(#[source] StoreFailure),
}

impl GameError {
    /// True for errors caused by the move itself rather than by sequencing or storage.
    pub fn is_rejected_move(&self) -> bool {
        matches!(
            self,
            GameError::ColumnFull { .. } | GameError::ColumnOutOfBounds { .. }
        )
    }
}

/// Raised when a serialized cell holds a value other than 0, 1 or 2.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PieceError {
    #[error("unknown piece value {0}")]
    Unknown(u8),
}
