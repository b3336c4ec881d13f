//! Connect 4 engine with three computer tiers.
//! The board is a plain 6x7 grid with row 0 at the bottom. A [`GameSession`]
//! drives one game: it applies moves for the seat to act, hands the second
//! seat to a [`Strategy`] in player-vs-computer games, and saves a
//! [`Snapshot`] through a caller-supplied [`SnapshotStore`] after every move.
//! Nothing in this crate logs or performs I/O on its own.
pub mod ai;
pub mod board;
pub mod error;
pub mod rules;
pub mod session;
pub mod snapshot;
pub mod turn;

pub use ai::{select_ai_move, strategy_for, Easy, Medium, Minimax, SearchConfig, Strategy};
pub use board::{Board, Piece, COLS, ROWS};
pub use error::{GameError, PieceError, StoreFailure};
pub use session::{apply_move, GameOutcome, GameSession, MoveOutcome};
pub use snapshot::{MemoryStore, Snapshot, SnapshotStore};
pub use turn::{next_turn, BattleMode, Difficulty, Turn};
