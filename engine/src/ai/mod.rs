//! Computer opponents of increasing strength behind one [`Strategy`] interface.

mod easy;
mod heuristic;
mod medium;
mod minimax;

pub use easy::Easy;
pub use heuristic::{score_position, ScoreMode};
pub use medium::Medium;
pub use minimax::{Minimax, LOSS_SCORE, WIN_SCORE};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::GameError;
use crate::turn::Difficulty;

pub const DEFAULT_DEPTH: u8 = 3;
pub const MAX_DEPTH: u8 = 8;

/// A move-selection policy for the second seat.
pub trait Strategy: Send {
    fn name(&self) -> &str;

    /// Pick a playable column. Fails with [`GameError::NoValidMove`] on a full board.
    fn choose_column(&mut self, board: &Board) -> Result<usize, GameError>;
}

/// Tuning for the hard tier.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub depth: u8,
    /// Alpha-beta cutoffs. Changes how many nodes are visited, never the chosen column.
    pub pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            pruning: false,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if !(1..=MAX_DEPTH).contains(&self.depth) {
            return Err(GameError::DepthOutOfRange(self.depth));
        }
        Ok(())
    }
}

pub fn strategy_for(
    difficulty: Difficulty,
    search: SearchConfig,
    rng: StdRng,
) -> Result<Box<dyn Strategy>, GameError> {
    let strategy: Box<dyn Strategy> = match difficulty {
        Difficulty::Easy => Box::new(Easy::with_rng(rng)),
        Difficulty::Medium => Box::new(Medium::with_rng(rng)),
        Difficulty::Hard => Box::new(Minimax::with_rng(search, rng)?),
    };
    Ok(strategy)
}

/// One-shot move for the second seat, seeded from the OS.
pub fn select_ai_move(
    board: &Board,
    difficulty: Difficulty,
    search: SearchConfig,
) -> Result<usize, GameError> {
    strategy_for(difficulty, search, StdRng::from_os_rng())?.choose_column(board)
}

/// Uniform pick used as the starting default before any column is scored.
fn random_default(columns: &[usize], rng: &mut StdRng) -> Result<usize, GameError> {
    if columns.is_empty() {
        return Err(GameError::NoValidMove);
    }
    Ok(columns[rng.random_range(0..columns.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Piece, COLS, ROWS};

    fn full_board() -> Board {
        let mut board = Board::create_empty();
        for col in 0..COLS {
            for row in 0..ROWS {
                let piece = if (row / 2 + col) % 2 == 0 {
                    Piece::Player1
                } else {
                    Piece::Player2
                };
                board.place(row, col, piece);
            }
        }
        board
    }

    #[test]
    fn every_tier_rejects_a_full_board() {
        let board = full_board();
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let mut strategy =
                strategy_for(difficulty, SearchConfig::default(), StdRng::seed_from_u64(1)).unwrap();
            assert!(
                matches!(strategy.choose_column(&board), Err(GameError::NoValidMove)),
                "{}",
                strategy.name()
            );
        }
    }

    #[test]
    fn depth_is_validated() {
        let search = SearchConfig {
            depth: 0,
            pruning: false,
        };
        assert!(matches!(search.validate(), Err(GameError::DepthOutOfRange(0))));
        let res = strategy_for(Difficulty::Hard, search, StdRng::seed_from_u64(1));
        assert!(matches!(res, Err(GameError::DepthOutOfRange(0))));
        // Only the hard tier searches, so other tiers ignore the depth.
        assert!(strategy_for(Difficulty::Easy, search, StdRng::seed_from_u64(1)).is_ok());
    }

    #[test]
    fn dispatch_names() {
        let names: Vec<String> = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
            .into_iter()
            .map(|d| {
                strategy_for(d, SearchConfig::default(), StdRng::seed_from_u64(7))
                    .unwrap()
                    .name()
                    .to_string()
            })
            .collect();
        assert_eq!(names, ["easy", "medium", "hard"]);
    }

    #[test]
    fn select_ai_move_returns_a_playable_column() {
        let board = Board::create_empty();
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let col = select_ai_move(&board, difficulty, SearchConfig::default()).unwrap();
            assert!(col < COLS);
        }
    }
}
