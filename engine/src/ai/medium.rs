use rand::rngs::StdRng;
use rand::SeedableRng;

use super::heuristic::{score_position, ScoreMode};
use super::{random_default, Strategy};
use crate::board::{Board, Piece};
use crate::error::GameError;
use crate::rules;

/// Starting best score; every medium-mode score is above it.
const SCORE_FLOOR: i32 = -8000;

/// One-ply greedy search on the computer's own patterns.
pub struct Medium {
    rng: StdRng,
    piece: Piece,
}

impl Medium {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Medium {
            rng,
            piece: Piece::Player2,
        }
    }
}

impl Default for Medium {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Medium {
    fn name(&self) -> &str {
        "medium"
    }

    /// Columns are scanned in ascending order; only a strictly higher score
    /// replaces the running best, so the first maximal column wins.
    fn choose_column(&mut self, board: &Board) -> Result<usize, GameError> {
        let columns = rules::playable_columns(board);
        let mut best_column = random_default(&columns, &mut self.rng)?;
        let mut best_score = SCORE_FLOOR;

        for col in columns {
            let mut child = board.clone();
            child.drop_piece(col, self.piece)?;
            let score = score_position(&child, self.piece, ScoreMode::Medium);
            if score > best_score {
                best_score = score;
                best_column = col;
            }
        }
        Ok(best_column)
    }
}
