//! Depth-bounded minimax for the hard tier.
//!
//! The computer maximizes, the human minimizes. Every simulated move is played
//! on a fresh clone of the parent board, so sibling branches never share state.
//! Alpha and beta are threaded through every call; cutoffs only happen when
//! [`SearchConfig::pruning`] is set, and either way the same column is chosen
//! because a pruned child can never strictly beat the running best.
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::heuristic::{score_position, ScoreMode};
use super::{random_default, SearchConfig, Strategy};
use crate::board::{Board, Piece};
use crate::error::GameError;
use crate::rules;

pub const WIN_SCORE: i32 = 10_000_000;
pub const LOSS_SCORE: i32 = -WIN_SCORE;

pub struct Minimax {
    rng: StdRng,
    config: SearchConfig,
    computer: Piece,
    player: Piece,
}

impl Minimax {
    pub fn new(config: SearchConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    pub fn with_rng(config: SearchConfig, rng: StdRng) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Minimax {
            rng,
            config,
            computer: Piece::Player2,
            player: Piece::Player1,
        })
    }

    fn is_terminal(&self, board: &Board) -> bool {
        rules::detect_win(board, self.player)
            || rules::detect_win(board, self.computer)
            || rules::playable_columns(board).is_empty()
    }

    /// Returns the best column (none at leaves) and its value for the computer.
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (Option<usize>, i32) {
        if self.is_terminal(board) {
            let value = if rules::detect_win(board, self.computer) {
                WIN_SCORE
            } else if rules::detect_win(board, self.player) {
                LOSS_SCORE
            } else {
                0
            };
            return (None, value);
        }
        if depth == 0 {
            return (None, score_position(board, self.computer, ScoreMode::Hard));
        }

        let columns = rules::playable_columns(board);
        // Not terminal, so at least one column is open.
        let Ok(mut column) = random_default(&columns, &mut self.rng) else {
            return (None, 0);
        };
        let (piece, mut value) = if maximizing {
            (self.computer, i32::MIN)
        } else {
            (self.player, i32::MAX)
        };

        for col in columns {
            let mut child = board.clone();
            let Some(row) = child.lowest_open_row(col) else {
                continue;
            };
            child.place(row, col, piece);
            let (_, score) = self.minimax(&child, depth - 1, alpha, beta, !maximizing);

            if maximizing {
                if score > value {
                    value = score;
                    column = col;
                }
                alpha = alpha.max(value);
            } else {
                if score < value {
                    value = score;
                    column = col;
                }
                beta = beta.min(value);
            }
            if self.config.pruning && alpha >= beta {
                break;
            }
        }
        (Some(column), value)
    }
}

impl Strategy for Minimax {
    fn name(&self) -> &str {
        "hard"
    }

    fn choose_column(&mut self, board: &Board) -> Result<usize, GameError> {
        if rules::playable_columns(board).is_empty() {
            return Err(GameError::NoValidMove);
        }
        if rules::detect_win(board, self.player) || rules::detect_win(board, self.computer) {
            return Err(GameError::GameOver);
        }
        let depth = self.config.depth;
        let (column, _) = self.minimax(board, depth, i32::MIN, i32::MAX, true);
        column.ok_or(GameError::NoValidMove)
    }
}
