//! Move legality and four-in-a-row detection over a [`Board`].
use once_cell::sync::Lazy;

use crate::board::{Board, Piece, COLS, ROWS};
use crate::error::GameError;
use crate::session::GameOutcome;
use crate::turn::{BattleMode, Turn};

/// Four `(row, col)` cells in a line.
pub type Window = [(usize, usize); 4];

/// Every window on the board: horizontal, vertical, rising diagonal, falling diagonal.
static WINDOWS: Lazy<Vec<Window>> = Lazy::new(generate_windows);

pub fn windows() -> &'static [Window] {
    &WINDOWS
}

pub fn is_column_playable(board: &Board, col: usize) -> bool {
    col < COLS && board.lowest_open_row(col).is_some()
}

/// Error-raising form of [`is_column_playable`]; returns the row a piece would land on.
pub fn ensure_playable(board: &Board, col: usize) -> Result<usize, GameError> {
    if col >= COLS {
        return Err(GameError::ColumnOutOfBounds { column: col });
    }
    board
        .lowest_open_row(col)
        .ok_or(GameError::ColumnFull { column: col })
}

/// Playable columns in ascending order.
pub fn playable_columns(board: &Board) -> Vec<usize> {
    (0..COLS)
        .filter(|&col| is_column_playable(board, col))
        .collect()
}

pub fn detect_win(board: &Board, piece: Piece) -> bool {
    WINDOWS
        .iter()
        .any(|window| window.iter().all(|&(r, c)| board.cell(r, c) == piece))
}

pub fn detect_draw(board: &Board) -> bool {
    board.is_full() && !detect_win(board, Piece::Player1) && !detect_win(board, Piece::Player2)
}

/// Outcome implied by the board alone, used when a game is resumed from storage.
pub fn outcome_of(board: &Board, mode: BattleMode) -> GameOutcome {
    if detect_win(board, Piece::Player1) {
        GameOutcome::Win(Turn::Player1)
    } else if detect_win(board, Piece::Player2) {
        GameOutcome::Win(mode.second_seat())
    } else if board.is_full() {
        GameOutcome::Draw
    } else {
        GameOutcome::InProgress
    }
}

fn generate_windows() -> Vec<Window> {
    let mut windows = Vec::new();
    // Horizontal
    for row in 0..ROWS {
        for col in 0..=COLS - 4 {
            windows.push([0, 1, 2, 3].map(|i| (row, col + i)));
        }
    }
    // Vertical
    for col in 0..COLS {
        for row in 0..=ROWS - 4 {
            windows.push([0, 1, 2, 3].map(|i| (row + i, col)));
        }
    }
    // Diagonal /
    for row in 0..=ROWS - 4 {
        for col in 0..=COLS - 4 {
            windows.push([0, 1, 2, 3].map(|i| (row + i, col + i)));
        }
    }
    // Diagonal \
    for row in 0..=ROWS - 4 {
        for col in 0..=COLS - 4 {
            windows.push([0, 1, 2, 3].map(|i| (row + 3 - i, col + i)));
        }
    }
    windows
}
