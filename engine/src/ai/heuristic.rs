use crate::board::{Board, Piece, COLS, ROWS};
use crate::rules;

const CENTER_WEIGHT: i32 = 3;
const FOUR: i32 = 10_000;
const OPEN_THREE: i32 = 5;
const OPEN_TWO: i32 = 2;
const OPPONENT_OPEN_THREE: i32 = -400;

/// Which terms the heuristic counts.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ScoreMode {
    /// Own patterns only.
    Medium,
    /// Own patterns plus a penalty for every opponent three with an open fourth cell.
    Hard,
}

/// Positional score of `board` for `piece`.
pub fn score_position(board: &Board, piece: Piece, mode: ScoreMode) -> i32 {
    let center = COLS / 2;
    let center_count = (0..ROWS)
        .filter(|&row| board.cell(row, center) == piece)
        .count() as i32;

    let mut score = center_count * CENTER_WEIGHT;
    for window in rules::windows() {
        let cells = window.map(|(row, col)| board.cell(row, col));
        score += score_window(&cells, piece, mode);
    }
    score
}

fn score_window(cells: &[Piece; 4], piece: Piece, mode: ScoreMode) -> i32 {
    let count = |target: Piece| cells.iter().filter(|&&cell| cell == target).count();
    let own = count(piece);
    let empty = count(Piece::Empty);

    let mut score = match (own, empty) {
        (4, _) => FOUR,
        (3, 1) => OPEN_THREE,
        (2, 2) => OPEN_TWO,
        _ => 0,
    };
    if mode == ScoreMode::Hard && count(piece.opponent()) == 3 && empty == 1 {
        score += OPPONENT_OPEN_THREE;
    }
    score
}
