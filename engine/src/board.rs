use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, PieceError};
use crate::rules;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Occupant of a single cell. Serialized as 0, 1 or 2.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Piece {
    #[default]
    Empty,
    Player1,
    Player2,
}

impl Piece {
    /// The piece on the other side of the board. `Empty` has no opponent.
    pub fn opponent(self) -> Piece {
        match self {
            Piece::Player1 => Piece::Player2,
            Piece::Player2 => Piece::Player1,
            Piece::Empty => Piece::Empty,
        }
    }

    fn symbol(self) -> char {
        match self {
            Piece::Empty => '.',
            Piece::Player1 => '1',
            Piece::Player2 => '2',
        }
    }
}

impl From<Piece> for u8 {
    fn from(piece: Piece) -> u8 {
        match piece {
            Piece::Empty => 0,
            Piece::Player1 => 1,
            Piece::Player2 => 2,
        }
    }
}

impl TryFrom<u8> for Piece {
    type Error = PieceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Piece::Empty),
            1 => Ok(Piece::Player1),
            2 => Ok(Piece::Player2),
            other => Err(PieceError::Unknown(other)),
        }
    }
}

/// Fixed 6x7 grid. Row 0 is the bottom row; pieces stack upward from it.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Piece; COLS]; ROWS],
}

impl Board {
    pub fn create_empty() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> usize {
        ROWS
    }

    pub fn cols(&self) -> usize {
        COLS
    }

    pub fn cell(&self, row: usize, col: usize) -> Piece {
        self.cells[row][col]
    }

    /// Lowest empty row of `col`, scanning from the bottom. `None` when the column is full.
    pub fn lowest_open_row(&self, col: usize) -> Option<usize> {
        (0..ROWS).find(|&row| self.cells[row][col] == Piece::Empty)
    }

    /// Unchecked write. Callers must have validated the target with
    /// [`rules::ensure_playable`]; an out-of-range cell panics.
    pub fn place(&mut self, row: usize, col: usize, piece: Piece) {
        self.cells[row][col] = piece;
    }

    /// Checked drop: validates the column, writes into its lowest open row and
    /// returns that row.
    pub fn drop_piece(&mut self, col: usize, piece: Piece) -> Result<usize, GameError> {
        let row = rules::ensure_playable(self, col)?;
        self.place(row, col, piece);
        Ok(row)
    }

    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.lowest_open_row(col).is_none())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter().rev() {
            let line: String = row.iter().map(|piece| piece.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        let footer: String = (0..COLS)
            .filter_map(|col| char::from_digit(col as u32, 10))
            .collect();
        write!(f, "{footer}")
    }
}
