use serde::{Deserialize, Serialize};

use crate::board::Piece;

/// Who is sitting in the second seat for the whole session.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum BattleMode {
    #[serde(rename = "player vs player")]
    PlayerVsPlayer,
    #[serde(rename = "player vs computer")]
    PlayerVsComputer,
}

impl BattleMode {
    pub fn second_seat(self) -> Turn {
        match self {
            BattleMode::PlayerVsPlayer => Turn::Player2,
            BattleMode::PlayerVsComputer => Turn::ComputerAI,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// The seat whose move is next.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Turn {
    #[serde(rename = "player1")]
    Player1,
    #[serde(rename = "player2")]
    Player2,
    #[serde(rename = "player_ai")]
    ComputerAI,
}

impl Turn {
    /// Player2 and the computer share the second piece.
    pub fn piece(self) -> Piece {
        match self {
            Turn::Player1 => Piece::Player1,
            Turn::Player2 | Turn::ComputerAI => Piece::Player2,
        }
    }

    pub fn is_computer(self) -> bool {
        self == Turn::ComputerAI
    }
}

/// Any seat other than Player1 hands the move back to Player1.
pub fn next_turn(current: Turn, mode: BattleMode) -> Turn {
    match current {
        Turn::Player1 => mode.second_seat(),
        Turn::Player2 | Turn::ComputerAI => Turn::Player1,
    }
}
