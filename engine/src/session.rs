//! One game from first move to win or draw.
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::ai::{strategy_for, SearchConfig, Strategy};
use crate::board::Board;
use crate::error::GameError;
use crate::rules;
use crate::snapshot::{Snapshot, SnapshotStore};
use crate::turn::{next_turn, BattleMode, Difficulty, Turn};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "winner", rename_all = "snake_case")]
pub enum GameOutcome {
    InProgress,
    Win(Turn),
    Draw,
}

impl GameOutcome {
    pub fn is_over(self) -> bool {
        self != GameOutcome::InProgress
    }
}

/// Result of one applied move.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MoveOutcome {
    pub seat: Turn,
    pub column: usize,
    pub row: usize,
    pub outcome: GameOutcome,
    /// Unchanged from `seat` when the move won.
    pub next_turn: Turn,
}

/// Drops the acting seat's piece into `column` and works out what happens next.
/// The board is untouched when the column is rejected.
pub fn apply_move(
    board: &mut Board,
    turn: Turn,
    mode: BattleMode,
    column: usize,
) -> Result<MoveOutcome, GameError> {
    let piece = turn.piece();
    let row = board.drop_piece(column, piece)?;

    let (outcome, next) = if rules::detect_win(board, piece) {
        (GameOutcome::Win(turn), turn)
    } else if board.is_full() {
        (GameOutcome::Draw, next_turn(turn, mode))
    } else {
        (GameOutcome::InProgress, next_turn(turn, mode))
    };

    Ok(MoveOutcome {
        seat: turn,
        column,
        row,
        outcome,
        next_turn: next,
    })
}

pub struct GameSession<S: SnapshotStore> {
    board: Board,
    turn: Turn,
    mode: BattleMode,
    difficulty: Option<Difficulty>,
    outcome: GameOutcome,
    search: SearchConfig,
    seed: Option<u64>,
    opponent: Option<Box<dyn Strategy>>,
    store: S,
}

impl<S: SnapshotStore> GameSession<S> {
    /// Empty board, Player1 to move. The fresh state is saved right away.
    pub fn new(
        mode: BattleMode,
        difficulty: Option<Difficulty>,
        store: S,
    ) -> Result<Self, GameError> {
        if mode == BattleMode::PlayerVsComputer && difficulty.is_none() {
            return Err(GameError::MissingDifficulty);
        }
        let mut session = Self::from_parts(Board::create_empty(), Turn::Player1, mode, difficulty, store);
        session.save()?;
        Ok(session)
    }

    /// Continues the stored game, or starts a player-vs-player game when the
    /// store is empty. Stored state is trusted as written.
    pub fn resume(store: S) -> Result<Self, GameError> {
        let saved = store
            .load()
            .map_err(|err| GameError::Persistence(Box::new(err)))?;
        match saved {
            Some(snapshot) => Ok(Self::from_parts(
                snapshot.board,
                snapshot.turn,
                snapshot.battle_mode,
                snapshot.difficulty,
                store,
            )),
            None => Self::new(BattleMode::PlayerVsPlayer, None, store),
        }
    }

    fn from_parts(
        board: Board,
        turn: Turn,
        mode: BattleMode,
        difficulty: Option<Difficulty>,
        store: S,
    ) -> Self {
        let outcome = rules::outcome_of(&board, mode);
        GameSession {
            board,
            turn,
            mode,
            difficulty,
            outcome,
            search: SearchConfig::default(),
            seed: None,
            opponent: None,
            store,
        }
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self.opponent = None;
        self
    }

    /// Makes the computer's random picks reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.opponent = None;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn mode(&self) -> BattleMode {
        self.mode
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            turn: self.turn,
            battle_mode: self.mode,
            difficulty: self.difficulty,
        }
    }

    /// Plays `column` for the human seat whose turn it is. Under player vs
    /// computer the computer's seat only moves through [`Self::play_ai_turn`].
    pub fn play(&mut self, column: usize) -> Result<MoveOutcome, GameError> {
        if self.awaits_computer() {
            return Err(GameError::ComputerToMove);
        }
        self.commit(column)
    }

    /// True while the game is running and the computer's seat is to move.
    pub fn awaits_computer(&self) -> bool {
        self.mode == BattleMode::PlayerVsComputer
            && self.turn.is_computer()
            && !self.outcome.is_over()
    }

    /// The move only takes effect once the resulting state has been saved.
    fn commit(&mut self, column: usize) -> Result<MoveOutcome, GameError> {
        if self.outcome.is_over() {
            return Err(GameError::GameOver);
        }
        let mut board = self.board.clone();
        let result = apply_move(&mut board, self.turn, self.mode, column)?;
        let snapshot = Snapshot {
            board,
            turn: result.next_turn,
            battle_mode: self.mode,
            difficulty: self.difficulty,
        };
        self.store
            .save(&snapshot)
            .map_err(|err| GameError::Persistence(Box::new(err)))?;

        self.board = snapshot.board;
        self.turn = result.next_turn;
        self.outcome = result.outcome;
        Ok(result)
    }

    /// Column the configured strategy would play on the current board.
    pub fn select_ai_move(&mut self) -> Result<usize, GameError> {
        if self.outcome.is_over() {
            return Err(GameError::GameOver);
        }
        let board = self.board.clone();
        self.opponent()?.choose_column(&board)
    }

    /// Lets the computer take its turn.
    pub fn play_ai_turn(&mut self) -> Result<MoveOutcome, GameError> {
        if !self.turn.is_computer() || self.mode != BattleMode::PlayerVsComputer {
            return Err(GameError::NotComputerTurn);
        }
        let column = self.select_ai_move()?;
        self.commit(column)
    }

    fn opponent(&mut self) -> Result<&mut Box<dyn Strategy>, GameError> {
        if self.opponent.is_none() {
            let difficulty = self.difficulty.ok_or(GameError::MissingDifficulty)?;
            let rng = match self.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            self.opponent = Some(strategy_for(difficulty, self.search, rng)?);
        }
        self.opponent.as_mut().ok_or(GameError::MissingDifficulty)
    }

    fn save(&mut self) -> Result<(), GameError> {
        let snapshot = self.snapshot();
        self.store
            .save(&snapshot)
            .map_err(|err| GameError::Persistence(Box::new(err)))
    }
}
