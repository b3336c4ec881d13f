use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::turn::{BattleMode, Difficulty, Turn};

/// Everything needed to resume a game.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub turn: Turn,
    pub battle_mode: BattleMode,
    pub difficulty: Option<Difficulty>,
}

/// Durable storage for the current game. The engine calls `save` after every
/// accepted move and never decides where or how the snapshot is kept.
pub trait SnapshotStore: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error>;

    /// `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>, Self::Error>;
}

/// Keeps the latest snapshot in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    latest: Option<Snapshot>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        MemoryStore {
            latest: Some(snapshot),
            saves: 0,
        }
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.latest.as_ref()
    }

    /// Number of `save` calls seen so far.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl SnapshotStore for MemoryStore {
    type Error = Infallible;

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        self.latest = Some(snapshot.clone());
        self.saves += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>, Self::Error> {
        Ok(self.latest.clone())
    }
}
