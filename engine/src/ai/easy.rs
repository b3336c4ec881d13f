use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{random_default, Strategy};
use crate::board::Board;
use crate::error::GameError;
use crate::rules;

/// Uniformly random playable column, no lookahead.
pub struct Easy {
    rng: StdRng,
}

impl Easy {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Easy { rng }
    }
}

impl Default for Easy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for Easy {
    fn name(&self) -> &str {
        "easy"
    }

    fn choose_column(&mut self, board: &Board) -> Result<usize, GameError> {
        random_default(&rules::playable_columns(board), &mut self.rng)
    }
}
