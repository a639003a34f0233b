use serde::{Deserialize, Serialize};

use crate::engine::{is_valid_value, WINNING_VALUE};
use crate::error::{GameError, Result};

/// Knobs for a [`Session`](crate::Session). Defaults reproduce the classic game.
///
/// - `size`: side length of the square board.
/// - `winning_value`: tile value that ends the game as a win. Larger values
///   can still appear; only an exact match counts.
/// - `parallel_columns`: run the per-line pass of each tilt on the rayon pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub size: usize,
    pub winning_value: u32,
    pub parallel_columns: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { size: 4, winning_value: WINNING_VALUE, parallel_columns: false }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(GameError::InvalidSize(self.size));
        }
        if !is_valid_value(self.winning_value) {
            return Err(GameError::InvalidWinningValue(self.winning_value));
        }
        Ok(())
    }
}
