//! Game configuration.
//!
//! The rules themselves are fixed. Configuration only covers how a game is
//! set up: where its dice draw randomness from and whether the state keeps
//! an event history.

use serde::{Deserialize, Serialize};

use super::rng::GameRng;

/// Setup options for a new game.
///
/// ```
/// use ludo_engine::core::GameConfig;
///
/// let config = GameConfig::default().with_seed(7).without_history();
/// assert_eq!(config.seed, Some(7));
/// assert!(!config.record_history);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Dice seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Record an [`EventRecord`](super::EventRecord) for every event.
    pub record_history: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            record_history: true,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn without_history(mut self) -> Self {
        self.record_history = false;
        self
    }

    /// Build the dice RNG described by this config.
    #[must_use]
    pub fn rng(&self) -> GameRng {
        match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        }
    }
}
