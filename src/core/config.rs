//! Engine configuration.
//!
//! Tunable rule constants and the RNG seed. The defaults are the standard
//! rules; storytellers running house rules adjust them with the `with_*`
//! builders.

use serde::{Deserialize, Serialize};

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for the game RNG.
    /// Same seed and same events produce the same game.
    pub seed: u64,

    /// Start with seat-ordered (clockwise) voting enabled.
    pub clockwise_voting: bool,

    /// Minimum living players (after the Demon's death) for the
    /// Scarlet Woman to take over.
    pub scarlet_woman_min_alive: usize,

    /// Living players at which the Mayor can win.
    pub mayor_alive_count: usize,

    /// Smallest supported table.
    pub min_players: usize,

    /// Largest supported table.
    pub max_players: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            clockwise_voting: false,
            scarlet_woman_min_alive: 5,
            mayor_alive_count: 3,
            min_players: 5,
            max_players: 15,
        }
    }
}

impl EngineConfig {
    /// Use a custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Start in clockwise voting mode.
    #[must_use]
    pub fn with_clockwise_voting(mut self, enabled: bool) -> Self {
        self.clockwise_voting = enabled;
        self
    }

    /// Change the Scarlet Woman threshold.
    #[must_use]
    pub fn with_scarlet_woman_min_alive(mut self, count: usize) -> Self {
        self.scarlet_woman_min_alive = count;
        self
    }

    /// Change the supported table size.
    #[must_use]
    pub fn with_player_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }
}
