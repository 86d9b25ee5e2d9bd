//! Role distribution and setup validation.
//!
//! The engine does not refuse to start an unbalanced game; these checks are
//! offered to the application that drives setup.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::catalog;
use super::definition::{CharacterId, Team};
use crate::core::{EngineConfig, Player, PlayerId};

/// Team counts for a bag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDistribution {
    pub townsfolk: usize,
    pub outsider: usize,
    pub minion: usize,
    pub demon: usize,
}

impl RoleDistribution {
    /// Standard counts for 5-15 players, before character modifiers.
    ///
    /// Returns `None` outside that range.
    #[must_use]
    pub fn base_setup(player_count: usize) -> Option<Self> {
        let (townsfolk, outsider, minion) = match player_count {
            5 => (3, 0, 1),
            6 => (3, 1, 1),
            n @ 7..=15 => {
                let minion = (n - 4) / 3;
                let outsider = (n - 4) % 3;
                (n - outsider - minion - 1, outsider, minion)
            }
            _ => return None,
        };
        Some(Self { townsfolk, outsider, minion, demon: 1 })
    }

    /// Apply setup modifiers of the characters in play (the Baron).
    #[must_use]
    pub fn with_modifiers(mut self, in_play: &[CharacterId]) -> Self {
        if in_play.contains(&CharacterId::Baron) {
            self.townsfolk = self.townsfolk.saturating_sub(2);
            self.outsider += 2;
        }
        self
    }

    /// Count the teams of the assigned characters.
    #[must_use]
    pub fn of_characters(characters: &[CharacterId]) -> Self {
        let counts = team_counts(characters.iter().copied());
        Self {
            townsfolk: counts.get(&Team::Townsfolk).copied().unwrap_or(0),
            outsider: counts.get(&Team::Outsider).copied().unwrap_or(0),
            minion: counts.get(&Team::Minion).copied().unwrap_or(0),
            demon: counts.get(&Team::Demon).copied().unwrap_or(0),
        }
    }

    /// Total number of characters.
    #[must_use]
    pub fn total(&self) -> usize {
        self.townsfolk + self.outsider + self.minion + self.demon
    }
}

/// Count characters per team.
#[must_use]
pub fn team_counts(characters: impl IntoIterator<Item = CharacterId>) -> FxHashMap<Team, usize> {
    let mut counts = FxHashMap::default();
    for c in characters {
        *counts.entry(catalog::team_of(c)).or_insert(0) += 1;
    }
    counts
}

/// Problems found by [`validate_setup`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("player count {count} is outside {min}..={max}")]
    PlayerCount { count: usize, min: usize, max: usize },

    #[error("{0} has no character assigned")]
    Unassigned(PlayerId),

    #[error("expected exactly one Demon, found {0}")]
    DemonCount(usize),

    #[error("{character} is assigned to more than one player")]
    Duplicate { character: CharacterId },

    #[error("distribution {found:?} does not match expected {expected:?}")]
    Distribution { expected: RoleDistribution, found: RoleDistribution },
}

/// Check a roster against the setup rules.
///
/// Checks, in order: player count, every seat assigned, exactly one Demon,
/// no duplicate characters. The standard distribution is not enforced since
/// storytellers deliberately deviate from it; use [`check_distribution`].
pub fn validate_setup(players: &[Player], config: &EngineConfig) -> Result<(), SetupError> {
    let count = players.len();
    if count < config.min_players || count > config.max_players {
        return Err(SetupError::PlayerCount {
            count,
            min: config.min_players,
            max: config.max_players,
        });
    }

    let mut characters = Vec::with_capacity(count);
    for player in players {
        match player.character_id {
            Some(c) => characters.push(c),
            None => return Err(SetupError::Unassigned(player.id)),
        }
    }

    let demons = characters
        .iter()
        .filter(|c| catalog::team_of(**c) == Team::Demon)
        .count();
    if demons != 1 {
        return Err(SetupError::DemonCount(demons));
    }

    let mut seen = Vec::with_capacity(count);
    for c in &characters {
        if seen.contains(c) {
            return Err(SetupError::Duplicate { character: *c });
        }
        seen.push(*c);
    }

    Ok(())
}

/// Compare assigned characters to the standard distribution.
///
/// The Drunk is counted as an Outsider (its true character).
pub fn check_distribution(characters: &[CharacterId]) -> Result<(), SetupError> {
    let found = RoleDistribution::of_characters(characters);
    let Some(base) = RoleDistribution::base_setup(characters.len()) else {
        return Err(SetupError::PlayerCount { count: characters.len(), min: 5, max: 15 });
    };
    let expected = base.with_modifiers(characters);
    if found == expected {
        Ok(())
    } else {
        Err(SetupError::Distribution { expected, found })
    }
}
