//! Passive character changes triggered by deaths.
//!
//! When the Demon dies with enough players left alive, a living Scarlet
//! Woman becomes the new Demon. This runs on every Demon death,
//! whatever caused it, and before the win check.

use serde::{Deserialize, Serialize};

use crate::characters::{catalog, CharacterId, Team};
use crate::core::{EngineConfig, PlayerId, Roster};

/// A character change to apply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transform {
    pub player: PlayerId,
    pub from: CharacterId,
    pub to: CharacterId,
}

/// Check whether a Scarlet Woman takes over from a dead Demon.
///
/// `dead` is the player who just died. Returns `None` unless they were a
/// Demon, no other Demon lives, at least `scarlet_woman_min_alive`
/// players are still alive, and a Scarlet Woman is alive.
#[must_use]
pub fn scarlet_woman_transform(roster: &Roster, dead: PlayerId, config: &EngineConfig) -> Option<Transform> {
    let demon = roster.get(dead)?;
    let demon_character = demon.character_id?;
    if demon.is_alive() || catalog::team_of(demon_character) != Team::Demon {
        return None;
    }
    if roster.living_on_team(Team::Demon).next().is_some() {
        return None;
    }
    if roster.alive_count() < config.scarlet_woman_min_alive {
        return None;
    }

    let heir = roster.living_with(CharacterId::ScarletWoman).next()?;
    Some(Transform {
        player: heir.id,
        from: CharacterId::ScarletWoman,
        to: demon_character,
    })
}

/// Apply a transform to the roster.
///
/// Returns false if the player is no longer seated.
pub fn apply(roster: &mut Roster, transform: &Transform) -> bool {
    match roster.get_mut(transform.player) {
        Some(player) => {
            player.character_id = Some(transform.to);
            true
        }
        None => false,
    }
}
