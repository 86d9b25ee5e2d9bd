//! Ability outcomes and errors.
//!
//! Handlers return `Result<AbilityData, AbilityError>`. The resolver
//! flattens that into an [`AbilityResult`], the shape stored on the
//! context and shown to the storyteller: `success`, optional `data`,
//! optional `error` message.

use serde::{Deserialize, Serialize};

use super::targeting::TargetCount;
use crate::characters::CharacterId;
use crate::core::{PlayerId, StatusFlags};

/// What an ability computed or did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all_fields = "camelCase")]
pub enum AbilityData {
    /// Demon kill attempt.
    Kill {
        target: PlayerId,
        killed: bool,
        /// Why nobody died, when `killed` is false.
        reason: Option<String>,
        /// Minion that caught the star pass.
        new_demon: Option<PlayerId>,
    },

    /// Empath: evil players among the two neighbours.
    EvilNeighbors { count: usize },

    /// Chef: adjacent evil pairs around the circle.
    EvilPairs { count: usize },

    /// Investigator: Minions in play.
    MinionCount { count: usize },

    /// Librarian: Outsiders in play.
    OutsiderCount { count: usize },

    /// Fortune Teller.
    DemonCheck { targets: Vec<PlayerId>, detected: bool },

    /// Monk.
    Protected { target: PlayerId },

    /// Poisoner.
    Poisoned { target: PlayerId },

    /// Undertaker. Both `None` when nobody was executed.
    Executed {
        player: Option<PlayerId>,
        character: Option<CharacterId>,
    },

    /// Ravenkeeper.
    CharacterSeen {
        target: PlayerId,
        character: Option<CharacterId>,
    },

    /// Butler.
    MasterChosen { master: PlayerId },

    /// Spy.
    Grimoire { entries: Vec<GrimoireEntry> },

    /// Slayer.
    Slay { target: PlayerId, killed: bool },

    /// Characters with no active ability.
    Passive { character: CharacterId },

    /// Characters without a handler yet.
    NotImplemented { character: CharacterId },
}

/// One row of the grimoire, as seen by the Spy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrimoireEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub seat_index: usize,
    pub character_id: Option<CharacterId>,
    pub is_dead: bool,
    pub status: StatusFlags,
}

/// Expected rule violations raised by ability handlers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbilityError {
    #[error("{0} is not seated")]
    UnknownActor(PlayerId),

    #[error("{0} has no character")]
    NoCharacter(PlayerId),

    #[error("must choose {expected} target(s), got {got}")]
    TargetCount { expected: TargetCount, got: usize },

    #[error("target {0} is not seated")]
    UnknownTarget(PlayerId),

    #[error("target {0} is already dead")]
    TargetDead(PlayerId),

    #[error("cannot target self")]
    SelfTarget,

    #[error("{0} was chosen twice")]
    DuplicateTarget(PlayerId),

    #[error("{0} is dead and cannot act")]
    ActorDead(PlayerId),

    #[error("{character} ability already used")]
    AlreadyUsed { character: CharacterId },
}

/// Outcome of one USE_ABILITY.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityResult {
    /// Acting player.
    pub actor: PlayerId,

    /// Whether the ability resolved.
    pub success: bool,

    /// Result payload on success.
    pub data: Option<AbilityData>,

    /// Error message on failure.
    pub error: Option<String>,
}

impl AbilityResult {
    /// A successful resolution.
    #[must_use]
    pub fn ok(actor: PlayerId, data: AbilityData) -> Self {
        Self {
            actor,
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// A failed resolution.
    #[must_use]
    pub fn failed(actor: PlayerId, error: &AbilityError) -> Self {
        Self {
            actor,
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }
}
