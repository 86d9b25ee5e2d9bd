//! Events accepted by the state machine.
//!
//! Events serialize as tagged objects, e.g.
//! `{"type":"CAST_VOTE","voterId":3,"vote":true}`, so a transport layer
//! can forward them unchanged.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::characters::{Alignment, CharacterId};
use crate::core::PlayerId;

/// Chosen ability targets. Nearly always one or two.
pub type Targets = SmallVec<[PlayerId; 2]>;

/// Something the storyteller did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum Event {
    // === Setup ===
    AddPlayer {
        name: String,
    },
    RemovePlayer {
        player_id: PlayerId,
    },
    AssignRole {
        player_id: PlayerId,
        character_id: CharacterId,
    },
    StartGame,

    // === Night ===
    ProceedNightAction,
    SkipNightAction,
    KillPlayer {
        player_id: PlayerId,
        #[serde(default)]
        cause: Option<String>,
    },
    RevivePlayer {
        player_id: PlayerId,
    },
    UseAbility {
        player_id: PlayerId,
        #[serde(default)]
        targets: Targets,
    },
    EndNight,

    // === Day ===
    EnterNomination,
    Nominate {
        nominator_id: PlayerId,
        nominee_id: PlayerId,
    },
    CancelNomination,
    CastVote {
        voter_id: PlayerId,
        vote: bool,
    },
    FinishVote,
    EnableClockwiseVoting,
    ClockwiseVote {
        voter_id: PlayerId,
        vote: bool,
    },
    ClockwiseNext,
    ClockwisePrevious,
    FinishClockwiseVote,
    EndDay,

    // === Execution ===
    Execute,
    SkipExecution,

    // === Game end ===
    CheckGameEnd,
    EndGame {
        winner: Alignment,
        reason: String,
    },
}

impl Event {
    /// Wire name of the event.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Event::AddPlayer { .. } => "ADD_PLAYER",
            Event::RemovePlayer { .. } => "REMOVE_PLAYER",
            Event::AssignRole { .. } => "ASSIGN_ROLE",
            Event::StartGame => "START_GAME",
            Event::ProceedNightAction => "PROCEED_NIGHT_ACTION",
            Event::SkipNightAction => "SKIP_NIGHT_ACTION",
            Event::KillPlayer { .. } => "KILL_PLAYER",
            Event::RevivePlayer { .. } => "REVIVE_PLAYER",
            Event::UseAbility { .. } => "USE_ABILITY",
            Event::EndNight => "END_NIGHT",
            Event::EnterNomination => "ENTER_NOMINATION",
            Event::Nominate { .. } => "NOMINATE",
            Event::CancelNomination => "CANCEL_NOMINATION",
            Event::CastVote { .. } => "CAST_VOTE",
            Event::FinishVote => "FINISH_VOTE",
            Event::EnableClockwiseVoting => "ENABLE_CLOCKWISE_VOTING",
            Event::ClockwiseVote { .. } => "CLOCKWISE_VOTE",
            Event::ClockwiseNext => "CLOCKWISE_NEXT",
            Event::ClockwisePrevious => "CLOCKWISE_PREVIOUS",
            Event::FinishClockwiseVote => "FINISH_CLOCKWISE_VOTE",
            Event::EndDay => "END_DAY",
            Event::Execute => "EXECUTE",
            Event::SkipExecution => "SKIP_EXECUTION",
            Event::CheckGameEnd => "CHECK_GAME_END",
            Event::EndGame { .. } => "END_GAME",
        }
    }

    /// Add a player.
    pub fn add_player(name: impl Into<String>) -> Self {
        Event::AddPlayer { name: name.into() }
    }

    /// Assign a character.
    #[must_use]
    pub fn assign(player_id: PlayerId, character_id: CharacterId) -> Self {
        Event::AssignRole {
            player_id,
            character_id,
        }
    }

    /// Kill a player with no recorded cause.
    #[must_use]
    pub fn kill(player_id: PlayerId) -> Self {
        Event::KillPlayer {
            player_id,
            cause: None,
        }
    }

    /// Use an ability on some targets.
    pub fn use_ability(player_id: PlayerId, targets: impl IntoIterator<Item = PlayerId>) -> Self {
        Event::UseAbility {
            player_id,
            targets: targets.into_iter().collect(),
        }
    }

    /// Nominate a player.
    #[must_use]
    pub fn nominate(nominator_id: PlayerId, nominee_id: PlayerId) -> Self {
        Event::Nominate {
            nominator_id,
            nominee_id,
        }
    }

    /// Cast a simultaneous vote.
    #[must_use]
    pub fn vote(voter_id: PlayerId, vote: bool) -> Self {
        Event::CastVote { voter_id, vote }
    }

    /// Cast a clockwise vote.
    #[must_use]
    pub fn clockwise_vote(voter_id: PlayerId, vote: bool) -> Self {
        Event::ClockwiseVote { voter_id, vote }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
