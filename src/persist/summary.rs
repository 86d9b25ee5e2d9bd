//! Read-only views for outside collaborators.
//!
//! - `SyncRecord`: what a remote mirror needs to show other clients
//! - `AdvisorySummary`: what a role-assignment advisor may look at
//! - `RoleSuggestion`: an advisor's proposal, turned back into an
//!   ordinary ASSIGN_ROLE event
//!
//! None of these can change the game; changes only ever go through
//! [`Engine::dispatch`](crate::machine::Engine::dispatch).

use serde::{Deserialize, Serialize};

use crate::characters::{catalog, team_counts, CharacterId, RoleDistribution, Team};
use crate::core::{GameContext, PlayerId, StatusFlags};
use crate::machine::{Event, Snapshot};

/// One player as mirrored to other clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPlayer {
    pub id: PlayerId,
    pub name: String,
    pub seat_index: usize,
    pub is_dead: bool,
    pub is_ghost: bool,
    pub has_used_ghost_vote: bool,
    pub character_id: Option<CharacterId>,
    #[serde(rename = "statusFlags")]
    pub status: StatusFlags,
}

/// The fields a sync service mirrors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRecord {
    pub session_id: String,
    pub phase: String,
    pub current_day: u32,
    pub current_night: u32,
    pub players: Vec<SyncPlayer>,
}

impl SyncRecord {
    /// Capture a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let ctx = &snapshot.context;
        Self {
            session_id: ctx.session_id.clone(),
            phase: snapshot.path().to_string(),
            current_day: ctx.current_day,
            current_night: ctx.current_night,
            players: ctx
                .players
                .iter()
                .map(|p| SyncPlayer {
                    id: p.id,
                    name: p.name.clone(),
                    seat_index: p.seat_index,
                    is_dead: p.is_dead,
                    is_ghost: p.is_ghost,
                    has_used_ghost_vote: p.has_used_ghost_vote,
                    character_id: p.character_id,
                    status: p.status.clone(),
                })
                .collect(),
        }
    }
}

/// One seat as seen by an advisor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryPlayer {
    pub id: PlayerId,
    pub name: String,
    pub seat_index: usize,
    pub is_dead: bool,
    pub character_id: Option<CharacterId>,
    pub team: Option<Team>,
}

/// Player, character and team-count view for an advisory service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorySummary {
    pub player_count: usize,
    pub alive_count: usize,
    pub current_day: u32,
    pub players: Vec<AdvisoryPlayer>,
    /// Teams of the characters assigned so far.
    pub assigned: RoleDistribution,
    /// Standard distribution for this table, if the size is supported.
    pub expected: Option<RoleDistribution>,
    /// Characters not yet assigned to anyone.
    pub unassigned_characters: Vec<CharacterId>,
}

impl AdvisorySummary {
    /// Summarize a context.
    #[must_use]
    pub fn from_context(ctx: &GameContext) -> Self {
        let in_play: Vec<CharacterId> = ctx.players.iter().filter_map(|p| p.character_id).collect();
        let counts = team_counts(in_play.iter().copied());
        let count = |team: Team| counts.get(&team).copied().unwrap_or(0);

        Self {
            player_count: ctx.players.len(),
            alive_count: ctx.alive_count,
            current_day: ctx.current_day,
            players: ctx
                .players
                .iter()
                .map(|p| AdvisoryPlayer {
                    id: p.id,
                    name: p.name.clone(),
                    seat_index: p.seat_index,
                    is_dead: p.is_dead,
                    character_id: p.character_id,
                    team: p.character_id.map(catalog::team_of),
                })
                .collect(),
            assigned: RoleDistribution {
                townsfolk: count(Team::Townsfolk),
                outsider: count(Team::Outsider),
                minion: count(Team::Minion),
                demon: count(Team::Demon),
            },
            expected: RoleDistribution::base_setup(ctx.players.len()).map(|d| d.with_modifiers(&in_play)),
            unassigned_characters: CharacterId::ALL
                .into_iter()
                .filter(|c| !in_play.contains(c))
                .collect(),
        }
    }
}

/// A proposed role assignment from an advisor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSuggestion {
    pub player_id: PlayerId,
    pub character_id: CharacterId,
    #[serde(default)]
    pub rationale: Option<String>,
}

impl RoleSuggestion {
    /// The ASSIGN_ROLE event that carries out this suggestion.
    #[must_use]
    pub fn into_event(self) -> Event {
        Event::assign(self.player_id, self.character_id)
    }
}
