//! The authoritative game context.
//!
//! `GameContext` holds everything the rules engine mutates: the roster,
//! the day/night clock, the history log, the night queue, the nomination
//! and vote bookkeeping for the current day, and the end-of-game result.
//!
//! ## Cloning
//!
//! Collections are `im` persistent structures, so the transition function
//! can clone the context, mutate the clone, and hand the caller an
//! immutable snapshot without deep copies.
//!
//! ## Day Fields
//!
//! `nominated_today`, `nominators_today`, `execution_target`,
//! `highest_vote_count`, `executed_today` and `last_executed` are reset
//! at dawn by [`GameContext::reset_day_fields`]. `current_votes` is only
//! cleared when a nomination begins or its vote concludes.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::config::EngineConfig;
use super::history::{EntryKind, HistoryEntry};
use super::player::PlayerId;
use super::rng::{GameRng, GameRngState};
use super::roster::Roster;
use crate::abilities::AbilityResult;
use crate::characters::Alignment;
use crate::night::NightQueue;
use crate::rules::EndReason;
use crate::voting::{ClockwiseVoting, NominationRecord};

/// Full mutable state of one game session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameContext {
    /// Session identifier, derived from the seed.
    pub session_id: String,

    /// Seated players.
    pub players: Roster,

    /// Next id handed out by ADD_PLAYER. Ids are never reused.
    pub next_player_id: u32,

    /// Living players, kept in sync after every accepted event.
    pub alive_count: usize,

    /// Day counter; 0 until the first dawn.
    pub current_day: u32,

    /// Night counter; 1 on the first night.
    pub current_night: u32,

    /// The current (or most recent) night is the first night.
    pub is_first_night: bool,

    /// Append-only log.
    pub history: Vector<HistoryEntry>,

    /// Tonight's queue. `None` outside the night phase.
    pub night_queue: Option<NightQueue>,

    // === Nomination ===

    /// Nominator of the nomination being voted on.
    pub current_nominator_id: Option<PlayerId>,

    /// Nominee of the nomination being voted on.
    pub current_nominee_id: Option<PlayerId>,

    /// Players nominated today.
    pub nominated_today: Vector<PlayerId>,

    /// Players who nominated today.
    pub nominators_today: Vector<PlayerId>,

    /// Votes on the current nomination.
    pub current_votes: OrdMap<PlayerId, bool>,

    /// Pending execution for today.
    pub execution_target: Option<PlayerId>,

    /// Votes behind `execution_target`.
    pub highest_vote_count: usize,

    /// Someone was executed today.
    pub executed_today: bool,

    /// Player executed on the most recent day, cleared at dawn.
    pub last_executed: Option<PlayerId>,

    /// Every concluded nomination, across the whole game.
    pub nomination_history: Vector<NominationRecord>,

    // === Clockwise voting ===

    /// New nominations use seat-ordered voting.
    pub clockwise_enabled: bool,

    /// Seat-ordered vote in progress.
    pub clockwise_voting: Option<ClockwiseVoting>,

    // === Results ===

    /// Outcome of the most recent USE_ABILITY.
    pub last_ability: Option<AbilityResult>,

    /// Winning side once the game is over.
    pub winner: Option<Alignment>,

    /// Why the game ended.
    pub end_reason: Option<EndReason>,

    /// Saved RNG stream. Abilities fork from it.
    pub rng: GameRngState,
}

impl GameContext {
    /// Fresh context for the setup phase.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        let rng = GameRng::new(config.seed);
        let session_id = format!("{:016x}", rng.for_context("session").next_u64());

        Self {
            session_id,
            players: Roster::new(),
            next_player_id: 0,
            alive_count: 0,
            current_day: 0,
            current_night: 0,
            is_first_night: false,
            history: Vector::new(),
            night_queue: None,
            current_nominator_id: None,
            current_nominee_id: None,
            nominated_today: Vector::new(),
            nominators_today: Vector::new(),
            current_votes: OrdMap::new(),
            execution_target: None,
            highest_vote_count: 0,
            executed_today: false,
            last_executed: None,
            nomination_history: Vector::new(),
            clockwise_enabled: config.clockwise_voting,
            clockwise_voting: None,
            last_ability: None,
            winner: None,
            end_reason: None,
            rng: rng.state(),
        }
    }

    /// Append a history entry stamped with the current clock.
    pub fn log(&mut self, kind: EntryKind, message: impl Into<String>) {
        let sequence = self.history.len() as u32;
        self.history.push_back(HistoryEntry::new(
            sequence,
            self.current_day,
            self.current_night,
            kind,
            message,
        ));
    }

    /// Recount living players.
    pub fn refresh_alive_count(&mut self) {
        self.alive_count = self.players.alive_count();
    }

    /// Clear per-day bookkeeping at dawn.
    pub fn reset_day_fields(&mut self) {
        self.nominated_today = Vector::new();
        self.nominators_today = Vector::new();
        self.execution_target = None;
        self.highest_vote_count = 0;
        self.executed_today = false;
        self.last_executed = None;
        self.clear_nomination();
    }

    /// Clear the nomination under vote, including its votes.
    pub fn clear_nomination(&mut self) {
        self.current_nominator_id = None;
        self.current_nominee_id = None;
        self.current_votes = OrdMap::new();
        self.clockwise_voting = None;
    }

    /// Name of a player for log messages, falling back to the id.
    #[must_use]
    pub fn name_of(&self, id: PlayerId) -> String {
        self.players
            .get(id)
            .map_or_else(|| id.to_string(), |p| p.name.clone())
    }

    /// The game has a winner.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
}
