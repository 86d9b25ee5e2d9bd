//! Win condition evaluation.
//!
//! Pure predicates over the roster, plus [`evaluate`], which combines
//! them in the rulebook's order:
//!
//! 1. Saint executed, Demon dead, good eliminated. Any of them ends
//!    the game immediately.
//! 2. Mayor win, only when asked for and only if nothing above fired.
//!    Kills and end-of-day checks ask for it; executions do not.
//!
//! The Scarlet Woman transform is not checked here; callers apply it
//! before evaluating so a replaced Demon does not end the game.

use serde::{Deserialize, Serialize};

use crate::characters::{Alignment, CharacterId, Team};
use crate::core::{EngineConfig, PlayerId, Roster};

/// Why the game ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// No Demon is alive.
    DemonDead,
    /// No Townsfolk or Outsider is alive.
    GoodEliminated,
    /// The Saint was executed.
    SaintExecuted,
    /// Three players alive, Mayor among them, no execution today.
    MayorWin,
    /// The storyteller ended the game.
    Declared { reason: String },
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndReason::DemonDead => f.write_str("the Demon is dead"),
            EndReason::GoodEliminated => f.write_str("no good players remain"),
            EndReason::SaintExecuted => f.write_str("the Saint was executed"),
            EndReason::MayorWin => f.write_str("the Mayor survived to the final three"),
            EndReason::Declared { reason } => f.write_str(reason),
        }
    }
}

/// A finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEnd {
    pub winner: Alignment,
    pub reason: EndReason,
}

impl GameEnd {
    #[must_use]
    pub fn new(winner: Alignment, reason: EndReason) -> Self {
        Self { winner, reason }
    }
}

/// What to take into account when evaluating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WinCheck {
    /// Player executed by this event.
    pub executed: Option<PlayerId>,
    /// Consider the Mayor win.
    pub mayor: bool,
    /// An execution happened today.
    pub executed_today: bool,
}

impl WinCheck {
    /// After a kill outside execution. The Mayor can win here too.
    #[must_use]
    pub fn after_kill(executed_today: bool) -> Self {
        Self {
            executed: None,
            mayor: true,
            executed_today,
        }
    }

    /// After executing `player`.
    #[must_use]
    pub fn after_execution(player: PlayerId) -> Self {
        Self {
            executed: Some(player),
            mayor: false,
            executed_today: true,
        }
    }

    /// At the end of a day, or on an explicit check.
    #[must_use]
    pub fn full(executed_today: bool) -> Self {
        Self {
            executed: None,
            mayor: true,
            executed_today,
        }
    }
}

/// No Demon is alive.
#[must_use]
pub fn demon_dead(roster: &Roster) -> bool {
    roster.living_on_team(Team::Demon).next().is_none()
}

/// No Townsfolk or Outsider is alive.
#[must_use]
pub fn good_eliminated(roster: &Roster) -> bool {
    roster.living_on_team(Team::Townsfolk).next().is_none()
        && roster.living_on_team(Team::Outsider).next().is_none()
}

/// The executed player is the Saint.
#[must_use]
pub fn saint_executed(roster: &Roster, executed: Option<PlayerId>) -> bool {
    executed
        .and_then(|id| roster.get(id))
        .is_some_and(|p| p.character_id == Some(CharacterId::Saint))
}

/// Exactly `mayor_alive_count` alive, a living Mayor, no execution today.
#[must_use]
pub fn mayor_win(roster: &Roster, executed_today: bool, config: &EngineConfig) -> bool {
    !executed_today
        && roster.alive_count() == config.mayor_alive_count
        && roster.living_with(CharacterId::Mayor).next().is_some()
}

/// Decide whether the game is over.
#[must_use]
pub fn evaluate(roster: &Roster, check: WinCheck, config: &EngineConfig) -> Option<GameEnd> {
    if saint_executed(roster, check.executed) {
        return Some(GameEnd::new(Alignment::Evil, EndReason::SaintExecuted));
    }
    if demon_dead(roster) {
        return Some(GameEnd::new(Alignment::Good, EndReason::DemonDead));
    }
    if good_eliminated(roster) {
        return Some(GameEnd::new(Alignment::Evil, EndReason::GoodEliminated));
    }
    if check.mayor && mayor_win(roster, check.executed_today, config) {
        return Some(GameEnd::new(Alignment::Good, EndReason::MayorWin));
    }
    None
}
