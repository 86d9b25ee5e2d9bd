//! Phases of a game.
//!
//! Phases serialize as their dotted path (`"day.vote"`), the form shown
//! to collaborators and stored in save files.

use serde::{Deserialize, Serialize};

/// Sub-states of the day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DayPhase {
    /// Open talk; abilities like the Slayer's may be used.
    Discussion,
    /// Waiting for a nomination.
    Nomination,
    /// Everyone votes at once.
    Vote,
    /// Votes are taken seat by seat.
    ClockwiseVote,
}

/// Top-level phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Phase {
    Setup,
    Night,
    Day(DayPhase),
    Execution,
    GameOver,
}

impl Phase {
    /// Every phase, in game order.
    pub const ALL: [Phase; 8] = [
        Phase::Setup,
        Phase::Night,
        Phase::Day(DayPhase::Discussion),
        Phase::Day(DayPhase::Nomination),
        Phase::Day(DayPhase::Vote),
        Phase::Day(DayPhase::ClockwiseVote),
        Phase::Execution,
        Phase::GameOver,
    ];

    /// Dotted path of this phase.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Night => "night",
            Phase::Day(DayPhase::Discussion) => "day.discussion",
            Phase::Day(DayPhase::Nomination) => "day.nomination",
            Phase::Day(DayPhase::Vote) => "day.vote",
            Phase::Day(DayPhase::ClockwiseVote) => "day.clockwiseVote",
            Phase::Execution => "execution",
            Phase::GameOver => "gameOver",
        }
    }

    /// Parse a dotted path.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.path() == path)
    }

    /// `gameOver` accepts no further events except inspection.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver)
    }

    /// Any day sub-state.
    #[must_use]
    pub const fn is_day(self) -> bool {
        matches!(self, Phase::Day(_))
    }

    /// Phase matches a path or a path prefix (`"day"` matches every day state).
    #[must_use]
    pub fn matches(self, pattern: &str) -> bool {
        let path = self.path();
        path == pattern || path.strip_prefix(pattern).is_some_and(|rest| rest.starts_with('.'))
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

impl From<Phase> for String {
    fn from(phase: Phase) -> Self {
        phase.path().to_string()
    }
}

/// A string that is not a phase path.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown phase: {0}")]
pub struct UnknownPhase(pub String);

impl TryFrom<String> for Phase {
    type Error = UnknownPhase;

    fn try_from(path: String) -> Result<Self, Self::Error> {
        Phase::from_path(&path).ok_or(UnknownPhase(path))
    }
}

impl std::str::FromStr for Phase {
    type Err = UnknownPhase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::from_path(s).ok_or_else(|| UnknownPhase(s.to_string()))
    }
}
