//! Append-only game history.
//!
//! Every accepted event that changes the game appends one or more
//! entries. The log is part of the context and therefore of every
//! snapshot and save file.

use serde::{Deserialize, Serialize};

/// Category of a history entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Seating and role assignment.
    Setup,
    /// Phase changes (night falls, dawn, ...).
    Phase,
    /// Night queue progress.
    Night,
    /// Ability resolutions, successful or not.
    Ability,
    /// Deaths and revivals.
    Death,
    /// Nominations and their results.
    Nomination,
    /// Individual votes.
    Vote,
    /// Executions.
    Execution,
    /// Passive transformations (Scarlet Woman, star pass).
    Transform,
    /// The game ended.
    GameEnd,
}

/// A recorded event with the clock it happened at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Position in the log, starting at 0.
    pub sequence: u32,

    /// Day counter when recorded.
    pub day: u32,

    /// Night counter when recorded.
    pub night: u32,

    /// Category.
    pub kind: EntryKind,

    /// Human-readable description for the storyteller.
    pub message: String,
}

impl HistoryEntry {
    /// Create a new history entry.
    #[must_use]
    pub fn new(sequence: u32, day: u32, night: u32, kind: EntryKind, message: impl Into<String>) -> Self {
        Self {
            sequence,
            day,
            night,
            kind,
            message: message.into(),
        }
    }
}
