//! Save and restore.
//!
//! ## JSON
//!
//! A save file is a JSON object with camelCase keys: `version`,
//! `sessionId`, `phase`, `currentDay`, `currentNight`, `players`,
//! `aliveCount`, and the full `context`. Restore parses to a JSON value
//! first and checks the version and every required key before decoding,
//! so a corrupt or foreign file is refused with a precise reason.
//!
//! ## Binary
//!
//! `bincode` images of a snapshot for compact local storage, prefixed by
//! the same format version.
//!
//! Failures stay here: `restore_*` returns `Result`, `try_restore_*`
//! logs and returns `None`. Nothing in this module touches a running
//! engine.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{GameContext, Roster};
use crate::machine::{Phase, Snapshot};

/// Current save format version.
pub const SAVE_VERSION: u32 = 1;

/// Keys a JSON save must contain.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "version",
    "sessionId",
    "phase",
    "currentDay",
    "currentNight",
    "players",
    "aliveCount",
    "context",
];

/// Persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid binary image: {0}")]
    Binary(#[from] bincode::Error),

    #[error("save must be a JSON object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("unsupported save version {found} (expected {expected})")]
    VersionMismatch { found: u64, expected: u32 },

    #[error("field `{0}` disagrees with the saved context")]
    Inconsistent(&'static str),
}

/// On-disk JSON layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFile {
    pub version: u32,
    pub session_id: String,
    pub phase: Phase,
    pub current_day: u32,
    pub current_night: u32,
    pub players: Roster,
    pub alive_count: usize,
    pub context: GameContext,
}

impl SaveFile {
    /// Capture a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let ctx = &snapshot.context;
        Self {
            version: SAVE_VERSION,
            session_id: ctx.session_id.clone(),
            phase: snapshot.value,
            current_day: ctx.current_day,
            current_night: ctx.current_night,
            players: ctx.players.clone(),
            alive_count: ctx.alive_count,
            context: ctx.clone(),
        }
    }

    /// Check the summary fields against the embedded context.
    pub fn validate(&self) -> Result<(), PersistError> {
        let ctx = &self.context;
        if self.session_id != ctx.session_id {
            return Err(PersistError::Inconsistent("sessionId"));
        }
        if self.current_day != ctx.current_day {
            return Err(PersistError::Inconsistent("currentDay"));
        }
        if self.current_night != ctx.current_night {
            return Err(PersistError::Inconsistent("currentNight"));
        }
        if self.players != ctx.players {
            return Err(PersistError::Inconsistent("players"));
        }
        if self.alive_count != ctx.alive_count || self.alive_count != ctx.players.alive_count() {
            return Err(PersistError::Inconsistent("aliveCount"));
        }
        if !ctx.players.seats_are_contiguous() {
            return Err(PersistError::Inconsistent("players"));
        }
        Ok(())
    }

    /// The snapshot this file holds.
    #[must_use]
    pub fn into_snapshot(self) -> Snapshot {
        Snapshot {
            value: self.phase,
            context: self.context,
        }
    }
}

/// Serialize a snapshot as a pretty-printed JSON save.
pub fn save_json(snapshot: &Snapshot) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(&SaveFile::from_snapshot(snapshot))?)
}

/// Parse and validate a JSON save.
pub fn restore_json(json: &str) -> Result<Snapshot, PersistError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let object = value.as_object().ok_or(PersistError::NotAnObject)?;

    for field in REQUIRED_FIELDS {
        if !object.contains_key(field) {
            return Err(PersistError::MissingField(field));
        }
    }
    let found = object
        .get("version")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(0);
    if found != u64::from(SAVE_VERSION) {
        return Err(PersistError::VersionMismatch {
            found,
            expected: SAVE_VERSION,
        });
    }

    let save: SaveFile = serde_json::from_value(value)?;
    save.validate()?;
    Ok(save.into_snapshot())
}

/// [`restore_json`], logging and discarding the error.
#[must_use]
pub fn try_restore_json(json: &str) -> Option<Snapshot> {
    match restore_json(json) {
        Ok(snapshot) => Some(snapshot),
        Err(error) => {
            warn!(%error, "save rejected");
            None
        }
    }
}

#[derive(Serialize, Deserialize)]
struct BinaryImage {
    version: u32,
    snapshot: Snapshot,
}

/// Encode a snapshot as a compact binary image.
pub fn save_binary(snapshot: &Snapshot) -> Result<Vec<u8>, PersistError> {
    let image = BinaryImage {
        version: SAVE_VERSION,
        snapshot: snapshot.clone(),
    };
    Ok(bincode::serialize(&image)?)
}

/// Decode a binary image.
pub fn restore_binary(bytes: &[u8]) -> Result<Snapshot, PersistError> {
    let image: BinaryImage = bincode::deserialize(bytes)?;
    if image.version != SAVE_VERSION {
        return Err(PersistError::VersionMismatch {
            found: u64::from(image.version),
            expected: SAVE_VERSION,
        });
    }
    Ok(image.snapshot)
}

/// [`restore_binary`], logging and discarding the error.
#[must_use]
pub fn try_restore_binary(bytes: &[u8]) -> Option<Snapshot> {
    match restore_binary(bytes) {
        Ok(snapshot) => Some(snapshot),
        Err(error) => {
            warn!(%error, "binary image rejected");
            None
        }
    }
}
