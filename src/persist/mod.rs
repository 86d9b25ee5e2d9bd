//! Persistence and read-only views for collaborators outside the engine.
//!
//! - `save`: JSON save files with validation, compact binary images
//! - `summary`: sync records, advisory summaries, role suggestions
//!
//! Corrupt or mismatched input is refused here and never reaches an
//! engine.

pub mod save;
pub mod summary;

pub use save::{
    restore_binary, restore_json, save_binary, save_json, try_restore_binary, try_restore_json, PersistError,
    SaveFile, REQUIRED_FIELDS, SAVE_VERSION,
};
pub use summary::{AdvisoryPlayer, AdvisorySummary, RoleSuggestion, SyncPlayer, SyncRecord};
