//! Core engine types: players, roster, context, history, RNG, configuration.
//!
//! Everything else in the crate reads and writes the game through
//! [`GameContext`]; the other modules are pure functions over it.

pub mod config;
pub mod context;
pub mod history;
pub mod player;
pub mod rng;
pub mod roster;

pub use config::EngineConfig;
pub use context::GameContext;
pub use history::{EntryKind, HistoryEntry};
pub use player::{Player, PlayerId, StatusFlags};
pub use rng::{GameRng, GameRngState};
pub use roster::Roster;
