//! # storyteller
//!
//! A rules engine for the storyteller of a Blood on the Clocktower game
//! (Trouble Brewing edition).
//!
//! ## Design Principles
//!
//! 1. **Event-Sourced**: Every change goes through [`Engine::dispatch`].
//!    Collaborators (rendering, sync, save files, advisors) only read
//!    snapshots.
//!
//! 2. **Pure Transitions**: The state machine is an explicit
//!    [`Phase`] enum plus a pure [`transition`] function, testable
//!    without an engine.
//!
//! 3. **Closed Character Set**: Abilities dispatch over [`CharacterId`]
//!    with an exhaustive `match`, so a new character cannot be forgotten.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) snapshot clones via `im-rs`.
//!
//! - **Deterministic Randomness**: Poisoned and drunk information comes
//!   from a ChaCha8 stream stored in the context, so the same seed and
//!   events replay the same game.
//!
//! ## Modules
//!
//! - `core`: Players, roster, context, history, RNG, configuration
//! - `characters`: Catalog, teams, setup distribution
//! - `abilities`: Ability resolution and effects
//! - `night`: Night action queue
//! - `voting`: Nomination, votes, thresholds, clockwise voting
//! - `rules`: Win conditions and the Scarlet Woman transform
//! - `machine`: Phases, events, transition function, engine
//! - `persist`: Save/restore and read-only summaries
//!
//! ## Example
//!
//! ```
//! use storyteller::{CharacterId, Engine, Event, PlayerId};
//!
//! let mut engine = Engine::default();
//! for (i, character) in [CharacterId::Imp, CharacterId::Chef, CharacterId::Empath].into_iter().enumerate() {
//!     engine.dispatch(Event::add_player(format!("Player {i}")));
//!     engine.dispatch(Event::assign(PlayerId::new(i as u32), character));
//! }
//!
//! let snapshot = engine.dispatch(Event::StartGame);
//! assert_eq!(snapshot.path(), "night");
//! assert_eq!(snapshot.context.current_night, 1);
//! ```

pub mod abilities;
pub mod characters;
pub mod core;
pub mod machine;
pub mod night;
pub mod persist;
pub mod rules;
pub mod voting;

// Re-export commonly used types
pub use crate::core::{
    EngineConfig, EntryKind, GameContext, GameRng, GameRngState, HistoryEntry, Player, PlayerId, Roster,
    StatusFlags,
};

pub use crate::characters::{Alignment, CharacterDefinition, CharacterId, RoleDistribution, SetupError, Team};

pub use crate::abilities::{AbilityData, AbilityError, AbilityResult, Effect, TargetSpec};

pub use crate::night::{NightAction, NightQueue};

pub use crate::voting::{execution_threshold, ClockwiseVoting, NominationRecord, VoteError};

pub use crate::rules::{EndReason, GameEnd};

pub use crate::machine::{transition, DayPhase, Engine, Event, Phase, Rejection, Snapshot};

pub use crate::persist::{PersistError, SaveFile};
