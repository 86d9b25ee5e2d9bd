//! Character system: definitions, catalog, setup distribution.
//!
//! ## Key Types
//!
//! - `CharacterId`: Closed enum of the 22 Trouble Brewing characters
//! - `Team` / `Alignment`: Townsfolk + Outsider are good, Minion + Demon evil
//! - `CharacterDefinition`: Static data (team, night order, ability text)
//! - `RoleDistribution`: Team counts per player count
//!
//! The catalog is never mutated at runtime.

pub mod catalog;
pub mod definition;
pub mod distribution;

pub use definition::{Alignment, CharacterDefinition, CharacterId, Team, UnknownCharacter};
pub use distribution::{check_distribution, team_counts, validate_setup, RoleDistribution, SetupError};
