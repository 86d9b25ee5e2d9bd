//! Ability resolution for the Trouble Brewing characters.
//!
//! - `resolve`: run a character's ability and collect its effects
//! - `Effect`: atomic roster changes produced by abilities
//! - `TargetSpec`: how many and which players an ability may choose
//! - `EffectResolver`: applies effects to the roster
//!
//! ## Failure
//!
//! Expected rule violations (no target, dead target, self target, wrong
//! target count) come back as `AbilityResult { success: false, .. }`.
//! Handlers return `Result`, so there is nothing to catch.

mod effect;
pub mod info;
mod outcome;
mod resolver;
mod targeting;

pub use effect::Effect;
pub use outcome::{AbilityData, AbilityError, AbilityResult, GrimoireEntry};
pub use resolver::{resolve, AbilityContext, EffectResolver, Resolution, ResolveResult, MASTER_PREFIX, SLAYER_USED};
pub use targeting::{target_spec, TargetCount, TargetFilter, TargetSpec};
