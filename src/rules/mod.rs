//! Game rules evaluated after the roster changes.
//!
//! - `win`: end-of-game predicates and the combined evaluator
//! - `transform`: the Scarlet Woman taking over a dead Demon
//!
//! Both are pure functions of the roster and configuration; the state
//! machine decides when to call them and records the results.

pub mod transform;
pub mod win;

pub use transform::{scarlet_woman_transform, Transform};
pub use win::{evaluate, EndReason, GameEnd, WinCheck};
