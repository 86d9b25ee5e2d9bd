//! Night phase: which characters wake, and in what order.
//!
//! `NightQueue` is rebuilt from the roster every night and discarded at
//! dawn; it is never carried from one night to the next.

mod queue;

pub use queue::{NightAction, NightQueue};
