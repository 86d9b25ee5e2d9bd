//! The phase state machine.
//!
//! - `Phase`: setup, night, the day sub-states, execution, game over
//! - `Event`: everything the storyteller can do
//! - `transition`: pure `(phase, context, event) -> (phase, context)`
//! - `Engine`: holds the current state, dispatches, notifies listeners
//!
//! Illegal events are rejected by their guard and leave the state as it
//! was. No I/O happens inside the machine; all side effects are context
//! changes and history entries.

mod engine;
mod event;
mod phase;
mod rejection;
mod transition;

pub use engine::{Engine, Snapshot};
pub use event::{Event, Targets};
pub use phase::{DayPhase, Phase, UnknownPhase};
pub use rejection::Rejection;
pub use transition::transition;
