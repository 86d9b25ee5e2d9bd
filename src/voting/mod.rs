//! Nomination and voting.
//!
//! - `eligibility`: who may nominate, be nominated, and vote
//! - `tally`: thresholds, counting, and concluding a nomination
//! - `clockwise`: the seat-ordered voting variant
//!
//! Ghost votes: a dead player may vote (and nominate) until they cast
//! one vote while dead. That vote is spent whichever way it went.

pub mod clockwise;
pub mod eligibility;
pub mod tally;

pub use clockwise::ClockwiseVoting;
pub use eligibility::{check_nomination, check_nominee, check_nominator, check_voter, VoteError};
pub use tally::{conclude_nomination, execution_threshold, NominationRecord, Tally};
