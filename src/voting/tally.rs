//! Vote counting and execution thresholds.
//!
//! ## Threshold
//!
//! A nomination needs at least half the living players, rounded up, and
//! never fewer than one vote.
//!
//! ## Pending Execution
//!
//! A passing nomination only replaces the day's execution target if it
//! has strictly more votes than the current one. A tie keeps the earlier
//! target.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::eligibility::VoteError;
use crate::core::{EntryKind, GameContext, PlayerId};

/// Minimum "for" votes to put a nominee up for execution.
#[must_use]
pub fn execution_threshold(alive_count: usize) -> usize {
    alive_count.div_ceil(2).max(1)
}

/// Counted votes for one nomination.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub votes_for: usize,
    pub votes_against: usize,
    /// Players who voted for, in id order.
    pub voters: Vec<PlayerId>,
}

impl Tally {
    /// Count a vote map.
    #[must_use]
    pub fn count(votes: &OrdMap<PlayerId, bool>) -> Self {
        let mut tally = Self::default();
        for (voter, vote) in votes {
            if *vote {
                tally.votes_for += 1;
                tally.voters.push(*voter);
            } else {
                tally.votes_against += 1;
            }
        }
        tally
    }

    /// Meets the threshold and beats the day's best so far.
    #[must_use]
    pub fn passes(&self, threshold: usize, highest_vote_count: usize) -> bool {
        self.votes_for >= threshold && self.votes_for > highest_vote_count
    }
}

/// Permanent record of a concluded nomination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NominationRecord {
    pub day: u32,
    pub nominator: PlayerId,
    pub nominee: PlayerId,
    pub votes_for: usize,
    pub votes_against: usize,
    /// Players who voted for.
    pub voters: Vec<PlayerId>,
    pub threshold: usize,
    /// The nominee became the pending execution.
    pub became_target: bool,
    /// Voted seat by seat.
    pub clockwise: bool,
}

/// Close the current nomination.
///
/// Tallies `current_votes`, updates the execution target, appends the
/// record to the nomination history, then clears the nomination fields
/// and the votes.
pub fn conclude_nomination(ctx: &mut GameContext, clockwise: bool) -> Result<NominationRecord, VoteError> {
    let (Some(nominator), Some(nominee)) = (ctx.current_nominator_id, ctx.current_nominee_id) else {
        return Err(VoteError::NoNomination);
    };

    let tally = Tally::count(&ctx.current_votes);
    let threshold = execution_threshold(ctx.alive_count);
    let became_target = tally.passes(threshold, ctx.highest_vote_count);
    if became_target {
        ctx.execution_target = Some(nominee);
        ctx.highest_vote_count = tally.votes_for;
    }

    let record = NominationRecord {
        day: ctx.current_day,
        nominator,
        nominee,
        votes_for: tally.votes_for,
        votes_against: tally.votes_against,
        voters: tally.voters,
        threshold,
        became_target,
        clockwise,
    };
    ctx.nomination_history.push_back(record.clone());

    let verdict = if became_target { "is up for execution" } else { "is safe" };
    let message = format!(
        "{} received {} of {} needed votes and {}",
        ctx.name_of(nominee),
        record.votes_for,
        threshold,
        verdict
    );
    ctx.log(EntryKind::Nomination, message);
    ctx.clear_nomination();
    Ok(record)
}
