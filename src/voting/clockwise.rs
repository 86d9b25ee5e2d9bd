//! Seat-ordered ("clockwise") voting.
//!
//! Voting starts with the seat after the nominee and goes around the
//! circle, ending with the nominee. A cursor marks whose turn it is.
//! Votes are tallied exactly like simultaneous votes, so the result only
//! depends on the final set of votes.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::eligibility::VoteError;
use crate::core::PlayerId;

/// Sub-state of a clockwise vote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockwiseVoting {
    /// Every seated player, in voting order.
    pub vote_order: Vec<PlayerId>,

    /// Cursor into `vote_order`.
    pub current_vote_index: usize,

    /// Votes cast so far.
    pub votes: OrdMap<PlayerId, bool>,
}

impl ClockwiseVoting {
    /// Start a vote with the given order.
    #[must_use]
    pub fn new(vote_order: Vec<PlayerId>) -> Self {
        Self {
            vote_order,
            current_vote_index: 0,
            votes: OrdMap::new(),
        }
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_voter(&self) -> Option<PlayerId> {
        self.vote_order.get(self.current_vote_index).copied()
    }

    /// Has this player voted in this round?
    #[must_use]
    pub fn has_voted(&self, id: PlayerId) -> bool {
        self.votes.contains_key(&id)
    }

    /// Record the current voter's vote.
    pub fn record(&mut self, voter: PlayerId, vote: bool) -> Result<(), VoteError> {
        let expected = self.current_voter().ok_or(VoteError::EndOfOrder)?;
        if voter != expected {
            return Err(VoteError::OutOfTurn { expected, got: voter });
        }
        self.votes.insert(voter, vote);
        Ok(())
    }

    /// Move to the next voter.
    ///
    /// Allowed once the current voter has voted, or straight away if
    /// `current_can_vote` is false (spent ghosts are passed over).
    pub fn next(&mut self, current_can_vote: bool) -> Result<PlayerId, VoteError> {
        let current = self.current_voter().ok_or(VoteError::EndOfOrder)?;
        if current_can_vote && !self.has_voted(current) {
            return Err(VoteError::NotVoted(current));
        }
        if self.current_vote_index + 1 >= self.vote_order.len() {
            return Err(VoteError::EndOfOrder);
        }
        self.current_vote_index += 1;
        Ok(self.vote_order[self.current_vote_index])
    }

    /// Step back to the previous voter.
    ///
    /// Only while the current voter has not voted.
    pub fn previous(&mut self) -> Result<PlayerId, VoteError> {
        let current = self.current_voter().ok_or(VoteError::EndOfOrder)?;
        if self.has_voted(current) {
            return Err(VoteError::AlreadyVoted(current));
        }
        if self.current_vote_index == 0 {
            return Err(VoteError::StartOfOrder);
        }
        self.current_vote_index -= 1;
        Ok(self.vote_order[self.current_vote_index])
    }

    /// The cursor is on the final seat.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current_vote_index + 1 >= self.vote_order.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(raw: &[u32]) -> ClockwiseVoting {
        ClockwiseVoting::new(raw.iter().copied().map(PlayerId::new).collect())
    }

    #[test]
    fn test_record_in_turn_only() {
        let mut cw = order(&[3, 4, 0]);
        assert_eq!(cw.current_voter(), Some(PlayerId::new(3)));
        assert_eq!(
            cw.record(PlayerId::new(4), true),
            Err(VoteError::OutOfTurn { expected: PlayerId::new(3), got: PlayerId::new(4) })
        );
        assert_eq!(cw.record(PlayerId::new(3), true), Ok(()));
        assert!(cw.has_voted(PlayerId::new(3)));
    }

    #[test]
    fn test_next_requires_vote() {
        let mut cw = order(&[3, 4, 0]);
        assert_eq!(cw.next(true), Err(VoteError::NotVoted(PlayerId::new(3))));

        cw.record(PlayerId::new(3), false).unwrap();
        assert_eq!(cw.next(true), Ok(PlayerId::new(4)));
    }

    #[test]
    fn test_next_skips_ineligible() {
        let mut cw = order(&[3, 4, 0]);
        assert_eq!(cw.next(false), Ok(PlayerId::new(4)));
    }

    #[test]
    fn test_next_stops_at_end() {
        let mut cw = order(&[3, 4]);
        cw.next(false).unwrap();
        assert!(cw.is_last());
        assert_eq!(cw.next(false), Err(VoteError::EndOfOrder));
    }

    #[test]
    fn test_previous() {
        let mut cw = order(&[3, 4, 0]);
        assert_eq!(cw.previous(), Err(VoteError::StartOfOrder));

        cw.next(false).unwrap();
        assert_eq!(cw.previous(), Ok(PlayerId::new(3)));

        cw.record(PlayerId::new(3), true).unwrap();
        assert_eq!(cw.previous(), Err(VoteError::AlreadyVoted(PlayerId::new(3))));
    }
}
