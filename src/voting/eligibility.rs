//! Who may nominate, be nominated, and vote.

use crate::core::{GameContext, PlayerId};

/// Why a nomination or vote was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VoteError {
    #[error("{0} is not seated")]
    UnknownPlayer(PlayerId),

    #[error("{0} is dead and has spent their ghost vote")]
    CannotVote(PlayerId),

    #[error("{0} is dead and cannot be nominated")]
    NomineeDead(PlayerId),

    #[error("{0} was already nominated today")]
    AlreadyNominated(PlayerId),

    #[error("{0} already nominated today")]
    AlreadyNominator(PlayerId),

    #[error("no nomination is being voted on")]
    NoNomination,

    #[error("it is {expected}'s turn to vote, not {got}'s")]
    OutOfTurn { expected: PlayerId, got: PlayerId },

    #[error("{0} has not voted yet")]
    NotVoted(PlayerId),

    #[error("{0} has already voted")]
    AlreadyVoted(PlayerId),

    #[error("already at the last voter")]
    EndOfOrder,

    #[error("already at the first voter")]
    StartOfOrder,
}

/// A voter must be seated and alive, or a ghost with a vote left.
pub fn check_voter(ctx: &GameContext, voter: PlayerId) -> Result<(), VoteError> {
    let player = ctx.players.get(voter).ok_or(VoteError::UnknownPlayer(voter))?;
    if player.can_vote() {
        Ok(())
    } else {
        Err(VoteError::CannotVote(voter))
    }
}

/// A nominator must be able to vote and not have nominated today.
pub fn check_nominator(ctx: &GameContext, nominator: PlayerId) -> Result<(), VoteError> {
    check_voter(ctx, nominator)?;
    if ctx.nominators_today.contains(&nominator) {
        return Err(VoteError::AlreadyNominator(nominator));
    }
    Ok(())
}

/// A nominee must be seated, alive, and not nominated today.
pub fn check_nominee(ctx: &GameContext, nominee: PlayerId) -> Result<(), VoteError> {
    let player = ctx.players.get(nominee).ok_or(VoteError::UnknownPlayer(nominee))?;
    if !player.is_alive() {
        return Err(VoteError::NomineeDead(nominee));
    }
    if ctx.nominated_today.contains(&nominee) {
        return Err(VoteError::AlreadyNominated(nominee));
    }
    Ok(())
}

/// Both sides of a nomination.
pub fn check_nomination(ctx: &GameContext, nominator: PlayerId, nominee: PlayerId) -> Result<(), VoteError> {
    check_nominator(ctx, nominator)?;
    check_nominee(ctx, nominee)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineConfig;

    fn ctx_with(n: u32) -> GameContext {
        let mut ctx = GameContext::new(&EngineConfig::default());
        for i in 0..n {
            ctx.players.add(PlayerId::new(i), format!("P{i}"));
        }
        ctx
    }

    #[test]
    fn test_living_player_can_nominate() {
        let ctx = ctx_with(3);
        assert_eq!(check_nomination(&ctx, PlayerId::new(0), PlayerId::new(1)), Ok(()));
    }

    #[test]
    fn test_ghost_with_vote_can_nominate() {
        let mut ctx = ctx_with(3);
        ctx.players.get_mut(PlayerId::new(0)).unwrap().kill();
        assert_eq!(check_nominator(&ctx, PlayerId::new(0)), Ok(()));

        ctx.players.get_mut(PlayerId::new(0)).unwrap().record_vote();
        assert_eq!(
            check_nominator(&ctx, PlayerId::new(0)),
            Err(VoteError::CannotVote(PlayerId::new(0)))
        );
    }

    #[test]
    fn test_dead_nominee_refused() {
        let mut ctx = ctx_with(3);
        ctx.players.get_mut(PlayerId::new(1)).unwrap().kill();
        assert_eq!(
            check_nominee(&ctx, PlayerId::new(1)),
            Err(VoteError::NomineeDead(PlayerId::new(1)))
        );
    }

    #[test]
    fn test_once_per_day() {
        let mut ctx = ctx_with(3);
        ctx.nominated_today.push_back(PlayerId::new(1));
        ctx.nominators_today.push_back(PlayerId::new(0));

        assert_eq!(
            check_nominee(&ctx, PlayerId::new(1)),
            Err(VoteError::AlreadyNominated(PlayerId::new(1)))
        );
        assert_eq!(
            check_nominator(&ctx, PlayerId::new(0)),
            Err(VoteError::AlreadyNominator(PlayerId::new(0)))
        );
    }

    #[test]
    fn test_unknown_player() {
        let ctx = ctx_with(2);
        assert_eq!(
            check_voter(&ctx, PlayerId::new(5)),
            Err(VoteError::UnknownPlayer(PlayerId::new(5)))
        );
    }
}
