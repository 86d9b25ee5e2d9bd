//! Why an event was ignored.

use super::phase::Phase;
use crate::core::PlayerId;
use crate::voting::VoteError;

/// A failed guard. The machine stays where it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("{event} is not accepted in {phase}")]
    WrongPhase { event: &'static str, phase: Phase },

    #[error("{0} is not seated")]
    UnknownPlayer(PlayerId),

    #[error("{0} has no character")]
    Unassigned(PlayerId),

    #[error("cannot start a game with no players")]
    EmptyRoster,

    #[error("tonight's queue is already complete")]
    NightComplete,

    #[error("{0} is already dead")]
    AlreadyDead(PlayerId),

    #[error("{0} is not dead")]
    NotDead(PlayerId),

    #[error("a player was already executed today")]
    AlreadyExecuted,

    #[error("nobody is up for execution")]
    NoExecutionTarget,

    #[error(transparent)]
    Vote(#[from] VoteError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::DayPhase;

    #[test]
    fn test_messages() {
        let wrong = Rejection::WrongPhase {
            event: "EXECUTE",
            phase: Phase::Day(DayPhase::Vote),
        };
        assert_eq!(wrong.to_string(), "EXECUTE is not accepted in day.vote");

        let vote: Rejection = VoteError::NoNomination.into();
        assert_eq!(vote.to_string(), "no nomination is being voted on");
    }
}
