//! Property tests.
//!
//! Randomized checks of the night queue order, once-per-day nominations,
//! single-use ghost votes, the execution threshold, and agreement between
//! simultaneous and clockwise voting.

use proptest::prelude::*;

use storyteller::characters::{catalog, CharacterId};
use storyteller::{execution_threshold, Engine, Event, NightQueue, Phase, Player, PlayerId, Roster};

fn id(n: usize) -> PlayerId {
    PlayerId::new(n as u32)
}

/// Engine on day 1 with `n` players: an Imp in seat 0, Chefs elsewhere.
fn day_one(n: usize) -> Engine {
    let mut engine = Engine::default();
    for i in 0..n {
        let character = if i == 0 { CharacterId::Imp } else { CharacterId::Chef };
        engine.dispatch(Event::add_player(format!("P{i}")));
        engine.dispatch(Event::assign(id(i), character));
    }
    engine.dispatch(Event::StartGame);
    engine.dispatch(Event::EndNight);
    engine
}

fn table() -> impl Strategy<Value = Vec<(CharacterId, bool)>> {
    (5usize..=15).prop_flat_map(|n| {
        prop::collection::vec(
            (prop::sample::select(CharacterId::ALL.to_vec()), prop::bool::weighted(0.2)),
            n,
        )
    })
}

proptest! {
    /// Queues only hold characters that wake tonight, in non-decreasing order.
    #[test]
    fn prop_queue_order(seats in table(), is_first_night in any::<bool>()) {
        let roster = Roster::from_players(seats.iter().enumerate().map(|(i, (character, dead))| {
            let mut player = Player::new(id(i), format!("P{i}"), i).with_character(*character);
            if *dead {
                player.kill();
            }
            player
        }));
        let queue = NightQueue::build(&roster, is_first_night, 1);

        for action in &queue.actions {
            let def = catalog::definition(action.character_id);
            prop_assert!(def.wakes(is_first_night));
            prop_assert_eq!(action.order, def.night_order(is_first_night));
            prop_assert!(action.player_ids.iter().all(|p| roster.get(*p).is_some_and(|p| p.is_alive())));
        }
        prop_assert!(queue.actions.windows(2).all(|w| w[0].order <= w[1].order));

        let expected = seats
            .iter()
            .filter(|(character, dead)| !dead && catalog::definition(*character).wakes(is_first_night))
            .count();
        prop_assert_eq!(queue.len(), expected);
    }

    /// Nominees and nominators appear at most once per day.
    #[test]
    fn prop_nominations_once_per_day(
        n in 5usize..=15,
        attempts in prop::collection::vec((0usize..15, 0usize..15), 1..30),
    ) {
        let mut engine = day_one(n);
        for (nominator, nominee) in attempts {
            engine.dispatch(Event::EnterNomination);
            engine.dispatch(Event::nominate(id(nominator % n), id(nominee % n)));
            match engine.phase() {
                Phase::Day(storyteller::DayPhase::Vote) => engine.dispatch(Event::FinishVote),
                _ => engine.dispatch(Event::CancelNomination),
            };

            let ctx = engine.context();
            let mut nominees: Vec<_> = ctx.nominated_today.iter().copied().collect();
            let mut nominators: Vec<_> = ctx.nominators_today.iter().copied().collect();
            let (before_nominees, before_nominators) = (nominees.len(), nominators.len());
            nominees.sort();
            nominees.dedup();
            nominators.sort();
            nominators.dedup();
            prop_assert_eq!(nominees.len(), before_nominees);
            prop_assert_eq!(nominators.len(), before_nominators);
            prop_assert_eq!(ctx.nomination_history.len(), before_nominees);
        }
    }

    /// A ghost's vote is accepted exactly once and stays spent.
    #[test]
    fn prop_ghost_vote_single_use(
        n in 5usize..=15,
        ghost in 1usize..15,
        votes in prop::collection::vec(any::<bool>(), 1..6),
    ) {
        let ghost = id(1 + ghost % (n - 1));
        let nominee = if ghost == id(1) { id(2) } else { id(1) };
        let mut engine = day_one(n);
        engine.dispatch(Event::kill(ghost));

        let mut accepted = 0;
        for vote in votes {
            engine.dispatch(Event::EnterNomination);
            engine.dispatch(Event::nominate(id(0), nominee));
            prop_assert_eq!(engine.phase(), Phase::Day(storyteller::DayPhase::Vote));

            if engine.try_dispatch(Event::vote(ghost, vote)).is_ok() {
                accepted += 1;
            }
            prop_assert!(engine.context().players.get(ghost).unwrap().has_used_ghost_vote);

            engine.dispatch(Event::FinishVote);
            engine.dispatch(Event::EndDay);
            engine.dispatch(Event::EndNight);
        }
        prop_assert_eq!(accepted, 1);
    }

    /// The threshold is a strict majority rounded up, never below one.
    #[test]
    fn prop_threshold(alive in 0usize..500) {
        let threshold = execution_threshold(alive);
        prop_assert_eq!(threshold, alive.div_ceil(2).max(1));
        prop_assert!(2 * threshold >= alive);
        prop_assert!(threshold <= alive.max(1));
    }

    /// Clockwise and simultaneous voting reach the same decision.
    #[test]
    fn prop_clockwise_matches_simultaneous(
        n in 5usize..=12,
        nominee in 0usize..12,
        votes in prop::collection::vec(any::<bool>(), 12),
    ) {
        let nominee = nominee % n;
        let nominator = (nominee + 1) % n;

        let mut plain = day_one(n);
        plain.dispatch(Event::EnterNomination);
        plain.dispatch(Event::nominate(id(nominator), id(nominee)));
        for (voter, vote) in votes.iter().take(n).enumerate() {
            plain.try_dispatch(Event::vote(id(voter), *vote)).unwrap();
        }
        let plain = plain.dispatch(Event::FinishVote);

        let mut clockwise = day_one(n);
        clockwise.dispatch(Event::EnableClockwiseVoting);
        clockwise.dispatch(Event::EnterNomination);
        clockwise.dispatch(Event::nominate(id(nominator), id(nominee)));
        for step in 0..n {
            if step > 0 {
                clockwise.try_dispatch(Event::ClockwiseNext).unwrap();
            }
            let voter = (nominee + 1 + step) % n;
            clockwise.try_dispatch(Event::clockwise_vote(id(voter), votes[voter])).unwrap();
        }
        let clockwise = clockwise.dispatch(Event::FinishClockwiseVote);

        prop_assert_eq!(plain.context.execution_target, clockwise.context.execution_target);
        let (a, b) = (&plain.context.nomination_history[0], &clockwise.context.nomination_history[0]);
        prop_assert_eq!(a.votes_for, b.votes_for);
        prop_assert_eq!(a.votes_against, b.votes_against);
        prop_assert_eq!(&a.voters, &b.voters);
    }
}
