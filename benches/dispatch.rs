//! Benchmarks for night queue building and event dispatch.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use storyteller::characters::CharacterId;
use storyteller::{Engine, Event, NightQueue, Player, PlayerId, Roster};

fn table(n: usize) -> Vec<CharacterId> {
    let mut characters: Vec<CharacterId> = CharacterId::ALL
        .into_iter()
        .filter(|c| *c != CharacterId::Imp)
        .take(n - 1)
        .collect();
    characters.insert(0, CharacterId::Imp);
    characters
}

fn roster(n: usize) -> Roster {
    Roster::from_players(
        table(n)
            .into_iter()
            .enumerate()
            .map(|(i, c)| Player::new(PlayerId::new(i as u32), format!("P{i}"), i).with_character(c)),
    )
}

fn bench_queue_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("night_queue");
    for n in [5, 10, 15] {
        let players = roster(n);
        group.bench_with_input(BenchmarkId::new("first_night", n), &players, |b, players| {
            b.iter(|| NightQueue::build(black_box(players), true, 1));
        });
        group.bench_with_input(BenchmarkId::new("other_night", n), &players, |b, players| {
            b.iter(|| NightQueue::build(black_box(players), false, 2));
        });
    }
    group.finish();
}

/// One full day: a nomination with every player voting, then dusk.
fn day_events(n: usize) -> Vec<Event> {
    let mut events = vec![
        Event::EnterNomination,
        Event::nominate(PlayerId::new(1), PlayerId::new(2)),
    ];
    events.extend((0..n as u32).map(|v| Event::vote(PlayerId::new(v), v % 2 == 0)));
    events.push(Event::FinishVote);
    events
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    for n in [5, 15] {
        let mut engine = Engine::default();
        for (i, character) in table(n).into_iter().enumerate() {
            engine.dispatch(Event::add_player(format!("P{i}")));
            engine.dispatch(Event::assign(PlayerId::new(i as u32), character));
        }
        engine.dispatch(Event::StartGame);
        engine.dispatch(Event::EndNight);
        let start = engine.snapshot();
        let events = day_events(n);

        group.bench_with_input(BenchmarkId::new("vote_round", n), &events, |b, events| {
            b.iter(|| {
                let mut engine = Engine::from_snapshot(start.clone(), engine.config().clone());
                engine.dispatch_all(events.iter().cloned())
            });
        });
    }

    group.bench_function("snapshot_clone", |b| {
        let mut engine = Engine::default();
        for i in 0..15 {
            engine.dispatch(Event::add_player(format!("P{i}")));
        }
        b.iter(|| black_box(engine.snapshot()));
    });
    group.finish();
}

criterion_group!(benches, bench_queue_build, bench_dispatch);
criterion_main!(benches);
