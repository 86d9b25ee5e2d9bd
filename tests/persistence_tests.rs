//! Persistence integration tests.
//!
//! These tests verify that contexts and snapshots survive JSON and binary
//! round-trips, that a restored engine carries on exactly like the
//! original, and that bad saves never reach an engine.

use storyteller::characters::CharacterId::{self, *};
use storyteller::persist::{
    restore_binary, restore_json, save_binary, save_json, try_restore_json, AdvisorySummary, PersistError,
    RoleSuggestion, SyncRecord,
};
use storyteller::{Engine, EngineConfig, Event, GameContext, PlayerId, Snapshot};

fn id(n: u32) -> PlayerId {
    PlayerId::new(n)
}

fn started(characters: &[CharacterId]) -> Engine {
    let mut engine = Engine::default();
    for (i, character) in characters.iter().enumerate() {
        engine.dispatch(Event::add_player(format!("P{i}")));
        engine.dispatch(Event::assign(id(i as u32), *character));
    }
    engine.dispatch(Event::StartGame);
    engine
}

/// A game paused mid-vote on day 1, with a poisoned Empath and a ghost.
fn mid_vote() -> Engine {
    let mut engine = started(&[Imp, Poisoner, Empath, Chef, Saint, Monk]);
    engine.dispatch(Event::use_ability(id(1), [id(2)]));
    engine.dispatch(Event::use_ability(id(0), [id(5)]));
    engine.dispatch(Event::EndNight);
    engine.dispatch(Event::EnterNomination);
    engine.dispatch(Event::nominate(id(3), id(4)));
    engine.dispatch(Event::vote(id(0), true));
    engine.dispatch(Event::vote(id(2), false));
    engine.dispatch(Event::vote(id(5), true));
    engine
}

// ============================================================================
// JSON
// ============================================================================

/// Test that a context survives JSON unchanged, nested maps included.
#[test]
fn test_context_json_round_trip() {
    let engine = mid_vote();
    let ctx = engine.context();
    assert_eq!(ctx.current_votes.len(), 3);
    assert!(ctx.players.get(id(2)).unwrap().status.poisoned);

    let json = serde_json::to_string(ctx).unwrap();
    let back: GameContext = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, ctx);
}

/// Test the JSON field names other clients rely on.
#[test]
fn test_context_json_shape() {
    let engine = mid_vote();
    let value = serde_json::to_value(engine.snapshot()).unwrap();

    assert_eq!(value["value"], "day.vote");
    let ctx = &value["context"];
    assert_eq!(ctx["currentDay"], 1);
    assert_eq!(ctx["currentVotes"]["0"], true);
    assert_eq!(ctx["currentVotes"]["2"], false);
    assert_eq!(ctx["players"][2]["statusFlags"]["poisoned"], true);
    assert_eq!(ctx["players"][5]["hasUsedGhostVote"], true);
    assert_eq!(ctx["players"][4]["characterId"], "saint");
}

/// Test that a save file restores to the same snapshot.
#[test]
fn test_save_round_trip() {
    let snapshot = mid_vote().snapshot();
    let json = save_json(&snapshot).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    for field in storyteller::persist::REQUIRED_FIELDS {
        assert!(value.get(field).is_some(), "missing {field}");
    }
    assert_eq!(value["phase"], "day.vote");
    assert_eq!(value["aliveCount"], 5);

    assert_eq!(restore_json(&json).unwrap(), snapshot);
}

/// Test that a restored engine replays exactly like the original.
#[test]
fn test_restored_engine_is_deterministic() {
    let mut original = mid_vote();
    let json = save_json(&original.snapshot()).unwrap();
    let mut restored = Engine::from_snapshot(restore_json(&json).unwrap(), EngineConfig::default());

    let events = [
        Event::FinishVote,
        Event::EndDay,
        Event::use_ability(id(2), []),
        Event::use_ability(id(2), []),
        Event::use_ability(id(3), []),
    ];
    for event in events {
        let a = original.dispatch(event.clone());
        let b = restored.dispatch(event);
        assert_eq!(a, b);
    }
}

/// Test that a corrupt or foreign save is refused without touching the game.
#[test]
fn test_bad_saves_refused() {
    let engine = mid_vote();
    let before = engine.snapshot();

    assert_eq!(try_restore_json("not a save"), None);
    assert_eq!(try_restore_json(r#"{"version": 1}"#), None);

    let mut value = serde_json::to_value(storyteller::SaveFile::from_snapshot(&before)).unwrap();
    value.as_object_mut().unwrap().remove("sessionId");
    assert!(matches!(
        restore_json(&value.to_string()),
        Err(PersistError::MissingField("sessionId"))
    ));

    assert_eq!(engine.snapshot(), before);
}

// ============================================================================
// Binary
// ============================================================================

/// Test that the binary image restores to the same snapshot.
#[test]
fn test_binary_round_trip() {
    let snapshot: Snapshot = mid_vote().snapshot();
    let bytes = save_binary(&snapshot).unwrap();
    assert_eq!(restore_binary(&bytes).unwrap(), snapshot);
    assert!(restore_binary(&[1, 2, 3]).is_err());
}

// ============================================================================
// Read-only views
// ============================================================================

/// Test that listeners can mirror every accepted event as a sync record.
#[test]
fn test_sync_records_follow_dispatch() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let records = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&records);

    let mut engine = Engine::default();
    engine.subscribe(move |snapshot| sink.borrow_mut().push(SyncRecord::from_snapshot(snapshot)));
    for (i, character) in [Imp, Chef, Empath].into_iter().enumerate() {
        engine.dispatch(Event::add_player(format!("P{i}")));
        engine.dispatch(Event::assign(id(i as u32), character));
    }
    engine.dispatch(Event::StartGame);
    engine.dispatch(Event::kill(id(1)));

    let records = records.borrow();
    assert_eq!(records.len(), 8);
    let last = records.last().unwrap();
    assert_eq!(last.phase, "night");
    assert!(last.players[1].is_dead);
    assert_eq!(last.session_id, engine.context().session_id);
}

/// Test that an advisor's suggestions go through ordinary dispatch.
#[test]
fn test_advisor_round_trip() {
    let mut engine = Engine::default();
    for name in ["Ann", "Ben", "Cat", "Dan", "Eve"] {
        engine.dispatch(Event::add_player(name));
    }

    let summary = AdvisorySummary::from_context(engine.context());
    assert_eq!(summary.expected.unwrap().townsfolk, 3);
    assert_eq!(summary.unassigned_characters.len(), 22);

    let suggestions = [Imp, Poisoner, Chef, Empath, Monk]
        .into_iter()
        .enumerate()
        .map(|(i, character)| RoleSuggestion {
            player_id: id(i as u32),
            character_id: character,
            rationale: None,
        });
    for suggestion in suggestions {
        engine.try_dispatch(suggestion.into_event()).unwrap();
    }

    let summary = AdvisorySummary::from_context(engine.context());
    assert_eq!(summary.assigned.minion, 1);
    assert_eq!(summary.assigned.demon, 1);
    assert_eq!(summary.assigned.townsfolk, 3);
    assert_eq!(engine.dispatch(Event::StartGame).path(), "night");
}
