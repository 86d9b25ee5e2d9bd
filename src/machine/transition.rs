//! The transition function.
//!
//! `transition(phase, context, event, config)` is pure: it clones the
//! context (cheap, the collections are persistent), applies the event to
//! the clone, and returns the new phase and context. A failed guard
//! returns a [`Rejection`] and the caller keeps the old state.
//!
//! ## Table
//!
//! | Phase | Events |
//! |---|---|
//! | `setup` | ADD_PLAYER, REMOVE_PLAYER, ASSIGN_ROLE, START_GAME |
//! | `night` | PROCEED/SKIP_NIGHT_ACTION, KILL/REVIVE_PLAYER, USE_ABILITY, END_NIGHT |
//! | `day.discussion` | ENTER_NOMINATION, END_DAY, USE_ABILITY, KILL/REVIVE_PLAYER |
//! | `day.nomination` | NOMINATE, CANCEL_NOMINATION, KILL/REVIVE_PLAYER |
//! | `day.vote` | CAST_VOTE, FINISH_VOTE, KILL/REVIVE_PLAYER |
//! | `day.clockwiseVote` | CLOCKWISE_VOTE/NEXT/PREVIOUS, FINISH_CLOCKWISE_VOTE, KILL/REVIVE_PLAYER |
//! | `execution` | EXECUTE, SKIP_EXECUTION |
//! | any but `gameOver` | END_GAME, ENABLE_CLOCKWISE_VOTING |
//! | any but `setup`, `gameOver` | CHECK_GAME_END |
//!
//! After every death the Scarlet Woman transform is applied first, then
//! the win conditions are evaluated.

use im::OrdMap;

use super::event::Event;
use super::phase::{DayPhase, Phase};
use super::rejection::Rejection;
use crate::abilities::{self, AbilityContext, Effect, EffectResolver, Resolution};
use crate::core::{EngineConfig, EntryKind, GameContext, GameRng, PlayerId};
use crate::night::NightQueue;
use crate::rules::{self, evaluate, EndReason, GameEnd, WinCheck};
use crate::voting::{self, ClockwiseVoting, VoteError};

/// Apply an event.
pub fn transition(
    phase: Phase,
    ctx: &GameContext,
    event: &Event,
    config: &EngineConfig,
) -> Result<(Phase, GameContext), Rejection> {
    let mut next = ctx.clone();
    let phase = step(phase, &mut next, event, config)?;
    next.refresh_alive_count();
    Ok((phase, next))
}

fn step(phase: Phase, ctx: &mut GameContext, event: &Event, config: &EngineConfig) -> Result<Phase, Rejection> {
    use DayPhase::{ClockwiseVote, Discussion, Nomination, Vote};

    let wrong = || Rejection::WrongPhase {
        event: event.name(),
        phase,
    };

    match (phase, event) {
        (Phase::GameOver, _) => Err(wrong()),

        // === Any live phase ===
        (_, Event::EndGame { winner, reason }) => Ok(end_game(
            ctx,
            GameEnd::new(*winner, EndReason::Declared { reason: reason.clone() }),
        )),
        (_, Event::EnableClockwiseVoting) => {
            if !ctx.clockwise_enabled {
                ctx.clockwise_enabled = true;
                ctx.log(EntryKind::Phase, "Clockwise voting enabled");
            }
            Ok(phase)
        }
        (Phase::Setup, Event::CheckGameEnd) => Err(wrong()),
        (_, Event::CheckGameEnd) => {
            let check = WinCheck::full(ctx.executed_today);
            Ok(match evaluate(&ctx.players, check, config) {
                Some(end) => end_game(ctx, end),
                None => phase,
            })
        }

        // === Setup ===
        (Phase::Setup, Event::AddPlayer { name }) => {
            let id = PlayerId::new(ctx.next_player_id);
            ctx.next_player_id += 1;
            let seat = ctx.players.add(id, name.clone());
            ctx.log(EntryKind::Setup, format!("{name} takes seat {seat}"));
            Ok(phase)
        }
        (Phase::Setup, Event::RemovePlayer { player_id }) => {
            let removed = ctx
                .players
                .remove(*player_id)
                .ok_or(Rejection::UnknownPlayer(*player_id))?;
            ctx.log(EntryKind::Setup, format!("{} leaves the circle", removed.name));
            Ok(phase)
        }
        (Phase::Setup, Event::AssignRole { player_id, character_id }) => {
            let player = ctx
                .players
                .get_mut(*player_id)
                .ok_or(Rejection::UnknownPlayer(*player_id))?;
            player.character_id = Some(*character_id);
            let message = format!("{} is the {character_id}", player.name);
            ctx.log(EntryKind::Setup, message);
            Ok(phase)
        }
        (Phase::Setup, Event::StartGame) => start_game(ctx),

        // === Night ===
        (Phase::Night, Event::ProceedNightAction) => advance_queue(ctx, false),
        (Phase::Night, Event::SkipNightAction) => advance_queue(ctx, true),
        (Phase::Night, Event::EndNight) => {
            ctx.night_queue = None;
            ctx.current_day += 1;
            ctx.reset_day_fields();
            let message = format!("Day {} begins", ctx.current_day);
            ctx.log(EntryKind::Phase, message);
            Ok(Phase::Day(Discussion))
        }

        // === Night and day ===
        (Phase::Night | Phase::Day(_), Event::KillPlayer { player_id, cause }) => {
            kill_player(phase, ctx, *player_id, cause.as_deref(), config)
        }
        (Phase::Night | Phase::Day(_), Event::RevivePlayer { player_id }) => {
            let player = ctx
                .players
                .get_mut(*player_id)
                .ok_or(Rejection::UnknownPlayer(*player_id))?;
            if player.is_alive() {
                return Err(Rejection::NotDead(*player_id));
            }
            player.revive();
            let message = format!("{} returns to life", player.name);
            ctx.log(EntryKind::Death, message);
            Ok(phase)
        }
        (Phase::Night | Phase::Day(Discussion), Event::UseAbility { player_id, targets }) => {
            use_ability(phase, ctx, *player_id, targets, config)
        }

        // === Day ===
        (Phase::Day(Discussion), Event::EnterNomination) => {
            if ctx.executed_today {
                return Err(Rejection::AlreadyExecuted);
            }
            Ok(Phase::Day(Nomination))
        }
        (Phase::Day(Discussion), Event::EndDay) => end_day(ctx, config),
        (Phase::Day(Nomination), Event::Nominate { nominator_id, nominee_id }) => {
            nominate(ctx, *nominator_id, *nominee_id)
        }
        (Phase::Day(Nomination), Event::CancelNomination) => Ok(Phase::Day(Discussion)),
        (Phase::Day(Vote), Event::CastVote { voter_id, vote }) => {
            voting::check_voter(ctx, *voter_id)?;
            record_vote(ctx, *voter_id, *vote);
            Ok(phase)
        }
        (Phase::Day(Vote), Event::FinishVote) => {
            voting::conclude_nomination(ctx, false)?;
            Ok(Phase::Day(Discussion))
        }
        (Phase::Day(ClockwiseVote), Event::ClockwiseVote { voter_id, vote }) => {
            let mut clockwise = ctx.clockwise_voting.clone().ok_or(VoteError::NoNomination)?;
            clockwise.record(*voter_id, *vote)?;
            voting::check_voter(ctx, *voter_id)?;
            ctx.clockwise_voting = Some(clockwise);
            record_vote(ctx, *voter_id, *vote);
            Ok(phase)
        }
        (Phase::Day(ClockwiseVote), Event::ClockwiseNext) => {
            let mut clockwise = ctx.clockwise_voting.clone().ok_or(VoteError::NoNomination)?;
            let current_can_vote = clockwise
                .current_voter()
                .and_then(|id| ctx.players.get(id))
                .is_some_and(|p| p.can_vote());
            clockwise.next(current_can_vote)?;
            ctx.clockwise_voting = Some(clockwise);
            Ok(phase)
        }
        (Phase::Day(ClockwiseVote), Event::ClockwisePrevious) => {
            let mut clockwise = ctx.clockwise_voting.clone().ok_or(VoteError::NoNomination)?;
            clockwise.previous()?;
            ctx.clockwise_voting = Some(clockwise);
            Ok(phase)
        }
        (Phase::Day(ClockwiseVote), Event::FinishClockwiseVote) => {
            voting::conclude_nomination(ctx, true)?;
            Ok(Phase::Day(Discussion))
        }

        // === Execution ===
        (Phase::Execution, Event::Execute) => execute(ctx, config),
        (Phase::Execution, Event::SkipExecution) => {
            ctx.execution_target = None;
            ctx.log(EntryKind::Execution, "The storyteller skipped the execution");
            after_day_without_execution(ctx, config)
        }

        _ => Err(wrong()),
    }
}

fn start_game(ctx: &mut GameContext) -> Result<Phase, Rejection> {
    if ctx.players.is_empty() {
        return Err(Rejection::EmptyRoster);
    }
    if let Some(unassigned) = ctx.players.iter().find(|p| p.character_id.is_none()) {
        return Err(Rejection::Unassigned(unassigned.id));
    }
    let message = format!("The game begins with {} players", ctx.players.len());
    ctx.log(EntryKind::Setup, message);
    Ok(begin_night(ctx, true))
}

/// Increment the night, clear protection, and build the queue.
fn begin_night(ctx: &mut GameContext, is_first_night: bool) -> Phase {
    ctx.current_night += 1;
    ctx.is_first_night = is_first_night;
    for player in ctx.players.iter_mut() {
        player.status.protected = false;
    }

    let queue = NightQueue::build(&ctx.players, is_first_night, ctx.current_night);
    let message = format!("Night {} falls; {} to wake", ctx.current_night, queue.len());
    ctx.night_queue = Some(queue);
    ctx.log(EntryKind::Phase, message);
    Phase::Night
}

fn advance_queue(ctx: &mut GameContext, skip: bool) -> Result<Phase, Rejection> {
    let queue = ctx.night_queue.as_mut().ok_or(Rejection::NightComplete)?;
    let character = queue
        .current_action()
        .map(|a| a.character_id)
        .ok_or(Rejection::NightComplete)?;
    if skip {
        queue.skip_current();
    } else {
        queue.complete_current();
    }

    let verb = if skip { "skipped" } else { "done" };
    ctx.log(EntryKind::Night, format!("{character}: {verb}"));
    Ok(Phase::Night)
}

fn kill_player(
    phase: Phase,
    ctx: &mut GameContext,
    id: PlayerId,
    cause: Option<&str>,
    config: &EngineConfig,
) -> Result<Phase, Rejection> {
    let player = ctx.players.get_mut(id).ok_or(Rejection::UnknownPlayer(id))?;
    if player.is_dead {
        return Err(Rejection::AlreadyDead(id));
    }
    player.kill();

    let message = match cause {
        Some(cause) => format!("{} died ({cause})", player.name),
        None => format!("{} died", player.name),
    };
    ctx.log(EntryKind::Death, message);
    settle_deaths(ctx, &[id], config);
    let check = WinCheck::after_kill(ctx.executed_today);
    Ok(check_end(ctx, check, config).unwrap_or(phase))
}

fn use_ability(
    phase: Phase,
    ctx: &mut GameContext,
    actor: PlayerId,
    targets: &[PlayerId],
    config: &EngineConfig,
) -> Result<Phase, Rejection> {
    let mut rng = GameRng::from_state(&ctx.rng);
    let mut scoped = rng.fork();
    ctx.rng = rng.state();

    let Resolution { result, effects } = abilities::resolve(&AbilityContext::from_game(ctx), actor, targets, &mut scoped);
    let name = ctx.name_of(actor);

    if !result.success {
        let error = result.error.clone().unwrap_or_default();
        ctx.log(EntryKind::Ability, format!("{name}'s ability failed: {error}"));
        ctx.last_ability = Some(result);
        return Ok(phase);
    }

    ctx.log(EntryKind::Ability, format!("{name} used their ability"));
    ctx.last_ability = Some(result);

    let deaths = EffectResolver::apply_deaths(&mut ctx.players, &effects);
    for effect in &effects {
        if let Effect::ChangeCharacter { target, character } = effect {
            let message = format!("{} becomes the {character}", ctx.name_of(*target));
            ctx.log(EntryKind::Transform, message);
        }
    }
    for dead in &deaths {
        let message = format!("{} died", ctx.name_of(*dead));
        ctx.log(EntryKind::Death, message);
    }

    if deaths.is_empty() {
        return Ok(phase);
    }
    settle_deaths(ctx, &deaths, config);
    let check = WinCheck::after_kill(ctx.executed_today);
    Ok(check_end(ctx, check, config).unwrap_or(phase))
}

fn nominate(ctx: &mut GameContext, nominator: PlayerId, nominee: PlayerId) -> Result<Phase, Rejection> {
    voting::check_nomination(ctx, nominator, nominee)?;

    ctx.nominated_today.push_back(nominee);
    ctx.nominators_today.push_back(nominator);
    ctx.current_nominator_id = Some(nominator);
    ctx.current_nominee_id = Some(nominee);
    ctx.current_votes = OrdMap::new();

    let message = format!("{} nominates {}", ctx.name_of(nominator), ctx.name_of(nominee));
    ctx.log(EntryKind::Nomination, message);

    if !ctx.clockwise_enabled {
        return Ok(Phase::Day(DayPhase::Vote));
    }
    let seat = ctx
        .players
        .get(nominee)
        .map(|p| p.seat_index)
        .ok_or(Rejection::UnknownPlayer(nominee))?;
    ctx.clockwise_voting = Some(ClockwiseVoting::new(ctx.players.clockwise_from(seat)));
    Ok(Phase::Day(DayPhase::ClockwiseVote))
}

/// Record a vote that passed its guards. Spends a ghost vote if dead.
fn record_vote(ctx: &mut GameContext, voter: PlayerId, vote: bool) {
    let spent = ctx
        .players
        .get_mut(voter)
        .is_some_and(|p| p.record_vote());
    ctx.current_votes.insert(voter, vote);

    let side = if vote { "for" } else { "against" };
    let mut message = format!("{} votes {side}", ctx.name_of(voter));
    if spent {
        message.push_str(", spending their ghost vote");
    }
    ctx.log(EntryKind::Vote, message);
}

fn end_day(ctx: &mut GameContext, config: &EngineConfig) -> Result<Phase, Rejection> {
    if let Some(target) = ctx.execution_target {
        let message = format!("Day {} ends; {} faces execution", ctx.current_day, ctx.name_of(target));
        ctx.log(EntryKind::Phase, message);
        return Ok(Phase::Execution);
    }
    let message = format!("Day {} ends without an execution", ctx.current_day);
    ctx.log(EntryKind::Phase, message);
    after_day_without_execution(ctx, config)
}

fn after_day_without_execution(ctx: &mut GameContext, config: &EngineConfig) -> Result<Phase, Rejection> {
    let check = WinCheck::full(ctx.executed_today);
    match check_end(ctx, check, config) {
        Some(over) => Ok(over),
        None => Ok(begin_night(ctx, false)),
    }
}

fn execute(ctx: &mut GameContext, config: &EngineConfig) -> Result<Phase, Rejection> {
    let target = ctx.execution_target.ok_or(Rejection::NoExecutionTarget)?;
    if ctx.executed_today {
        return Err(Rejection::AlreadyExecuted);
    }

    let player = ctx.players.get_mut(target).ok_or(Rejection::UnknownPlayer(target))?;
    let died = player.is_alive();
    if died {
        player.kill();
    }
    let message = format!("{} was executed", player.name);

    ctx.executed_today = true;
    ctx.last_executed = Some(target);
    ctx.execution_target = None;
    ctx.log(EntryKind::Execution, message);

    // Executing a corpse kills nobody, the Saint included.
    let check = WinCheck {
        executed: died.then_some(target),
        ..WinCheck::after_execution(target)
    };
    if died {
        settle_deaths(ctx, &[target], config);
    }
    match check_end(ctx, check, config) {
        Some(over) => Ok(over),
        None => Ok(begin_night(ctx, false)),
    }
}

/// Apply the Scarlet Woman transform for every Demon among `deaths`.
fn settle_deaths(ctx: &mut GameContext, deaths: &[PlayerId], config: &EngineConfig) {
    ctx.refresh_alive_count();
    for dead in deaths {
        if let Some(transform) = rules::scarlet_woman_transform(&ctx.players, *dead, config) {
            rules::transform::apply(&mut ctx.players, &transform);
            let message = format!(
                "{} becomes the {} as the Demon dies",
                ctx.name_of(transform.player),
                transform.to
            );
            ctx.log(EntryKind::Transform, message);
        }
    }
}

/// End the game if a win condition holds. Returns `Some(GameOver)` if so.
fn check_end(ctx: &mut GameContext, check: WinCheck, config: &EngineConfig) -> Option<Phase> {
    evaluate(&ctx.players, check, config).map(|end| end_game(ctx, end))
}

fn end_game(ctx: &mut GameContext, end: GameEnd) -> Phase {
    let message = format!("The {} team wins: {}", end.winner, end.reason);
    ctx.winner = Some(end.winner);
    ctx.end_reason = Some(end.reason);
    // A nomination under vote stays in the final snapshot as it was.
    ctx.night_queue = None;
    ctx.log(EntryKind::GameEnd, message);
    Phase::GameOver
}
