//! Ability resolution.
//!
//! [`resolve`] runs a character's handler and collects the effects it
//! wants; [`EffectResolver`] applies those effects to the roster. Keeping
//! the two apart means a handler that fails has changed nothing.
//!
//! Dispatch is an exhaustive `match` on [`CharacterId`]: adding a
//! character without deciding what its ability does will not compile.

use smallvec::SmallVec;

use super::effect::Effect;
use super::info;
use super::outcome::{AbilityData, AbilityError, AbilityResult};
use super::targeting::target_spec;
use crate::characters::{CharacterId, Team};
use crate::core::{GameContext, GameRng, Player, PlayerId, Roster};

/// Reminder token marking a spent Slayer shot.
pub const SLAYER_USED: &str = "slayer-used";

/// Prefix of the Butler's master token.
pub const MASTER_PREFIX: &str = "master:";

/// The part of the game an ability may look at.
#[derive(Clone, Copy, Debug)]
pub struct AbilityContext<'a> {
    /// Live roster.
    pub roster: &'a Roster,
    /// Night counter.
    pub night: u32,
    /// First night of the game.
    pub is_first_night: bool,
    /// Player executed most recently, for the Undertaker.
    pub last_executed: Option<PlayerId>,
}

impl<'a> AbilityContext<'a> {
    /// View of a game context.
    #[must_use]
    pub fn from_game(ctx: &'a GameContext) -> Self {
        Self {
            roster: &ctx.players,
            night: ctx.current_night,
            is_first_night: ctx.is_first_night,
            last_executed: ctx.last_executed,
        }
    }
}

/// Result of [`resolve`]: the public outcome and the effects to apply.
///
/// `effects` is empty whenever `result.success` is false.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub result: AbilityResult,
    pub effects: Vec<Effect>,
}

/// Resolve `actor`'s ability against `targets`.
///
/// Never fails: rule violations come back as an unsuccessful
/// [`AbilityResult`]. Randomness (impaired information) is drawn from
/// `rng`, which the caller scopes to this one resolution.
pub fn resolve(ctx: &AbilityContext<'_>, actor: PlayerId, targets: &[PlayerId], rng: &mut GameRng) -> Resolution {
    let mut effects = Vec::new();
    match dispatch(ctx, actor, targets, rng, &mut effects) {
        Ok(data) => Resolution {
            result: AbilityResult::ok(actor, data),
            effects,
        },
        Err(err) => Resolution {
            result: AbilityResult::failed(actor, &err),
            effects: Vec::new(),
        },
    }
}

fn dispatch(
    ctx: &AbilityContext<'_>,
    actor: PlayerId,
    targets: &[PlayerId],
    rng: &mut GameRng,
    effects: &mut Vec<Effect>,
) -> Result<AbilityData, AbilityError> {
    use crate::characters::CharacterId as C;

    let player = ctx.roster.get(actor).ok_or(AbilityError::UnknownActor(actor))?;
    let character = player.character_id.ok_or(AbilityError::NoCharacter(actor))?;
    if player.is_dead && !resolves_when_dead(character) {
        return Err(AbilityError::ActorDead(actor));
    }
    target_spec(character).validate(actor, targets, ctx.roster)?;

    let info = Info {
        roster: ctx.roster,
        impaired: player.status.is_impaired(),
    };

    match character {
        C::Imp => imp(ctx.roster, player, targets, effects),
        C::Poisoner => {
            let target = first(targets)?;
            effects.push(Effect::ClearPoison);
            effects.push(Effect::Poison { target });
            Ok(AbilityData::Poisoned { target })
        }
        C::Monk => {
            let target = first(targets)?;
            effects.push(Effect::Protect { target });
            Ok(AbilityData::Protected { target })
        }
        C::Empath => {
            let count = info.count(rng, 2, || info::evil_neighbor_count(ctx.roster, actor));
            Ok(AbilityData::EvilNeighbors { count })
        }
        C::Chef => {
            let max = info::seat_pair_count(ctx.roster.len());
            let count = info.count(rng, max, || info::evil_pair_count(ctx.roster));
            Ok(AbilityData::EvilPairs { count })
        }
        C::Investigator => {
            let count = info.count(rng, ctx.roster.len(), || info::team_count(ctx.roster, Team::Minion));
            Ok(AbilityData::MinionCount { count })
        }
        C::Librarian => {
            let count = info.count(rng, ctx.roster.len(), || info::team_count(ctx.roster, Team::Outsider));
            Ok(AbilityData::OutsiderCount { count })
        }
        C::FortuneTeller => {
            let detected = if info.impaired {
                rng.gen_bool(0.5)
            } else {
                info::includes_demon(ctx.roster, targets)
            };
            Ok(AbilityData::DemonCheck {
                targets: targets.to_vec(),
                detected,
            })
        }
        C::Undertaker => {
            let executed = ctx.last_executed;
            let character = executed.and_then(|id| info.character(rng, id));
            Ok(AbilityData::Executed {
                player: executed,
                character,
            })
        }
        C::Ravenkeeper => {
            let target = first(targets)?;
            Ok(AbilityData::CharacterSeen {
                target,
                character: info.character(rng, target),
            })
        }
        C::Butler => {
            let master = first(targets)?;
            effects.push(Effect::RemoveReminders {
                target: actor,
                prefix: MASTER_PREFIX.to_string(),
            });
            effects.push(Effect::remind(actor, format!("{MASTER_PREFIX}{}", master.raw())));
            Ok(AbilityData::MasterChosen { master })
        }
        C::Spy => Ok(AbilityData::Grimoire {
            entries: info::grimoire(ctx.roster),
        }),
        C::Slayer => slayer(ctx.roster, player, targets, effects),
        C::Washerwoman => Ok(AbilityData::NotImplemented { character }),
        C::Virgin
        | C::Soldier
        | C::Mayor
        | C::Drunk
        | C::Recluse
        | C::Saint
        | C::Baron
        | C::ScarletWoman => Ok(AbilityData::Passive { character }),
    }
}

/// The Ravenkeeper wakes on the night they die; passive characters just
/// report that they are passive.
fn resolves_when_dead(character: CharacterId) -> bool {
    use crate::characters::CharacterId as C;

    matches!(
        character,
        C::Ravenkeeper
            | C::Virgin
            | C::Soldier
            | C::Mayor
            | C::Drunk
            | C::Recluse
            | C::Saint
            | C::Baron
            | C::ScarletWoman
    )
}

fn first(targets: &[PlayerId]) -> Result<PlayerId, AbilityError> {
    targets.first().copied().ok_or(AbilityError::TargetCount {
        expected: super::TargetCount::AtLeast(1),
        got: 0,
    })
}

/// Information source for one resolution: true values, or arbitrary ones
/// when the actor is poisoned or drunk.
struct Info<'a> {
    roster: &'a Roster,
    impaired: bool,
}

impl Info<'_> {
    fn count(&self, rng: &mut GameRng, max: usize, truth: impl FnOnce() -> usize) -> usize {
        if self.impaired {
            rng.gen_range_usize(0..=max)
        } else {
            truth()
        }
    }

    fn character(&self, rng: &mut GameRng, id: PlayerId) -> Option<CharacterId> {
        if self.impaired {
            let all = CharacterId::ALL;
            Some(all[rng.gen_range_usize(0..=all.len() - 1)])
        } else {
            self.roster.get(id).and_then(|p| p.character_id)
        }
    }
}

fn imp(
    roster: &Roster,
    actor: &Player,
    targets: &[PlayerId],
    effects: &mut Vec<Effect>,
) -> Result<AbilityData, AbilityError> {
    let target_id = first(targets)?;
    let target = roster.get(target_id).ok_or(AbilityError::UnknownTarget(target_id))?;

    if target_id == actor.id {
        // Star pass: the first living Minion in seat order becomes the Imp.
        effects.push(Effect::kill(target_id));
        let heir = roster.living_on_team(Team::Minion).next().map(|p| p.id);
        if let Some(heir) = heir {
            effects.push(Effect::ChangeCharacter {
                target: heir,
                character: CharacterId::Imp,
            });
        }
        return Ok(AbilityData::Kill {
            target: target_id,
            killed: true,
            reason: None,
            new_demon: heir,
        });
    }

    let immunity = if target.character_id == Some(CharacterId::Soldier) {
        Some("the Soldier is safe from the Demon")
    } else if target.status.protected {
        Some("protected by the Monk")
    } else {
        None
    };
    if let Some(reason) = immunity {
        return Ok(AbilityData::Kill {
            target: target_id,
            killed: false,
            reason: Some(reason.to_string()),
            new_demon: None,
        });
    }

    effects.push(Effect::kill(target_id));
    Ok(AbilityData::Kill {
        target: target_id,
        killed: true,
        reason: None,
        new_demon: None,
    })
}

fn slayer(
    roster: &Roster,
    actor: &Player,
    targets: &[PlayerId],
    effects: &mut Vec<Effect>,
) -> Result<AbilityData, AbilityError> {
    if actor.status.has_custom(SLAYER_USED) {
        return Err(AbilityError::AlreadyUsed {
            character: CharacterId::Slayer,
        });
    }

    let target = first(targets)?;
    effects.push(Effect::remind(actor.id, SLAYER_USED));

    // An impaired Slayer spends the shot without effect.
    let killed = !actor.status.is_impaired() && roster.team_of(target) == Some(Team::Demon);
    if killed {
        effects.push(Effect::kill(target));
    }
    Ok(AbilityData::Slay { target, killed })
}

/// Outcome of applying one effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// Effect applied.
    Applied,
    /// Effect applied and the target died.
    Died(PlayerId),
    /// Effect had nothing to act on.
    Skipped(String),
}

/// Applies effects to the roster.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply effects in order.
    pub fn resolve_batch(roster: &mut Roster, effects: &[Effect]) -> Vec<ResolveResult> {
        effects.iter().map(|e| Self::resolve_single(roster, e)).collect()
    }

    /// Apply effects and return who died.
    pub fn apply_deaths(roster: &mut Roster, effects: &[Effect]) -> SmallVec<[PlayerId; 2]> {
        Self::resolve_batch(roster, effects)
            .into_iter()
            .filter_map(|r| match r {
                ResolveResult::Died(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Apply a single effect.
    pub fn resolve_single(roster: &mut Roster, effect: &Effect) -> ResolveResult {
        if let Effect::ClearPoison = effect {
            for player in roster.iter_mut() {
                player.status.poisoned = false;
            }
            return ResolveResult::Applied;
        }

        let Some(id) = effect.target() else {
            return ResolveResult::Skipped("no target".to_string());
        };
        let Some(player) = roster.get_mut(id) else {
            return ResolveResult::Skipped(format!("{id} is not seated"));
        };

        match effect {
            Effect::Kill { .. } => {
                if player.is_dead {
                    return ResolveResult::Skipped(format!("{id} is already dead"));
                }
                player.kill();
                ResolveResult::Died(id)
            }
            Effect::Poison { .. } => {
                player.status.poisoned = true;
                ResolveResult::Applied
            }
            Effect::Protect { .. } => {
                player.status.protected = true;
                ResolveResult::Applied
            }
            Effect::ChangeCharacter { character, .. } => {
                player.character_id = Some(*character);
                ResolveResult::Applied
            }
            Effect::AddReminder { token, .. } => {
                player.status.add_custom(token.clone());
                ResolveResult::Applied
            }
            Effect::RemoveReminders { prefix, .. } => {
                player.status.remove_custom_prefix(prefix);
                ResolveResult::Applied
            }
            Effect::ClearPoison => ResolveResult::Applied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characters::CharacterId::*;

    fn roster(characters: &[CharacterId]) -> Roster {
        Roster::from_players(characters.iter().enumerate().map(|(i, c)| {
            Player::new(PlayerId::new(i as u32), format!("P{i}"), i).with_character(*c)
        }))
    }

    fn ctx(roster: &Roster) -> AbilityContext<'_> {
        AbilityContext {
            roster,
            night: 2,
            is_first_night: false,
            last_executed: None,
        }
    }

    fn id(raw: u32) -> PlayerId {
        PlayerId::new(raw)
    }

    #[test]
    fn test_unknown_actor() {
        let players = roster(&[Imp]);
        let res = resolve(&ctx(&players), id(9), &[], &mut GameRng::new(1));
        assert!(!res.result.success);
        assert_eq!(res.result.error.as_deref(), Some("Player 9 is not seated"));
    }

    #[test]
    fn test_imp_kill() {
        let players = roster(&[Imp, Chef, Empath]);
        let res = resolve(&ctx(&players), id(0), &[id(1)], &mut GameRng::new(1));
        assert!(res.result.success);
        assert_eq!(res.effects, vec![Effect::kill(id(1))]);
    }

    #[test]
    fn test_imp_needs_target() {
        let players = roster(&[Imp, Chef]);
        let res = resolve(&ctx(&players), id(0), &[], &mut GameRng::new(1));
        assert!(!res.result.success);
        assert!(res.effects.is_empty());
    }

    #[test]
    fn test_imp_blocked_by_soldier() {
        let players = roster(&[Imp, Soldier]);
        let res = resolve(&ctx(&players), id(0), &[id(1)], &mut GameRng::new(1));
        assert!(res.result.success);
        assert!(res.effects.is_empty());
        assert!(matches!(
            res.result.data,
            Some(AbilityData::Kill { killed: false, reason: Some(_), .. })
        ));
    }

    #[test]
    fn test_imp_star_pass() {
        let players = roster(&[Chef, Imp, Poisoner, Spy]);
        let res = resolve(&ctx(&players), id(1), &[id(1)], &mut GameRng::new(1));
        assert_eq!(
            res.effects,
            vec![
                Effect::kill(id(1)),
                Effect::ChangeCharacter { target: id(2), character: Imp }
            ]
        );
    }

    #[test]
    fn test_poisoner_effects() {
        let players = roster(&[Poisoner, Chef]);
        let res = resolve(&ctx(&players), id(0), &[id(1)], &mut GameRng::new(1));
        assert_eq!(res.effects, vec![Effect::ClearPoison, Effect::Poison { target: id(1) }]);
    }

    #[test]
    fn test_monk_cannot_protect_self() {
        let players = roster(&[Monk, Chef]);
        let res = resolve(&ctx(&players), id(0), &[id(0)], &mut GameRng::new(1));
        assert_eq!(res.result.error.as_deref(), Some("cannot target self"));
    }

    #[test]
    fn test_impaired_info_stays_in_range() {
        let mut players = roster(&[Empath, Imp, Chef]);
        players.get_mut(id(0)).unwrap().status.poisoned = true;
        let mut rng = GameRng::new(3);
        for _ in 0..50 {
            let res = resolve(&ctx(&players), id(0), &[], &mut rng);
            match res.result.data {
                Some(AbilityData::EvilNeighbors { count }) => assert!(count <= 2),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_slayer_once() {
        let mut players = roster(&[Slayer, Imp]);
        let res = resolve(&ctx(&players), id(0), &[id(1)], &mut GameRng::new(1));
        assert!(matches!(res.result.data, Some(AbilityData::Slay { killed: true, .. })));
        EffectResolver::resolve_batch(&mut players, &res.effects);

        let again = resolve(&ctx(&players), id(0), &[id(1)], &mut GameRng::new(1));
        assert!(!again.result.success);
    }

    #[test]
    fn test_dead_actor_cannot_act() {
        let mut players = roster(&[Imp, Monk, Ravenkeeper, Chef]);
        for dead in 0..3 {
            players.get_mut(id(dead)).unwrap().kill();
        }

        let res = resolve(&ctx(&players), id(0), &[id(3)], &mut GameRng::new(1));
        assert_eq!(res.result.error.as_deref(), Some("Player 0 is dead and cannot act"));
        assert!(res.effects.is_empty());

        let res = resolve(&ctx(&players), id(1), &[id(3)], &mut GameRng::new(1));
        assert!(!res.result.success);

        let res = resolve(&ctx(&players), id(2), &[id(3)], &mut GameRng::new(1));
        assert_eq!(res.result.data, Some(AbilityData::CharacterSeen { target: id(3), character: Some(Chef) }));
    }

    #[test]
    fn test_washerwoman_placeholder() {
        let players = roster(&[Washerwoman]);
        let res = resolve(&ctx(&players), id(0), &[], &mut GameRng::new(1));
        assert!(res.result.success);
        assert_eq!(res.result.data, Some(AbilityData::NotImplemented { character: Washerwoman }));
    }

    #[test]
    fn test_apply_deaths() {
        let mut players = roster(&[Imp, Chef, Empath]);
        let deaths = EffectResolver::apply_deaths(
            &mut players,
            &[Effect::kill(id(1)), Effect::kill(id(1)), Effect::Protect { target: id(2) }],
        );
        assert_eq!(deaths.as_slice(), &[id(1)]);
        assert!(players.get(id(2)).unwrap().status.protected);
    }

    #[test]
    fn test_clear_poison() {
        let mut players = roster(&[Poisoner, Chef, Empath]);
        players.get_mut(id(1)).unwrap().status.poisoned = true;
        EffectResolver::resolve_batch(&mut players, &[Effect::ClearPoison, Effect::Poison { target: id(2) }]);
        assert!(!players.get(id(1)).unwrap().status.poisoned);
        assert!(players.get(id(2)).unwrap().status.poisoned);
    }
}
