//! Ability targeting.
//!
//! Defines what each character may choose:
//! - `TargetSpec`: count plus filters
//! - `TargetCount`: how many targets
//! - `TargetFilter`: constraints every chosen target must meet
//!
//! Every chosen target must be seated, whatever the filters say.

use serde::{Deserialize, Serialize};

use super::outcome::AbilityError;
use crate::characters::CharacterId;
use crate::core::{PlayerId, Roster};

/// Number of targets to choose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetCount {
    /// Targets are ignored.
    Any,
    /// Exactly N targets.
    Exactly(usize),
    /// At least N targets; only the first N are used.
    AtLeast(usize),
}

impl TargetCount {
    /// Check a number of chosen targets.
    #[must_use]
    pub fn accepts(self, n: usize) -> bool {
        match self {
            TargetCount::Any => true,
            TargetCount::Exactly(k) => n == k,
            TargetCount::AtLeast(k) => n >= k,
        }
    }
}

impl std::fmt::Display for TargetCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetCount::Any => f.write_str("any number of"),
            TargetCount::Exactly(k) => write!(f, "exactly {k}"),
            TargetCount::AtLeast(k) => write!(f, "at least {k}"),
        }
    }
}

/// Constraint on chosen targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetFilter {
    /// Target must be alive.
    Alive,
    /// Target must not be the acting player.
    NotSelf,
    /// Targets must be pairwise different.
    Distinct,
}

/// Target requirements for an ability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// How many targets to choose.
    pub count: TargetCount,
    /// Filters applied to every target.
    pub filters: Vec<TargetFilter>,
}

impl TargetSpec {
    /// Abilities that take no targets.
    #[must_use]
    pub fn none() -> Self {
        Self {
            count: TargetCount::Any,
            filters: Vec::new(),
        }
    }

    /// Exactly `n` targets.
    #[must_use]
    pub fn exactly(n: usize) -> Self {
        Self {
            count: TargetCount::Exactly(n),
            filters: Vec::new(),
        }
    }

    /// At least `n` targets.
    #[must_use]
    pub fn at_least(n: usize) -> Self {
        Self {
            count: TargetCount::AtLeast(n),
            filters: Vec::new(),
        }
    }

    /// Add a filter (builder pattern).
    #[must_use]
    pub fn with_filter(mut self, filter: TargetFilter) -> Self {
        self.filters.push(filter);
        self
    }

    fn has(&self, filter: TargetFilter) -> bool {
        self.filters.contains(&filter)
    }

    /// Check chosen targets against these requirements.
    ///
    /// Errors in this order: count, unseated target, duplicate,
    /// dead target, self target.
    pub fn validate(&self, actor: PlayerId, targets: &[PlayerId], roster: &Roster) -> Result<(), AbilityError> {
        if self.count == TargetCount::Any {
            return Ok(());
        }
        if !self.count.accepts(targets.len()) {
            return Err(AbilityError::TargetCount {
                expected: self.count,
                got: targets.len(),
            });
        }

        for (i, &id) in targets.iter().enumerate() {
            let Some(target) = roster.get(id) else {
                return Err(AbilityError::UnknownTarget(id));
            };
            if self.has(TargetFilter::Distinct) && targets[..i].contains(&id) {
                return Err(AbilityError::DuplicateTarget(id));
            }
            if self.has(TargetFilter::Alive) && !target.is_alive() {
                return Err(AbilityError::TargetDead(id));
            }
            if self.has(TargetFilter::NotSelf) && id == actor {
                return Err(AbilityError::SelfTarget);
            }
        }
        Ok(())
    }

    /// All seated players that pass the filters, ignoring count.
    ///
    /// Used by UIs to offer choices.
    #[must_use]
    pub fn candidates(&self, actor: PlayerId, roster: &Roster) -> Vec<PlayerId> {
        roster
            .iter()
            .filter(|p| !self.has(TargetFilter::Alive) || p.is_alive())
            .filter(|p| !self.has(TargetFilter::NotSelf) || p.id != actor)
            .map(|p| p.id)
            .collect()
    }
}

/// Targeting rules for a character's ability.
#[must_use]
pub fn target_spec(character: CharacterId) -> TargetSpec {
    use crate::characters::CharacterId as C;

    match character {
        C::Imp => TargetSpec::at_least(1).with_filter(TargetFilter::Alive),
        C::FortuneTeller => TargetSpec::exactly(2).with_filter(TargetFilter::Distinct),
        C::Monk => TargetSpec::exactly(1)
            .with_filter(TargetFilter::Alive)
            .with_filter(TargetFilter::NotSelf),
        C::Poisoner | C::Ravenkeeper => TargetSpec::exactly(1),
        C::Butler => TargetSpec::exactly(1).with_filter(TargetFilter::NotSelf),
        C::Slayer => TargetSpec::exactly(1).with_filter(TargetFilter::Alive),
        C::Washerwoman
        | C::Librarian
        | C::Investigator
        | C::Chef
        | C::Empath
        | C::Undertaker
        | C::Virgin
        | C::Soldier
        | C::Mayor
        | C::Drunk
        | C::Recluse
        | C::Saint
        | C::Spy
        | C::ScarletWoman
        | C::Baron => TargetSpec::none(),
    }
}
