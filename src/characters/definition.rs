//! Character definitions - static catalog data.
//!
//! `CharacterDefinition` holds the immutable properties of a character:
//! team, night activation and ordering, ability text. Runtime state
//! (dead, poisoned, ...) lives on the [`Player`](crate::core::Player).

use serde::{Deserialize, Serialize};

/// One of the four teams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Good, information and protection roles.
    Townsfolk,
    /// Good, usually with a drawback.
    Outsider,
    /// Evil helpers of the Demon.
    Minion,
    /// Evil; the game ends when no Demon lives.
    Demon,
}

impl Team {
    /// Alignment of this team.
    #[must_use]
    pub const fn alignment(self) -> Alignment {
        match self {
            Team::Townsfolk | Team::Outsider => Alignment::Good,
            Team::Minion | Team::Demon => Alignment::Evil,
        }
    }

    /// Minion or Demon.
    #[must_use]
    pub const fn is_evil(self) -> bool {
        matches!(self.alignment(), Alignment::Evil)
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Team::Townsfolk => "Townsfolk",
            Team::Outsider => "Outsider",
            Team::Minion => "Minion",
            Team::Demon => "Demon",
        };
        f.write_str(name)
    }
}

/// The good/evil split. Also names the winning side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    /// Townsfolk and Outsiders.
    Good,
    /// Minions and the Demon.
    Evil,
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alignment::Good => f.write_str("good"),
            Alignment::Evil => f.write_str("evil"),
        }
    }
}

/// Identifier for a character in the catalog.
///
/// Closed set: adding a character means adding a variant, and the compiler
/// then points at every `match` (catalog, ability dispatch) that needs it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterId {
    // Townsfolk
    Washerwoman,
    Librarian,
    Investigator,
    Chef,
    Empath,
    FortuneTeller,
    Undertaker,
    Monk,
    Ravenkeeper,
    Virgin,
    Slayer,
    Soldier,
    Mayor,
    // Outsiders
    Butler,
    Drunk,
    Recluse,
    Saint,
    // Minions
    Poisoner,
    Spy,
    ScarletWoman,
    Baron,
    // Demon
    Imp,
}

impl CharacterId {
    /// Every character, in catalog order.
    pub const ALL: [CharacterId; 22] = [
        CharacterId::Washerwoman,
        CharacterId::Librarian,
        CharacterId::Investigator,
        CharacterId::Chef,
        CharacterId::Empath,
        CharacterId::FortuneTeller,
        CharacterId::Undertaker,
        CharacterId::Monk,
        CharacterId::Ravenkeeper,
        CharacterId::Virgin,
        CharacterId::Slayer,
        CharacterId::Soldier,
        CharacterId::Mayor,
        CharacterId::Butler,
        CharacterId::Drunk,
        CharacterId::Recluse,
        CharacterId::Saint,
        CharacterId::Poisoner,
        CharacterId::Spy,
        CharacterId::ScarletWoman,
        CharacterId::Baron,
        CharacterId::Imp,
    ];

    /// Snake-case slug used in events and save files.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            CharacterId::Washerwoman => "washerwoman",
            CharacterId::Librarian => "librarian",
            CharacterId::Investigator => "investigator",
            CharacterId::Chef => "chef",
            CharacterId::Empath => "empath",
            CharacterId::FortuneTeller => "fortune_teller",
            CharacterId::Undertaker => "undertaker",
            CharacterId::Monk => "monk",
            CharacterId::Ravenkeeper => "ravenkeeper",
            CharacterId::Virgin => "virgin",
            CharacterId::Slayer => "slayer",
            CharacterId::Soldier => "soldier",
            CharacterId::Mayor => "mayor",
            CharacterId::Butler => "butler",
            CharacterId::Drunk => "drunk",
            CharacterId::Recluse => "recluse",
            CharacterId::Saint => "saint",
            CharacterId::Poisoner => "poisoner",
            CharacterId::Spy => "spy",
            CharacterId::ScarletWoman => "scarlet_woman",
            CharacterId::Baron => "baron",
            CharacterId::Imp => "imp",
        }
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(super::catalog::definition(*self).name)
    }
}

impl std::str::FromStr for CharacterId {
    type Err = UnknownCharacter;

    /// Accepts slugs ("fortune_teller") and display names ("Fortune Teller"),
    /// ignoring case, spaces, dashes and underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        CharacterId::ALL
            .iter()
            .copied()
            .find(|c| normalize(c.slug()) == wanted)
            .ok_or_else(|| UnknownCharacter(s.to_string()))
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// A name that does not match any catalog character.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown character: '{0}'")]
pub struct UnknownCharacter(pub String);

/// Static character definition.
///
/// Order numbers are positive and ascending within a night; ties are broken
/// by seat order when the night queue is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CharacterDefinition {
    /// Catalog identifier.
    pub id: CharacterId,

    /// Display name.
    pub name: &'static str,

    /// Team.
    pub team: Team,

    /// Wakes on the first night.
    pub first_night: bool,

    /// Wakes on nights after the first.
    pub other_night: bool,

    /// Position on the first-night sheet (0 when not woken).
    pub first_night_order: u32,

    /// Position on the other-nights sheet (0 when not woken).
    pub other_night_order: u32,

    /// Ability text as printed on the token.
    pub ability: &'static str,
}

impl CharacterDefinition {
    /// Does this character wake on the given night type?
    #[must_use]
    pub const fn wakes(&self, is_first_night: bool) -> bool {
        if is_first_night {
            self.first_night
        } else {
            self.other_night
        }
    }

    /// Order number for the given night type.
    #[must_use]
    pub const fn night_order(&self, is_first_night: bool) -> u32 {
        if is_first_night {
            self.first_night_order
        } else {
            self.other_night_order
        }
    }

    /// Alignment of this character's team.
    #[must_use]
    pub const fn alignment(&self) -> Alignment {
        self.team.alignment()
    }
}
