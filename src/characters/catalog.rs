//! The Trouble Brewing character catalog.
//!
//! A pure lookup table. Night order numbers follow the published night
//! sheet; only their relative order matters to the engine.

use super::definition::{CharacterDefinition, CharacterId, Team};

const fn def(
    id: CharacterId,
    name: &'static str,
    team: Team,
    first_night_order: u32,
    other_night_order: u32,
    ability: &'static str,
) -> CharacterDefinition {
    CharacterDefinition {
        id,
        name,
        team,
        first_night: first_night_order > 0,
        other_night: other_night_order > 0,
        first_night_order,
        other_night_order,
        ability,
    }
}

/// Indexed by `CharacterId as usize`; must stay in declaration order.
static CATALOG: [CharacterDefinition; 22] = [
    def(CharacterId::Washerwoman, "Washerwoman", Team::Townsfolk, 33, 0,
        "You start knowing that 1 of 2 players is a particular Townsfolk."),
    def(CharacterId::Librarian, "Librarian", Team::Townsfolk, 34, 0,
        "You start knowing that 1 of 2 players is a particular Outsider. (Or that zero are in play.)"),
    def(CharacterId::Investigator, "Investigator", Team::Townsfolk, 35, 0,
        "You start knowing that 1 of 2 players is a particular Minion."),
    def(CharacterId::Chef, "Chef", Team::Townsfolk, 36, 0,
        "You start knowing how many pairs of evil players there are."),
    def(CharacterId::Empath, "Empath", Team::Townsfolk, 37, 36,
        "Each night, you learn how many of your 2 alive neighbours are evil."),
    def(CharacterId::FortuneTeller, "Fortune Teller", Team::Townsfolk, 38, 37,
        "Each night, choose 2 players: you learn if either is a Demon. There is a good player that registers as a Demon to you."),
    def(CharacterId::Undertaker, "Undertaker", Team::Townsfolk, 0, 40,
        "Each night*, you learn which character died by execution today."),
    def(CharacterId::Monk, "Monk", Team::Townsfolk, 0, 12,
        "Each night*, choose a player (not yourself): they are safe from the Demon tonight."),
    def(CharacterId::Ravenkeeper, "Ravenkeeper", Team::Townsfolk, 0, 35,
        "If you die at night, you are woken to choose a player: you learn their character."),
    def(CharacterId::Virgin, "Virgin", Team::Townsfolk, 0, 0,
        "The 1st time you are nominated, if the nominator is a Townsfolk, they are executed immediately."),
    def(CharacterId::Slayer, "Slayer", Team::Townsfolk, 0, 0,
        "Once per game, during the day, publicly choose a player: if they are the Demon, they die."),
    def(CharacterId::Soldier, "Soldier", Team::Townsfolk, 0, 0,
        "You are safe from the Demon."),
    def(CharacterId::Mayor, "Mayor", Team::Townsfolk, 0, 0,
        "If only 3 players live & no execution occurs, your team wins. If you die at night, another player might die instead."),
    def(CharacterId::Butler, "Butler", Team::Outsider, 39, 38,
        "Each night, choose a player (not yourself): tomorrow, you may only vote if they are voting too."),
    def(CharacterId::Drunk, "Drunk", Team::Outsider, 0, 0,
        "You do not know you are the Drunk. You think you are a Townsfolk character, but you are not."),
    def(CharacterId::Recluse, "Recluse", Team::Outsider, 0, 0,
        "You might register as evil & as a Minion or Demon, even if dead."),
    def(CharacterId::Saint, "Saint", Team::Outsider, 0, 0,
        "If you die by execution, your team loses."),
    def(CharacterId::Poisoner, "Poisoner", Team::Minion, 17, 7,
        "Each night, choose a player: they are poisoned tonight and tomorrow day."),
    def(CharacterId::Spy, "Spy", Team::Minion, 48, 48,
        "Each night, you see the Grimoire. You might register as good & as a Townsfolk or Outsider, even if dead."),
    def(CharacterId::ScarletWoman, "Scarlet Woman", Team::Minion, 0, 19,
        "If there are 5 or more players alive & the Demon dies, you become the Demon. (Travellers don't count.)"),
    def(CharacterId::Baron, "Baron", Team::Minion, 0, 0,
        "There are extra Outsiders in play. [+2 Outsiders]"),
    def(CharacterId::Imp, "Imp", Team::Demon, 0, 24,
        "Each night*, choose a player: they die. If you kill yourself this way, a Minion becomes the Imp."),
];

/// Look up a character's definition.
#[must_use]
pub fn definition(id: CharacterId) -> &'static CharacterDefinition {
    &CATALOG[id as usize]
}

/// Team of a character.
#[must_use]
pub fn team_of(id: CharacterId) -> Team {
    definition(id).team
}

/// Iterate over all definitions in catalog order.
pub fn all() -> impl Iterator<Item = &'static CharacterDefinition> {
    CATALOG.iter()
}

/// Find characters on a team.
pub fn by_team(team: Team) -> impl Iterator<Item = &'static CharacterDefinition> {
    CATALOG.iter().filter(move |d| d.team == team)
}

/// Characters that wake on the given night type, in night-sheet order.
#[must_use]
pub fn night_sheet(is_first_night: bool) -> Vec<&'static CharacterDefinition> {
    let mut sheet: Vec<_> = CATALOG.iter().filter(|d| d.wakes(is_first_night)).collect();
    sheet.sort_by_key(|d| d.night_order(is_first_night));
    sheet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_indexed_by_id() {
        for (i, id) in CharacterId::ALL.iter().enumerate() {
            assert_eq!(CATALOG[i].id, *id);
            assert_eq!(definition(*id).id, *id);
        }
    }

    #[test]
    fn test_team_sizes() {
        assert_eq!(by_team(Team::Townsfolk).count(), 13);
        assert_eq!(by_team(Team::Outsider).count(), 4);
        assert_eq!(by_team(Team::Minion).count(), 4);
        assert_eq!(by_team(Team::Demon).count(), 1);
        assert_eq!(all().count(), 22);
    }

    #[test]
    fn test_order_numbers_match_flags() {
        for d in all() {
            assert_eq!(d.first_night, d.first_night_order > 0, "{}", d.name);
            assert_eq!(d.other_night, d.other_night_order > 0, "{}", d.name);
        }
    }

    #[test]
    fn test_first_night_sheet() {
        let names: Vec<_> = night_sheet(true).iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "Poisoner", "Washerwoman", "Librarian", "Investigator", "Chef",
                "Empath", "Fortune Teller", "Butler", "Spy",
            ]
        );
    }

    #[test]
    fn test_other_night_sheet() {
        let names: Vec<_> = night_sheet(false).iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "Poisoner", "Monk", "Scarlet Woman", "Imp", "Ravenkeeper",
                "Empath", "Fortune Teller", "Butler", "Undertaker", "Spy",
            ]
        );
    }

    #[test]
    fn test_imp_is_only_demon() {
        assert_eq!(team_of(CharacterId::Imp), Team::Demon);
        assert!(!definition(CharacterId::Imp).first_night);
        assert!(definition(CharacterId::Imp).other_night);
    }
}
