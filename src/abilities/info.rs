//! Information computed by the information roles.
//!
//! Pure functions over the roster. The resolver decides whether the
//! acting player hears the true value or an arbitrary one.

use crate::characters::Team;
use crate::core::{PlayerId, Roster};

use super::outcome::GrimoireEntry;

/// Evil players among the two seated neighbours of `id`.
///
/// Counts each neighbour slot, so in a two-player circle the other player
/// counts twice and alone the player counts themself twice. Range `0..=2`.
#[must_use]
pub fn evil_neighbor_count(roster: &Roster, id: PlayerId) -> usize {
    match roster.neighbors(id) {
        Some((left, right)) => [left, right].into_iter().filter(|n| roster.is_evil(*n)).count(),
        None => 0,
    }
}

/// Number of adjacent seat pairs, wraparound included.
#[must_use]
pub fn seat_pair_count(player_count: usize) -> usize {
    match player_count {
        0 | 1 => 0,
        2 => 1,
        n => n,
    }
}

/// Adjacent pairs of evil players around the circle, wraparound included.
///
/// Dead players still count. Range `0..=seat_pair_count(n)`.
#[must_use]
pub fn evil_pair_count(roster: &Roster) -> usize {
    let n = roster.len();
    (0..seat_pair_count(n))
        .filter(|&seat| {
            let evil = |s: usize| roster.by_seat(s).is_some_and(|p| roster.is_evil(p.id));
            evil(seat) && evil((seat + 1) % n)
        })
        .count()
}

/// Players whose character is on `team`, dead or alive.
#[must_use]
pub fn team_count(roster: &Roster, team: Team) -> usize {
    roster.iter().filter(|p| roster.team_of(p.id) == Some(team)).count()
}

/// Any of `targets` holds a Demon.
#[must_use]
pub fn includes_demon(roster: &Roster, targets: &[PlayerId]) -> bool {
    targets.iter().any(|t| roster.team_of(*t) == Some(Team::Demon))
}

/// Every player's character and status.
#[must_use]
pub fn grimoire(roster: &Roster) -> Vec<GrimoireEntry> {
    roster
        .iter()
        .map(|p| GrimoireEntry {
            player_id: p.id,
            name: p.name.clone(),
            seat_index: p.seat_index,
            character_id: p.character_id,
            is_dead: p.is_dead,
            status: p.status.clone(),
        })
        .collect()
}
