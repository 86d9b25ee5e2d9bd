//! Seat-ordered player roster.
//!
//! The roster is stored in seat order: the player at vector position `i`
//! always has `seat_index == i`. Removing a player shifts everyone after
//! them down one seat, so seats stay a contiguous `0..N` permutation.
//!
//! Backed by `im::Vector` so cloning a roster into a snapshot is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId};
use crate::characters::{catalog, CharacterId, Team};

/// Players in seat order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vector<Player>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from players; seats are reassigned in iteration order.
    #[must_use]
    pub fn from_players(players: impl IntoIterator<Item = Player>) -> Self {
        let mut roster = Self::new();
        for mut player in players {
            player.seat_index = roster.players.len();
            roster.players.push_back(player);
        }
        roster
    }

    /// Seat a new player at the end of the circle.
    ///
    /// Returns the seat index.
    pub fn add(&mut self, id: PlayerId, name: impl Into<String>) -> usize {
        let seat = self.players.len();
        self.players.push_back(Player::new(id, name, seat));
        seat
    }

    /// Remove a player and close the gap in the seating.
    pub fn remove(&mut self, id: PlayerId) -> Option<Player> {
        let pos = self.position(id)?;
        let removed = self.players.remove(pos);
        for seat in pos..self.players.len() {
            self.players[seat].seat_index = seat;
        }
        Some(removed)
    }

    fn position(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    /// Get a player by ID.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Get a mutable player by ID.
    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        let pos = self.position(id)?;
        self.players.get_mut(pos)
    }

    /// Check if a player ID is seated.
    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.position(id).is_some()
    }

    /// Get the player in a seat.
    #[must_use]
    pub fn by_seat(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    /// Number of seated players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Check if nobody is seated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Iterate in seat order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Iterate mutably in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    /// Living players in seat order.
    pub fn living(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive())
    }

    /// Number of living players.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.living().count()
    }

    /// Team of a player's character, if assigned.
    #[must_use]
    pub fn team_of(&self, id: PlayerId) -> Option<Team> {
        self.get(id)?.character_id.map(catalog::team_of)
    }

    /// Is this player's character Minion or Demon?
    #[must_use]
    pub fn is_evil(&self, id: PlayerId) -> bool {
        self.team_of(id).is_some_and(Team::is_evil)
    }

    /// Living players holding a character.
    pub fn living_with(&self, character: CharacterId) -> impl Iterator<Item = &Player> {
        self.living().filter(move |p| p.character_id == Some(character))
    }

    /// Living players on a team.
    pub fn living_on_team(&self, team: Team) -> impl Iterator<Item = &Player> {
        self.living()
            .filter(move |p| p.character_id.map(catalog::team_of) == Some(team))
    }

    /// The two nearest seated neighbours, counter-clockwise then clockwise.
    ///
    /// Wraps at both ends. With one player both neighbours are that player;
    /// with two, both are the other player.
    #[must_use]
    pub fn neighbors(&self, id: PlayerId) -> Option<(PlayerId, PlayerId)> {
        let seat = self.position(id)?;
        let n = self.players.len();
        let left = &self.players[(seat + n - 1) % n];
        let right = &self.players[(seat + 1) % n];
        Some((left.id, right.id))
    }

    /// Every seat, starting with the seat after `seat` and wrapping around
    /// so that `seat` itself comes last.
    #[must_use]
    pub fn clockwise_from(&self, seat: usize) -> Vec<PlayerId> {
        let n = self.players.len();
        (1..=n).map(|offset| self.players[(seat + offset) % n].id).collect()
    }

    /// Seats are exactly `0..N` in order.
    #[must_use]
    pub fn seats_are_contiguous(&self) -> bool {
        self.players.iter().enumerate().all(|(i, p)| p.seat_index == i)
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Player;
    type IntoIter = im::vector::Iter<'a, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_of(n: u32) -> Roster {
        let mut roster = Roster::new();
        for i in 0..n {
            roster.add(PlayerId::new(i), format!("P{i}"));
        }
        roster
    }

    #[test]
    fn test_add_assigns_seats() {
        let roster = roster_of(4);
        assert_eq!(roster.len(), 4);
        assert_eq!(roster.by_seat(2).unwrap().id, PlayerId::new(2));
        assert!(roster.seats_are_contiguous());
    }

    #[test]
    fn test_remove_compacts_seats() {
        let mut roster = roster_of(5);
        let removed = roster.remove(PlayerId::new(1)).unwrap();
        assert_eq!(removed.name, "P1");

        assert_eq!(roster.len(), 4);
        assert!(roster.seats_are_contiguous());
        assert_eq!(roster.get(PlayerId::new(2)).unwrap().seat_index, 1);
        assert_eq!(roster.get(PlayerId::new(4)).unwrap().seat_index, 3);
        assert!(roster.remove(PlayerId::new(1)).is_none());
    }

    #[test]
    fn test_neighbors_wrap() {
        let roster = roster_of(5);
        assert_eq!(
            roster.neighbors(PlayerId::new(0)),
            Some((PlayerId::new(4), PlayerId::new(1)))
        );
        assert_eq!(
            roster.neighbors(PlayerId::new(4)),
            Some((PlayerId::new(3), PlayerId::new(0)))
        );
        assert_eq!(roster.neighbors(PlayerId::new(9)), None);
    }

    #[test]
    fn test_neighbors_degenerate() {
        let one = roster_of(1);
        assert_eq!(
            one.neighbors(PlayerId::new(0)),
            Some((PlayerId::new(0), PlayerId::new(0)))
        );

        let two = roster_of(2);
        assert_eq!(
            two.neighbors(PlayerId::new(0)),
            Some((PlayerId::new(1), PlayerId::new(1)))
        );
    }

    #[test]
    fn test_clockwise_from() {
        let roster = roster_of(5);
        let order: Vec<u32> = roster.clockwise_from(2).iter().map(|p| p.raw()).collect();
        assert_eq!(order, vec![3, 4, 0, 1, 2]);

        let order: Vec<u32> = roster.clockwise_from(4).iter().map(|p| p.raw()).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_alive_count() {
        let mut roster = roster_of(5);
        roster.get_mut(PlayerId::new(3)).unwrap().kill();
        assert_eq!(roster.alive_count(), 4);
        assert!(roster.living().all(|p| p.id != PlayerId::new(3)));
    }

    #[test]
    fn test_team_queries() {
        let mut roster = roster_of(3);
        roster.get_mut(PlayerId::new(0)).unwrap().character_id = Some(CharacterId::Imp);
        roster.get_mut(PlayerId::new(1)).unwrap().character_id = Some(CharacterId::Chef);

        assert!(roster.is_evil(PlayerId::new(0)));
        assert!(!roster.is_evil(PlayerId::new(1)));
        assert!(!roster.is_evil(PlayerId::new(2))); // unassigned
        assert_eq!(roster.living_on_team(Team::Demon).count(), 1);
        assert_eq!(roster.living_with(CharacterId::Chef).count(), 1);
    }

    #[test]
    fn test_serialization_is_a_plain_list() {
        let roster = roster_of(2);
        let json = serde_json::to_value(&roster).unwrap();
        assert!(json.is_array());
        let back: Roster = serde_json::from_value(json).unwrap();
        assert_eq!(roster, back);
    }
}
