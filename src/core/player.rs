//! Player identification and per-player state.
//!
//! ## PlayerId
//!
//! Stable identifier allocated when a player is added. Ids are never
//! reused, so a removed player's id cannot alias a later one.
//!
//! ## Player
//!
//! Seat, character, life/ghost bookkeeping and status flags. Seat indices
//! are owned by the [`Roster`](super::Roster), which keeps them contiguous.

use serde::{Deserialize, Serialize};

use crate::characters::CharacterId;

/// Player identifier.
///
/// Ordered so it can key `im::OrdMap` vote tables deterministically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Reminder-token style flags the storyteller tracks per player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFlags {
    /// Poisoned by the Poisoner (tonight and tomorrow day).
    pub poisoned: bool,
    /// The Drunk, or otherwise drunk.
    pub drunk: bool,
    /// Safe from the Demon tonight.
    pub protected: bool,
    /// Mad about something (storyteller bookkeeping only).
    pub mad: bool,
    /// Free-form reminder tokens, e.g. `master:3` or `slayer-used`.
    pub custom: Vec<String>,
}

impl StatusFlags {
    /// Poisoned or drunk: information abilities give arbitrary results.
    #[must_use]
    pub fn is_impaired(&self) -> bool {
        self.poisoned || self.drunk
    }

    /// Check for a custom reminder token.
    #[must_use]
    pub fn has_custom(&self, token: &str) -> bool {
        self.custom.iter().any(|t| t == token)
    }

    /// Add a custom reminder token if not already present.
    pub fn add_custom(&mut self, token: impl Into<String>) {
        let token = token.into();
        if !self.has_custom(&token) {
            self.custom.push(token);
        }
    }

    /// Remove every custom token starting with `prefix`.
    pub fn remove_custom_prefix(&mut self, prefix: &str) {
        self.custom.retain(|t| !t.starts_with(prefix));
    }
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Stable identifier.
    pub id: PlayerId,

    /// Display name.
    pub name: String,

    /// Position in the circle, `0..N` and contiguous.
    pub seat_index: usize,

    /// Assigned character. `None` until assigned during setup.
    pub character_id: Option<CharacterId>,

    /// Dead players keep their seat.
    pub is_dead: bool,

    /// Set together with `is_dead`; cleared on revive.
    pub is_ghost: bool,

    /// One-way: once a ghost has voted it never votes again.
    pub has_used_ghost_vote: bool,

    /// Status and reminder flags.
    #[serde(rename = "statusFlags")]
    pub status: StatusFlags,
}

impl Player {
    /// Create a living, unassigned player.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, seat_index: usize) -> Self {
        Self {
            id,
            name: name.into(),
            seat_index,
            character_id: None,
            is_dead: false,
            is_ghost: false,
            has_used_ghost_vote: false,
            status: StatusFlags::default(),
        }
    }

    /// Assign a character (builder pattern).
    #[must_use]
    pub fn with_character(mut self, character: CharacterId) -> Self {
        self.character_id = Some(character);
        self
    }

    /// Is this player alive?
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    /// May this player vote or nominate right now?
    ///
    /// Living players always can; ghosts can until their one vote is spent.
    #[must_use]
    pub fn can_vote(&self) -> bool {
        !self.is_dead || (self.is_ghost && !self.has_used_ghost_vote)
    }

    /// Mark dead. Ghost bookkeeping follows death.
    pub fn kill(&mut self) {
        self.is_dead = true;
        self.is_ghost = true;
    }

    /// Bring back to life. A spent ghost vote stays spent.
    pub fn revive(&mut self) {
        self.is_dead = false;
        self.is_ghost = false;
    }

    /// Record a vote. Spends the ghost vote if cast while dead.
    ///
    /// Returns true if the ghost vote was consumed by this call.
    pub fn record_vote(&mut self) -> bool {
        if self.is_dead && self.is_ghost && !self.has_used_ghost_vote {
            self.has_used_ghost_vote = true;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id() {
        let id = PlayerId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{}", id), "Player 7");
        assert!(PlayerId::new(1) < PlayerId::new(2));
    }

    #[test]
    fn test_new_player_is_alive_and_can_vote() {
        let player = Player::new(PlayerId::new(0), "Alice", 0);
        assert!(player.is_alive());
        assert!(player.can_vote());
        assert!(player.character_id.is_none());
    }

    #[test]
    fn test_kill_makes_ghost() {
        let mut player = Player::new(PlayerId::new(0), "Alice", 0);
        player.kill();
        assert!(player.is_dead);
        assert!(player.is_ghost);
        assert!(player.can_vote());
    }

    #[test]
    fn test_ghost_vote_is_spent_once() {
        let mut player = Player::new(PlayerId::new(0), "Alice", 0);
        assert!(!player.record_vote()); // alive votes are free

        player.kill();
        assert!(player.record_vote());
        assert!(player.has_used_ghost_vote);
        assert!(!player.can_vote());
        assert!(!player.record_vote());
    }

    #[test]
    fn test_revive_keeps_spent_ghost_vote() {
        let mut player = Player::new(PlayerId::new(0), "Alice", 0);
        player.kill();
        player.record_vote();
        player.revive();

        assert!(player.is_alive());
        assert!(player.has_used_ghost_vote);
        assert!(player.can_vote());
    }

    #[test]
    fn test_custom_flags() {
        let mut flags = StatusFlags::default();
        flags.add_custom("master:3");
        flags.add_custom("master:3");
        assert_eq!(flags.custom.len(), 1);
        assert!(flags.has_custom("master:3"));

        flags.remove_custom_prefix("master:");
        assert!(flags.custom.is_empty());
    }

    #[test]
    fn test_impaired() {
        let mut flags = StatusFlags::default();
        assert!(!flags.is_impaired());
        flags.drunk = true;
        assert!(flags.is_impaired());
    }

    #[test]
    fn test_serialization() {
        let mut player = Player::new(PlayerId::new(3), "Bob", 2);
        player.status.poisoned = true;
        player.status.add_custom("slayer-used");

        let json = serde_json::to_string(&player).unwrap();
        let deserialized: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(player, deserialized);
    }
}
