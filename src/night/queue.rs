//! Night action queue.
//!
//! Built fresh at the start of every night from the live roster: every
//! living player whose character wakes tonight gets one entry, sorted by
//! the character's night order. A cursor walks the entries; completing or
//! skipping an entry advances it by one and never moves it backwards.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::characters::{catalog, CharacterId};
use crate::core::{PlayerId, Roster};

/// One character waking tonight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NightAction {
    /// The waking character.
    pub character_id: CharacterId,

    /// Players holding that character.
    /// One per action in the base game; SmallVec keeps that inline.
    pub player_ids: SmallVec<[PlayerId; 1]>,

    /// Night order number of the character.
    pub order: u32,

    /// Completed or skipped.
    pub completed: bool,
}

/// Ordered actions for one night.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NightQueue {
    /// Night counter this queue was built for.
    pub night_number: u32,

    /// First night uses the first-night sheet.
    pub is_first_night: bool,

    /// Actions in wake order.
    pub actions: Vec<NightAction>,

    /// Cursor; equal to `actions.len()` once the night is done.
    pub current_index: usize,
}

impl NightQueue {
    /// Build the queue for a night.
    ///
    /// Filters to living players with an assigned character that wakes on
    /// this night type, then sorts by order number. The sort is stable, so
    /// ties keep seat order.
    #[must_use]
    pub fn build(players: &Roster, is_first_night: bool, night_number: u32) -> Self {
        let mut actions: Vec<NightAction> = players
            .living()
            .filter_map(|player| {
                let character = player.character_id?;
                let def = catalog::definition(character);
                def.wakes(is_first_night).then(|| NightAction {
                    character_id: character,
                    player_ids: SmallVec::from_elem(player.id, 1),
                    order: def.night_order(is_first_night),
                    completed: false,
                })
            })
            .collect();
        actions.sort_by_key(|a| a.order);

        Self {
            night_number,
            is_first_night,
            actions,
            current_index: 0,
        }
    }

    /// The action under the cursor, or `None` once complete.
    #[must_use]
    pub fn current_action(&self) -> Option<&NightAction> {
        self.actions.get(self.current_index)
    }

    /// Mark the current action completed and advance.
    ///
    /// Returns false (and does nothing) if the night is already complete.
    pub fn complete_current(&mut self) -> bool {
        self.advance()
    }

    /// Skip the current action. Marks it completed and advances, so a
    /// skipped character is not woken again tonight.
    pub fn skip_current(&mut self) -> bool {
        self.advance()
    }

    fn advance(&mut self) -> bool {
        match self.actions.get_mut(self.current_index) {
            Some(action) => {
                action.completed = true;
                self.current_index += 1;
                true
            }
            None => false,
        }
    }

    /// All actions handled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current_index >= self.actions.len()
    }

    /// Number of actions tonight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// No character wakes tonight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Actions not yet handled.
    pub fn remaining(&self) -> impl Iterator<Item = &NightAction> {
        self.actions.iter().skip(self.current_index)
    }
}
