//! Effect definitions.
//!
//! Handlers never touch the roster directly. They describe what should
//! happen as a list of effects, and the
//! [`EffectResolver`](super::EffectResolver) applies them afterwards, so a
//! failed resolution leaves the game untouched.

use serde::{Deserialize, Serialize};

use crate::characters::CharacterId;
use crate::core::PlayerId;

/// An atomic change to the roster.
///
/// ## Life
///
/// - `Kill`: mark dead (and a ghost)
///
/// ## Status
///
/// - `Poison` / `ClearPoison`: the Poisoner's single poison token
/// - `Protect`: safe from the Demon until the next night begins
/// - `AddReminder` / `RemoveReminders`: free-form reminder tokens
///
/// ## Character
///
/// - `ChangeCharacter`: star pass and other role changes
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Kill a living player.
    Kill { target: PlayerId },

    /// Poison a player.
    Poison { target: PlayerId },

    /// Remove poison from everyone.
    ClearPoison,

    /// Protect a player from the Demon.
    Protect { target: PlayerId },

    /// Replace a player's character.
    ChangeCharacter {
        target: PlayerId,
        character: CharacterId,
    },

    /// Add a reminder token.
    AddReminder { target: PlayerId, token: String },

    /// Remove every reminder token starting with `prefix`.
    RemoveReminders { target: PlayerId, prefix: String },
}

impl Effect {
    /// Create a kill effect.
    #[must_use]
    pub fn kill(target: PlayerId) -> Self {
        Self::Kill { target }
    }

    /// Create a reminder effect.
    pub fn remind(target: PlayerId, token: impl Into<String>) -> Self {
        Self::AddReminder {
            target,
            token: token.into(),
        }
    }

    /// The player this effect touches, if it has a single target.
    #[must_use]
    pub fn target(&self) -> Option<PlayerId> {
        match self {
            Effect::Kill { target }
            | Effect::Poison { target }
            | Effect::Protect { target }
            | Effect::ChangeCharacter { target, .. }
            | Effect::AddReminder { target, .. }
            | Effect::RemoveReminders { target, .. } => Some(*target),
            Effect::ClearPoison => None,
        }
    }
}
