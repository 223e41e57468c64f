//! Event payloads for each topic.

use serde::{Deserialize, Serialize};
use skirmish_core::{DamageOutcome, EntityId, HexCoord, ReactionCause, ReactionOutcome};

use crate::turn::TurnOutcome;

/// Turn lifecycle events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// An actor's turn began and the actor is now busy.
    Started { actor: EntityId },

    /// The actor moved one cell.
    Moved {
        actor: EntityId,
        from: HexCoord,
        to: HexCoord,
    },

    /// The turn finished and the actor is no longer busy.
    Ended {
        actor: EntityId,
        outcome: TurnOutcome,
    },
}

/// Reaction window events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReactionEvent {
    /// A window opened against `defender`.
    Armed {
        attacker: EntityId,
        defender: EntityId,
        expected_token: String,
        window_ms: u64,
    },

    /// The window resolved. `cause` is kept for diagnostics only; gameplay
    /// branches on `outcome.success`.
    Resolved {
        attacker: EntityId,
        defender: EntityId,
        outcome: ReactionOutcome,
    },
}

impl ReactionEvent {
    pub fn cause(&self) -> Option<ReactionCause> {
        match self {
            ReactionEvent::Armed { .. } => None,
            ReactionEvent::Resolved { outcome, .. } => Some(outcome.cause),
        }
    }
}

/// Damage and defeat events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// An attack landed or was nullified.
    DamageApplied {
        attacker: EntityId,
        target: EntityId,
        ability: String,
        damage: DamageOutcome,
    },

    /// An actor's hit points reached zero.
    Defeated { actor: EntityId },
}
