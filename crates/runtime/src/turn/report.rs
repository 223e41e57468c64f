use serde::{Deserialize, Serialize};
use skirmish_core::{DamageOutcome, EntityId, HexCoord, ReactionOutcome};

/// Why a turn did not run at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The actor is already mid-turn.
    Busy,
    /// No such actor in the battle.
    Missing,
    /// The actor has no hit points left.
    Defeated,
}

/// Why a started turn ended early.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbortReason {
    /// Arbiter misuse, e.g. arming while another window is open.
    Protocol { code: String, message: String },
    /// The battle was aborted while the turn was suspended.
    Cancelled,
}

/// How a turn ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The turn never started.
    Skipped(SkipReason),
    /// No target could be acquired; the actor waited.
    Idle,
    /// No ability could reach; the actor may have moved but did not attack.
    Passed,
    /// An attack went through reaction arbitration and damage was applied.
    Attacked,
    /// The turn was cut short.
    Aborted(AbortReason),
}

impl TurnOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, TurnOutcome::Skipped(_))
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, TurnOutcome::Aborted(_))
    }
}

/// Everything observable about one finished turn.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    pub actor: EntityId,
    pub target: Option<EntityId>,
    /// `(from, to)` if the actor changed cells.
    pub moved: Option<(HexCoord, HexCoord)>,
    pub ability: Option<String>,
    pub reaction: Option<ReactionOutcome>,
    pub damage: Option<DamageOutcome>,
    pub outcome: TurnOutcome,
}

impl TurnReport {
    pub(crate) fn new(actor: EntityId) -> Self {
        Self {
            actor,
            target: None,
            moved: None,
            ability: None,
            reaction: None,
            damage: None,
            outcome: TurnOutcome::Idle,
        }
    }

    pub(crate) fn finish(mut self, outcome: TurnOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// True if the target's hit points reached zero this turn.
    pub fn defeated_target(&self) -> bool {
        self.damage.is_some_and(|damage| damage.applied > 0 && damage.defeated)
    }
}
