use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use strum::Display;

use super::{AbilitySet, EntityId, ResourceMeter};
use crate::grid::HexCoord;

/// Side an actor fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Faction {
    Player,
    Enemy,
}

/// AI movement policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviorMode {
    /// Close the distance and attack.
    #[default]
    Aggressive,
    /// Keep a band between `safe_distance` and the attack range.
    Kiting,
}

/// Shared "turn in progress" marker for one actor.
///
/// Clones observe the same flag, so collaborators can watch an actor's turn
/// without borrowing battle state.
#[derive(Clone, Debug, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Marks the actor busy, or returns `None` if a turn is already running.
    ///
    /// The flag clears when the returned guard is dropped, including when the
    /// turn future is cancelled mid-flight.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(Arc::clone(&self.0)))
    }
}

/// RAII guard returned by [`BusyFlag::try_acquire`].
#[derive(Debug)]
pub struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Per-combatant state.
///
/// The position is only writable through
/// [`BattleState::move_actor`](super::BattleState::move_actor) so it can never
/// drift from the occupancy index.
#[derive(Clone, Debug)]
pub struct ActorState {
    pub id: EntityId,
    pub faction: Faction,
    position: HexCoord,
    pub hit_points: ResourceMeter,
    pub behavior: BehaviorMode,
    /// Distance at which the actor considers itself in attack position.
    pub attack_range: f32,
    /// Kiting actors retreat when the target gets closer than this.
    pub safe_distance: f32,
    pub abilities: AbilitySet,
    /// Last acquired target, re-validated at the start of every turn.
    pub target: Option<EntityId>,
    busy: BusyFlag,
}

impl ActorState {
    pub const DEFAULT_ATTACK_RANGE: f32 = 60.0;
    pub const DEFAULT_SAFE_DISTANCE: f32 = 100.0;

    pub fn new(id: EntityId, faction: Faction, position: HexCoord, max_hit_points: u32) -> Self {
        Self {
            id,
            faction,
            position,
            hit_points: ResourceMeter::full(max_hit_points),
            behavior: BehaviorMode::default(),
            attack_range: Self::DEFAULT_ATTACK_RANGE,
            safe_distance: Self::DEFAULT_SAFE_DISTANCE,
            abilities: AbilitySet::default(),
            target: None,
            busy: BusyFlag::default(),
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorMode) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_ranges(mut self, attack_range: f32, safe_distance: f32) -> Self {
        self.attack_range = attack_range.max(0.0);
        self.safe_distance = safe_distance.max(0.0);
        self
    }

    pub fn with_abilities(mut self, abilities: impl Into<AbilitySet>) -> Self {
        self.abilities = abilities.into();
        self
    }

    pub fn with_hit_points(mut self, current: u32) -> Self {
        self.hit_points = ResourceMeter::new(current, self.hit_points.maximum);
        self
    }

    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn position(&self) -> HexCoord {
        self.position
    }

    pub(super) fn set_position(&mut self, position: HexCoord) {
        self.position = position;
    }

    pub fn is_alive(&self) -> bool {
        !self.hit_points.is_depleted()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Shared handle to this actor's busy marker.
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    pub fn is_hostile_to(&self, other: &ActorState) -> bool {
        self.faction != other.faction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_flag_rejects_reentry_until_guard_drops() {
        let actor = ActorState::new(EntityId(1), Faction::Enemy, HexCoord::ORIGIN, 10);
        let flag = actor.busy_flag();

        let guard = flag.try_acquire().expect("first acquire succeeds");
        assert!(actor.is_busy());
        assert!(flag.try_acquire().is_none());

        drop(guard);
        assert!(!actor.is_busy());
        assert!(flag.try_acquire().is_some());
    }

    #[test]
    fn builder_clamps_hit_points_to_maximum() {
        let actor =
            ActorState::new(EntityId(2), Faction::Enemy, HexCoord::ORIGIN, 30).with_hit_points(99);
        assert_eq!(actor.hit_points, ResourceMeter::new(30, 30));
    }
}
