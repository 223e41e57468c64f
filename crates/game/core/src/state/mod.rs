//! Battle state data structures.
//!
//! The battle owns every [`ActorState`] together with the [`OccupancyMap`]
//! that indexes them. Only the actor whose turn is running mutates its own
//! entry; the occupancy map changes only through [`BattleState::move_actor`],
//! [`BattleState::spawn`] and [`BattleState::remove_defeated`].
mod ability;
mod actor;
mod common;
mod occupancy;

use std::collections::BTreeMap;

use strum::Display;

pub use ability::{Ability, AbilitySet};
pub use actor::{ActorState, BehaviorMode, BusyFlag, BusyGuard, Faction};
pub use common::{EntityId, ResourceMeter};
pub use occupancy::{OccupancyError, OccupancyMap};

use crate::env::TerrainOracle;
use crate::grid::{HexCoord, HexGrid};

/// Overall result of the battle so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleStatus {
    Ongoing,
    /// Every enemy has been defeated.
    Victory,
    /// Every player-side actor has been defeated.
    Defeat,
}

#[derive(Clone, Debug, Default)]
pub struct BattleState {
    actors: BTreeMap<EntityId, ActorState>,
    occupancy: OccupancyMap,
}

impl BattleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an actor and claims its starting cell.
    pub fn spawn(&mut self, actor: ActorState) -> Result<(), OccupancyError> {
        if self.actors.contains_key(&actor.id) {
            return Err(OccupancyError::AlreadyPlaced(actor.id));
        }
        self.occupancy.place(actor.id, actor.position())?;
        self.actors.insert(actor.id, actor);
        Ok(())
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.actors.get_mut(&id)
    }

    /// All actors in id order.
    pub fn actors(&self) -> impl Iterator<Item = &ActorState> {
        self.actors.values()
    }

    /// Living actors of `faction` in id order.
    pub fn living(&self, faction: Faction) -> impl Iterator<Item = &ActorState> {
        self.actors
            .values()
            .filter(move |actor| actor.faction == faction && actor.is_alive())
    }

    pub fn occupancy(&self) -> &OccupancyMap {
        &self.occupancy
    }

    /// Grid queries over `terrain` and this battle's occupancy.
    pub fn grid<'a, T>(&'a self, terrain: &'a T) -> HexGrid<'a, T>
    where
        T: TerrainOracle + ?Sized,
    {
        HexGrid::new(terrain, &self.occupancy)
    }

    /// Moves an actor, claiming `to` and releasing its origin in one step.
    ///
    /// Returns the origin cell. Walkability is the caller's concern; this only
    /// guards occupancy.
    pub fn move_actor(&mut self, id: EntityId, to: HexCoord) -> Result<HexCoord, OccupancyError> {
        let actor = self
            .actors
            .get_mut(&id)
            .ok_or(OccupancyError::NotPlaced(id))?;
        let from = self.occupancy.relocate(id, to)?;
        actor.set_position(to);
        Ok(from)
    }

    /// Returns true if `target` exists, is alive and is hostile to `actor`.
    pub fn is_valid_target(&self, actor: EntityId, target: EntityId) -> bool {
        match (self.actors.get(&actor), self.actors.get(&target)) {
            (Some(actor), Some(target)) => target.is_alive() && actor.is_hostile_to(target),
            _ => false,
        }
    }

    /// Closest living hostile actor by grid steps; ties go to the lower id.
    pub fn nearest_hostile(&self, id: EntityId) -> Option<EntityId> {
        let actor = self.actors.get(&id)?;
        self.actors
            .values()
            .filter(|other| other.is_alive() && actor.is_hostile_to(other))
            .min_by_key(|other| (actor.position().hex_distance(other.position()), other.id))
            .map(|other| other.id)
    }

    /// Removes actors whose hit points reached zero and frees their cells.
    pub fn remove_defeated(&mut self) -> Vec<EntityId> {
        let defeated: Vec<EntityId> = self
            .actors
            .values()
            .filter(|actor| !actor.is_alive())
            .map(|actor| actor.id)
            .collect();

        for id in &defeated {
            self.actors.remove(id);
            self.occupancy.release(*id);
        }
        defeated
    }

    pub fn status(&self) -> BattleStatus {
        if self.living(Faction::Player).next().is_none() {
            BattleStatus::Defeat
        } else if self.living(Faction::Enemy).next().is_none() {
            BattleStatus::Victory
        } else {
            BattleStatus::Ongoing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(col: i32, row: i32) -> ActorState {
        ActorState::new(EntityId::PLAYER, Faction::Player, HexCoord::new(col, row), 100)
    }

    fn enemy_at(id: u32, col: i32, row: i32) -> ActorState {
        ActorState::new(EntityId(id), Faction::Enemy, HexCoord::new(col, row), 20)
    }

    #[test]
    fn spawn_rejects_shared_cells() {
        let mut state = BattleState::new();
        state.spawn(player_at(0, 0)).unwrap();
        assert!(matches!(
            state.spawn(enemy_at(1, 0, 0)),
            Err(OccupancyError::Occupied { .. })
        ));
        assert!(state.actor(EntityId(1)).is_none());
    }

    #[test]
    fn move_actor_keeps_position_and_occupancy_in_sync() {
        let mut state = BattleState::new();
        state.spawn(enemy_at(1, 2, 2)).unwrap();

        let from = state.move_actor(EntityId(1), HexCoord::new(2, 3)).unwrap();

        assert_eq!(from, HexCoord::new(2, 2));
        assert_eq!(state.actor(EntityId(1)).unwrap().position(), HexCoord::new(2, 3));
        assert_eq!(state.occupancy().occupant(HexCoord::new(2, 3)), Some(EntityId(1)));
        assert!(!state.occupancy().is_occupied(HexCoord::new(2, 2)));
    }

    #[test]
    fn nearest_hostile_prefers_closest_then_lowest_id() {
        let mut state = BattleState::new();
        state.spawn(player_at(0, 0)).unwrap();
        state.spawn(enemy_at(2, 0, 2)).unwrap();
        state.spawn(enemy_at(1, 0, 4)).unwrap();
        state.spawn(enemy_at(3, 2, 0)).unwrap();

        assert_eq!(state.nearest_hostile(EntityId::PLAYER), Some(EntityId(2)));
        assert_eq!(state.nearest_hostile(EntityId(1)), Some(EntityId::PLAYER));
    }

    #[test]
    fn status_tracks_living_factions() {
        let mut state = BattleState::new();
        state.spawn(player_at(0, 0)).unwrap();
        state.spawn(enemy_at(1, 1, 1)).unwrap();
        assert_eq!(state.status(), BattleStatus::Ongoing);

        state.actor_mut(EntityId(1)).unwrap().hit_points.drain(50);
        assert_eq!(state.status(), BattleStatus::Victory);
        assert_eq!(state.remove_defeated(), vec![EntityId(1)]);
        assert!(!state.occupancy().is_occupied(HexCoord::new(1, 1)));

        state.actor_mut(EntityId::PLAYER).unwrap().hit_points.drain(100);
        assert_eq!(state.status(), BattleStatus::Defeat);
    }
}
