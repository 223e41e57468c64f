//! Per-turn blackboard shared by the decision steps.

use skirmish_core::{
    Ability, ActorState, BehaviorMode, EntityId, HexCoord, HexGrid, TerrainOracle, WorldPoint,
};

/// Transient values for one actor's turn against one target.
///
/// Created when the target is acquired and discarded when the turn ends.
/// Positions are snapshots; call [`TurnContext::relocate`] after the actor
/// moves so distance math stays current.
#[derive(Clone, Debug)]
pub struct TurnContext {
    pub actor: EntityId,
    pub target: EntityId,
    pub behavior: BehaviorMode,
    pub attack_range: f32,
    pub safe_distance: f32,

    pub position: HexCoord,
    pub world: WorldPoint,
    pub target_position: HexCoord,
    pub target_world: WorldPoint,
    /// World distance between actor and target cell centers.
    pub distance: f32,

    pub destination: Option<HexCoord>,
    pub ability: Option<Ability>,
}

impl TurnContext {
    pub fn new<T>(actor: &ActorState, target: &ActorState, grid: &HexGrid<'_, T>) -> Self
    where
        T: TerrainOracle + ?Sized,
    {
        let world = grid.world_position(actor.position());
        let target_world = grid.world_position(target.position());

        Self {
            actor: actor.id,
            target: target.id,
            behavior: actor.behavior,
            attack_range: actor.attack_range,
            safe_distance: actor.safe_distance,
            position: actor.position(),
            world,
            target_position: target.position(),
            target_world,
            distance: world.distance(target_world),
            destination: None,
            ability: None,
        }
    }

    /// Updates the actor's position and recomputes the distance.
    pub fn relocate<T>(&mut self, position: HexCoord, grid: &HexGrid<'_, T>)
    where
        T: TerrainOracle + ?Sized,
    {
        self.position = position;
        self.world = grid.world_position(position);
        self.distance = self.world.distance(self.target_world);
    }

    /// Point the actor flees toward: its own position mirrored away from the target.
    pub fn repulsion_point(&self) -> WorldPoint {
        self.world.reflect_away_from(self.target_world)
    }
}
