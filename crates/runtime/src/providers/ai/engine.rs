use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use skirmish_core::{Ability, AbilitySet, CombatConfig, HexCoord, HexGrid, TerrainOracle};
use tracing::debug;

use super::abilities::select_ability;
use super::context::TurnContext;
use super::destination::choose_destination;
use super::movement::{MovementIntent, movement_intent};

/// Per-turn decisions for enemy actors: where to step and what to swing.
///
/// Owns the random source used for ability choice; seed it for reproducible
/// battles.
pub struct DecisionEngine {
    config: Arc<CombatConfig>,
    rng: StdRng,
}

impl DecisionEngine {
    pub fn new(config: Arc<CombatConfig>) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(config: Arc<CombatConfig>, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn shared_config(&self) -> Arc<CombatConfig> {
        Arc::clone(&self.config)
    }

    /// Movement intent and the cell that realizes it.
    ///
    /// The returned cell equals `ctx.position` when holding or boxed in.
    pub fn plan_destination<T>(
        &self,
        ctx: &TurnContext,
        grid: &HexGrid<'_, T>,
    ) -> (MovementIntent, HexCoord)
    where
        T: TerrainOracle + ?Sized,
    {
        let intent = movement_intent(
            ctx.behavior,
            ctx.distance,
            ctx.attack_range,
            ctx.safe_distance,
            &self.config,
        );

        let destination = match intent {
            MovementIntent::Hold => ctx.position,
            MovementIntent::Advance => choose_destination(grid, ctx.position, ctx.target_world),
            MovementIntent::Retreat => choose_destination(grid, ctx.position, ctx.repulsion_point()),
        };

        debug!(
            target: "runtime::turn",
            actor = %ctx.actor,
            %intent,
            distance = ctx.distance,
            from = %ctx.position,
            to = %destination,
            "movement planned"
        );
        (intent, destination)
    }

    /// Ability for the current distance, or `None` to pass.
    pub fn select_ability<'a>(
        &mut self,
        ctx: &TurnContext,
        abilities: &'a AbilitySet,
    ) -> Option<&'a Ability> {
        select_ability(
            abilities,
            ctx.behavior,
            ctx.attack_range,
            ctx.distance,
            &self.config,
            &mut self.rng,
        )
    }
}
