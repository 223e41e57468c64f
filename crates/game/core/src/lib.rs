//! Deterministic combat rules and data types shared across the battle runtime.
//!
//! `skirmish-core` defines the hex grid, the per-actor combat state, damage and
//! reaction rules, and the player's command model. Everything here is
//! synchronous and side-effect free apart from explicit `&mut` updates; timing,
//! input and presentation live in `skirmish-runtime`.
pub mod action;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod grid;
pub mod state;

pub use action::{ActionPoints, AttackType, CommandError, PlayerSkill, SkillBook};
pub use combat::{
    DamageOutcome, ReactionCause, ReactionKind, ReactionOutcome, ReactionRequest, apply_damage,
    normalize_token,
};
pub use config::{CombatConfig, ConfigError};
pub use env::{MapDimensions, TerrainKind, TerrainMap, TerrainOracle, TerrainTile};
pub use error::{ErrorSeverity, GameError};
pub use grid::{HexCoord, HexDirection, HexGrid, HexLayout, Neighbors, WorldPoint};
pub use state::{
    Ability, AbilitySet, ActorState, BattleState, BattleStatus, BehaviorMode, BusyFlag, BusyGuard,
    EntityId, Faction, OccupancyError, OccupancyMap, ResourceMeter,
};
