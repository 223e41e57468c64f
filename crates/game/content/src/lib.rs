//! Data-driven content definitions and loaders.
//!
//! This crate houses static battle content and provides loaders for RON/TOML data files:
//! - Combat tunables (data-driven via TOML)
//! - Enemy rosters and player spawn (data-driven via RON)
//! - Player skill catalogs (data-driven via RON)
//! - Terrain layouts (data-driven via RON)
//!
//! Default content is embedded in the binary so a battle can start without any
//! files on disk. All loaders use skirmish-core types directly with serde.

#[cfg(feature = "loaders")]
pub mod embedded;
#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, EnemySpec, LoadResult, MapSpec, PlayerSpec, RosterLoader,
    RosterSpec, SkillLoader, TerrainLoader,
};
