//! Traits describing read-only world data.
//!
//! Oracles expose data owned by collaborators outside the combat core. The
//! core borrows them for the duration of a query and never mutates them.
mod map;
mod terrain;

pub use map::{MapDimensions, TerrainMap};
pub use terrain::{TerrainKind, TerrainOracle, TerrainTile};
