//! Hex grid geometry and the adjacency query layer.
mod coord;
mod layout;
mod query;

pub use coord::{HexCoord, HexDirection, Neighbors};
pub use layout::{HexLayout, WorldPoint};
pub use query::HexGrid;
