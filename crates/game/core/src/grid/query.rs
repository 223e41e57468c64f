//! Read-only adjacency and walkability queries.

use arrayvec::ArrayVec;

use super::{HexCoord, Neighbors, WorldPoint};
use crate::env::TerrainOracle;
use crate::state::OccupancyMap;

/// Grid adjacency service over borrowed terrain and occupancy data.
///
/// Purely derived: constructing or querying a `HexGrid` never mutates anything.
pub struct HexGrid<'a, T: TerrainOracle + ?Sized> {
    terrain: &'a T,
    occupancy: &'a OccupancyMap,
}

impl<T: TerrainOracle + ?Sized> Clone for HexGrid<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: TerrainOracle + ?Sized> Copy for HexGrid<'_, T> {}

impl<'a, T: TerrainOracle + ?Sized> HexGrid<'a, T> {
    pub fn new(terrain: &'a T, occupancy: &'a OccupancyMap) -> Self {
        Self { terrain, occupancy }
    }

    /// The six geometric neighbors of `coord`, regardless of board bounds.
    pub fn neighbors(&self, coord: HexCoord) -> Neighbors {
        coord.neighbors()
    }

    /// False for cells without terrain data.
    pub fn is_walkable(&self, coord: HexCoord) -> bool {
        self.terrain.is_walkable(coord)
    }

    pub fn is_occupied(&self, coord: HexCoord) -> bool {
        self.occupancy.is_occupied(coord)
    }

    /// Neighbors that are walkable and unoccupied, in canonical direction order.
    pub fn valid_moves(&self, from: HexCoord) -> ArrayVec<HexCoord, 6> {
        from.neighbors()
            .filter(|cell| self.is_walkable(*cell) && !self.is_occupied(*cell))
            .collect()
    }

    pub fn world_position(&self, coord: HexCoord) -> WorldPoint {
        self.terrain.world_position(coord)
    }

    /// World-space distance between two cell centers.
    pub fn distance(&self, a: HexCoord, b: HexCoord) -> f32 {
        self.world_position(a).distance(self.world_position(b))
    }
}
