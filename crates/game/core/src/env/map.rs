use std::collections::HashMap;

use super::{TerrainKind, TerrainOracle, TerrainTile};
use crate::grid::{HexCoord, HexLayout};

/// Board dimensions in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, coord: HexCoord) -> bool {
        coord.col >= 0
            && coord.row >= 0
            && (coord.col as u32) < self.width
            && (coord.row as u32) < self.height
    }
}

/// [`TerrainOracle`] backed by an in-memory tile table.
///
/// Holds the immutable board for one battle. Cells missing from the table
/// have no terrain data and are therefore never walkable.
#[derive(Clone, Debug)]
pub struct TerrainMap {
    dimensions: MapDimensions,
    layout: HexLayout,
    tiles: HashMap<HexCoord, TerrainTile>,
}

impl TerrainMap {
    pub fn new(dimensions: MapDimensions, tiles: HashMap<HexCoord, TerrainTile>) -> Self {
        Self {
            dimensions,
            layout: HexLayout::default(),
            tiles,
        }
    }

    /// A `width x height` board made entirely of floor.
    pub fn filled(width: u32, height: u32) -> Self {
        let dimensions = MapDimensions::new(width, height);
        let tiles = (0..width as i32)
            .flat_map(|col| (0..height as i32).map(move |row| HexCoord::new(col, row)))
            .map(|coord| (coord, TerrainTile::new(TerrainKind::Floor)))
            .collect();
        Self::new(dimensions, tiles)
    }

    pub fn with_layout(mut self, layout: HexLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Overrides a single cell. Cells outside the dimensions are ignored.
    pub fn set(&mut self, coord: HexCoord, terrain: TerrainKind) {
        if self.dimensions.contains(coord) {
            self.tiles.insert(coord, TerrainTile::new(terrain));
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }
}

impl TerrainOracle for TerrainMap {
    fn tile(&self, coord: HexCoord) -> Option<TerrainTile> {
        self.tiles.get(&coord).copied()
    }

    fn layout(&self) -> HexLayout {
        self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_board_is_walkable_inside_and_closed_outside() {
        let map = TerrainMap::filled(4, 3);

        assert!(map.is_walkable(HexCoord::new(0, 0)));
        assert!(map.is_walkable(HexCoord::new(3, 2)));
        assert!(!map.is_walkable(HexCoord::new(4, 0)));
        assert!(!map.is_walkable(HexCoord::new(-1, 1)));
    }

    #[test]
    fn walls_and_water_block_movement() {
        let mut map = TerrainMap::filled(3, 3);
        map.set(HexCoord::new(1, 1), TerrainKind::Wall);
        map.set(HexCoord::new(2, 1), TerrainKind::Water);
        map.set(HexCoord::new(9, 9), TerrainKind::Floor);

        assert!(!map.is_walkable(HexCoord::new(1, 1)));
        assert!(!map.is_walkable(HexCoord::new(2, 1)));
        assert!(map.tile(HexCoord::new(9, 9)).is_none());
    }
}
