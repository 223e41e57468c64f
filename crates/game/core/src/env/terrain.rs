use crate::grid::{HexCoord, HexLayout, WorldPoint};

/// Static terrain oracle exposing the immutable board layout.
///
/// Implementations are owned by the map collaborator. The combat core only reads
/// from them, so the trait has no mutating methods.
pub trait TerrainOracle: Send + Sync {
    /// Returns the terrain descriptor of `coord`, or `None` if the cell has no data.
    fn tile(&self, coord: HexCoord) -> Option<TerrainTile>;

    /// Pixel geometry used to place cells in the world.
    fn layout(&self) -> HexLayout {
        HexLayout::default()
    }

    /// Returns true if actors may stand on `coord`.
    ///
    /// Fails closed: cells without terrain data are never walkable.
    fn is_walkable(&self, coord: HexCoord) -> bool {
        self.tile(coord).is_some_and(TerrainTile::is_walkable)
    }

    /// Continuous position of the center of `coord`.
    fn world_position(&self, coord: HexCoord) -> WorldPoint {
        self.layout().world_position(coord)
    }
}

/// Immutable descriptor for a cell in the static layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainTile {
    terrain: TerrainKind,
}

impl TerrainTile {
    pub const fn new(terrain: TerrainKind) -> Self {
        Self { terrain }
    }

    pub fn terrain(self) -> TerrainKind {
        self.terrain
    }

    pub fn is_walkable(self) -> bool {
        self.terrain.is_walkable()
    }
}

/// Canonical terrain classes for board cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Floor,
    Wall,
    Water,
}

impl TerrainKind {
    pub fn is_walkable(self) -> bool {
        matches!(self, TerrainKind::Floor)
    }

    /// Parses the single-character map notation used by content files.
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(TerrainKind::Floor),
            '#' => Some(TerrainKind::Wall),
            '~' => Some(TerrainKind::Water),
            _ => None,
        }
    }
}
