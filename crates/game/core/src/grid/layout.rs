//! Conversion from grid cells to continuous world positions.
//!
//! Distances used by the AI (ability ranges, kiting bands) are measured in
//! world units between cell centers, not in grid steps.

use super::HexCoord;

/// Continuous 2D point in world units (pixels for the default layout).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

impl WorldPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point mirrored through `self`: `self + (self - other)`.
    ///
    /// Moving toward the result moves directly away from `other`.
    pub fn reflect_away_from(self, other: WorldPoint) -> WorldPoint {
        WorldPoint::new(2.0 * self.x - other.x, 2.0 * self.y - other.y)
    }
}

/// Pixel geometry of a flat-top hex grid with odd columns shifted down.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HexLayout {
    /// Tile width, corner to corner.
    pub tile_width: f32,
    /// Tile height, edge to edge.
    pub tile_height: f32,
    /// World position of the center of cell (0, 0).
    pub origin: WorldPoint,
}

impl HexLayout {
    pub const DEFAULT_TILE_WIDTH: f32 = 64.0;
    pub const DEFAULT_TILE_HEIGHT: f32 = 56.0;

    pub const fn new(tile_width: f32, tile_height: f32) -> Self {
        Self {
            tile_width,
            tile_height,
            origin: WorldPoint::new(0.0, 0.0),
        }
    }

    /// Returns the world position of the center of `coord`.
    pub fn world_position(&self, coord: HexCoord) -> WorldPoint {
        let column_step = self.tile_width * 0.75;
        let shift = if coord.col & 1 == 1 {
            self.tile_height / 2.0
        } else {
            0.0
        };
        WorldPoint::new(
            self.origin.x + coord.col as f32 * column_step,
            self.origin.y + coord.row as f32 * self.tile_height + shift,
        )
    }
}

impl Default for HexLayout {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TILE_WIDTH, Self::DEFAULT_TILE_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_are_roughly_one_tile_away() {
        let layout = HexLayout::default();
        let center = HexCoord::new(4, 4);
        let origin = layout.world_position(center);

        for neighbor in center.neighbors() {
            let distance = origin.distance(layout.world_position(neighbor));
            assert!(
                (50.0..=60.0).contains(&distance),
                "{neighbor} is {distance} away"
            );
        }
    }

    #[test]
    fn odd_columns_are_shifted_down() {
        let layout = HexLayout::default();
        let even = layout.world_position(HexCoord::new(0, 0));
        let odd = layout.world_position(HexCoord::new(1, 0));
        assert_eq!(even, WorldPoint::new(0.0, 0.0));
        assert_eq!(odd, WorldPoint::new(48.0, 28.0));
    }

    #[test]
    fn reflection_mirrors_through_self() {
        let actor = WorldPoint::new(10.0, 10.0);
        let threat = WorldPoint::new(40.0, -20.0);
        assert_eq!(actor.reflect_away_from(threat), WorldPoint::new(-20.0, 40.0));
    }
}
