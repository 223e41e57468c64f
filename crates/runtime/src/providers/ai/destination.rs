//! Destination choice over the hex grid.

use skirmish_core::{HexCoord, HexGrid, TerrainOracle, WorldPoint};

/// Picks the valid move whose center is closest to `goal`.
///
/// Ties keep the first candidate in canonical direction order. Returns `from`
/// unchanged when every neighbor is blocked.
///
/// Advancing passes the target's position as `goal`; retreating passes the
/// repulsion point so the same minimization steps away.
pub fn choose_destination<T>(grid: &HexGrid<'_, T>, from: HexCoord, goal: WorldPoint) -> HexCoord
where
    T: TerrainOracle + ?Sized,
{
    let mut best: Option<(HexCoord, f32)> = None;

    for cell in grid.valid_moves(from) {
        let distance = grid.world_position(cell).distance(goal);
        match best {
            Some((_, closest)) if distance >= closest => {}
            _ => best = Some((cell, distance)),
        }
    }

    best.map_or(from, |(cell, _)| cell)
}
