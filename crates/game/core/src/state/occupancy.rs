//! Cell ownership index.
//!
//! Keeps cell→actor and actor→cell lookups in lockstep. Every mutation updates
//! both maps inside one `&mut self` call, so readers never see a cell claimed
//! by zero or two actors mid-move.

use std::collections::HashMap;

use super::EntityId;
use crate::error::{ErrorSeverity, GameError};
use crate::grid::HexCoord;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OccupancyError {
    #[error("cell {cell} is already occupied by {occupant}")]
    Occupied { cell: HexCoord, occupant: EntityId },

    #[error("actor {0} is already placed on the board")]
    AlreadyPlaced(EntityId),

    #[error("actor {0} is not on the board")]
    NotPlaced(EntityId),
}

impl GameError for OccupancyError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            OccupancyError::Occupied { .. } => ErrorSeverity::Recoverable,
            OccupancyError::AlreadyPlaced(_) => ErrorSeverity::Validation,
            OccupancyError::NotPlaced(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            OccupancyError::Occupied { .. } => "OCCUPANCY_CELL_OCCUPIED",
            OccupancyError::AlreadyPlaced(_) => "OCCUPANCY_ALREADY_PLACED",
            OccupancyError::NotPlaced(_) => "OCCUPANCY_NOT_PLACED",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct OccupancyMap {
    by_cell: HashMap<HexCoord, EntityId>,
    by_actor: HashMap<EntityId, HexCoord>,
}

impl OccupancyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn occupant(&self, cell: HexCoord) -> Option<EntityId> {
        self.by_cell.get(&cell).copied()
    }

    pub fn is_occupied(&self, cell: HexCoord) -> bool {
        self.by_cell.contains_key(&cell)
    }

    pub fn position_of(&self, actor: EntityId) -> Option<HexCoord> {
        self.by_actor.get(&actor).copied()
    }

    pub fn len(&self) -> usize {
        self.by_actor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_actor.is_empty()
    }

    pub fn place(&mut self, actor: EntityId, cell: HexCoord) -> Result<(), OccupancyError> {
        if self.by_actor.contains_key(&actor) {
            return Err(OccupancyError::AlreadyPlaced(actor));
        }
        if let Some(occupant) = self.occupant(cell) {
            return Err(OccupancyError::Occupied { cell, occupant });
        }

        self.by_cell.insert(cell, actor);
        self.by_actor.insert(actor, cell);
        Ok(())
    }

    /// Moves `actor` to `to`, releasing its previous cell. Returns the origin.
    ///
    /// Moving onto the current cell is a no-op.
    pub fn relocate(&mut self, actor: EntityId, to: HexCoord) -> Result<HexCoord, OccupancyError> {
        let from = self
            .position_of(actor)
            .ok_or(OccupancyError::NotPlaced(actor))?;
        if from == to {
            return Ok(from);
        }
        if let Some(occupant) = self.occupant(to) {
            return Err(OccupancyError::Occupied { cell: to, occupant });
        }

        self.by_cell.remove(&from);
        self.by_cell.insert(to, actor);
        self.by_actor.insert(actor, to);
        Ok(from)
    }

    /// Removes `actor` from the board, returning the cell it held.
    pub fn release(&mut self, actor: EntityId) -> Option<HexCoord> {
        let cell = self.by_actor.remove(&actor)?;
        self.by_cell.remove(&cell);
        Some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relocate_swaps_cells_in_one_step() {
        let mut map = OccupancyMap::new();
        map.place(EntityId(1), HexCoord::new(0, 0)).unwrap();

        let from = map.relocate(EntityId(1), HexCoord::new(0, 1)).unwrap();

        assert_eq!(from, HexCoord::new(0, 0));
        assert!(!map.is_occupied(HexCoord::new(0, 0)));
        assert_eq!(map.occupant(HexCoord::new(0, 1)), Some(EntityId(1)));
        assert_eq!(map.position_of(EntityId(1)), Some(HexCoord::new(0, 1)));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn relocate_onto_occupied_cell_leaves_map_untouched() {
        let mut map = OccupancyMap::new();
        map.place(EntityId(1), HexCoord::new(0, 0)).unwrap();
        map.place(EntityId(2), HexCoord::new(0, 1)).unwrap();

        let err = map.relocate(EntityId(1), HexCoord::new(0, 1)).unwrap_err();

        assert_eq!(
            err,
            OccupancyError::Occupied {
                cell: HexCoord::new(0, 1),
                occupant: EntityId(2)
            }
        );
        assert_eq!(map.position_of(EntityId(1)), Some(HexCoord::new(0, 0)));
        assert_eq!(map.occupant(HexCoord::new(0, 1)), Some(EntityId(2)));
    }

    #[test]
    fn place_rejects_double_claims() {
        let mut map = OccupancyMap::new();
        map.place(EntityId(1), HexCoord::new(3, 3)).unwrap();

        assert!(matches!(
            map.place(EntityId(2), HexCoord::new(3, 3)),
            Err(OccupancyError::Occupied { .. })
        ));
        assert_eq!(
            map.place(EntityId(1), HexCoord::new(4, 4)),
            Err(OccupancyError::AlreadyPlaced(EntityId(1)))
        );
    }

    #[test]
    fn release_frees_the_cell() {
        let mut map = OccupancyMap::new();
        map.place(EntityId(7), HexCoord::new(1, 1)).unwrap();

        assert_eq!(map.release(EntityId(7)), Some(HexCoord::new(1, 1)));
        assert!(map.is_empty());
        assert!(!map.is_occupied(HexCoord::new(1, 1)));
        assert_eq!(map.release(EntityId(7)), None);
    }
}
