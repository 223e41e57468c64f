//! Hex cell coordinates and canonical neighbor directions.
//!
//! Cells use odd-q offset encoding: the grid is laid out in flat-top columns and
//! every odd column is shifted down by half a tile. This matches the tile map
//! layout the presentation layer renders, so coordinates can be handed across
//! the boundary unchanged.

use core::fmt;

use strum::{Display, EnumIter, IntoEnumIterator};

/// Grid cell in odd-q offset coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCoord {
    pub col: i32,
    pub row: i32,
}

impl HexCoord {
    pub const ORIGIN: Self = Self { col: 0, row: 0 };

    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    #[inline]
    const fn is_odd_column(self) -> bool {
        self.col & 1 == 1
    }

    /// Returns the adjacent cell in `direction`.
    ///
    /// Never checks board bounds; filtering is the caller's responsibility.
    pub const fn neighbor(self, direction: HexDirection) -> Self {
        let (dc, dr) = direction.offset(self.is_odd_column());
        Self::new(self.col + dc, self.row + dr)
    }

    /// Iterates the six geometric neighbors in canonical direction order.
    ///
    /// The iterator is cheap to clone, so callers can restart it freely.
    pub fn neighbors(self) -> Neighbors {
        Neighbors {
            origin: self,
            directions: HexDirection::iter(),
        }
    }

    /// Returns true if `other` shares an edge with this cell.
    ///
    /// A cell is never its own neighbor.
    pub fn is_neighbor(self, other: HexCoord) -> bool {
        self != other && self.neighbors().any(|candidate| candidate == other)
    }

    /// Converts to cube coordinates `(x, y, z)` with `x + y + z == 0`.
    pub const fn to_cube(self) -> (i32, i32, i32) {
        let x = self.col;
        let z = self.row - (self.col - (self.col & 1)) / 2;
        (x, -x - z, z)
    }

    /// Number of single-cell steps between two cells, ignoring terrain.
    pub fn hex_distance(self, other: HexCoord) -> u32 {
        let (ax, ay, az) = self.to_cube();
        let (bx, by, bz) = other.to_cube();
        let dx = (ax - bx).unsigned_abs();
        let dy = (ay - by).unsigned_abs();
        let dz = (az - bz).unsigned_abs();
        dx.max(dy).max(dz)
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// The six edge directions of a flat-top hex, in canonical order.
///
/// Iteration order (via [`IntoEnumIterator`]) is the tie-break order used by
/// movement selection: top, bottom, top-left, top-right, bottom-left, bottom-right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HexDirection {
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl HexDirection {
    /// Column/row delta for this direction, which depends on column parity.
    pub const fn offset(self, odd_column: bool) -> (i32, i32) {
        match (self, odd_column) {
            (HexDirection::Top, _) => (0, -1),
            (HexDirection::Bottom, _) => (0, 1),
            (HexDirection::TopLeft, false) => (-1, -1),
            (HexDirection::TopLeft, true) => (-1, 0),
            (HexDirection::TopRight, false) => (1, -1),
            (HexDirection::TopRight, true) => (1, 0),
            (HexDirection::BottomLeft, false) => (-1, 0),
            (HexDirection::BottomLeft, true) => (-1, 1),
            (HexDirection::BottomRight, false) => (1, 0),
            (HexDirection::BottomRight, true) => (1, 1),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            HexDirection::Top => HexDirection::Bottom,
            HexDirection::Bottom => HexDirection::Top,
            HexDirection::TopLeft => HexDirection::BottomRight,
            HexDirection::TopRight => HexDirection::BottomLeft,
            HexDirection::BottomLeft => HexDirection::TopRight,
            HexDirection::BottomRight => HexDirection::TopLeft,
        }
    }
}

/// Lazy iterator over the six neighbors of a cell.
#[derive(Clone)]
pub struct Neighbors {
    origin: HexCoord,
    directions: HexDirectionIter,
}

impl fmt::Debug for Neighbors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Neighbors")
            .field("origin", &self.origin)
            .field("remaining", &self.directions.len())
            .finish()
    }
}

impl Iterator for Neighbors {
    type Item = HexCoord;

    fn next(&mut self) -> Option<Self::Item> {
        self.directions
            .next()
            .map(|direction| self.origin.neighbor(direction))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.directions.size_hint()
    }
}

impl ExactSizeIterator for Neighbors {}
