//! Integer grid coordinates.
//!
//! The office floor is a `cols × rows` grid of unit cells.  Coordinates are
//! signed so that neighbor arithmetic at the border never wraps; bounds
//! checks live in the floor plan, not here.

use std::fmt;

/// One grid square, identified by integer column (`x`) and row (`y`).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan (L1) distance to `other` — the A* heuristic and the
    /// "how far is my desk" metric on a 4-connected grid.
    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four axis-aligned neighbors, in fixed left/right/up/down order.
    ///
    /// Order matters for deterministic tie-breaking in path search: equal-cost
    /// frontier nodes are expanded in the order they were first discovered.
    #[inline]
    pub fn neighbors4(self) -> [Cell; 4] {
        [
            Cell::new(self.x - 1, self.y),
            Cell::new(self.x + 1, self.y),
            Cell::new(self.x, self.y - 1),
            Cell::new(self.x, self.y + 1),
        ]
    }

    /// The eight surrounding cells (used for "standing beside an amenity"
    /// checks, which accept diagonal adjacency).
    pub fn neighbors8(self) -> [Cell; 8] {
        [
            Cell::new(self.x - 1, self.y - 1),
            Cell::new(self.x, self.y - 1),
            Cell::new(self.x + 1, self.y - 1),
            Cell::new(self.x - 1, self.y),
            Cell::new(self.x + 1, self.y),
            Cell::new(self.x - 1, self.y + 1),
            Cell::new(self.x, self.y + 1),
            Cell::new(self.x + 1, self.y + 1),
        ]
    }

    /// `true` if `other` is exactly one axis-aligned step away.
    ///
    /// This is the adjacency required for a face-to-face conversation; a
    /// diagonal neighbor does not count.
    #[inline]
    pub fn is_adjacent4(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
