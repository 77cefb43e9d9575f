//! The static office floor plan.
//!
//! # Terrain vs. occupancy
//!
//! `FloorPlan` holds the fixed terrain only.  It never knows where agents
//! stand; the simulation layer composes terrain with live positions through
//! the [`Walkability`] trait.  This keeps the plan a pure value: two queries
//! at different ticks agree unless the layout itself was edited.
//!
//! # Amenity adjacency
//!
//! Agents don't stand *on* a coffee machine or a window, they stand *beside*
//! one.  "Beside" accepts diagonal neighbors, matching how loosely people
//! cluster around furniture: [`FloorPlan::is_beside`] checks the eight
//! surrounding cells, and [`FloorPlan::cells_beside`] enumerates candidate
//! standing spots for a destination pick.

use ot_core::Cell;

use crate::{GridError, GridResult};

// ── Tile ─────────────────────────────────────────────────────────────────────

/// Fixed terrain of one grid cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    #[default]
    Carpet,
    Wall,
    Window,
    Desk,
    Chair,
    Computer,
    Coffee,
    Plant,
    Table,
}

impl Tile {
    /// `true` if an agent may stand on this tile.
    ///
    /// Walls, desks, and computers block movement.  Chairs are where agents
    /// sit, and coffee machines, plants, and tables are low furniture that
    /// people squeeze past.
    #[inline]
    pub fn is_passable(self) -> bool {
        !matches!(self, Tile::Wall | Tile::Desk | Tile::Computer)
    }
}

// ── Walkability ───────────────────────────────────────────────────────────────

/// The walkability oracle consumed by path planning.
///
/// Implementations answer "can an agent stand here *right now*?".  The
/// terrain-only answer is [`FloorPlan`] itself; the simulation layer layers
/// occupancy on top (excluding the querying agent's own cell).  The planner
/// is generic over this trait so it stays a pure function of whatever view
/// it is handed.
pub trait Walkability {
    fn is_walkable(&self, cell: Cell) -> bool;
}

/// Terrain-only walkability: in bounds and passable, ignoring agents.
impl Walkability for FloorPlan {
    #[inline]
    fn is_walkable(&self, cell: Cell) -> bool {
        self.is_passable(cell)
    }
}

// ── FloorPlan ─────────────────────────────────────────────────────────────────

/// A `cols × rows` grid of [`Tile`]s, row-major.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorPlan {
    cols: i32,
    rows: i32,
    tiles: Vec<Tile>,
}

impl FloorPlan {
    /// An all-carpet plan of the given dimensions.
    pub fn new(cols: i32, rows: i32) -> GridResult<Self> {
        if cols <= 0 || rows <= 0 {
            return Err(GridError::InvalidDimensions { cols, rows });
        }
        Ok(Self {
            cols,
            rows,
            tiles: vec![Tile::Carpet; (cols * rows) as usize],
        })
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.cols && cell.y < self.rows
    }

    /// The tile at `cell`, or `None` when out of bounds.
    #[inline]
    pub fn tile(&self, cell: Cell) -> Option<Tile> {
        if self.in_bounds(cell) {
            Some(self.tiles[(cell.y * self.cols + cell.x) as usize])
        } else {
            None
        }
    }

    /// Terrain passability: in bounds and the tile permits standing.
    #[inline]
    pub fn is_passable(&self, cell: Cell) -> bool {
        self.tile(cell).is_some_and(Tile::is_passable)
    }

    // ── Layout editing ────────────────────────────────────────────────────

    pub fn set(&mut self, cell: Cell, tile: Tile) -> GridResult<()> {
        if !self.in_bounds(cell) {
            return Err(GridError::OutOfBounds(cell));
        }
        self.tiles[(cell.y * self.cols + cell.x) as usize] = tile;
        Ok(())
    }

    /// Fill the inclusive rectangle `(x0, y0) ..= (x1, y1)` with `tile`.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, tile: Tile) -> GridResult<()> {
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.set(Cell::new(x, y), tile)?;
            }
        }
        Ok(())
    }

    /// Surround the plan with `tile` (typically walls).
    pub fn border(&mut self, tile: Tile) {
        for x in 0..self.cols {
            self.tiles[x as usize] = tile;
            self.tiles[((self.rows - 1) * self.cols + x) as usize] = tile;
        }
        for y in 0..self.rows {
            self.tiles[(y * self.cols) as usize] = tile;
            self.tiles[(y * self.cols + self.cols - 1) as usize] = tile;
        }
    }

    // ── Amenity queries ───────────────────────────────────────────────────

    /// `true` if any of the eight cells around `cell` carries `tile`.
    pub fn is_beside(&self, cell: Cell, tile: Tile) -> bool {
        cell.neighbors8()
            .into_iter()
            .any(|n| self.tile(n) == Some(tile))
    }

    /// All passable cells standing beside at least one `tile`, in row-major
    /// order.  Candidates for "go have a coffee"-style destinations; the
    /// caller filters for current occupancy and picks one at random.
    pub fn cells_beside(&self, tile: Tile) -> Vec<Cell> {
        let mut out = Vec::new();
        for y in 0..self.rows {
            for x in 0..self.cols {
                let cell = Cell::new(x, y);
                if self.is_passable(cell) && self.is_beside(cell, tile) {
                    out.push(cell);
                }
            }
        }
        out
    }

    /// Iterator over every cell in the plan, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| Cell::new(x, y)))
    }
}
