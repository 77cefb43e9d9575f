//! `ot-grid` — floor plan, walkability, and path planning.
//!
//! # Crate layout
//!
//! | Module      | Contents                                               |
//! |-------------|--------------------------------------------------------|
//! | [`floor`]   | `Tile`, `FloorPlan`, `Walkability` trait               |
//! | [`planner`] | `Path`, `PathPlanner` trait, `AStarPlanner`            |
//! | [`error`]   | `GridError`, `GridResult<T>`                           |
//!
//! # Walkability model
//!
//! A cell is walkable iff its terrain is passable AND no agent currently
//! stands on it.  `FloorPlan` answers only the terrain half; the full
//! occupancy-aware answer is composed by the simulation layer, which
//! implements [`Walkability`] over the plan plus live agent positions.
//! Nothing here caches occupancy — every query reads fresh state.

pub mod error;
pub mod floor;
pub mod planner;

#[cfg(test)]
mod tests;

pub use error::{GridError, GridResult};
pub use floor::{FloorPlan, Tile, Walkability};
pub use planner::{AStarPlanner, Path, PathPlanner};
