//! `ot-core` — foundational types for the `officetwin` office simulation.
//!
//! This crate is a dependency of every other `ot-*` crate.  It intentionally
//! has no `ot-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                          |
//! |-------------|---------------------------------------------------|
//! | [`ids`]     | `AgentId`, `TimerId`                              |
//! | [`cell`]    | `Cell` grid coordinate, Manhattan distance        |
//! | [`time`]    | `Tick`, `SimClock`, `SimConfig`                   |
//! | [`rng`]     | `AgentRng` (per-agent), `SimRng` (global)         |
//! | [`ticker`]  | `Ticker` enum of tracked market symbols           |
//! | [`error`]   | `OtError`, `OtResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod cell;
pub mod error;
pub mod ids;
pub mod rng;
pub mod ticker;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::Cell;
pub use error::{OtError, OtResult};
pub use ids::{AgentId, TimerId};
pub use rng::{AgentRng, SimRng};
pub use ticker::Ticker;
pub use time::{SimClock, SimConfig, Tick};
