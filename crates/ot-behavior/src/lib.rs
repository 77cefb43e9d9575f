//! `ot-behavior` — agent behavior model trait and intent types.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`intent`]  | `Intent` enum — the actions an agent can request               |
//! | [`context`] | `WorldView<'a>` — read-only tick snapshot shared by all agents |
//! | [`model`]   | `BehaviorModel` trait                                          |
//! | [`analyst`] | `AnalystBehavior` — the office-floor state machine             |
//! | [`lines`]   | Flavor-line tables                                             |
//! | [`noop`]    | `NoopBehavior` — placeholder that never produces intents       |
//! | [`error`]   | `BehaviorError`, `BehaviorResult<T>`                           |
//!
//! # Design notes
//!
//! The tick loop in `ot-sim` is split in two phases:
//!
//! 1. **Intent phase**: for every agent, call [`BehaviorModel::replan`] with
//!    a read-only [`WorldView`].  No mutation.
//! 2. **Apply phase** (ascending `AgentId`): consume the collected
//!    `Vec<Intent>`s and mutate the `AgentStore`.
//!
//! The split keeps every cross-agent interaction — stepping into a cell,
//! starting a conversation — funneled through one sequential writer, which
//! is where conflicts get their deterministic resolution.  A behavior model
//! never errors: every infeasible request degrades to a safe intent (desk or
//! idle) before it leaves `replan`.

pub mod analyst;
pub mod context;
pub mod error;
pub mod intent;
pub mod lines;
pub mod model;
pub mod noop;

#[cfg(test)]
mod tests;

pub use analyst::AnalystBehavior;
pub use context::WorldView;
pub use error::{BehaviorError, BehaviorResult};
pub use intent::Intent;
pub use model::BehaviorModel;
pub use noop::NoopBehavior;
