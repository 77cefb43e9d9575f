//! `ot-sim` — tick loop orchestrator for officetwin.
//!
//! # Tick anatomy
//!
//! ```text
//! for each tick:
//!   ① Housekeeping — age speech bubbles.
//!   ② Intent phase — call BehaviorModel::replan for every agent against a
//!                    read-only WorldView.  No mutation.
//!   ③ Apply phase  — consume intents in ascending AgentId order:
//!                      Step       → move if the cell is still free, else
//!                                   replan (first-to-commit wins)
//!                      Travel     → plan a path, start walking
//!                      BeginTalk  → mutual-consent conversation start
//!                      Enter/Say/Face/CancelTalk → direct store updates
//!                    then advance every agent's state-duration counter.
//!   ④ Scheduler    — run the analysis scheduler's due timer steps.
//!   ⑤ Frame        — hand the renderer a read-only look at the world.
//! ```
//!
//! One thread, no locks: the ascending-ID apply order is the documented
//! resolution for two agents racing into the same cell, and the scheduler's
//! in-flight slot is checked and set within a single step.

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod world;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use world::World;
