//! `ot-agent` — Structure-of-Arrays storage for the office's analysts.
//!
//! # Crate layout
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`state`]   | `BehaviorState`, `Facing`                             |
//! | [`store`]   | `AgentStore` (SoA arrays), `AgentRngs`                |
//! | [`builder`] | `AgentStoreBuilder` (fluent construction)             |
//! | [`error`]   | `AgentError`, `AgentResult<T>`                        |
//!
//! Every `Vec` field of [`AgentStore`] has exactly `count` elements and is
//! indexed by `AgentId`.  The store holds data only — transition logic lives
//! in `ot-behavior`, and all mutation happens in the simulation's sequential
//! apply phase.

pub mod builder;
pub mod error;
pub mod state;
pub mod store;


pub use builder::AgentStoreBuilder;
pub use error::{AgentError, AgentResult};
pub use state::{BehaviorState, Facing};
pub use store::{AgentRngs, AgentStore, MESSAGE_TICKS, SPEECH_WORD_CAP};
