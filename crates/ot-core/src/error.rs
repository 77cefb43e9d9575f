//! Workspace-wide base error type.
//!
//! Sub-crates define their own error enums and either convert into `OtError`
//! via `From` impls or wrap it as one variant.  Both patterns are acceptable;
//! prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::{AgentId, Ticker};

/// The top-level error type for `ot-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum OtError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("no agent owns ticker {0}")]
    TickerUnassigned(Ticker),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `ot-*` crates.
pub type OtResult<T> = Result<T, OtError>;
