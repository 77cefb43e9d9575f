//! Collaborator failure type.

use thiserror::Error;

/// What an external collaborator can report when a call fails.
///
/// Every variant is non-fatal to the scheduler: failures surface as a
/// status line and a log entry, the in-flight slot is released after a
/// short delay, and the next cycle runs regardless.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("malformed response: {0}")]
    Malformed(String),
}
