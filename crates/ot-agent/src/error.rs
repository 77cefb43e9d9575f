use ot_core::{Cell, Ticker};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("ticker {0} is assigned to more than one analyst")]
    DuplicateTicker(Ticker),

    #[error("desk seat {0} is assigned to more than one analyst")]
    DeskCollision(Cell),
}

pub type AgentResult<T> = Result<T, AgentError>;
