use thiserror::Error;

use ot_core::{AgentId, Cell};
use ot_grid::GridError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("desk seat {cell} for agent {agent} is not on passable terrain")]
    DeskBlocked { agent: AgentId, cell: Cell },

    #[error("start position {cell} for agent {agent} is not on passable terrain")]
    StartBlocked { agent: AgentId, cell: Cell },

    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Grid(#[from] GridError),
}

pub type SimResult<T> = Result<T, SimError>;
