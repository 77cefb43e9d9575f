//! Grid-subsystem error type.

use thiserror::Error;

use ot_core::Cell;

/// Errors produced by `ot-grid`.
///
/// Path planning is deliberately absent here: an unreachable goal or an
/// exhausted search budget yields an empty [`Path`][crate::Path], not an
/// error.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("floor plan dimensions {cols}×{rows} are invalid")]
    InvalidDimensions { cols: i32, rows: i32 },

    #[error("cell {0} is outside the floor plan")]
    OutOfBounds(Cell),
}

pub type GridResult<T> = Result<T, GridError>;
