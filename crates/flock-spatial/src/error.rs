//! Spatial-subsystem error type.

use thiserror::Error;

use flock_core::AgentId;

use crate::CellCoord;

/// Errors produced by `flock-spatial`.
///
/// Both access errors indicate a bookkeeping bug upstream: the tick loop only
/// ever addresses cells it computed from in-bounds positions.
#[derive(Debug, Error, PartialEq)]
pub enum SpatialError {
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBoundsCellAccess {
        row:  i64,
        col:  i64,
        rows: usize,
        cols: usize,
    },

    #[error("agent {agent} is not in cell {cell}")]
    NotFound { agent: AgentId, cell: CellCoord },

    #[error("invalid grid dimensions: {0}")]
    InvalidDimensions(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
