use thiserror::Error;

use crate::{solver::GridError, support::constraint::ConstraintError};

/// Errors that stop a stability scan.
///
/// Every variant is raised before any solve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScanError {
    /// The probe index is not a node of the grid.
    #[error("probe index {probe} is outside a grid of {nx} nodes")]
    OutOfRange { probe: usize, nx: usize },

    /// The `nt` range is empty or starts below two time levels.
    #[error("invalid nt range: {reason}")]
    InvalidRange { reason: &'static str },

    /// The tolerance is negative or not a number.
    #[error("invalid tolerance")]
    InvalidTolerance(#[source] ConstraintError),

    /// The duration, thickness, or node count is invalid.
    #[error("invalid scan configuration")]
    Config(#[from] GridError),
}
