use thiserror::Error;

use crate::{scenario::ScenarioError, solver::GridError};

/// Errors that stop an error-surface sweep before any solve.
///
/// Per-cell solver failures are not errors; they are recorded in the surface.
#[derive(Debug, Error)]
pub enum ErrorSurfaceError {
    /// Scenario lookup or boundary data retrieval failed.
    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    /// The configured duration or thickness is not strictly positive.
    #[error("invalid sweep configuration")]
    Config(#[from] GridError),
}
