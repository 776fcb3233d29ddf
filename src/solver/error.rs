use thiserror::Error;

use super::Method;

/// Errors reported by a [`HeatSolver`](super::HeatSolver).
#[derive(Debug, Error)]
pub enum SolveError {
    /// The scheme diverged.
    ///
    /// Sweeps treat this as a per-cell outcome rather than a failure of the
    /// whole study.
    #[error("{method} scheme became unstable at time level {step}")]
    NumericalInstability {
        /// Scheme that diverged.
        method: Method,

        /// First time level with a non-finite or runaway value.
        step: usize,
    },

    /// The solver cannot discretize the requested grid.
    #[error("unsupported grid: {reason}")]
    InvalidGrid { reason: &'static str },

    /// Any other solver failure.
    #[error("solver failed: {context}")]
    Failed {
        context: String,

        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl SolveError {
    /// Wraps an external solver error with context.
    pub fn failed(
        context: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Failed {
            context: context.into(),
            source: Box::new(err),
        }
    }

    /// True for [`SolveError::NumericalInstability`].
    #[must_use]
    pub fn is_instability(&self) -> bool {
        matches!(self, Self::NumericalInstability { .. })
    }
}
