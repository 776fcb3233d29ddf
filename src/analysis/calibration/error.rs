use thiserror::Error;

use crate::solver::{GridError, SolveError};

/// Errors that can occur while calibrating a thickness.
///
/// Running out of iterations is not an error; see
/// [`Calibration::converged`](super::Calibration::converged).
#[derive(Debug, Error)]
pub enum CalibrationError {
    /// Two consecutive iterates produced indistinguishable errors, so the
    /// secant step is undefined.
    #[error("secant step stalled after {iterations} iterations with error {error}")]
    StalledConvergence { iterations: usize, error: f64 },

    /// A thickness was zero, negative, or not finite.
    #[error("thickness of {meters} m is not strictly positive")]
    NonPositiveThickness { meters: f64 },

    /// The solver succeeded but the reading was not finite.
    #[error("solve at {meters} m produced a non-finite temperature")]
    UnusableReading { meters: f64 },

    /// The solver failed.
    #[error("solve failed")]
    Solve(#[from] SolveError),

    /// The duration or node counts of the request are invalid.
    #[error("invalid calibration request")]
    Config(#[from] GridError),
}
