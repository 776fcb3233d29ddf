//! The boundary between the studies in this crate and a conduction solver.
//!
//! Every study drives a [`HeatSolver`]: given a grid, a scheme, and a surface
//! temperature history, it returns the [`TemperatureField`] of a 1D slab or
//! a typed [`SolveError`]. Solvers are treated as opaque and stateless, so
//! independent calls may run in any order or in parallel.
//!
//! [`ReferenceSolver`] is a small finite-difference implementation of all
//! four [`Method`]s, useful for end-to-end studies and tests.

mod boundary;
mod error;
mod field;
mod grid;
mod method;
mod reference;

pub use boundary::{BoundaryCondition, BoundaryError};
pub use error::SolveError;
pub use field::{Metric, TemperatureField};
pub use grid::{GridError, GridParameters};
pub use method::{Method, UnknownMethod};
pub use reference::{Material, ReferenceConfig, ReferenceSolver};

/// Inputs for a single solver call.
#[derive(Debug, Clone, Copy)]
pub struct SolveRequest<'a> {
    /// Temporal and spatial discretization.
    pub grid: GridParameters,

    /// Time-stepping scheme.
    pub method: Method,

    /// Surface temperature imposed at node 0.
    pub boundary: &'a BoundaryCondition,
}

/// A 1D transient conduction solver.
///
/// Implementations must be free of cross-call state: the same request always
/// yields the same result. Solver-specific options (material properties,
/// divergence thresholds) belong to the implementing type.
pub trait HeatSolver: Sync {
    /// Solves one request.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::NumericalInstability`] if the scheme diverges,
    /// or another [`SolveError`] if the request cannot be solved.
    fn solve(&self, request: &SolveRequest<'_>) -> Result<TemperatureField, SolveError>;
}

impl<T: HeatSolver + ?Sized> HeatSolver for &T {
    fn solve(&self, request: &SolveRequest<'_>) -> Result<TemperatureField, SolveError> {
        (**self).solve(request)
    }
}
