use std::sync::atomic::{AtomicUsize, Ordering};

use ndarray::Array2;
use uom::si::{f64::Length, length::meter};

use crate::solver::{HeatSolver, SolveError, SolveRequest, TemperatureField};

/// Solver backed by a closure, counting its calls.
pub(super) struct FnSolver<F> {
    f: F,
    calls: AtomicUsize,
}

impl<F> FnSolver<F>
where
    F: Fn(&SolveRequest<'_>) -> Result<TemperatureField, SolveError> + Sync,
{
    pub(super) fn new(f: F) -> Self {
        Self {
            f,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl<F> HeatSolver for FnSolver<F>
where
    F: Fn(&SolveRequest<'_>) -> Result<TemperatureField, SolveError> + Sync,
{
    fn solve(&self, request: &SolveRequest<'_>) -> Result<TemperatureField, SolveError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        (self.f)(request)
    }
}

/// A field with the requested shape holding `value` everywhere.
pub(super) fn uniform(request: &SolveRequest<'_>, value: f64) -> TemperatureField {
    let shape = (request.grid.nx(), request.grid.nt());
    TemperatureField::new(Array2::from_elem(shape, value)).expect("grid counts are non-zero")
}

/// An instability report for `request`.
pub(super) fn unstable(request: &SolveRequest<'_>) -> SolveError {
    SolveError::NumericalInstability {
        method: request.method,
        step: 1,
    }
}

pub(super) fn meters(request: &SolveRequest<'_>) -> f64 {
    request.grid.thickness().get::<meter>()
}

pub(super) fn length(m: f64) -> Length {
    Length::new::<meter>(m)
}
