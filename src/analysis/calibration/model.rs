//! Thickness-to-temperature map as a [`twine_core::Model`].

use twine_core::Model;
use uom::si::{f64::Length, length::meter};

use crate::{
    solver::{BoundaryCondition, GridParameters, HeatSolver, Method, Metric, SolveRequest},
    support::constraint::StrictlyPositive,
};

use super::CalibrationError;

/// Model adapter for thickness calibration.
///
/// Holds everything but the thickness fixed and exposes the resulting
/// temperature reading as the model output.
#[derive(Debug)]
pub struct ThicknessModel<'a, S> {
    solver: &'a S,
    grid: GridParameters,
    method: Method,
    metric: Metric,
    boundary: &'a BoundaryCondition,
}

impl<'a, S: HeatSolver> ThicknessModel<'a, S> {
    /// Creates a model that replaces the thickness of `grid` on every call.
    pub fn new(
        solver: &'a S,
        grid: GridParameters,
        method: Method,
        metric: Metric,
        boundary: &'a BoundaryCondition,
    ) -> Self {
        Self {
            solver,
            grid,
            method,
            metric,
            boundary,
        }
    }
}

impl<S: HeatSolver> Model for ThicknessModel<'_, S> {
    type Input = Length;
    type Output = f64;
    type Error = CalibrationError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let meters = input.get::<meter>();
        let thickness = StrictlyPositive::new(*input)
            .ok()
            .filter(|_| meters.is_finite())
            .ok_or(CalibrationError::NonPositiveThickness { meters })?;

        let field = self.solver.solve(&SolveRequest {
            grid: self.grid.with_thickness(thickness),
            method: self.method,
            boundary: self.boundary,
        })?;

        let reading = field.read(self.metric);
        if reading.is_finite() {
            Ok(reading)
        } else {
            Err(CalibrationError::UnusableReading { meters })
        }
    }
}
