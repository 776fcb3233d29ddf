//! Secant search for the slab thickness that reaches a target temperature.

mod config;
mod error;
mod model;

pub use config::CalibrationConfig;
pub use error::CalibrationError;
pub use model::ThicknessModel;

use twine_core::Model;
use uom::si::{
    f64::{Length, Time},
    length::meter,
};

use crate::solver::{BoundaryCondition, GridParameters, HeatSolver};

/// Finds the thickness whose solve reads a target temperature.
///
/// Starting from the two configured seeds, each step applies
///
/// ```text
/// L[n+1] = L[n] - e[n] * (L[n] - L[n-1]) / (e[n] - e[n-1])
/// ```
///
/// where `e = achieved - target`. The search stops as soon as an iterate is
/// within tolerance, or when the iteration budget runs out.
///
/// # Examples
///
/// ```
/// use twine_conduction::{
///     analysis::{CalibrationRequest, ThicknessCalibrator},
///     solver::{BoundaryCondition, HeatSolver, SolveError, SolveRequest, TemperatureField},
/// };
/// use ndarray::Array2;
/// use uom::si::{f64::Time, length::meter, time::second};
///
/// /// Reads 2 K cooler per millimeter of slab.
/// struct Linear;
///
/// impl HeatSolver for Linear {
///     fn solve(&self, r: &SolveRequest<'_>) -> Result<TemperatureField, SolveError> {
///         let t = 600.0 - 2000.0 * r.grid.thickness().get::<meter>();
///         TemperatureField::new(Array2::from_elem((r.grid.nx(), r.grid.nt()), t))
///     }
/// }
///
/// let boundary = BoundaryCondition::constant(600.0);
/// let calibration = ThicknessCalibrator::new(Linear)
///     .calibrate(&CalibrationRequest {
///         tmax: Time::new::<second>(1000.0),
///         nt: 101,
///         nx: 21,
///         boundary: &boundary,
///         target: 400.0,
///         max_iters: 10,
///     })
///     .unwrap();
///
/// assert!(calibration.converged);
/// assert!((calibration.thickness.get::<meter>() - 0.1).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct ThicknessCalibrator<S> {
    solver: S,
    config: CalibrationConfig,
}

/// Inputs for one calibration.
#[derive(Debug, Clone, Copy)]
pub struct CalibrationRequest<'a> {
    pub tmax: Time,
    pub nt: usize,
    pub nx: usize,
    pub boundary: &'a BoundaryCondition,

    /// Temperature the configured metric should reach, in the units of
    /// `boundary`.
    pub target: f64,

    /// Maximum number of secant updates after the seeds.
    pub max_iters: usize,
}

/// One evaluated thickness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecantIterate {
    pub thickness: Length,
    pub achieved: f64,

    /// `achieved - target`.
    pub error: f64,
}

/// Outcome of a calibration.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    /// The converged thickness, or the best one found.
    pub thickness: Length,
    pub achieved: f64,

    /// Every evaluated iterate in order, seeds first.
    pub history: Vec<SecantIterate>,

    /// Whether an iterate reached the tolerance.
    ///
    /// When `false`, `thickness` is the iterate with the smallest absolute
    /// error and must not be treated as a solution.
    pub converged: bool,

    /// Secant updates performed.
    pub iterations: usize,
}

impl<S: HeatSolver> ThicknessCalibrator<S> {
    /// Creates a calibrator with the default configuration.
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            config: CalibrationConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(self, config: CalibrationConfig) -> Self {
        Self { config, ..self }
    }

    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Runs the secant search.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::StalledConvergence`] if two consecutive
    /// iterates have indistinguishable errors,
    /// [`CalibrationError::NonPositiveThickness`] if a step leaves the
    /// physical range, or another [`CalibrationError`] if a solve fails or
    /// the request is invalid.
    pub fn calibrate(
        &self,
        request: &CalibrationRequest<'_>,
    ) -> Result<Calibration, CalibrationError> {
        let [first, second] = self.config.seeds;
        let grid = GridParameters::new(request.tmax, request.nt, request.nx, first)?;
        let model = ThicknessModel::new(
            &self.solver,
            grid,
            self.config.method,
            self.config.metric,
            request.boundary,
        );

        let evaluate = |thickness: Length| -> Result<SecantIterate, CalibrationError> {
            let achieved = model.call(&thickness)?;
            Ok(SecantIterate {
                thickness,
                achieved,
                error: achieved - request.target,
            })
        };

        let mut history = Vec::new();
        history.push(evaluate(first)?);
        history.push(evaluate(second)?);

        let mut iterations = 0;
        while !self.has_converged(&history) && iterations < request.max_iters {
            let [prev, last] = [history[history.len() - 2], history[history.len() - 1]];

            let delta = last.error - prev.error;
            let scale = last.error.abs().max(prev.error.abs());
            if delta == 0.0 || delta.abs() <= f64::EPSILON * scale {
                return Err(CalibrationError::StalledConvergence {
                    iterations,
                    error: last.error,
                });
            }

            let (l1, l0) = (last.thickness.get::<meter>(), prev.thickness.get::<meter>());
            let next = l1 - last.error * (l1 - l0) / delta;
            if !next.is_finite() || next <= 0.0 {
                return Err(CalibrationError::NonPositiveThickness { meters: next });
            }

            iterations += 1;
            history.push(evaluate(Length::new::<meter>(next))?);
        }

        let converged = self.has_converged(&history);
        let mut best = history[0];
        for it in &history[1..] {
            if it.error.abs() < best.error.abs() {
                best = *it;
            }
        }

        Ok(Calibration {
            thickness: best.thickness,
            achieved: best.achieved,
            history,
            converged,
            iterations,
        })
    }

    fn has_converged(&self, history: &[SecantIterate]) -> bool {
        history
            .iter()
            .any(|it| it.error.abs() <= self.config.tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::time::second;

    use crate::{
        analysis::test_support::{FnSolver, length, meters, uniform, unstable},
        solver::{Method, SolveError, SolveRequest, TemperatureField},
    };

    fn request(
        boundary: &BoundaryCondition,
        target: f64,
        max_iters: usize,
    ) -> CalibrationRequest<'_> {
        CalibrationRequest {
            tmax: Time::new::<second>(4000.0),
            nt: 201,
            nx: 26,
            boundary,
            target,
            max_iters,
        }
    }

    fn linear(r: &SolveRequest<'_>) -> Result<TemperatureField, SolveError> {
        Ok(uniform(r, 300.0 + 1000.0 * meters(r)))
    }

    #[test]
    fn linear_response_converges_in_one_step() {
        let solver = FnSolver::new(|r: &SolveRequest<'_>| {
            assert_eq!(r.method, Method::CrankNicolson);
            Ok(uniform(r, 300.0 + 1000.0 * meters(r)))
        });
        let boundary = BoundaryCondition::constant(300.0);

        let calibration = ThicknessCalibrator::new(&solver)
            .calibrate(&request(&boundary, 400.0, 20))
            .unwrap();

        assert!(calibration.converged);
        assert_eq!(calibration.iterations, 1);
        assert_eq!(calibration.history.len(), 3);
        assert_relative_eq!(calibration.thickness.get::<meter>(), 0.1, epsilon = 1e-9);
        assert!((calibration.achieved - 400.0).abs() <= 0.001);

        let seeds: Vec<_> = calibration.history[..2]
            .iter()
            .map(|it| (it.thickness.get::<meter>(), it.error))
            .collect();
        assert_relative_eq!(seeds[0].0, 0.05);
        assert_relative_eq!(seeds[0].1, -50.0, epsilon = 1e-9);
        assert_relative_eq!(seeds[1].0, 0.15);
        assert_relative_eq!(seeds[1].1, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn unlimited_budget_stops_at_convergence() {
        let solver = FnSolver::new(linear);
        let boundary = BoundaryCondition::constant(300.0);

        let calibration = ThicknessCalibrator::new(&solver)
            .calibrate(&request(&boundary, 400.0, usize::MAX))
            .unwrap();

        assert!(calibration.converged);
        assert_eq!(calibration.iterations, 1);
        assert_eq!(solver.calls(), 3);
        assert_relative_eq!(calibration.thickness.get::<meter>(), 0.1, epsilon = 1e-9);
    }

    #[test]
    fn nonlinear_response_converges_within_budget() {
        let solver = FnSolver::new(|r: &SolveRequest<'_>| {
            let l = meters(r);
            Ok(uniform(r, 300.0 + 1e4 * l * l))
        });
        let boundary = BoundaryCondition::constant(300.0);

        let calibration = ThicknessCalibrator::new(&solver)
            .calibrate(&request(&boundary, 400.0, 20))
            .unwrap();

        assert!(calibration.converged);
        assert!(calibration.iterations <= 10);
        assert_eq!(calibration.history.len(), calibration.iterations + 2);
        assert_relative_eq!(calibration.thickness.get::<meter>(), 0.1, epsilon = 1e-6);
    }

    #[test]
    fn exhausted_budget_reports_best_iterate() {
        let solver = FnSolver::new(|r: &SolveRequest<'_>| {
            let l = meters(r);
            Ok(uniform(r, 300.0 + 1e4 * l * l))
        });
        let boundary = BoundaryCondition::constant(300.0);

        let calibration = ThicknessCalibrator::new(&solver)
            .calibrate(&request(&boundary, 400.0, 2))
            .unwrap();

        assert!(!calibration.converged);
        assert_eq!(calibration.iterations, 2);
        assert_eq!(calibration.history.len(), 4);
        assert_eq!(solver.calls(), 4);

        // Errors: -75, 125, -23.4375, then about -5.19.
        let third = calibration.history[2];
        assert_relative_eq!(third.thickness.get::<meter>(), 0.0875, epsilon = 1e-12);
        assert_relative_eq!(third.error, -23.4375, epsilon = 1e-9);
        let last = calibration.history[3];
        assert_eq!(calibration.thickness, last.thickness);
        assert_relative_eq!(calibration.achieved, last.achieved);
        assert!(last.error.abs() > 0.001 && last.error.abs() < 6.0);
    }

    #[test]
    fn zero_budget_evaluates_only_the_seeds() {
        let solver = FnSolver::new(linear);
        let boundary = BoundaryCondition::constant(300.0);

        let calibration = ThicknessCalibrator::new(&solver)
            .calibrate(&request(&boundary, 340.0, 0))
            .unwrap();

        assert!(!calibration.converged);
        assert_eq!(calibration.iterations, 0);
        assert_relative_eq!(calibration.thickness.get::<meter>(), 0.05);
        assert_eq!(solver.calls(), 2);
    }

    #[test]
    fn converged_seed_needs_no_update() {
        let solver = FnSolver::new(linear);
        let boundary = BoundaryCondition::constant(300.0);

        let calibration = ThicknessCalibrator::new(&solver)
            .calibrate(&request(&boundary, 450.0, 10))
            .unwrap();

        assert!(calibration.converged);
        assert_eq!(calibration.iterations, 0);
        assert_relative_eq!(calibration.thickness.get::<meter>(), 0.15);
    }

    #[test]
    fn identical_errors_stall() {
        let solver = FnSolver::new(|r: &SolveRequest<'_>| Ok(uniform(r, 420.0)));
        let boundary = BoundaryCondition::constant(300.0);

        let err = ThicknessCalibrator::new(&solver)
            .calibrate(&request(&boundary, 400.0, 10))
            .unwrap_err();

        assert!(matches!(
            err,
            CalibrationError::StalledConvergence { iterations: 0, error } if error == 20.0
        ));
        assert_eq!(solver.calls(), 2);
    }

    #[test]
    fn step_past_zero_thickness_is_rejected() {
        let solver = FnSolver::new(linear);
        let boundary = BoundaryCondition::constant(300.0);

        let err = ThicknessCalibrator::new(&solver)
            .calibrate(&request(&boundary, 200.0, 10))
            .unwrap_err();

        assert!(matches!(err, CalibrationError::NonPositiveThickness { meters } if meters < 0.0));
        assert_eq!(solver.calls(), 2);
    }

    #[test]
    fn solver_failures_propagate() {
        let solver = FnSolver::new(|r: &SolveRequest<'_>| Err(unstable(r)));
        let boundary = BoundaryCondition::constant(300.0);

        let err = ThicknessCalibrator::new(&solver)
            .calibrate(&request(&boundary, 400.0, 10))
            .unwrap_err();

        assert!(matches!(err, CalibrationError::Solve(e) if e.is_instability()));
        assert_eq!(solver.calls(), 1);
    }

    #[test]
    fn custom_seeds_and_method() {
        let solver = FnSolver::new(|r: &SolveRequest<'_>| {
            assert_eq!(r.method, Method::Backward);
            Ok(uniform(r, 300.0 + 1000.0 * meters(r)))
        });
        let boundary = BoundaryCondition::constant(300.0);
        let config = CalibrationConfig {
            seeds: [length(0.2), length(0.3)],
            method: Method::Backward,
            ..CalibrationConfig::default()
        };

        let calibration = ThicknessCalibrator::new(&solver)
            .with_config(config)
            .calibrate(&request(&boundary, 425.0, 5))
            .unwrap();

        assert!(calibration.converged);
        assert_relative_eq!(calibration.history[0].thickness.get::<meter>(), 0.2);
        assert_relative_eq!(calibration.thickness.get::<meter>(), 0.125, epsilon = 1e-9);
    }

    #[test]
    fn invalid_request_fails_before_solving() {
        let solver = FnSolver::new(|r: &SolveRequest<'_>| Ok(uniform(r, 300.0)));
        let boundary = BoundaryCondition::constant(300.0);

        let err = ThicknessCalibrator::new(&solver)
            .calibrate(&CalibrationRequest {
                nt: 0,
                ..request(&boundary, 400.0, 10)
            })
            .unwrap_err();

        assert!(matches!(err, CalibrationError::Config(e) if e.field == "nt"));
        assert_eq!(solver.calls(), 0);
    }
}
