//! Accuracy of one scheme across a square range of grid resolutions.

mod config;
mod error;
mod stats;

pub use config::ErrorSurfaceConfig;
pub use error::ErrorSurfaceError;
pub use stats::{BestCell, SummaryStats};

use ndarray::{Array2, s};

use crate::{
    scenario::{BoundaryDataProvider, Scenario},
    solver::{GridParameters, HeatSolver, Method, SolveRequest},
    support::units::UnitSystem,
};

use super::{
    risk::RiskMap,
    sweep::{Completion, FailureCause, ProgressDeciles, SweepAction, SweepEvent, evaluate_range},
};

/// Node count of the first row and column of every surface.
const FIRST_COUNT: usize = 2;

/// Sweeps `(nt, nx)` for a scenario and scores each cell against its target.
///
/// Every cell runs the solver with the configured duration and thickness,
/// reads the configured [`Metric`](crate::solver::Metric), and records
/// `|reading - target|` after saturation. Cells whose solve fails, or whose
/// reading is not finite, record the failure sentinel instead, so the
/// surface is always fully populated.
///
/// # Examples
///
/// ```
/// use twine_conduction::{
///     analysis::{ErrorSurfaceMapper, SurfaceRequest},
///     scenario::{BoundaryTable, Scenario},
///     solver::{BoundaryCondition, Method, ReferenceSolver},
///     support::units::UnitSystem,
/// };
///
/// let provider = BoundaryTable::new().with(
///     Scenario::MidLeft,
///     BoundaryCondition::new(vec![0.0, 4000.0], vec![300.0, 450.0]).unwrap(),
/// );
/// let mapper = ErrorSurfaceMapper::new(ReferenceSolver::default(), provider);
///
/// let report = mapper
///     .map(
///         &SurfaceRequest {
///             scenario: "m_l",
///             resolution: 0,
///             method: Method::Backward,
///             units: UnitSystem::Kelvin,
///         },
///         |_| None,
///     )
///     .unwrap();
///
/// assert_eq!(report.surface.dim(), 50);
/// assert!(report.completion.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct ErrorSurfaceMapper<S, P> {
    solver: S,
    provider: P,
    config: ErrorSurfaceConfig,
}

/// Inputs for one error-surface sweep.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceRequest<'a> {
    /// Registry identifier, such as `"m_l"`.
    pub scenario: &'a str,

    /// Added to the configured grid offset to size both axes.
    pub resolution: usize,

    pub method: Method,

    /// Units of the boundary data, the target, and therefore the errors.
    pub units: UnitSystem,
}

/// Square matrix of absolute errors indexed by grid resolution.
///
/// Cell `(row, col)` was solved with `nt = row + 2` and `nx = col + 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorSurface {
    errors: Array2<f64>,
}

impl ErrorSurface {
    #[must_use]
    pub fn errors(&self) -> &Array2<f64> {
        &self.errors
    }

    /// Side length of the surface.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.errors.nrows()
    }

    /// Error recorded for the `(nt, nx)` grid, if it was part of the sweep.
    #[must_use]
    pub fn error_at(&self, nt: usize, nx: usize) -> Option<f64> {
        let row = nt.checked_sub(FIRST_COUNT)?;
        let col = nx.checked_sub(FIRST_COUNT)?;
        self.errors.get((row, col)).copied()
    }

    /// Grid counts `(nt, nx)` of cell `(row, col)`.
    #[must_use]
    pub fn counts_at(row: usize, col: usize) -> (usize, usize) {
        (row + FIRST_COUNT, col + FIRST_COUNT)
    }
}

/// Result of an error-surface sweep.
#[derive(Debug, Clone)]
pub struct SurfaceReport {
    pub scenario: Scenario,
    pub method: Method,
    pub units: UnitSystem,

    /// Scenario target expressed in `units`.
    pub target: f64,

    pub surface: ErrorSurface,

    /// Tiers and shades of the evaluated rows of the surface.
    ///
    /// Covers the same cells as `stats`, so it is shorter than the surface
    /// when the sweep was cancelled.
    pub risk: RiskMap,

    /// Statistics over the evaluated cells, or `None` if there were none.
    pub stats: Option<SummaryStats>,

    /// Number of cells that recorded the failure sentinel.
    pub failures: usize,

    pub completion: Completion,
}

impl<S, P> ErrorSurfaceMapper<S, P>
where
    S: HeatSolver,
    P: BoundaryDataProvider,
{
    /// Creates a mapper with the default configuration.
    pub fn new(solver: S, provider: P) -> Self {
        Self {
            solver,
            provider,
            config: ErrorSurfaceConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(self, config: ErrorSurfaceConfig) -> Self {
        Self { config, ..self }
    }

    pub fn config(&self) -> &ErrorSurfaceConfig {
        &self.config
    }

    /// Runs the sweep described by `request`.
    ///
    /// Rows (one per `nt`) are evaluated in order and the observer is
    /// consulted after each one; cells within a row may run in parallel.
    /// A cancelled sweep still returns a full-size surface whose unevaluated
    /// cells hold the failure sentinel.
    ///
    /// # Errors
    ///
    /// Returns an [`ErrorSurfaceError`] before any solve if the scenario is
    /// unknown, its boundary data cannot be fetched, or the configured
    /// duration or thickness is invalid.
    pub fn map<F>(
        &self,
        request: &SurfaceRequest<'_>,
        mut observer: F,
    ) -> Result<SurfaceReport, ErrorSurfaceError>
    where
        F: FnMut(&SweepEvent<'_>) -> Option<SweepAction>,
    {
        let scenario: Scenario = request.scenario.parse()?;
        let target = scenario.target_in(request.units);
        let base = GridParameters::new(
            self.config.tmax,
            FIRST_COUNT,
            FIRST_COUNT,
            self.config.thickness,
        )?;
        let boundary = self.provider.fetch(scenario, request.units)?;

        let dim = request.resolution + self.config.grid_offset;
        let method = request.method;
        let solver = &self.solver;
        let config = &self.config;

        let mut errors = Array2::from_elem((dim, dim), config.failure_sentinel);
        let mut progress = ProgressDeciles::new(dim * dim);
        let mut failures = 0;
        let mut rows_done = 0;
        let mut cancel = false;

        for row in 0..dim {
            let nt = row + FIRST_COUNT;
            let cells = evaluate_range(0..dim, |col| {
                let request = SolveRequest {
                    grid: base.with_counts_unchecked(nt, col + FIRST_COUNT),
                    method,
                    boundary: &boundary,
                };
                solver
                    .solve(&request)
                    .map(|field| score(config, field.read(config.metric), target))
            });

            for (col, cell) in cells.iter().enumerate() {
                let cause = match cell {
                    Ok(Some(error)) => {
                        errors[[row, col]] = *error;
                        continue;
                    }
                    Ok(None) => FailureCause::UnusableReading,
                    Err(err) => FailureCause::Solver(err),
                };
                failures += 1;
                let event = SweepEvent::CellFailed {
                    method,
                    nt,
                    nx: col + FIRST_COUNT,
                    cause,
                };
                cancel |= observer(&event) == Some(SweepAction::Cancel);
            }

            rows_done += 1;
            if let Some(event) = progress.update(rows_done * dim) {
                cancel |= observer(&event) == Some(SweepAction::Cancel);
            }
            if cancel {
                break;
            }
        }

        let completion = if rows_done < dim {
            Completion::Cancelled {
                evaluated: rows_done * dim,
            }
        } else {
            Completion::Complete
        };

        let evaluated = errors.slice(s![..rows_done, ..]);
        Ok(SurfaceReport {
            scenario,
            method,
            units: request.units,
            target,
            risk: RiskMap::from_errors(evaluated),
            stats: SummaryStats::of(evaluated, FIRST_COUNT),
            surface: ErrorSurface { errors },
            failures,
            completion,
        })
    }
}

/// Saturated absolute error of a reading, or `None` if it is unusable.
fn score(config: &ErrorSurfaceConfig, reading: f64, target: f64) -> Option<f64> {
    let error = (reading - target).abs();
    error.is_finite().then(|| config.saturate(error))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{f64::Time, time::second};

    use crate::{
        analysis::{
            risk::Risk,
            test_support::{FnSolver, uniform, unstable},
        },
        scenario::{BoundaryTable, ScenarioError},
        solver::{BoundaryCondition, SolveRequest},
    };

    const ML_TARGET: f64 = 421.7735;

    fn provider() -> BoundaryTable {
        BoundaryTable::new().with(
            Scenario::MidLeft,
            BoundaryCondition::new(vec![0.0, 2000.0, 4000.0], vec![300.0, 500.0, 400.0]).unwrap(),
        )
    }

    fn request(resolution: usize) -> SurfaceRequest<'static> {
        SurfaceRequest {
            scenario: "m_l",
            resolution,
            method: Method::Forward,
            units: UnitSystem::Kelvin,
        }
    }

    #[test]
    fn mid_left_in_kelvin_at_resolution_twenty() {
        let solver = FnSolver::new(|r: &SolveRequest<'_>| {
            assert_eq!(r.method, Method::Forward);
            Ok(uniform(r, ML_TARGET + 0.5))
        });
        let mapper = ErrorSurfaceMapper::new(&solver, provider());
        let request = SurfaceRequest {
            units: "kelvin".parse().unwrap(),
            ..request(20)
        };

        let report = mapper.map(&request, |_| None).unwrap();

        assert_eq!(report.scenario, Scenario::MidLeft);
        assert_relative_eq!(report.target, 421.7735);
        assert_eq!(report.surface.errors().dim(), (70, 70));
        assert_eq!(solver.calls(), 70 * 70);
        assert_eq!(report.failures, 0);
        assert!(report.completion.is_complete());
        for &error in report.surface.errors() {
            assert_relative_eq!(error, 0.5, epsilon = 1e-9);
        }

        let stats = report.stats.unwrap();
        assert_eq!(stats.cells, 4900);
        assert_eq!(stats.low_count, 4900);
        assert_relative_eq!(stats.stability_ratio, 100.0);
        assert_eq!(report.risk.count(Risk::Low), 4900);
    }

    #[test]
    fn every_cell_is_populated_when_every_solve_fails() {
        for resolution in [0, 3] {
            let solver = FnSolver::new(|r: &SolveRequest<'_>| Err(unstable(r)));
            let mapper = ErrorSurfaceMapper::new(&solver, provider());
            let mut failed = 0;

            let report = mapper
                .map(&request(resolution), |event| {
                    if let SweepEvent::CellFailed { cause, .. } = event {
                        assert!(matches!(cause, FailureCause::Solver(e) if e.is_instability()));
                        failed += 1;
                    }
                    None
                })
                .unwrap();

            let dim = resolution + 50;
            assert_eq!(report.surface.dim(), dim);
            assert!(report.surface.errors().iter().all(|&e| e == 100.0));
            assert_eq!(report.failures, dim * dim);
            assert_eq!(failed, dim * dim);
            assert!(report.completion.is_complete());
            assert_eq!(report.risk.count(Risk::High), dim * dim);
        }
    }

    #[test]
    fn non_finite_readings_record_the_sentinel() {
        let solver = FnSolver::new(|r: &SolveRequest<'_>| {
            let value = if r.grid.nx() == 3 { f64::NAN } else { ML_TARGET };
            Ok(uniform(r, value))
        });
        let report = ErrorSurfaceMapper::new(&solver, provider())
            .map(&request(0), |_| None)
            .unwrap();

        assert_eq!(report.failures, 50);
        assert_eq!(report.surface.error_at(10, 3), Some(100.0));
        assert_eq!(report.surface.error_at(10, 4), Some(0.0));
    }

    #[test]
    fn large_errors_saturate() {
        let solver = FnSolver::new(|r: &SolveRequest<'_>| {
            let offset = match r.grid.nx() {
                2 => 200.0,
                3 => 149.5,
                _ => -151.0,
            };
            Ok(uniform(r, ML_TARGET + offset))
        });
        let report = ErrorSurfaceMapper::new(&solver, provider())
            .map(&request(0), |_| None)
            .unwrap();

        assert_eq!(report.surface.error_at(2, 2), Some(100.0));
        assert_relative_eq!(report.surface.error_at(2, 3).unwrap(), 149.5, epsilon = 1e-9);
        assert_eq!(report.surface.error_at(7, 9), Some(100.0));
        assert_eq!(report.failures, 0);
    }

    #[test]
    fn best_cell_is_first_minimum_in_row_major_order() {
        let solver = FnSolver::new(|r: &SolveRequest<'_>| {
            let (nt, nx) = (r.grid.nt(), r.grid.nx());
            let offset = if nt == 5 || nx == 7 { 0.25 } else { 3.0 };
            Ok(uniform(r, ML_TARGET - offset))
        });
        let report = ErrorSurfaceMapper::new(&solver, provider())
            .map(&request(0), |_| None)
            .unwrap();

        let stats = report.stats.unwrap();
        assert_eq!((stats.best.nt, stats.best.nx), (2, 7));
        assert_relative_eq!(stats.best.error, 0.25, epsilon = 1e-9);
        assert_relative_eq!(stats.min, 0.25, epsilon = 1e-9);
        assert_relative_eq!(stats.max, 3.0, epsilon = 1e-9);
        // One row and one column of low cells, sharing a corner.
        assert_eq!(stats.low_count, 99);
    }

    #[test]
    fn unknown_scenario_fails_before_solving() {
        let solver = FnSolver::new(|r: &SolveRequest<'_>| Ok(uniform(r, 0.0)));
        let mapper = ErrorSurfaceMapper::new(&solver, provider());

        let err = mapper
            .map(
                &SurfaceRequest {
                    scenario: "nowhere",
                    ..request(0)
                },
                |_| None,
            )
            .unwrap_err();

        assert!(matches!(
            err,
            ErrorSurfaceError::Scenario(ScenarioError::UnknownScenario(ref id)) if id == "nowhere"
        ));
        assert_eq!(solver.calls(), 0);
    }

    #[test]
    fn missing_boundary_data_fails_before_solving() {
        let solver = FnSolver::new(|r: &SolveRequest<'_>| Ok(uniform(r, 0.0)));
        let mapper = ErrorSurfaceMapper::new(&solver, provider());

        let err = mapper
            .map(
                &SurfaceRequest {
                    scenario: "t_c",
                    ..request(0)
                },
                |_| None,
            )
            .unwrap_err();

        assert!(matches!(
            err,
            ErrorSurfaceError::Scenario(ScenarioError::MissingBoundaryData(Scenario::TopCentre))
        ));
        assert_eq!(solver.calls(), 0);
    }

    #[test]
    fn target_and_boundary_follow_the_unit_system() {
        let solver = FnSolver::new(|r: &SolveRequest<'_>| {
            assert_relative_eq!(r.boundary.values()[0], 26.85, epsilon = 1e-9);
            Ok(uniform(r, 148.6235))
        });
        let report = ErrorSurfaceMapper::new(&solver, provider())
            .map(
                &SurfaceRequest {
                    units: UnitSystem::Celsius,
                    ..request(0)
                },
                |_| None,
            )
            .unwrap();

        assert_relative_eq!(report.target, 148.6235, epsilon = 1e-9);
        assert!(report.surface.errors().iter().all(|&e| e < 1e-9));
    }

    #[test]
    fn reports_progress_by_decile() {
        let solver = FnSolver::new(|r: &SolveRequest<'_>| Ok(uniform(r, ML_TARGET)));
        let mut seen = Vec::new();

        ErrorSurfaceMapper::new(&solver, provider())
            .map(&request(0), |event| {
                if let SweepEvent::Progress { completed, total } = event {
                    assert_eq!(*total, 2500);
                    seen.push(*completed);
                }
                None
            })
            .unwrap();

        assert_eq!(seen, (1..=10).map(|i| i * 250).collect::<Vec<_>>());
    }

    #[test]
    fn cancellation_keeps_the_surface_dense() {
        let solver = FnSolver::new(|r: &SolveRequest<'_>| Ok(uniform(r, ML_TARGET + 2.0)));

        let report = ErrorSurfaceMapper::new(&solver, provider())
            .map(&request(0), |event| {
                matches!(event, SweepEvent::Progress { .. }).then_some(SweepAction::Cancel)
            })
            .unwrap();

        assert_eq!(report.completion, Completion::Cancelled { evaluated: 250 });
        assert_eq!(solver.calls(), 250);
        assert_eq!(report.surface.dim(), 50);
        assert_relative_eq!(report.surface.error_at(6, 40).unwrap(), 2.0, epsilon = 1e-9);
        assert_eq!(report.surface.error_at(7, 40), Some(100.0));

        let stats = report.stats.unwrap();
        assert_eq!(stats.cells, 250);
        assert_relative_eq!(stats.max, 2.0, epsilon = 1e-9);
        assert_eq!(report.failures, 0);

        assert_eq!(report.risk.labels.dim(), (5, 50));
        assert_eq!(report.risk.count(Risk::Medium), 250);
        assert_eq!(report.risk.count(Risk::High), 0);
    }

    #[test]
    fn custom_config_resizes_the_sweep() {
        let solver = FnSolver::new(|r: &SolveRequest<'_>| {
            assert_relative_eq!(r.grid.tmax().get::<second>(), 600.0);
            Ok(uniform(r, ML_TARGET))
        });
        let config = ErrorSurfaceConfig {
            tmax: Time::new::<second>(600.0),
            grid_offset: 4,
            ..ErrorSurfaceConfig::default()
        };

        let report = ErrorSurfaceMapper::new(&solver, provider())
            .with_config(config)
            .map(&request(1), |_| None)
            .unwrap();

        assert_eq!(report.surface.dim(), 5);
        assert_eq!(ErrorSurface::counts_at(4, 0), (6, 2));
        assert_eq!(report.surface.error_at(6, 6), Some(0.0));
        assert_eq!(report.surface.error_at(7, 2), None);
        assert_eq!(report.surface.error_at(1, 2), None);
    }
}
