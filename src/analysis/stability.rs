//! Comparative stability of the four schemes across timestep sizes.

mod bounds;
mod error;

pub use bounds::{MethodBound, StableDt};
pub use error::ScanError;

use uom::si::f64::{Length, Time};

use crate::{
    solver::{BoundaryCondition, GridParameters, HeatSolver, Method, SolveRequest},
    support::constraint::NonNegative,
};

use super::sweep::{
    Completion, FailureCause, ProgressDeciles, SweepAction, SweepEvent, evaluate_range,
};

/// Scans every [`Method`] over a range of `nt` and estimates how large a
/// timestep each one tolerates.
///
/// Each `(method, nt)` pair is solved once and sampled at the probe node at
/// the final time. The mean sample at the finest evaluated `nt` serves as
/// the reference, and a sample violates the tolerance band when it lies
/// outside `reference ± tolerance` or could not be produced. Solver
/// failures never abort a scan; if every method fails everywhere the result
/// is the Crank–Nicolson fallback with a warning.
///
/// # Examples
///
/// ```
/// use twine_conduction::{
///     analysis::{NtRange, StabilityRequest, StabilityScanner},
///     solver::{BoundaryCondition, ReferenceSolver},
/// };
/// use uom::si::{f64::{Length, Time}, length::meter, time::second};
///
/// let boundary = BoundaryCondition::new(vec![0.0, 2000.0], vec![300.0, 600.0]).unwrap();
/// let scanner = StabilityScanner::new(ReferenceSolver::default());
///
/// let result = scanner
///     .scan(
///         &StabilityRequest {
///             tmax: Time::new::<second>(2000.0),
///             nt: NtRange { min: 21, max: 201, step: 20 },
///             thickness: Length::new::<meter>(0.05),
///             nx: 26,
///             probe: 25,
///             tolerance: 0.5,
///             boundary: &boundary,
///         },
///         |_| None,
///     )
///     .unwrap();
///
/// assert_eq!(result.bounds.len(), 4);
/// assert!(result.completion.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct StabilityScanner<S> {
    solver: S,
}

/// Inclusive range of time-level counts, `min, min + step, ..., <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NtRange {
    pub min: usize,
    pub max: usize,
    pub step: usize,
}

impl NtRange {
    fn validate(self) -> Result<Self, ScanError> {
        let reason = if self.step == 0 {
            "step must be positive"
        } else if self.min < 2 {
            "nt must be at least 2 for a timestep to exist"
        } else if self.min > self.max {
            "min exceeds max"
        } else {
            return Ok(self);
        };
        Err(ScanError::InvalidRange { reason })
    }

    fn counts(self) -> impl Iterator<Item = usize> {
        (self.min..=self.max).step_by(self.step)
    }
}

/// Inputs for one stability scan.
#[derive(Debug, Clone, Copy)]
pub struct StabilityRequest<'a> {
    pub tmax: Time,
    pub nt: NtRange,
    pub thickness: Length,
    pub nx: usize,

    /// Spatial node sampled at the final time; must be below `nx`.
    pub probe: usize,

    /// Half-width of the band around the reference.
    pub tolerance: f64,

    pub boundary: &'a BoundaryCondition,
}

/// Probe reading of one `(method, nt)` solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilitySample {
    pub method: Method,
    pub nt: usize,
    pub dt: Time,

    /// `None` if the solve failed or the reading was not finite.
    pub value: Option<f64>,
}

/// Non-fatal conditions reported with a scan result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilityWarning {
    /// Every method violated the band at the finest timestep, so the best
    /// method is a fallback rather than a finding.
    NoStableMethodFound,
}

/// Outcome of a stability scan.
#[derive(Debug, Clone, PartialEq)]
pub struct StabilityResult {
    pub best_method: Method,

    /// Bound of the best method.
    ///
    /// An unbounded method reports the coarsest tested timestep, as does the
    /// fallback when no method is stable.
    pub max_stable_dt: Time,

    /// Per-method bounds, in [`Method::ALL`] order.
    pub bounds: [MethodBound; 4],

    /// Mean usable sample at the finest evaluated `nt`.
    ///
    /// `None` when every method failed there, in which case every bound is
    /// [`StableDt::Never`].
    pub reference: Option<f64>,

    /// Every evaluated sample, ordered by `nt` and then by method.
    pub samples: Vec<StabilitySample>,

    pub warning: Option<StabilityWarning>,
    pub completion: Completion,
}

impl StabilityResult {
    #[must_use]
    pub fn bound(&self, method: Method) -> &MethodBound {
        &self.bounds[method.index()]
    }
}

impl<S: HeatSolver> StabilityScanner<S> {
    pub fn new(solver: S) -> Self {
        Self { solver }
    }

    /// Runs the scan described by `request`.
    ///
    /// Rows (one per `nt`) are evaluated coarsest first and the observer is
    /// consulted after each one; the four methods of a row may run in
    /// parallel. A cancelled scan derives its reference and bounds from the
    /// rows evaluated so far.
    ///
    /// The best method is the one with the least restrictive bound; ties go
    /// to the method listed later in [`Method::ALL`].
    ///
    /// # Errors
    ///
    /// Returns a [`ScanError`] before any solve if the probe, range,
    /// tolerance, or grid is invalid.
    pub fn scan<F>(
        &self,
        request: &StabilityRequest<'_>,
        mut observer: F,
    ) -> Result<StabilityResult, ScanError>
    where
        F: FnMut(&SweepEvent<'_>) -> Option<SweepAction>,
    {
        let StabilityRequest {
            tmax,
            nt: range,
            thickness,
            nx,
            probe,
            tolerance,
            boundary,
        } = *request;

        if probe >= nx {
            return Err(ScanError::OutOfRange { probe, nx });
        }
        let range = range.validate()?;
        let tolerance = NonNegative::new(tolerance)
            .map_err(ScanError::InvalidTolerance)?
            .into_inner();
        let base = GridParameters::new(tmax, range.min, nx, thickness)?;

        let counts: Vec<usize> = range.counts().collect();
        let dt_at = |nt: usize| tmax / (nt - 1) as f64;
        let solver = &self.solver;

        let mut samples = Vec::with_capacity(counts.len() * Method::ALL.len());
        let mut progress = ProgressDeciles::new(counts.len() * Method::ALL.len());
        let mut cancel = false;

        for &nt in &counts {
            let grid = base.with_counts_unchecked(nt, nx);
            let row = evaluate_range(0..Method::ALL.len(), |i| {
                let request = SolveRequest {
                    grid,
                    method: Method::ALL[i],
                    boundary,
                };
                solver
                    .solve(&request)
                    .map(|field| field.at_final_time(probe).filter(|v| v.is_finite()))
            });

            for (method, outcome) in Method::ALL.into_iter().zip(&row) {
                let (value, cause) = match outcome {
                    Ok(Some(value)) => (Some(*value), None),
                    Ok(None) => (None, Some(FailureCause::UnusableReading)),
                    Err(err) => (None, Some(FailureCause::Solver(err))),
                };
                if let Some(cause) = cause {
                    let event = SweepEvent::CellFailed {
                        method,
                        nt,
                        nx,
                        cause,
                    };
                    cancel |= observer(&event) == Some(SweepAction::Cancel);
                }
                samples.push(StabilitySample {
                    method,
                    nt,
                    dt: dt_at(nt),
                    value,
                });
            }

            if let Some(event) = progress.update(samples.len()) {
                cancel |= observer(&event) == Some(SweepAction::Cancel);
            }
            if cancel {
                break;
            }
        }

        let finest = samples.last().map_or(range.min, |s| s.nt);
        let reference = mean(
            samples
                .iter()
                .filter(|s| s.nt == finest)
                .filter_map(|s| s.value),
        );

        let bounds = Method::ALL.map(|method| {
            let series: Vec<_> = samples
                .iter()
                .filter(|s| s.method == method)
                .copied()
                .collect();
            MethodBound::from_series(method, &series, reference, tolerance)
        });

        let coarsest = dt_at(range.min);
        let best = bounds[1..].iter().fold(bounds[0], |best, b| {
            if b.bound.compare(best.bound).is_lt() {
                best
            } else {
                *b
            }
        });

        let (best_method, max_stable_dt, warning) = match best.bound {
            StableDt::Never => (
                Method::CrankNicolson,
                coarsest,
                Some(StabilityWarning::NoStableMethodFound),
            ),
            StableDt::UpTo(dt) => (best.method, dt, None),
            StableDt::Unbounded => (best.method, coarsest, None),
        };

        let completion = if samples.len() < counts.len() * Method::ALL.len() {
            Completion::Cancelled {
                evaluated: samples.len(),
            }
        } else {
            Completion::Complete
        };

        Ok(StabilityResult {
            best_method,
            max_stable_dt,
            bounds,
            reference,
            samples,
            warning,
            completion,
        })
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0_usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}
