//! Studies driven by a [`HeatSolver`](crate::solver::HeatSolver).
//!
//! - [`ErrorSurfaceMapper`]: accuracy of one scheme across grid resolutions,
//!   scored against a scenario target and classified by [`risk`].
//! - [`ThicknessCalibrator`]: secant search for the slab thickness that
//!   reaches a target temperature.
//! - [`StabilityScanner`]: comparison of all four schemes across timestep
//!   sizes.
//!
//! The two sweeps absorb per-cell solver failures and report them, along
//! with progress, through an observer closure (see [`sweep`]). The
//! calibrator is sequential and propagates failures as errors.

mod calibration;
mod error_surface;
pub mod risk;
mod stability;
pub mod sweep;

#[cfg(test)]
mod test_support;

pub use calibration::{
    Calibration, CalibrationConfig, CalibrationError, CalibrationRequest, SecantIterate,
    ThicknessCalibrator, ThicknessModel,
};
pub use error_surface::{
    BestCell, ErrorSurface, ErrorSurfaceConfig, ErrorSurfaceError, ErrorSurfaceMapper,
    SummaryStats, SurfaceReport, SurfaceRequest,
};
pub use risk::{Risk, RiskMap, Rgb};
pub use stability::{
    MethodBound, NtRange, ScanError, StabilityRequest, StabilityResult, StabilitySample,
    StabilityScanner, StabilityWarning, StableDt,
};
pub use sweep::{Completion, FailureCause, SweepAction, SweepEvent};
