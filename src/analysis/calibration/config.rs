use uom::si::{f64::Length, length::meter};

use crate::solver::{Method, Metric};

/// Configuration for [`ThicknessCalibrator`](super::ThicknessCalibrator).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationConfig {
    /// The two starting thicknesses of the secant iteration.
    pub seeds: [Length; 2],

    /// Largest `|achieved - target|` accepted as converged.
    pub tolerance: f64,

    /// Scheme used for every solve.
    pub method: Method,

    /// Reading compared against the target temperature.
    pub metric: Metric,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            seeds: [Length::new::<meter>(0.05), Length::new::<meter>(0.15)],
            tolerance: 0.001,
            method: Method::CrankNicolson,
            metric: Metric::FinalProfilePeak,
        }
    }
}
