use uom::si::{
    f64::{Length, Time},
    length::meter,
    time::second,
};

use crate::solver::Metric;

/// Settings for an error-surface sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorSurfaceConfig {
    /// Simulated duration of every cell.
    pub tmax: Time,

    /// Slab thickness of every cell.
    pub thickness: Length,

    /// Added to the requested resolution to size both sweep axes.
    ///
    /// A single knob drives both `nt` and `nx`, so the surface is always
    /// square. The offset is a heuristic that keeps even a zero resolution
    /// sweep over a useful range; it carries no physical meaning and the
    /// axes cannot be sized independently.
    pub grid_offset: usize,

    /// Errors above this are replaced by [`saturated_value`](Self::saturated_value).
    pub saturation_threshold: f64,

    /// Display cap for saturated errors, so one divergent cell does not
    /// stretch the color scale.
    pub saturated_value: f64,

    /// Recorded for cells whose solve failed.
    pub failure_sentinel: f64,

    /// Reading compared against the scenario target.
    pub metric: Metric,
}

impl Default for ErrorSurfaceConfig {
    fn default() -> Self {
        Self {
            tmax: Time::new::<second>(4000.0),
            thickness: Length::new::<meter>(0.05),
            grid_offset: 50,
            saturation_threshold: 150.0,
            saturated_value: 100.0,
            failure_sentinel: 100.0,
            metric: Metric::InnerFacePeak,
        }
    }
}

impl ErrorSurfaceConfig {
    /// Applies saturation to a raw absolute error.
    #[must_use]
    pub fn saturate(&self, error: f64) -> f64 {
        if error > self.saturation_threshold {
            self.saturated_value
        } else {
            error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturation_replaces_large_errors() {
        let config = ErrorSurfaceConfig::default();
        assert_eq!(config.saturate(12.5), 12.5);
        assert_eq!(config.saturate(150.0), 150.0);
        assert_eq!(config.saturate(150.01), 100.0);
        assert_eq!(config.saturate(1e12), 100.0);
    }
}
