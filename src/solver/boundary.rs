use thiserror::Error;

/// Time-dependent surface temperature imposed on the slab.
///
/// A paired series of sample times (seconds) and temperatures. Times start at
/// zero and strictly increase; values are in whatever unit system the study
/// runs in. Between samples the condition is linearly interpolated, and past
/// the last sample it holds the final value.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryCondition {
    times: Vec<f64>,
    values: Vec<f64>,
}

/// Errors from building a [`BoundaryCondition`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundaryError {
    #[error("boundary series is empty")]
    Empty,

    #[error("boundary series lengths differ: {times} times, {values} values")]
    LengthMismatch { times: usize, values: usize },

    #[error("boundary series must start at t = 0, got {0}")]
    NonZeroStart(f64),

    #[error("boundary times must strictly increase (index {index})")]
    NotIncreasing { index: usize },

    #[error("boundary series has a non-finite entry at index {index}")]
    NonFinite { index: usize },
}

impl BoundaryCondition {
    /// Validates and builds a boundary condition.
    ///
    /// # Errors
    ///
    /// Returns a [`BoundaryError`] if the series are empty, differ in length,
    /// contain non-finite entries, do not start at zero, or are not strictly
    /// increasing in time.
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Result<Self, BoundaryError> {
        if times.len() != values.len() {
            return Err(BoundaryError::LengthMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        if times.is_empty() {
            return Err(BoundaryError::Empty);
        }
        if let Some(index) = times
            .iter()
            .zip(&values)
            .position(|(t, v)| !t.is_finite() || !v.is_finite())
        {
            return Err(BoundaryError::NonFinite { index });
        }
        if times[0] != 0.0 {
            return Err(BoundaryError::NonZeroStart(times[0]));
        }
        if let Some(index) = times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(BoundaryError::NotIncreasing { index: index + 1 });
        }

        Ok(Self { times, values })
    }

    /// A condition that holds a single temperature for all time.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self {
            times: vec![0.0],
            values: vec![value],
        }
    }

    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Largest absolute temperature in the series.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }

    /// Linearly interpolated temperature at `seconds`.
    ///
    /// Holds the first value before `t = 0` and the last value after the
    /// final sample.
    #[must_use]
    pub fn value_at(&self, seconds: f64) -> f64 {
        let last = self.times.len() - 1;
        if seconds <= self.times[0] {
            return self.values[0];
        }
        if seconds >= self.times[last] {
            return self.values[last];
        }

        // First sample strictly after `seconds`; always in 1..=last here.
        let hi = self.times.partition_point(|&t| t <= seconds);
        let lo = hi - 1;
        let frac = (seconds - self.times[lo]) / (self.times[hi] - self.times[lo]);
        self.values[lo] + frac * (self.values[hi] - self.values[lo])
    }

    /// Applies `f` to every value, keeping the sample times.
    ///
    /// Used to move a series between unit systems.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError::NonFinite`] if `f` produces a non-finite value.
    pub fn map_values(&self, f: impl Fn(f64) -> f64) -> Result<Self, BoundaryError> {
        Self::new(self.times.clone(), self.values.iter().map(|&v| f(v)).collect())
    }
}
