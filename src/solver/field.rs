use ndarray::{Array2, ArrayView1, Axis};

use super::SolveError;

/// Temperature history of a discretized slab.
///
/// Stored as an `(nx, nt)` array:
///
/// - axis 0 is the spatial node, from node 0 (the surface driven by the
///   boundary condition) to node `nx - 1` (the insulated inner face);
/// - axis 1 is the time level, from `t = 0` to the final time `tmax`.
///
/// A column is therefore a spatial profile at one instant and a row is the
/// history of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureField {
    values: Array2<f64>,
}

/// Scalar reading extracted from a [`TemperatureField`].
///
/// The two readings answer different questions and are not interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    /// Peak temperature reached by the inner face over the whole run.
    #[default]
    InnerFacePeak,

    /// Peak of the spatial profile at the final time.
    FinalProfilePeak,
}

impl TemperatureField {
    /// Wraps an `(nx, nt)` array of temperatures.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::InvalidGrid`] if either axis is empty.
    pub fn new(values: Array2<f64>) -> Result<Self, SolveError> {
        if values.is_empty() {
            return Err(SolveError::InvalidGrid {
                reason: "temperature field has no nodes or no time levels",
            });
        }
        Ok(Self { values })
    }

    /// Number of spatial nodes.
    #[must_use]
    pub fn nx(&self) -> usize {
        self.values.len_of(Axis(0))
    }

    /// Number of time levels.
    #[must_use]
    pub fn nt(&self) -> usize {
        self.values.len_of(Axis(1))
    }

    #[must_use]
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// History of node `node`, or `None` if out of range.
    #[must_use]
    pub fn node_history(&self, node: usize) -> Option<ArrayView1<'_, f64>> {
        (node < self.nx()).then(|| self.values.row(node))
    }

    /// Spatial profile at the final time.
    #[must_use]
    pub fn final_profile(&self) -> ArrayView1<'_, f64> {
        self.values.column(self.nt() - 1)
    }

    /// Temperature of node `node` at the final time.
    #[must_use]
    pub fn at_final_time(&self, node: usize) -> Option<f64> {
        self.final_profile().get(node).copied()
    }

    /// Peak temperature reached by the inner face.
    #[must_use]
    pub fn inner_face_peak(&self) -> f64 {
        peak(self.values.row(self.nx() - 1).iter())
    }

    /// Peak of the final-time spatial profile.
    #[must_use]
    pub fn peak_of_final_profile(&self) -> f64 {
        peak(self.final_profile().iter())
    }

    /// Extracts `metric` from this field.
    ///
    /// The result is non-finite if every sampled value is.
    #[must_use]
    pub fn read(&self, metric: Metric) -> f64 {
        match metric {
            Metric::InnerFacePeak => self.inner_face_peak(),
            Metric::FinalProfilePeak => self.peak_of_final_profile(),
        }
    }
}

fn peak<'a>(values: impl Iterator<Item = &'a f64>) -> f64 {
    values.copied().fold(f64::NEG_INFINITY, f64::max)
}
