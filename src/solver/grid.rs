use thiserror::Error;
use uom::si::f64::{Length, Time};

use crate::support::constraint::{Constrained, ConstraintError, StrictlyPositive};

/// Temporal and spatial discretization of a single solver call.
///
/// `nt` counts time levels including `t = 0` and `nx` counts spatial nodes
/// including both faces, so `dt = tmax / (nt - 1)` and
/// `dx = thickness / (nx - 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParameters {
    tmax: Constrained<Time, StrictlyPositive>,
    nt: Constrained<usize, StrictlyPositive>,
    nx: Constrained<usize, StrictlyPositive>,
    thickness: Constrained<Length, StrictlyPositive>,
}

/// Returned when a grid parameter violates its constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid {field}")]
pub struct GridError {
    /// Name of the offending parameter.
    pub field: &'static str,

    #[source]
    pub source: ConstraintError,
}

impl GridParameters {
    /// Validates and builds a grid.
    ///
    /// # Errors
    ///
    /// Returns a [`GridError`] if `tmax` or `thickness` is not strictly
    /// positive, or if `nt` or `nx` is zero.
    pub fn new(tmax: Time, nt: usize, nx: usize, thickness: Length) -> Result<Self, GridError> {
        let check = |field| move |source| GridError { field, source };
        Ok(Self {
            tmax: StrictlyPositive::new(tmax).map_err(check("tmax"))?,
            nt: StrictlyPositive::new(nt).map_err(check("nt"))?,
            nx: StrictlyPositive::new(nx).map_err(check("nx"))?,
            thickness: StrictlyPositive::new(thickness).map_err(check("thickness"))?,
        })
    }

    /// Returns this grid with a different domain thickness.
    #[must_use]
    pub fn with_thickness(self, thickness: Constrained<Length, StrictlyPositive>) -> Self {
        Self { thickness, ..self }
    }

    /// Returns this grid with node counts a sweep already knows to be
    /// non-zero.
    pub(crate) fn with_counts_unchecked(self, nt: usize, nx: usize) -> Self {
        Self {
            nt: Constrained::new_unchecked(nt),
            nx: Constrained::new_unchecked(nx),
            ..self
        }
    }

    #[must_use]
    pub fn tmax(&self) -> Time {
        self.tmax.get()
    }

    #[must_use]
    pub fn nt(&self) -> usize {
        self.nt.get()
    }

    #[must_use]
    pub fn nx(&self) -> usize {
        self.nx.get()
    }

    #[must_use]
    pub fn thickness(&self) -> Length {
        self.thickness.get()
    }

    /// Timestep size, or `None` for a single time level.
    #[must_use]
    pub fn dt(&self) -> Option<Time> {
        let nt = self.nt();
        (nt > 1).then(|| self.tmax() / (nt - 1) as f64)
    }

    /// Node spacing, or `None` for a single node.
    #[must_use]
    pub fn dx(&self) -> Option<Length> {
        let nx = self.nx();
        (nx > 1).then(|| self.thickness() / (nx - 1) as f64)
    }
}
