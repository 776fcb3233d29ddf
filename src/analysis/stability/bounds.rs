use std::cmp::Ordering;

use uom::si::{f64::Time, time::second};

use crate::solver::Method;

use super::StabilitySample;

/// Largest timestep a method tolerated in a scan.
///
/// This is a trailing-edge estimate: it marks where violations of the
/// tolerance band stop appearing among the tested timesteps. It does not
/// claim that every smaller timestep is stable, nor anything about
/// timesteps outside the tested range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StableDt {
    /// The finest tested timestep still violated the band.
    Never,

    /// No violations at this timestep or any smaller tested one.
    UpTo(Time),

    /// No tested timestep violated the band.
    Unbounded,
}

impl StableDt {
    /// The timestep of an [`UpTo`](Self::UpTo) bound.
    #[must_use]
    pub fn dt(self) -> Option<Time> {
        match self {
            Self::UpTo(dt) => Some(dt),
            Self::Never | Self::Unbounded => None,
        }
    }

    /// Orders bounds from most to least restrictive.
    pub(super) fn compare(self, other: Self) -> Ordering {
        match (self, other) {
            (Self::Never, Self::Never) | (Self::Unbounded, Self::Unbounded) => Ordering::Equal,
            (Self::Never, _) | (_, Self::Unbounded) => Ordering::Less,
            (_, Self::Never) | (Self::Unbounded, _) => Ordering::Greater,
            (Self::UpTo(a), Self::UpTo(b)) => a.get::<second>().total_cmp(&b.get::<second>()),
        }
    }
}

/// Stability bound of one method, with the violations that determined it.
///
/// Each `last_*` field holds the `nt` of the last sample with that kind of
/// violation, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodBound {
    pub method: Method,
    pub bound: StableDt,

    /// Sampled above `reference + tolerance`.
    pub last_above: Option<usize>,

    /// Sampled below `reference - tolerance`.
    pub last_below: Option<usize>,

    /// Solve failed or produced no usable sample.
    pub last_failure: Option<usize>,
}

impl MethodBound {
    /// Derives the bound from one method's samples, ordered by increasing `nt`.
    ///
    /// Without a reference there is no band, so only failures count as
    /// violations.
    pub(super) fn from_series(
        method: Method,
        series: &[StabilitySample],
        reference: Option<f64>,
        tolerance: f64,
    ) -> Self {
        let (upper, lower) = reference.map_or((f64::INFINITY, f64::NEG_INFINITY), |r| {
            (r + tolerance, r - tolerance)
        });
        let mut bound = Self {
            method,
            bound: StableDt::Unbounded,
            last_above: None,
            last_below: None,
            last_failure: None,
        };

        let mut last_violation = None;
        for (i, sample) in series.iter().enumerate() {
            let slot = match sample.value {
                None => &mut bound.last_failure,
                Some(v) if v > upper => &mut bound.last_above,
                Some(v) if v < lower => &mut bound.last_below,
                Some(_) => continue,
            };
            *slot = Some(sample.nt);
            last_violation = Some(i);
        }

        if let Some(i) = last_violation {
            bound.bound = series
                .get(i + 1)
                .map_or(StableDt::Never, |next| StableDt::UpTo(next.dt));
        }
        bound
    }
}
