//! Observation and dispatch shared by the parameter sweeps.
//!
//! Sweeps report to an observer closure of the form
//! `FnMut(&SweepEvent<'_>) -> Option<SweepAction>`. Observers see progress
//! and every absorbed per-cell failure; returning
//! `Some(SweepAction::Cancel)` stops the sweep after the current row.
//! Observers never change computed values.

use std::ops::Range;

use crate::solver::{Method, SolveError};

/// Something that happened during a sweep.
#[derive(Debug)]
pub enum SweepEvent<'a> {
    /// Roughly every tenth of the sweep.
    Progress { completed: usize, total: usize },

    /// A work item failed and was recorded with a sentinel or as a violation.
    CellFailed {
        method: Method,
        nt: usize,
        nx: usize,
        cause: FailureCause<'a>,
    },
}

/// Why a work item failed.
#[derive(Debug, Clone, Copy)]
pub enum FailureCause<'a> {
    /// The solver returned an error.
    Solver(&'a SolveError),

    /// The solver succeeded but the sampled value was not finite or missing.
    UnusableReading,
}

/// Control returned by a sweep observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepAction {
    /// Stop after the row in progress and return the partial result.
    Cancel,
}

/// Whether a sweep covered its whole parameter range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Complete,

    /// Stopped by the observer after `evaluated` work items.
    Cancelled { evaluated: usize },
}

impl Completion {
    #[must_use]
    pub fn is_complete(self) -> bool {
        self == Self::Complete
    }
}

/// Emits [`SweepEvent::Progress`] each time another tenth is crossed.
#[derive(Debug)]
pub(crate) struct ProgressDeciles {
    total: usize,
    next: usize,
}

impl ProgressDeciles {
    pub(crate) fn new(total: usize) -> Self {
        Self { total, next: 1 }
    }

    /// Returns a progress event if `completed` crosses the next decile.
    pub(crate) fn update(&mut self, completed: usize) -> Option<SweepEvent<'static>> {
        if self.total == 0 || completed * 10 < self.next * self.total {
            return None;
        }
        self.next = completed * 10 / self.total + 1;
        Some(SweepEvent::Progress {
            completed,
            total: self.total,
        })
    }
}

/// Evaluates `f` for every index in `range`, preserving order.
///
/// Runs on the rayon pool when the `parallel` feature is enabled. Each call
/// is independent and results are only collected, never shared.
pub(crate) fn evaluate_range<R, F>(range: Range<usize>, f: F) -> Vec<R>
where
    R: Send,
    F: Fn(usize) -> R + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        range.into_par_iter().map(f).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        range.map(f).collect()
    }
}
