use ndarray::ArrayView2;

use crate::analysis::risk::Risk;

/// Aggregate view of the evaluated cells of an error surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,

    /// Cells classified [`Risk::Low`].
    pub low_count: usize,

    /// Cells the statistics cover.
    pub cells: usize,

    /// Percentage of covered cells that are low risk.
    pub stability_ratio: f64,

    /// Lowest-error cell; ties go to the first in row-major order.
    pub best: BestCell,
}

/// Grid resolution with the smallest error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestCell {
    pub nt: usize,
    pub nx: usize,
    pub error: f64,
}

impl SummaryStats {
    /// Summarizes `errors`, where cell `(r, c)` was solved with
    /// `nt = r + first_count` and `nx = c + first_count`.
    ///
    /// Returns `None` for an empty view.
    pub(super) fn of(errors: ArrayView2<'_, f64>, first_count: usize) -> Option<Self> {
        let cells = errors.len();
        if cells == 0 {
            return None;
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut low_count = 0;
        let mut best = BestCell {
            nt: first_count,
            nx: first_count,
            error: f64::INFINITY,
        };

        for ((row, col), &error) in errors.indexed_iter() {
            sum += error;
            max = max.max(error);
            min = min.min(error);
            if Risk::classify(error) == Risk::Low {
                low_count += 1;
            }
            if error < best.error {
                best = BestCell {
                    nt: row + first_count,
                    nx: col + first_count,
                    error,
                };
            }
        }

        Some(Self {
            min,
            max,
            mean: sum / cells as f64,
            low_count,
            cells,
            stability_ratio: low_count as f64 / cells as f64 * 100.0,
            best,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::{Array2, array};

    #[test]
    fn aggregates() {
        let errors = array![[3.0, 0.5, 8.0], [0.5, 2.0, 0.25]];
        let stats = SummaryStats::of(errors.view(), 2).unwrap();

        assert_relative_eq!(stats.min, 0.25);
        assert_relative_eq!(stats.max, 8.0);
        assert_relative_eq!(stats.mean, 14.25 / 6.0);
        assert_eq!(stats.low_count, 3);
        assert_eq!(stats.cells, 6);
        assert_relative_eq!(stats.stability_ratio, 50.0);
        assert_eq!((stats.best.nt, stats.best.nx), (3, 4));
    }

    #[test]
    fn ties_go_to_first_cell_in_row_major_order() {
        let errors = array![[4.0, 1.5], [1.5, 1.5]];
        let best = SummaryStats::of(errors.view(), 2).unwrap().best;
        assert_eq!((best.nt, best.nx), (2, 3));
    }

    #[test]
    fn empty_view_has_no_stats() {
        let errors = Array2::<f64>::zeros((0, 5));
        assert!(SummaryStats::of(errors.view(), 2).is_none());
    }
}
