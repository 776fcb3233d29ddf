//! Three-tier risk classification and shading of error magnitudes.

use ndarray::{Array2, ArrayView2};

/// Risk tier of an absolute error.
///
/// The tiers partition `[0, ∞)`: `Low` is `[0, 1)`, `Medium` is `[1, 5]`,
/// and `High` is `(5, ∞)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Risk {
    Low,
    Medium,
    High,
}

impl Risk {
    pub const LOW_BELOW: f64 = 1.0;
    pub const HIGH_ABOVE: f64 = 5.0;

    /// Classifies an absolute error.
    ///
    /// Anything that is not below [`Risk::HIGH_ABOVE`], including `NaN`, is `High`.
    #[must_use]
    pub fn classify(error: f64) -> Self {
        if error < Self::LOW_BELOW {
            Self::Low
        } else if error <= Self::HIGH_ABOVE {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// Linear RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

// Color stops: green at zero error, yellow at the low/medium edge, orange at
// the medium/high edge, and red at the saturation cap.
const STOPS: [(f64, Rgb); 4] = [
    (0.0, Rgb::new(0.0, 0.7, 0.2)),
    (Risk::LOW_BELOW, Rgb::new(1.0, 0.85, 0.0)),
    (Risk::HIGH_ABOVE, Rgb::new(1.0, 0.5, 0.0)),
    (100.0, Rgb::new(0.8, 0.0, 0.0)),
];

/// Continuous shade for an absolute error.
///
/// Interpolates linearly between the tier edges and stays red past the
/// saturation cap.
#[must_use]
pub fn shade(error: f64) -> Rgb {
    let (last_edge, last_color) = STOPS[STOPS.len() - 1];
    if error >= last_edge || error.is_nan() {
        return last_color;
    }
    STOPS
        .windows(2)
        .find(|w| error < w[1].0)
        .map_or(STOPS[0].1, |w| {
            let ((lo, from), (hi, to)) = (w[0], w[1]);
            from.lerp(to, (error - lo) / (hi - lo))
        })
}

/// Per-cell risk tiers and shades of an error surface.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskMap {
    pub labels: Array2<Risk>,
    pub colors: Array2<Rgb>,
}

impl RiskMap {
    /// Classifies and shades every cell of `errors`.
    #[must_use]
    pub fn from_errors(errors: ArrayView2<'_, f64>) -> Self {
        Self {
            labels: errors.map(|&e| Risk::classify(e)),
            colors: errors.map(|&e| shade(e)),
        }
    }

    /// Number of cells in tier `risk`.
    #[must_use]
    pub fn count(&self, risk: Risk) -> usize {
        self.labels.iter().filter(|&&r| r == risk).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn tiers_partition_the_half_line() {
        assert_eq!(Risk::classify(0.0), Risk::Low);
        assert_eq!(Risk::classify(0.999_999), Risk::Low);
        assert_eq!(Risk::classify(1.0), Risk::Medium);
        assert_eq!(Risk::classify(3.0), Risk::Medium);
        assert_eq!(Risk::classify(5.0), Risk::Medium);
        assert_eq!(Risk::classify(5.000_001), Risk::High);
        assert_eq!(Risk::classify(100.0), Risk::High);
        assert_eq!(Risk::classify(f64::INFINITY), Risk::High);
    }

    #[test]
    fn every_value_gets_exactly_one_tier() {
        for i in 0..=2000 {
            let e = f64::from(i) * 0.005;
            let tier = Risk::classify(e);
            let low = e < 1.0;
            let medium = (1.0..=5.0).contains(&e);
            let high = e > 5.0;
            assert_eq!(
                [low, medium, high],
                [tier == Risk::Low, tier == Risk::Medium, tier == Risk::High]
            );
        }
    }

    #[test]
    fn shade_is_continuous_at_tier_edges() {
        for edge in [Risk::LOW_BELOW, Risk::HIGH_ABOVE] {
            let below = shade(edge - 1e-9);
            let above = shade(edge + 1e-9);
            assert_relative_eq!(below.r, above.r, epsilon = 1e-6);
            assert_relative_eq!(below.g, above.g, epsilon = 1e-6);
            assert_relative_eq!(below.b, above.b, epsilon = 1e-6);
        }
    }

    #[test]
    fn shade_endpoints() {
        assert_eq!(shade(0.0), STOPS[0].1);
        assert_eq!(shade(100.0), STOPS[3].1);
        assert_eq!(shade(1e9), STOPS[3].1);
        assert_relative_eq!(shade(0.5).r, 0.5);
    }

    #[test]
    fn risk_map_counts() {
        let map = RiskMap::from_errors(array![[0.2, 1.0], [7.0, 0.9]].view());
        assert_eq!(map.count(Risk::Low), 2);
        assert_eq!(map.count(Risk::Medium), 1);
        assert_eq!(map.count(Risk::High), 1);
        assert_eq!(map.colors.dim(), (2, 2));
    }
}
