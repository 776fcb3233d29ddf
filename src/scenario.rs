//! Scenario registry and boundary data.
//!
//! Each [`Scenario`] names a measured surface-temperature history and the
//! peak inner-face temperature it is known to produce, stored in kelvin.
//! Lookups by identifier go through [`Scenario::from_str`], which rejects
//! unknown keys before any solver work starts.

mod error;
mod provider;

pub use error::ScenarioError;
pub use provider::{BoundaryDataProvider, BoundaryTable};

use std::{fmt, str::FromStr};

use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

use crate::support::units::UnitSystem;

/// Registered scenario, keyed by sensor location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scenario {
    TopLeft,
    TopCentre,
    TopRight,
    MidLeft,
    MidRight,
    BottomLeft,
    BottomCentre,
    BottomRight,
}

impl Scenario {
    /// Every registered scenario.
    pub const ALL: [Scenario; 8] = [
        Scenario::TopLeft,
        Scenario::TopCentre,
        Scenario::TopRight,
        Scenario::MidLeft,
        Scenario::MidRight,
        Scenario::BottomLeft,
        Scenario::BottomCentre,
        Scenario::BottomRight,
    ];

    /// Registry identifier.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::TopLeft => "t_l",
            Self::TopCentre => "t_c",
            Self::TopRight => "t_r",
            Self::MidLeft => "m_l",
            Self::MidRight => "m_r",
            Self::BottomLeft => "b_l",
            Self::BottomCentre => "b_c",
            Self::BottomRight => "b_r",
        }
    }

    /// Target peak inner-face temperature.
    #[must_use]
    pub fn target(self) -> ThermodynamicTemperature {
        let k = match self {
            Self::TopLeft => 447.3516,
            Self::TopCentre => 462.0821,
            Self::TopRight => 439.5503,
            Self::MidLeft => 421.7735,
            Self::MidRight => 415.9060,
            Self::BottomLeft => 398.2334,
            Self::BottomCentre => 405.6619,
            Self::BottomRight => 392.8147,
        };
        ThermodynamicTemperature::new::<kelvin>(k)
    }

    /// Target expressed in `units`.
    #[must_use]
    pub fn target_in(self, units: UnitSystem) -> f64 {
        units.express(self.target())
    }
}

impl FromStr for Scenario {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.id() == s)
            .ok_or_else(|| ScenarioError::UnknownScenario(s.to_owned()))
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
