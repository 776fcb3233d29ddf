//! Temperature unit systems.
//!
//! Targets and boundary data are stored in kelvin. Callers pick the unit
//! system a study runs in, and values are converted once at the boundary
//! using [`uom`] thermodynamic temperature units.
//!
//! ```
//! use twine_conduction::support::units::UnitSystem;
//!
//! let units: UnitSystem = "celsius".parse().unwrap();
//! assert!((units.express_kelvin(373.15) - 100.0).abs() < 1e-9);
//! ```

use std::{fmt, str::FromStr};

use thiserror::Error;
use uom::si::{
    f64::ThermodynamicTemperature,
    thermodynamic_temperature::{degree_celsius, degree_fahrenheit, kelvin},
};

/// The temperature scale a study is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnitSystem {
    #[default]
    Kelvin,
    Celsius,
    Fahrenheit,
}

/// Returned when parsing an unrecognized unit system name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown unit system: {0:?}")]
pub struct UnknownUnitSystem(pub String);

impl UnitSystem {
    /// Expresses an absolute temperature in this unit system.
    #[must_use]
    pub fn express(self, temperature: ThermodynamicTemperature) -> f64 {
        match self {
            Self::Kelvin => temperature.get::<kelvin>(),
            Self::Celsius => temperature.get::<degree_celsius>(),
            Self::Fahrenheit => temperature.get::<degree_fahrenheit>(),
        }
    }

    /// Converts a raw kelvin value into this unit system.
    #[must_use]
    pub fn express_kelvin(self, value: f64) -> f64 {
        self.express(ThermodynamicTemperature::new::<kelvin>(value))
    }
}

impl FromStr for UnitSystem {
    type Err = UnknownUnitSystem;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kelvin" | "k" => Ok(Self::Kelvin),
            "celsius" | "c" => Ok(Self::Celsius),
            "fahrenheit" | "f" => Ok(Self::Fahrenheit),
            _ => Err(UnknownUnitSystem(s.to_owned())),
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Kelvin => "kelvin",
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
        })
    }
}
