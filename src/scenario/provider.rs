use std::collections::HashMap;

use crate::{solver::BoundaryCondition, support::units::UnitSystem};

use super::{Scenario, ScenarioError};

/// Source of measured surface-temperature histories.
pub trait BoundaryDataProvider {
    /// Returns the boundary series for `scenario`, expressed in `units`.
    ///
    /// # Errors
    ///
    /// Returns a [`ScenarioError`] if the provider has no usable series for
    /// the scenario.
    fn fetch(
        &self,
        scenario: Scenario,
        units: UnitSystem,
    ) -> Result<BoundaryCondition, ScenarioError>;
}

impl<T: BoundaryDataProvider + ?Sized> BoundaryDataProvider for &T {
    fn fetch(
        &self,
        scenario: Scenario,
        units: UnitSystem,
    ) -> Result<BoundaryCondition, ScenarioError> {
        (**self).fetch(scenario, units)
    }
}

/// In-memory provider holding kelvin series per scenario.
///
/// ```
/// use twine_conduction::scenario::{BoundaryDataProvider, BoundaryTable, Scenario};
/// use twine_conduction::solver::BoundaryCondition;
/// use twine_conduction::support::units::UnitSystem;
///
/// let table = BoundaryTable::new().with(
///     Scenario::MidLeft,
///     BoundaryCondition::new(vec![0.0, 60.0], vec![290.0, 800.0]).unwrap(),
/// );
/// let bc = table.fetch(Scenario::MidLeft, UnitSystem::Celsius).unwrap();
/// assert!((bc.values()[1] - 526.85).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoundaryTable {
    kelvin: HashMap<Scenario, BoundaryCondition>,
}

impl BoundaryTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the kelvin series for `scenario`.
    #[must_use]
    pub fn with(mut self, scenario: Scenario, kelvin: BoundaryCondition) -> Self {
        self.insert(scenario, kelvin);
        self
    }

    /// Adds or replaces the kelvin series for `scenario`, returning the old one.
    pub fn insert(
        &mut self,
        scenario: Scenario,
        kelvin: BoundaryCondition,
    ) -> Option<BoundaryCondition> {
        self.kelvin.insert(scenario, kelvin)
    }
}

impl BoundaryDataProvider for BoundaryTable {
    fn fetch(
        &self,
        scenario: Scenario,
        units: UnitSystem,
    ) -> Result<BoundaryCondition, ScenarioError> {
        let kelvin = self
            .kelvin
            .get(&scenario)
            .ok_or(ScenarioError::MissingBoundaryData(scenario))?;

        match units {
            UnitSystem::Kelvin => Ok(kelvin.clone()),
            _ => kelvin
                .map_values(|v| units.express_kelvin(v))
                .map_err(|source| ScenarioError::InvalidBoundaryData { scenario, source }),
        }
    }
}
