use thiserror::Error;

use crate::solver::BoundaryError;

use super::Scenario;

/// Errors from scenario lookup and boundary data retrieval.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    /// The identifier is not in the registry.
    #[error("unknown scenario: {0:?}")]
    UnknownScenario(String),

    /// The provider has no series for this scenario.
    #[error("no boundary data for scenario {0}")]
    MissingBoundaryData(Scenario),

    /// The provider's series could not be expressed in the requested units.
    #[error("boundary data for scenario {scenario} is invalid")]
    InvalidBoundaryData {
        scenario: Scenario,

        #[source]
        source: BoundaryError,
    },
}
