//! # Twine Conduction
//!
//! Numerical studies of one-dimensional transient heat conduction solvers:
//! grid-convergence error surfaces, thickness calibration, and comparative
//! stability of finite-difference schemes.
//!
//! ## Crate layout
//!
//! - [`solver`]: The [`HeatSolver`](solver::HeatSolver) boundary every study
//!   drives, plus a finite-difference [`ReferenceSolver`](solver::ReferenceSolver).
//! - [`scenario`]: Registered measurement scenarios, their targets, and
//!   boundary data providers.
//! - [`analysis`]: The studies themselves.
//! - [`support`]: Supporting utilities used across the crate.
//!
//! ## Example
//!
//! ```
//! use twine_conduction::{
//!     analysis::{ErrorSurfaceConfig, ErrorSurfaceMapper, SurfaceRequest},
//!     scenario::{BoundaryTable, Scenario},
//!     solver::{BoundaryCondition, Method, ReferenceSolver},
//!     support::units::UnitSystem,
//! };
//!
//! let provider = BoundaryTable::new().with(
//!     Scenario::MidLeft,
//!     BoundaryCondition::new(vec![0.0, 1000.0, 4000.0], vec![300.0, 600.0, 450.0]).unwrap(),
//! );
//! let config = ErrorSurfaceConfig {
//!     grid_offset: 8,
//!     ..ErrorSurfaceConfig::default()
//! };
//!
//! let report = ErrorSurfaceMapper::new(ReferenceSolver::default(), provider)
//!     .with_config(config)
//!     .map(
//!         &SurfaceRequest {
//!             scenario: "m_l",
//!             resolution: 2,
//!             method: Method::CrankNicolson,
//!             units: UnitSystem::Celsius,
//!         },
//!         |_| None,
//!     )
//!     .unwrap();
//!
//! assert_eq!(report.surface.errors().dim(), (10, 10));
//! assert!(report.stats.is_some());
//! ```
//!
//! ## Parallelism
//!
//! With the `parallel` feature, independent solves within a sweep row run on
//! the rayon thread pool. Results do not depend on the feature.

pub mod analysis;
pub mod scenario;
pub mod solver;
pub mod support;
