//! Finite-difference reference solver for a 1D slab.
//!
//! The slab starts at a uniform temperature equal to the boundary value at
//! `t = 0`. Node 0 follows the boundary condition (Dirichlet) and the inner
//! face at node `nx - 1` is insulated, handled with a mirrored ghost node.
//! The mesh Fourier number `p = α·dt/dx²` sets the behaviour of the explicit
//! schemes: forward differencing diverges once `p > 1/2`.

mod tridiagonal;

use ndarray::Array2;
use uom::si::{
    f64::{MassDensity, SpecificHeatCapacity, ThermalConductivity},
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    time::second,
};

use super::{HeatSolver, Method, SolveError, SolveRequest, TemperatureField};

/// Thermal properties of the slab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub conductivity: ThermalConductivity,
    pub density: MassDensity,
    pub specific_heat: SpecificHeatCapacity,
}

impl Material {
    /// Silica-fibre insulation tile.
    #[must_use]
    pub fn insulation_tile() -> Self {
        Self {
            conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(0.0577),
            density: MassDensity::new::<kilogram_per_cubic_meter>(144.0),
            specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(1261.0),
        }
    }

    /// Thermal diffusivity `k / (ρ·c)` in m²/s.
    #[must_use]
    pub fn diffusivity(&self) -> f64 {
        self.conductivity.get::<watt_per_meter_kelvin>()
            / (self.density.get::<kilogram_per_cubic_meter>()
                * self.specific_heat.get::<joule_per_kilogram_kelvin>())
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::insulation_tile()
    }
}

/// Configuration for [`ReferenceSolver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceConfig {
    /// Slab material.
    pub material: Material,

    /// Divergence threshold, as a multiple of `1 + max |boundary value|`.
    ///
    /// Any temperature beyond it is reported as numerical instability.
    pub divergence_factor: f64,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            material: Material::default(),
            divergence_factor: 1e3,
        }
    }
}

/// Finite-difference solver implementing all four [`Method`]s.
///
/// # Example
///
/// ```
/// use twine_conduction::solver::{
///     BoundaryCondition, GridParameters, HeatSolver, Method, ReferenceSolver, SolveRequest,
/// };
/// use uom::si::{f64::{Length, Time}, length::meter, time::second};
///
/// let boundary = BoundaryCondition::new(vec![0.0, 1000.0], vec![300.0, 600.0]).unwrap();
/// let grid = GridParameters::new(Time::new::<second>(1000.0), 101, 21, Length::new::<meter>(0.05))
///     .unwrap();
/// let field = ReferenceSolver::default()
///     .solve(&SolveRequest { grid, method: Method::CrankNicolson, boundary: &boundary })
///     .unwrap();
///
/// assert_eq!((field.nx(), field.nt()), (21, 101));
/// assert!(field.inner_face_peak() < 600.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReferenceSolver {
    config: ReferenceConfig,
}

impl ReferenceSolver {
    #[must_use]
    pub fn new(config: ReferenceConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ReferenceConfig {
        &self.config
    }
}

impl HeatSolver for ReferenceSolver {
    fn solve(&self, request: &SolveRequest<'_>) -> Result<TemperatureField, SolveError> {
        let SolveRequest {
            grid,
            method,
            boundary,
        } = *request;

        let (Some(dt), Some(dx)) = (grid.dt(), grid.dx()) else {
            return Err(SolveError::InvalidGrid {
                reason: "reference solver needs at least two time levels and two nodes",
            });
        };
        let dt = dt.get::<second>();
        let dx = dx.get::<meter>();
        let p = self.config.material.diffusivity() * dt / (dx * dx);

        let (nx, nt) = (grid.nx(), grid.nt());
        let limit = self.config.divergence_factor * (1.0 + boundary.magnitude());

        let mut u = Array2::from_elem((nx, nt), boundary.value_at(0.0));
        let mut previous = u.column(0).to_vec();
        let mut current = previous.clone();
        let mut next = vec![0.0; nx];
        let mut scratch = Scratch::new(nx);

        for step in 1..nt {
            let surface = boundary.value_at(step as f64 * dt);
            match method {
                Method::Forward => forward(p, &current, surface, &mut next),
                Method::DufortFrankel if step == 1 => forward(p, &current, surface, &mut next),
                Method::DufortFrankel => dufort_frankel(p, &previous, &current, surface, &mut next),
                Method::Backward => scratch.implicit(p, 1.0, &current, surface, &mut next),
                Method::CrankNicolson => scratch.implicit(p, 0.5, &current, surface, &mut next),
            }

            if next.iter().any(|v| !v.is_finite() || v.abs() > limit) {
                return Err(SolveError::NumericalInstability { method, step });
            }

            u.column_mut(step)
                .iter_mut()
                .zip(&next)
                .for_each(|(dst, &src)| *dst = src);
            std::mem::swap(&mut previous, &mut current);
            std::mem::swap(&mut current, &mut next);
        }

        TemperatureField::new(u)
    }
}

/// Explicit forward-time step.
fn forward(p: f64, current: &[f64], surface: f64, next: &mut [f64]) {
    let last = current.len() - 1;
    next[0] = surface;
    for i in 1..last {
        next[i] = current[i] + p * (current[i - 1] - 2.0 * current[i] + current[i + 1]);
    }
    next[last] = current[last] + 2.0 * p * (current[last - 1] - current[last]);
}

/// Three-level DuFort–Frankel step.
fn dufort_frankel(p: f64, previous: &[f64], current: &[f64], surface: f64, next: &mut [f64]) {
    let last = current.len() - 1;
    let denom = 1.0 + 2.0 * p;
    next[0] = surface;
    for i in 1..last {
        next[i] =
            ((1.0 - 2.0 * p) * previous[i] + 2.0 * p * (current[i - 1] + current[i + 1])) / denom;
    }
    next[last] = ((1.0 - 2.0 * p) * previous[last] + 4.0 * p * current[last - 1]) / denom;
}

/// Coefficient buffers for the implicit schemes.
struct Scratch {
    sub: Vec<f64>,
    diag: Vec<f64>,
    sup: Vec<f64>,
}

impl Scratch {
    fn new(nx: usize) -> Self {
        Self {
            sub: vec![0.0; nx],
            diag: vec![0.0; nx],
            sup: vec![0.0; nx],
        }
    }

    /// θ-weighted implicit step: θ = 1 is backward, θ = ½ is Crank–Nicolson.
    fn implicit(&mut self, p: f64, theta: f64, current: &[f64], surface: f64, next: &mut [f64]) {
        let last = current.len() - 1;
        let (a, b) = (theta * p, (1.0 - theta) * p);

        self.sub[0] = 0.0;
        self.diag[0] = 1.0;
        self.sup[0] = 0.0;
        next[0] = surface;

        for i in 1..last {
            self.sub[i] = -a;
            self.diag[i] = 1.0 + 2.0 * a;
            self.sup[i] = -a;
            next[i] = b * current[i - 1] + (1.0 - 2.0 * b) * current[i] + b * current[i + 1];
        }

        self.sub[last] = -2.0 * a;
        self.diag[last] = 1.0 + 2.0 * a;
        self.sup[last] = 0.0;
        next[last] = 2.0 * b * current[last - 1] + (1.0 - 2.0 * b) * current[last];

        tridiagonal::solve(&self.sub, &mut self.diag, &self.sup, next);
    }
}
