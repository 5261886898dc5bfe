//! Numerical and physical parameters for the simulation
//!
//! `Parameters` is injected into the engine at construction and holds:
//! - gravitational constant `G` and the close-range softening settings,
//! - collision threshold scaling,
//! - satellite force scoping,
//! - energy sampling cadence and the deterministic seed

/// Reference gravitational constant (SI)
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67408e-11;

/// Which bodies a satellite feels gravity from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SatelliteScope {
    #[default]
    ParentOnly, // only its parent planet
    AllBodies, // full N-body, like every other kind
}

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub min_distance: f64, // softening threshold
    pub repulsion_factor: f64, // multiplier on the repulsive force below min_distance
    pub radius_scale: f64, // display radius -> position units
    pub collision_margin: f64, // fractional inflation of the collision threshold
    pub satellite_scope: SatelliteScope,
    pub energy_every: u64, // sample energy every N steps, 0 = never
    pub seed: u64, // rng seed for degenerate separations
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G: GRAVITATIONAL_CONSTANT,
            min_distance: 1.0e9,
            repulsion_factor: 10.0,
            radius_scale: 1.0e9,
            collision_margin: 0.1,
            satellite_scope: SatelliteScope::ParentOnly,
            energy_every: 10,
            seed: 42,
        }
    }
}
