//! Force contributors for the simulation engine
//!
//! Defines the `Force` trait, a `ForceSet` that sums every registered term
//! per body, and direct Newtonian gravity with close-range repulsion and
//! optional satellite scoping

use std::f64::consts::TAU;

use rand::{Rng, RngCore};

use crate::simulation::params::{Parameters, SatelliteScope};
use crate::simulation::states::{BodyKind, NVec2, System};

/// Collection of force terms (gravity, drag, etc.)
/// Each term implements [`Force`] and their contributions are summed
/// into a single force vector per body
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Net force on body `target` from every registered term
    pub fn force_on(&self, sys: &System, target: usize, rng: &mut dyn RngCore) -> NVec2 {
        let mut total = NVec2::zeros();
        for term in &self.terms {
            total += term.force_on(sys, target, rng);
        }
        total
    }

    /// Compute forces for all free bodies in `sys`
    /// - `out[i]` is reset and set to the sum of contributions from all terms
    /// - kinematic bodies are left at zero, they never read their force
    pub fn accumulate_forces(&self, sys: &System, out: &mut [NVec2], rng: &mut dyn RngCore) {
        // Zero buffer
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        for (i, body) in sys.bodies.iter().enumerate() {
            if body.is_kinematic() {
                continue;
            }
            out[i] = self.force_on(sys, i, rng);
        }
    }
}

/// Trait for force sources operating on a [`System`]
/// Implementations return their contribution to the force on `target`
pub trait Force {
    fn force_on(&self, sys: &System, target: usize, rng: &mut dyn RngCore) -> NVec2;
}

/// Uniformly random unit vector, used when two centres coincide exactly
pub fn random_direction(rng: &mut dyn RngCore) -> NVec2 {
    let angle: f64 = rng.gen_range(0.0..TAU);
    NVec2::new(angle.cos(), angle.sin())
}

/// Direct Newtonian gravity, `F = G m1 m2 / r^2`
/// Below `min_distance` the attraction is swapped for a repulsion evaluated at
/// `min_distance` and scaled by `repulsion_factor`. The jump at the threshold
/// is part of the model
#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub min_distance: f64, // softening threshold
    pub repulsion_factor: f64,
    pub satellite_scope: SatelliteScope,
}

impl NewtonianGravity {
    pub fn from_params(p: &Parameters) -> Self {
        Self {
            G: p.G,
            min_distance: p.min_distance,
            repulsion_factor: p.repulsion_factor,
            satellite_scope: p.satellite_scope,
        }
    }
}

impl Force for NewtonianGravity {
    fn force_on(&self, sys: &System, target: usize, rng: &mut dyn RngCore) -> NVec2 {
        let Some(body) = sys.bodies.get(target) else {
            return NVec2::zeros();
        };

        // A parented satellite only listens to its planet unless the scope
        // is widened. Without a parent it falls back to the full sum
        let only = match (body.kind, self.satellite_scope) {
            (BodyKind::Satellite, SatelliteScope::ParentOnly) => body.parent.map(|p| p.0),
            _ => None,
        };

        let mut total = NVec2::zeros();
        for (j, other) in sys.bodies.iter().enumerate() {
            if j == target {
                continue;
            }
            if only.is_some_and(|p| p != j) {
                continue;
            }
            // massless or broken sources pull on nothing
            if !other.has_valid_mass() {
                continue;
            }

            // d points from the target towards the source
            let d = other.x - body.x;
            let r = d.norm();
            let mm = self.G * body.m * other.m;

            if r < self.min_distance {
                // Repulsion at the threshold distance, pushing the target
                // away from the source (-d direction)
                let repulsion = mm / (self.min_distance * self.min_distance) * self.repulsion_factor;
                let dir = if r > 0.0 { d / r } else { random_direction(rng) };
                total -= repulsion * dir;
            } else {
                // Plain attraction along +d
                total += mm / (r * r) * (d / r);
            }
        }
        total
    }
}
