//! Fixed-step integrator for free bodies
//!
//! Semi-implicit Euler with a half-step acceleration term in the position
//! update. Position is advanced with the velocity from the start of the step,
//! velocity afterwards, both from the same acceleration `a = F/m`

use tracing::warn;

use super::states::{Body, System};
use crate::error::{SimError, SimResult};

/// Advance a single body by `dt` using its accumulated force `body.f`
/// - x_n+1 = x_n + dt v_n + 1/2 dt^2 a_n
/// - v_n+1 = v_n + dt a_n
///
/// Bodies with non-positive mass are left untouched and reported
pub fn euler_step(body: &mut Body, dt: f64) -> SimResult<()> {
    if !body.has_valid_mass() {
        return Err(SimError::DegenerateMass {
            name: body.name.clone(),
            mass: body.m,
        });
    }

    let a = body.f / body.m; // a_n

    // Drift with the old velocity plus the half-step acceleration term
    body.x += dt * body.v + 0.5 * dt * dt * a;

    // Kick: v_n+1 = v_n + dt a_n
    body.v += dt * a;

    Ok(())
}

/// Integrate every free body of `sys` by `dt`
/// Kinematic bodies are skipped. Degenerate bodies stay where they are for
/// this step and their errors are returned to the caller
pub fn integrate_free_bodies(sys: &mut System, dt: f64) -> Vec<SimError> {
    let mut degenerate = Vec::new();
    for body in sys.bodies.iter_mut().filter(|b| !b.is_kinematic()) {
        if let Err(err) = euler_step(body, dt) {
            warn!("{err}; holding body fixed for this step");
            degenerate.push(err);
        }
    }
    degenerate
}
