//! Orbit-kinematic stepper
//!
//! A kinematic body moves on an ideal circle around its parent. The phase
//! advances linearly in time and position/velocity are rebuilt from it, so
//! gravity only enters through the fixed angular speed. The force pass is
//! never consulted for these bodies.

use tracing::{debug, warn};

use super::states::{Body, BodyId, MotionMode, NVec2, OrbitParams, System};

/// Advance `orbit` by `dt` and return the new `(position, velocity)` around a
/// parent at `parent_x` moving with `parent_v`
///
/// - angle += dir * w * dt
/// - x = x_p + R (cos angle, sin angle)
/// - v = v_p + dir * w * R (-sin angle, cos angle)
///
/// With `R == 0` the body sits on the parent and inherits its velocity
pub fn advance_orbit(orbit: &mut OrbitParams, parent_x: NVec2, parent_v: NVec2, dt: f64) -> (NVec2, NVec2) {
    let dir = orbit.direction();
    orbit.angle = (orbit.angle + dir * orbit.angular_speed * dt).rem_euclid(std::f64::consts::TAU);

    let (sin, cos) = orbit.angle.sin_cos();
    let r = orbit.radius;

    let x = parent_x + r * NVec2::new(cos, sin);
    let tangential = dir * orbit.angular_speed * r;
    let v = parent_v + tangential * NVec2::new(-sin, cos);

    (x, v)
}

/// Derive circular orbit parameters from the body's current state relative to
/// its parent. The tangential component of the relative velocity gives both
/// the angular speed and the sense of rotation
pub fn establish_orbit(body: &Body, parent: &Body) -> OrbitParams {
    let rel_x = body.x - parent.x;
    let rel_v = body.v - parent.v;
    let radius = rel_x.norm();

    if radius == 0.0 {
        return OrbitParams {
            radius: 0.0,
            angle: 0.0,
            angular_speed: 0.0,
            clockwise: false,
        };
    }

    // z component of r x v, divided by |r|
    let v_t = (rel_x.x * rel_v.y - rel_x.y * rel_v.x) / radius;

    OrbitParams {
        radius,
        angle: rel_x.y.atan2(rel_x.x),
        angular_speed: v_t.abs() / radius,
        clockwise: v_t < 0.0,
    }
}

/// Advance one kinematic body from its parent's current state.
/// Returns false when the body is not kinematic or its parent is gone
pub fn step_kinematic(sys: &mut System, id: BodyId, dt: f64) -> bool {
    let Some((parent_x, parent_v)) = sys.parent_of(id).map(|p| (p.x, p.v)) else {
        return false;
    };
    let Some(body) = sys.get_mut(id) else {
        return false;
    };
    let MotionMode::Kinematic(orbit) = &mut body.mode else {
        return false;
    };

    let (x, v) = advance_orbit(orbit, parent_x, parent_v, dt);
    body.x = x;
    body.v = v;
    body.f = NVec2::zeros();
    true
}

/// Advance every kinematic body, parents first
pub fn step_kinematic_bodies(sys: &mut System, dt: f64) -> usize {
    let order = sys.kinematic_order();
    let mut stepped = 0;
    for id in order {
        if step_kinematic(sys, id, dt) {
            stepped += 1;
        }
    }
    stepped
}

impl System {
    /// Return kinematic bodies whose parent no longer resolves to free
    /// motion, so they are integrated instead of frozen. Returns how many
    pub fn release_orphaned_orbits(&mut self) -> usize {
        let orphans: Vec<BodyId> = (0..self.bodies.len())
            .map(BodyId)
            .filter(|id| self.bodies[id.0].is_kinematic() && self.parent_of(*id).is_none())
            .collect();

        for id in &orphans {
            let body = &mut self.bodies[id.0];
            warn!(body = %body.name, "kinematic body has no parent; switching to free motion");
            body.mode = MotionMode::Free;
        }
        orphans.len()
    }

    /// Switch every parented planet and satellite to kinematic mode, deriving
    /// the orbit from the current relative state. Planets go first so that
    /// satellites see consistent parents. Returns how many bodies switched
    pub fn establish_orbits(&mut self) -> usize {
        let mut ids: Vec<BodyId> = (0..self.bodies.len())
            .map(BodyId)
            .filter(|id| self.parent_of(*id).is_some())
            .collect();
        ids.sort_by_key(|id| self.bodies[id.0].kind.depth());

        let mut switched = 0;
        for id in ids {
            let Some(parent) = self.parent_of(id) else {
                continue;
            };
            let orbit = establish_orbit(&self.bodies[id.0], parent);
            if self.set_kinematic(id, orbit) {
                debug!(
                    body = %self.bodies[id.0].name,
                    radius = orbit.radius,
                    angular_speed = orbit.angular_speed,
                    clockwise = orbit.clockwise,
                    "orbit established"
                );
                switched += 1;
            }
        }
        switched
    }
}
