//! Collision detection and positional resolution
//!
//! Two bodies collide when their centres are closer than the scaled sum of
//! their display radii, inflated by a small margin. Resolution pushes them
//! apart along the line of centres until they sit exactly on the threshold.
//! Velocities are not touched and no body is ever removed.
//!
//! - equal split between the two bodies by default
//! - a star never moves; the other body takes the whole correction
//! - coincident centres get a random separation direction

use std::cmp::Ordering;

use rand::RngCore;
use tracing::debug;

use super::forces::random_direction;
use super::params::Parameters;
use super::states::{Body, BodyId, BodyKind, NVec2, System};

/// Separations below this are treated as coincident centres
pub const COINCIDENT_DISTANCE: f64 = 1.0e-9;

/// A resolved overlap between two bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub a: BodyId,
    pub b: BodyId,
    pub overlap: f64, // threshold - distance before the correction
}

/// Contact distance for a pair, in position units
pub fn collision_threshold(a: &Body, b: &Body, params: &Parameters) -> f64 {
    (a.radius + b.radius) * params.radius_scale * (1.0 + params.collision_margin)
}

/// Resolve every overlapping unordered pair in one pass over `sys`
/// Pairs are visited in index order and later pairs see earlier corrections
pub fn resolve_collisions(sys: &mut System, params: &Parameters, rng: &mut dyn RngCore) -> Vec<CollisionEvent> {
    let n = sys.bodies.len();
    let mut events = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            if let Some(event) = resolve_pair(sys, i, j, params, rng) {
                events.push(event);
            }
        }
    }

    if !events.is_empty() {
        debug!(count = events.len(), "collisions resolved");
    }
    events
}

/// Check a single pair and push it apart if it overlaps
pub fn resolve_pair(
    sys: &mut System,
    i: usize,
    j: usize,
    params: &Parameters,
    rng: &mut dyn RngCore,
) -> Option<CollisionEvent> {
    let (a, b) = (&sys.bodies[i], &sys.bodies[j]);
    let threshold = collision_threshold(a, b, params);

    // d points from b towards a
    let d = a.x - b.x;
    let distance = d.norm();
    // only a strictly smaller separation is contact, NaN included
    if distance.partial_cmp(&threshold) != Some(Ordering::Less) {
        return None;
    }

    let dir = if distance < COINCIDENT_DISTANCE {
        random_direction(rng)
    } else {
        d / distance
    };
    let overlap = threshold - distance;

    // share of the correction each body takes
    let (share_a, share_b) = match (a.kind == BodyKind::Star, b.kind == BodyKind::Star) {
        (false, false) => (0.5, 0.5),
        (true, false) => (0.0, 1.0),
        (false, true) => (1.0, 0.0),
        (true, true) => (0.0, 0.0),
    };

    let correction: NVec2 = overlap * dir;
    sys.bodies[i].x += share_a * correction;
    sys.bodies[j].x -= share_b * correction;

    Some(CollisionEvent {
        a: BodyId(i),
        b: BodyId(j),
        overlap,
    })
}
