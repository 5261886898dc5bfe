//! Energy diagnostics
//!
//! Read-only audit of the body set: kinetic, pairwise potential and total
//! energy. Samples are collected by the engine at a configurable cadence.

use super::states::System;

/// One energy sample of the full system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergySample {
    pub time: f64,
    pub kinetic: f64,
    pub potential: f64,
    pub total: f64,
}

/// Sum of 1/2 m |v|^2 over all bodies
pub fn kinetic_energy(sys: &System) -> f64 {
    sys.bodies.iter().map(|b| b.kinetic_energy()).sum()
}

/// Sum of -G m_i m_j / r over unordered pairs.
/// Pairs at exactly zero separation contribute nothing
#[allow(non_snake_case)]
pub fn potential_energy(sys: &System, G: f64) -> f64 {
    let n = sys.bodies.len();
    let mut pe = 0.0;
    for i in 0..n {
        let bi = &sys.bodies[i];
        for bj in &sys.bodies[(i + 1)..n] {
            let r = bi.distance_to(bj);
            if r == 0.0 {
                continue;
            }
            pe -= G * bi.m * bj.m / r;
        }
    }
    pe
}

/// Full audit stamped with the system's current physical time
#[allow(non_snake_case)]
pub fn audit(sys: &System, G: f64) -> EnergySample {
    let kinetic = kinetic_energy(sys);
    let potential = potential_energy(sys, G);
    EnergySample {
        time: sys.t,
        kinetic,
        potential,
        total: kinetic + potential,
    }
}
