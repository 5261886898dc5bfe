//! Step orchestration
//!
//! `Engine` owns the `System` and advances it one step at a time on the
//! host's schedule:
//! 1. force pass + integration for free bodies (orphaned orbits count as free)
//! 2. analytic orbit update for kinematic bodies (parents first)
//! 3. collision pass over every pair
//! 4. energy sample every `energy_every` steps
//! 5. physical time advance
//!
//! The engine never adds or removes bodies.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::error::SimError;
use crate::simulation::collisions::{resolve_collisions, CollisionEvent};
use crate::simulation::energy::{audit, EnergySample};
use crate::simulation::forces::{ForceSet, NewtonianGravity};
use crate::simulation::integrator::integrate_free_bodies;
use crate::simulation::kinematic::step_kinematic_bodies;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2, System};

/// What happened during one step
#[derive(Debug, Default)]
pub struct StepReport {
    pub collisions: Vec<CollisionEvent>,
    pub degenerate: Vec<SimError>, // bodies held fixed this step
    pub sampled: Option<EnergySample>,
}

pub struct Engine {
    system: System,
    parameters: Parameters,
    forces: ForceSet,
    rng: StdRng,
    diagnostics: Vec<EnergySample>,
    steps: u64,
    force_buf: Vec<NVec2>,
}

impl Engine {
    /// Build an engine with direct Newtonian gravity as the only force term
    pub fn new(system: System, parameters: Parameters) -> Self {
        let forces = ForceSet::new().with(NewtonianGravity::from_params(&parameters));
        Self::with_forces(system, parameters, forces)
    }

    pub fn with_forces(system: System, parameters: Parameters, forces: ForceSet) -> Self {
        let rng = StdRng::seed_from_u64(parameters.seed);
        let n = system.len();
        info!(
            bodies = n,
            kinematic = system.bodies.iter().filter(|b| b.is_kinematic()).count(),
            "engine ready"
        );
        Self {
            system,
            parameters,
            forces,
            rng,
            diagnostics: Vec::new(),
            steps: 0,
            force_buf: vec![NVec2::zeros(); n],
        }
    }

    /// Advance the whole system by `dt`
    pub fn step(&mut self, dt: f64) -> StepReport {
        let mut report = StepReport::default();

        // orbits without a parent fall back to free motion before the force pass
        self.system.release_orphaned_orbits();

        // 1. forces from the pre-step state, then integrate free bodies
        self.forces.accumulate_forces(&self.system, &mut self.force_buf, &mut self.rng);
        for (body, f) in self.system.bodies.iter_mut().zip(self.force_buf.iter()) {
            body.f = *f;
        }
        report.degenerate = integrate_free_bodies(&mut self.system, dt);

        // 2. kinematic bodies follow their (already moved) parents
        step_kinematic_bodies(&mut self.system, dt);

        // 3. collisions, whatever produced the positions
        report.collisions = resolve_collisions(&mut self.system, &self.parameters, &mut self.rng);

        // 4. diagnostics
        let every = self.parameters.energy_every;
        if every > 0 && self.steps % every == 0 {
            let sample = audit(&self.system, self.parameters.G);
            self.diagnostics.push(sample);
            report.sampled = Some(sample);
        }

        // 5. time
        self.system.t += dt;
        self.steps += 1;

        debug!(
            step = self.steps,
            t = self.system.t,
            collisions = report.collisions.len(),
            degenerate = report.degenerate.len(),
            "step done"
        );
        report
    }

    /// Run `steps` steps of size `dt`, returning the total number of resolved collisions
    pub fn run(&mut self, dt: f64, steps: u64) -> usize {
        let mut collisions = 0;
        for _ in 0..steps {
            collisions += self.step(dt).collisions.len();
        }
        collisions
    }

    pub fn bodies(&self) -> &[Body] {
        &self.system.bodies
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn into_system(self) -> System {
        self.system
    }

    pub fn time(&self) -> f64 {
        self.system.t
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn diagnostics(&self) -> &[EnergySample] {
        &self.diagnostics
    }

    /// Hand the collected series to the caller and start a fresh one
    pub fn take_diagnostics(&mut self) -> Vec<EnergySample> {
        std::mem::take(&mut self.diagnostics)
    }
}
