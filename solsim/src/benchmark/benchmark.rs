use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::SimResult;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{ForceSet, NewtonianGravity};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, BodyKind, NVec2, System};

/// Helper to build a manual System of size `n`
/// Body 0 is a heavy star, the rest are planets spread on a deterministic
/// spiral far outside the softening and collision thresholds
fn make_system(n: usize) -> SimResult<System> {
    let mut sys = System::new();
    for i in 0..n {
        let i_f = i as f64;
        let (kind, name, m) = if i == 0 {
            (BodyKind::Star, String::from("Star0"), 2.0e30)
        } else {
            (BodyKind::Planet, format!("Planet{i}"), 6.0e24)
        };
        // deterministic positions, no rand needed
        let r = 5.0e10 * (1.0 + i_f);
        let x = NVec2::new((i_f * 0.37).cos() * r, (i_f * 0.37).sin() * r);
        sys.push(Body::new(name, kind, m, 1.0, x, NVec2::zeros()))?;
    }
    Ok(sys)
}

/// Time one direct force pass for growing `n`
pub fn bench_gravity() -> SimResult<()> {
    let ns = [50, 100, 200, 400, 800, 1600];
    let params = Parameters::default();
    let forces = ForceSet::new().with(NewtonianGravity::from_params(&params));
    let mut rng = StdRng::seed_from_u64(params.seed);

    for n in ns {
        let sys = make_system(n)?;
        let mut out = vec![NVec2::zeros(); n];

        // Warm up
        forces.accumulate_forces(&sys, &mut out, &mut rng);

        let t0 = Instant::now();
        forces.accumulate_forces(&sys, &mut out, &mut rng);
        let dt_direct = t0.elapsed().as_secs_f64();

        println!("N = {n:5}, force pass = {:8.6} s", dt_direct);
    }
    Ok(())
}

/// Time full engine steps (forces, integration, collisions, energy)
/// Paste output directly into a spreadsheet to graph
pub fn bench_step_curve() -> SimResult<()> {
    println!("N,step_ms");

    for n in (50..=1600).step_by(50) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 400 { 5 } else { 1 };

        let params = Parameters {
            energy_every: 1,
            ..Parameters::default()
        };
        let mut engine = Engine::new(make_system(n)?, params);

        let t0 = Instant::now();
        engine.run(1.0e4, steps);
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bench_system_builds_with_unique_names() {
        let sys = make_system(64).unwrap();
        assert_eq!(sys.len(), 64);
        assert_eq!(sys.bodies[0].kind, BodyKind::Star);
        assert!(sys.find("Planet63").is_some());
    }
}
