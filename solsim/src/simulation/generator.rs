//! Procedural multi-star systems
//!
//! Builds stars at fixed positions, planets on rings of up to
//! `planets_per_orbit` bodies around each star, and one satellite per planet
//! on the odd rings of a chosen star. Everything random comes from a seeded
//! `StdRng`, so a seed always produces the same system.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::configuration::config::GeneratorConfig;
use crate::error::SimResult;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, BodyKind, NVec2, OrbitParams, System};

pub const SOLAR_MASS: f64 = 1.98892e30;

fn random_color(rng: &mut StdRng) -> String {
    let (r, g, b): (u8, u8, u8) = (rng.gen_range(50..=255), rng.gen_range(50..=255), rng.gen_range(50..=255));
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Generate a hierarchical system from `cfg`
/// `params` supplies `G` (satellite speeds) and `radius_scale` (satellite
/// clearance from their planet)
pub fn generate_system(cfg: &GeneratorConfig, params: &Parameters) -> SimResult<System> {
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let mut sys = System::new();
    let per_orbit = cfg.planets_per_orbit.max(1);

    for (i, pos) in cfg.stars.iter().enumerate() {
        let color = cfg.star_colors.get(i).map(String::as_str).unwrap_or("yellow");
        let star_x = NVec2::new(pos[0], pos[1]);
        let star = Body::new(
            format!("Star{i}"),
            BodyKind::Star,
            SOLAR_MASS * rng.gen_range(0.9..1.1),
            cfg.star_radius,
            star_x,
            NVec2::zeros(),
        )
        .with_color(color);
        let star_id = sys.push(star)?;

        let count = cfg.planet_counts.get(i).copied().unwrap_or(0);
        let rings = count.div_ceil(per_orbit);
        let inclinations: Vec<f64> = (0..rings).map(|_| rng.gen_range(-0.2..0.2)).collect();

        let mut planet_no = 0;
        for ring in 1..=rings {
            let in_ring = per_orbit.min(count - (ring - 1) * per_orbit);
            let base = cfg.base_orbit_radius * ring as f64;
            let speed = cfg.base_speed / (ring as f64).sqrt();
            let clockwise = ring % 2 == 0;
            let dir = if clockwise { -1.0 } else { 1.0 };

            for k in 0..in_ring {
                planet_no += 1;

                // slightly different radii and tilts on the same ring
                let nominal = base * (1.0 + 0.05 * k as f64);
                let tilt = inclinations[ring - 1] + rng.gen_range(-0.05..0.05);
                let angle = TAU * k as f64 / in_ring as f64 + rng.gen_range(-0.1..0.1);

                // tilted ring projected onto the plane
                let radius = nominal * tilt.cos();
                let angular_speed = speed / nominal;
                let (sin, cos) = angle.sin_cos();
                let x = star_x + radius * NVec2::new(cos, sin);
                let v = dir * angular_speed * radius * NVec2::new(-sin, cos);

                let m = rng.gen_range(1.0e24..1.0e26);
                let display_radius = f64::from(rng.gen_range(3u8..=8));
                let planet = Body::new(format!("Planet{planet_no}_{i}"), BodyKind::Planet, m, display_radius, x, v)
                    .with_color(random_color(&mut rng));
                let planet_id = sys.push(planet)?;
                sys.set_parent(planet_id, star_id)?;
                if cfg.kinematic {
                    sys.set_kinematic(
                        planet_id,
                        OrbitParams { radius, angle, angular_speed, clockwise },
                    );
                }

                if cfg.satellite_star != Some(i) || ring % 2 == 0 {
                    continue;
                }

                // keep the satellite clear of its planet's collision threshold
                let sat_r = display_radius * params.radius_scale * rng.gen_range(1.8..2.4);
                let sat_angle = rng.gen_range(0.0..TAU);
                let (s_sin, s_cos) = sat_angle.sin_cos();
                let sat_speed = (params.G * m / sat_r).sqrt();
                let satellite = Body::new(
                    format!("Satellite1_{planet_no}_{i}"),
                    BodyKind::Satellite,
                    m * 0.001,
                    display_radius * 0.3,
                    x + sat_r * NVec2::new(s_cos, s_sin),
                    v + sat_speed * NVec2::new(-s_sin, s_cos),
                );
                let sat_id = sys.push(satellite)?;
                sys.set_parent(sat_id, planet_id)?;
                if cfg.kinematic {
                    sys.set_kinematic(
                        sat_id,
                        OrbitParams {
                            radius: sat_r,
                            angle: sat_angle,
                            angular_speed: sat_speed / sat_r,
                            clockwise: false,
                        },
                    );
                }
            }
        }
    }

    info!(
        seed = cfg.seed,
        bodies = sys.len(),
        kinematic = sys.bodies.iter().filter(|b| b.is_kinematic()).count(),
        "system generated"
    );
    Ok(sys)
}
