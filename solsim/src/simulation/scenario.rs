//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime `Scenario`
//! containing:
//! - run settings (`dt`, step count)
//! - an `Engine` holding the parameters and the system state at t = 0
//! - the warnings collected while loading the bodies
//!
//! The host then drives `scenario.engine.step(dt)` on its own schedule

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::configuration::config::{MotionConfig, ParametersConfig, ScenarioConfig};
use crate::error::SimError;
use crate::persistence::system_file::load_system;
use crate::simulation::engine::Engine;
use crate::simulation::generator::generate_system;
use crate::simulation::params::Parameters;

/// Step size and length of a headless run
#[derive(Debug, Clone, Copy)]
pub struct RunSettings {
    pub dt: f64,
    pub steps: u64,
}

pub struct Scenario {
    pub settings: RunSettings,
    pub engine: Engine,
    pub warnings: Vec<SimError>, // load-time problems, already logged
}

impl Scenario {
    /// Map a scenario config to runtime types. Relative system file paths are
    /// resolved against `base_dir`
    pub fn build_scenario(cfg: ScenarioConfig, base_dir: &Path) -> Result<Self> {
        // Parameters (runtime) from ParametersConfig + EngineConfig
        let p_cfg: ParametersConfig = cfg.parameters;
        let e_cfg = cfg.engine;
        let parameters = Parameters {
            G: p_cfg.G,
            min_distance: p_cfg.min_distance,
            repulsion_factor: p_cfg.repulsion_factor,
            radius_scale: p_cfg.radius_scale,
            collision_margin: p_cfg.collision_margin,
            satellite_scope: e_cfg.satellite_scope.into(),
            energy_every: e_cfg.energy_every,
            seed: p_cfg.seed,
        };
        let kinematic = e_cfg.motion == MotionConfig::Kinematic;

        // Bodies: system file or generator
        let (system, warnings) = match (cfg.system.file, cfg.system.generate) {
            (Some(file), _) => {
                let path = base_dir.join(file);
                let mut report = load_system(&path).with_context(|| format!("failed to load {}", path.display()))?;
                if kinematic {
                    let switched = report.system.establish_orbits();
                    info!(switched, "kinematic orbits established");
                }
                (report.system, report.warnings)
            }
            (None, Some(mut gen_cfg)) => {
                gen_cfg.kinematic = kinematic;
                (generate_system(&gen_cfg, &parameters)?, Vec::new())
            }
            (None, None) => bail!("scenario has neither `system.file` nor `system.generate`"),
        };

        let settings = RunSettings {
            dt: e_cfg.dt,
            steps: e_cfg.steps,
        };

        Ok(Self {
            settings,
            engine: Engine::new(system, parameters),
            warnings,
        })
    }
}

/// Read a `ScenarioConfig` from a YAML file
pub fn load_scenario_config(path: &Path) -> Result<ScenarioConfig> {
    let file = File::open(path).with_context(|| format!("cannot open scenario {}", path.display()))?;
    let reader = BufReader::new(file);
    let cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;
    Ok(cfg)
}
