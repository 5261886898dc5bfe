//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`EngineConfig`]     – step size and count, motion policy, sampling cadence
//! - [`ParametersConfig`] – physical constants and collision/softening thresholds
//! - [`SystemConfig`]     – where the bodies come from (a system file or the generator)
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every field has a default, so a scenario only needs to name its bodies.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   dt: 100000.0            # simulated seconds per step
//!   steps: 5000
//!   energy_every: 10        # 0 disables energy sampling
//!   motion: "kinematic"     # or "free"
//!   satellite_scope: "parent"   # or "all"
//!
//! parameters:
//!   G: 6.67408e-11
//!   min_distance: 1.0e9     # softening threshold
//!   repulsion_factor: 10.0
//!   radius_scale: 1.0e9     # display radius -> metres
//!   collision_margin: 0.1
//!   seed: 42
//!
//! system:
//!   file: "solar_system.txt"    # relative to the scenario file
//!   # or
//!   # generate:
//!   #   seed: 7
//!   #   planet_counts: [10, 20, 10]
//! ```

use std::path::PathBuf;

use serde::Deserialize;

use crate::simulation::params::{Parameters, SatelliteScope, GRAVITATIONAL_CONSTANT};

/// Motion model applied to parented planets and satellites of a loaded system
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionConfig {
    #[serde(rename = "free")] // everything is integrated from forces
    #[default]
    Free,

    #[serde(rename = "kinematic")] // planets/satellites ride circular orbits around their parent
    Kinematic,
}

/// Satellite force scoping: `"parent"` or `"all"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeConfig {
    #[serde(rename = "parent")]
    #[default]
    Parent,

    #[serde(rename = "all")]
    All,
}

impl From<ScopeConfig> for SatelliteScope {
    fn from(scope: ScopeConfig) -> Self {
        match scope {
            ScopeConfig::Parent => SatelliteScope::ParentOnly,
            ScopeConfig::All => SatelliteScope::AllBodies,
        }
    }
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub dt: f64, // simulated time per step
    pub steps: u64, // steps for a headless run
    pub energy_every: u64, // energy sample cadence in steps, 0 = off
    pub motion: MotionConfig,
    pub satellite_scope: ScopeConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dt: 1.0e5,
            steps: 1000,
            energy_every: 10,
            motion: MotionConfig::Free,
            satellite_scope: ScopeConfig::Parent,
        }
    }
}

/// Global physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub G: f64, // gravitational constant
    pub min_distance: f64, // below this gravity turns into repulsion
    pub repulsion_factor: f64, // repulsion multiplier
    pub radius_scale: f64, // display radius units -> position units
    pub collision_margin: f64, // threshold inflation, avoids re-triggering on the boundary
    pub seed: u64, // deterministic seed to make runs reproducible
}

impl Default for ParametersConfig {
    fn default() -> Self {
        let p = Parameters::default();
        Self {
            G: GRAVITATIONAL_CONSTANT,
            min_distance: p.min_distance,
            repulsion_factor: p.repulsion_factor,
            radius_scale: p.radius_scale,
            collision_margin: p.collision_margin,
            seed: p.seed,
        }
    }
}

/// Settings for the procedural system generator
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GeneratorConfig {
    pub seed: u64,
    pub stars: Vec<[f64; 2]>, // star positions
    pub star_colors: Vec<String>,
    pub star_radius: f64,
    pub planet_counts: Vec<usize>, // planets per star, same order as `stars`
    pub planets_per_orbit: usize, // max planets sharing a ring
    pub base_orbit_radius: f64, // radius of the first ring, ring k sits at k times this
    pub base_speed: f64, // linear speed on the first ring, falls off as 1/sqrt(k)
    pub satellite_star: Option<usize>, // star whose odd-ring planets get a moon
    pub kinematic: bool, // generated planets/satellites start in kinematic mode
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            stars: vec![[-300.0e9, 0.0], [0.0, 0.0], [300.0e9, 0.0]],
            star_colors: vec!["yellow".into(), "red".into(), "blue".into()],
            star_radius: 15.0,
            planet_counts: vec![10, 20, 10],
            planets_per_orbit: 4,
            base_orbit_radius: 50.0e9,
            base_speed: 10.0e3,
            satellite_star: Some(1),
            kinematic: true,
        }
    }
}

/// Where the bodies come from. Exactly one of the two should be set; `file`
/// wins when both are
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SystemConfig {
    pub file: Option<PathBuf>, // system file, relative paths resolve against the scenario file
    pub generate: Option<GeneratorConfig>,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub engine: EngineConfig, // step and motion settings
    pub parameters: ParametersConfig, // physical parameters
    pub system: SystemConfig, // body source
}
