pub mod error;
pub mod simulation;
pub mod configuration;
pub mod persistence;
pub mod benchmark;

pub use error::{SimError, SimResult};

pub use simulation::states::{Body, BodyId, BodyKind, MotionMode, NVec2, OrbitParams, System};
pub use simulation::params::{Parameters, SatelliteScope, GRAVITATIONAL_CONSTANT};
pub use simulation::forces::{Force, ForceSet, NewtonianGravity};
pub use simulation::integrator::{euler_step, integrate_free_bodies};
pub use simulation::kinematic::{advance_orbit, establish_orbit};
pub use simulation::collisions::{collision_threshold, resolve_collisions, CollisionEvent};
pub use simulation::energy::{audit, EnergySample};
pub use simulation::engine::{Engine, StepReport};
pub use simulation::generator::generate_system;
pub use simulation::scenario::{load_scenario_config, RunSettings, Scenario};

pub use configuration::config::{EngineConfig, GeneratorConfig, MotionConfig, ParametersConfig, ScenarioConfig, SystemConfig};

pub use persistence::system_file::{load_system, read_system, save_system, write_system, LoadReport};
pub use persistence::diagnostics::{save_stats_csv, write_stats_csv};

pub use benchmark::benchmark::{bench_gravity, bench_step_curve};
