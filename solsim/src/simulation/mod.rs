pub mod states;
pub mod params;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod kinematic;
pub mod collisions;
pub mod energy;
pub mod generator;
pub mod scenario;
