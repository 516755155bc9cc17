mod builder;
mod errors;
mod params;
mod profile;
mod simulation;

pub use builder::{
    AxisGainOverrides, AxisOverrides, DampingOverrides, GainOverrides, PhysicsParametersBuilder,
};
pub use errors::ConfigError;
pub use params::{AxisGains, AxisTriple, Damping, PdGains, PhysicsParameters};
pub use profile::PhysicsProfile;
pub use simulation::{SimulationConfig, MAX_TICKS};
