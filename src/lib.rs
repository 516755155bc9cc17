//! Angular-velocity response model used to calibrate the L4 air-control
//! simulator against measured game telemetry.
//!
//! The core is [`systems::step`], a pure single-tick update of a 3-axis
//! rate vector. [`systems::SimulationDriver`] runs it at a fixed rate over an
//! input schedule; [`telemetry`] and [`analysis`] move traces in and out and
//! score them against reference data.

pub mod analysis;
pub mod components;
pub mod config;
pub mod systems;
pub mod telemetry;

pub use components::{AngularVelocityState, Axis, InputSample, RollMode};
pub use config::{ConfigError, PhysicsParameters, PhysicsProfile, SimulationConfig};
pub use systems::{step, step_detailed, Phase, PhaseSchedule, SimulationDriver, SimulationTrace};
