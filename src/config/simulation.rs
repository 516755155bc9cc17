use serde::{Deserialize, Serialize};

use crate::config::errors::{require_non_negative, require_positive, ConfigError};

/// Upper bound on ticks in one run, about 46 hours at 60 Hz.
pub const MAX_TICKS: usize = 10_000_000;

/// Fixed-rate stepping configuration for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Tick interval [s]
    pub timestep: f64,
    /// Total simulated time [s]
    pub duration: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 60.0, // 60 Hz
            duration: 10.0,
        }
    }
}

impl SimulationConfig {
    pub fn new(timestep: f64, duration: f64) -> Result<Self, ConfigError> {
        let config = Self { timestep, duration };
        config.validate()?;
        Ok(config)
    }

    /// Default tick rate over the given duration.
    pub fn with_duration(duration: f64) -> Result<Self, ConfigError> {
        Self::new(Self::default().timestep, duration)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("timestep", self.timestep)?;
        require_non_negative("duration", self.duration)?;

        let ticks = (self.duration / self.timestep).round();
        if ticks > MAX_TICKS as f64 {
            return Err(ConfigError::ValidationError(format!(
                "{ticks} ticks exceeds the limit of {MAX_TICKS} per run"
            )));
        }
        Ok(())
    }

    /// Number of ticks in a run.
    pub fn tick_count(&self) -> usize {
        (self.duration / self.timestep).round() as usize
    }
}
