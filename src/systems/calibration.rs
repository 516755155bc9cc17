use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::components::{Axis, InputSample, RollMode};
use crate::config::{ConfigError, PhysicsParameters};
use crate::systems::driver::{PhaseSchedule, SimulationDriver, SimulationTrace};

/// Idle time before the input [s]
pub const STABILIZE_DURATION: f64 = 2.0;
/// Time the full input is held [s]
pub const INPUT_DURATION: f64 = 5.0;
/// Idle time after the input [s]
pub const RELEASE_DURATION: f64 = 3.0;

/// One full-deflection calibration run on a single axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationScenario {
    pub name: String,
    pub axis: Axis,
    /// Handbrake held for the whole run.
    pub dar_active: bool,
}

impl CalibrationScenario {
    pub fn new(axis: Axis, dar_active: bool) -> Self {
        let suffix = if dar_active { "dar" } else { "nodar" };
        Self {
            name: format!("{axis}_{suffix}"),
            axis,
            dar_active,
        }
    }

    /// The input held during the measurement window.
    ///
    /// Roll runs use free roll with the horizontal stick. DAR pitch and yaw
    /// runs hold air roll left, as the measurement bot did. DAR runs hold the
    /// handbrake, and DAR follows [`InputSample::from_controller`]: free roll
    /// never engages it, so `roll_dar` holds without DAR and releases with it.
    pub fn held_input(&self) -> InputSample {
        match self.axis {
            Axis::Pitch => {
                InputSample::from_controller(0.0, 1.0, self.dar_roll_mode(), self.dar_active)
            }
            Axis::Yaw => {
                InputSample::from_controller(1.0, 0.0, self.dar_roll_mode(), self.dar_active)
            }
            Axis::Roll => {
                InputSample::from_controller(1.0, 0.0, RollMode::FreeRoll, self.dar_active)
            }
        }
    }

    /// Neutral stick, handbrake still held on DAR runs.
    pub fn idle_input(&self) -> InputSample {
        InputSample::from_controller(0.0, 0.0, RollMode::None, self.dar_active)
    }

    fn dar_roll_mode(&self) -> RollMode {
        if self.dar_active {
            RollMode::RollLeft
        } else {
            RollMode::None
        }
    }

    pub fn schedule(&self) -> Result<PhaseSchedule, ConfigError> {
        PhaseSchedule::new(
            self.held_input(),
            STABILIZE_DURATION,
            INPUT_DURATION,
            RELEASE_DURATION,
        )
        .map(|schedule| schedule.with_idle(self.idle_input()))
    }

    pub fn run(
        &self,
        params: &PhysicsParameters,
        timestep: f64,
    ) -> Result<SimulationTrace, ConfigError> {
        let schedule = self.schedule()?;
        let driver = SimulationDriver::new(*params, schedule.simulation_config(timestep)?)?;
        Ok(driver.run(&schedule))
    }
}

/// Pitch, yaw and roll, each with and without DAR.
pub fn standard_suite() -> Vec<CalibrationScenario> {
    Axis::ALL
        .into_iter()
        .flat_map(|axis| [false, true].map(|dar| CalibrationScenario::new(axis, dar)))
        .collect()
}

#[derive(Debug, Clone)]
pub struct ScenarioRun {
    pub scenario: CalibrationScenario,
    pub trace: SimulationTrace,
}

/// Run every scenario in parallel.
pub fn run_suite(
    scenarios: &[CalibrationScenario],
    params: &PhysicsParameters,
    timestep: f64,
) -> Result<Vec<ScenarioRun>, ConfigError> {
    params.validate()?;
    info!("Running {} calibration scenarios", scenarios.len());

    scenarios
        .par_iter()
        .map(|scenario| -> Result<ScenarioRun, ConfigError> {
            let trace = scenario.run(params, timestep)?;
            info!(
                "{}: peak {:.3} rad/s over {} samples",
                scenario.name,
                trace.peak_magnitude(),
                trace.len()
            );
            Ok(ScenarioRun {
                scenario: scenario.clone(),
                trace,
            })
        })
        .collect()
}
