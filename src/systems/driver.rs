use std::fmt;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::components::{AngularVelocityState, InputSample};
use crate::config::{ConfigError, PhysicsParameters, SimulationConfig};
use crate::systems::integrator::AngularVelocityIntegrator;

/// Segment of an input schedule a tick belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Stabilize,
    Input,
    Release,
    /// Any label this crate does not produce itself.
    #[serde(other)]
    Other,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Stabilize => write!(f, "STABILIZE"),
            Phase::Input => write!(f, "INPUT"),
            Phase::Release => write!(f, "RELEASE"),
            Phase::Other => write!(f, "OTHER"),
        }
    }
}

/// Input for one tick together with its phase label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledInput {
    pub input: InputSample,
    pub phase: Phase,
}

impl ScheduledInput {
    pub fn new(input: InputSample, phase: Phase) -> Self {
        Self { input, phase }
    }
}

/// Maps elapsed simulation time to the input held during that tick.
pub trait InputSchedule {
    fn sample(&self, elapsed: f64) -> ScheduledInput;
}

impl<F> InputSchedule for F
where
    F: Fn(f64) -> ScheduledInput,
{
    fn sample(&self, elapsed: f64) -> ScheduledInput {
        self(elapsed)
    }
}

/// Stabilize, hold an input, then release.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseSchedule {
    /// Time spent idle before the input [s]
    pub stabilize: f64,
    /// Time the input is held [s]
    pub hold: f64,
    /// Time spent idle after the input [s]
    pub release: f64,
    pub held: InputSample,
    /// Input outside the hold window.
    pub idle: InputSample,
}

impl PhaseSchedule {
    /// The idle input is neutral but keeps the DAR flag of `held`, as the
    /// handbrake stays down through a DAR run.
    pub fn new(
        held: InputSample,
        stabilize: f64,
        hold: f64,
        release: f64,
    ) -> Result<Self, ConfigError> {
        for (name, value) in [("stabilize", stabilize), ("hold", hold), ("release", release)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "{name} duration must be finite and non-negative, got {value}"
                )));
            }
        }

        Ok(Self {
            stabilize,
            hold,
            release,
            held,
            idle: InputSample::neutral().with_dar(held.dar_active),
        })
    }

    pub fn hold_then_release(held: InputSample, hold: f64, release: f64) -> Result<Self, ConfigError> {
        Self::new(held, 0.0, hold, release)
    }

    pub fn with_idle(mut self, idle: InputSample) -> Self {
        self.idle = idle;
        self
    }

    pub fn duration(&self) -> f64 {
        self.stabilize + self.hold + self.release
    }

    /// Simulation covering the whole schedule at the given tick interval.
    pub fn simulation_config(&self, timestep: f64) -> Result<SimulationConfig, ConfigError> {
        SimulationConfig::new(timestep, self.duration())
    }

    pub fn phase_at(&self, elapsed: f64) -> Phase {
        if elapsed < self.stabilize {
            Phase::Stabilize
        } else if elapsed < self.stabilize + self.hold {
            Phase::Input
        } else {
            Phase::Release
        }
    }
}

impl InputSchedule for PhaseSchedule {
    fn sample(&self, elapsed: f64) -> ScheduledInput {
        let phase = self.phase_at(elapsed);
        let input = match phase {
            Phase::Input => self.held,
            _ => self.idle,
        };
        ScheduledInput::new(input, phase)
    }
}

/// State recorded after one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceSample {
    pub frame: usize,
    /// Elapsed time at the start of the tick [s]
    pub time: f64,
    pub phase: Phase,
    pub input: InputSample,
    pub state: AngularVelocityState,
    /// Clamped acceleration applied during the tick [rad/s^2]
    pub acceleration: Vector3<f64>,
}

/// Time series produced by a simulation run, ordered by time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationTrace {
    pub timestep: f64,
    samples: Vec<TraceSample>,
}

impl SimulationTrace {
    pub fn samples(&self) -> &[TraceSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraceSample> {
        self.samples.iter()
    }

    pub fn in_phase(&self, phase: Phase) -> impl Iterator<Item = &TraceSample> {
        self.samples.iter().filter(move |s| s.phase == phase)
    }

    pub fn final_state(&self) -> Option<AngularVelocityState> {
        self.samples.last().map(|s| s.state)
    }

    /// Largest rate magnitude over the whole run [rad/s]
    pub fn peak_magnitude(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.state.magnitude())
            .fold(0.0, f64::max)
    }
}

/// Steps the integrator at a fixed rate over an input schedule.
#[derive(Debug, Clone)]
pub struct SimulationDriver {
    integrator: AngularVelocityIntegrator,
    config: SimulationConfig,
}

impl SimulationDriver {
    pub fn new(params: PhysicsParameters, config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            integrator: AngularVelocityIntegrator::new(params)?,
            config,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn params(&self) -> &PhysicsParameters {
        self.integrator.params()
    }

    /// Run from rest.
    pub fn run(&self, schedule: &impl InputSchedule) -> SimulationTrace {
        self.run_from(AngularVelocityState::zero(), schedule)
    }

    pub fn run_from(
        &self,
        initial: AngularVelocityState,
        schedule: &impl InputSchedule,
    ) -> SimulationTrace {
        let dt = self.config.timestep;
        let ticks = self.config.tick_count();
        debug!("Running {} ticks at dt={:.5}s from {:?}", ticks, dt, initial);

        let mut state = initial;
        let mut samples = Vec::with_capacity(ticks);

        for frame in 0..ticks {
            let time = frame as f64 * dt;
            let scheduled = schedule.sample(time);
            let outcome = self.integrator.advance(&mut state, &scheduled.input, dt);

            samples.push(TraceSample {
                frame,
                time,
                phase: scheduled.phase,
                input: scheduled.input,
                state,
                acceleration: outcome.acceleration,
            });
        }

        let trace = SimulationTrace {
            timestep: dt,
            samples,
        };
        info!(
            "Simulation finished: {} samples, peak {:.3} rad/s",
            trace.len(),
            trace.peak_magnitude()
        );
        trace
    }
}
