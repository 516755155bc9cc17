pub mod calibration;
pub mod driver;
pub mod integrator;

pub use calibration::{run_suite, standard_suite, CalibrationScenario, ScenarioRun};
pub use driver::{
    InputSchedule, Phase, PhaseSchedule, ScheduledInput, SimulationDriver, SimulationTrace,
    TraceSample,
};
pub use integrator::{step, step_detailed, AngularVelocityIntegrator, StepOutcome, RELEASE_THRESHOLD};
