use l4sim::{
    config::{AxisGains, PdGains},
    Axis, InputSample, PhaseSchedule, PhysicsParameters, PhysicsProfile, RollMode,
    SimulationConfig, SimulationDriver,
};

pub const DT: f64 = 1.0 / 60.0;

/// Pitch-axis calibration: 714 deg/s^2, Kp 36, Kd 4, damping 2.96, 5.5 rad/s
/// caps, DAR off.
pub fn create_pitch_calibration_params() -> PhysicsParameters {
    PhysicsParameters::builder()
        .profile(PhysicsProfile::Headless)
        .accel_limit(Axis::Pitch, 714.0)
        .gains(Axis::Pitch, PdGains::new(36.0, 4.0))
        .damping(2.96, 4.35)
        .axis_cap(Axis::Pitch, 5.5)
        .global_cap(5.5)
        .build()
        .expect("pitch calibration parameters are valid")
}

/// Parameters with every PD gain zeroed, leaving damping as the only
/// influence on a released stick.
pub fn create_undriven_params() -> PhysicsParameters {
    let mut params = PhysicsProfile::Reference.parameters();
    params.gains = AxisGains::uniform(PdGains::new(0.0, 0.0));
    params
}

pub fn full_pitch() -> InputSample {
    InputSample::new(0.0, 1.0, RollMode::None, false)
}

pub fn full_yaw() -> InputSample {
    InputSample::new(1.0, 0.0, RollMode::None, false)
}

pub fn full_free_roll() -> InputSample {
    InputSample::new(1.0, 0.0, RollMode::FreeRoll, false)
}

/// Hold `held` for `hold` seconds, then release for `release` seconds.
pub fn create_hold_release(held: InputSample, hold: f64, release: f64) -> PhaseSchedule {
    PhaseSchedule::hold_then_release(held, hold, release).expect("valid schedule")
}

pub fn create_driver(params: PhysicsParameters, duration: f64) -> SimulationDriver {
    let config = SimulationConfig::new(DT, duration).expect("valid simulation config");
    SimulationDriver::new(params, config).expect("valid driver")
}
