use nalgebra::Vector3;
use tracing::{debug, trace};

use crate::components::{AngularVelocityState, Axis, InputSample, RollMode};
use crate::config::{ConfigError, PhysicsParameters};

/// Stick effectiveness below which the stick counts as released.
pub const RELEASE_THRESHOLD: f64 = 0.02;

/// Result of a single integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub state: AngularVelocityState,
    /// Clamped angular acceleration applied this step [rad/s^2]
    pub acceleration: Vector3<f64>,
    /// Stick effectiveness in [0, 1]
    pub effectiveness: f64,
    /// Whether release damping was applied.
    pub damped: bool,
}

/// Stick deflection after clamping and the response curve.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ShapedStick {
    horizontal: f64,
    vertical: f64,
    effectiveness: f64,
}

/// Advance the angular velocity by one tick.
///
/// # Arguments
/// - `state`: Angular velocity at the start of the tick.
/// - `input`: Control input held for this tick.
/// - `params`: Validated calibration constants.
/// - `dt`: Tick duration (in seconds).
pub fn step(
    state: &AngularVelocityState,
    input: &InputSample,
    params: &PhysicsParameters,
    dt: f64,
) -> AngularVelocityState {
    step_detailed(state, input, params, dt).state
}

/// Same as [`step`], also reporting the intermediate quantities.
///
/// The stage order matters: acceleration is clamped before integration,
/// damping runs only on release, and the per-axis caps precede the global
/// magnitude cap.
pub fn step_detailed(
    state: &AngularVelocityState,
    input: &InputSample,
    params: &PhysicsParameters,
    dt: f64,
) -> StepOutcome {
    let stick = shape_input(input, params.input_exponent);
    let limits = params.accel_limits_rad(input.dar_active);
    let desired = desired_rates(&stick, input, params);

    let acceleration = pd_acceleration(&state.rate, &desired, params)
        .zip_map(&limits, limit_magnitude);

    let mut rate = state.rate + acceleration * dt;

    // Velocity only decays once the stick is let go.
    let damped = stick.effectiveness < RELEASE_THRESHOLD;
    if damped {
        let damp_eff = params.damping.effective(input.dar_active);
        rate *= (-damp_eff * dt).exp();
    }

    apply_axis_caps(&mut rate, params);
    apply_global_cap(&mut rate, params.global_cap);

    trace!(
        "eff={:.3} desired={:?} accel={:?} rate={:?} damped={}",
        stick.effectiveness,
        desired,
        acceleration,
        rate,
        damped
    );

    StepOutcome {
        state: AngularVelocityState::from(rate),
        acceleration,
        effectiveness: stick.effectiveness,
        damped,
    }
}

fn shape_input(input: &InputSample, exponent: f64) -> ShapedStick {
    let mut horizontal = input.horizontal.clamp(-1.0, 1.0);
    let mut vertical = input.vertical.clamp(-1.0, 1.0);

    if exponent != 1.0 {
        horizontal = response_curve(horizontal, exponent);
        vertical = response_curve(vertical, exponent);
    }

    ShapedStick {
        horizontal,
        vertical,
        effectiveness: horizontal.hypot(vertical).min(1.0),
    }
}

fn response_curve(value: f64, exponent: f64) -> f64 {
    value.abs().powf(exponent).copysign(value)
}

fn desired_rates(stick: &ShapedStick, input: &InputSample, params: &PhysicsParameters) -> Vector3<f64> {
    let caps = &params.axis_caps;
    let eff = stick.effectiveness;
    let pitch = caps.pitch * eff * stick.vertical;

    match input.roll_mode {
        RollMode::FreeRoll => Vector3::new(pitch, 0.0, caps.roll * eff * -stick.horizontal),
        RollMode::None | RollMode::RollLeft | RollMode::RollRight => Vector3::new(
            pitch,
            caps.yaw * eff * stick.horizontal,
            params.dar_roll_rate(input.roll_mode, input.dar_active),
        ),
    }
}

fn pd_acceleration(
    current: &Vector3<f64>,
    desired: &Vector3<f64>,
    params: &PhysicsParameters,
) -> Vector3<f64> {
    Vector3::from_fn(|i, _| {
        let axis = Axis::ALL[i];
        params.gains.get(axis).acceleration(desired[i], current[i])
    })
}

/// Clamp `value` to `[-limit, limit]`, keeping its sign.
fn limit_magnitude(value: f64, limit: f64) -> f64 {
    if value.abs() > limit {
        limit.copysign(value)
    } else {
        value
    }
}

fn apply_axis_caps(rate: &mut Vector3<f64>, params: &PhysicsParameters) {
    rate.x = limit_magnitude(rate.x, params.axis_caps.pitch);
    rate.y = limit_magnitude(rate.y, params.axis_caps.yaw);
    if params.clamp_roll_axis {
        rate.z = limit_magnitude(rate.z, params.axis_caps.roll);
    }
}

fn apply_global_cap(rate: &mut Vector3<f64>, global_cap: f64) {
    let norm = rate.norm();
    if norm > global_cap {
        *rate *= global_cap / norm;
    }
}

/// Integrator bound to a validated parameter set.
#[derive(Debug, Clone)]
pub struct AngularVelocityIntegrator {
    params: PhysicsParameters,
}

impl AngularVelocityIntegrator {
    pub fn new(params: PhysicsParameters) -> Result<Self, ConfigError> {
        params.validate()?;
        debug!("Angular velocity integrator ready: {:?}", params);
        Ok(Self { params })
    }

    pub fn params(&self) -> &PhysicsParameters {
        &self.params
    }

    /// Advance `state` in place and report the step.
    pub fn advance(
        &self,
        state: &mut AngularVelocityState,
        input: &InputSample,
        dt: f64,
    ) -> StepOutcome {
        let outcome = step_detailed(state, input, &self.params, dt);
        *state = outcome.state;
        outcome
    }
}
