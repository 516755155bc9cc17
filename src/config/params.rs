use std::f64::consts::TAU;
use std::path::Path;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::components::{Axis, RollMode};
use crate::config::errors::{require_non_negative, require_positive, ConfigError};
use crate::config::{PhysicsParametersBuilder, PhysicsProfile};

/// One value per rotation axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisTriple {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl AxisTriple {
    pub const fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value)
    }

    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Pitch => self.pitch,
            Axis::Yaw => self.yaw,
            Axis::Roll => self.roll,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Pitch => self.pitch = value,
            Axis::Yaw => self.yaw = value,
            Axis::Roll => self.roll = value,
        }
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.pitch, self.yaw, self.roll)
    }

    fn require_positive(&self, group: &str) -> Result<(), ConfigError> {
        for axis in Axis::ALL {
            require_positive(&format!("{group}.{axis}"), self.get(axis))?;
        }
        Ok(())
    }
}

/// Proportional-derivative gains for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PdGains {
    pub kp: f64,
    pub kd: f64,
}

impl PdGains {
    pub const fn new(kp: f64, kd: f64) -> Self {
        Self { kp, kd }
    }

    /// Acceleration demanded to move `current` towards `desired` [rad/s^2]
    pub fn acceleration(&self, desired: f64, current: f64) -> f64 {
        self.kp * (desired - current) - self.kd * current
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisGains {
    pub pitch: PdGains,
    pub yaw: PdGains,
    pub roll: PdGains,
}

impl AxisGains {
    pub const fn uniform(gains: PdGains) -> Self {
        Self {
            pitch: gains,
            yaw: gains,
            roll: gains,
        }
    }

    pub fn get(&self, axis: Axis) -> PdGains {
        match axis {
            Axis::Pitch => self.pitch,
            Axis::Yaw => self.yaw,
            Axis::Roll => self.roll,
        }
    }
}

/// Release damping coefficients [1/s]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Damping {
    pub no_dar: f64,
    pub dar: f64,
    /// Extra damping on stick release, only without DAR.
    pub release_brake: f64,
}

impl Damping {
    /// Damping rate used when the stick is released.
    pub fn effective(&self, dar_active: bool) -> f64 {
        if dar_active {
            self.dar
        } else {
            self.no_dar + self.release_brake
        }
    }
}

/// Calibration constants for the angular velocity model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParameters {
    /// Per-axis angular acceleration limits [deg/s^2]
    pub accel_limits: AxisTriple,
    /// Scale applied to the acceleration limits while DAR is active.
    pub dar_multipliers: AxisTriple,
    pub gains: AxisGains,
    pub damping: Damping,
    /// Per-axis rate caps, also the full-stick desired rates [rad/s]
    pub axis_caps: AxisTriple,
    /// Whether the per-axis cap stage clamps roll as well as pitch and yaw.
    pub clamp_roll_axis: bool,
    /// Cap on the norm of the rate vector [rad/s]
    pub global_cap: f64,
    /// Exponent of the stick response curve; 1 is linear.
    pub input_exponent: f64,
    /// Seconds per revolution under directional air roll; 0 disables it.
    pub free_roll_period: f64,
}

impl Default for PhysicsParameters {
    fn default() -> Self {
        PhysicsProfile::Reference.parameters()
    }
}

impl PhysicsParameters {
    pub fn builder() -> PhysicsParametersBuilder {
        PhysicsParametersBuilder::new()
    }

    /// Check every limit before the parameters reach the integrator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.accel_limits.require_positive("accel_limits")?;
        self.dar_multipliers.require_positive("dar_multipliers")?;
        self.axis_caps.require_positive("axis_caps")?;
        require_positive("global_cap", self.global_cap)?;
        require_positive("damping.no_dar", self.damping.no_dar)?;
        require_positive("damping.dar", self.damping.dar)?;
        require_non_negative("damping.release_brake", self.damping.release_brake)?;
        require_positive("input_exponent", self.input_exponent)?;
        require_non_negative("free_roll_period", self.free_roll_period)?;

        for axis in Axis::ALL {
            let gains = self.gains.get(axis);
            require_non_negative(&format!("gains.{axis}.kp"), gains.kp)?;
            require_non_negative(&format!("gains.{axis}.kd"), gains.kd)?;
        }

        Ok(())
    }

    /// Acceleration limits in rad/s^2, scaled for DAR when active.
    pub fn accel_limits_rad(&self, dar_active: bool) -> Vector3<f64> {
        let limits = self.accel_limits.to_vector().map(f64::to_radians);
        if dar_active {
            limits.component_mul(&self.dar_multipliers.to_vector())
        } else {
            limits
        }
    }

    /// Constant roll rate driven by directional air roll [rad/s]
    pub fn dar_roll_rate(&self, roll_mode: RollMode, dar_active: bool) -> f64 {
        if dar_active && roll_mode.is_directional() && self.free_roll_period > 0.0 {
            roll_mode.direction() * TAU / self.free_roll_period
        } else {
            0.0
        }
    }

    /// Parse and validate parameters from YAML.
    ///
    /// The document may be a complete parameter set or a `profile` name
    /// followed by any subset of overrides.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let builder: PhysicsParametersBuilder = serde_yaml::from_str(yaml)?;
        builder.build()
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading physics parameters from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
