use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::components::Axis;
use crate::config::errors::ConfigError;
use crate::config::params::{AxisTriple, Damping, PdGains, PhysicsParameters};
use crate::config::PhysicsProfile;

/// Optional override for each axis of an [`AxisTriple`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AxisOverrides {
    pub pitch: Option<f64>,
    pub yaw: Option<f64>,
    pub roll: Option<f64>,
}

impl AxisOverrides {
    fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Pitch => self.pitch = Some(value),
            Axis::Yaw => self.yaw = Some(value),
            Axis::Roll => self.roll = Some(value),
        }
    }

    fn apply(&self, target: &mut AxisTriple) {
        if let Some(pitch) = self.pitch {
            target.pitch = pitch;
        }
        if let Some(yaw) = self.yaw {
            target.yaw = yaw;
        }
        if let Some(roll) = self.roll {
            target.roll = roll;
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GainOverrides {
    pub kp: Option<f64>,
    pub kd: Option<f64>,
}

impl GainOverrides {
    fn apply(&self, target: &mut PdGains) {
        if let Some(kp) = self.kp {
            target.kp = kp;
        }
        if let Some(kd) = self.kd {
            target.kd = kd;
        }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AxisGainOverrides {
    pub pitch: GainOverrides,
    pub yaw: GainOverrides,
    pub roll: GainOverrides,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DampingOverrides {
    pub no_dar: Option<f64>,
    pub dar: Option<f64>,
    pub release_brake: Option<f64>,
}

impl DampingOverrides {
    fn apply(&self, target: &mut Damping) {
        if let Some(no_dar) = self.no_dar {
            target.no_dar = no_dar;
        }
        if let Some(dar) = self.dar {
            target.dar = dar;
        }
        if let Some(release_brake) = self.release_brake {
            target.release_brake = release_brake;
        }
    }
}

/// Builds [`PhysicsParameters`] from a profile plus overrides.
///
/// Also the on-disk shape of a parameter file, so a file may name a profile
/// and override only the constants being recalibrated.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicsParametersBuilder {
    pub profile: Option<PhysicsProfile>,
    pub accel_limits: AxisOverrides,
    pub dar_multipliers: AxisOverrides,
    pub gains: AxisGainOverrides,
    pub damping: DampingOverrides,
    pub axis_caps: AxisOverrides,
    pub clamp_roll_axis: Option<bool>,
    pub global_cap: Option<f64>,
    pub input_exponent: Option<f64>,
    pub free_roll_period: Option<f64>,
}

impl PhysicsParametersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(mut self, profile: PhysicsProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Acceleration limit in deg/s^2.
    pub fn accel_limit(mut self, axis: Axis, deg_per_s2: f64) -> Self {
        self.accel_limits.set(axis, deg_per_s2);
        self
    }

    pub fn dar_multiplier(mut self, axis: Axis, multiplier: f64) -> Self {
        self.dar_multipliers.set(axis, multiplier);
        self
    }

    pub fn gains(mut self, axis: Axis, gains: PdGains) -> Self {
        let overrides = GainOverrides {
            kp: Some(gains.kp),
            kd: Some(gains.kd),
        };
        match axis {
            Axis::Pitch => self.gains.pitch = overrides,
            Axis::Yaw => self.gains.yaw = overrides,
            Axis::Roll => self.gains.roll = overrides,
        }
        self
    }

    pub fn damping(mut self, no_dar: f64, dar: f64) -> Self {
        self.damping.no_dar = Some(no_dar);
        self.damping.dar = Some(dar);
        self
    }

    pub fn release_brake(mut self, brake: f64) -> Self {
        self.damping.release_brake = Some(brake);
        self
    }

    pub fn axis_cap(mut self, axis: Axis, cap: f64) -> Self {
        self.axis_caps.set(axis, cap);
        self
    }

    pub fn clamp_roll_axis(mut self, clamp: bool) -> Self {
        self.clamp_roll_axis = Some(clamp);
        self
    }

    pub fn global_cap(mut self, cap: f64) -> Self {
        self.global_cap = Some(cap);
        self
    }

    pub fn input_exponent(mut self, exponent: f64) -> Self {
        self.input_exponent = Some(exponent);
        self
    }

    pub fn free_roll_period(mut self, period: f64) -> Self {
        self.free_roll_period = Some(period);
        self
    }

    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn build(self) -> Result<PhysicsParameters, ConfigError> {
        let mut params = self.profile.unwrap_or_default().parameters();

        self.accel_limits.apply(&mut params.accel_limits);
        self.dar_multipliers.apply(&mut params.dar_multipliers);
        self.gains.pitch.apply(&mut params.gains.pitch);
        self.gains.yaw.apply(&mut params.gains.yaw);
        self.gains.roll.apply(&mut params.gains.roll);
        self.damping.apply(&mut params.damping);
        self.axis_caps.apply(&mut params.axis_caps);

        if let Some(clamp) = self.clamp_roll_axis {
            params.clamp_roll_axis = clamp;
        }
        if let Some(cap) = self.global_cap {
            params.global_cap = cap;
        }
        if let Some(exponent) = self.input_exponent {
            params.input_exponent = exponent;
        }
        if let Some(period) = self.free_roll_period {
            params.free_roll_period = period;
        }

        params.validate()?;
        Ok(params)
    }
}
