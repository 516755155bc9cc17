use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::errors::ConfigError;
use crate::config::params::{AxisGains, AxisTriple, Damping, PdGains, PhysicsParameters};

/// Named calibration presets.
///
/// Both were fitted against the same game measurements and disagree on gains,
/// DAR multipliers and whether roll has its own clamp. Neither is
/// authoritative; they are starting points for further calibration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicsProfile {
    /// Constants matching the interactive simulator.
    #[default]
    Reference,
    /// Constants used by the headless automated test runs.
    Headless,
}

impl PhysicsProfile {
    pub const ALL: [PhysicsProfile; 2] = [PhysicsProfile::Reference, PhysicsProfile::Headless];

    pub fn parameters(self) -> PhysicsParameters {
        match self {
            PhysicsProfile::Reference => PhysicsParameters {
                accel_limits: AxisTriple::new(714.0, 521.0, 2153.0),
                dar_multipliers: AxisTriple::new(0.997, 1.00, 0.98),
                gains: AxisGains::uniform(PdGains::new(20.0, 3.0)),
                damping: Damping {
                    no_dar: 2.96,
                    dar: 4.35,
                    release_brake: 0.0,
                },
                axis_caps: AxisTriple::uniform(24.0),
                clamp_roll_axis: true,
                global_cap: 5.5,
                input_exponent: 1.0,
                free_roll_period: 0.74,
            },
            PhysicsProfile::Headless => PhysicsParameters {
                accel_limits: AxisTriple::new(714.0, 521.0, 573.0),
                dar_multipliers: AxisTriple::new(0.997, 3.17, 1.32),
                gains: AxisGains {
                    pitch: PdGains::new(36.0, 4.0),
                    yaw: PdGains::new(36.0, 4.0),
                    roll: PdGains::new(12.0, 3.0),
                },
                damping: Damping {
                    no_dar: 2.96,
                    dar: 4.35,
                    release_brake: 0.0,
                },
                axis_caps: AxisTriple::uniform(24.0),
                clamp_roll_axis: false,
                global_cap: 5.5,
                input_exponent: 1.0,
                free_roll_period: 0.74,
            },
        }
    }
}

impl fmt::Display for PhysicsProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsProfile::Reference => write!(f, "reference"),
            PhysicsProfile::Headless => write!(f, "headless"),
        }
    }
}

impl FromStr for PhysicsProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reference" => Ok(PhysicsProfile::Reference),
            "headless" => Ok(PhysicsProfile::Headless),
            other => Err(ConfigError::UnknownProfile(other.to_string())),
        }
    }
}
