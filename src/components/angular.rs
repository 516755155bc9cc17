use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Rotation axis of the vehicle body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Pitch,
    Yaw,
    Roll,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Pitch, Axis::Yaw, Axis::Roll];

    /// Index of the axis inside the rate vector.
    pub fn index(self) -> usize {
        match self {
            Axis::Pitch => 0,
            Axis::Yaw => 1,
            Axis::Roll => 2,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Pitch => write!(f, "pitch"),
            Axis::Yaw => write!(f, "yaw"),
            Axis::Roll => write!(f, "roll"),
        }
    }
}

/// Angular velocity of the vehicle in the body frame.
///
/// Components are ordered pitch-rate, yaw-rate, roll-rate, all in rad/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularVelocityState {
    /// Body rates [rad/s]
    pub rate: Vector3<f64>,
}

impl Default for AngularVelocityState {
    fn default() -> Self {
        Self::zero()
    }
}

impl AngularVelocityState {
    /// Create a state from explicit pitch, yaw and roll rates.
    pub fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self {
            rate: Vector3::new(pitch, yaw, roll),
        }
    }

    /// The state every simulation run starts from.
    pub fn zero() -> Self {
        Self {
            rate: Vector3::zeros(),
        }
    }

    pub fn pitch(&self) -> f64 {
        self.rate.x
    }

    pub fn yaw(&self) -> f64 {
        self.rate.y
    }

    pub fn roll(&self) -> f64 {
        self.rate.z
    }

    pub fn axis(&self, axis: Axis) -> f64 {
        self.rate[axis.index()]
    }

    /// Euclidean norm of the rate vector [rad/s]
    pub fn magnitude(&self) -> f64 {
        self.rate.norm()
    }

    pub fn is_zero(&self) -> bool {
        self.rate.iter().all(|w| *w == 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.rate.iter().all(|w| w.is_finite())
    }

    /// Reset to rest at the end of a run or segment.
    pub fn reset(&mut self) {
        self.rate = Vector3::zeros();
    }
}

impl From<Vector3<f64>> for AngularVelocityState {
    fn from(rate: Vector3<f64>) -> Self {
        Self { rate }
    }
}
