pub mod angular;
pub mod input;

pub use angular::{AngularVelocityState, Axis};
pub use input::{InputSample, RollMode};
