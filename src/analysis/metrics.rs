use std::fmt;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::Axis;
use crate::systems::{Phase, SimulationTrace};

/// Fraction of peak that still counts as "at peak" when locating release.
pub const NEAR_PEAK_FRACTION: f64 = 0.95;

/// Frames at the start of the input used to estimate the acceleration limit.
pub const ACCEL_WINDOW_FRAMES: usize = 60;

/// A time-stamped rate vector, common to simulated and measured series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponsePoint {
    pub time: f64,
    pub phase: Phase,
    /// Pitch, yaw and roll rates [rad/s]
    pub rate: Vector3<f64>,
}

impl SimulationTrace {
    pub fn response(&self) -> Vec<ResponsePoint> {
        self.iter()
            .map(|s| ResponsePoint {
                time: s.time,
                phase: s.phase,
                rate: s.state.rate,
            })
            .collect()
    }
}

/// Scalar extracted from a rate vector for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    /// Absolute rate about one axis.
    Axis(Axis),
    /// Norm of the rate vector.
    Magnitude,
}

impl Measure {
    pub fn value(self, rate: &Vector3<f64>) -> f64 {
        match self {
            Measure::Axis(axis) => rate[axis.index()].abs(),
            Measure::Magnitude => rate.norm(),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Axis(axis) => write!(f, "{axis}"),
            Measure::Magnitude => write!(f, "magnitude"),
        }
    }
}

/// Largest value reached during `phase`.
pub fn peak_rate(points: &[ResponsePoint], measure: Measure, phase: Phase) -> Option<f64> {
    points
        .iter()
        .filter(|p| p.phase == phase)
        .map(|p| measure.value(&p.rate))
        .reduce(f64::max)
}

/// Time from the start of `phase` until the value first reaches
/// `fraction` of that phase's peak.
pub fn time_to_fraction_of_peak(
    points: &[ResponsePoint],
    measure: Measure,
    phase: Phase,
    fraction: f64,
) -> Option<f64> {
    let peak = peak_rate(points, measure, phase)?;
    if peak <= 0.0 {
        return None;
    }

    let target = fraction * peak;
    let mut in_phase = points.iter().filter(|p| p.phase == phase);
    let onset = in_phase.clone().next()?.time;
    in_phase
        .find(|p| measure.value(&p.rate) >= target)
        .map(|p| p.time - onset)
}

/// Time for the value to fall to `fraction` of `peak`, measured from the
/// last sample still within [`NEAR_PEAK_FRACTION`] of the peak.
pub fn decay_time(points: &[ResponsePoint], measure: Measure, peak: f64, fraction: f64) -> Option<f64> {
    if peak <= 0.0 {
        return None;
    }

    let release = points
        .iter()
        .rposition(|p| measure.value(&p.rate) >= NEAR_PEAK_FRACTION * peak)?;
    let release_time = points[release].time;

    points[release..]
        .iter()
        .find(|p| measure.value(&p.rate) <= fraction * peak)
        .map(|p| p.time - release_time)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayTimes {
    pub to_5pct: Option<f64>,
    pub to_1pct: Option<f64>,
}

pub fn decay_times(points: &[ResponsePoint], measure: Measure, peak: f64) -> DecayTimes {
    DecayTimes {
        to_5pct: decay_time(points, measure, peak, 0.05),
        to_1pct: decay_time(points, measure, peak, 0.01),
    }
}

/// Estimate the instantaneous acceleration limit [rad/s^2]
///
/// Takes frame-to-frame accelerations over the first `window` INPUT frames,
/// keeps the positive ones, and returns the median of the upper half. The
/// median rejects single-frame spikes in measured data.
pub fn acceleration_limit_estimate(
    points: &[ResponsePoint],
    measure: Measure,
    window: usize,
) -> Option<f64> {
    let input: Vec<&ResponsePoint> = points
        .iter()
        .filter(|p| p.phase == Phase::Input)
        .take(window)
        .collect();

    let mut accels: Vec<f64> = input
        .windows(2)
        .filter_map(|pair| {
            let dt = pair[1].time - pair[0].time;
            if dt <= 0.0 {
                return None;
            }
            let accel = (measure.value(&pair[1].rate) - measure.value(&pair[0].rate)) / dt;
            (accel > 0.0).then_some(accel)
        })
        .collect();

    accels.sort_by(|a, b| b.total_cmp(a));
    let mut top_half: Vec<f64> = accels[..accels.len() / 2].to_vec();
    if top_half.is_empty() {
        return None;
    }
    top_half.sort_by(f64::total_cmp);
    Some(top_half[top_half.len() / 2])
}
