use std::fs::File;
use std::io::Read;
use std::path::Path;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::ResponsePoint;
use crate::systems::Phase;
use crate::telemetry::error::TelemetryError;

/// How the measured `wx, wy, wz` columns map onto pitch, yaw and roll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisConvention {
    /// Columns are already pitch, yaw, roll.
    #[default]
    Simulator,
    /// Game telemetry: roll in `wx`, pitch in `wy`, yaw in `wz`.
    Game,
}

impl AxisConvention {
    /// Reorder measured columns into (pitch, yaw, roll).
    pub fn to_body_rates(self, wx: f64, wy: f64, wz: f64) -> Vector3<f64> {
        match self {
            AxisConvention::Simulator => Vector3::new(wx, wy, wz),
            AxisConvention::Game => Vector3::new(wy, wz, wx),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReferenceRow {
    frame: usize,
    time: f64,
    wx: f64,
    wy: f64,
    wz: f64,
    phase: Phase,
}

/// Measured angular velocity for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceSample {
    pub frame: usize,
    pub time: f64,
    pub phase: Phase,
    /// Pitch, yaw and roll rates [rad/s]
    pub rate: Vector3<f64>,
}

/// Ground-truth time series recorded in the game.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTrace {
    samples: Vec<ReferenceSample>,
}

impl ReferenceTrace {
    /// Parse CSV rows (`frame, time, wx, wy, wz, phase`; extra columns are
    /// ignored). The trace must contain an INPUT segment.
    pub fn from_reader<R: Read>(reader: R, convention: AxisConvention) -> Result<Self, TelemetryError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut samples = Vec::new();

        for row in csv_reader.deserialize() {
            let row: ReferenceRow = row?;
            samples.push(ReferenceSample {
                frame: row.frame,
                time: row.time,
                phase: row.phase,
                rate: convention.to_body_rates(row.wx, row.wy, row.wz),
            });
        }

        if samples.is_empty() {
            return Err(TelemetryError::EmptyTrace);
        }
        if !samples.iter().any(|s| s.phase == Phase::Input) {
            return Err(TelemetryError::MissingPhase(Phase::Input));
        }

        debug!(
            "Loaded reference trace: {} samples ({:?} axes)",
            samples.len(),
            convention
        );
        Ok(Self { samples })
    }

    pub fn from_path(path: impl AsRef<Path>, convention: AxisConvention) -> Result<Self, TelemetryError> {
        Self::from_reader(File::open(path)?, convention)
    }

    pub fn samples(&self) -> &[ReferenceSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn in_phase(&self, phase: Phase) -> impl Iterator<Item = &ReferenceSample> {
        self.samples.iter().filter(move |s| s.phase == phase)
    }

    pub fn response(&self) -> Vec<ResponsePoint> {
        self.samples
            .iter()
            .map(|s| ResponsePoint {
                time: s.time,
                phase: s.phase,
                rate: s.rate,
            })
            .collect()
    }
}
