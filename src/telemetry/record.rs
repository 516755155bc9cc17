use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::systems::{Phase, SimulationTrace, TraceSample};
use crate::telemetry::error::TelemetryError;

/// One row of simulator output, one per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub frame: usize,
    pub time: f64,
    pub wx: f64,
    pub wy: f64,
    pub wz: f64,
    pub magnitude: f64,
    /// Raw vertical stick
    pub input_pitch: f64,
    /// Raw horizontal stick, which drives roll rather than yaw in free roll
    pub input_yaw: f64,
    /// -1 left, +1 right, 0 for no air roll or free roll
    pub input_roll: f64,
    pub dar_active: bool,
    pub phase: Phase,
}

impl From<&TraceSample> for TelemetryRecord {
    fn from(sample: &TraceSample) -> Self {
        let input = &sample.input;

        Self {
            frame: sample.frame,
            time: sample.time,
            wx: sample.state.pitch(),
            wy: sample.state.yaw(),
            wz: sample.state.roll(),
            magnitude: sample.state.magnitude(),
            input_pitch: input.vertical,
            input_yaw: input.horizontal,
            input_roll: input.roll_input(),
            dar_active: input.dar_active,
            phase: sample.phase,
        }
    }
}

impl SimulationTrace {
    pub fn records(&self) -> Vec<TelemetryRecord> {
        self.iter().map(TelemetryRecord::from).collect()
    }

    /// Write the trace as CSV with a header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), TelemetryError> {
        write_records(&self.records(), writer)
    }

    pub fn write_csv_file(&self, path: impl AsRef<Path>) -> Result<(), TelemetryError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.write_csv(File::create(path)?)?;
        info!("Saved {} frames to {}", self.len(), path.display());
        Ok(())
    }
}

pub fn write_records<W: Write>(records: &[TelemetryRecord], writer: W) -> Result<(), TelemetryError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn read_records<R: Read>(reader: R) -> Result<Vec<TelemetryRecord>, TelemetryError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let records = csv_reader
        .deserialize()
        .collect::<Result<Vec<TelemetryRecord>, csv::Error>>()?;
    Ok(records)
}
