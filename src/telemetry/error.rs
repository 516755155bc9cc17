use thiserror::Error;

use crate::systems::Phase;

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Trace contains no samples")]
    EmptyTrace,

    #[error("Trace has no {0} phase")]
    MissingPhase(Phase),
}
