mod error;
mod record;
mod reference;

pub use error::TelemetryError;
pub use record::{read_records, write_records, TelemetryRecord};
pub use reference::{AxisConvention, ReferenceSample, ReferenceTrace};
