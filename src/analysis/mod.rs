mod compare;
mod metrics;

pub use compare::{compare, CheckResult, CheckStatus, ComparisonReport, Tolerances};
pub use metrics::{
    acceleration_limit_estimate, decay_time, decay_times, peak_rate, time_to_fraction_of_peak,
    DecayTimes, Measure, ResponsePoint, ACCEL_WINDOW_FRAMES, NEAR_PEAK_FRACTION,
};
