use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::metrics::{decay_times, peak_rate, time_to_fraction_of_peak, Measure, ResponsePoint};
use crate::systems::Phase;

/// Relative error allowed for each check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    pub peak_velocity: f64,
    pub time_to_95: f64,
    pub decay: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            peak_velocity: 0.05,
            time_to_95: 0.15,
            decay: 0.20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Passed,
    Failed,
    /// One side lacked the data for this check.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub simulated: Option<f64>,
    pub reference: Option<f64>,
    pub relative_error: Option<f64>,
    pub tolerance: f64,
    pub status: CheckStatus,
}

impl CheckResult {
    fn evaluate(name: &str, simulated: Option<f64>, reference: Option<f64>, tolerance: f64) -> Self {
        let relative_error = match (simulated, reference) {
            (Some(sim), Some(reference)) if reference != 0.0 => {
                Some((sim - reference).abs() / reference.abs())
            }
            _ => None,
        };

        let status = match relative_error {
            Some(error) if error < tolerance => CheckStatus::Passed,
            Some(_) => CheckStatus::Failed,
            None => CheckStatus::Skipped,
        };

        Self {
            name: name.to_string(),
            simulated,
            reference,
            relative_error,
            tolerance,
            status,
        }
    }
}

/// Outcome of comparing a simulated run against measured data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub measure: Measure,
    pub checks: Vec<CheckResult>,
}

impl ComparisonReport {
    /// True when no check failed. Skipped checks do not count against it.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.status != CheckStatus::Failed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks
            .iter()
            .filter(|c| c.status == CheckStatus::Failed)
    }

    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }
}

/// Compare peak rate, rise time and decay times of two series.
///
/// Peak and rise time are taken over the INPUT phase. Decay is timed from
/// the last near-peak sample, so release damping and any residual
/// acceleration both count.
pub fn compare(
    simulated: &[ResponsePoint],
    reference: &[ResponsePoint],
    measure: Measure,
    tolerances: &Tolerances,
) -> ComparisonReport {
    let sim_peak = peak_rate(simulated, measure, Phase::Input);
    let ref_peak = peak_rate(reference, measure, Phase::Input);

    let sim_rise = time_to_fraction_of_peak(simulated, measure, Phase::Input, 0.95);
    let ref_rise = time_to_fraction_of_peak(reference, measure, Phase::Input, 0.95);

    let sim_decay = sim_peak.map(|peak| decay_times(simulated, measure, peak));
    let ref_decay = ref_peak.map(|peak| decay_times(reference, measure, peak));

    let checks = vec![
        CheckResult::evaluate("peak_velocity", sim_peak, ref_peak, tolerances.peak_velocity),
        CheckResult::evaluate("time_to_95", sim_rise, ref_rise, tolerances.time_to_95),
        CheckResult::evaluate(
            "decay_to_5pct",
            sim_decay.and_then(|d| d.to_5pct),
            ref_decay.and_then(|d| d.to_5pct),
            tolerances.decay,
        ),
        CheckResult::evaluate(
            "decay_to_1pct",
            sim_decay.and_then(|d| d.to_1pct),
            ref_decay.and_then(|d| d.to_1pct),
            tolerances.decay,
        ),
    ];

    let report = ComparisonReport { measure, checks };
    for failure in report.failures() {
        warn!(
            "{} {}: simulated {:?} vs reference {:?} (error {:.1}%, allowed {:.0}%)",
            measure,
            failure.name,
            failure.simulated,
            failure.reference,
            failure.relative_error.unwrap_or(f64::NAN) * 100.0,
            failure.tolerance * 100.0
        );
    }
    info!(
        "Comparison on {}: {}",
        measure,
        if report.passed() { "PASS" } else { "FAIL" }
    );
    report
}
