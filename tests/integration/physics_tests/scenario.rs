use approx::assert_relative_eq;
use l4sim::{
    analysis::{
        acceleration_limit_estimate, decay_times, peak_rate, time_to_fraction_of_peak, Measure,
        ACCEL_WINDOW_FRAMES,
    },
    systems::{run_suite, standard_suite},
    Axis, Phase, PhysicsProfile,
};

use crate::common::{
    assert_trace_valid, create_driver, create_hold_release, create_pitch_calibration_params,
    full_pitch, DT,
};

/// Full vertical stick for 5 s, then 3 s released, at 60 Hz.
#[test]
fn test_pitch_hold_and_release() {
    let params = create_pitch_calibration_params();
    let schedule = create_hold_release(full_pitch(), 5.0, 3.0);
    let trace = create_driver(params, schedule.duration()).run(&schedule);
    assert_trace_valid(&trace, &params);
    assert_eq!(trace.len(), 480);

    let response = trace.response();
    let measure = Measure::Axis(Axis::Pitch);

    let peak = peak_rate(&response, measure, Phase::Input).unwrap();
    assert_relative_eq!(peak, 4.95, epsilon = 1e-9);
    assert!(peak < params.global_cap);

    let rise = time_to_fraction_of_peak(&response, measure, Phase::Input, 0.95).unwrap();
    assert!(rise > 0.3 && rise < 0.45, "rise time {rise}");

    let decay = decay_times(&response, measure, peak);
    let to_5pct = decay.to_5pct.unwrap();
    assert!(to_5pct <= 1.5, "decay to 5% took {to_5pct}");
    assert!(decay.to_1pct.unwrap() >= to_5pct);

    let final_rate = trace.final_state().unwrap().pitch();
    assert!(final_rate.abs() < 1e-6);
}

#[test]
fn test_release_envelope() {
    let params = create_pitch_calibration_params();
    let schedule = create_hold_release(full_pitch(), 5.0, 3.0);
    let trace = create_driver(params, schedule.duration()).run(&schedule);

    let peak = trace.in_phase(Phase::Input).last().unwrap().state.pitch();
    for (i, sample) in trace.in_phase(Phase::Release).enumerate() {
        let envelope = peak * (-2.96 * (i + 1) as f64 * DT).exp();
        assert!(sample.state.pitch() <= envelope + 1e-12);
        assert!(sample.state.pitch() >= 0.0);
    }
}

#[test]
fn test_acceleration_estimate_recovers_limit() {
    let params = create_pitch_calibration_params();
    let schedule = create_hold_release(full_pitch(), 5.0, 3.0);
    let trace = create_driver(params, schedule.duration()).run(&schedule);

    let estimate = acceleration_limit_estimate(
        &trace.response(),
        Measure::Axis(Axis::Pitch),
        ACCEL_WINDOW_FRAMES,
    )
    .unwrap();
    assert_relative_eq!(estimate, 714.0_f64.to_radians(), max_relative = 1e-6);
}

#[test]
fn test_parallel_suite_matches_sequential_runs() {
    let params = PhysicsProfile::Headless.parameters();
    let scenarios = standard_suite();
    let runs = run_suite(&scenarios, &params, DT).unwrap();

    assert_eq!(runs.len(), 6);
    for (run, scenario) in runs.iter().zip(&scenarios) {
        assert_eq!(run.scenario, *scenario);
        assert_trace_valid(&run.trace, &params);
        assert_eq!(run.trace, scenario.run(&params, DT).unwrap());
    }
}
