use approx::assert_relative_eq;
use l4sim::{
    step_detailed, AngularVelocityState, InputSample, Phase, PhysicsProfile, RollMode,
};

use crate::common::{
    create_driver, create_hold_release, create_pitch_calibration_params, create_undriven_params,
    full_pitch, DT,
};

#[test]
fn test_pure_damping_follows_exponential() {
    let params = create_undriven_params();
    let initial = AngularVelocityState::new(3.0, -2.0, 1.0);
    let schedule = create_hold_release(InputSample::neutral(), 0.0, 3.0);
    let trace = create_driver(params, 3.0).run_from(initial, &schedule);

    for sample in trace.iter() {
        let elapsed = (sample.frame + 1) as f64 * DT;
        let expected = initial.magnitude() * (-2.96 * elapsed).exp();
        assert_relative_eq!(sample.state.magnitude(), expected, max_relative = 1e-9);
    }
}

#[test]
fn test_dar_release_uses_dar_damping() {
    let params = create_undriven_params();
    let initial = AngularVelocityState::new(3.0, 0.0, 0.0);
    let mut state = initial;
    let released = InputSample::new(0.0, 0.0, RollMode::None, true);

    for _ in 0..60 {
        state = step_detailed(&state, &released, &params, DT).state;
    }
    assert_relative_eq!(state.pitch(), 3.0 * (-4.35_f64).exp(), max_relative = 1e-9);
}

#[test]
fn test_release_strictly_decreases_within_envelope() {
    for params in [
        PhysicsProfile::Reference.parameters(),
        PhysicsProfile::Headless.parameters(),
        create_pitch_calibration_params(),
    ] {
        let schedule = create_hold_release(full_pitch(), 5.0, 3.0);
        let trace = create_driver(params, 8.0).run(&schedule);

        let peak = trace
            .in_phase(Phase::Input)
            .last()
            .map(|s| s.state.magnitude())
            .unwrap();
        let release: Vec<f64> = trace
            .in_phase(Phase::Release)
            .map(|s| s.state.magnitude())
            .collect();
        assert_eq!(release.len(), 180);

        let mut previous = peak;
        for (i, magnitude) in release.iter().enumerate() {
            assert!(*magnitude < previous, "tick {i}: {magnitude} >= {previous}");
            let envelope = peak * (-2.96 * (i + 1) as f64 * DT).exp();
            assert!(*magnitude <= envelope + 1e-12);
            previous = *magnitude;
        }
    }
}

#[test]
fn test_neutral_input_from_rest_stays_zero() {
    for profile in PhysicsProfile::ALL {
        let params = profile.parameters();
        let schedule = create_hold_release(InputSample::neutral(), 0.0, 10.0);
        let trace = create_driver(params, 10.0).run(&schedule);

        assert_eq!(trace.len(), 600);
        assert!(trace.iter().all(|s| s.state.is_zero()));
        assert!(trace.iter().all(|s| s.acceleration.iter().all(|a| *a == 0.0)));
    }
}
