use approx::assert_relative_eq;
use l4sim::{step_detailed, AngularVelocityState, Axis, Phase, PhysicsProfile};

use crate::common::{
    assert_trace_valid, create_driver, create_hold_release, create_pitch_calibration_params,
    full_free_roll, full_pitch, full_yaw, DT,
};

#[test]
fn test_full_input_converges_monotonically() {
    for profile in PhysicsProfile::ALL {
        let params = profile.parameters();
        for (held, axis) in [
            (full_pitch(), Axis::Pitch),
            (full_yaw(), Axis::Yaw),
            (full_free_roll(), Axis::Roll),
        ] {
            let schedule = create_hold_release(held, 5.0, 0.0);
            let trace = create_driver(params, 5.0).run(&schedule);
            assert_trace_valid(&trace, &params);

            let rates: Vec<f64> = trace.iter().map(|s| s.state.axis(axis).abs()).collect();
            for pair in rates.windows(2) {
                assert!(
                    pair[1] >= pair[0] - 1e-12,
                    "{profile} {axis}: rate fell from {} to {}",
                    pair[0],
                    pair[1]
                );
            }
            assert!(rates[rates.len() - 1] > 0.0);
        }
    }
}

#[test]
fn test_rate_change_matches_clamped_acceleration_while_held() {
    let params = create_pitch_calibration_params();
    let schedule = create_hold_release(full_pitch(), 5.0, 0.0);
    let trace = create_driver(params, 5.0).run(&schedule);

    let mut previous = AngularVelocityState::zero();
    for sample in trace.in_phase(Phase::Input) {
        let delta = sample.state.rate - previous.rate;
        assert_relative_eq!(delta.x, sample.acceleration.x * DT, epsilon = 1e-12);
        assert_eq!(delta.y, 0.0);
        assert_eq!(delta.z, 0.0);
        previous = sample.state;
    }
}

#[test]
fn test_steady_state_set_by_pd_balance() {
    let params = create_pitch_calibration_params();
    let schedule = create_hold_release(full_pitch(), 5.0, 0.0);
    let trace = create_driver(params, 5.0).run(&schedule);

    // Kp (w_des - w) = Kd w  =>  w = Kp w_des / (Kp + Kd)
    let expected = 36.0 * 5.5 / 40.0;
    let final_rate = trace.final_state().unwrap().pitch();
    assert_relative_eq!(final_rate, expected, epsilon = 1e-9);
    assert!(final_rate < params.global_cap);
}

#[test]
fn test_accel_limit_holds_early_in_input() {
    let params = PhysicsProfile::Reference.parameters();
    let limit = 714.0_f64.to_radians();
    let mut state = AngularVelocityState::zero();

    for tick in 1..=10 {
        let outcome = step_detailed(&state, &full_pitch(), &params, DT);
        assert_relative_eq!(outcome.acceleration.x, limit);
        state = outcome.state;
        assert_relative_eq!(state.pitch(), limit * DT * tick as f64, epsilon = 1e-12);
    }
}
