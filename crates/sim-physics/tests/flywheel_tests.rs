use approx::assert_abs_diff_eq;
use sim_physics::{Flywheel, FlywheelParams, Simulatable};
use std::f32::consts::{FRAC_PI_2, TAU};

fn flywheel(params: FlywheelParams, seed: u64) -> Flywheel {
    let mut flywheel = Flywheel::with_seed(seed);
    params.reset(&mut flywheel);
    flywheel
}

#[test]
fn reset_puts_piston_at_dead_centre() {
    let flywheel = flywheel(FlywheelParams::default(), 1);
    assert_eq!(flywheel.angle(), 0.0);
    assert_eq!(flywheel.piston_position(), 3.0);
    assert_eq!(flywheel.piston_velocity(), 0.0);
    assert_eq!(flywheel.piston_acceleration(), 0.0);
}

#[test]
fn quarter_turn_follows_crank_geometry() {
    let mut flywheel = flywheel(FlywheelParams::default(), 1);
    flywheel.update(FRAC_PI_2);

    let expected = 0.75_f32.sqrt() * 2.0;
    assert_abs_diff_eq!(flywheel.angle(), FRAC_PI_2);
    assert_abs_diff_eq!(flywheel.piston_position(), expected, epsilon = 1e-5);
    assert_abs_diff_eq!(
        flywheel.piston_velocity(),
        (expected - 3.0) / FRAC_PI_2,
        epsilon = 1e-5
    );
    assert_abs_diff_eq!(
        flywheel.piston_acceleration(),
        flywheel.piston_velocity() / FRAC_PI_2,
        epsilon = 1e-5
    );
}

#[test]
fn angle_wraps_into_one_turn() {
    let mut forward = flywheel(FlywheelParams::default(), 1);
    forward.update(7.0);
    assert_abs_diff_eq!(forward.angle(), 7.0 - TAU, epsilon = 1e-5);

    let mut backward = flywheel(
        FlywheelParams {
            angular_velocity: -1.0,
            ..FlywheelParams::default()
        },
        1,
    );
    backward.update(1.0);
    assert!((0.0..TAU).contains(&backward.angle()));
    assert_abs_diff_eq!(backward.angle(), TAU - 1.0, epsilon = 1e-5);
}

#[test]
fn noiseless_rod_keeps_nominal_length() {
    let mut flywheel = flywheel(FlywheelParams::default(), 1);
    for _ in 0..100 {
        flywheel.update(0.01);
        assert_eq!(flywheel.current_length(), 2.0);
    }
}

#[test]
fn rod_noise_is_reproducible_with_seed() {
    let params = FlywheelParams {
        standard_deviation: 0.1,
        ..FlywheelParams::default()
    };
    let mut a = flywheel(params, 9);
    let mut b = flywheel(params, 9);
    let mut c = flywheel(params, 10);

    let mut differs = false;
    for _ in 0..50 {
        a.update(0.01);
        b.update(0.01);
        c.update(0.01);
        assert_eq!(a.piston_position(), b.piston_position());
        differs |= a.piston_position() != c.piston_position();
    }
    assert!(differs);
    assert_ne!(a.current_length(), a.length());
}

#[test]
fn negative_deviation_is_clamped() {
    let mut flywheel = flywheel(FlywheelParams::default(), 1);
    flywheel.set_standard_deviation(-1.0);
    flywheel.update(0.01);
    assert_eq!(flywheel.current_length(), flywheel.length());
}
