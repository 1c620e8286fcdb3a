use approx::assert_abs_diff_eq;
use sim_physics::ForcingFunction;
use std::f32::consts::PI;

#[test]
fn constant_ignores_time() {
    let f = ForcingFunction::constant(2.5);
    assert_eq!(f.evaluate(0.0), 2.5);
    assert_eq!(f.evaluate(-10.0), 2.5);
    assert_eq!(f.evaluate(1e6), 2.5);
}

#[test]
fn step_switches_at_threshold() {
    let f = ForcingFunction::step(1.0, 2.0, 3.0);
    assert_eq!(f.evaluate(2.999), 1.0);
    assert_eq!(f.evaluate(3.0), 2.0);
    assert_eq!(f.evaluate(4.0), 2.0);
}

#[test]
fn sign_sine_is_three_valued() {
    let f = ForcingFunction::sign_sine(2.0, 1.0, 0.0);
    assert_eq!(f.evaluate(1.0), 1.0);
    assert_eq!(f.evaluate(4.0), -1.0);
    assert_eq!(f.evaluate(0.0), 0.0);

    let flipped = ForcingFunction::sign_sine(-2.0, 1.0, 0.0);
    assert_eq!(flipped.evaluate(1.0), -1.0);
}

#[test]
fn sine_scales_by_amplitude() {
    let f = ForcingFunction::sine(2.0, PI, 0.0);
    assert_abs_diff_eq!(f.evaluate(0.5), 2.0, epsilon = 1e-6);
    let shifted = ForcingFunction::sine(1.0, 1.0, PI / 2.0);
    assert_abs_diff_eq!(shifted.evaluate(0.0), 1.0, epsilon = 1e-6);
}

#[test]
fn labels_describe_formula() {
    let labels: Vec<_> = ForcingFunction::catalog(1.0)
        .iter()
        .map(ForcingFunction::label)
        .collect();
    assert_eq!(
        labels,
        ["A", "(t < c) ? A : B", "sgn(A·sin(wt+o))", "A·sin(wt+o)"]
    );
    assert_eq!(ForcingFunction::default().to_string(), "A");
}

#[test]
fn catalog_entries_are_independent_copies() {
    let catalog = ForcingFunction::catalog(9.81);
    let mut selected = catalog[0];
    if let ForcingFunction::Constant { a } = &mut selected {
        *a = 1.0;
    }
    assert_eq!(catalog[0], ForcingFunction::constant(9.81));
    assert_eq!(selected.evaluate(0.0), 1.0);
}
