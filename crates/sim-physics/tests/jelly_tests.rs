use approx::assert_abs_diff_eq;
use glam::Vec3;
use sim_physics::{
    BoundingBox, CollisionModel, ControlPoint, Jelly, JellyParams, Simulatable, LATTICE_POINTS,
};

fn relaxed_params() -> JellyParams {
    JellyParams {
        damping: 0.0,
        inner_elasticity: 0.0,
        frame_elasticity: 0.0,
        gravity: Vec3::ZERO,
        ..JellyParams::default()
    }
}

fn lattice_center(jelly: &Jelly) -> Vec3 {
    jelly.control_point_positions().iter().copied().sum::<Vec3>() / LATTICE_POINTS as f32
}

#[test]
fn reset_places_uniform_lattice() {
    let mut jelly = Jelly::with_seed(7);
    JellyParams {
        size: 3.0,
        ..JellyParams::default()
    }
    .reset(&mut jelly);

    assert_eq!(
        jelly.control_point_position(ControlPoint::new(0, 0, 0)),
        Vec3::splat(-1.5)
    );
    assert_eq!(
        jelly.control_point_position(ControlPoint::new(3, 3, 3)),
        Vec3::splat(1.5)
    );
    assert_eq!(
        jelly.control_point_position(ControlPoint::new(1, 2, 3)),
        Vec3::new(-0.5, 0.5, 1.5)
    );
    assert!(jelly
        .control_point_velocities()
        .iter()
        .all(|v| *v == Vec3::ZERO));
    assert_abs_diff_eq!(lattice_center(&jelly).length(), 0.0, epsilon = 1e-5);
}

#[test]
fn relaxed_lattice_does_not_drift() {
    let mut jelly = Jelly::with_seed(7);
    relaxed_params().reset(&mut jelly);
    let rest = *jelly.control_point_positions();

    for _ in 0..500 {
        jelly.update(0.01);
    }

    assert_eq!(*jelly.control_point_positions(), rest);
    assert_abs_diff_eq!(jelly.t(), 5.0, epsilon = 1e-3);
}

#[test]
fn elastic_lattice_at_rest_stays_near_rest() {
    let mut jelly = Jelly::with_seed(7);
    JellyParams {
        gravity: Vec3::ZERO,
        ..JellyParams::default()
    }
    .reset(&mut jelly);
    let rest = *jelly.control_point_positions();

    for _ in 0..1000 {
        jelly.update(0.001);
    }

    for (now, then) in jelly.control_point_positions().iter().zip(rest.iter()) {
        assert!((*now - *then).length() < 1e-3);
    }
}

#[test]
fn distort_changes_velocities_only() {
    let mut jelly = Jelly::with_seed(11);
    JellyParams::default().reset(&mut jelly);
    let positions = *jelly.control_point_positions();

    jelly.distort();

    assert_eq!(*jelly.control_point_positions(), positions);
    assert!(jelly
        .control_point_velocities()
        .iter()
        .all(|v| v.x != 0.0 && v.y != 0.0 && v.z != 0.0));
}

#[test]
fn distort_is_reproducible_with_seed() {
    let mut a = Jelly::with_seed(3);
    let mut b = Jelly::with_seed(3);
    JellyParams::default().reset(&mut a);
    JellyParams::default().reset(&mut b);

    a.distort();
    b.distort();

    assert_eq!(a.control_point_velocities(), b.control_point_velocities());
}

#[test]
fn zero_distortion_leaves_lattice_still() {
    let mut jelly = Jelly::with_seed(3);
    JellyParams {
        distortion: 0.0,
        ..JellyParams::default()
    }
    .reset(&mut jelly);

    jelly.distort();

    assert!(jelly
        .control_point_velocities()
        .iter()
        .all(|v| *v == Vec3::ZERO));
}

#[test]
fn falling_jelly_stays_inside_box() {
    let mut jelly = Jelly::with_seed(5);
    let bounds = BoundingBox::from_offsets([-1.0, 1.0, -0.75, 1.0, -1.0, 1.0]);
    JellyParams {
        gravity: Vec3::new(0.0, -9.81, 0.0),
        frame_springs_enabled: false,
        bounding_box: bounds,
        collision_elasticity: 0.8,
        ..JellyParams::default()
    }
    .reset(&mut jelly);

    let mut touched_floor = false;
    for _ in 0..2000 {
        jelly.update(0.001);
        for position in jelly.control_point_positions() {
            assert!(bounds.contains(*position), "escaped: {position}");
            touched_floor |= position.y < -0.7;
        }
    }
    assert!(touched_floor);
}

#[test]
fn frame_springs_drag_lattice_towards_frame() {
    let mut jelly = Jelly::with_seed(5);
    let params = JellyParams {
        frame_elasticity: 100.0,
        damping: 5.0,
        ..JellyParams::default()
    };
    params.reset(&mut jelly);

    JellyParams {
        frame_position: Vec3::new(1.0, 0.0, 0.0),
        ..params
    }
    .apply_frame(&mut jelly);

    for _ in 0..3000 {
        jelly.update(0.001);
    }

    let center = lattice_center(&jelly);
    assert!(center.x > 0.5, "center {center}");
    assert_abs_diff_eq!(center.y, 0.0, epsilon = 1e-3);
    assert_abs_diff_eq!(center.z, 0.0, epsilon = 1e-3);
}

#[test]
fn disabled_frame_springs_ignore_frame() {
    let mut jelly = Jelly::with_seed(5);
    let params = JellyParams {
        frame_elasticity: 100.0,
        frame_springs_enabled: false,
        frame_position: Vec3::new(1.0, 0.0, 0.0),
        ..relaxed_params()
    };
    params.reset(&mut jelly);
    let rest = *jelly.control_point_positions();

    for _ in 0..100 {
        jelly.update(0.01);
    }

    assert_eq!(*jelly.control_point_positions(), rest);
}

#[test]
fn rotated_frame_moves_corners() {
    let mut jelly = Jelly::with_seed(5);
    JellyParams {
        frame_orientation: Vec3::new(0.0, 0.0, 90.0),
        ..JellyParams::default()
    }
    .apply_to(&mut jelly);

    // a quarter turn about z maps (-h,-h,-h) onto (+h,-h,-h)
    let corner = jelly.frame_corners()[0];
    assert_abs_diff_eq!(corner.x, 0.5, epsilon = 1e-5);
    assert_abs_diff_eq!(corner.y, -0.5, epsilon = 1e-5);
    assert_abs_diff_eq!(corner.z, -0.5, epsilon = 1e-5);
}

#[test]
fn collision_elasticity_is_clamped() {
    let mut jelly = Jelly::with_seed(5);
    jelly.set_collision_elasticity(3.0);
    assert_eq!(jelly.collider().elasticity(), 1.0);
    jelly.set_collision_elasticity(-1.0);
    assert_eq!(jelly.collider().elasticity(), 0.0);
    jelly.set_collision_model(CollisionModel::FullVelocityDamping);
    assert_eq!(jelly.collider().model, CollisionModel::FullVelocityDamping);
}
