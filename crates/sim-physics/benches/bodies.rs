//! Benchmarks for the simulated bodies.

use criterion::{criterion_group, criterion_main, Criterion};
use sim_physics::*;

fn bench_spring_update(c: &mut Criterion) {
    c.bench_function("spring1d_1000_steps", |b| {
        b.iter(|| {
            let mut spring = Spring1D::default();
            SpringParams {
                field_force_function: ForcingFunction::sine(1.0, 2.0, 0.0),
                ..SpringParams::default()
            }
            .reset(&mut spring);
            for _ in 0..1000 {
                spring.update(0.01);
            }
            spring.position()
        });
    });
}

fn bench_whirligig_update(c: &mut Criterion) {
    c.bench_function("whirligig_1000_steps", |b| {
        b.iter(|| {
            let mut top = Whirligig::default();
            WhirligigParams::default().reset(&mut top);
            for _ in 0..1000 {
                top.update(0.01);
            }
            top.orientation()
        });
    });
}

fn bench_jelly_update(c: &mut Criterion) {
    c.bench_function("jelly_100_steps", |b| {
        b.iter(|| {
            let mut jelly = Jelly::with_seed(42);
            JellyParams {
                gravity: glam::Vec3::new(0.0, -9.81, 0.0),
                ..JellyParams::default()
            }
            .reset(&mut jelly);
            jelly.distort();
            for _ in 0..100 {
                jelly.update(0.001);
            }
            jelly.control_point_positions()[0]
        });
    });
}

criterion_group!(
    benches,
    bench_spring_update,
    bench_whirligig_update,
    bench_jelly_update
);
criterion_main!(benches);
