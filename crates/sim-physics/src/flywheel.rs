//! Crank-slider: a flywheel driving a piston through a rod of noisy length
//!
//! Piston kinematics come straight from the geometry; velocity and acceleration are
//! backward differences, so rod-length noise shows up amplified in both.

use crate::Simulatable;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::f32::consts::TAU;

#[derive(Debug, Clone)]
pub struct Flywheel {
    t: f32,
    piston_position: f32,
    piston_velocity: f32,
    piston_acceleration: f32,
    angle: f32,
    angular_velocity: f32,
    length: f32,
    current_length: f32,
    radius: f32,
    standard_deviation: f32,
    rng: StdRng,
}

impl Flywheel {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut flywheel = Self {
            t: 0.0,
            piston_position: 0.0,
            piston_velocity: 0.0,
            piston_acceleration: 0.0,
            angle: 0.0,
            angular_velocity: 0.0,
            length: 0.0,
            current_length: 0.0,
            radius: 0.0,
            standard_deviation: 0.0,
            rng,
        };
        flywheel.reset();
        flywheel
    }

    /// Crank at angle zero, piston at its far dead centre and at rest.
    pub fn reset(&mut self) {
        self.t = 0.0;
        self.piston_position = self.length + self.radius;
        self.piston_velocity = 0.0;
        self.piston_acceleration = 0.0;
        self.angle = 0.0;
        self.current_length = self.sample_length();
    }

    pub fn t(&self) -> f32 {
        self.t
    }

    pub fn piston_position(&self) -> f32 {
        self.piston_position
    }

    pub fn piston_velocity(&self) -> f32 {
        self.piston_velocity
    }

    pub fn piston_acceleration(&self) -> f32 {
        self.piston_acceleration
    }

    /// Crank angle in `[0, 2π)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Nominal rod length.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Rod length used in the last step, noise included.
    pub fn current_length(&self) -> f32 {
        self.current_length
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f32) {
        self.angular_velocity = angular_velocity;
    }

    pub fn set_length(&mut self, length: f32) {
        self.length = length;
        self.current_length = length;
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    /// Rod length noise, clamped to `>= 0`.
    pub fn set_standard_deviation(&mut self, standard_deviation: f32) {
        self.standard_deviation = if standard_deviation.is_finite() {
            standard_deviation.max(0.0)
        } else {
            0.0
        };
    }

    fn sample_length(&mut self) -> f32 {
        match Normal::new(0.0, self.standard_deviation) {
            Ok(noise) => self.length + noise.sample(&mut self.rng),
            Err(_) => self.length,
        }
    }
}

impl Default for Flywheel {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulatable for Flywheel {
    fn update(&mut self, dt: f32) {
        let previous_position = self.piston_position;
        let previous_velocity = self.piston_velocity;

        self.angle = (self.angle + self.angular_velocity * dt).rem_euclid(TAU);
        self.current_length = self.sample_length();

        let px = self.angle.cos() * self.radius;
        let py = self.angle.sin() * self.radius;
        let s = py / self.current_length;
        self.piston_position = (1.0 - s * s).max(0.0).sqrt() * self.current_length + px;

        self.piston_velocity = (self.piston_position - previous_position) / dt;
        self.piston_acceleration = (self.piston_velocity - previous_velocity) / dt;
        self.t += dt;
    }
}
