//! Soft-body jelly: 64 mass points joined by a spring lattice
//!
//! Each step integrates every control point with its own RK4 pass. The four stages
//! perturb only the point being integrated; neighbours are always read from the
//! start-of-step buffers, which stay untouched until every point has been advanced.
//! Boundary collisions are resolved on the candidate state before it is committed.

use crate::collision::{BoundingBox, Collider, CollisionModel};
use crate::constants::{LATTICE_CORNERS, LATTICE_POINTS, MIN_MASS};
use crate::frame::ControlFrame;
use crate::lattice::{self, ControlPoint, SpringKind, SpringTable};
use crate::spring::SpringElement;
use crate::vertex::PointVertex;
use crate::Simulatable;
use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

pub struct Jelly {
    t: f32,
    mass: f32,
    damping: f32,
    inner_elasticity: f32,
    frame_elasticity: f32,
    size: f32,
    distortion: f32,
    frame_springs_enabled: bool,
    gravity: Vec3,
    frame: ControlFrame,
    frame_corners: [Vec3; LATTICE_CORNERS],
    collider: Collider,
    springs: SpringTable,
    positions: [Vec3; LATTICE_POINTS],
    velocities: [Vec3; LATTICE_POINTS],
    rng: StdRng,
}

impl Jelly {
    /// A unit lattice at rest with every coefficient zeroed; parameters are expected to
    /// arrive through a parameter transaction before the first step.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Same as [`Jelly::new`] with a reproducible distortion sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut jelly = Self {
            t: 0.0,
            mass: 1.0,
            damping: 0.0,
            inner_elasticity: 0.0,
            frame_elasticity: 0.0,
            size: 1.0,
            distortion: 0.0,
            frame_springs_enabled: true,
            gravity: Vec3::ZERO,
            frame: ControlFrame::default(),
            frame_corners: [Vec3::ZERO; LATTICE_CORNERS],
            collider: Collider::default(),
            springs: SpringTable::new(),
            positions: [Vec3::ZERO; LATTICE_POINTS],
            velocities: [Vec3::ZERO; LATTICE_POINTS],
            rng,
        };
        jelly.update_frame_corners();
        jelly.reset();
        jelly
    }

    /// Puts every control point back on the uniform lattice and zeroes velocities and time.
    pub fn reset(&mut self) {
        self.t = 0.0;
        for point in ControlPoint::all() {
            self.positions[point.index()] = lattice::rest_position(point, self.size);
        }
        self.velocities = [Vec3::ZERO; LATTICE_POINTS];
        log::debug!("jelly reset (size {})", self.size);
    }

    /// Kicks every control point with independent Gaussian velocity noise.
    /// Positions are left as they are.
    pub fn distort(&mut self) {
        let Ok(noise) = Normal::new(0.0, self.distortion) else {
            return;
        };
        for velocity in self.velocities.iter_mut() {
            *velocity += Vec3::new(
                noise.sample(&mut self.rng),
                noise.sample(&mut self.rng),
                noise.sample(&mut self.rng),
            );
        }
        log::debug!("jelly distorted (sigma {})", self.distortion);
    }

    pub fn t(&self) -> f32 {
        self.t
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn frame(&self) -> &ControlFrame {
        &self.frame
    }

    pub fn frame_corners(&self) -> &[Vec3; LATTICE_CORNERS] {
        &self.frame_corners
    }

    pub fn frame_springs_enabled(&self) -> bool {
        self.frame_springs_enabled
    }

    pub fn collider(&self) -> &Collider {
        &self.collider
    }

    pub fn springs(&self) -> &SpringTable {
        &self.springs
    }

    pub fn control_point_positions(&self) -> &[Vec3; LATTICE_POINTS] {
        &self.positions
    }

    pub fn control_point_velocities(&self) -> &[Vec3; LATTICE_POINTS] {
        &self.velocities
    }

    pub fn control_point_position(&self, point: ControlPoint) -> Vec3 {
        self.positions[point.index()]
    }

    pub fn control_point_velocity(&self, point: ControlPoint) -> Vec3 {
        self.velocities[point.index()]
    }

    /// Control point positions packed for buffer upload.
    pub fn vertices(&self) -> [PointVertex; LATTICE_POINTS] {
        std::array::from_fn(|index| PointVertex::from(self.positions[index]))
    }

    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass.max(MIN_MASS);
    }

    pub fn set_damping(&mut self, damping: f32) {
        self.damping = damping;
    }

    pub fn set_inner_spring_elasticity(&mut self, elasticity: f32) {
        self.inner_elasticity = elasticity;
    }

    pub fn set_frame_spring_elasticity(&mut self, elasticity: f32) {
        self.frame_elasticity = elasticity;
    }

    /// Changes the lattice edge length. Rest lengths and frame corners follow;
    /// control points only move on the next [`Jelly::reset`].
    pub fn set_size(&mut self, size: f32) {
        self.size = size;
        self.update_frame_corners();
    }

    pub fn toggle_frame_springs(&mut self, enabled: bool) {
        self.frame_springs_enabled = enabled;
    }

    pub fn set_frame_position(&mut self, position: Vec3) {
        self.frame.position = position;
        self.update_frame_corners();
    }

    pub fn set_frame_orientation(&mut self, orientation: Quat) {
        self.frame.orientation = orientation.normalize();
        self.update_frame_corners();
    }

    /// Frame orientation from XYZ Euler angles in degrees.
    pub fn set_frame_orientation_euler(&mut self, degrees: Vec3) {
        self.set_frame_orientation(ControlFrame::orientation_from_euler_degrees(degrees));
    }

    pub fn set_gravitational_acceleration(&mut self, acceleration: Vec3) {
        self.gravity = acceleration;
    }

    /// Standard deviation of the [`Jelly::distort`] velocity kick, clamped to `>= 0`.
    pub fn set_distortion_amount(&mut self, amount: f32) {
        self.distortion = if amount.is_finite() {
            amount.max(0.0)
        } else {
            0.0
        };
    }

    pub fn set_bounding_box(&mut self, bounds: BoundingBox) {
        self.collider.bounds = bounds;
    }

    /// Restitution applied on impact, clamped to `[0, 1]`.
    pub fn set_collision_elasticity(&mut self, elasticity: f32) {
        self.collider.set_elasticity(elasticity);
    }

    pub fn set_collision_model(&mut self, model: CollisionModel) {
        self.collider.model = model;
    }

    fn update_frame_corners(&mut self) {
        self.frame_corners = self.frame.corners(self.size);
    }

    fn integrate_point(&self, index: usize, dt: f32) -> (Vec3, Vec3) {
        let position = self.positions[index];
        let velocity = self.velocities[index];
        let half = dt / 2.0;
        let acceleration = |x: Vec3, v: Vec3| self.force(index, x, v) / self.mass;

        let k1x = velocity;
        let k1v = acceleration(position, velocity);

        let k2x = velocity + k1v * half;
        let k2v = acceleration(position + k1x * half, velocity + k1v * half);

        let k3x = velocity + k2v * half;
        let k3v = acceleration(position + k2x * half, velocity + k2v * half);

        let k4x = velocity + k3v * dt;
        let k4v = acceleration(position + k3x * dt, velocity + k3v * dt);

        (
            position + dt / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x),
            velocity + dt / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v),
        )
    }

    // Force on control point `index` if it sat at `position` with `velocity` while the
    // rest of the lattice stays at the start-of-step state.
    fn force(&self, index: usize, position: Vec3, velocity: Vec3) -> Vec3 {
        let mut force = self.gravity * self.mass - self.damping * velocity;

        for neighbour in self.springs.neighbours(index) {
            let spring = SpringElement::new(
                neighbour.kind.rest_length(self.size),
                self.inner_elasticity,
            );
            force += spring.force(position, self.positions[neighbour.index]);
        }

        if self.frame_springs_enabled {
            if let Some(slot) = lattice::corner_slot(index) {
                let spring = SpringElement::new(0.0, self.frame_elasticity);
                force += spring.force(position, self.frame_corners[slot]);
            }
        }

        force
    }

    /// Rest length of a spring of the given kind at the current size.
    pub fn rest_length(&self, kind: SpringKind) -> f32 {
        kind.rest_length(self.size)
    }
}

impl Default for Jelly {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulatable for Jelly {
    fn update(&mut self, dt: f32) {
        let mut next_positions = [Vec3::ZERO; LATTICE_POINTS];
        let mut next_velocities = [Vec3::ZERO; LATTICE_POINTS];

        for index in 0..LATTICE_POINTS {
            let (position, velocity) = self.integrate_point(index, dt);
            let (position, velocity) =
                self.collider.resolve(self.positions[index], position, velocity);
            next_positions[index] = position;
            next_velocities[index] = velocity;
        }

        self.positions = next_positions;
        self.velocities = next_velocities;
        self.t += dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_corners_coincide_with_lattice_corners_at_rest() {
        let jelly = Jelly::with_seed(1);
        for (slot, &index) in lattice::CORNER_INDICES.iter().enumerate() {
            let corner = jelly.frame_corners()[slot];
            assert!((corner - jelly.control_point_positions()[index]).length() < 1e-6);
        }
    }

    #[test]
    fn rest_lattice_feels_no_spring_force() {
        let mut jelly = Jelly::with_seed(1);
        jelly.set_inner_spring_elasticity(50.0);
        jelly.set_frame_spring_elasticity(50.0);
        for index in 0..LATTICE_POINTS {
            let force = jelly.force(index, jelly.positions[index], Vec3::ZERO);
            assert!(force.length() < 1e-4, "point {index}: {force}");
        }
    }
}
