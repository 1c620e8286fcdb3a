//! Spinning cube balanced on one corner (heavy symmetric top)
//!
//! Angular velocity lives in the body frame and follows Euler's equation
//! `I·ω' = τ + (I·ω) × ω`, with `τ` the gravity torque about the supporting corner.
//! Orientation follows `q' = q · (0, ω/2)` and is renormalised after every step.

use crate::constants::{INERTIA_DIAGONAL, INERTIA_OFF_DIAGONAL};
use crate::forcing::ForcingFunction;
use crate::vertex::PointVertex;
use crate::Simulatable;
use glam::{Mat3, Quat, Vec3};

#[derive(Debug, Clone)]
pub struct Whirligig {
    t: f32,
    cube_size: f32,
    cube_density: f32,
    gravity_enabled: bool,
    orientation: Quat,
    tilt: Quat,
    angular_velocity: Vec3,
    gravity: f32,
    inertia: Mat3,
    inertia_inv: Mat3,
    gravity_function: ForcingFunction,
}

impl Whirligig {
    pub fn new(
        tilt_degrees: f32,
        angular_speed: f32,
        cube_size: f32,
        cube_density: f32,
        gravity_function: ForcingFunction,
    ) -> Self {
        let mut whirligig = Self {
            t: 0.0,
            cube_size,
            cube_density,
            gravity_enabled: true,
            orientation: Quat::IDENTITY,
            tilt: Quat::IDENTITY,
            angular_velocity: Vec3::ZERO,
            gravity: 0.0,
            inertia: Mat3::ZERO,
            inertia_inv: Mat3::ZERO,
            gravity_function,
        };
        whirligig.update_inertia_tensor();
        whirligig.reset(tilt_degrees, angular_speed);
        whirligig
    }

    /// Stands the cube on its corner, tilted by `tilt_degrees` about +Z, spinning about
    /// its diagonal at `angular_speed`.
    pub fn reset(&mut self, tilt_degrees: f32, angular_speed: f32) {
        self.t = 0.0;
        self.tilt = Quat::from_axis_angle(Vec3::Z, tilt_degrees.to_radians());
        self.orientation = self.tilt * Quat::from_xyzw(1.0, 1.0, 1.0, 1.0).normalize();
        self.angular_velocity = angular_speed * Vec3::ONE.normalize();
        self.gravity = self.gravity_function.evaluate(self.t);
        log::debug!("whirligig reset (tilt {tilt_degrees}°, spin {angular_speed})");
    }

    pub fn t(&self) -> f32 {
        self.t
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Body-frame angular velocity.
    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    /// Current gravity magnitude `g(t)`.
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn cube_size(&self) -> f32 {
        self.cube_size
    }

    pub fn cube_density(&self) -> f32 {
        self.cube_density
    }

    pub fn gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    pub fn inertia_tensor(&self) -> Mat3 {
        self.inertia
    }

    /// World-space tip of the body diagonal, measured from the supporting corner.
    pub fn diagonal(&self) -> Vec3 {
        self.orientation * Vec3::splat(self.cube_size)
    }

    pub fn mass_center(&self) -> Vec3 {
        0.5 * self.diagonal()
    }

    pub fn diagonal_vertex(&self) -> PointVertex {
        PointVertex::from(self.diagonal())
    }

    /// Rotational kinetic energy `½ ω·(I·ω)`.
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.angular_velocity.dot(self.inertia * self.angular_velocity)
    }

    pub fn set_cube_size(&mut self, size: f32) {
        self.cube_size = size;
        self.update_inertia_tensor();
    }

    pub fn set_cube_density(&mut self, density: f32) {
        self.cube_density = density;
        self.update_inertia_tensor();
    }

    pub fn set_gravity_function(&mut self, function: ForcingFunction) {
        self.gravity_function = function;
    }

    pub fn set_gravity(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
    }

    fn update_inertia_tensor(&mut self) {
        let d = INERTIA_DIAGONAL;
        let o = INERTIA_OFF_DIAGONAL;
        let base = Mat3::from_cols_array(&[d, o, o, o, d, o, o, o, d]);
        self.inertia = base * (self.cube_size.powi(5) * self.cube_density);
        // A degenerate cube has no rotational response rather than an infinite one.
        self.inertia_inv = if self.inertia.determinant().is_normal() {
            self.inertia.inverse()
        } else {
            Mat3::ZERO
        };
    }

    /// Gravity torque about the supporting corner, expressed in the body frame.
    fn torque(&self) -> Vec3 {
        if !self.gravity_enabled {
            return Vec3::ZERO;
        }
        let lever = self.orientation * Vec3::splat(self.cube_size / 2.0);
        let gravity = self.gravity * Vec3::NEG_ONE.normalize();
        self.orientation.inverse() * lever.cross(gravity)
    }
}

impl Default for Whirligig {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, ForcingFunction::default())
    }
}

impl Simulatable for Whirligig {
    fn update(&mut self, dt: f32) {
        let h = dt;
        let torque = self.torque();
        let rate = |w: Vec3| self.inertia_inv * (torque + (self.inertia * w).cross(w));

        let w = self.angular_velocity;
        let k1w = rate(w);
        let k2w = rate(w + k1w * h / 2.0);
        let k3w = rate(w + k2w * h / 2.0);
        let k4w = rate(w + k3w * h);
        self.angular_velocity += h / 6.0 * (k1w + 2.0 * k2w + 2.0 * k3w + k4w);

        let half_w = self.angular_velocity / 2.0;
        let spin = Quat::from_xyzw(half_w.x, half_w.y, half_w.z, 0.0);
        let q = self.orientation;
        let k1q = q * spin;
        let k2q = (q + k1q * (h / 2.0)) * spin;
        let k3q = (q + k2q * (h / 2.0)) * spin;
        let k4q = (q + k3q * h) * spin;
        self.orientation = (q + (k1q + k2q * 2.0 + k3q * 2.0 + k4q) * (h / 6.0)).normalize();

        self.t += dt;
        self.gravity = self.gravity_function.evaluate(self.t);
    }
}
