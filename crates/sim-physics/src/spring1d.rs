//! Damped 1-D mass on a spring with a moving anchor and an external field
//!
//! Equation of motion: `m·x'' = k·(w(t) − x) − c·x' + h(t)` where `w` is the rest
//! position profile and `h` the field force profile.

use crate::constants::MIN_MASS;
use crate::forcing::ForcingFunction;
use crate::Simulatable;

#[derive(Debug, Clone)]
pub struct Spring1D {
    t: f32,
    rest_position: f32,
    position: f32,
    velocity: f32,
    acceleration: f32,
    field_force: f32,
    elasticity_force: f32,
    damping_force: f32,

    mass: f32,
    elasticity: f32,
    damping: f32,
    rest_position_function: ForcingFunction,
    field_force_function: ForcingFunction,
}

impl Spring1D {
    pub fn new(
        mass: f32,
        elasticity: f32,
        damping: f32,
        rest_position_function: ForcingFunction,
        field_force_function: ForcingFunction,
    ) -> Self {
        let mut spring = Self {
            t: 0.0,
            rest_position: 0.0,
            position: 0.0,
            velocity: 0.0,
            acceleration: 0.0,
            field_force: 0.0,
            elasticity_force: 0.0,
            damping_force: 0.0,
            mass: mass.max(MIN_MASS),
            elasticity,
            damping,
            rest_position_function,
            field_force_function,
        };
        spring.reset(0.0, 0.0);
        spring
    }

    /// Sets initial conditions and rewinds time. Derived forces read zero until the next step.
    pub fn reset(&mut self, position: f32, velocity: f32) {
        self.t = 0.0;
        self.position = position;
        self.velocity = velocity;
        self.rest_position = self.rest_position_function.evaluate(0.0);
        self.acceleration = 0.0;
        self.field_force = 0.0;
        self.elasticity_force = 0.0;
        self.damping_force = 0.0;
    }

    pub fn t(&self) -> f32 {
        self.t
    }

    pub fn rest_position(&self) -> f32 {
        self.rest_position
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    pub fn field_force(&self) -> f32 {
        self.field_force
    }

    pub fn elasticity_force(&self) -> f32 {
        self.elasticity_force
    }

    pub fn damping_force(&self) -> f32 {
        self.damping_force
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn elasticity(&self) -> f32 {
        self.elasticity
    }

    /// Kinetic plus elastic energy relative to the current rest position.
    pub fn mechanical_energy(&self) -> f32 {
        let stretch = self.position - self.rest_position;
        0.5 * self.mass * self.velocity * self.velocity + 0.5 * self.elasticity * stretch * stretch
    }

    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass.max(MIN_MASS);
    }

    pub fn set_elasticity(&mut self, elasticity: f32) {
        self.elasticity = elasticity;
    }

    pub fn set_damping(&mut self, damping: f32) {
        self.damping = damping;
    }

    pub fn set_rest_position_function(&mut self, function: ForcingFunction) {
        self.rest_position_function = function;
    }

    pub fn set_field_force_function(&mut self, function: ForcingFunction) {
        self.field_force_function = function;
    }

    fn acceleration_at(&self, t: f32, position: f32, velocity: f32) -> f32 {
        let rest = self.rest_position_function.evaluate(t);
        let field = self.field_force_function.evaluate(t);
        (self.elasticity * (rest - position) - self.damping * velocity + field) / self.mass
    }
}

impl Default for Spring1D {
    fn default() -> Self {
        Self::new(
            1.0,
            0.0,
            0.0,
            ForcingFunction::default(),
            ForcingFunction::default(),
        )
    }
}

impl Simulatable for Spring1D {
    fn update(&mut self, dt: f32) {
        let (t, x, v) = (self.t, self.position, self.velocity);
        let half = dt / 2.0;

        let k1x = v;
        let k1v = self.acceleration_at(t, x, v);

        let k2x = v + k1v * half;
        let k2v = self.acceleration_at(t + half, x + k1x * half, v + k1v * half);

        let k3x = v + k2v * half;
        let k3v = self.acceleration_at(t + half, x + k2x * half, v + k2v * half);

        let k4x = v + k3v * dt;
        let k4v = self.acceleration_at(t + dt, x + k3x * dt, v + k3v * dt);

        self.position += dt / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity += dt / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
        self.t += dt;

        self.rest_position = self.rest_position_function.evaluate(self.t);
        self.field_force = self.field_force_function.evaluate(self.t);
        self.elasticity_force = self.elasticity * (self.rest_position - self.position);
        self.damping_force = -self.damping * self.velocity;
        self.acceleration =
            (self.elasticity_force + self.damping_force + self.field_force) / self.mass;
    }
}
