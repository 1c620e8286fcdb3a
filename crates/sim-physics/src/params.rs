//! Parameter sets for runtime tuning
//!
//! Each set is what a control panel edits. `apply_to` is the parameter transaction run
//! against the live body; `reset` additionally restores initial conditions.

use crate::collision::{BoundingBox, CollisionModel};
use crate::constants::GRAVITY;
use crate::flywheel::Flywheel;
use crate::forcing::ForcingFunction;
use crate::jelly::Jelly;
use crate::spring1d::Spring1D;
use crate::whirligig::Whirligig;
use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub mass: f32,
    pub elasticity: f32,
    pub damping: f32,
    pub starting_position: f32,
    pub starting_velocity: f32,
    pub rest_position_function: ForcingFunction,
    pub field_force_function: ForcingFunction,
}

impl SpringParams {
    pub fn apply_to(&self, spring: &mut Spring1D) {
        spring.set_mass(self.mass);
        spring.set_elasticity(self.elasticity);
        spring.set_damping(self.damping);
        spring.set_rest_position_function(self.rest_position_function);
        spring.set_field_force_function(self.field_force_function);
    }

    pub fn reset(&self, spring: &mut Spring1D) {
        self.apply_to(spring);
        spring.reset(self.starting_position, self.starting_velocity);
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            elasticity: 5.0,
            damping: 0.1,
            starting_position: -2.0,
            starting_velocity: 0.0,
            rest_position_function: ForcingFunction::constant(0.0),
            field_force_function: ForcingFunction::constant(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhirligigParams {
    pub cube_size: f32,
    pub cube_density: f32,
    /// Initial tilt of the diagonal, degrees
    pub incline: f32,
    /// Initial spin about the diagonal, rad/s
    pub angular_velocity: f32,
    pub gravity_enabled: bool,
    pub gravity_function: ForcingFunction,
}

impl WhirligigParams {
    pub fn apply_to(&self, whirligig: &mut Whirligig) {
        whirligig.set_cube_size(self.cube_size);
        whirligig.set_cube_density(self.cube_density);
        whirligig.set_gravity(self.gravity_enabled);
        whirligig.set_gravity_function(self.gravity_function);
    }

    pub fn reset(&self, whirligig: &mut Whirligig) {
        self.apply_to(whirligig);
        whirligig.reset(self.incline, self.angular_velocity);
    }
}

impl Default for WhirligigParams {
    fn default() -> Self {
        Self {
            cube_size: 1.0,
            cube_density: 1.0,
            incline: 10.0,
            angular_velocity: 1.0,
            gravity_enabled: true,
            gravity_function: ForcingFunction::constant(GRAVITY),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JellyParams {
    pub mass: f32,
    /// Inner spring elasticity (c1)
    pub inner_elasticity: f32,
    /// Frame spring elasticity (c2)
    pub frame_elasticity: f32,
    /// Velocity damping (k)
    pub damping: f32,
    pub size: f32,
    pub distortion: f32,
    pub frame_springs_enabled: bool,
    pub frame_position: Vec3,
    /// XYZ Euler angles, degrees
    pub frame_orientation: Vec3,
    pub gravity: Vec3,
    pub bounding_box: BoundingBox,
    pub collision_elasticity: f32,
    pub collision_model: CollisionModel,
}

impl JellyParams {
    pub fn apply_to(&self, jelly: &mut Jelly) {
        jelly.set_mass(self.mass);
        jelly.set_damping(self.damping);
        jelly.set_inner_spring_elasticity(self.inner_elasticity);
        jelly.set_frame_spring_elasticity(self.frame_elasticity);
        jelly.set_size(self.size);
        jelly.toggle_frame_springs(self.frame_springs_enabled);
        jelly.set_gravitational_acceleration(self.gravity);
        jelly.set_distortion_amount(self.distortion);
        jelly.set_bounding_box(self.bounding_box);
        jelly.set_collision_elasticity(self.collision_elasticity);
        jelly.set_collision_model(self.collision_model);
        self.apply_frame(jelly);
    }

    /// Moves the control frame only; used while the user drags the frame around.
    pub fn apply_frame(&self, jelly: &mut Jelly) {
        jelly.set_frame_position(self.frame_position);
        jelly.set_frame_orientation_euler(self.frame_orientation);
    }

    pub fn reset(&self, jelly: &mut Jelly) {
        self.apply_to(jelly);
        jelly.reset();
    }
}

impl Default for JellyParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            inner_elasticity: 10.0,
            frame_elasticity: 10.0,
            damping: 0.5,
            size: 1.0,
            distortion: 1.0,
            frame_springs_enabled: true,
            frame_position: Vec3::ZERO,
            frame_orientation: Vec3::ZERO,
            gravity: Vec3::ZERO,
            bounding_box: BoundingBox::default(),
            collision_elasticity: 0.5,
            collision_model: CollisionModel::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlywheelParams {
    pub angular_velocity: f32,
    pub radius: f32,
    pub length: f32,
    pub standard_deviation: f32,
}

impl FlywheelParams {
    pub fn apply_to(&self, flywheel: &mut Flywheel) {
        flywheel.set_angular_velocity(self.angular_velocity);
        flywheel.set_radius(self.radius);
        flywheel.set_length(self.length);
        flywheel.set_standard_deviation(self.standard_deviation);
    }

    pub fn reset(&self, flywheel: &mut Flywheel) {
        self.apply_to(flywheel);
        flywheel.reset();
    }
}

impl Default for FlywheelParams {
    fn default() -> Self {
        Self {
            angular_velocity: 1.0,
            radius: 1.0,
            length: 2.0,
            standard_deviation: 0.0,
        }
    }
}
