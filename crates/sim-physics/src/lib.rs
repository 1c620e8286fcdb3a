//! # Rigid and Soft Body Physics
//!
//! Physical states for the interactive simulations: a driven 1-D spring, a spinning
//! cube balanced on its corner, a 64-point jelly cube with boundary collisions and a
//! flywheel-piston mechanism. Every body advances through [`Simulatable::update`]
//! and knows nothing about threads or pacing.

pub mod collision;
pub mod constants;
pub mod flywheel;
pub mod forcing;
pub mod frame;
pub mod jelly;
pub mod lattice;
pub mod params;
pub mod spring;
pub mod spring1d;
pub mod vertex;
pub mod whirligig;

pub use collision::*;
pub use constants::*;
pub use flywheel::*;
pub use forcing::*;
pub use frame::*;
pub use jelly::*;
pub use lattice::{ControlPoint, SpringKind, SpringTable};
pub use params::*;
pub use spring::*;
pub use spring1d::*;
pub use vertex::*;
pub use whirligig::*;

/// A physical state that can be advanced by a fixed time step.
pub trait Simulatable: Send + 'static {
    /// Advance the state by `dt` seconds.
    fn update(&mut self, dt: f32);
}
