//! # Simulation Scheduler
//!
//! Runs any [`Simulatable`] body on its own worker thread at a fixed cadence. The
//! worker owns the body; the host talks to it through commands and sees it only
//! through the step callback. Also provides the host-side command queue.

pub mod error;
pub mod params;
pub mod queue;
pub mod scheduler;

pub use error::*;
pub use params::*;
pub use queue::*;
pub use scheduler::*;

pub use sim_physics::Simulatable;
