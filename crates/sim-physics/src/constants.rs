//! Physical constants and defaults shared by the simulated bodies
//!
//! Values mirror what the control panels start with, so a freshly created body
//! is immediately usable without a parameter transaction.

/// Standard gravitational acceleration (m/s²)
pub const GRAVITY: f32 = 9.81;

/// Control points along one edge of the jelly lattice
pub const LATTICE_EDGE: usize = 4;

/// Total control points in the jelly lattice (4 × 4 × 4)
pub const LATTICE_POINTS: usize = LATTICE_EDGE * LATTICE_EDGE * LATTICE_EDGE;

/// Lattice corners anchored to the control frame
pub const LATTICE_CORNERS: usize = 8;

/// Upper bound on plane reflections applied to a single point in one step.
/// One per bounding face; anything left outside afterwards is clamped.
pub const MAX_COLLISION_PASSES: usize = 6;

/// Smallest mass accepted by the bodies. Guards the `F / m` in every RK4 stage.
pub const MIN_MASS: f32 = 1.0e-6;

/// Diagonal entry of the cube inertia tensor about a corner (per unit size⁵·density)
pub const INERTIA_DIAGONAL: f32 = 2.0 / 3.0;

/// Off-diagonal entry of the cube inertia tensor about a corner
pub const INERTIA_OFF_DIAGONAL: f32 = -1.0 / 4.0;

/// Half extent of the default jelly bounding box
pub const DEFAULT_BOX_HALF_EXTENT: f32 = 2.0;
