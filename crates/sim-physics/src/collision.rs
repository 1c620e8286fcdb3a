//! Axis-aligned bounding volume and the boundary collision response
//!
//! A point that leaves the box during a step is traced back to the face it
//! crossed, its overshoot is mirrored back inside and the reversed velocity
//! component is scaled by the collision elasticity. Corner and edge hits are
//! handled by repeating the test from the crossing point, one face at a time.

use crate::constants::{DEFAULT_BOX_HALF_EXTENT, MAX_COLLISION_PASSES};
use glam::Vec3;

/// How an impact dissipates velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionModel {
    /// Every velocity component is scaled by the elasticity coefficient.
    FullVelocityDamping,
    /// Only the component along the face normal is scaled.
    #[default]
    VelocityComponentDamping,
}

/// Axis-aligned box given by its six face offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min: Vec3,
    max: Vec3,
}

/// One face of a [`BoundingBox`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Index of the axis the face is perpendicular to (0 = x, 1 = y, 2 = z)
    pub axis: usize,
    /// Plane offset along `axis`
    pub offset: f32,
    /// Unit normal pointing into the box
    pub normal: Vec3,
}

impl BoundingBox {
    /// Builds a box from two corners. Components are sorted per axis so that `min <= max` holds.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Builds a box from `[−x, +x, −y, +y, −z, +z]` face offsets.
    pub fn from_offsets(offsets: [f32; 6]) -> Self {
        Self::new(
            Vec3::new(offsets[0], offsets[2], offsets[4]),
            Vec3::new(offsets[1], offsets[3], offsets[5]),
        )
    }

    /// A cube of half extent `half` centred at the origin.
    pub fn cube(half: f32) -> Self {
        Self::new(Vec3::splat(-half.abs()), Vec3::splat(half.abs()))
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Face offsets in `[−x, +x, −y, +y, −z, +z]` order.
    pub fn offsets(&self) -> [f32; 6] {
        [
            self.min.x, self.max.x, self.min.y, self.max.y, self.min.z, self.max.z,
        ]
    }

    /// The six faces in the fixed test order −x, +x, −y, +y, −z, +z.
    pub fn faces(&self) -> [Face; 6] {
        let mut faces = [Face {
            axis: 0,
            offset: 0.0,
            normal: Vec3::ZERO,
        }; 6];
        for axis in 0..3 {
            let mut normal = Vec3::ZERO;
            normal[axis] = 1.0;
            faces[2 * axis] = Face {
                axis,
                offset: self.min[axis],
                normal,
            };
            faces[2 * axis + 1] = Face {
                axis,
                offset: self.max[axis],
                normal: -normal,
            };
        }
        faces
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn clamp(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    /// First face (in test order) that `point` lies beyond.
    pub fn first_violated_face(&self, point: Vec3) -> Option<Face> {
        self.faces().into_iter().find(|face| face.is_violated_by(point))
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::cube(DEFAULT_BOX_HALF_EXTENT)
    }
}

impl Face {
    /// True when `point` lies strictly outside the box across this face.
    pub fn is_violated_by(&self, point: Vec3) -> bool {
        (point[self.axis] - self.offset) * self.normal[self.axis] < 0.0
    }
}

/// Collision response against a [`BoundingBox`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub bounds: BoundingBox,
    elasticity: f32,
    pub model: CollisionModel,
}

impl Collider {
    pub fn new(bounds: BoundingBox, elasticity: f32, model: CollisionModel) -> Self {
        let mut collider = Self {
            bounds,
            elasticity: 0.0,
            model,
        };
        collider.set_elasticity(elasticity);
        collider
    }

    pub fn elasticity(&self) -> f32 {
        self.elasticity
    }

    /// Sets the restitution coefficient, clamped to `[0, 1]`.
    pub fn set_elasticity(&mut self, elasticity: f32) {
        self.elasticity = if elasticity.is_nan() {
            0.0
        } else {
            elasticity.clamp(0.0, 1.0)
        };
    }

    /// Resolves the move `start → end` (arriving with `velocity`) against the box.
    ///
    /// Returns the corrected position and velocity. The position is always inside or on
    /// the box, even when the pass budget runs out before every face is satisfied.
    pub fn resolve(&self, start: Vec3, end: Vec3, velocity: Vec3) -> (Vec3, Vec3) {
        let mut from = start;
        let mut position = end;
        let mut velocity = velocity;

        for _ in 0..MAX_COLLISION_PASSES {
            let Some(face) = self.bounds.first_violated_face(position) else {
                return (position, velocity);
            };

            let crossing = crossing_point(from, position, &face);
            position = crossing + (position - crossing).reflect(face.normal);
            velocity = self.damp(velocity, face.axis);
            from = crossing;
        }

        if !self.bounds.contains(position) {
            log::trace!("collision pass budget exhausted, clamping {position}");
        }
        (self.bounds.clamp(position), velocity)
    }

    fn damp(&self, velocity: Vec3, axis: usize) -> Vec3 {
        let mut damped = match self.model {
            CollisionModel::FullVelocityDamping => velocity * self.elasticity,
            CollisionModel::VelocityComponentDamping => velocity,
        };
        damped[axis] = -self.elasticity * velocity[axis];
        damped
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self::new(BoundingBox::default(), 0.5, CollisionModel::default())
    }
}

// Where the segment `from → to` meets the face plane. A segment running parallel to
// the plane (its start already outside) is projected onto the plane instead.
fn crossing_point(from: Vec3, to: Vec3, face: &Face) -> Vec3 {
    let travel = to - from;
    let along = travel[face.axis];
    let t = if along != 0.0 {
        ((face.offset - from[face.axis]) / along).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let mut crossing = from + travel * t;
    crossing[face.axis] = face.offset;
    crossing
}
