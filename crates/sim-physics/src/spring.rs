//! Hooke spring between two points

use glam::Vec3;

/// Stateless force law: `elasticity · (|to − from| − rest_length)` along `from → to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringElement {
    pub rest_length: f32,
    pub elasticity: f32,
}

impl SpringElement {
    pub fn new(rest_length: f32, elasticity: f32) -> Self {
        Self {
            rest_length,
            elasticity,
        }
    }

    /// Force exerted on the point at `from` by a spring attached at `to`.
    ///
    /// A stretched spring pulls `from` towards `to`, a compressed one pushes it away.
    /// Coincident endpoints have no defined direction and produce no force.
    pub fn force(&self, from: Vec3, to: Vec3) -> Vec3 {
        let delta = to - from;
        let extension = delta.length() - self.rest_length;
        delta.normalize_or_zero() * (self.elasticity * extension)
    }
}
