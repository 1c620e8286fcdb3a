//! Kinematic control frame around the jelly

use crate::constants::LATTICE_CORNERS;
use glam::{EulerRot, Quat, Vec3};

/// A positionable, orientable box whose corners can anchor the lattice corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlFrame {
    pub position: Vec3,
    pub orientation: Quat,
}

impl ControlFrame {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation: orientation.normalize(),
        }
    }

    /// Orientation from XYZ Euler angles in degrees, as typed into the panel.
    pub fn orientation_from_euler_degrees(angles: Vec3) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            angles.x.to_radians(),
            angles.y.to_radians(),
            angles.z.to_radians(),
        )
    }

    /// World-space corners of a frame with edge `size`.
    ///
    /// Corner `n` uses bit 2 for x, bit 1 for y and bit 0 for z, a set bit meaning the
    /// positive side, matching the lattice corner ordering.
    pub fn corners(&self, size: f32) -> [Vec3; LATTICE_CORNERS] {
        let half = size / 2.0;
        std::array::from_fn(|n| {
            let side = |bit: usize| if (n >> bit) & 1 == 1 { half } else { -half };
            self.position + self.orientation * Vec3::new(side(2), side(1), side(0))
        })
    }
}

impl Default for ControlFrame {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY)
    }
}
