//! Plain-old-data snapshot types handed to the renderer

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Point vertex padded to 16 bytes for buffer upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub _padding: f32,
}

impl From<Vec3> for PointVertex {
    fn from(position: Vec3) -> Self {
        Self {
            position: position.to_array(),
            _padding: 0.0,
        }
    }
}
