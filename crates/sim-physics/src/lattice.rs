//! Index mapping and spring topology of the 4×4×4 control point lattice

use crate::constants::{LATTICE_CORNERS, LATTICE_EDGE, LATTICE_POINTS};
use glam::Vec3;

/// Grid coordinate of a control point, each component in `[0, 4)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlPoint {
    pub i: usize,
    pub j: usize,
    pub k: usize,
}

impl ControlPoint {
    pub fn new(i: usize, j: usize, k: usize) -> Self {
        debug_assert!(i < LATTICE_EDGE && j < LATTICE_EDGE && k < LATTICE_EDGE);
        Self { i, j, k }
    }

    /// Linear index `16i + 4j + k`.
    pub fn index(&self) -> usize {
        LATTICE_EDGE * LATTICE_EDGE * self.i + LATTICE_EDGE * self.j + self.k
    }

    pub fn from_index(index: usize) -> Self {
        Self {
            i: index / (LATTICE_EDGE * LATTICE_EDGE),
            j: (index / LATTICE_EDGE) % LATTICE_EDGE,
            k: index % LATTICE_EDGE,
        }
    }

    /// Iterates all 64 points in linear index order.
    pub fn all() -> impl Iterator<Item = ControlPoint> {
        (0..LATTICE_POINTS).map(Self::from_index)
    }

    fn offset_to(&self, other: &ControlPoint) -> [usize; 3] {
        [
            self.i.abs_diff(other.i),
            self.j.abs_diff(other.j),
            self.k.abs_diff(other.k),
        ]
    }
}

/// Linear indices of the lattice corners, ordered like the frame corners
/// (bit 2 = x, bit 1 = y, bit 0 = z; 0 is the negative side).
pub const CORNER_INDICES: [usize; LATTICE_CORNERS] = [0, 3, 12, 15, 48, 51, 60, 63];

/// Frame corner slot anchoring the given control point, if it is a lattice corner.
pub fn corner_slot(index: usize) -> Option<usize> {
    CORNER_INDICES.iter().position(|&corner| corner == index)
}

/// Kind of an inner spring, which decides its rest length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpringKind {
    /// Along a grid axis, rest length `size / 3`
    Cardinal,
    /// Across a face of a grid cell, rest length `√2 · size / 3`
    Diagonal,
}

impl SpringKind {
    pub fn rest_length(&self, size: f32) -> f32 {
        let spacing = size / (LATTICE_EDGE - 1) as f32;
        match self {
            Self::Cardinal => spacing,
            Self::Diagonal => std::f32::consts::SQRT_2 * spacing,
        }
    }
}

/// One end of an inner spring as seen from the other end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbour {
    pub index: usize,
    pub kind: SpringKind,
}

/// Inner spring network: for every point, the neighbours it is connected to.
///
/// Built once; every spring appears in both endpoints' lists.
#[derive(Debug, Clone)]
pub struct SpringTable {
    neighbours: Vec<Vec<Neighbour>>,
}

impl SpringTable {
    pub fn new() -> Self {
        let neighbours = ControlPoint::all()
            .map(|point| {
                ControlPoint::all()
                    .filter_map(|other| {
                        let offset = point.offset_to(&other);
                        if offset.iter().any(|&d| d > 1) {
                            return None;
                        }
                        let kind = match offset.iter().sum::<usize>() {
                            1 => SpringKind::Cardinal,
                            2 => SpringKind::Diagonal,
                            _ => return None,
                        };
                        Some(Neighbour {
                            index: other.index(),
                            kind,
                        })
                    })
                    .collect()
            })
            .collect();
        Self { neighbours }
    }

    pub fn neighbours(&self, index: usize) -> &[Neighbour] {
        &self.neighbours[index]
    }

    /// Each spring once, as `(lower index, higher index, kind)`.
    pub fn springs(&self) -> impl Iterator<Item = (usize, usize, SpringKind)> + '_ {
        self.neighbours.iter().enumerate().flat_map(|(index, list)| {
            list.iter()
                .filter(move |n| n.index > index)
                .map(move |n| (index, n.index, n.kind))
        })
    }
}

impl Default for SpringTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Rest position of a point on a uniform lattice of edge `size` centred at the origin.
pub fn rest_position(point: ControlPoint, size: f32) -> Vec3 {
    let spacing = size / (LATTICE_EDGE - 1) as f32;
    let coordinate = |n: usize| n as f32 * spacing - size / 2.0;
    Vec3::new(coordinate(point.i), coordinate(point.j), coordinate(point.k))
}
