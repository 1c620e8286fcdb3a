//! Render models filled by the step callbacks
//!
//! The worker copies what a frame needs out of the body; the render side only ever
//! reads these, never the body itself.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use sim_physics::{
    BoundingBox, Flywheel, Jelly, PointVertex, Spring1D, Whirligig, LATTICE_CORNERS,
    LATTICE_POINTS,
};
use std::collections::VecDeque;

/// Bounded plot history; the oldest sample is dropped once full.
#[derive(Debug, Clone)]
pub struct History<T> {
    samples: VecDeque<T>,
    capacity: usize,
}

impl<T> History<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity.min(1024)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, sample: T) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Changes the bound, dropping the oldest samples that no longer fit.
    pub fn resize(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        let excess = self.samples.len().saturating_sub(self.capacity);
        self.samples.drain(..excess);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&T> {
        self.samples.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.samples.iter()
    }

    /// Samples oldest first as one slice, ready for upload.
    pub fn as_slice(&mut self) -> &[T] {
        self.samples.make_contiguous()
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SpringSample {
    pub t: f32,
    pub position: f32,
    pub velocity: f32,
    pub acceleration: f32,
    pub elasticity_force: f32,
    pub damping_force: f32,
    pub field_force: f32,
    pub rest_position: f32,
}

pub struct SpringView {
    pub history: History<SpringSample>,
}

impl SpringView {
    pub fn new(history_length: usize) -> Self {
        Self {
            history: History::new(history_length),
        }
    }

    pub fn record(&mut self, spring: &Spring1D) {
        self.history.push(SpringSample {
            t: spring.t(),
            position: spring.position(),
            velocity: spring.velocity(),
            acceleration: spring.acceleration(),
            elasticity_force: spring.elasticity_force(),
            damping_force: spring.damping_force(),
            field_force: spring.field_force(),
            rest_position: spring.rest_position(),
        });
    }

    /// Empties the plots and rebounds them to `history_length`.
    pub fn clear(&mut self, history_length: usize) {
        self.history.clear();
        self.history.resize(history_length);
    }

    pub fn vertex_bytes(&mut self) -> &[u8] {
        bytemuck::cast_slice(self.history.as_slice())
    }

    pub fn summary(&self) -> String {
        match self.history.latest() {
            Some(s) => format!(
                "t={:.2} x={:+.3} v={:+.3} w={:+.3}",
                s.t, s.position, s.velocity, s.rest_position
            ),
            None => "no samples".into(),
        }
    }
}

pub struct WhirligigView {
    pub t: f32,
    pub diagonal: PointVertex,
    pub kinetic_energy: f32,
    /// Tip of the diagonal over time
    pub trajectory: History<PointVertex>,
}

impl WhirligigView {
    pub fn new(trajectory_length: usize) -> Self {
        Self {
            t: 0.0,
            diagonal: PointVertex::zeroed(),
            kinetic_energy: 0.0,
            trajectory: History::new(trajectory_length),
        }
    }

    pub fn record(&mut self, whirligig: &Whirligig) {
        self.t = whirligig.t();
        self.diagonal = whirligig.diagonal_vertex();
        self.kinetic_energy = whirligig.kinetic_energy();
        self.trajectory.push(self.diagonal);
    }

    pub fn clear(&mut self, trajectory_length: usize) {
        self.trajectory.clear();
        self.trajectory.resize(trajectory_length);
    }

    pub fn trajectory_bytes(&mut self) -> &[u8] {
        bytemuck::cast_slice(self.trajectory.as_slice())
    }

    pub fn summary(&self) -> String {
        let [x, y, z] = self.diagonal.position;
        format!(
            "t={:.2} tip=({x:+.3}, {y:+.3}, {z:+.3}) E={:.4} trail={}",
            self.t,
            self.kinetic_energy,
            self.trajectory.len()
        )
    }
}

pub struct JellyView {
    pub t: f32,
    pub points: [PointVertex; LATTICE_POINTS],
    pub frame_corners: [PointVertex; LATTICE_CORNERS],
    pub bounds: BoundingBox,
}

impl JellyView {
    pub fn new() -> Self {
        Self {
            t: 0.0,
            points: [PointVertex::zeroed(); LATTICE_POINTS],
            frame_corners: [PointVertex::zeroed(); LATTICE_CORNERS],
            bounds: BoundingBox::default(),
        }
    }

    pub fn record(&mut self, jelly: &Jelly) {
        self.t = jelly.t();
        self.points = jelly.vertices();
        self.frame_corners = jelly.frame_corners().map(PointVertex::from);
        self.bounds = jelly.collider().bounds;
    }

    pub fn point_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }

    pub fn frame_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.frame_corners)
    }

    pub fn centroid(&self) -> Vec3 {
        self.points
            .iter()
            .map(|vertex| Vec3::from_array(vertex.position))
            .sum::<Vec3>()
            / LATTICE_POINTS as f32
    }

    pub fn summary(&self) -> String {
        let lowest = self
            .points
            .iter()
            .map(|vertex| vertex.position[1])
            .fold(f32::INFINITY, f32::min);
        let centroid = self.centroid();
        format!(
            "t={:.3} centroid=({:+.3}, {:+.3}, {:+.3}) lowest y={:+.3} floor={:+.3}",
            self.t,
            centroid.x,
            centroid.y,
            centroid.z,
            lowest,
            self.bounds.min().y
        )
    }
}

impl Default for JellyView {
    fn default() -> Self {
        Self::new()
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FlywheelSample {
    pub t: f32,
    pub angle: f32,
    pub piston_position: f32,
    pub piston_velocity: f32,
    pub piston_acceleration: f32,
    pub rod_length: f32,
}

pub struct FlywheelView {
    pub history: History<FlywheelSample>,
}

impl FlywheelView {
    pub fn new(history_length: usize) -> Self {
        Self {
            history: History::new(history_length),
        }
    }

    pub fn record(&mut self, flywheel: &Flywheel) {
        self.history.push(FlywheelSample {
            t: flywheel.t(),
            angle: flywheel.angle(),
            piston_position: flywheel.piston_position(),
            piston_velocity: flywheel.piston_velocity(),
            piston_acceleration: flywheel.piston_acceleration(),
            rod_length: flywheel.current_length(),
        });
    }

    /// Empties the plots and rebounds them to `history_length`.
    pub fn clear(&mut self, history_length: usize) {
        self.history.clear();
        self.history.resize(history_length);
    }

    pub fn vertex_bytes(&mut self) -> &[u8] {
        bytemuck::cast_slice(self.history.as_slice())
    }

    /// Piston travel covered by the recorded history.
    pub fn stroke(&self) -> f32 {
        if self.history.is_empty() {
            return 0.0;
        }
        let (low, high) = self
            .history
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(low, high), s| {
                (low.min(s.piston_position), high.max(s.piston_position))
            });
        high - low
    }

    pub fn summary(&self) -> String {
        match self.history.latest() {
            Some(s) => format!(
                "t={:.2} angle={:.3} piston={:.3} v={:+.3} stroke={:.3}",
                s.t,
                s.angle,
                s.piston_position,
                s.piston_velocity,
                self.stroke()
            ),
            None => "no samples".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_drops_oldest_when_full() {
        let mut history = History::new(3);
        for n in 0..5 {
            history.push(n);
        }
        assert_eq!(history.as_slice(), &[2, 3, 4]);
        assert_eq!(history.latest(), Some(&4));
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn shrinking_history_keeps_newest() {
        let mut history = History::new(5);
        for n in 0..5 {
            history.push(n);
        }
        history.resize(2);
        assert_eq!(history.as_slice(), &[3, 4]);
        history.push(5);
        assert_eq!(history.as_slice(), &[4, 5]);

        history.resize(0);
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn empty_flywheel_history_has_no_stroke() {
        let view = FlywheelView::new(10);
        assert_eq!(view.stroke(), 0.0);
    }

    #[test]
    fn trajectory_bytes_cover_every_vertex() {
        let mut view = WhirligigView::new(10);
        let mut whirligig = Whirligig::default();
        sim_physics::WhirligigParams::default().reset(&mut whirligig);
        view.record(&whirligig);
        view.record(&whirligig);
        assert_eq!(
            view.trajectory_bytes().len(),
            2 * std::mem::size_of::<PointVertex>()
        );
    }
}
