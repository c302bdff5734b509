use crate::{
    config::FlowerConfig,
    curves::{asymptotic_growth, linear_ramp},
    types::{SegmentId, UP},
};
use glam::Vec2;

#[derive(Clone, Debug, PartialEq)]
pub struct StemSegment {
    pub position: Vec2,
    pub velocity: Vec2,
    pub parent: Option<SegmentId>,
    pub mass: f32,
    /// Structural age of the flower when this segment appeared.
    pub spawn_age: f32,
    pub target_rest_length: f32,
    pub current_rest_length: f32,
    pub target_flexibility: f32,
    pub current_flexibility: f32,
}

/// A single unbranched chain of segments. Index 0 is the root, and every
/// other segment's parent is the segment just before it.
#[derive(Clone, Debug)]
pub struct Stem {
    segments: Vec<StemSegment>,
}

impl StemSegment {
    pub fn new_root(pos: Vec2, mass: f32) -> Self {
        assert!(mass > 0.0, "segment mass must be positive, got {mass}");
        Self {
            position: pos,
            velocity: Vec2::ZERO,
            parent: None,
            mass,
            spawn_age: 0.0,
            target_rest_length: 0.0,
            current_rest_length: 0.0,
            target_flexibility: 0.0,
            current_flexibility: 0.0,
        }
    }

    pub fn new_child(
        pos: Vec2,
        parent: SegmentId,
        mass: f32,
        spawn_age: f32,
        target_rest_length: f32,
        target_flexibility: f32,
    ) -> Self {
        assert!(mass > 0.0, "segment mass must be positive, got {mass}");
        Self {
            position: pos,
            velocity: Vec2::ZERO,
            parent: Some(parent),
            mass,
            spawn_age,
            target_rest_length,
            current_rest_length: 0.0,
            target_flexibility,
            current_flexibility: 0.0,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Re-evaluates rest length and flexibility for the flower's current age.
    pub fn mature(&mut self, structural_age: f32, cfg: &FlowerConfig) {
        let relative_age = structural_age - self.spawn_age;
        self.current_rest_length =
            asymptotic_growth(self.target_rest_length, relative_age, cfg.growth_const);
        self.current_flexibility =
            linear_ramp(self.target_flexibility, relative_age, cfg.maturation_time);
    }
}

impl Stem {
    pub fn new(root_pos: Vec2, root_mass: f32) -> Self {
        Self {
            segments: vec![StemSegment::new_root(root_pos, root_mass)],
        }
    }

    pub fn segments(&self) -> &[StemSegment] {
        &self.segments
    }

    pub(crate) fn segments_mut(&mut self) -> &mut [StemSegment] {
        &mut self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Index of the topmost segment.
    pub fn tip(&self) -> SegmentId {
        self.segments.len() - 1
    }

    /// Appends a new segment on top of `parent`, starting at the parent's
    /// current position with zero length.
    pub fn add_segment(
        &mut self,
        parent: SegmentId,
        mass: f32,
        spawn_age: f32,
        target_rest_length: f32,
        target_flexibility: f32,
    ) -> SegmentId {
        assert!(
            parent < self.segments.len(),
            "parent {parent} out of range for {} segments",
            self.segments.len()
        );
        let id = self.segments.len();
        let pos = self.segments[parent].position;
        self.segments.push(StemSegment::new_child(
            pos,
            parent,
            mass,
            spawn_age,
            target_rest_length,
            target_flexibility,
        ));
        id
    }

    /// Unit direction in which segment `id` points away from its parent.
    ///
    /// The root, and any segment currently lying on top of its parent, point `UP`.
    pub fn tangent(&self, id: SegmentId) -> Vec2 {
        tangent_in(&self.segments, id)
    }
}

/// [`Stem::tangent`] over a bare slice, for callers holding a split borrow.
pub(crate) fn tangent_in(segments: &[StemSegment], id: SegmentId) -> Vec2 {
    debug_assert!(id < segments.len(), "segment {id} out of range");
    let seg = &segments[id];
    match seg.parent {
        None => UP,
        Some(p) => {
            let dir = (seg.position - segments[p].position).normalize_or_zero();
            if dir == Vec2::ZERO { UP } else { dir }
        }
    }
}
