use crate::types::SegmentId;
use glam::Vec2;

/// A temporary buffer that accumulates reaction forces per stem segment.
///
/// For each `SegmentId`, this buffer stores:
///
/// - The sum of all reaction forces pushed back onto that segment.
/// - The number of contributions that were added.
///
/// Petals record the equal-and-opposite share of their spring forces here
/// while they are evaluated; the flower then applies the totals to the anchor
/// velocities in one explicit pass.
#[derive(Debug)]
pub struct ReactionBuffer {
    /// Accumulated reaction force for each segment.
    force: Vec<Vec2>,
    /// Number of contributions for each segment.
    count: Vec<u32>,
}

impl ReactionBuffer {
    /// Creates a new [`ReactionBuffer`] with the given length, zeroed.
    pub fn with_len(len: usize) -> Self {
        Self {
            force: vec![Vec2::ZERO; len],
            count: vec![0; len],
        }
    }

    /// Resizes to `len` if needed, then clears every entry.
    pub fn ensure_len(&mut self, len: usize) {
        if self.force.len() != len {
            self.force.resize(len, Vec2::ZERO);
            self.count.resize(len, 0);
        }
        self.clear();
    }

    pub fn clear(&mut self) {
        for f in &mut self.force {
            *f = Vec2::ZERO;
        }
        for c in &mut self.count {
            *c = 0;
        }
    }

    /// Adds one reaction force for the given segment.
    ///
    /// ### Panics
    /// Panics if `id` is out of bounds for the internal arrays.
    #[inline]
    pub fn add(&mut self, id: SegmentId, force: Vec2) {
        self.force[id] += force;
        self.count[id] += 1;
    }

    /// Total reaction force recorded for a segment.
    #[inline]
    pub fn total(&self, id: SegmentId) -> Vec2 {
        self.force[id]
    }

    #[inline]
    pub fn is_loaded(&self, id: SegmentId) -> bool {
        self.count[id] > 0
    }

    /// Iterates over the segments that received at least one contribution.
    pub fn loaded_indices<'a>(&'a self) -> impl Iterator<Item = SegmentId> + 'a {
        self.count
            .iter()
            .enumerate()
            .filter_map(|(i, &c)| if c > 0 { Some(i) } else { None })
    }
}
