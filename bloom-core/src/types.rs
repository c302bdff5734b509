use glam::Vec2;

/// Identifier for a segment in a [`crate::stem::Stem`].
///
/// This is an index into `Stem::segments`, and is only meaningful within
/// the lifetime of a given `Stem` instance.
pub type SegmentId = usize;

/// 2-D vector used for every position, velocity and force in the simulation.
///
/// Normalization must always go through `normalize_or_zero` so that a
/// zero-length vector yields `Vec2::ZERO` instead of NaN.
pub type Vector2 = Vec2;

/// The root segment is always the first one in the chain.
pub const ROOT: SegmentId = 0;

/// Growth direction of an unbent stem. World space is screen-like: +y points down.
pub const UP: Vec2 = Vec2::NEG_Y;
