use crate::{config::FlowerConfig, curves::asymptotic_growth, types::SegmentId};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// A petal hanging off one stem segment. The tip is a free point mass held
/// in place by an attachment spring and a posture spring.
#[derive(Clone, Debug, PartialEq)]
pub struct Petal {
    pub anchor: SegmentId,
    /// Fixed spread angle around the anchor, in `[0, 2π)`.
    pub angle_offset: f32,
    pub spawn_age: f32,
    pub target_length: f32,
    pub current_length: f32,
    /// Lagging follower of the flower's bloom factor, in `[0, 1]`.
    pub openness: f32,
    pub tip_position: Vec2,
    pub tip_velocity: Vec2,
    pub mass: f32,
    /// Posture spring constant; high while closed, low once open.
    pub stiffness: f32,
}

impl Petal {
    pub fn new(
        anchor: SegmentId,
        anchor_pos: Vec2,
        angle_offset: f32,
        spawn_age: f32,
        target_length: f32,
        cfg: &FlowerConfig,
    ) -> Self {
        assert!(
            cfg.petal_mass > 0.0,
            "petal mass must be positive, got {}",
            cfg.petal_mass
        );
        Self {
            anchor,
            angle_offset,
            spawn_age,
            target_length,
            current_length: 0.0,
            openness: 0.0,
            tip_position: anchor_pos,
            tip_velocity: Vec2::ZERO,
            mass: cfg.petal_mass,
            stiffness: cfg.max_petal_stiffness,
        }
    }

    /// Unit direction of this petal when fully open.
    pub fn spread_direction(&self) -> Vec2 {
        Vec2::new(self.angle_offset.cos(), self.angle_offset.sin())
    }

    /// Unit direction the posture spring aims for: the stem direction while
    /// closed, blending into the spread direction as the petal opens.
    pub fn posture_direction(&self, stem_dir: Vec2) -> Vec2 {
        let spread = self.spread_direction();
        let dir = stem_dir.lerp(spread, self.openness).normalize_or_zero();
        if dir == Vec2::ZERO { spread } else { dir }
    }

    /// Advances length, openness and stiffness by one tick.
    ///
    /// Length is closed-form in the relative age. Openness and stiffness are
    /// first-order relaxations, so each step starts from last tick's values.
    pub fn mature(&mut self, structural_age: f32, bloom_factor: f32, dt: f32, cfg: &FlowerConfig) {
        let relative_age = structural_age - self.spawn_age;
        self.current_length =
            asymptotic_growth(self.target_length, relative_age, cfg.petal_growth_const);

        self.openness += (bloom_factor - self.openness) * dt * cfg.openness_lag;
        self.openness = self.openness.clamp(0.0, 1.0);

        let open_stiffness = cfg.max_petal_stiffness * cfg.open_stiffness_fraction;
        let target = cfg.max_petal_stiffness + (open_stiffness - cfg.max_petal_stiffness) * self.openness;
        self.stiffness += (target - self.stiffness) * dt;
    }
}

/// Builds the whole petal batch around `anchor`, evenly spaced in angle.
///
/// Each petal's target length is `petal_base_length` plus a uniform random
/// extra in `[0, petal_length_range)`.
pub fn spawn_batch(
    anchor: SegmentId,
    anchor_pos: Vec2,
    spawn_age: f32,
    cfg: &FlowerConfig,
    rng: &mut impl Rng,
) -> Vec<Petal> {
    let count = cfg.petal_count;
    (0..count)
        .map(|i| {
            let angle = i as f32 * TAU / count as f32;
            let length = cfg.petal_base_length + rng.random::<f32>() * cfg.petal_length_range;
            Petal::new(anchor, anchor_pos, angle, spawn_age, length, cfg)
        })
        .collect()
}
