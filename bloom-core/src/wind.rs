//! Procedural wind.
//!
//! A [`WindField`] turns two decorrelated samples of its own [`NoiseField`]
//! into a force vector for any world position and instant. Forces are pure
//! functions of `(position, time)`; nothing changes after construction.

use crate::{config::WindConfig, error::ConfigError, noise::NoiseField, rng::create_rng};
use glam::Vec2;
use rand::Rng;

/// A source of external force that varies over space and time.
///
/// Implementations must be deterministic: same inputs give the same output.
pub trait ForceField: Send + Sync {
    /// Force acting on a body at `position` at simulation time `time`.
    fn force_at(&self, position: Vec2, time: f32) -> Vec2;
}

/// Still air: no force anywhere, ever.
#[derive(Clone, Copy, Debug, Default)]
pub struct CalmAir;

impl ForceField for CalmAir {
    fn force_at(&self, _position: Vec2, _time: f32) -> Vec2 {
        Vec2::ZERO
    }
}

/// Noise-driven wind with a prevailing horizontal direction and gusts.
#[derive(Clone, Debug)]
pub struct WindField {
    noise: NoiseField,
    /// World-space shift so instances do not share a noise origin.
    offset: Vec2,
    cfg: WindConfig,
}

impl WindField {
    /// Builds a wind field with a fresh noise table and a random offset drawn from `rng`.
    pub fn new(cfg: WindConfig, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let noise = NoiseField::new(rng);
        let offset = Vec2::new(
            rng.random_range(0.0..cfg.offset_range),
            rng.random_range(0.0..cfg.offset_range),
        );
        Ok(Self { noise, offset, cfg })
    }

    /// Reproducible wind field.
    pub fn from_seed(cfg: WindConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(cfg, &mut create_rng(seed))
    }

    /// Wind field with an explicit noise source and offset.
    pub fn with_offset(cfg: WindConfig, noise: NoiseField, offset: Vec2) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self { noise, offset, cfg })
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn config(&self) -> &WindConfig {
        &self.cfg
    }

    /// Wind force at `position` and `time`.
    ///
    /// The x channel advances along noise-x with time, the y channel along
    /// noise-y shifted by `channel_offset`. The `+0.5` bias on the x sample
    /// gives a prevailing direction that strong negative gusts can still
    /// reverse; lift is limited to `lift_fraction` of the gust strength.
    pub fn get_force(&self, position: Vec2, time: f32) -> Vec2 {
        let cfg = &self.cfg;
        let p = (position + self.offset) * cfg.spatial_scale;
        let drift = time * cfg.temporal_scale;

        let sx = self.noise.sample(p.x + drift, p.y);
        let sy = self.noise.sample(p.x, p.y + drift + cfg.channel_offset);

        Vec2::new(
            (sx + 0.5) * (cfg.base_speed + cfg.gustiness * sy),
            sy * (cfg.gustiness * cfg.lift_fraction),
        )
    }
}

impl ForceField for WindField {
    fn force_at(&self, position: Vec2, time: f32) -> Vec2 {
        self.get_force(position, time)
    }
}
