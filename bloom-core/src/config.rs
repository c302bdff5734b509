//! Tunable constants for growth, physics and wind.
//!
//! Every struct here implements [`Default`] with the values the simulation
//! was tuned for, and deserializes with `#[serde(default)]` so a settings
//! document only needs to name the fields it overrides.

use crate::error::{
    ConfigError, ensure_finite, ensure_non_negative, ensure_positive, ensure_unit,
};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Growth, maturation and physics constants for a [`crate::flower::Flower`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowerConfig {
    /// Structural age units gained per second of simulated time.
    pub growth_rate: f32,
    /// Segment cap, root included.
    pub max_segments: usize,
    /// Age units between two segment spawns.
    pub spawn_interval: f32,
    /// Rest length every new segment grows toward.
    pub segment_rest_length: f32,
    /// Mass of generation 0; each later generation is lighter.
    pub segment_base_mass: f32,
    pub segment_mass_decay: f32,
    /// Floor for segment mass. Must be positive.
    pub min_segment_mass: f32,
    /// Mass of the fixed root pivot.
    pub root_mass: f32,
    pub base_flexibility: f32,
    pub flexibility_step: f32,
    /// Rate constant of the asymptotic elongation curve.
    pub growth_const: f32,
    /// Age units for a segment to reach its full flexibility.
    pub maturation_time: f32,
    pub base_stiffness: f32,
    /// Multiplier of `base_stiffness` for the parent-distance spring.
    pub radial_factor: f32,
    /// Velocity factor applied once per tick to every segment.
    pub stem_damping: f32,
    /// Bloom unlocks once the stem has more segments than this...
    pub bloom_min_segments: usize,
    /// ...and the structural age is past this.
    pub bloom_start_age: f32,
    /// Bloom factor gained per second once unlocked.
    pub bloom_rate: f32,
    /// Bloom factor above which the petal batch spawns.
    pub petal_spawn_threshold: f32,
    pub petal_count: usize,
    pub petal_base_length: f32,
    /// Upper bound of the uniform random extra petal length.
    pub petal_length_range: f32,
    pub petal_mass: f32,
    pub petal_growth_const: f32,
    /// Rate at which openness follows the bloom factor.
    pub openness_lag: f32,
    /// Posture stiffness of a fully closed petal.
    pub max_petal_stiffness: f32,
    /// Fraction of `max_petal_stiffness` kept by a fully open petal.
    pub open_stiffness_fraction: f32,
    /// Stiffness of the spring holding a petal tip at its length.
    pub attachment_stiffness: f32,
    /// Petals catch this much more wind than stem segments.
    pub wind_surface_multiplier: f32,
    /// Share of the posture spring force fed back into the anchor.
    pub posture_feedback: f32,
    pub petal_damping: f32,
}

impl Default for FlowerConfig {
    fn default() -> Self {
        Self {
            growth_rate: 1.0,
            max_segments: 12,
            spawn_interval: 1.2,
            segment_rest_length: 35.0,
            segment_base_mass: 2.0,
            segment_mass_decay: 0.1,
            min_segment_mass: 0.5,
            root_mass: 1.0e6,
            base_flexibility: 0.25,
            flexibility_step: 0.06,
            growth_const: 1.0,
            maturation_time: 4.0,
            base_stiffness: 8.0,
            radial_factor: 4.0,
            stem_damping: 0.92,
            bloom_min_segments: 5,
            bloom_start_age: 8.0,
            bloom_rate: 0.15,
            petal_spawn_threshold: 0.05,
            petal_count: 6,
            petal_base_length: 28.0,
            petal_length_range: 10.0,
            petal_mass: 0.3,
            petal_growth_const: 0.6,
            openness_lag: 2.0,
            max_petal_stiffness: 10.0,
            open_stiffness_fraction: 0.1,
            attachment_stiffness: 30.0,
            wind_surface_multiplier: 2.0,
            posture_feedback: 0.5,
            petal_damping: 0.90,
        }
    }
}

impl FlowerConfig {
    /// Rejects values that would divide by zero, produce non-positive mass
    /// or otherwise push NaN into the spring network.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_segments == 0 {
            return Err(ConfigError::InvalidRange {
                field: "max_segments",
                value: 0.0,
            });
        }
        ensure_non_negative("growth_rate", self.growth_rate)?;
        ensure_non_negative("spawn_interval", self.spawn_interval)?;
        ensure_non_negative("segment_rest_length", self.segment_rest_length)?;
        ensure_finite("segment_base_mass", self.segment_base_mass)?;
        ensure_finite("segment_mass_decay", self.segment_mass_decay)?;
        ensure_positive("min_segment_mass", self.min_segment_mass)?;
        ensure_positive("root_mass", self.root_mass)?;
        ensure_finite("base_flexibility", self.base_flexibility)?;
        ensure_finite("flexibility_step", self.flexibility_step)?;
        ensure_non_negative("growth_const", self.growth_const)?;
        ensure_positive("maturation_time", self.maturation_time)?;
        ensure_non_negative("base_stiffness", self.base_stiffness)?;
        ensure_non_negative("radial_factor", self.radial_factor)?;
        ensure_unit("stem_damping", self.stem_damping)?;
        ensure_finite("bloom_start_age", self.bloom_start_age)?;
        ensure_non_negative("bloom_rate", self.bloom_rate)?;
        ensure_unit("petal_spawn_threshold", self.petal_spawn_threshold)?;
        ensure_non_negative("petal_base_length", self.petal_base_length)?;
        ensure_non_negative("petal_length_range", self.petal_length_range)?;
        ensure_positive("petal_mass", self.petal_mass)?;
        ensure_non_negative("petal_growth_const", self.petal_growth_const)?;
        ensure_non_negative("openness_lag", self.openness_lag)?;
        ensure_non_negative("max_petal_stiffness", self.max_petal_stiffness)?;
        ensure_unit("open_stiffness_fraction", self.open_stiffness_fraction)?;
        ensure_non_negative("attachment_stiffness", self.attachment_stiffness)?;
        ensure_non_negative("wind_surface_multiplier", self.wind_surface_multiplier)?;
        ensure_unit("posture_feedback", self.posture_feedback)?;
        ensure_unit("petal_damping", self.petal_damping)?;
        Ok(())
    }

    /// Mass of the segment at chain index `generation`, floored at `min_segment_mass`.
    pub fn segment_mass(&self, generation: usize) -> f32 {
        (self.segment_base_mass - generation as f32 * self.segment_mass_decay)
            .max(self.min_segment_mass)
    }

    /// Target flexibility of the segment at chain index `generation`, capped at 1.
    pub fn segment_flexibility(&self, generation: usize) -> f32 {
        (self.base_flexibility + generation as f32 * self.flexibility_step).clamp(0.0, 1.0)
    }
}

/// Constants shaping a [`crate::wind::WindField`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    /// Prevailing horizontal wind strength.
    pub base_speed: f32,
    /// Strength of noise-driven gusts.
    pub gustiness: f32,
    /// World units to noise units; smaller means broader gusts.
    pub spatial_scale: f32,
    /// Seconds to noise units; smaller means slower evolution.
    pub temporal_scale: f32,
    /// Fraction of the gust strength available as vertical force.
    pub lift_fraction: f32,
    /// Noise-space shift separating the two wind channels.
    pub channel_offset: f32,
    /// Random per-instance offsets are drawn from `[0, offset_range)` on both axes.
    pub offset_range: f32,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            base_speed: 20.0,
            gustiness: 30.0,
            spatial_scale: 0.005,
            temporal_scale: 0.3,
            lift_fraction: 0.3,
            channel_offset: 100.0,
            offset_range: 1000.0,
        }
    }
}

impl WindConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("base_speed", self.base_speed)?;
        ensure_finite("gustiness", self.gustiness)?;
        ensure_non_negative("spatial_scale", self.spatial_scale)?;
        ensure_non_negative("temporal_scale", self.temporal_scale)?;
        ensure_unit("lift_fraction", self.lift_fraction)?;
        ensure_finite("channel_offset", self.channel_offset)?;
        ensure_positive("offset_range", self.offset_range)?;
        Ok(())
    }
}

/// Everything a host needs to set up a run, loadable from JSON.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub flower: FlowerConfig,
    pub wind: WindConfig,
    /// Constant acceleration; +y points down.
    pub gravity: Vec2,
    /// Seed for reproducible runs; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            flower: FlowerConfig::default(),
            wind: WindConfig::default(),
            gravity: Vec2::new(0.0, 200.0),
            seed: None,
        }
    }
}

impl Settings {
    /// Parses and validates a JSON settings document. Missing fields keep
    /// their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.flower.validate()?;
        self.wind.validate()?;
        ensure_finite("gravity.x", self.gravity.x)?;
        ensure_finite("gravity.y", self.gravity.y)?;
        Ok(())
    }
}
