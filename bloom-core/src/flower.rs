//! The flower aggregate: one stem, one petal batch, one age clock.

use crate::{
    config::FlowerConfig,
    error::ConfigError,
    petal::Petal,
    phases,
    reaction_buffer::ReactionBuffer,
    rng::{SimRng, create_rng, entropy_rng},
    stem::{Stem, StemSegment},
    wind::ForceField,
};
use glam::Vec2;
use tracing::info;

/// Largest time step a host should hand to [`Flower::update`].
pub const MAX_DT: f32 = 0.1;

/// Clamps a raw frame delta into `[0, MAX_DT]`; non-finite deltas become 0.
///
/// Explicit Euler springs blow up on long pauses, so hosts should pass every
/// wall-clock delta through this before updating.
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_finite() { dt.clamp(0.0, MAX_DT) } else { 0.0 }
}

/// External conditions for one physics tick.
#[derive(Clone, Copy)]
pub struct Environment<'a> {
    /// Constant acceleration; +y points down.
    pub gravity: Vec2,
    pub wind: &'a dyn ForceField,
    /// Simulation time used to sample the wind.
    pub time: f32,
}

/// Controls when the bloom factor is allowed to ramp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BloomMode {
    /// Ramp once the stem is tall and old enough.
    #[default]
    Natural,
    /// Ramp immediately, regardless of stem size or age.
    Forced,
    /// Never ramp. Progress already made is kept.
    Suppressed,
}

#[derive(Debug)]
pub struct Flower {
    stem: Stem,
    petals: Vec<Petal>,
    /// Single clock behind every maturation curve.
    structural_age: f32,
    bloom_factor: f32,
    next_spawn_age: f32,
    bloom_mode: BloomMode,
    cfg: FlowerConfig,
    rng: SimRng,
    reactions: ReactionBuffer,
}

impl Flower {
    /// Plants a flower whose random choices come from OS entropy.
    pub fn new(origin: Vec2, cfg: FlowerConfig) -> Result<Self, ConfigError> {
        Self::with_rng(origin, cfg, entropy_rng())
    }

    /// Plants a reproducible flower.
    pub fn with_seed(origin: Vec2, cfg: FlowerConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(origin, cfg, create_rng(seed))
    }

    /// Plants a flower drawing its random choices from `rng`.
    ///
    /// The root sits at `origin` with zero rest length and `root_mass`.
    pub fn with_rng(origin: Vec2, cfg: FlowerConfig, rng: SimRng) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let stem = Stem::new(origin, cfg.root_mass);
        let reactions = ReactionBuffer::with_len(stem.len());
        Ok(Self {
            stem,
            petals: Vec::new(),
            structural_age: 0.0,
            bloom_factor: 0.0,
            next_spawn_age: 0.0,
            bloom_mode: BloomMode::Natural,
            cfg,
            rng,
            reactions,
        })
    }

    /// Advances the flower by `dt` seconds: maturation first, then physics.
    ///
    /// ### Panics
    /// Panics if `dt` is negative or not finite. Hosts should pass deltas
    /// through [`clamp_dt`].
    pub fn update(&mut self, dt: f32, env: &Environment) {
        assert!(
            dt.is_finite() && dt >= 0.0,
            "time step must be finite and non-negative, got {dt}"
        );
        self.mature(dt);
        self.simulate(dt, env);
    }

    /// Maturation phase: age, spawning, growth curves, bloom and petals.
    fn mature(&mut self, dt: f32) {
        let cfg = &self.cfg;
        self.structural_age += dt * cfg.growth_rate;

        phases::spawn_phase(
            &mut self.stem,
            self.structural_age,
            &mut self.next_spawn_age,
            cfg,
        );
        phases::stem_maturation_phase(&mut self.stem, self.structural_age, cfg);

        let before = self.bloom_factor;
        self.bloom_factor = phases::bloom_phase(
            before,
            self.stem.len(),
            self.structural_age,
            dt,
            self.bloom_mode,
            cfg,
        );
        if before == 0.0 && self.bloom_factor > 0.0 {
            info!(age = self.structural_age, mode = ?self.bloom_mode, "bloom started");
        }

        phases::petal_spawn_phase(
            &mut self.petals,
            &self.stem,
            self.bloom_factor,
            self.structural_age,
            cfg,
            &mut self.rng,
        );
        phases::petal_maturation_phase(
            &mut self.petals,
            self.structural_age,
            self.bloom_factor,
            dt,
            cfg,
        );
    }

    /// Physics phase: stem root to tip, then petals and their reactions.
    fn simulate(&mut self, dt: f32, env: &Environment) {
        phases::stem_physics_phase(&mut self.stem, dt, env, &self.cfg);
        phases::petal_physics_phase(
            &mut self.petals,
            &mut self.stem,
            &mut self.reactions,
            dt,
            env,
            &self.cfg,
        );
    }

    /// Overrides the bloom trigger. The bloom factor never decreases, so
    /// switching to [`BloomMode::Suppressed`] only freezes it.
    pub fn set_bloom_mode(&mut self, mode: BloomMode) {
        self.bloom_mode = mode;
    }

    pub fn bloom_mode(&self) -> BloomMode {
        self.bloom_mode
    }

    /// Stem segments in chain order; index 0 is the root.
    pub fn segments(&self) -> &[StemSegment] {
        self.stem.segments()
    }

    pub fn stem(&self) -> &Stem {
        &self.stem
    }

    pub fn petals(&self) -> &[Petal] {
        &self.petals
    }

    pub fn structural_age(&self) -> f32 {
        self.structural_age
    }

    pub fn bloom_factor(&self) -> f32 {
        self.bloom_factor
    }

    pub fn next_spawn_age(&self) -> f32 {
        self.next_spawn_age
    }

    pub fn config(&self) -> &FlowerConfig {
        &self.cfg
    }
}
