//! Core 2-D flower growth and physics simulation library.
//!
//! Main components:
//! - [`flower`]: the flower aggregate, its age clock and update entry point.
//! - [`phases`]: maturation and physics phases run each tick.
//! - [`stem`]: stem segments and the segment chain.
//! - [`petal`]: petals and petal batch spawning.
//! - [`wind`]: force fields, including noise-driven wind.
//! - [`noise`]: coherent gradient noise.
//! - [`reaction_buffer`]: per-segment accumulation of petal reactions.
//! - [`curves`]: closed-form growth curves.
//! - [`config`]: tunable constants and JSON settings.
//! - [`error`]: configuration errors.
//! - [`rng`]: seeded random sources.
//! - [`types`]: shared type aliases and IDs.

pub mod config;
pub mod curves;
pub mod error;
pub mod flower;
pub mod noise;
pub mod petal;
pub mod phases;
pub mod reaction_buffer;
pub mod rng;
pub mod stem;
pub mod types;
pub mod wind;

pub use config::{FlowerConfig, Settings, WindConfig};
pub use error::ConfigError;
pub use flower::{BloomMode, Environment, Flower, MAX_DT, clamp_dt};
pub use wind::{CalmAir, ForceField, WindField};
