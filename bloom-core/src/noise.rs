//! Coherent 2-D gradient noise.
//!
//! [`NoiseField`] owns its permutation table explicitly; every wind field
//! builds (or is handed) its own instance instead of sharing hidden global
//! state. The table is fixed after construction, so sampling is a pure
//! function of the input coordinates.

use crate::rng::create_rng;
use rand::Rng;
use rand::seq::SliceRandom;

const TABLE_SIZE: usize = 256;

/// Gradient noise generator backed by a shuffled permutation table.
#[derive(Clone, Debug)]
pub struct NoiseField {
    /// Permutation of `0..256`, stored twice so `perm[i + 1]` never wraps.
    perm: [u8; TABLE_SIZE * 2],
}

impl NoiseField {
    /// Builds a noise field whose permutation is a uniform shuffle drawn from `rng`.
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut base: Vec<u8> = (0..=255u8).collect();
        base.shuffle(rng);

        let mut perm = [0u8; TABLE_SIZE * 2];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = base[i % TABLE_SIZE];
        }
        Self { perm }
    }

    /// Builds a reproducible noise field from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(&mut create_rng(seed))
    }

    /// Samples the noise at `(x, y)`.
    ///
    /// Output is continuous with continuous first derivatives, roughly in
    /// `[-1, 1]`, and exactly `0.0` on integer lattice points.
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let x0 = x.floor();
        let y0 = y.floor();
        let xi = (x0 as i32 & 255) as usize;
        let yi = (y0 as i32 & 255) as usize;
        let fx = x - x0;
        let fy = y - y0;

        let u = fade(fx);
        let v = fade(fy);

        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let b = p[xi + 1] as usize + yi;

        let aa = p[a];
        let ab = p[a + 1];
        let ba = p[b];
        let bb = p[b + 1];

        let bottom = lerp(u, grad(aa, fx, fy), grad(ba, fx - 1.0, fy));
        let top = lerp(u, grad(ab, fx, fy - 1.0), grad(bb, fx - 1.0, fy - 1.0));
        lerp(v, bottom, top)
    }
}

/// Quintic smoothstep `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

/// Dot product of `(x, y)` with one of the pseudo-gradients picked by the low
/// four bits of `hash`.
///
/// The table mixes diagonal (`±x ± y`) and single-axis directions, and each
/// family appears with both signs so no axis is favored.
#[inline]
fn grad(hash: u8, x: f32, y: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        0.0
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}
