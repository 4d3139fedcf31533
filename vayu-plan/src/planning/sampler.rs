//! Random sample generation for tree growth.
//!
//! The sampler owns its RNG so a planning run is a pure function of the RNG
//! state: seed it for reproducible trees, or hand in any [`Rng`] from a test.

use rand::prelude::*;
use rand::rngs::SmallRng;
use rand_distr::StandardNormal;

use crate::core::WorldPoint;

use super::config::Bounds;

/// Point sampler over an injected RNG.
#[derive(Clone, Debug)]
pub struct Sampler<R: Rng = SmallRng> {
    rng: R,
}

impl Sampler<SmallRng> {
    /// Sampler over a fresh `SmallRng`.
    ///
    /// If seed is 0, uses random entropy for non-deterministic behavior.
    /// Otherwise, uses the provided seed for reproducible results.
    pub fn seeded(seed: u64) -> Self {
        let rng = if seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(seed)
        };
        Self { rng }
    }
}

impl<R: Rng> Sampler<R> {
    /// Wrap an existing RNG (or `&mut` to one).
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform in [0, 1)
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    /// Uniform point inside `bounds`.
    #[inline]
    pub fn uniform(&mut self, bounds: &Bounds) -> WorldPoint {
        WorldPoint::new(
            self.rng.gen_range(bounds.min_x..bounds.max_x),
            self.rng.gen_range(bounds.min_y..bounds.max_y),
        )
    }

    /// Point offset from `center` by independent N(0, sigma²) noise per axis.
    #[inline]
    pub fn gaussian_around(&mut self, center: WorldPoint, sigma: f64) -> WorldPoint {
        if sigma == 0.0 {
            return center;
        }
        let nx: f64 = self.rng.sample(StandardNormal);
        let ny: f64 = self.rng.sample(StandardNormal);
        WorldPoint::new(center.x + nx * sigma, center.y + ny * sigma)
    }
}
