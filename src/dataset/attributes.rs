//! Synthetic attribute sampling
//!
//! Ages and weights come from an injected [`rand::Rng`], so tests can pass a
//! seeded generator while the binary draws from OS entropy.

use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::{Range, RangeInclusive};

/// Inclusive lower bound of the node age attribute
pub const AGE_MIN: u32 = 30;

/// Inclusive upper bound of the node age attribute
pub const AGE_MAX: u32 = 50;

/// Node age domain
pub const AGE_RANGE: RangeInclusive<u32> = AGE_MIN..=AGE_MAX;

/// Edge weight domain (half-open)
pub const WEIGHT_RANGE: Range<f64> = 0.0..1.0;

/// Samples per-node ages and per-edge weights
///
/// # Example
///
/// ```
/// use karate_dataset::AttributeSampler;
///
/// let mut sampler = AttributeSampler::seeded(7);
/// let age = sampler.sample_age();
/// assert!((30..=50).contains(&age));
///
/// let weight = sampler.sample_weight();
/// assert!((0.0..1.0).contains(&weight));
/// ```
#[derive(Debug, Clone)]
pub struct AttributeSampler<R> {
    rng: R,
    ages: Uniform<u32>,
}

impl<R: Rng> AttributeSampler<R> {
    /// Wrap an existing random source
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            ages: Uniform::new_inclusive(AGE_MIN, AGE_MAX),
        }
    }

    /// Age uniformly distributed over `AGE_MIN..=AGE_MAX`
    pub fn sample_age(&mut self) -> u32 {
        self.rng.sample(self.ages)
    }

    /// Weight uniformly distributed over `[0, 1)`
    pub fn sample_weight(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Give back the wrapped random source
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl AttributeSampler<StdRng> {
    /// Deterministic sampler for a fixed seed
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Sampler seeded from OS entropy
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}
