//! Random number generator utilities for the simulation.
//!
//! A single seeded [`StdRng`] is created at startup and threaded through
//! every stochastic call, so a fixed seed fully determines a run. The
//! [`Categorical`] sampler wraps an alias-method table built once from a
//! weights vector, giving O(1) draws for the per-base and per-length
//! preference distributions.

use crate::errors::{Result, SimError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::weighted::WeightedAliasIndex;
use rand_distr::Distribution;

/// Create a random number generator, optionally seeded for reproducibility.
///
/// # Arguments
///
/// * `seed` - Optional seed value. If `None`, uses OS entropy for randomness.
///
/// # Returns
///
/// A `StdRng` instance that is used for all simulation randomness.
#[must_use]
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Draw a uniform float in `[0, 1)`.
#[inline]
pub fn uniform_float(rng: &mut StdRng) -> f64 {
    rng.random::<f64>()
}

/// Draw a uniform integer in the inclusive range `[low, high]`.
#[inline]
pub fn uniform_int(rng: &mut StdRng, low: usize, high: usize) -> usize {
    rng.random_range(low..=high)
}

/// A categorical distribution over indices, weighted by a preference vector.
///
/// Built once at construction time (mutators pre-build their samplers) and
/// reused for every draw. Uses the Walker alias method internally.
#[derive(Debug, Clone)]
pub struct Categorical {
    dist: WeightedAliasIndex<f64>,
}

impl Categorical {
    /// Build a sampler from a weights vector.
    ///
    /// Weights do not need to be normalized.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MutatorConfig`] if the vector is empty, sums to
    /// zero, or contains a negative or non-finite weight.
    pub fn new(weights: &[f64]) -> Result<Self> {
        let dist = WeightedAliasIndex::new(weights.to_vec()).map_err(|e| {
            SimError::MutatorConfig { reason: format!("invalid weight vector: {e}") }
        })?;
        Ok(Self { dist })
    }

    /// Draw one index, distributed according to the weights.
    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.dist.sample(rng)
    }
}
