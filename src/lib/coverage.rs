//! Two-stage coverage model for oligo pools.
//!
//! Synthesis does not produce designs in equal amounts: the copy number per
//! design follows a log-normal bias. [`initial_coverage`] turns that bias
//! into a per-design count vector, and [`sample_by_count`] resamples an
//! existing count vector down (or up) to a target total, with replacement.

use crate::errors::{Result, SimError};
use crate::rng::Categorical;
use log::info;
use rand::rngs::StdRng;
use rand_distr::{Distribution, LogNormal};

/// Mean number of oligos drawn per design when generating the initial
/// synthesis coverage.
pub const INITIAL_COVERAGE_DEPTH: usize = 100;

/// Sample a fixed number of oligos from a relative abundance vector, with
/// replacement, and return the per-index histogram.
fn sample_from_relative_coverage(
    relative_coverage: &[f64],
    n_oligos: usize,
    rng: &mut StdRng,
) -> Result<Vec<u64>> {
    if n_oligos < 1 {
        return Err(SimError::NonPositiveTarget { requested: n_oligos });
    }
    if relative_coverage.is_empty() {
        return Err(SimError::EmptyPool);
    }

    let sampler = Categorical::new(relative_coverage)?;

    let mut sampled_coverage = vec![0u64; relative_coverage.len()];
    for _ in 0..n_oligos {
        sampled_coverage[sampler.sample(rng)] += 1;
    }

    let total: u64 = sampled_coverage.iter().sum();
    info!(
        "Sampled total of {} oligos from {} sequences for a mean coverage of {:.2}",
        total,
        relative_coverage.len(),
        total as f64 / relative_coverage.len() as f64
    );
    Ok(sampled_coverage)
}

/// Generate the initial per-design coverage under a log-normal synthesis bias.
///
/// Draws one log-normal(0, `log_std`) abundance per design, normalizes the
/// result to a probability vector, and samples
/// `n_sequences * per_design_coverage` oligos from it with replacement.
///
/// # Errors
///
/// [`SimError::EmptyPool`] if `n_sequences` is 0, [`SimError::NonPositiveTarget`]
/// if the sample target works out below 1, and [`SimError::MutatorConfig`] for
/// an unusable `log_std`.
pub fn initial_coverage(
    n_sequences: usize,
    log_std: f64,
    per_design_coverage: usize,
    rng: &mut StdRng,
) -> Result<Vec<u64>> {
    if n_sequences == 0 {
        return Err(SimError::EmptyPool);
    }

    let lognorm = LogNormal::new(0.0, log_std).map_err(|e| SimError::MutatorConfig {
        reason: format!("invalid coverage bias {log_std}: {e}"),
    })?;

    let mut relative_coverage: Vec<f64> =
        (0..n_sequences).map(|_| lognorm.sample(rng)).collect();
    let sum: f64 = relative_coverage.iter().sum();
    for value in &mut relative_coverage {
        *value /= sum;
    }

    sample_from_relative_coverage(&relative_coverage, n_sequences * per_design_coverage, rng)
}

/// Resample an abundance vector to a target total, with replacement.
///
/// The counts are normalized to a probability vector, `n_sampled_oligos`
/// draws are taken from the corresponding categorical, and the resulting
/// histogram is returned. The output always has the same length as the
/// input and sums to the target.
///
/// # Errors
///
/// [`SimError::EmptyPool`] if `oligo_counts` is empty or sums to zero,
/// [`SimError::NonPositiveTarget`] if `n_sampled_oligos` is below 1.
pub fn sample_by_count(
    oligo_counts: &[u64],
    n_sampled_oligos: usize,
    rng: &mut StdRng,
) -> Result<Vec<u64>> {
    if oligo_counts.is_empty() {
        return Err(SimError::EmptyPool);
    }
    let total: u64 = oligo_counts.iter().sum();
    if total == 0 {
        return Err(SimError::EmptyPool);
    }

    let relative_coverage: Vec<f64> =
        oligo_counts.iter().map(|&count| count as f64 / total as f64).collect();

    sample_from_relative_coverage(&relative_coverage, n_sampled_oligos, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    #[test]
    fn test_initial_coverage_length_and_total() {
        let mut rng = create_rng(Some(42));
        let coverage = initial_coverage(25, 0.3, 100, &mut rng).unwrap();
        assert_eq!(coverage.len(), 25);
        assert_eq!(coverage.iter().sum::<u64>(), 2500);
    }

    #[test]
    fn test_initial_coverage_empty_pool() {
        let mut rng = create_rng(Some(42));
        assert!(matches!(
            initial_coverage(0, 0.3, 100, &mut rng),
            Err(SimError::EmptyPool)
        ));
    }

    #[test]
    fn test_initial_coverage_zero_target() {
        let mut rng = create_rng(Some(42));
        assert!(matches!(
            initial_coverage(5, 0.3, 0, &mut rng),
            Err(SimError::NonPositiveTarget { requested: 0 })
        ));
    }

    #[test]
    fn test_sample_by_count_total() {
        let mut rng = create_rng(Some(42));
        let counts = vec![10, 20, 30, 40];
        let sampled = sample_by_count(&counts, 500, &mut rng).unwrap();
        assert_eq!(sampled.len(), 4);
        assert_eq!(sampled.iter().sum::<u64>(), 500);
    }

    #[test]
    fn test_sample_by_count_respects_zero_counts() {
        let mut rng = create_rng(Some(42));
        let counts = vec![0, 100, 0];
        let sampled = sample_by_count(&counts, 50, &mut rng).unwrap();
        assert_eq!(sampled, vec![0, 50, 0]);
    }

    #[test]
    fn test_sample_by_count_empty_pool() {
        let mut rng = create_rng(Some(42));
        assert!(matches!(sample_by_count(&[], 10, &mut rng), Err(SimError::EmptyPool)));
        assert!(matches!(sample_by_count(&[0, 0], 10, &mut rng), Err(SimError::EmptyPool)));
    }

    #[test]
    fn test_sample_by_count_zero_target() {
        let mut rng = create_rng(Some(42));
        assert!(matches!(
            sample_by_count(&[1, 1], 0, &mut rng),
            Err(SimError::NonPositiveTarget { requested: 0 })
        ));
    }

    #[test]
    fn test_fixed_seed_reproducible() {
        let mut rng1 = create_rng(Some(1234));
        let mut rng2 = create_rng(Some(1234));
        let coverage1 = initial_coverage(50, 0.44, 100, &mut rng1).unwrap();
        let coverage2 = initial_coverage(50, 0.44, 100, &mut rng2).unwrap();
        assert_eq!(coverage1, coverage2);
    }

    #[test]
    fn test_zero_bias_is_statistically_flat() {
        // With log_std = 0 the log-normal degenerates to a point mass, so
        // sampling is uniform across designs. Chi-square goodness of fit
        // against the uniform distribution, 999 degrees of freedom; the
        // critical value at alpha = 0.01 is ~1106 (Wilson-Hilferty).
        let mut rng = create_rng(Some(42));
        let n = 1000;
        let coverage = initial_coverage(n, 0.0, 1, &mut rng).unwrap();
        assert_eq!(coverage.iter().sum::<u64>(), n as u64);

        let expected = 1.0;
        let chi_square: f64 = coverage
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();
        assert!(chi_square < 1106.0, "chi_square = {chi_square}");
    }

    #[test]
    fn test_high_bias_is_skewed() {
        let mut rng = create_rng(Some(42));
        let coverage = initial_coverage(200, 1.5, 100, &mut rng).unwrap();
        let max = *coverage.iter().max().unwrap();
        let min = *coverage.iter().min().unwrap();
        assert!(max > 4 * min.max(1), "expected a skewed distribution, got {min}..{max}");
    }
}
