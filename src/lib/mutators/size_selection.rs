//! Length-dependent retention during bead-based purification.

use super::{is_mutation, Mutate};
use crate::nucleotide::Oligo;
use rand::rngs::StdRng;

/// Drops or keeps oligos based on their length.
///
/// An oligo of length `L` is dropped when `L <= lower_cutoff`, kept
/// unconditionally when `L >= upper_threshold`, and otherwise kept with
/// probability `(L - lower) / (upper - lower)`.
#[derive(Debug, Clone)]
pub struct SizeSelection {
    lower_cutoff: usize,
    upper_threshold: usize,
}

impl SizeSelection {
    /// Build a size selection mutator with the given cutoffs.
    #[must_use]
    pub fn new(lower_cutoff: usize, upper_threshold: usize) -> Self {
        Self { lower_cutoff, upper_threshold }
    }

    fn select(&self, oligo: &Oligo, new_oligos: &mut Vec<Oligo>, rng: &mut StdRng) {
        let size = oligo.len();
        if size <= self.lower_cutoff {
            return;
        }
        if size >= self.upper_threshold {
            new_oligos.push(oligo.clone());
            return;
        }

        let p_select =
            (size - self.lower_cutoff) as f64 / (self.upper_threshold - self.lower_cutoff) as f64;
        if is_mutation(rng, p_select) {
            new_oligos.push(oligo.clone());
        }
    }
}

impl Mutate for SizeSelection {
    fn name(&self) -> &'static str {
        "SizeSelection"
    }

    fn manipulates_count(&self) -> bool {
        true
    }

    fn process(&self, pool: &mut Vec<Oligo>, rng: &mut StdRng) {
        let mut new_oligos = Vec::new();
        for oligo in pool.iter() {
            self.select(oligo, &mut new_oligos, rng);
        }
        *pool = new_oligos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    fn pool_of_length(len: usize, n: usize) -> Vec<Oligo> {
        vec![vec![1u8; len]; n]
    }

    #[test]
    fn test_short_oligos_are_dropped() {
        let mutator = SizeSelection::new(60, 140);
        let mut rng = create_rng(Some(42));
        let mut pool = pool_of_length(50, 10);
        mutator.process(&mut pool, &mut rng);
        assert!(pool.is_empty());

        // the lower cutoff itself is also dropped
        let mut pool = pool_of_length(60, 10);
        mutator.process(&mut pool, &mut rng);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_long_oligos_are_kept() {
        let mutator = SizeSelection::new(60, 140);
        let mut rng = create_rng(Some(42));
        let mut pool = pool_of_length(140, 10);
        mutator.process(&mut pool, &mut rng);
        assert_eq!(pool.len(), 10);
    }

    #[test]
    fn test_equal_cutoffs_form_a_hard_threshold() {
        let mutator = SizeSelection::new(100, 100);
        let mut rng = create_rng(Some(42));

        let mut pool = pool_of_length(100, 10);
        mutator.process(&mut pool, &mut rng);
        assert!(pool.is_empty());

        let mut pool = pool_of_length(101, 10);
        mutator.process(&mut pool, &mut rng);
        assert_eq!(pool.len(), 10);
    }

    #[test]
    fn test_intermediate_lengths_are_kept_proportionally() {
        let mutator = SizeSelection::new(0, 100);
        let mut rng = create_rng(Some(42));
        let mut pool = pool_of_length(50, 10_000);
        mutator.process(&mut pool, &mut rng);
        // keep probability is 0.5; allow generous sampling tolerance
        assert!((4500..5500).contains(&pool.len()), "kept {}", pool.len());
    }
}
