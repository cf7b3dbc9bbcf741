//! End degradation in photolithographic synthesis.

use super::Mutate;
use crate::errors::Result;
use crate::nucleotide::Oligo;
use crate::rng::Categorical;
use rand::rngs::StdRng;

/// Removes a random number of bases from both ends of every oligo.
///
/// Two lengths are drawn independently from the removal-length categorical;
/// the drawn index is the number of bases removed, so index 0 is a no-op.
/// The first draw is removed from the 3' end, the second from the 5' end.
/// Removal clamps at the oligo length.
#[derive(Debug, Clone)]
pub struct EndShreds {
    length_sampler: Categorical,
}

impl EndShreds {
    /// Build an end-shredding mutator from the removal-length weights.
    ///
    /// # Errors
    ///
    /// [`SimError::MutatorConfig`](crate::errors::SimError::MutatorConfig)
    /// if the weight vector is unusable.
    pub fn new(removal_lengths: &[f64]) -> Result<Self> {
        Ok(Self { length_sampler: Categorical::new(removal_lengths)? })
    }

    fn mutate(&self, oligo: &mut Oligo, rng: &mut StdRng) {
        let tail_cut = self.length_sampler.sample(rng);
        let head_cut = self.length_sampler.sample(rng);

        if tail_cut > 0 {
            oligo.truncate(oligo.len().saturating_sub(tail_cut));
        }
        if head_cut > 0 {
            oligo.drain(..head_cut.min(oligo.len()));
        }
    }
}

impl Mutate for EndShreds {
    fn name(&self) -> &'static str {
        "EndShreds"
    }

    fn manipulates_count(&self) -> bool {
        false
    }

    fn process(&self, pool: &mut Vec<Oligo>, rng: &mut StdRng) {
        for oligo in pool.iter_mut() {
            self.mutate(oligo, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nucleotide::encode_sequence;
    use crate::rng::create_rng;

    #[test]
    fn test_zero_length_draw_is_a_noop() {
        // all weight on index 0: nothing is ever removed
        let mutator = EndShreds::new(&[1.0]).unwrap();
        let mut rng = create_rng(Some(42));
        let original = encode_sequence("ACGTACGT").unwrap();
        let mut pool = vec![original.clone()];
        mutator.process(&mut pool, &mut rng);
        assert_eq!(pool, vec![original]);
    }

    #[test]
    fn test_fixed_removal_from_both_ends() {
        // all weight on index 2: remove 2 from each end
        let mutator = EndShreds::new(&[0.0, 0.0, 1.0]).unwrap();
        let mut rng = create_rng(Some(42));
        let mut pool = vec![encode_sequence("AACGGTTT").unwrap()];
        mutator.process(&mut pool, &mut rng);
        assert_eq!(pool[0], encode_sequence("CGGT").unwrap());
    }

    #[test]
    fn test_removal_clamps_on_short_oligos() {
        let mutator = EndShreds::new(&[0.0, 0.0, 0.0, 0.0, 1.0]).unwrap();
        let mut rng = create_rng(Some(42));
        let mut pool = vec![encode_sequence("ACG").unwrap()];
        mutator.process(&mut pool, &mut rng);
        assert!(pool[0].is_empty());
    }

    #[test]
    fn test_length_distribution_is_respected() {
        let mutator = EndShreds::new(&[0.5, 0.5]).unwrap();
        let mut rng = create_rng(Some(42));
        let mut pool = vec![encode_sequence(&"ACGT".repeat(5)).unwrap(); 1000];
        mutator.process(&mut pool, &mut rng);
        for oligo in &pool {
            assert!((18..=20).contains(&oligo.len()));
        }
    }
}
