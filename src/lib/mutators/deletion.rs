//! Deletion of bases during synthesis or storage.

use super::{event_positions, normalize_weights, Mutate};
use crate::errors::{Result, SimError};
use crate::nucleotide::Oligo;
use crate::rng::Categorical;
use rand::rngs::StdRng;

/// Deletes runs of bases starting at randomly chosen positions.
///
/// The per-position event probability is `4 * rate * preference[base]`; the
/// factor 4 converts the per-base probability into a per-position rate.
/// Runs are length 1 unless a length-preference vector is supplied, and are
/// clipped at the end of the oligo.
#[derive(Debug, Clone)]
pub struct DeletionEvents {
    rate: f64,
    base_preference: Vec<f64>,
    event_lengths: Option<Categorical>,
}

impl DeletionEvents {
    /// Build a deletion mutator.
    ///
    /// # Errors
    ///
    /// [`SimError::MutatorConfig`] if `base_preference` does not have 4
    /// elements or either weight vector is unusable.
    pub fn new(
        rate: f64,
        base_preference: &[f64],
        event_lengths: Option<&[f64]>,
    ) -> Result<Self> {
        if base_preference.len() != 4 {
            return Err(SimError::MutatorConfig {
                reason: "the base preference vector must have 4 elements".to_string(),
            });
        }
        Ok(Self {
            rate,
            base_preference: normalize_weights(base_preference)?,
            event_lengths: event_lengths.map(Categorical::new).transpose()?,
        })
    }

    fn mutate(&self, oligo: &mut Oligo, rng: &mut StdRng) {
        let rate = self.rate;
        let positions = event_positions(rng, oligo.len(), |i| {
            4.0 * rate * self.base_preference[(oligo[i] - 1) as usize]
        });
        if positions.is_empty() {
            return;
        }

        let lengths: Vec<usize> = match &self.event_lengths {
            Some(sampler) => positions.iter().map(|_| sampler.sample(rng) + 1).collect(),
            None => vec![1; positions.len()],
        };

        // delete from the highest position downward, clipping at the end
        for i in (0..positions.len()).rev() {
            let position = positions[i];
            let length = lengths[i].min(oligo.len() - position);
            oligo.drain(position..position + length);
        }
    }
}

impl Mutate for DeletionEvents {
    fn name(&self) -> &'static str {
        "DeletionEvents"
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

    const UNIFORM: [f64; 4] = [0.25, 0.25, 0.25, 0.25];

    #[test]
    fn test_zero_rate_is_identity() {
        let mutator = DeletionEvents::new(0.0, &UNIFORM, None).unwrap();
        let mut rng = create_rng(Some(42));
        let original = encode_sequence("ACGTACGT").unwrap();
        let mut pool = vec![original.clone()];
        mutator.process(&mut pool, &mut rng);
        assert_eq!(pool, vec![original]);
    }

    #[test]
    fn test_saturated_rate_empties_oligo() {
        // 4 * 1.0 * 0.25 = 1.0 per position: every base is deleted
        let mutator = DeletionEvents::new(1.0, &UNIFORM, None).unwrap();
        let mut rng = create_rng(Some(42));
        let mut pool = vec![encode_sequence("ACGTACGTACGT").unwrap()];
        mutator.process(&mut pool, &mut rng);
        assert!(pool[0].is_empty());
    }

    #[test]
    fn test_base_preference_only_deletes_preferred_base() {
        // all deletion probability on A
        let mutator = DeletionEvents::new(1.0, &[1.0, 0.0, 0.0, 0.0], None).unwrap();
        let mut rng = create_rng(Some(42));
        let mut pool = vec![encode_sequence("ACAGAT").unwrap()];
        mutator.process(&mut pool, &mut rng);
        assert_eq!(pool[0], encode_sequence("CGT").unwrap());
    }

    #[test]
    fn test_run_length_clips_at_end() {
        // every A fires with a run of 4, clipped at the oligo end
        let mutator =
            DeletionEvents::new(1.0, &[1.0, 0.0, 0.0, 0.0], Some(&[0.0, 0.0, 0.0, 1.0])).unwrap();
        let mut rng = create_rng(Some(42));
        let mut pool = vec![encode_sequence("CCCCCA").unwrap()];
        mutator.process(&mut pool, &mut rng);
        assert_eq!(pool[0], encode_sequence("CCCCC").unwrap());
    }

    #[test]
    fn test_length_reduction_matches_event_count() {
        let mutator = DeletionEvents::new(0.05, &UNIFORM, None).unwrap();
        let mut rng = create_rng(Some(42));
        let original = encode_sequence(&"ACGT".repeat(50)).unwrap();
        let mut pool = vec![original.clone()];
        mutator.process(&mut pool, &mut rng);
        assert!(pool[0].len() <= original.len());
    }

    #[test]
    fn test_wrong_preference_length_is_rejected() {
        assert!(DeletionEvents::new(0.1, &[0.25; 3], None).is_err());
    }
}
