//! Insertion of spurious bases during synthesis.

use super::{event_positions, Mutate};
use crate::errors::{Result, SimError};
use crate::nucleotide::Oligo;
use crate::rng::Categorical;
use rand::rngs::StdRng;

/// Inserts runs of random bases after randomly chosen positions.
///
/// Insertions are equally likely at every position. The inserted bases are
/// drawn from a base-preference categorical; the run length is 1 unless a
/// length-preference vector is supplied, in which case it is drawn from
/// that categorical shifted so the minimum length is 1.
#[derive(Debug, Clone)]
pub struct InsertionEvents {
    rate: f64,
    base_sampler: Categorical,
    event_lengths: Option<Categorical>,
}

impl InsertionEvents {
    /// Build an insertion mutator.
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
            base_sampler: Categorical::new(base_preference)?,
            event_lengths: event_lengths.map(Categorical::new).transpose()?,
        })
    }

    fn mutate(&self, oligo: &mut Oligo, rng: &mut StdRng) {
        let positions = event_positions(rng, oligo.len(), |_| self.rate);
        if positions.is_empty() {
            return;
        }

        let lengths: Vec<usize> = match &self.event_lengths {
            Some(sampler) => positions.iter().map(|_| sampler.sample(rng) + 1).collect(),
            None => vec![1; positions.len()],
        };
        let total_insertions: usize = lengths.iter().sum();

        let new_bases: Vec<u8> =
            (0..total_insertions).map(|_| self.base_sampler.sample(rng) as u8 + 1).collect();

        // apply from the highest position downward so earlier indices stay
        // valid; the pre-drawn bases are consumed from the front
        let mut offset = 0;
        for i in (0..positions.len()).rev() {
            let length = lengths[i];
            let at = positions[i] + 1;
            oligo.splice(at..at, new_bases[offset..offset + length].iter().copied());
            offset += length;
        }
    }
}

impl Mutate for InsertionEvents {
    fn name(&self) -> &'static str {
        "InsertionEvents"
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
