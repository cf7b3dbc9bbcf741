//! Tail addition in single-stranded library preparation.

use super::Mutate;
use crate::errors::{Result, SimError};
use crate::nucleotide::{encode_sequence, Oligo};
use crate::rng::uniform_int;
use rand::rngs::StdRng;

/// Appends a random tail to the 3' end of every oligo.
///
/// The tail length is drawn uniformly from `[n_min, n_max]` and the tail
/// bases uniformly from the allowed base set.
#[derive(Debug, Clone)]
pub struct Tailing {
    tail_bases: Vec<u8>,
    n_min: usize,
    n_max: usize,
}

impl Tailing {
    /// Build a tailing mutator.
    ///
    /// # Errors
    ///
    /// [`SimError::MutatorConfig`] if the allowed base set is empty or
    /// contains invalid characters, or if `n_min > n_max`.
    pub fn new(tail_bases: &str, n_min: usize, n_max: usize) -> Result<Self> {
        let tail_bases = encode_sequence(tail_bases).map_err(|e| SimError::MutatorConfig {
            reason: format!("invalid tail base set: {e}"),
        })?;
        if tail_bases.is_empty() {
            return Err(SimError::MutatorConfig {
                reason: "the tail base set must not be empty".to_string(),
            });
        }
        if n_min > n_max {
            return Err(SimError::MutatorConfig {
                reason: format!("tail length range {n_min}..={n_max} is empty"),
            });
        }
        Ok(Self { tail_bases, n_min, n_max })
    }

    fn mutate(&self, oligo: &mut Oligo, rng: &mut StdRng) {
        let length = uniform_int(rng, self.n_min, self.n_max);
        oligo.reserve(length);
        for _ in 0..length {
            let index = uniform_int(rng, 0, self.tail_bases.len() - 1);
            oligo.push(self.tail_bases[index]);
        }
    }
}

impl Mutate for Tailing {
    fn name(&self) -> &'static str {
        "Tailing"
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
