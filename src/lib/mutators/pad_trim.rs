//! Read-length normalization at the sequencer.

use super::Mutate;
use crate::nucleotide::{Oligo, NUCLEOTIDE_A, NUCLEOTIDE_T};
use crate::rng::uniform_int;
use rand::rngs::StdRng;

/// Pads or trims every oligo to the configured read length.
///
/// Oligos shorter than the read length are padded at the 3' end with
/// uniformly random bases; longer oligos are truncated. The decision is
/// made on the length observed at call time, so padding never triggers a
/// subsequent trim.
#[derive(Debug, Clone)]
pub struct SequencingPadTrim {
    read_length: usize,
}

impl SequencingPadTrim {
    /// Build a pad/trim mutator for the given read length.
    #[must_use]
    pub fn new(read_length: usize) -> Self {
        Self { read_length }
    }

    fn mutate(&self, oligo: &mut Oligo, rng: &mut StdRng) {
        let length = oligo.len();

        if length < self.read_length {
            oligo.reserve(self.read_length - length);
            for _ in 0..self.read_length - length {
                oligo.push(uniform_int(rng, NUCLEOTIDE_A as usize, NUCLEOTIDE_T as usize) as u8);
            }
        }

        if length > self.read_length {
            oligo.truncate(self.read_length);
        }
    }
}

impl Mutate for SequencingPadTrim {
    fn name(&self) -> &'static str {
        "SequencingPadTrim"
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
