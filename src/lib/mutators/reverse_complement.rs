//! Strand doubling for double-stranded workflows.

use super::Mutate;
use crate::nucleotide::{reverse_complement, Oligo};
use rand::rngs::StdRng;

/// Emits each oligo followed by its reverse complement, doubling the pool.
#[derive(Debug, Clone, Default)]
pub struct AddReverseComplement;

impl Mutate for AddReverseComplement {
    fn name(&self) -> &'static str {
        "AddReverseComplement"
    }

    fn manipulates_count(&self) -> bool {
        true
    }

    fn process(&self, pool: &mut Vec<Oligo>, _rng: &mut StdRng) {
        let mut new_oligos = Vec::with_capacity(pool.len() * 2);
        for oligo in pool.iter() {
            new_oligos.push(oligo.clone());
            new_oligos.push(reverse_complement(oligo));
        }
        *pool = new_oligos;
    }
}
