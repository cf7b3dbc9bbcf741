//! Oligo generation from design sequences.

use crate::mutators::{apply_chain, Mutator};
use crate::nucleotide::Oligo;
use rand::rngs::StdRng;

/// Run one design through the mutator chain once, replacing `pool` with the
/// surviving oligos of this trial.
fn produce_from_design(
    pool: &mut Vec<Oligo>,
    design: &Oligo,
    mutators: &[Mutator],
    rng: &mut StdRng,
) {
    pool.clear();
    pool.push(design.clone());
    apply_chain(mutators, pool, rng);
}

/// Generate `n_oligos` independent derivations of a design sequence.
///
/// Each of the `n_oligos` iterations is an independent stochastic trial:
/// the chain runs over a scratch pool seeded with one copy of the design,
/// and all survivors are appended to `generated`. Count-varying mutators
/// can make a single trial yield zero or many oligos. With an empty chain
/// the design is copied verbatim.
pub fn generate_oligos(
    generated: &mut Vec<Oligo>,
    design: &Oligo,
    n_oligos: u64,
    mutators: &[Mutator],
    rng: &mut StdRng,
) {
    if n_oligos == 0 {
        return;
    }
    if mutators.is_empty() {
        for _ in 0..n_oligos {
            generated.push(design.clone());
        }
        return;
    }

    let mut pool: Vec<Oligo> = Vec::new();
    for _ in 0..n_oligos {
        produce_from_design(&mut pool, design, mutators, rng);
        generated.append(&mut pool);
    }
}
