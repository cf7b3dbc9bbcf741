//! Stochastic oligo transforms.
//!
//! Each mutator is an immutable, parameterised transform over a pool of
//! oligos, applied in chain order by the pipeline. Mutators come in two
//! shapes:
//!
//! - *count-preserving* mutators rewrite each oligo in place;
//! - *count-varying* mutators rebuild the pool and may emit zero or many
//!   oligos per input (breakage, size selection, reverse-complement
//!   doubling). An empty rebuild clears the pool — the only way an oligo
//!   disappears.
//!
//! All preference vectors are validated and their samplers pre-built at
//! construction time; the per-oligo hot path only draws from the shared
//! RNG.

pub mod adapter;
pub mod breakage;
pub mod deletion;
pub mod end_shreds;
pub mod insertion;
pub mod pad_trim;
pub mod reverse_complement;
pub mod size_selection;
pub mod substitution;
pub mod tailing;

pub use adapter::SequencingAddAdapter;
pub use breakage::BreakageEvents;
pub use deletion::DeletionEvents;
pub use end_shreds::EndShreds;
pub use insertion::InsertionEvents;
pub use pad_trim::SequencingPadTrim;
pub use reverse_complement::AddReverseComplement;
pub use size_selection::SizeSelection;
pub use substitution::SubstitutionEvents;
pub use tailing::Tailing;

use crate::errors::{Result, SimError};
use crate::nucleotide::Oligo;
use enum_dispatch::enum_dispatch;
use rand::rngs::StdRng;
use rand::Rng;

/// Capability trait implemented by every mutator.
#[enum_dispatch]
pub trait Mutate {
    /// Human-readable mutator name, used in logs.
    fn name(&self) -> &'static str;

    /// True iff this mutator may produce zero or more than one oligo from a
    /// single input.
    fn manipulates_count(&self) -> bool;

    /// Apply the transform to every oligo in the pool.
    fn process(&self, pool: &mut Vec<Oligo>, rng: &mut StdRng);
}

/// A concrete mutator. The pipeline holds chains as `Vec<Mutator>`.
#[enum_dispatch(Mutate)]
#[derive(Debug, Clone)]
pub enum Mutator {
    InsertionEvents(InsertionEvents),
    DeletionEvents(DeletionEvents),
    SubstitutionEvents(SubstitutionEvents),
    BreakageEvents(BreakageEvents),
    SizeSelection(SizeSelection),
    AddReverseComplement(AddReverseComplement),
    Tailing(Tailing),
    EndShreds(EndShreds),
    SequencingAddAdapter(SequencingAddAdapter),
    SequencingPadTrim(SequencingPadTrim),
}

/// Run a chain over a pool, in order.
pub fn apply_chain(chain: &[Mutator], pool: &mut Vec<Oligo>, rng: &mut StdRng) {
    for mutator in chain {
        mutator.process(pool, rng);
    }
}

/// Bernoulli draw: does a mutation event with probability `probability` occur?
#[inline]
pub(crate) fn is_mutation(rng: &mut StdRng, probability: f64) -> bool {
    rng.random::<f64>() < probability
}

/// Positions where independent per-position Bernoulli draws succeeded, in
/// ascending order. `rate_at` gives the event probability at each index.
pub(crate) fn event_positions<F>(rng: &mut StdRng, len: usize, rate_at: F) -> Vec<usize>
where
    F: Fn(usize) -> f64,
{
    (0..len).filter(|&i| is_mutation(rng, rate_at(i))).collect()
}

/// Normalize a weights vector to sum to 1.
pub(crate) fn normalize_weights(weights: &[f64]) -> Result<Vec<f64>> {
    let sum: f64 = weights.iter().sum();
    if !(sum > 0.0 && sum.is_finite()) {
        return Err(SimError::MutatorConfig {
            reason: "weight vector must have a positive, finite sum".to_string(),
        });
    }
    if weights.iter().any(|&w| w < 0.0 || !w.is_finite()) {
        return Err(SimError::MutatorConfig {
            reason: "weights must be non-negative and finite".to_string(),
        });
    }
    Ok(weights.iter().map(|&w| w / sum).collect())
}
