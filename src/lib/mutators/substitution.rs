//! Base substitutions during synthesis, amplification, and sequencing.

use super::{event_positions, normalize_weights, Mutate};
use crate::errors::{Result, SimError};
use crate::nucleotide::Oligo;
use crate::rng::Categorical;
use rand::rngs::StdRng;

/// Substitutes bases at randomly chosen positions.
///
/// Parameterised by a 12-vector of joint `from->to` transition
/// probabilities in the order
/// `(A>C, A>G, A>T, C>A, C>G, C>T, G>A, G>C, G>T, T>A, T>C, T>G)`.
/// The per-position event probability is `4 * rate * marginal[base]`, with
/// the marginal derived from the transition vector. The replacement base is
/// drawn from the source base's conditional over the three non-identity
/// targets.
///
/// Replacement bases are pre-drawn per source base for the whole event set.
/// When event ranges overlap, a substitution can change the base identity a
/// later event observes, exhausting one source's pool early; in that case
/// the pool offset wraps to zero and the position is left unchanged. This
/// matches the established output distribution and is kept intentionally.
#[derive(Debug, Clone)]
pub struct SubstitutionEvents {
    rate: f64,
    source_preference: Vec<f64>,
    target_samplers: Vec<Option<Categorical>>,
    event_lengths: Option<Categorical>,
}

impl SubstitutionEvents {
    /// Build a substitution mutator from the 12 joint transition probabilities.
    ///
    /// # Errors
    ///
    /// [`SimError::MutatorConfig`] if `transition_preference` does not have
    /// 12 elements or the weight vectors are unusable.
    pub fn new(
        rate: f64,
        transition_preference: &[f64],
        event_lengths: Option<&[f64]>,
    ) -> Result<Self> {
        if transition_preference.len() != 12 {
            return Err(SimError::MutatorConfig {
                reason: "the transition preference vector must have 4*3 elements".to_string(),
            });
        }
        let transitions = normalize_weights(transition_preference)?;

        // marginal probability of an event at each source base
        let marginals: Vec<f64> =
            (0..4).map(|source| transitions[source * 3..source * 3 + 3].iter().sum()).collect();
        let source_preference = normalize_weights(&marginals)?;

        // conditional sampler over the three non-identity targets, per source;
        // a source with no outgoing probability never fires, so it gets none
        let mut target_samplers = Vec::with_capacity(4);
        for source in 0..4 {
            let conditional = &transitions[source * 3..source * 3 + 3];
            if conditional.iter().sum::<f64>() > 0.0 {
                target_samplers.push(Some(Categorical::new(conditional)?));
            } else {
                target_samplers.push(None);
            }
        }

        Ok(Self {
            rate,
            source_preference,
            target_samplers,
            event_lengths: event_lengths.map(Categorical::new).transpose()?,
        })
    }

    fn mutate(&self, oligo: &mut Oligo, rng: &mut StdRng) {
        let rate = self.rate;
        let positions = event_positions(rng, oligo.len(), |i| {
            4.0 * rate * self.source_preference[(oligo[i] - 1) as usize]
        });
        if positions.is_empty() {
            return;
        }

        let mut lengths: Vec<usize> = match &self.event_lengths {
            Some(sampler) => positions.iter().map(|_| sampler.sample(rng) + 1).collect(),
            None => vec![1; positions.len()],
        };

        // clip run lengths at the oligo end and tally how many replacements
        // each source base needs
        let mut needed_by_source = [0usize; 4];
        for (k, &position) in positions.iter().enumerate() {
            let length = lengths[k].min(oligo.len() - position);
            lengths[k] = length;
            for j in 0..length {
                needed_by_source[(oligo[position + j] - 1) as usize] += 1;
            }
        }

        // pre-draw the replacement pool for each source base; a drawn target
        // index skips over the source base itself
        let mut pools: [Vec<u8>; 4] = Default::default();
        for source in 0..4 {
            if needed_by_source[source] == 0 {
                continue;
            }
            let Some(sampler) = &self.target_samplers[source] else {
                continue;
            };
            pools[source] = (0..needed_by_source[source])
                .map(|_| {
                    let mut base = sampler.sample(rng) as u8 + 1;
                    if base >= source as u8 + 1 {
                        base += 1;
                    }
                    base
                })
                .collect();
        }

        // apply the substitutions; on pool exhaustion, wrap the offset and
        // leave the position unchanged (see type-level docs)
        let mut offsets = [0usize; 4];
        for (k, &position) in positions.iter().enumerate() {
            for j in 0..lengths[k] {
                let source = (oligo[position + j] - 1) as usize;
                if offsets[source] >= pools[source].len() {
                    offsets[source] = 0;
                    continue;
                }
                oligo[position + j] = pools[source][offsets[source]];
                offsets[source] += 1;
            }
        }
    }
}

impl Mutate for SubstitutionEvents {
    fn name(&self) -> &'static str {
        "SubstitutionEvents"
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
