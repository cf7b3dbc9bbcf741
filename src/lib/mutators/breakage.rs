//! Strand breakage during storage and decay.

use super::{event_positions, normalize_weights, Mutate};
use crate::errors::{Result, SimError};
use crate::nucleotide::Oligo;
use rand::rngs::StdRng;

/// Breaks oligos into fragments at randomly chosen positions.
///
/// The per-position break probability is `4 * rate * preference[base]`. A
/// break consumes the base at the cut position; the surviving fragments
/// between cuts are emitted in order, skipping empty ones. An oligo without
/// any cut passes through unchanged.
#[derive(Debug, Clone)]
pub struct BreakageEvents {
    rate: f64,
    base_preference: Vec<f64>,
}

impl BreakageEvents {
    /// Build a breakage mutator.
    ///
    /// # Errors
    ///
    /// [`SimError::MutatorConfig`] if `base_preference` does not have 4
    /// elements or is unusable as a weight vector.
    pub fn new(rate: f64, base_preference: &[f64]) -> Result<Self> {
        if base_preference.len() != 4 {
            return Err(SimError::MutatorConfig {
                reason: "the base preference vector must have 4 elements".to_string(),
            });
        }
        Ok(Self { rate, base_preference: normalize_weights(base_preference)? })
    }

    fn fragment(&self, oligo: &Oligo, new_oligos: &mut Vec<Oligo>, rng: &mut StdRng) {
        let rate = self.rate;
        let positions = event_positions(rng, oligo.len(), |i| {
            4.0 * rate * self.base_preference[(oligo[i] - 1) as usize]
        });
        if positions.is_empty() {
            new_oligos.push(oligo.clone());
            return;
        }

        let mut last_position = 0;
        for &position in &positions {
            // adjacent cuts leave no fragment between them
            if position == last_position {
                last_position = position + 1;
                continue;
            }
            new_oligos.push(oligo[last_position..position].to_vec());
            last_position = position + 1;
        }
        if last_position < oligo.len() {
            new_oligos.push(oligo[last_position..].to_vec());
        }
    }
}

impl Mutate for BreakageEvents {
    fn name(&self) -> &'static str {
        "BreakageEvents"
    }

    fn manipulates_count(&self) -> bool {
        true
    }

    fn process(&self, pool: &mut Vec<Oligo>, rng: &mut StdRng) {
        let mut new_oligos = Vec::new();
        for oligo in pool.iter() {
            self.fragment(oligo, &mut new_oligos, rng);
        }
        *pool = new_oligos;
    }
}
