//! Sequencing adapter read-through.

use super::Mutate;
use crate::errors::{Result, SimError};
use crate::nucleotide::{encode_sequence, Oligo};
use rand::rngs::StdRng;

/// Appends a fixed adapter sequence to the 3' end of every oligo, modelling
/// read-through into the sequencing adapter.
#[derive(Debug, Clone)]
pub struct SequencingAddAdapter {
    adapter: Vec<u8>,
}

impl SequencingAddAdapter {
    /// Build an adapter mutator from the adapter's textual sequence.
    ///
    /// # Errors
    ///
    /// [`SimError::MutatorConfig`] if the adapter contains invalid characters.
    pub fn new(adapter_sequence: &str) -> Result<Self> {
        let adapter = encode_sequence(adapter_sequence).map_err(|e| SimError::MutatorConfig {
            reason: format!("invalid adapter sequence: {e}"),
        })?;
        Ok(Self { adapter })
    }
}

impl Mutate for SequencingAddAdapter {
    fn name(&self) -> &'static str {
        "SequencingAddAdapter"
    }

    fn manipulates_count(&self) -> bool {
        false
    }

    fn process(&self, pool: &mut Vec<Oligo>, _rng: &mut StdRng) {
        for oligo in pool.iter_mut() {
            oligo.extend_from_slice(&self.adapter);
        }
    }
}
