//! Per-oligo sink feeding the output writers.

use crate::mutators::{apply_chain, Mutator};
use crate::nucleotide::{reverse_complement, Oligo};
use crate::seqio::SequenceWriter;
use anyhow::{bail, Result};
use rand::rngs::StdRng;

/// Applies an optional post-chain to each collected oligo and writes the
/// result to one (single-end) or two (paired-end) output writers.
///
/// For paired-end output the reverse read is the reverse complement of the
/// *original* oligo, run through the same post-chain independently. The
/// post-chain must consist of count-preserving mutators (adapter, pad/trim,
/// substitutions): the collector collapses the chain result to a single
/// oligo per read.
///
/// The collector borrows its writers and chain for the duration of one
/// pipeline pass; the pipeline keeps ownership.
pub struct OligoCollector<'a> {
    writer_fw: &'a mut SequenceWriter,
    writer_rv: Option<&'a mut SequenceWriter>,
    mutators: Option<&'a [Mutator]>,
}

impl<'a> OligoCollector<'a> {
    /// A single-end collector writing every oligo to one writer.
    pub fn single_end(writer_fw: &'a mut SequenceWriter) -> Self {
        Self { writer_fw, writer_rv: None, mutators: None }
    }

    /// A paired-end collector writing forward and reverse reads.
    pub fn paired_end(
        writer_fw: &'a mut SequenceWriter,
        writer_rv: &'a mut SequenceWriter,
    ) -> Self {
        Self { writer_fw, writer_rv: Some(writer_rv), mutators: None }
    }

    /// Attach a post-chain applied to every read before writing.
    #[must_use]
    pub fn with_mutators(mut self, mutators: &'a [Mutator]) -> Self {
        self.mutators = Some(mutators);
        self
    }

    fn apply_mutators(&self, oligo: Oligo, rng: &mut StdRng) -> Result<Oligo> {
        let mut pool = vec![oligo];
        if let Some(mutators) = self.mutators {
            apply_chain(mutators, &mut pool, rng);
        }
        match pool.into_iter().next() {
            Some(read) => Ok(read),
            None => bail!("the collector post-chain emptied the pool; it must be count-preserving"),
        }
    }

    /// Collect one oligo: apply the post-chain and write the read(s).
    ///
    /// # Errors
    ///
    /// Fails on write errors or if the post-chain violates its
    /// count-preserving contract.
    pub fn collect(&mut self, oligo: &Oligo, rng: &mut StdRng) -> Result<()> {
        let forward = self.apply_mutators(oligo.clone(), rng)?;
        self.writer_fw.write_oligo(&forward)?;

        if self.writer_rv.is_some() {
            let reverse = self.apply_mutators(reverse_complement(oligo), rng)?;
            if let Some(writer_rv) = self.writer_rv.as_deref_mut() {
                writer_rv.write_oligo(&reverse)?;
            }
        }
        Ok(())
    }
}
