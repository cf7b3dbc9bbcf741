//! Two-pass pipeline orchestration.
//!
//! Pass 1 (synthesis & sampling) reads the design pool, applies the
//! synthesis coverage model, runs every design through the initial mutator
//! chain, and writes the resulting physical oligos to a binary intermediate
//! pool. Pass 2 (recovery & sequencing) resamples that pool to the
//! sequencing depth, runs each oligo through the recovery chain, and hands
//! every read to the paired-end collector, whose post-chain is the
//! sequencing mutators.
//!
//! The intermediate file bounds peak memory: at no point does the whole
//! pool live in memory, only the fan-out of a single sequence. The file is
//! removed on every exit path, error or success.

use crate::collector::OligoCollector;
use crate::coverage;
use crate::errors::SimError;
use crate::factory::generate_oligos;
use crate::logging::format_duration;
use crate::mutators::Mutator;
use crate::nucleotide::{Oligo, DEFAULT_SEQUENCE_LENGTH};
use crate::progress::ProgressTracker;
use crate::seqio::{ReadMode, SequenceReader, SequenceWriter, WriteMode};
use anyhow::Result;
use log::{error, info, warn};
use rand::rngs::StdRng;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// The three mutator chains of a run.
#[derive(Debug, Clone)]
pub struct MutatorChains {
    /// Synthesis, storage, and sampling errors (pass 1).
    pub initial: Vec<Mutator>,
    /// Recovery PCR errors (pass 2).
    pub recovery: Vec<Mutator>,
    /// Per-read sequencing errors, applied by the collector.
    pub sequencing: Vec<Mutator>,
}

/// File locations, coverages, and output format of a run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Design pool input (text, FASTA, or FASTQ).
    pub input: PathBuf,
    /// Path of the binary intermediate pool.
    pub intermediate: PathBuf,
    /// Forward read output (R1).
    pub output_r1: PathBuf,
    /// Reverse read output (R2).
    pub output_r2: PathBuf,
    /// Log-normal standard deviation of the synthesis coverage bias.
    pub coverage_bias: f64,
    /// Mean physical oligos per design sequence.
    pub physical_coverage: f64,
    /// Mean sequencing reads per design sequence.
    pub sequencing_coverage: f64,
    /// Output format for R1 and R2.
    pub format: WriteMode,
}

/// Walk a sequence file, generating `oligo_counts[i]` oligos from sequence
/// `i` through the mutator chain and feeding each to the collector.
fn process(
    reader: &mut SequenceReader,
    collector: &mut OligoCollector<'_>,
    oligo_counts: &[u64],
    mutators: &[Mutator],
    rng: &mut StdRng,
) -> Result<()> {
    let total_oligos: u64 = oligo_counts.iter().sum();
    info!("Generating {} oligos from {} sequences", total_oligos, oligo_counts.len());
    let start = Instant::now();
    let mut progress = ProgressTracker::new("Processed sequences").with_interval(1000);

    let mut sequence = Oligo::with_capacity(DEFAULT_SEQUENCE_LENGTH);
    let mut generated: Vec<Oligo> = Vec::new();
    let mut i_seq = 0usize;

    while reader.next_oligo(&mut sequence)? {
        let Some(&n_oligos) = oligo_counts.get(i_seq) else {
            return Err(SimError::PipelineInvariant {
                processed: i_seq + 1,
                expected: oligo_counts.len(),
            }
            .into());
        };

        if n_oligos > 0 {
            generated.clear();
            generated.reserve(n_oligos as usize);
            generate_oligos(&mut generated, &sequence, n_oligos, mutators, rng);
            for oligo in &generated {
                collector.collect(oligo, rng)?;
            }
        }

        i_seq += 1;
        progress.log_if_needed(1);
    }

    if i_seq != oligo_counts.len() {
        return Err(
            SimError::PipelineInvariant { processed: i_seq, expected: oligo_counts.len() }.into()
        );
    }

    progress.log_final();
    info!(
        "Finished generating {} oligos from {} sequences in {}",
        total_oligos,
        i_seq,
        format_duration(start.elapsed())
    );
    Ok(())
}

/// Pass 1: synthesis coverage, initial mutator chain, intermediate pool.
///
/// `n_sequences` is the design count the caller already obtained from the
/// reader; the reader is positioned at the start of the file.
fn synthesis_and_sampling(
    reader: &mut SequenceReader,
    writer: &mut SequenceWriter,
    config: &PipelineConfig,
    n_sequences: usize,
    mutators: &[Mutator],
    rng: &mut StdRng,
) -> Result<()> {
    info!("Generating synthesis coverage with bias {}", config.coverage_bias);
    let initial_coverage = coverage::initial_coverage(
        n_sequences,
        config.coverage_bias,
        coverage::INITIAL_COVERAGE_DEPTH,
        rng,
    )?;

    let n_sampled_oligos = (n_sequences as f64 * config.physical_coverage) as usize;
    info!("Sampling for a mean physical coverage of {}", config.physical_coverage);
    let physical_coverage = coverage::sample_by_count(&initial_coverage, n_sampled_oligos, rng)?;

    info!("Processing errors for synthesis and sampling");
    let mut collector = OligoCollector::single_end(writer);
    process(reader, &mut collector, &physical_coverage, mutators, rng)?;
    info!("Finished synthesis and sampling");
    Ok(())
}

/// Pass 2: uniform sequencing coverage over the intermediate pool, recovery
/// chain, paired-end collection through the sequencing chain.
///
/// The read target is computed from the original design count, not the
/// intermediate pool size.
fn recovery_and_sequencing(
    reader: &mut SequenceReader,
    writer_fw: &mut SequenceWriter,
    writer_rv: &mut SequenceWriter,
    n_design_sequences: usize,
    config: &PipelineConfig,
    recovery_mutators: &[Mutator],
    sequencing_mutators: &[Mutator],
    rng: &mut StdRng,
) -> Result<()> {
    let n_pool_oligos = reader.count()?;

    // the coverage is truncated to whole reads per design before multiplying
    let n_reads = config.sequencing_coverage as usize * n_design_sequences;
    info!("Sampling for a mean sequencing coverage of {}", config.sequencing_coverage);
    // every intermediate oligo is present exactly once
    let pool_counts = vec![1u64; n_pool_oligos];
    let sequencing_coverage = coverage::sample_by_count(&pool_counts, n_reads, rng)?;

    info!("Processing errors for recovery and sequencing");
    let mut collector =
        OligoCollector::paired_end(writer_fw, writer_rv).with_mutators(sequencing_mutators);
    process(reader, &mut collector, &sequencing_coverage, recovery_mutators, rng)?;
    info!("Finished recovery and sequencing");
    Ok(())
}

/// Best-effort removal of the intermediate pool file.
fn remove_intermediate(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!("Could not remove intermediate file {}: {e}", path.display());
    }
}

/// Run the full two-pass pipeline.
///
/// # Errors
///
/// Any failure in either pass removes the intermediate file (best effort)
/// before the error is propagated.
pub fn run(config: &PipelineConfig, chains: &MutatorChains, rng: &mut StdRng) -> Result<()> {
    let mut input_reader = SequenceReader::open(&config.input, ReadMode::Text)?;
    let mut intermediate_writer =
        SequenceWriter::create(&config.intermediate, WriteMode::Binary)?;

    // counted once here; pass 1 uses it for the coverage vector and pass 2
    // for the read target
    let n_design_sequences = input_reader.count()?;

    if let Err(e) = synthesis_and_sampling(
        &mut input_reader,
        &mut intermediate_writer,
        config,
        n_design_sequences,
        &chains.initial,
        rng,
    ) {
        error!("An error occurred during synthesis and sampling: {e:#}");
        remove_intermediate(&config.intermediate);
        return Err(e);
    }
    drop(input_reader);
    if let Err(e) = intermediate_writer.finish() {
        error!("An error occurred during synthesis and sampling: {e:#}");
        remove_intermediate(&config.intermediate);
        return Err(e);
    }

    let pass2 = (|| -> Result<()> {
        let mut intermediate_reader =
            SequenceReader::open(&config.intermediate, ReadMode::Binary)?;
        let mut writer_fw = SequenceWriter::create(&config.output_r1, config.format)?;
        let mut writer_rv = SequenceWriter::create(&config.output_r2, config.format)?;
        recovery_and_sequencing(
            &mut intermediate_reader,
            &mut writer_fw,
            &mut writer_rv,
            n_design_sequences,
            config,
            &chains.recovery,
            &chains.sequencing,
            rng,
        )?;
        writer_fw.finish()?;
        writer_rv.finish()?;
        Ok(())
    })();
    if let Err(e) = &pass2 {
        error!("An error occurred during recovery and sequencing: {e:#}");
    }
    remove_intermediate(&config.intermediate);
    pass2
}
