//! Challenge definitions.
//!
//! A challenge fixes every numeric parameter of a run: the synthesis
//! coverage bias, the physical and sequencing coverages, the read length,
//! and the full mutator chains with their empirically derived rates and
//! preference vectors. Under `--strict` these values are the external
//! contract of the tool.

use crate::errors::Result;
use crate::mutators::{
    AddReverseComplement, BreakageEvents, DeletionEvents, EndShreds, InsertionEvents, Mutator,
    SequencingAddAdapter, SequencingPadTrim, SizeSelection, SubstitutionEvents, Tailing,
};

/// General Illumina read adapter (already reverse-complemented).
const ILLUMINA_READ_ADAPTER: &str = "AGATCGGAAGAGC";

/// A fully parameterised challenge configuration.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Log-normal standard deviation of the synthesis coverage bias.
    pub coverage_bias: f64,
    /// Mean number of physical oligos per design sequence.
    pub physical_coverage: f64,
    /// Mean number of sequencing reads per design sequence.
    pub sequencing_coverage: f64,
    /// Sequencing read length in nucleotides.
    pub read_length: usize,
    /// Mutators applied during synthesis, storage, and sampling (pass 1).
    pub initial_mutators: Vec<Mutator>,
    /// Mutators applied during recovery (pass 2).
    pub recovery_mutators: Vec<Mutator>,
}

/// 15 cycles of PCR amplification with Taq polymerase.
fn taq_amplification() -> Result<Mutator> {
    Ok(SubstitutionEvents::new(
        0.000109 * 15.0,
        &[
            0.0147, 0.3028, 0.0630, 0.0150, 0.0071, 0.0975, 0.0975, 0.0071, 0.0150, 0.0630,
            0.3028, 0.0147,
            // A2C   A2G     A2T     C2A     C2G     C2T     G2A     G2C     G2T     T2A
            // T2C   T2G
        ],
        None,
    )?
    .into())
}

impl Scenario {
    /// The decay challenge: electrochemical synthesis, five half-lives of
    /// aging, bead-based size selection, and single-stranded tailing.
    pub fn decay() -> Result<Self> {
        let initial_mutators: Vec<Mutator> = vec![
            taq_amplification()?,
            DeletionEvents::new(
                0.0005695, // Twist synthesis deletion rate
                &[0.2468, 0.2362, 0.2669, 0.2500],
                // A      C       G       T
                Some(&[
                    0.8602, 0.0612, 0.0178, 0.0111, 0.0083, 0.0072, 0.0062, 0.0054, 0.0048,
                    0.0041, 0.0037, 0.0030, 0.0023, 0.0020, 0.0016, 0.0010,
                    // run lengths 1 through 16
                ]),
            )?
            .into(),
            AddReverseComplement.into(),
            BreakageEvents::new(
                0.023, // aging for five half-lives at 150 nt, as a per-base rate
                &[0.3902, 0.0488, 0.4878, 0.0732],
                // A      C       G       T
            )?
            .into(),
            // bead-based purification with a bead ratio of 1.8, corrected for
            // the 33 nt adapter and 8 nt tail
            SizeSelection::new(60 - 33 - 8, 140 - 33 - 8).into(),
            // the single-stranded workflow introduces a CT tail
            Tailing::new("CT", 6, 8)?.into(),
        ];

        Ok(Self {
            coverage_bias: 0.30,
            physical_coverage: 10.0,
            sequencing_coverage: 30.0,
            read_length: 150,
            initial_mutators,
            recovery_mutators: vec![taq_amplification()?],
        })
    }

    /// The photolithography challenge: high-error photolithographic
    /// synthesis with shredded ends.
    pub fn photolithography() -> Result<Self> {
        let initial_mutators: Vec<Mutator> = vec![
            EndShreds::new(&[
                0.4882, 0.1189, 0.0635, 0.0342, 0.0202, 0.0137, 0.0117, 0.0110, 0.0096, 0.0091,
                // removal lengths 0 through 9
            ])?
            .into(),
            SubstitutionEvents::new(
                0.0212, // synthesis substitution rate
                &[
                    0.085, 0.058, 0.063, 0.088, 0.081, 0.063, 0.095, 0.073, 0.183, 0.081, 0.063,
                    0.094,
                    // A2C  A2G    A2T    C2A    C2G    C2T    G2A    G2C    G2T    T2A    T2C
                    // T2G
                ],
                Some(&[0.8420, 0.1277, 0.0232, 0.0071]),
                // run lengths 1 through 4
            )?
            .into(),
            DeletionEvents::new(
                0.0683, // synthesis deletion rate
                &[0.25, 0.25, 0.25, 0.25],
                Some(&[0.8556, 0.1026, 0.0227, 0.0191]),
                // run lengths 1 through 4
            )?
            .into(),
            InsertionEvents::new(
                0.0136, // synthesis insertion rate
                &[0.25, 0.25, 0.25, 0.25],
                Some(&[0.9275, 0.0453, 0.0126, 0.0146]),
                // run lengths 1 through 4
            )?
            .into(),
        ];

        Ok(Self {
            coverage_bias: 0.44,
            physical_coverage: 200.0,
            sequencing_coverage: 50.0,
            read_length: 150,
            initial_mutators,
            recovery_mutators: vec![taq_amplification()?],
        })
    }
}

/// Build the sequencing chain applied to every read by the collector:
/// optional adapter read-through, optional pad/trim to the read length, and
/// the iSeq 100 substitution profile (error rate averaged over both reads).
pub fn sequencing_chain(
    add_adapters: bool,
    pad_and_trim: bool,
    read_length: usize,
) -> Result<Vec<Mutator>> {
    let mut mutators: Vec<Mutator> = Vec::new();
    if add_adapters {
        mutators.push(SequencingAddAdapter::new(ILLUMINA_READ_ADAPTER)?.into());
    }
    if pad_and_trim {
        mutators.push(SequencingPadTrim::new(read_length).into());
    }
    mutators.push(
        SubstitutionEvents::new(
            0.0018115, // iSeq 100 sequencing error rate
            &[
                0.0029, 0.2065, 0.1684, 0.0246, 0.0139, 0.1594, 0.1761, 0.0184, 0.0377, 0.0203,
                0.1060, 0.0657,
                // A2C   A2G     A2T     C2A     C2G     C2T     G2A     G2C     G2T     T2A
                // T2C   T2G
            ],
            None,
        )?
        .into(),
    );
    Ok(mutators)
}
