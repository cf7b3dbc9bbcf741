//! Custom error types for oligosim operations.

use thiserror::Error;

/// Result type alias for oligosim operations
pub type Result<T> = std::result::Result<T, SimError>;

/// Error type for oligosim operations
#[derive(Error, Debug)]
pub enum SimError {
    /// Sequence text contained a character outside A/C/G/T
    #[error("Invalid nucleotide character '{found}' in sequence")]
    InvalidNucleotide {
        /// The offending character
        found: char,
    },

    /// Encoded oligo contained a byte outside the 1..=4 encoding
    #[error("Invalid nucleotide encoding {value} in oligo")]
    InvalidEncoding {
        /// The offending byte value
        value: u8,
    },

    /// Coverage sampling was asked to draw from an empty pool
    #[error("There are no sequences to sample from; check the input file and coverage settings")]
    EmptyPool,

    /// Coverage sampling was asked for fewer than one oligo
    #[error("Requested a sample of {requested} oligos; increase the coverage so at least 1 is drawn")]
    NonPositiveTarget {
        /// The requested sample size
        requested: usize,
    },

    /// Mutator construction was given an unusable parameter set
    #[error("Invalid mutator configuration: {reason}")]
    MutatorConfig {
        /// Explanation of the problem
        reason: String,
    },

    /// A pipeline pass processed a different number of sequences than expected
    #[error("Processed {processed} sequences, but expected {expected}")]
    PipelineInvariant {
        /// Sequences actually read
        processed: usize,
        /// Sequences the coverage vector was built for
        expected: usize,
    },
}
