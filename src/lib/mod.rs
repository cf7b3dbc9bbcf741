#![deny(unsafe_code)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args
)]

//! # oligosim - DNA data storage channel simulation library
//!
//! Simulates the error behavior of a DNA data storage experiment end to
//! end: a pool of design sequences is pushed through chemical synthesis,
//! storage or lithography damage, size selection, recovery PCR, and the
//! sequencer itself, producing paired-end read files.
//!
//! The core is a chain of stochastic [`mutators`] over variable-length
//! nucleotide strings, driven by one seeded RNG, combined with a two-stage
//! [`coverage`] model (log-normal synthesis bias, then discrete resampling)
//! that decides how many times each design enters the [`pipeline`]. Runs
//! are single-threaded and fully determined by the seed.

pub mod collector;
pub mod coverage;
pub mod errors;
pub mod factory;
pub mod logging;
pub mod mutators;
pub mod nucleotide;
pub mod pipeline;
pub mod progress;
pub mod rng;
pub mod scenarios;
pub mod seqio;

pub use errors::SimError;
pub use nucleotide::Oligo;
