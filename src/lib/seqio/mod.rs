//! Streaming sequence file I/O.
//!
//! - [`reader`] - line-oriented text/FASTA/FASTQ input and the sentinel-delimited
//!   binary pool format, with skip-and-warn validation
//! - [`writer`] - txt, FASTA, FASTQ, and binary output with a monotone record counter

pub mod reader;
pub mod writer;

pub use reader::{ReadMode, SequenceReader};
pub use writer::{SequenceWriter, WriteMode};
