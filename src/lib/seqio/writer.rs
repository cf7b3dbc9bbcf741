//! Streaming sequence writer for oligo pools and read files.

use crate::nucleotide::{decode_sequence, NUCLEOTIDE_NEXT_OLIGO};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// One sequence per line.
    Text,
    /// FASTA with `>Oligo_NNNNNNNNN` headers, indexed from 0.
    Fasta,
    /// FASTQ with `@Oligo_NNNNNNNNN` headers and a constant-`F` quality line.
    Fastq,
    /// The sentinel-delimited binary pool format.
    Binary,
}

/// A streaming writer emitting oligos in one of the supported formats.
///
/// The record counter increments on every write in every mode, so headers
/// stay aligned between writers that advance in lockstep.
pub struct SequenceWriter {
    file: BufWriter<File>,
    mode: WriteMode,
    path: PathBuf,
    /// Records written so far; also the index used in FASTA/FASTQ headers.
    pub sequences_written: u64,
}

impl SequenceWriter {
    /// Create (or truncate) a sequence file for writing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P, mode: WriteMode) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        Ok(Self {
            file: BufWriter::new(file),
            mode,
            path: path.to_path_buf(),
            sequences_written: 0,
        })
    }

    /// Write one oligo in the writer's format.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure, or if a non-binary writer is handed
    /// an oligo with bytes outside the 1..=4 encoding.
    pub fn write_oligo(&mut self, oligo: &[u8]) -> Result<()> {
        match self.mode {
            WriteMode::Binary => {
                self.file.write_all(oligo)?;
                self.file.write_all(&[NUCLEOTIDE_NEXT_OLIGO])?;
            }
            WriteMode::Text => {
                let sequence = decode_sequence(oligo)?;
                writeln!(self.file, "{sequence}")?;
            }
            WriteMode::Fasta => {
                let sequence = decode_sequence(oligo)?;
                write!(self.file, ">Oligo_{:09}\n{}\n", self.sequences_written, sequence)?;
            }
            WriteMode::Fastq => {
                let sequence = decode_sequence(oligo)?;
                write!(
                    self.file,
                    "@Oligo_{:09}\n{}\n+\n{}\n",
                    self.sequences_written,
                    sequence,
                    "F".repeat(sequence.len())
                )?;
            }
        }
        self.sequences_written += 1;
        Ok(())
    }

    /// Flush buffered output. Must be called before the file is read back
    /// or handed to another process.
    pub fn finish(mut self) -> Result<()> {
        self.file
            .flush()
            .with_context(|| format!("Failed to flush {}", self.path.display()))?;
        Ok(())
    }
}
