//! Streaming sequence reader for design pools and intermediate oligo pools.

use crate::nucleotide::{
    encode_into, Oligo, NUCLEOTIDE_A, NUCLEOTIDE_NEXT_OLIGO, NUCLEOTIDE_T,
};
use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Input file interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Line-oriented text: plain sequences, FASTA, or FASTQ. Header,
    /// separator, and otherwise invalid lines are skipped with a warning
    /// counter.
    Text,
    /// The sentinel-delimited binary pool format.
    Binary,
}

/// A streaming reader yielding validated oligos from a sequence file.
///
/// Invalid lines (or invalid binary records) are recovered locally: they are
/// counted in `skipped_lines` and reading continues. I/O failures are
/// errors.
pub struct SequenceReader {
    file: BufReader<File>,
    mode: ReadMode,
    path: PathBuf,
    line: String,
    /// Lines (or binary records) skipped because they were not valid sequences.
    pub skipped_lines: u64,
    /// Valid sequences yielded since the last rewind.
    pub valid_sequences: u64,
}

impl SequenceReader {
    /// Open a sequence file for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P, mode: ReadMode) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        Ok(Self {
            file: BufReader::new(file),
            mode,
            path: path.to_path_buf(),
            line: String::new(),
            skipped_lines: 0,
            valid_sequences: 0,
        })
    }

    /// Move the read position back to the start of the file and reset the
    /// validity counters.
    pub fn rewind(&mut self) -> Result<()> {
        self.file
            .seek(SeekFrom::Start(0))
            .with_context(|| format!("Failed to rewind {}", self.path.display()))?;
        self.skipped_lines = 0;
        self.valid_sequences = 0;
        Ok(())
    }

    /// Read the next valid oligo into `oligo`.
    ///
    /// Returns `Ok(false)` at end of file. Invalid lines or records are
    /// skipped (and counted), never returned.
    pub fn next_oligo(&mut self, oligo: &mut Oligo) -> Result<bool> {
        match self.mode {
            ReadMode::Text => self.next_text_oligo(oligo),
            ReadMode::Binary => self.next_binary_oligo(oligo),
        }
    }

    fn next_text_oligo(&mut self, oligo: &mut Oligo) -> Result<bool> {
        loop {
            self.line.clear();
            let n_read = self
                .file
                .read_line(&mut self.line)
                .with_context(|| format!("Failed to read from {}", self.path.display()))?;
            if n_read == 0 {
                return Ok(false);
            }
            let line = self.line.trim_end_matches(['\n', '\r']);
            if !Self::is_valid_sequence_line(line) {
                self.skipped_lines += 1;
                continue;
            }
            self.valid_sequences += 1;
            // cannot fail: the line was just validated
            encode_into(line, oligo)
                .with_context(|| format!("Failed to encode line from {}", self.path.display()))?;
            return Ok(true);
        }
    }

    fn next_binary_oligo(&mut self, oligo: &mut Oligo) -> Result<bool> {
        loop {
            oligo.clear();
            let n_read = self
                .file
                .read_until(NUCLEOTIDE_NEXT_OLIGO, oligo)
                .with_context(|| format!("Failed to read from {}", self.path.display()))?;
            if n_read == 0 {
                return Ok(false);
            }
            if oligo.last() == Some(&NUCLEOTIDE_NEXT_OLIGO) {
                oligo.pop();
            }
            if oligo.is_empty() {
                self.skipped_lines += 1;
                continue;
            }
            if let Some(&bad) =
                oligo.iter().find(|&&value| !(NUCLEOTIDE_A..=NUCLEOTIDE_T).contains(&value))
            {
                self.skipped_lines += 1;
                warn!("Skipping sequence with invalid nucleotide encoding: {bad}");
                continue;
            }
            self.valid_sequences += 1;
            return Ok(true);
        }
    }

    /// A text line is a sequence iff it is non-empty, does not start with a
    /// FASTA/FASTQ marker, and contains only `A/C/G/T`.
    fn is_valid_sequence_line(line: &str) -> bool {
        if line.is_empty() {
            return false;
        }
        if line.starts_with(['>', '@', '+']) {
            return false;
        }
        line.bytes().all(|b| matches!(b, b'A' | b'C' | b'G' | b'T'))
    }

    /// Count the valid sequences in the file with a full pre-scan, then
    /// rewind to the start.
    pub fn count(&mut self) -> Result<usize> {
        self.rewind()?;
        let mut oligo = Oligo::new();
        let mut count = 0;
        while self.next_oligo(&mut oligo)? {
            count += 1;
        }
        debug!(
            "Read {} valid sequences ({} lines skipped) from {}",
            count,
            self.skipped_lines,
            self.path.display()
        );
        self.rewind()?;
        Ok(count)
    }
}
