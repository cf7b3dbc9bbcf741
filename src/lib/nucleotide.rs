//! Compact nucleotide encoding and sequence utilities.
//!
//! Oligos are held as byte vectors in a 1..=4 encoding (A=1, C=2, G=3, T=4)
//! so that a reserved sentinel byte can delimit records in the intermediate
//! binary pool format.

use crate::errors::{Result, SimError};

/// Integer representation of nucleotide A
pub const NUCLEOTIDE_A: u8 = 1;
/// Integer representation of nucleotide C
pub const NUCLEOTIDE_C: u8 = 2;
/// Integer representation of nucleotide G
pub const NUCLEOTIDE_G: u8 = 3;
/// Integer representation of nucleotide T
pub const NUCLEOTIDE_T: u8 = 4;

/// Record delimiter in binary sequence files. Never a valid base encoding,
/// so it cannot occur inside an oligo.
pub const NUCLEOTIDE_NEXT_OLIGO: u8 = 127;

/// Default sequence length used to pre-size oligo buffers.
pub const DEFAULT_SEQUENCE_LENGTH: usize = 500;

/// A single oligo in the compact 1..=4 encoding.
pub type Oligo = Vec<u8>;

/// Encode one textual base. Case-sensitive: lowercase is invalid.
#[inline]
pub fn encode_base(base: char) -> Result<u8> {
    match base {
        'A' => Ok(NUCLEOTIDE_A),
        'C' => Ok(NUCLEOTIDE_C),
        'G' => Ok(NUCLEOTIDE_G),
        'T' => Ok(NUCLEOTIDE_T),
        found => Err(SimError::InvalidNucleotide { found }),
    }
}

/// Decode one encoded base back to its textual form.
#[inline]
pub fn decode_base(value: u8) -> Result<char> {
    match value {
        NUCLEOTIDE_A => Ok('A'),
        NUCLEOTIDE_C => Ok('C'),
        NUCLEOTIDE_G => Ok('G'),
        NUCLEOTIDE_T => Ok('T'),
        value => Err(SimError::InvalidEncoding { value }),
    }
}

/// Encode a textual sequence into an existing oligo buffer, clearing it first.
pub fn encode_into(sequence: &str, oligo: &mut Oligo) -> Result<()> {
    oligo.clear();
    oligo.reserve(sequence.len());
    for base in sequence.chars() {
        oligo.push(encode_base(base)?);
    }
    Ok(())
}

/// Encode a textual sequence as a fresh oligo.
///
/// # Errors
///
/// Returns [`SimError::InvalidNucleotide`] on any character outside `A/C/G/T`.
pub fn encode_sequence(sequence: &str) -> Result<Oligo> {
    let mut oligo = Oligo::new();
    encode_into(sequence, &mut oligo)?;
    Ok(oligo)
}

/// Decode an encoded oligo back into its textual sequence.
///
/// # Errors
///
/// Returns [`SimError::InvalidEncoding`] on any byte outside `1..=4`.
pub fn decode_sequence(oligo: &[u8]) -> Result<String> {
    let mut sequence = String::with_capacity(oligo.len());
    for &value in oligo {
        sequence.push(decode_base(value)?);
    }
    Ok(sequence)
}

/// Complement a single encoded base: A<->T, C<->G.
///
/// Bytes outside the encoding are returned unchanged; callers validate at
/// the I/O boundary.
#[inline]
#[must_use]
pub const fn complement_base(value: u8) -> u8 {
    match value {
        NUCLEOTIDE_A => NUCLEOTIDE_T,
        NUCLEOTIDE_T => NUCLEOTIDE_A,
        NUCLEOTIDE_C => NUCLEOTIDE_G,
        NUCLEOTIDE_G => NUCLEOTIDE_C,
        value => value,
    }
}

/// Reverse complement an encoded oligo.
#[must_use]
pub fn reverse_complement(oligo: &[u8]) -> Oligo {
    oligo.iter().rev().map(|&value| complement_base(value)).collect()
}
