//! DnaKeyStream: the scrambler's 256-nucleotide secret

use super::alphabet::{parse_sequence, to_sequence_string, Nucleotide};
use crate::error::ValidationError;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Required key stream length
pub const KEY_STREAM_LEN: usize = 256;

/// Exactly [`KEY_STREAM_LEN`] nucleotides, immutable once built
#[derive(Clone, PartialEq, Eq)]
pub struct DnaKeyStream(Vec<Nucleotide>);

impl DnaKeyStream {
    pub fn new(key: Vec<Nucleotide>) -> Result<Self, ValidationError> {
        if key.len() != KEY_STREAM_LEN {
            return Err(ValidationError::KeyStreamLength {
                expected: KEY_STREAM_LEN,
                actual: key.len(),
            });
        }
        Ok(Self(key))
    }

    /// Fresh key stream from the thread-local CSPRNG
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Self(
            (0..KEY_STREAM_LEN)
                .map(|_| Nucleotide::ALL[rng.gen_range(0..4)])
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[Nucleotide] {
        &self.0
    }

    /// Key symbol for sequence position `i`, cycling through the stream
    pub fn at(&self, i: usize) -> Nucleotide {
        self.0[i % self.0.len()]
    }

    /// The stream as an A/C/G/T string. This is secret material.
    pub fn expose(&self) -> String {
        to_sequence_string(&self.0)
    }
}

impl FromStr for DnaKeyStream {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse_sequence(s)?)
    }
}

impl fmt::Debug for DnaKeyStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DnaKeyStream(<{} nucleotides redacted>)", self.0.len())
    }
}
