//! Nucleotide alphabet {A, C, G, T}

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One symbol of the output alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Nucleotide {
    A,
    C,
    G,
    T,
}

impl Nucleotide {
    /// All four symbols in table order
    pub const ALL: [Nucleotide; 4] = [Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Nucleotide::A),
            'C' => Some(Nucleotide::C),
            'G' => Some(Nucleotide::G),
            'T' => Some(Nucleotide::T),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Nucleotide::A => 'A',
            Nucleotide::C => 'C',
            Nucleotide::G => 'G',
            Nucleotide::T => 'T',
        }
    }

    /// Row/column index into the lookup tables
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl TryFrom<char> for Nucleotide {
    type Error = ValidationError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Nucleotide::from_char(c).ok_or(ValidationError::InvalidNucleotide)
    }
}

/// Parse a string over {A, C, G, T}; any other character is rejected
pub fn parse_sequence(s: &str) -> Result<Vec<Nucleotide>, ValidationError> {
    s.chars().map(Nucleotide::try_from).collect()
}

pub fn to_sequence_string(seq: &[Nucleotide]) -> String {
    seq.iter().map(|n| n.as_char()).collect()
}
