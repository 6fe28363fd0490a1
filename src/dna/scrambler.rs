//! Scrambler: keyed nucleotide substitution
//!
//! Not a bitwise XOR. `T[a][k]` is a fixed 4x4 table where every key column
//! `a -> T[a][k]` is a permutation of the alphabet, so each column can be
//! inverted independently. The table is public and the key stream static,
//! so this layer is a format transform, not a security boundary.

use super::alphabet::Nucleotide::{self, A, C, G, T};
use super::alphabet::{parse_sequence, to_sequence_string};
use super::keystream::DnaKeyStream;
use crate::error::ValidationError;

/// Forward table and its per-key-column inverse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrambleTable {
    /// `forward[a][k]`
    forward: [[Nucleotide; 4]; 4],
    /// `inverse[k][r] = a`
    inverse: [[Nucleotide; 4]; 4],
}

impl ScrambleTable {
    /// The "Watson-Crick" pairing table
    pub const WATSON_CRICK: ScrambleTable = ScrambleTable::new([
        //  k=A k=C k=G k=T
        [A, G, C, T], // a=A
        [G, A, T, C], // a=C
        [C, T, A, G], // a=G
        [T, C, G, A], // a=T
    ]);

    /// Derive the inverse by inverting each key column. Every column must be
    /// a permutation; in a const context a violation fails the build.
    pub const fn new(forward: [[Nucleotide; 4]; 4]) -> Self {
        let mut inverse = [[A; 4]; 4];
        let mut seen = [[false; 4]; 4];
        let mut a = 0;
        while a < 4 {
            let mut k = 0;
            while k < 4 {
                let r = forward[a][k] as usize;
                assert!(!seen[k][r], "scramble table column is not a bijection");
                seen[k][r] = true;
                inverse[k][r] = Nucleotide::ALL[a];
                k += 1;
            }
            a += 1;
        }
        Self { forward, inverse }
    }

    pub fn apply(&self, a: Nucleotide, key: Nucleotide) -> Nucleotide {
        self.forward[a.index()][key.index()]
    }

    pub fn invert(&self, r: Nucleotide, key: Nucleotide) -> Nucleotide {
        self.inverse[key.index()][r.index()]
    }
}

impl Default for ScrambleTable {
    fn default() -> Self {
        Self::WATSON_CRICK
    }
}

/// Position-keyed scrambler bound to one key stream
#[derive(Debug, Clone)]
pub struct Scrambler {
    table: ScrambleTable,
    key: DnaKeyStream,
}

impl Scrambler {
    pub fn new(table: ScrambleTable, key: DnaKeyStream) -> Self {
        Self { table, key }
    }

    /// Watson-Crick table with the given key stream
    pub fn with_key(key: DnaKeyStream) -> Self {
        Self::new(ScrambleTable::WATSON_CRICK, key)
    }

    pub fn scramble_nucleotides(&self, dna: &[Nucleotide]) -> Vec<Nucleotide> {
        dna.iter()
            .enumerate()
            .map(|(i, &n)| self.table.apply(n, self.key.at(i)))
            .collect()
    }

    pub fn unscramble_nucleotides(&self, dna: &[Nucleotide]) -> Vec<Nucleotide> {
        dna.iter()
            .enumerate()
            .map(|(i, &n)| self.table.invert(n, self.key.at(i)))
            .collect()
    }

    pub fn scramble(&self, dna: &str) -> Result<String, ValidationError> {
        let dna = parse_sequence(dna)?;
        Ok(to_sequence_string(&self.scramble_nucleotides(&dna)))
    }

    pub fn unscramble(&self, dna: &str) -> Result<String, ValidationError> {
        let dna = parse_sequence(dna)?;
        Ok(to_sequence_string(&self.unscramble_nucleotides(&dna)))
    }
}
