//! DnaCodec: dynamic bits <-> nucleotide substitution
//!
//! Four fixed bijections map a 2-bit group onto a nucleotide. For the
//! nucleotide at position `i` the rule is chosen by bucketing
//! `chaos[i % chaos.len()]`, so encoder and decoder must index the control
//! stream by the same quantity: the number of nucleotides produced or
//! consumed so far.

use super::alphabet::Nucleotide::{self, A, C, G, T};
use super::alphabet::{parse_sequence, to_sequence_string};
use crate::chaos::rule_for_value;
use crate::error::ValidationError;

/// One total bijection between 2-bit groups and nucleotides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubstitutionRule {
    /// Indexed by the 2-bit value (00, 01, 10, 11)
    forward: [Nucleotide; 4],
    /// Indexed by `Nucleotide::index()`
    inverse: [u8; 4],
}

impl SubstitutionRule {
    /// Build a rule and its inverse. `forward` must be a permutation of the
    /// alphabet; evaluated in a const context a violation fails the build.
    pub const fn new(forward: [Nucleotide; 4]) -> Self {
        let mut inverse = [u8::MAX; 4];
        let mut bits = 0;
        while bits < 4 {
            let slot = forward[bits] as usize;
            assert!(inverse[slot] == u8::MAX, "substitution rule is not a bijection");
            inverse[slot] = bits as u8;
            bits += 1;
        }
        Self { forward, inverse }
    }

    pub fn encode(&self, two_bits: u8) -> Nucleotide {
        self.forward[usize::from(two_bits & 0b11)]
    }

    pub fn decode(&self, nucleotide: Nucleotide) -> u8 {
        self.inverse[nucleotide.index()]
    }
}

/// Rules 1..=4, stored at indices 0..=3
pub const RULES: [SubstitutionRule; 4] = [
    SubstitutionRule::new([A, C, G, T]),
    SubstitutionRule::new([C, G, T, A]),
    SubstitutionRule::new([G, T, A, C]),
    SubstitutionRule::new([T, A, C, G]),
];

/// Chaos-driven codec over an injected rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DnaCodec {
    rules: [SubstitutionRule; 4],
}

impl Default for DnaCodec {
    fn default() -> Self {
        Self { rules: RULES }
    }
}

impl DnaCodec {
    pub fn new(rules: [SubstitutionRule; 4]) -> Self {
        Self { rules }
    }

    fn rule_at(&self, chaos: &[f64], position: usize) -> &SubstitutionRule {
        let rule = rule_for_value(chaos[position % chaos.len()]);
        &self.rules[usize::from(rule - 1)]
    }

    /// Map a bit string onto nucleotides. An odd-length input gets one
    /// trailing `0` bit, which decoding does not strip.
    pub fn encode_nucleotides(
        &self,
        bits: &str,
        chaos: &[f64],
    ) -> Result<Vec<Nucleotide>, ValidationError> {
        if !bits.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(ValidationError::InvalidBit);
        }
        if chaos.is_empty() {
            return Err(ValidationError::EmptyChaos);
        }
        let dna = bits
            .as_bytes()
            .chunks(2)
            .enumerate()
            .map(|(position, pair)| {
                let hi = pair[0] - b'0';
                let lo = pair.get(1).map_or(0, |b| b - b'0');
                self.rule_at(chaos, position).encode((hi << 1) | lo)
            })
            .collect();
        Ok(dna)
    }

    pub fn decode_nucleotides(
        &self,
        dna: &[Nucleotide],
        chaos: &[f64],
    ) -> Result<String, ValidationError> {
        if chaos.is_empty() {
            return Err(ValidationError::EmptyChaos);
        }
        let mut bits = String::with_capacity(dna.len() * 2);
        for (position, &nucleotide) in dna.iter().enumerate() {
            let pair = self.rule_at(chaos, position).decode(nucleotide);
            bits.push(if pair & 0b10 != 0 { '1' } else { '0' });
            bits.push(if pair & 0b01 != 0 { '1' } else { '0' });
        }
        Ok(bits)
    }

    /// `encode(bitstream, chaos) -> NucleotideSequence`
    pub fn encode(&self, bits: &str, chaos: &[f64]) -> Result<String, ValidationError> {
        self.encode_nucleotides(bits, chaos)
            .map(|dna| to_sequence_string(&dna))
    }

    /// `decode(dna, chaos) -> bitstream`
    pub fn decode(&self, dna: &str, chaos: &[f64]) -> Result<String, ValidationError> {
        let dna = parse_sequence(dna)?;
        self.decode_nucleotides(&dna, chaos)
    }
}

/// 8 bits per byte, most significant bit first
pub fn bytes_to_bits(bytes: &[u8]) -> String {
    let mut bits = String::with_capacity(bytes.len() * 8);
    for byte in bytes {
        for shift in (0..8).rev() {
            bits.push(if (byte >> shift) & 1 == 1 { '1' } else { '0' });
        }
    }
    bits
}

/// Regroup a bit string into bytes. `None` when the length is not a
/// multiple of 8 or a character other than `0`/`1` appears.
pub fn bits_to_bytes(bits: &str) -> Option<Vec<u8>> {
    if bits.len() % 8 != 0 {
        return None;
    }
    bits.as_bytes()
        .chunks(8)
        .map(|group| {
            group.iter().try_fold(0u8, |acc, &b| match b {
                b'0' => Some(acc << 1),
                b'1' => Some((acc << 1) | 1),
                _ => None,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_are_distinct_bijections() {
        for (i, rule) in RULES.iter().enumerate() {
            for bits in 0..4u8 {
                assert_eq!(rule.decode(rule.encode(bits)), bits);
            }
            for other in &RULES[i + 1..] {
                assert_ne!(rule, other);
            }
        }
    }

    #[test]
    fn test_concrete_vector() {
        let codec = DnaCodec::default();
        let chaos = [0.1, 0.4, 0.6, 0.9];
        assert_eq!(codec.encode("10110001", &chaos).unwrap(), "GAGA");
        assert_eq!(codec.decode("GAGA", &chaos).unwrap(), "10110001");
    }

    #[test]
    fn test_odd_length_is_padded() {
        let codec = DnaCodec::default();
        assert_eq!(codec.encode("101", &[0.1]).unwrap(), "GG");
        assert_eq!(codec.decode("GG", &[0.1]).unwrap(), "1010");
    }

    #[test]
    fn test_short_chaos_wraps_consistently() {
        let codec = DnaCodec::default();
        let chaos = [0.8, 0.2, 0.55];
        let bits = "0110110001011100101000111101";
        let dna = codec.encode(bits, &chaos).unwrap();
        assert_eq!(dna.len(), bits.len() / 2);
        assert_eq!(codec.decode(&dna, &chaos).unwrap(), bits);
    }

    #[test]
    fn test_empty_inputs() {
        let codec = DnaCodec::default();
        assert_eq!(codec.encode("", &[0.3]).unwrap(), "");
        assert_eq!(codec.decode("", &[0.3]).unwrap(), "");
    }

    #[test]
    fn test_rejects_empty_chaos() {
        let codec = DnaCodec::default();
        assert_eq!(codec.encode("01", &[]), Err(ValidationError::EmptyChaos));
        assert_eq!(codec.decode("AC", &[]), Err(ValidationError::EmptyChaos));
    }

    #[test]
    fn test_rejects_bad_alphabet() {
        let codec = DnaCodec::default();
        assert_eq!(codec.encode("0120", &[0.5]), Err(ValidationError::InvalidBit));
        assert_eq!(codec.decode("ACGX", &[0.5]), Err(ValidationError::InvalidNucleotide));
    }

    #[test]
    fn test_bit_conversion() {
        assert_eq!(bytes_to_bits(b"A"), "01000001");
        assert_eq!(bytes_to_bits(&[0x00, 0xff]), "0000000011111111");
        assert_eq!(bits_to_bytes("0100000101000010"), Some(b"AB".to_vec()));
        assert_eq!(bits_to_bytes("0100000"), None);
        assert_eq!(bits_to_bytes("0100000x"), None);
        assert_eq!(bits_to_bytes(""), Some(Vec::new()));
    }
}
