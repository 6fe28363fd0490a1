//! DNA layer: bits to nucleotides and keyed nucleotide substitution
//!
//! - **Nucleotide**: the four-symbol output alphabet
//! - **DnaCodec**: chaos-driven dynamic substitution, 2 bits per nucleotide
//! - **Scrambler**: per-position keyed permutation ("Watson-Crick" table)
//! - **DnaKeyStream**: the 256-nucleotide secret that drives the scrambler

mod alphabet;
mod codec;
mod keystream;
mod scrambler;

pub use alphabet::{parse_sequence, to_sequence_string, Nucleotide};
pub use codec::{bits_to_bytes, bytes_to_bits, DnaCodec, SubstitutionRule, RULES};
pub use keystream::{DnaKeyStream, KEY_STREAM_LEN};
pub use scrambler::{Scrambler, ScrambleTable};
