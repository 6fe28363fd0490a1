//! Chaos: the logistic-map control stream
//!
//! The stream picks, nucleotide by nucleotide, which of the four substitution
//! rules the DNA codec applies. It is fully determined by (seed, length, r),
//! which is what lets a decoder rebuild it from the seed alone.

mod logistic;

pub use logistic::{rule_for_value, seed_from_hash, LogisticMap, DEFAULT_R, R_MAX, R_MIN};
