//! dnacrypt: tamper-evident DNA encoding of JSON records
//!
//! A record is hashed canonically, sealed with its hash under AES-256-CBC,
//! turned into nucleotides by a logistic-map-driven substitution codec and
//! finally scrambled with a keyed nucleotide table. Decoding regenerates the
//! chaotic stream from the seed and reports either the authentic record or a
//! single uniform `Tampered` outcome.

pub mod chaos;
pub mod cipher;
pub mod config;
pub mod dna;
pub mod error;
pub mod integrity;
pub mod pipeline;

pub use config::{ConfigError, EngineConfig};
pub use error::{EngineError, ValidationError};
pub use pipeline::{DnaCryptEngine, EncodedPayload, Record, Verification};
