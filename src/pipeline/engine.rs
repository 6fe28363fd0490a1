//! DnaCryptEngine: orchestrates hashing, encryption, chaos and DNA layers
//!
//! Forward:
//! ```text
//! record -> hash -> {data, hash} -> AES-CBC -> bits -> DnaCodec(chaos(seed)) -> Scrambler -> payload
//! ```
//! Reverse walks the same arrows backwards. Once the seed has parsed and the
//! chaos stream is regenerated, every failure collapses into
//! [`Verification::Tampered`] so callers cannot tell a padding failure from a
//! hash mismatch.

use crate::chaos::{seed_from_hash, LogisticMap};
use crate::cipher::BlockCipher;
use crate::config::EngineConfig;
use crate::dna::{
    bits_to_bytes, bytes_to_bits, parse_sequence, to_sequence_string, DnaCodec, Scrambler,
};
use crate::error::{EngineError, ValidationError};
use crate::integrity::{canonical_hash, verify};
use log::{debug, info, warn};
use serde_json::{json, Map, Value};
use std::fmt;

/// A JSON object; the unit the engine encodes
pub type Record = Map<String, Value>;

/// Result of the forward pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    /// Nucleotide string over {A, C, G, T}
    pub payload: String,
    /// Decimal form of the chaotic seed, needed again for decoding
    pub seed: String,
}

/// Outcome of the reverse pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum Verification {
    /// Payload decrypted and its stored hash matched the recovered record
    Authentic(Record),
    /// Anything else once the seed was accepted
    Tampered,
}

impl Verification {
    pub fn is_authentic(&self) -> bool {
        matches!(self, Verification::Authentic(_))
    }

    pub fn into_record(self) -> Option<Record> {
        match self {
            Verification::Authentic(record) => Some(record),
            Verification::Tampered => None,
        }
    }
}

/// Reverse pipeline states after `ParseSeed` and `RegenerateChaos`. Only ever
/// logged; the caller sees `Tampered` whichever one failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    Unscramble,
    DecodeBits,
    RebuildBlob,
    Decrypt,
    ValidateEnvelope,
    VerifyHash,
}

impl fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DecodeStage::Unscramble => "unscramble",
            DecodeStage::DecodeBits => "decode-bits",
            DecodeStage::RebuildBlob => "rebuild-blob",
            DecodeStage::Decrypt => "decrypt",
            DecodeStage::ValidateEnvelope => "validate-envelope",
            DecodeStage::VerifyHash => "verify-hash",
        };
        f.write_str(name)
    }
}

/// Stateless after construction; share it freely across threads
#[derive(Debug, Clone)]
pub struct DnaCryptEngine {
    cipher: BlockCipher,
    chaos: LogisticMap,
    codec: DnaCodec,
    scrambler: Scrambler,
}

impl DnaCryptEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            cipher: BlockCipher::new(config.aes_key),
            chaos: config.chaos,
            codec: DnaCodec::default(),
            scrambler: Scrambler::with_key(config.key_stream),
        }
    }

    /// Forward pipeline. `record` must be a JSON object.
    pub fn encode(&self, record: &Value) -> Result<EncodedPayload, EngineError> {
        let hash = canonical_hash(record)?;
        let envelope = json!({ "data": record, "hash": hash.as_str() });
        let blob = self.cipher.encrypt(&envelope)?;

        let bits = bytes_to_bits(blob.as_bytes());
        let seed = seed_from_hash(hash.as_str())?;
        let chaos = self.chaos.generate(seed, (bits.len() + 1) / 2)?;
        let dna = self.codec.encode_nucleotides(&bits, &chaos)?;
        let payload = to_sequence_string(&self.scrambler.scramble_nucleotides(&dna));

        info!("Encoded record into {} nucleotides", payload.len());
        Ok(EncodedPayload {
            payload,
            seed: seed.to_string(),
        })
    }

    /// Forward pipeline for an already typed record
    pub fn encode_record(&self, record: &Record) -> Result<EncodedPayload, EngineError> {
        self.encode(&Value::Object(record.clone()))
    }

    /// Reverse pipeline.
    ///
    /// An unparsable or out-of-range seed is a caller format error and the
    /// only failure returned as `Err`; everything after it is `Tampered`.
    pub fn decode(&self, payload: &str, seed: &str) -> Result<Verification, EngineError> {
        let seed = parse_seed(seed)?;
        // One control value per payload character, the count encode produced
        let chaos = self.chaos.generate(seed, payload.chars().count())?;
        match self.recover(payload, &chaos) {
            Ok(record) => {
                info!("Payload verified authentic");
                Ok(Verification::Authentic(record))
            }
            Err(stage) => {
                warn!("Tampered payload detected");
                debug!("Reverse pipeline stopped at stage {}", stage);
                Ok(Verification::Tampered)
            }
        }
    }

    fn recover(&self, payload: &str, chaos: &[f64]) -> Result<Record, DecodeStage> {
        let scrambled = parse_sequence(payload).map_err(|_| DecodeStage::Unscramble)?;
        let dna = self.scrambler.unscramble_nucleotides(&scrambled);

        let bits = self
            .codec
            .decode_nucleotides(&dna, chaos)
            .map_err(|_| DecodeStage::DecodeBits)?;
        let blob = bits_to_bytes(&bits).ok_or(DecodeStage::RebuildBlob)?;

        let envelope = self
            .cipher
            .decrypt(&blob)
            .map_err(|_| DecodeStage::Decrypt)?;
        let Value::Object(mut envelope) = envelope else {
            return Err(DecodeStage::ValidateEnvelope);
        };
        let data = envelope.remove("data").filter(|v| !v.is_null());
        let hash = envelope.remove("hash").filter(|v| !v.is_null());
        let (Some(data), Some(hash)) = (data, hash) else {
            return Err(DecodeStage::ValidateEnvelope);
        };

        let expected = hash.as_str().ok_or(DecodeStage::VerifyHash)?;
        if !verify(&data, expected) {
            return Err(DecodeStage::VerifyHash);
        }
        match data {
            Value::Object(record) => Ok(record),
            _ => Err(DecodeStage::VerifyHash),
        }
    }
}

/// Parse the external decimal seed; it must be a number within [0, 1]
pub fn parse_seed(seed: &str) -> Result<f64, ValidationError> {
    let value: f64 = seed
        .trim()
        .parse()
        .map_err(|_| ValidationError::UnparsableSeed)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::SeedOutOfRange(value));
    }
    Ok(value)
}
