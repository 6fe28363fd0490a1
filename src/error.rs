//! Error types shared by every pipeline stage
//!
//! Two disjoint families: `ValidationError` for malformed caller input that
//! can be rejected before any secret material is touched, and the opaque
//! `EngineError::Internal` for failures the caller did not cause. Tampering
//! is not an error at all; see [`crate::pipeline::Verification`].

/// Malformed caller input
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Record must be a JSON object")]
    NotAMapping,

    #[error("Binary string must contain only 0 and 1 characters")]
    InvalidBit,

    #[error("DNA string must contain only A, C, G, T characters")]
    InvalidNucleotide,

    #[error("Chaotic sequence cannot be empty")]
    EmptyChaos,

    #[error("Seed must lie within [0, 1], got {0}")]
    SeedOutOfRange(f64),

    #[error("Invalid chaotic seed format")]
    UnparsableSeed,

    #[error("Chaos parameter r must lie within (3.57, 4.0], got {0}")]
    ChaosParameterOutOfRange(f64),

    #[error("Invalid hash string provided for seed generation")]
    InvalidHash,

    #[error("DNA key stream must be exactly {expected} characters, got {actual}")]
    KeyStreamLength { expected: usize, actual: usize },

    #[error("Envelope could not be serialized: {0}")]
    Serialization(String),
}

/// Errors returned by [`crate::DnaCryptEngine`]
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Opaque failure that is neither caller-caused nor a tamper signal
    #[error("Internal engine failure: {0}")]
    Internal(String),
}

impl EngineError {
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation(_))
    }
}
