//! Request/response shapes for whatever transport fronts the engine

use super::engine::{DnaCryptEngine, EncodedPayload, Record, Verification};
use crate::error::EngineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeRequest {
    /// Record to encode into DNA
    pub payload: Record,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeResponse {
    pub success: bool,
    pub dna_payload: String,
    /// Decimal string; store it next to the payload
    pub chaotic_seed: String,
}

impl From<EncodedPayload> for EncodeResponse {
    fn from(encoded: EncodedPayload) -> Self {
        Self {
            success: true,
            dna_payload: encoded.payload,
            chaotic_seed: encoded.seed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeRequest {
    pub dna_payload: String,
    pub chaotic_seed: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Authentic,
    Tampered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeResponse {
    pub status: VerificationStatus,
    /// Present only when authentic; serialized as `null` otherwise
    pub data: Option<Record>,
    /// The record's own `issued_at` string, lifted out for display
    pub issued_at: Option<String>,
    pub verification_timestamp: DateTime<Utc>,
}

impl DecodeResponse {
    pub fn from_verification(verification: Verification) -> Self {
        let (status, data) = match verification {
            Verification::Authentic(record) => (VerificationStatus::Authentic, Some(record)),
            Verification::Tampered => (VerificationStatus::Tampered, None),
        };
        let issued_at = data
            .as_ref()
            .and_then(|record| record.get("issued_at"))
            .and_then(|v| v.as_str())
            .map(str::to_string);
        Self {
            status,
            data,
            issued_at,
            verification_timestamp: Utc::now(),
        }
    }
}

impl DnaCryptEngine {
    pub fn handle_encode(&self, request: &EncodeRequest) -> Result<EncodeResponse, EngineError> {
        self.encode_record(&request.payload).map(EncodeResponse::from)
    }

    pub fn handle_decode(&self, request: &DecodeRequest) -> Result<DecodeResponse, EngineError> {
        self.decode(&request.dna_payload, &request.chaotic_seed)
            .map(DecodeResponse::from_verification)
    }
}
