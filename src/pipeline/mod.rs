//! Pipeline: the forward and reverse flows
//!
//! - **DnaCryptEngine**: `encode(record) -> (payload, seed)` and
//!   `decode(payload, seed) -> Authentic(record) | Tampered`
//! - **Wire types**: serde request/response shapes for any transport

mod engine;
mod wire;

pub use engine::{parse_seed, DecodeStage, DnaCryptEngine, EncodedPayload, Record, Verification};
pub use wire::{DecodeRequest, DecodeResponse, EncodeRequest, EncodeResponse, VerificationStatus};
