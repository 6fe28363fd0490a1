//! Integrity: canonical hashing of records
//!
//! A record's digest is SHA-256 over its canonical JSON form (keys sorted at
//! every nesting level), so two records with the same content hash the same
//! regardless of key insertion order.

mod digest;

pub use digest::{canonical_hash, canonical_json, verify, HexDigest};
