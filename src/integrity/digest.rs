//! Canonical SHA-256 digests and constant-time verification

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fmt;
use subtle::ConstantTimeEq;

/// Length of a lowercase hex SHA-256 digest
pub const DIGEST_HEX_LEN: usize = 64;

/// 64-character lowercase hex SHA-256 digest
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexDigest(String);

impl HexDigest {
    /// Accepts only 64 lowercase hex characters
    pub fn parse(s: &str) -> Option<Self> {
        let well_formed = s.len() == DIGEST_HEX_LEN
            && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        well_formed.then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HexDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Rebuild `value` with every object's keys inserted in sorted order.
///
/// serde_json's `Map` is a `BTreeMap` unless `preserve_order` gets enabled
/// somewhere in the dependency graph, in which case it keeps insertion
/// order. Rebuilding keeps the output sorted either way.
fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut out = Map::with_capacity(map.len());
            for (key, inner) in entries {
                out.insert(key.clone(), sorted(inner));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}

/// Compact JSON with keys sorted at every nesting level
pub fn canonical_json(value: &Value) -> Result<String, ValidationError> {
    serde_json::to_string(&sorted(value))
        .map_err(|e| ValidationError::Serialization(e.to_string()))
}

/// SHA-256 over the canonical JSON of a record, as lowercase hex.
///
/// Only JSON objects are records; anything else is rejected.
pub fn canonical_hash(record: &Value) -> Result<HexDigest, ValidationError> {
    if !record.is_object() {
        return Err(ValidationError::NotAMapping);
    }
    let json = canonical_json(record)?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(HexDigest(hex::encode(hasher.finalize())))
}

/// Recompute the digest of `record` and compare it to `expected` in
/// constant time. Never errors: a non-object record is simply `false`.
pub fn verify(record: &Value, expected: &str) -> bool {
    let Ok(actual) = canonical_hash(record) else {
        return false;
    };
    // Slices of unequal length compare unequal without inspecting contents
    actual.as_str().as_bytes().ct_eq(expected.as_bytes()).into()
}
