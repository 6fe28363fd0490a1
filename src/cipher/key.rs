//! AesKey: 256-bit block cipher key

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key length in bytes
pub const AES_KEY_LEN: usize = 32;

/// AES-256 key material, wiped from memory when dropped
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AesKey([u8; AES_KEY_LEN]);

impl AesKey {
    pub fn from_bytes(bytes: [u8; AES_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Accepts exactly 32 bytes
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let array: [u8; AES_KEY_LEN] = bytes.try_into().ok()?;
        Some(Self(array))
    }

    /// Decode a standard base64 string that must yield exactly 32 bytes
    pub fn from_base64(encoded: &str) -> Option<Self> {
        let mut decoded = STANDARD.decode(encoded.trim()).ok()?;
        let key = Self::from_slice(&decoded);
        decoded.zeroize();
        key
    }

    /// Random key from the thread-local CSPRNG
    pub fn generate() -> Self {
        let mut bytes = [0u8; AES_KEY_LEN];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; AES_KEY_LEN] {
        &self.0
    }

    /// Standard base64 of the key. This is secret material.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }
}

impl fmt::Debug for AesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AesKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_round_trip() {
        let key = AesKey::generate();
        let restored = AesKey::from_base64(&key.to_base64()).unwrap();
        assert_eq!(key, restored);
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(AesKey::from_slice(&[0u8; 16]).is_none());
        assert!(AesKey::from_base64(&STANDARD.encode([7u8; 31])).is_none());
        assert!(AesKey::from_base64("not base64!").is_none());
        assert!(AesKey::from_base64(&STANDARD.encode([7u8; 32])).is_some());
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = AesKey::from_bytes([0xAB; 32]);
        assert_eq!(format!("{:?}", key), "AesKey(<redacted>)");
    }
}
