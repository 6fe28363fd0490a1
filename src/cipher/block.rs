//! BlockCipher: AES-256-CBC with PKCS#7 padding and a per-message random IV

use super::key::AesKey;
use crate::error::{EngineError, ValidationError};
use crate::integrity::canonical_json;
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::debug;
use serde_json::Value;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Initialisation vector length (one AES block)
pub const IV_LEN: usize = 16;

/// Base64 text of `IV || ciphertext`
pub type CipherBlob = String;

/// The only error decryption can produce. Carries no detail on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Decryption failed")]
pub struct DecryptionError;

/// AES-256-CBC bound to one key
#[derive(Debug, Clone)]
pub struct BlockCipher {
    key: AesKey,
}

impl BlockCipher {
    pub fn new(key: AesKey) -> Self {
        Self { key }
    }

    /// Encrypt a JSON object (serialized canonically) under a fresh IV
    pub fn encrypt(&self, envelope: &Value) -> Result<CipherBlob, EngineError> {
        if !envelope.is_object() {
            return Err(ValidationError::NotAMapping.into());
        }
        let plaintext = canonical_json(envelope)?;
        let iv: [u8; IV_LEN] = rand::random();
        let ciphertext = Aes256CbcEnc::new_from_slices(self.key.as_bytes(), &iv)
            .map_err(|e| EngineError::Internal(format!("cipher init: {}", e)))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        let mut combined = Vec::with_capacity(IV_LEN + ciphertext.len());
        combined.extend_from_slice(&iv);
        combined.extend_from_slice(&ciphertext);
        debug!("Encrypted {} plaintext bytes", plaintext.len());
        Ok(STANDARD.encode(combined))
    }

    /// Decrypt a blob back into its JSON value.
    ///
    /// Missing trailing `=` padding is restored before decoding. The blob is
    /// taken as raw bytes because on the decode path it is rebuilt from an
    /// untrusted bit stream and need not be valid UTF-8.
    pub fn decrypt(&self, blob: &[u8]) -> Result<Value, DecryptionError> {
        let mut text = blob.to_vec();
        let remainder = text.len() % 4;
        if remainder != 0 {
            text.resize(text.len() + 4 - remainder, b'=');
        }
        let combined = STANDARD.decode(&text).map_err(|_| DecryptionError)?;
        if combined.len() < IV_LEN {
            return Err(DecryptionError);
        }
        let (iv, ciphertext) = combined.split_at(IV_LEN);
        let plaintext = Aes256CbcDec::new_from_slices(self.key.as_bytes(), iv)
            .map_err(|_| DecryptionError)?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| DecryptionError)?;
        serde_json::from_slice(&plaintext).map_err(|_| DecryptionError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cipher() -> BlockCipher {
        BlockCipher::new(AesKey::from_bytes([0x42; 32]))
    }

    #[test]
    fn test_encrypt_decrypt() {
        let c = cipher();
        let envelope = json!({"data": {"name": "Ada", "score": 97}, "hash": "abc"});
        let blob = c.encrypt(&envelope).unwrap();
        assert_eq!(c.decrypt(blob.as_bytes()).unwrap(), envelope);
    }

    #[test]
    fn test_floats_survive_bit_exact() {
        let c = cipher();
        for f in [1.0715660391465826e-75, 0.1 + 0.2, f64::MIN_POSITIVE, f64::MAX, -2.5e-308] {
            let envelope = json!({"data": {"score": f}, "hash": "h"});
            let restored = c.decrypt(c.encrypt(&envelope).unwrap().as_bytes()).unwrap();
            let back = restored["data"]["score"].as_f64().unwrap();
            assert_eq!(back.to_bits(), f.to_bits(), "{:e} drifted to {:e}", f, back);
        }
    }

    #[test]
    fn test_fresh_iv_per_encryption() {
        let c = cipher();
        let envelope = json!({"data": {}, "hash": "x"});
        let a = c.encrypt(&envelope).unwrap();
        let b = c.encrypt(&envelope).unwrap();
        assert_ne!(a, b);
        let a_raw = STANDARD.decode(&a).unwrap();
        let b_raw = STANDARD.decode(&b).unwrap();
        assert_ne!(a_raw[..IV_LEN], b_raw[..IV_LEN]);
        // IV + whole padded blocks
        assert_eq!((a_raw.len() - IV_LEN) % 16, 0);
    }

    #[test]
    fn test_restores_missing_padding() {
        let c = cipher();
        let envelope = json!({"data": {"k": "v"}, "hash": "h"});
        let blob = c.encrypt(&envelope).unwrap();
        let trimmed = blob.trim_end_matches('=');
        assert_eq!(c.decrypt(trimmed.as_bytes()).unwrap(), envelope);
    }

    #[test]
    fn test_rejects_non_object() {
        let err = cipher().encrypt(&json!([1, 2])).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_failures_are_indistinguishable() {
        let c = cipher();
        let blob = c.encrypt(&json!({"data": {}, "hash": "h"})).unwrap();

        let bad_base64 = c.decrypt(b"!!!not-base64!!!").unwrap_err();
        let too_short = c.decrypt(STANDARD.encode([1u8; 8]).as_bytes()).unwrap_err();
        let iv_only = c.decrypt(STANDARD.encode([1u8; 16]).as_bytes()).unwrap_err();
        let wrong_key = BlockCipher::new(AesKey::from_bytes([0x24; 32]))
            .decrypt(blob.as_bytes())
            .unwrap_err();

        for err in [bad_base64, too_short, iv_only, wrong_key] {
            assert_eq!(err, DecryptionError);
            assert_eq!(err.to_string(), "Decryption failed");
        }
    }

    #[test]
    fn test_non_utf8_blob() {
        assert_eq!(cipher().decrypt(&[0xff, 0xfe, 0x80]), Err(DecryptionError));
    }
}
