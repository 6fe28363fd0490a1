//! Cipher: AES-256-CBC envelope encryption
//!
//! - **AesKey**: 32-byte secret, zeroized on drop
//! - **BlockCipher**: envelope <-> base64(IV || ciphertext)
//!
//! Decryption failures are deliberately indistinguishable from one another
//! (bad base64, short input, bad padding, bad JSON all become the same
//! `DecryptionError`) so the cipher layer cannot act as a padding oracle.

mod block;
mod key;

pub use block::{BlockCipher, CipherBlob, DecryptionError, IV_LEN};
pub use key::{AesKey, AES_KEY_LEN};
