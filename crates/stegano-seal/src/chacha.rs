//! ChaCha20-Poly1305
//!
//! Blob layout: `salt(16) || nonce(12) || ciphertext || tag(16)`

use chacha20poly1305::aead::Aead;
use chacha20poly1305::{ChaCha20Poly1305, KeyInit, Nonce};

use crate::kdf::{derive_key, ensure_len, random_bytes, SALT_LEN};
use crate::{Result, SealError};

const NAME: &str = "ChaCha20";
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

pub fn encrypt(plaintext: &[u8], password: &str) -> Result<Vec<u8>> {
    let salt = random_bytes::<SALT_LEN>();
    let nonce = random_bytes::<NONCE_LEN>();
    let key = derive_key(password, &salt);

    let cipher_data = ChaCha20Poly1305::new_from_slice(&key[..])
        .map_err(|_| SealError::EncryptionFailed)?
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| SealError::EncryptionFailed)?;

    let mut blob = Vec::with_capacity(SALT_LEN + NONCE_LEN + cipher_data.len());
    blob.extend_from_slice(&salt);
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&cipher_data);

    Ok(blob)
}

pub fn decrypt(blob: &[u8], password: &str) -> Result<Vec<u8>> {
    ensure_len(NAME, blob, SALT_LEN + NONCE_LEN + TAG_LEN)?;
    let (salt, rest) = blob.split_at(SALT_LEN);
    let (nonce, cipher_data) = rest.split_at(NONCE_LEN);
    let key = derive_key(password, salt);

    ChaCha20Poly1305::new_from_slice(&key[..])
        .map_err(|_| SealError::DecryptionFailed)?
        .decrypt(Nonce::from_slice(nonce), cipher_data)
        .map_err(|_| SealError::DecryptionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_cipher_does_not_pad() {
        let blob = encrypt(b"0123456789", "pw").unwrap();
        assert_eq!(blob.len(), SALT_LEN + NONCE_LEN + 10 + TAG_LEN);
    }

    #[test]
    fn same_plaintext_encrypts_differently() {
        let a = encrypt(b"same", "pw").unwrap();
        let b = encrypt(b"same", "pw").unwrap();
        assert_ne!(a, b);
    }
}
