use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::{Result, SealError};

pub const SALT_LEN: usize = 16;
pub const KEY_LEN: usize = 32;
pub const PBKDF2_ROUNDS: u32 = 100_000;

pub type HmacSha256 = Hmac<Sha256>;
pub type Key = Zeroizing<[u8; KEY_LEN]>;

/// PBKDF2-HMAC-SHA256 master key, lives only as long as the encrypt/decrypt call
pub fn derive_key(password: &str, salt: &[u8]) -> Key {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ROUNDS, &mut *key);

    key
}

/// Derives an independent sub key from the master key, HMAC-SHA256(master, label)
pub fn sub_key(master: &Key, label: &[u8]) -> Result<Key> {
    let mut mac = hmac(&master[..])?;
    mac.update(label);

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    key.copy_from_slice(&mac.finalize().into_bytes());

    Ok(key)
}

pub fn hmac(key: &[u8]) -> Result<HmacSha256> {
    <HmacSha256 as Mac>::new_from_slice(key).map_err(|_| SealError::EncryptionFailed)
}

pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    OsRng.fill_bytes(&mut bytes);

    bytes
}

/// A blob must at least carry the fixed prefix (and tag) of its suite
pub fn ensure_len(suite: &'static str, blob: &[u8], required: usize) -> Result<()> {
    if blob.len() < required {
        return Err(SealError::MalformedCiphertext {
            suite,
            required,
            actual: blob.len(),
        });
    }

    Ok(())
}
