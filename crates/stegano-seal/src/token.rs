//! Fernet compatible authenticated tokens
//!
//! The 32 byte master key is split into a signing half and an encryption half,
//! exactly like a Fernet key. Blob layout: `salt(16) || base64url(token)` with
//! `token = 0x80 || timestamp(u64 BE) || iv(16) || AES-128-CBC(plaintext) || HMAC-SHA256`.

use std::time::{SystemTime, UNIX_EPOCH};

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use hmac::Mac;

use crate::kdf::{derive_key, ensure_len, hmac, random_bytes, SALT_LEN};
use crate::{Result, SealError};

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

const NAME: &str = "AuthenticatedToken";
const VERSION: u8 = 0x80;
const TIMESTAMP_LEN: usize = 8;
const IV_LEN: usize = 16;
const TAG_LEN: usize = 32;
const HALF_KEY: usize = 16;

pub fn encrypt(plaintext: &[u8], password: &str) -> Result<Vec<u8>> {
    let salt = random_bytes::<SALT_LEN>();
    let iv = random_bytes::<IV_LEN>();
    let key = derive_key(password, &salt);
    let (signing_key, encryption_key) = key.split_at(HALF_KEY);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    let ciphertext = Aes128CbcEnc::new_from_slices(encryption_key, &iv)
        .map_err(|_| SealError::EncryptionFailed)?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut token = Vec::with_capacity(1 + TIMESTAMP_LEN + IV_LEN + ciphertext.len() + TAG_LEN);
    token.push(VERSION);
    token.extend_from_slice(&timestamp.to_be_bytes());
    token.extend_from_slice(&iv);
    token.extend_from_slice(&ciphertext);

    let mut mac = hmac(signing_key)?;
    mac.update(&token);
    token.extend_from_slice(&mac.finalize().into_bytes());

    let mut blob = salt.to_vec();
    blob.extend_from_slice(URL_SAFE.encode(&token).as_bytes());

    Ok(blob)
}

pub fn decrypt(blob: &[u8], password: &str) -> Result<Vec<u8>> {
    ensure_len(NAME, blob, SALT_LEN)?;
    let (salt, encoded) = blob.split_at(SALT_LEN);

    // anything that is not a well formed token is treated like a forged one
    let token = URL_SAFE
        .decode(encoded)
        .map_err(|_| SealError::DecryptionFailed)?;
    if token.len() < 1 + TIMESTAMP_LEN + IV_LEN + TAG_LEN || token[0] != VERSION {
        return Err(SealError::DecryptionFailed);
    }

    let key = derive_key(password, salt);
    let (signing_key, encryption_key) = key.split_at(HALF_KEY);

    let (signed, tag) = token.split_at(token.len() - TAG_LEN);
    let mut mac = hmac(signing_key)?;
    mac.update(signed);
    mac.verify_slice(tag)
        .map_err(|_| SealError::DecryptionFailed)?;

    let iv = &signed[1 + TIMESTAMP_LEN..1 + TIMESTAMP_LEN + IV_LEN];
    let ciphertext = &signed[1 + TIMESTAMP_LEN + IV_LEN..];

    Aes128CbcDec::new_from_slices(encryption_key, iv)
        .map_err(|_| SealError::DecryptionFailed)?
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| SealError::DecryptionFailed)
}
