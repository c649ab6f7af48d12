//! AES-256-CBC, encrypt-then-MAC
//!
//! Blob layout: `salt(16) || iv(16) || ciphertext || tag(32)`
//! where `tag = HMAC-SHA256(mac_key, iv || ciphertext)`.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::Mac;

use crate::kdf::{derive_key, ensure_len, hmac, random_bytes, sub_key, SALT_LEN};
use crate::{Result, SealError};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

const NAME: &str = "AES-256-CBC";
const IV_LEN: usize = 16;
const TAG_LEN: usize = 32;
const ENC_LABEL: &[u8] = b"stegano-seal/aes-256-cbc/enc";
const MAC_LABEL: &[u8] = b"stegano-seal/aes-256-cbc/mac";

pub fn encrypt(plaintext: &[u8], password: &str) -> Result<Vec<u8>> {
    let salt = random_bytes::<SALT_LEN>();
    let iv = random_bytes::<IV_LEN>();
    let master = derive_key(password, &salt);
    let enc_key = sub_key(&master, ENC_LABEL)?;
    let mac_key = sub_key(&master, MAC_LABEL)?;

    let ciphertext = Aes256CbcEnc::new_from_slices(&enc_key[..], &iv)
        .map_err(|_| SealError::EncryptionFailed)?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let mut mac = hmac(&mac_key[..])?;
    mac.update(&iv);
    mac.update(&ciphertext);
    let tag = mac.finalize().into_bytes();

    let mut blob = Vec::with_capacity(SALT_LEN + IV_LEN + ciphertext.len() + TAG_LEN);
    blob.extend_from_slice(&salt);
    blob.extend_from_slice(&iv);
    blob.extend_from_slice(&ciphertext);
    blob.extend_from_slice(&tag);

    Ok(blob)
}

pub fn decrypt(blob: &[u8], password: &str) -> Result<Vec<u8>> {
    ensure_len(NAME, blob, SALT_LEN + IV_LEN + TAG_LEN)?;
    let (salt, rest) = blob.split_at(SALT_LEN);
    let (iv, rest) = rest.split_at(IV_LEN);
    let (ciphertext, tag) = rest.split_at(rest.len() - TAG_LEN);

    let master = derive_key(password, salt);
    let enc_key = sub_key(&master, ENC_LABEL)?;
    let mac_key = sub_key(&master, MAC_LABEL)?;

    let mut mac = hmac(&mac_key[..])?;
    mac.update(iv);
    mac.update(ciphertext);
    mac.verify_slice(tag)
        .map_err(|_| SealError::DecryptionFailed)?;

    Aes256CbcDec::new_from_slices(&enc_key[..], iv)
        .map_err(|_| SealError::DecryptionFailed)?
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| SealError::DecryptionFailed)
}
