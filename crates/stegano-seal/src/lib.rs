//! # Stegano Seal
//! Password based encryption of payloads before they are hidden.
//!
//! Keys are derived with PBKDF2-HMAC-SHA256 from the password and a random
//! salt that travels in front of every blob. All suites are authenticated, a
//! wrong password or a tampered blob always ends in
//! [`SealError::DecryptionFailed`] and never in garbage plaintext.
//!
//! ```rust
//! use stegano_seal::{decrypt, encrypt, CipherSuite};
//!
//! let blob = encrypt(b"Hello, World!", "Secret42", CipherSuite::ChaCha20).unwrap();
//! let plain = decrypt(&blob, "Secret42", CipherSuite::ChaCha20).unwrap();
//! assert_eq!(plain, b"Hello, World!");
//! ```

mod aes_cbc;
mod chacha;
pub mod error;
pub mod kdf;
mod suite;
mod token;

use log::debug;

pub use crate::error::SealError;
pub use crate::suite::CipherSuite;

pub type Result<T> = std::result::Result<T, SealError>;

/// encrypt data with password under the given suite, the salt is prepended to the blob
pub fn encrypt(plaintext: &[u8], password: &str, suite: CipherSuite) -> Result<Vec<u8>> {
    debug!("encrypting {} bytes with {suite}", plaintext.len());
    match suite {
        CipherSuite::Aes256Cbc => aes_cbc::encrypt(plaintext, password),
        CipherSuite::ChaCha20 => chacha::encrypt(plaintext, password),
        CipherSuite::AuthenticatedToken => token::encrypt(plaintext, password),
    }
}

/// decrypt a blob produced by [`encrypt`] with the same password and suite
pub fn decrypt(blob: &[u8], password: &str, suite: CipherSuite) -> Result<Vec<u8>> {
    debug!("decrypting {} bytes with {suite}", blob.len());
    match suite {
        CipherSuite::Aes256Cbc => aes_cbc::decrypt(blob, password),
        CipherSuite::ChaCha20 => chacha::decrypt(blob, password),
        CipherSuite::AuthenticatedToken => token::decrypt(blob, password),
    }
}
