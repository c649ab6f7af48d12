use thiserror::Error;

#[derive(Debug, Error)]
pub enum SealError {
    /// The cipher suite identifier (numeric id or name) is not known
    #[error("Unsupported cipher suite: {0}")]
    UnsupportedCipher(String),

    /// The blob is too short to even carry the salt and iv/nonce of its suite
    #[error("Malformed ciphertext: {suite} needs at least {required} bytes, got {actual}")]
    MalformedCiphertext {
        suite: &'static str,
        required: usize,
        actual: usize,
    },

    /// Wrong password, tampered blob or broken padding, deliberately not distinguished
    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("Encryption failed")]
    EncryptionFailed,
}
