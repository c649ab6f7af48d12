use std::string::FromUtf8Error;
use thiserror::Error;

pub use stegano_seal::SealError;

#[derive(Error, Debug)]
pub enum SteganoError {
    /// Represents an unreadable or corrupt carrier image, or an unknown image format
    #[error("Image could not be loaded: {0}")]
    ImageLoad(String),

    /// Represents a carrier with a channel layout other than grey, RGB or RGBA
    #[error("Unsupported channel count {0}, expected 1, 3 or 4")]
    UnsupportedChannelCount(u8),

    /// Represents carrier dimensions that are below the practical minimum
    #[error("Image of {width}x{height} is too small, at least {min}x{min} is required")]
    ImageTooSmall { width: u32, height: u32, min: u32 },

    /// Represents a payload that does not fit into the carrier with the chosen algorithm
    #[error(
        "Capacity exceeded: the payload needs {required} bytes but the carrier offers only {available} bytes"
    )]
    CapacityExceeded { required: usize, available: usize },

    /// Represents an algorithm key that does not name any known algorithm
    #[error("Unknown algorithm '{0}', available: LSB, DCT, DWT, Adaptive LSB")]
    UnknownAlgorithm(String),

    /// Represents a cipher suite identifier or name that is not known
    #[error("Unsupported cipher suite: {0}")]
    UnsupportedCipher(String),

    /// Represents an unveil of no secret data. For example when a media did not contain any secrets
    #[error("No hidden data found")]
    NoHiddenData,

    /// Represents a payload frame that is too short or carries unknown header values
    #[error("Malformed payload header: {0}")]
    MalformedHeader(String),

    /// Represents an encrypted body that is shorter than its salt and iv/nonce prefix
    #[error("Malformed ciphertext: at least {required} bytes required, got {actual}")]
    MalformedCiphertext { required: usize, actual: usize },

    /// Represents a wrong or missing password, or tampered encrypted data
    #[error("Decryption failed, wrong password or corrupted data")]
    DecryptionFailed,

    /// Represents a failure when encrypting the data
    #[error("Encryption failed")]
    EncryptionFailed,

    /// Represents a quality analysis of two differently shaped images
    #[error("Dimension mismatch: {left:?} vs {right:?} (width, height, channels)")]
    DimensionMismatch {
        left: (u32, u32, u8),
        right: (u32, u32, u8),
    },

    /// Represents a compressed body that could not be inflated
    #[error("Decompression failed")]
    Decompression(#[source] std::io::Error),

    #[error("Invalid compression level {0}, expected 0..=9")]
    InvalidCompressionLevel(u8),

    /// Represents the error of invalid UTF-8 text data found inside of a text message
    #[error("Invalid text data found inside a message")]
    InvalidTextData(#[from] FromUtf8Error),

    /// Represents a transform domain embedding that did not survive rounding and clamping
    #[error("Embedding did not survive rounding, {mismatched_bits} bits unstable")]
    UnstableEmbedding { mismatched_bits: usize },

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncoding,

    /// Represents a task that was cancelled before it completed
    #[error("Operation cancelled")]
    Cancelled,

    /// Represents a failure to spin up the worker pool
    #[error("Worker pool could not be created")]
    WorkerPool(#[source] std::io::Error),

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("No carrier media set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing message")]
    MissingMessage,
}

/// Stable, matchable error category for adapters rendering failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ImageLoad,
    ImageTooSmall,
    CapacityExceeded,
    UnknownAlgorithm,
    UnsupportedCipher,
    NoHiddenData,
    MalformedHeader,
    MalformedCiphertext,
    DecryptionFailed,
    DimensionMismatch,
    Decompression,
    InvalidInput,
    Cancelled,
    Internal,
}

impl SteganoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SteganoError::ImageLoad(_) | SteganoError::UnsupportedChannelCount(_) => {
                ErrorKind::ImageLoad
            }
            SteganoError::ImageTooSmall { .. } => ErrorKind::ImageTooSmall,
            SteganoError::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            SteganoError::UnknownAlgorithm(_) => ErrorKind::UnknownAlgorithm,
            SteganoError::UnsupportedCipher(_) => ErrorKind::UnsupportedCipher,
            SteganoError::NoHiddenData => ErrorKind::NoHiddenData,
            SteganoError::MalformedHeader(_) => ErrorKind::MalformedHeader,
            SteganoError::MalformedCiphertext { .. } => ErrorKind::MalformedCiphertext,
            SteganoError::DecryptionFailed => ErrorKind::DecryptionFailed,
            SteganoError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            SteganoError::Decompression(_) => ErrorKind::Decompression,
            SteganoError::InvalidCompressionLevel(_)
            | SteganoError::InvalidTextData(_)
            | SteganoError::CarrierNotSet
            | SteganoError::TargetNotSet
            | SteganoError::MissingMessage => ErrorKind::InvalidInput,
            SteganoError::Cancelled => ErrorKind::Cancelled,
            SteganoError::EncryptionFailed
            | SteganoError::UnstableEmbedding { .. }
            | SteganoError::ImageEncoding
            | SteganoError::WorkerPool(_)
            | SteganoError::WriteError { .. }
            | SteganoError::IoError(_) => ErrorKind::Internal,
        }
    }
}

impl From<SealError> for SteganoError {
    fn from(e: SealError) -> Self {
        match e {
            SealError::UnsupportedCipher(id) => SteganoError::UnsupportedCipher(id),
            SealError::MalformedCiphertext {
                required, actual, ..
            } => SteganoError::MalformedCiphertext { required, actual },
            SealError::DecryptionFailed => SteganoError::DecryptionFailed,
            SealError::EncryptionFailed => SteganoError::EncryptionFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_errors_keep_their_kind() {
        let e: SteganoError = SealError::DecryptionFailed.into();
        assert_eq!(e.kind(), ErrorKind::DecryptionFailed);

        let e: SteganoError = SealError::MalformedCiphertext {
            suite: "ChaCha20",
            required: 44,
            actual: 3,
        }
        .into();
        assert_eq!(e.kind(), ErrorKind::MalformedCiphertext);
        assert_eq!(
            e.to_string(),
            "Malformed ciphertext: at least 44 bytes required, got 3"
        );
    }

    #[test]
    fn capacity_error_carries_the_numbers() {
        let e = SteganoError::CapacityExceeded {
            required: 65,
            available: 64,
        };
        assert_eq!(e.kind(), ErrorKind::CapacityExceeded);
        assert!(e.to_string().contains("65"));
        assert!(e.to_string().contains("64"));
    }
}
