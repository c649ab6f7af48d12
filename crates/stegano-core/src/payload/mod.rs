//! Turning a message into the bytes that get embedded, and back.

mod compression;
mod frame;

use log::debug;
use stegano_seal::CipherSuite;

pub use compression::{
    compress, decompress, inflate_limit, MAX_COMPRESSION_LEVEL, MAX_INFLATE_RATIO,
    MIN_INFLATE_LIMIT,
};
pub use frame::{build_frame, parse_frame, Frame, HasFlag, HEADER_LEN};

use crate::error::SteganoError;
use crate::result::Result;

/// Compresses when `compression_level > 0`, then encrypts when `password` is not empty,
/// and frames the result.
pub fn seal(
    message: &[u8],
    password: &str,
    cipher: CipherSuite,
    compression_level: u8,
) -> Result<Vec<u8>> {
    if compression_level > MAX_COMPRESSION_LEVEL {
        return Err(SteganoError::InvalidCompressionLevel(compression_level));
    }

    let compressed = compression_level > 0;
    let mut body = if compressed {
        compress(message, compression_level)?
    } else {
        message.to_vec()
    };
    let encrypted = !password.is_empty();
    if encrypted {
        body = stegano_seal::encrypt(&body, password, cipher)?;
    }
    debug!(
        "sealed {} message bytes into {} body bytes (compressed: {compressed}, encrypted: {encrypted})",
        message.len(),
        body.len()
    );

    Frame {
        encrypted,
        compressed,
        cipher,
        body,
    }
    .to_bytes()
}

/// Reverses [`seal`]. The password is ignored for frames that are not encrypted.
pub fn open(frame_bytes: &[u8], password: &str) -> Result<Vec<u8>> {
    let frame = Frame::parse(frame_bytes)?;
    let mut body = frame.body;

    if frame.encrypted {
        if password.is_empty() {
            debug!("frame is encrypted with {} but no password given", frame.cipher);
            return Err(SteganoError::DecryptionFailed);
        }
        body = stegano_seal::decrypt(&body, password, frame.cipher)?;
    }
    if frame.compressed {
        body = decompress(&body, inflate_limit(frame_bytes.len()))?;
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_messages_are_only_framed() {
        let sealed = seal(b"HELLO", "", CipherSuite::ChaCha20, 0).unwrap();

        assert_eq!(sealed, vec![0, 1, b'H', b'E', b'L', b'L', b'O']);
        assert_eq!(open(&sealed, "").unwrap(), b"HELLO");
        assert_eq!(open(&sealed, "ignored").unwrap(), b"HELLO");
    }

    #[test]
    fn should_round_trip_with_every_suite_and_compression() {
        let message = "secret message, secret message, secret message".as_bytes();
        for cipher in CipherSuite::ALL {
            let sealed = seal(message, "secret123", cipher, 6).unwrap();
            let frame = parse_frame(&sealed).unwrap();
            assert!(frame.encrypted && frame.compressed);
            assert_eq!(frame.cipher, cipher);

            assert_eq!(open(&sealed, "secret123").unwrap(), message);
        }
    }

    #[test]
    fn encrypted_frames_need_the_right_password() {
        let sealed = seal(b"HELLO", "secret123", CipherSuite::Aes256Cbc, 0).unwrap();

        assert!(matches!(open(&sealed, ""), Err(SteganoError::DecryptionFailed)));
        assert!(matches!(
            open(&sealed, "secret124"),
            Err(SteganoError::DecryptionFailed)
        ));
    }

    #[test]
    fn invalid_levels_are_rejected_up_front() {
        assert!(matches!(
            seal(b"x", "", CipherSuite::default(), 12),
            Err(SteganoError::InvalidCompressionLevel(12))
        ));
    }

    #[test]
    fn a_compressed_flag_on_garbage_fails_to_inflate() {
        let frame = build_frame(b"not deflated", false, true, 0).unwrap();

        assert!(matches!(open(&frame, ""), Err(SteganoError::Decompression(_))));
    }

    #[test]
    fn bodies_that_inflate_too_far_are_refused() {
        let zeros = vec![0; 2 * MIN_INFLATE_LIMIT];
        let sealed = seal(&zeros, "", CipherSuite::default(), 9).unwrap();
        assert!(sealed.len() * MAX_INFLATE_RATIO < MIN_INFLATE_LIMIT);

        assert!(matches!(open(&sealed, ""), Err(SteganoError::Decompression(_))));
    }
}
