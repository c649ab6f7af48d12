use std::path::{Path, PathBuf};

use log::debug;
use stegano_seal::CipherSuite;

use super::progress::{self, milestone, ProgressSink};
use crate::algorithms::{ensure_capacity, Algorithm, EmbeddingAlgorithm};
use crate::api::shared::Password;
use crate::cancel::CancellationToken;
use crate::media::Carrier;
use crate::payload;
use crate::quality::{analyze_quality, QualityReport};
use crate::result::Result;

/// Where a request finds its carrier, files are only read inside the task
#[derive(Debug, Clone)]
pub enum CarrierSource {
    Path(PathBuf),
    Image(Carrier),
}

impl CarrierSource {
    pub fn load(self) -> Result<Carrier> {
        match self {
            CarrierSource::Path(path) => Carrier::from_file(&path),
            CarrierSource::Image(carrier) => Ok(carrier),
        }
    }
}

impl From<Carrier> for CarrierSource {
    fn from(carrier: Carrier) -> Self {
        CarrierSource::Image(carrier)
    }
}

impl From<PathBuf> for CarrierSource {
    fn from(path: PathBuf) -> Self {
        CarrierSource::Path(path)
    }
}

impl From<&Path> for CarrierSource {
    fn from(path: &Path) -> Self {
        CarrierSource::Path(path.to_path_buf())
    }
}

#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// empty means no encryption
    pub password: Password,
    pub algorithm: Algorithm,
    /// only used together with a password
    pub cipher: CipherSuite,
    /// 0 switches compression off, 1 ..= 9 as zlib understands it
    pub compression_level: u8,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            password: Password::default(),
            algorithm: Algorithm::default(),
            cipher: CipherSuite::default(),
            compression_level: 6,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EncodeOutcome {
    pub image: Carrier,
    pub quality: QualityReport,
    /// bytes the algorithm offered
    pub capacity: usize,
    /// bytes embedded, frame header included
    pub payload_len: usize,
    pub utilization_percent: f64,
}

pub fn capacity(carrier: &Carrier, algorithm: &Algorithm) -> usize {
    algorithm.capacity(carrier)
}

/// Seals `message`, hides it and reports the quality of the result.
///
/// The carrier itself is never modified, the outcome holds the new image.
pub fn encode(carrier: &Carrier, message: &[u8], options: &EncodeOptions) -> Result<EncodeOutcome> {
    encode_with(carrier, message, options, None, &CancellationToken::default())
}

pub(crate) fn encode_with(
    carrier: &Carrier,
    message: &[u8],
    options: &EncodeOptions,
    sink: Option<&dyn ProgressSink>,
    cancel: &CancellationToken,
) -> Result<EncodeOutcome> {
    milestone(sink, progress::encode::LOADED);

    let payload = payload::seal(
        message,
        options.password.as_str(),
        options.cipher,
        options.compression_level,
    )?;
    milestone(sink, progress::encode::SEALED);

    let algorithm = &options.algorithm;
    let capacity = algorithm.capacity(carrier);
    ensure_capacity(payload.len(), capacity)?;
    milestone(sink, progress::encode::FITS);

    cancel.check()?;
    let image = algorithm.embed_cancellable(carrier, &payload, cancel)?;
    milestone(sink, progress::encode::EMBEDDED);

    let quality = analyze_quality(carrier, &image)?;
    let utilization_percent = payload.len() as f64 / capacity as f64 * 100.0;
    debug!(
        "{algorithm}: {} of {capacity} bytes used ({utilization_percent:.1}%), PSNR {:.2} dB, {}",
        payload.len(),
        quality.psnr,
        quality.quality_score
    );
    milestone(sink, progress::encode::DONE);

    Ok(EncodeOutcome {
        image,
        quality,
        capacity,
        payload_len: payload.len(),
        utilization_percent,
    })
}

/// Extracts and opens a payload. The password only matters for encrypted payloads.
pub fn decode(carrier: &Carrier, password: &str, algorithm: &Algorithm) -> Result<Vec<u8>> {
    decode_with(carrier, password, algorithm, None)
}

/// like [`decode`], for messages that are UTF-8 text
pub fn decode_text(carrier: &Carrier, password: &str, algorithm: &Algorithm) -> Result<String> {
    Ok(String::from_utf8(decode(carrier, password, algorithm)?)?)
}

pub(crate) fn decode_with(
    carrier: &Carrier,
    password: &str,
    algorithm: &Algorithm,
    sink: Option<&dyn ProgressSink>,
) -> Result<Vec<u8>> {
    milestone(sink, progress::decode::LOADED);

    let frame = algorithm.extract(carrier, None)?;
    debug!("{algorithm}: extracted a frame of {} bytes", frame.len());
    milestone(sink, progress::decode::EXTRACTED);

    let message = payload::open(&frame, password)?;
    milestone(sink, progress::decode::DONE);

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SteganoError;
    use crate::test_utils::prepare_gradient_carrier;
    use std::sync::Mutex;

    #[test]
    fn encode_reports_utilization() {
        let carrier = prepare_gradient_carrier(40, 40, 3);
        let options = EncodeOptions {
            compression_level: 0,
            ..EncodeOptions::default()
        };

        let outcome = encode(&carrier, b"HELLO", &options).unwrap();

        // 2 header bytes + 5 message bytes of (4800 - 32) / 8
        assert_eq!(outcome.capacity, 596);
        assert_eq!(outcome.payload_len, 7);
        assert!((outcome.utilization_percent - 700.0 / 596.0).abs() < 1e-9);
        assert_eq!(decode_text(&outcome.image, "", &Algorithm::default()).unwrap(), "HELLO");
    }

    #[test]
    fn milestones_arrive_in_order() {
        let carrier = prepare_gradient_carrier(40, 40, 1);
        let seen = Mutex::new(Vec::new());
        let sink = |p: u8| seen.lock().unwrap().push(p);

        let outcome = encode_with(
            &carrier,
            b"progress",
            &EncodeOptions::default(),
            Some(&sink),
            &CancellationToken::default(),
        )
        .unwrap();
        decode_with(&outcome.image, "", &Algorithm::default(), Some(&sink)).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![10, 30, 50, 80, 100, 20, 60, 100]);
    }

    #[test]
    fn too_large_messages_fail_before_embedding() {
        let carrier = prepare_gradient_carrier(12, 12, 1);
        let options = EncodeOptions {
            compression_level: 0,
            ..EncodeOptions::default()
        };

        // capacity (144 - 32) / 8 = 14, the frame header takes 2 of them
        assert!(encode(&carrier, &[1; 12], &options).is_ok());
        assert!(matches!(
            encode(&carrier, &[1; 13], &options),
            Err(SteganoError::CapacityExceeded {
                required: 15,
                available: 14
            })
        ));
    }

    #[test]
    fn non_text_messages_fail_as_text() {
        let carrier = prepare_gradient_carrier(20, 20, 3);
        let outcome = encode(&carrier, &[0xFF, 0xFE, 0x00], &EncodeOptions::default()).unwrap();

        assert_eq!(
            decode(&outcome.image, "", &Algorithm::default()).unwrap(),
            vec![0xFF, 0xFE, 0x00]
        );
        assert!(matches!(
            decode_text(&outcome.image, "", &Algorithm::default()),
            Err(SteganoError::InvalidTextData(_))
        ));
    }
}
