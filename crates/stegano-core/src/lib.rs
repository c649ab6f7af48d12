//! # Stegano Core API
//!
//! Hides a message inside the pixels of an image and gets it back out again.
//! A message is optionally compressed, optionally encrypted, framed with a small header and
//! then embedded by one of the [`Algorithm`]s:
//! - [`Lsb`] replaces the least significant bit of every sample
//! - [`AdaptiveLsb`] does the same, but only in the most textured regions
//! - [`Dct`] quantizes low frequency coefficients of an 8x8 block DCT
//! - [`Dwt`] quantizes the horizontal detail band of a one level Haar transform
//!
//! # Usage Examples
//!
//! ## Hide and unveil a message in memory
//!
//! ```rust
//! use stegano_core::{decode_text, encode, Carrier, Dwt, EncodeOptions};
//!
//! let carrier = Carrier::from_fn(128, 128, 3, |x, y, c| (40 + (x + y + c as u32 * 9) % 176) as u8).unwrap();
//! let options = EncodeOptions {
//!     password: "SuperSecret42".into(),
//!     algorithm: Dwt::default().into(),
//!     ..EncodeOptions::default()
//! };
//!
//! let outcome = encode(&carrier, b"Hello, World!", &options).expect("Failed to hide message");
//! assert!(outcome.quality.psnr > 30.0);
//!
//! let message = decode_text(&outcome.image, "SuperSecret42", &options.algorithm).unwrap();
//! assert_eq!(message, "Hello, World!");
//! ```
//!
//! ## Hide data inside an image file
//!
//! ```rust
//! use stegano_core::media::Persist;
//! use stegano_core::Carrier;
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//! let carrier_path = temp_dir.path().join("carrier.png");
//! let secret_path = temp_dir.path().join("image-with-a-secret.png");
//! Carrier::from_fn(200, 150, 3, |x, y, _| (x ^ y) as u8)
//!     .unwrap()
//!     .save_as(&carrier_path)
//!     .unwrap();
//!
//! stegano_core::api::hide::prepare()
//!     .with_message("Hello, World!")  // will hide this message inside the image
//!     .with_password("SuperSecret42") // will encrypt the message with this password
//!     .with_image(&carrier_path)
//!     .with_output(&secret_path)
//!     .execute()
//!     .expect("Failed to hide message in image");
//!
//! let message = stegano_core::api::unveil::prepare()
//!     .with_secret_image(&secret_path)
//!     .with_password("SuperSecret42")
//!     .execute_text()
//!     .expect("Failed to unveil message from image");
//! assert_eq!(message, "Hello, World!");
//! ```
//!
//! ## Many requests at once
//!
//! [`SteganoEngine`] runs requests on a fixed pool of worker threads and hands out a
//! cancellable [`TaskHandle`] per request.

#![warn(clippy::redundant_else)]

pub mod algorithms;
pub mod api;
pub mod bits;
pub mod cancel;
pub mod engine;
pub mod error;
pub mod media;
pub mod payload;
pub mod quality;
pub mod result;

pub use crate::algorithms::{AdaptiveLsb, Algorithm, Dct, Dwt, EmbeddingAlgorithm, Lsb};
pub use crate::api::shared::Password;
pub use crate::cancel::CancellationToken;
pub use crate::engine::{
    capacity, decode, decode_text, encode, CarrierSource, DecodeRequest, EncodeOptions,
    EncodeOutcome, EncodeRequest, EngineConfig, ProgressSink, SteganoEngine, TaskHandle,
};
pub use crate::error::{ErrorKind, SteganoError};
pub use crate::media::{load_carrier, supported_formats, Carrier};
pub use crate::quality::{analyze_quality, detect, DetectionReport, QualityReport, QualityScore};
pub use crate::result::Result;
pub use stegano_seal::CipherSuite;

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::media::Carrier;

    /// smooth ramps, sample values stay within 40 ..= 215
    pub fn prepare_gradient_carrier(width: u32, height: u32, channels: u8) -> Carrier {
        Carrier::from_fn(width, height, channels, |x, y, c| {
            (40 + (x * 7 + y * 5 + u32::from(c) * 31) % 176) as u8
        })
        .expect("gradient carrier")
    }

    /// deterministic pseudo random samples within 16 ..= 239
    pub fn prepare_noise_carrier(width: u32, height: u32, channels: u8) -> Carrier {
        let mut state: u32 = 0x9E37_79B9;
        Carrier::from_fn(width, height, channels, |_, _, _| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (16 + state % 224) as u8
        })
        .expect("noise carrier")
    }
}
