use std::path::PathBuf;

use clap::Args;
use log::{debug, info};
use stegano_core::{Algorithm, CipherSuite, SteganoError};

use super::PasswordArgs;
use crate::CliResult;

/// Hides a message or the bytes of a file in an image
#[derive(Args, Debug)]
pub struct HideArgs {
    #[command(flatten)]
    pub password: PasswordArgs,

    /// Carrier image such as PNG, BMP or TIFF, used readonly
    #[arg(short = 'i', long = "in", value_name = "image file")]
    pub media: PathBuf,

    /// Final image will be stored as file, use a lossless format
    #[arg(short = 'o', long = "out", value_name = "output image file")]
    pub write_to_file: PathBuf,

    /// File to hide in the image
    #[arg(
        short = 'd',
        long = "data",
        value_name = "data file",
        required_unless_present = "message",
        conflicts_with = "message"
    )]
    pub data_file: Option<PathBuf>,

    /// A text message that will be hidden
    #[arg(short, long, value_name = "text message")]
    pub message: Option<String>,

    /// LSB, DCT, DWT or Adaptive LSB
    #[arg(short, long, value_name = "algorithm", default_value = "LSB")]
    pub algorithm: Algorithm,

    /// AES-256-CBC, ChaCha20 or Fernet, only used together with a password
    #[arg(short, long, value_name = "cipher", default_value = "AES-256-CBC")]
    pub cipher: CipherSuite,

    /// zlib compression level, 0 switches compression off
    #[arg(
        short = 'z',
        long,
        value_name = "level",
        default_value_t = 6,
        value_parser = clap::value_parser!(u8).range(0..=9)
    )]
    pub compression: u8,
}

impl HideArgs {
    pub fn run(self) -> CliResult<()> {
        let data = match (&self.message, &self.data_file) {
            (Some(message), _) => message.as_bytes().to_vec(),
            (None, Some(file)) => std::fs::read(file)?,
            (None, None) => return Err(SteganoError::MissingMessage),
        };
        debug!("{} bytes to hide in {:?}", data.len(), self.media);
        let password = self.password.resolve(true)?;

        let outcome = stegano_core::api::hide::prepare()
            .with_data(data)
            .with_password(password.as_str())
            .with_algorithm(self.algorithm)
            .with_cipher(self.cipher)
            .with_compression(self.compression)
            .with_image(&self.media)
            .with_output(&self.write_to_file)
            .execute()?;
        info!(
            "{:?} written, {} payload bytes with {}",
            self.write_to_file, outcome.payload_len, self.algorithm
        );

        println!(
            "Hidden {} of {} bytes ({:.1}%) with {} in {}",
            outcome.payload_len,
            outcome.capacity,
            outcome.utilization_percent,
            self.algorithm,
            self.write_to_file.display()
        );
        println!(
            "PSNR {:.2} dB, SSIM {:.4}, quality {}",
            outcome.quality.psnr, outcome.quality.ssim, outcome.quality.quality_score
        );

        Ok(())
    }
}
