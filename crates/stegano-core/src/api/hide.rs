use std::path::{Path, PathBuf};

use log::info;
use stegano_seal::CipherSuite;

use super::shared::Password;
use crate::algorithms::Algorithm;
use crate::engine::{encode, EncodeOptions, EncodeOutcome};
use crate::media::{Carrier, Persist};
use crate::SteganoError;

pub fn prepare() -> HideApi {
    HideApi::default()
}

#[derive(Default, Debug)]
pub struct HideApi {
    message: Option<Vec<u8>>,
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    options: EncodeOptions,
}

impl HideApi {
    pub fn with_options(mut self, options: EncodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.as_bytes().to_vec());
        self
    }

    /// raw bytes instead of text, unveiled again with [`crate::api::unveil::UnveilApi::execute`]
    pub fn with_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.message = Some(data.into());
        self
    }

    pub fn with_image<A: AsRef<Path>>(mut self, image: A) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    pub fn with_output<A: AsRef<Path>>(mut self, output: A) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.options.password = password.into();
        self
    }

    /// If `None` is passed, no password will be used, leads to no encryption used
    pub fn use_password<S: AsRef<str>>(mut self, password: Option<S>) -> Self {
        self.options.password = Password::from(password.map(|s| s.as_ref().to_string()));
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.options.algorithm = algorithm;
        self
    }

    pub fn with_cipher(mut self, cipher: CipherSuite) -> Self {
        self.options.cipher = cipher;
        self
    }

    pub fn with_compression(mut self, level: u8) -> Self {
        self.options.compression_level = level;
        self
    }

    /// Hides the message, writes the output image and blocks until it is finished
    pub fn execute(self) -> Result<EncodeOutcome, SteganoError> {
        let Some(message) = self.message else {
            return Err(SteganoError::MissingMessage);
        };
        let Some(image) = self.image else {
            return Err(SteganoError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(SteganoError::TargetNotSet);
        };

        let carrier = Carrier::from_file(&image)?;
        let mut outcome = encode(&carrier, &message, &self.options)?;
        outcome.image.save_as(&output)?;
        info!(
            "hid {} bytes with {} in {output:?}, quality {}",
            outcome.payload_len, self.options.algorithm, outcome.quality.quality_score
        );

        Ok(outcome)
    }
}
