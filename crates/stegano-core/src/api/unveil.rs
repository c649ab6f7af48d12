use std::path::{Path, PathBuf};

use super::shared::Password;
use crate::algorithms::Algorithm;
use crate::engine::decode;
use crate::media::Carrier;
use crate::SteganoError;

pub fn prepare() -> UnveilApi {
    UnveilApi::default()
}

#[derive(Default, Debug)]
pub struct UnveilApi {
    secret_image: Option<PathBuf>,
    password: Password,
    algorithm: Algorithm,
}

impl UnveilApi {
    /// This is the secret image that contains the data to be unveiled
    pub fn with_secret_image(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_image = Some(secret_image.as_ref().to_path_buf());
        self
    }

    /// Set the password used for decrypting the data
    /// If `None` is passed, no password will be used, encrypted data then fails to unveil
    pub fn using_password<P: Into<Password>>(mut self, password: P) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_password(self, password: &str) -> Self {
        self.using_password(password)
    }

    /// must be the algorithm the data was hidden with
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Execute the unveil process and blocks until it is finished
    pub fn execute(self) -> Result<Vec<u8>, SteganoError> {
        let Some(secret_image) = self.secret_image else {
            return Err(SteganoError::CarrierNotSet);
        };

        let carrier = Carrier::from_file(&secret_image)?;
        decode(&carrier, self.password.as_str(), &self.algorithm)
    }

    /// like [`Self::execute`], for messages that are UTF-8 text
    pub fn execute_text(self) -> Result<String, SteganoError> {
        Ok(String::from_utf8(self.execute()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::Dct;
    use crate::media::Persist;
    use crate::test_utils::prepare_noise_carrier;
    use tempfile::tempdir;

    #[test]
    fn illustrate_api_usage() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let carrier_path = temp_dir.path().join("carrier.png");
        let secret_path = temp_dir.path().join("secret.png");
        prepare_noise_carrier(128, 128, 3)
            .save_as(&carrier_path)
            .unwrap();

        crate::api::hide::prepare()
            .with_message("Hello World")
            .with_image(&carrier_path)
            .with_password("Secret42")
            .with_algorithm(Dct::default().into())
            .with_output(&secret_path)
            .execute()
            .expect("Failed to hide message in image");

        let secret_message = crate::api::unveil::prepare()
            .with_secret_image(&secret_path)
            .with_password("Secret42")
            .with_algorithm(Dct::default().into())
            .execute_text()
            .expect("Failed to unveil message from image");

        assert_eq!(secret_message, "Hello World");
    }

    #[test]
    fn a_secret_image_is_required() {
        assert!(matches!(
            prepare().with_password("x").execute(),
            Err(SteganoError::CarrierNotSet)
        ));
    }
}
