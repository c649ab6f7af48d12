use std::path::PathBuf;

use clap::Args;
use log::info;
use stegano_core::Algorithm;

use super::PasswordArgs;
use crate::CliResult;

/// Unveils a message from an image
#[derive(Args, Debug)]
pub struct UnveilArgs {
    #[command(flatten)]
    pub password: PasswordArgs,

    /// Source image that contains secret data
    #[arg(short = 'i', long = "in", value_name = "image source file")]
    pub media: PathBuf,

    /// The algorithm the data was hidden with
    #[arg(short, long, value_name = "algorithm", default_value = "LSB")]
    pub algorithm: Algorithm,

    /// Raw data will be stored in this file, otherwise it is printed as text
    #[arg(short = 'o', long = "out", value_name = "output file")]
    pub output_file: Option<PathBuf>,
}

impl UnveilArgs {
    pub fn run(self) -> CliResult<()> {
        let password = self.password.resolve(false)?;

        let data = stegano_core::api::unveil::prepare()
            .with_secret_image(&self.media)
            .using_password(password)
            .with_algorithm(self.algorithm)
            .execute()?;
        info!(
            "unveiled {} bytes from {:?} with {}",
            data.len(),
            self.media,
            self.algorithm
        );

        match self.output_file {
            Some(file) => std::fs::write(&file, data)
                .map_err(|source| stegano_core::SteganoError::WriteError { source })?,
            None => println!("{}", String::from_utf8(data)?),
        }

        Ok(())
    }
}
