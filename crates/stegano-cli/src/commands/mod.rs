pub mod analyze;
pub mod capacity;
pub mod detect;
pub mod hide;
pub mod unveil;

use clap::Args;
use stegano_core::Password;

use crate::CliResult;

#[derive(Args, Debug, Default)]
pub struct PasswordArgs {
    /// Password used to encrypt the data
    #[arg(short, long, value_name = "password", conflicts_with = "ask_password")]
    pub password: Option<String>,

    /// Ask for the password instead of taking it from the command line
    #[arg(short = 'P', long)]
    pub ask_password: bool,
}

impl PasswordArgs {
    /// `confirm` asks twice, for passwords that are about to encrypt something
    pub fn resolve(self, confirm: bool) -> CliResult<Password> {
        if !self.ask_password {
            return Ok(self.password.into());
        }

        let mut prompt = dialoguer::Password::new().with_prompt("Password");
        if confirm {
            prompt = prompt.with_confirmation("Repeat password", "Passwords do not match");
        }
        let password = prompt
            .allow_empty_password(true)
            .interact()
            .map_err(|dialoguer::Error::IO(e)| e)?;

        Ok(password.into())
    }
}
