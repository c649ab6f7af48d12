use std::path::PathBuf;

use clap::Args;
use stegano_core::{detect, load_carrier};

use crate::CliResult;

/// Guesses from the LSB statistics whether an image carries hidden data
#[derive(Args, Debug)]
pub struct DetectArgs {
    #[arg(short = 'i', long = "in", value_name = "image file")]
    pub media: PathBuf,
}

impl DetectArgs {
    pub fn run(self) -> CliResult<()> {
        let report = detect(&load_carrier(&self.media)?);

        println!("LSB deviation: {:.4}", report.lsb_deviation);
        println!("Confidence:    {:.2}", report.confidence);
        if report.suspicious {
            println!("Suspicious, odd and even samples are out of balance");
        } else {
            println!("Not suspicious");
        }

        Ok(())
    }
}
