use std::path::PathBuf;

use clap::Args;
use stegano_core::{load_carrier, Algorithm, EmbeddingAlgorithm};

use crate::CliResult;

/// Shows how many bytes an image can hide
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Carrier image
    #[arg(short = 'i', long = "in", value_name = "image file")]
    pub media: PathBuf,

    /// Only this algorithm instead of all of them
    #[arg(short, long, value_name = "algorithm")]
    pub algorithm: Option<Algorithm>,
}

impl CapacityArgs {
    pub fn algorithms(&self) -> Vec<Algorithm> {
        match self.algorithm {
            Some(algorithm) => vec![algorithm],
            None => Algorithm::all().to_vec(),
        }
    }

    pub fn run(self) -> CliResult<()> {
        let carrier = load_carrier(&self.media)?;
        let (width, height, channels) = carrier.shape();
        println!("{width}x{height} with {channels} channel(s)");

        for algorithm in self.algorithms() {
            println!("{:>14}: {} bytes", algorithm.name(), algorithm.capacity(&carrier));
        }

        Ok(())
    }
}
