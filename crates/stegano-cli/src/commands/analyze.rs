use std::path::PathBuf;

use clap::Args;
use stegano_core::{analyze_quality, load_carrier};

use crate::CliResult;

/// Compares an image with a secret against its original
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[arg(long, value_name = "original image")]
    pub original: PathBuf,

    #[arg(long, value_name = "modified image")]
    pub modified: PathBuf,
}

impl AnalyzeArgs {
    pub fn run(self) -> CliResult<()> {
        let original = load_carrier(&self.original)?;
        let modified = load_carrier(&self.modified)?;
        let report = analyze_quality(&original, &modified)?;

        println!("PSNR:                  {:.2} dB", report.psnr);
        println!("SSIM:                  {:.4}", report.ssim);
        println!("MSE:                   {:.4}", report.mse);
        println!("MAE:                   {:.4}", report.mae);
        println!("Histogram correlation: {:.4}", report.histogram_correlation);
        println!("Quality:               {}", report.quality_score);

        Ok(())
    }
}
