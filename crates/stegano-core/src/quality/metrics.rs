use std::fmt::{Display, Formatter};

use crate::error::SteganoError;
use crate::media::Carrier;
use crate::result::Result;

const PEAK: f64 = 255.0;
const C1: f64 = (0.01 * PEAK) * (0.01 * PEAK);
const C2: f64 = (0.03 * PEAK) * (0.03 * PEAK);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QualityScore {
    Excellent,
    Good,
    Fair,
    Poor,
    /// a metric could not be computed, e.g. for empty images
    Unknown,
}

impl QualityScore {
    pub fn from_metrics(psnr: f64, ssim: f64) -> Self {
        if psnr.is_nan() || ssim.is_nan() {
            QualityScore::Unknown
        } else if psnr > 40.0 && ssim > 0.95 {
            QualityScore::Excellent
        } else if psnr > 30.0 && ssim > 0.90 {
            QualityScore::Good
        } else if psnr > 25.0 && ssim > 0.80 {
            QualityScore::Fair
        } else {
            QualityScore::Poor
        }
    }
}

impl Display for QualityScore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            QualityScore::Excellent => "Excellent",
            QualityScore::Good => "Good",
            QualityScore::Fair => "Fair",
            QualityScore::Poor => "Poor",
            QualityScore::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Fidelity of a modified image against its original
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityReport {
    /// dB, `+inf` for identical images
    pub psnr: f64,
    /// global SSIM, averaged over channels
    pub ssim: f64,
    pub mse: f64,
    pub mae: f64,
    /// Pearson correlation of the 256 bin histograms, averaged over channels
    pub histogram_correlation: f64,
    pub quality_score: QualityScore,
}

/// Compares two images of the same shape.
///
/// SSIM is the global form: means, variances and the covariance are taken over a whole
/// channel rather than over sliding windows, so it reads higher than windowed SSIM.
pub fn analyze_quality(original: &Carrier, modified: &Carrier) -> Result<QualityReport> {
    if original.shape() != modified.shape() {
        return Err(SteganoError::DimensionMismatch {
            left: original.shape(),
            right: modified.shape(),
        });
    }

    let mse = mse(original, modified);
    let psnr = psnr(mse);
    let ssim = ssim(original, modified);

    Ok(QualityReport {
        psnr,
        ssim,
        mse,
        mae: mae(original, modified),
        histogram_correlation: histogram_correlation(original, modified),
        quality_score: QualityScore::from_metrics(psnr, ssim),
    })
}

fn mean_of_differences(a: &Carrier, b: &Carrier, f: impl Fn(f64) -> f64) -> f64 {
    let total: f64 = a
        .samples()
        .iter()
        .zip(b.samples())
        .map(|(&x, &y)| f(f64::from(x) - f64::from(y)))
        .sum();

    total / a.sample_count() as f64
}

pub(crate) fn mse(a: &Carrier, b: &Carrier) -> f64 {
    mean_of_differences(a, b, |d| d * d)
}

pub(crate) fn mae(a: &Carrier, b: &Carrier) -> f64 {
    mean_of_differences(a, b, f64::abs)
}

pub(crate) fn psnr(mse: f64) -> f64 {
    if mse == 0.0 {
        f64::INFINITY
    } else {
        20.0 * (PEAK / mse.sqrt()).log10()
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// population covariance, the variance when both sides are the same
fn covariance(x: &[f64], mean_x: f64, y: &[f64], mean_y: f64) -> f64 {
    let total: f64 = x
        .iter()
        .zip(y)
        .map(|(a, b)| (a - mean_x) * (b - mean_y))
        .sum();

    total / x.len() as f64
}

pub(crate) fn ssim(a: &Carrier, b: &Carrier) -> f64 {
    let per_channel: Vec<f64> = (0..a.channels())
        .map(|c| {
            let (x, y) = (a.plane(c), b.plane(c));
            let (mu_x, mu_y) = (mean(&x), mean(&y));
            let var_x = covariance(&x, mu_x, &x, mu_x);
            let var_y = covariance(&y, mu_y, &y, mu_y);
            let cov = covariance(&x, mu_x, &y, mu_y);

            ((2.0 * mu_x * mu_y + C1) * (2.0 * cov + C2))
                / ((mu_x * mu_x + mu_y * mu_y + C1) * (var_x + var_y + C2))
        })
        .collect();

    mean(&per_channel)
}

fn histogram(carrier: &Carrier, channel: u8) -> [f64; 256] {
    let mut bins = [0.0; 256];
    for &s in carrier
        .samples()
        .iter()
        .skip(channel as usize)
        .step_by(carrier.channels() as usize)
    {
        bins[s as usize] += 1.0;
    }
    bins
}

/// undefined correlations (a flat histogram) count as 0
pub(crate) fn histogram_correlation(a: &Carrier, b: &Carrier) -> f64 {
    let per_channel: Vec<f64> = (0..a.channels())
        .map(|c| {
            let (x, y) = (histogram(a, c), histogram(b, c));
            let (mu_x, mu_y) = (mean(&x), mean(&y));
            let cov = covariance(&x, mu_x, &y, mu_y);
            let var_x = covariance(&x, mu_x, &x, mu_x);
            let var_y = covariance(&y, mu_y, &y, mu_y);
            let r = cov / (var_x.sqrt() * var_y.sqrt());
            if r.is_nan() {
                0.0
            } else {
                r
            }
        })
        .collect();

    mean(&per_channel)
}
