use log::debug;

use crate::media::Carrier;

/// mean LSB deviation from one half above which an image is flagged
pub const SUSPICIOUS_DEVIATION: f64 = 0.1;

/// Outcome of the LSB ratio heuristic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionReport {
    pub suspicious: bool,
    /// `|mean(lsb) - 0.5|` averaged over channels, 0 ..= 0.5
    pub lsb_deviation: f64,
    /// `min(2 * lsb_deviation, 1)`
    pub confidence: f64,
}

/// A plain heuristic: natural images have about as many odd as even samples, in each
/// channel. It is no match for a real steganalysis tool.
pub fn detect(carrier: &Carrier) -> DetectionReport {
    let channels = carrier.channels() as usize;
    let pixels = carrier.sample_count() / channels.max(1);
    if pixels == 0 {
        return DetectionReport {
            suspicious: false,
            lsb_deviation: 0.0,
            confidence: 0.0,
        };
    }

    let mut odd = vec![0usize; channels];
    for pixel in carrier.samples().chunks_exact(channels) {
        for (count, sample) in odd.iter_mut().zip(pixel) {
            *count += usize::from(sample & 1);
        }
    }
    let lsb_deviation = odd
        .iter()
        .map(|&n| (n as f64 / pixels as f64 - 0.5).abs())
        .sum::<f64>()
        / channels as f64;
    debug!("lsb deviation {lsb_deviation:.4} over {channels} channel(s)");

    DetectionReport {
        suspicious: lsb_deviation > SUSPICIOUS_DEVIATION,
        lsb_deviation,
        confidence: (lsb_deviation * 2.0).min(1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_even_samples_are_suspicious() {
        let carrier = Carrier::from_raw(10, 10, 3, vec![128; 300]).unwrap();

        let report = detect(&carrier);

        assert!(report.suspicious);
        assert_eq!(report.lsb_deviation, 0.5);
        assert_eq!(report.confidence, 1.0);
    }

    #[test]
    fn balanced_lsbs_are_not() {
        let carrier = Carrier::from_fn(10, 10, 1, |x, _, _| x as u8).unwrap();

        let report = detect(&carrier);

        assert!(!report.suspicious);
        assert_eq!(report.lsb_deviation, 0.0);
        assert_eq!(report.confidence, 0.0);
    }

    #[test]
    fn channels_are_averaged() {
        // red all odd, green balanced, blue 3 of 4 odd
        let samples = vec![1, 0, 1, 1, 1, 1, 1, 0, 1, 1, 1, 0];
        let carrier = Carrier::from_raw(2, 2, 3, samples).unwrap();

        let report = detect(&carrier);

        assert!((report.lsb_deviation - (0.5 + 0.0 + 0.25) / 3.0).abs() < 1e-12);
        assert!(report.suspicious);
        assert!((report.confidence - 0.5).abs() < 1e-12);
    }
}
