//! Fidelity metrics between an original and a modified carrier, and a simple
//! LSB based detection heuristic.

mod detection;
mod metrics;

pub use detection::{detect, DetectionReport, SUSPICIOUS_DEVIATION};
pub use metrics::{analyze_quality, QualityReport, QualityScore};
