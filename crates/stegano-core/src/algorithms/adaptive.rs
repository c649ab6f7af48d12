use log::trace;

use super::{ensure_capacity, EmbeddingAlgorithm};
use crate::bits::{hide_payload, unveil_payload, LENGTH_PREFIX_BITS};
use crate::cancel::CancellationToken;
use crate::media::Carrier;
use crate::result::Result;

/// LSB embedding restricted to the most textured samples.
///
/// Texture is the variance of a 3x3 neighbourhood in the same channel, measured on the
/// upper seven bits only. Embedding rewrites the lowest bit, so the ranking and with it
/// the selected sites read back identically from the stego image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveLsb {
    /// share of all samples that may carry a bit
    pub embedding_ratio: f64,
}

impl Default for AdaptiveLsb {
    fn default() -> Self {
        Self {
            embedding_ratio: 0.7,
        }
    }
}

impl AdaptiveLsb {
    fn site_budget(&self, carrier: &Carrier) -> usize {
        let ratio = self.embedding_ratio.clamp(0.0, 1.0);
        (carrier.sample_count() as f64 * ratio).floor() as usize
    }

    /// the `site_budget` most textured samples, ties go to the earlier sample
    fn site_mask(&self, carrier: &Carrier) -> Vec<bool> {
        let texture = texture_of(carrier);
        let mut ranking: Vec<usize> = (0..texture.len()).collect();
        ranking.sort_unstable_by(|&a, &b| texture[b].total_cmp(&texture[a]).then(a.cmp(&b)));

        let mut mask = vec![false; texture.len()];
        for &i in ranking.iter().take(self.site_budget(carrier)) {
            mask[i] = true;
        }
        trace!(
            "adaptive selection: {} of {} samples",
            self.site_budget(carrier),
            texture.len()
        );

        mask
    }
}

/// local variance per sample, in storage order
fn texture_of(carrier: &Carrier) -> Vec<f64> {
    let (width, height) = (carrier.width() as i64, carrier.height() as i64);
    let channels = carrier.channels() as usize;
    let samples = carrier.samples();
    let upper = |x: i64, y: i64, c: usize| -> f64 {
        f64::from(samples[(y * width + x) as usize * channels + c] >> 1)
    };

    let mut texture = Vec::with_capacity(samples.len());
    for y in 0..height {
        for x in 0..width {
            for c in 0..channels {
                let (mut n, mut sum, mut sum_sq) = (0.0, 0.0, 0.0);
                for ny in (y - 1).max(0)..=(y + 1).min(height - 1) {
                    for nx in (x - 1).max(0)..=(x + 1).min(width - 1) {
                        let v = upper(nx, ny, c);
                        n += 1.0;
                        sum += v;
                        sum_sq += v * v;
                    }
                }
                let mean = sum / n;
                texture.push(sum_sq / n - mean * mean);
            }
        }
    }

    texture
}

impl EmbeddingAlgorithm for AdaptiveLsb {
    fn capacity(&self, carrier: &Carrier) -> usize {
        self.site_budget(carrier).saturating_sub(LENGTH_PREFIX_BITS) / 8
    }

    fn embed_cancellable(
        &self,
        carrier: &Carrier,
        payload: &[u8],
        cancel: &CancellationToken,
    ) -> Result<Carrier> {
        ensure_capacity(payload.len(), self.capacity(carrier))?;

        let mask = self.site_mask(carrier);
        let mut stego = carrier.clone();
        let row_len = stego.row_len();
        let sites = stego
            .samples_mut()
            .iter_mut()
            .zip(&mask)
            .filter(|(_, m)| **m)
            .map(|(s, _)| s);
        hide_payload(sites, payload, cancel, row_len)?;

        Ok(stego)
    }

    fn extract(&self, carrier: &Carrier, hint: Option<usize>) -> Result<Vec<u8>> {
        let mask = self.site_mask(carrier);
        let bits = carrier
            .samples()
            .iter()
            .zip(&mask)
            .filter(|(_, m)| **m)
            .map(|(s, _)| s & 1 == 1);

        unveil_payload(bits, self.capacity(carrier), hint)
    }
}
