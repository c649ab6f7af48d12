use super::coefficients::{self, site_count, CoefficientDomain};
use super::transform::{block_dct, block_grid, block_idct, BLOCK, MAX_AC_BASIS, ZIGZAG_AC};
use super::{ensure_capacity, EmbeddingAlgorithm};
use crate::bits::LENGTH_PREFIX_BITS;
use crate::cancel::CancellationToken;
use crate::media::Carrier;
use crate::result::Result;

/// Quantization index modulation of low frequency coefficients of an 8x8 block DCT.
///
/// Every colour channel is transformed on its own, alpha is never touched. Each full block
/// offers its first `coefficients_per_block` AC coefficients in zigzag order. Sites are
/// visited one coefficient at a time across all blocks (row-major), so a short message
/// only touches the lowest frequencies. Bits go round robin over the colour channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dct {
    pub quantization_step: f64,
    /// AC coefficients per block that carry bits, at most 14
    pub coefficients_per_block: usize,
}

impl Default for Dct {
    fn default() -> Self {
        Self {
            quantization_step: 4.0,
            coefficients_per_block: 9,
        }
    }
}

impl Dct {
    fn coefficients_used(&self) -> usize {
        self.coefficients_per_block.clamp(1, ZIGZAG_AC.len())
    }
}

impl CoefficientDomain for Dct {
    fn quantization_step(&self) -> f64 {
        self.quantization_step
    }

    /// every used coefficient of a block moving by a full step at once
    fn headroom(&self) -> u8 {
        let swing = self.coefficients_used() as f64 * self.quantization_step * MAX_AC_BASIS;
        swing.ceil().clamp(0.0, 126.0) as u8 + 1
    }

    fn analyze(&self, carrier: &Carrier) -> Vec<Vec<f64>> {
        let (w, h) = (carrier.width() as usize, carrier.height() as usize);
        (0..carrier.color_channels())
            .map(|c| {
                let mut plane = carrier.plane(c);
                block_dct(&mut plane, w, h);
                plane
            })
            .collect()
    }

    fn synthesize(&self, planes: &[Vec<f64>], carrier: &mut Carrier) {
        let (w, h) = (carrier.width() as usize, carrier.height() as usize);
        for (c, coefficients) in planes.iter().enumerate() {
            let mut plane = coefficients.clone();
            block_idct(&mut plane, w, h);
            carrier.set_plane(c as u8, &plane);
        }
    }

    fn sites(&self, carrier: &Carrier) -> Vec<usize> {
        let width = carrier.width() as usize;
        let (across, down) = block_grid(width, carrier.height() as usize);

        ZIGZAG_AC[..self.coefficients_used()]
            .iter()
            .flat_map(|&(u, v)| {
                (0..down).flat_map(move |by| {
                    (0..across).map(move |bx| (by * BLOCK + u) * width + bx * BLOCK + v)
                })
            })
            .collect()
    }
}

impl EmbeddingAlgorithm for Dct {
    /// one byte per 64 pixels at most, the classic 8x8 block budget
    fn capacity(&self, carrier: &Carrier) -> usize {
        let pixels = carrier.width() as usize * carrier.height() as usize;
        let sites = site_count(&self.sites(carrier), carrier);

        (pixels / 64).min(sites.saturating_sub(LENGTH_PREFIX_BITS) / 8)
    }

    fn embed_cancellable(
        &self,
        carrier: &Carrier,
        payload: &[u8],
        cancel: &CancellationToken,
    ) -> Result<Carrier> {
        ensure_capacity(payload.len(), self.capacity(carrier))?;
        coefficients::embed(self, carrier, payload, cancel)
    }

    fn extract(&self, carrier: &Carrier, hint: Option<usize>) -> Result<Vec<u8>> {
        coefficients::extract(self, carrier, self.capacity(carrier), hint)
    }
}
