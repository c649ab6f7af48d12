use super::coefficients::{self, site_count, CoefficientDomain};
use super::transform::{HaarLayout, Subband};
use super::{ensure_capacity, EmbeddingAlgorithm};
use crate::bits::LENGTH_PREFIX_BITS;
use crate::cancel::CancellationToken;
use crate::media::Carrier;
use crate::result::Result;

/// Quantization index modulation in the horizontal detail band of a one level Haar
/// decomposition, per colour channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dwt {
    pub quantization_step: f64,
}

impl Default for Dwt {
    fn default() -> Self {
        Self {
            quantization_step: 4.0,
        }
    }
}

fn layout_of(carrier: &Carrier) -> HaarLayout {
    HaarLayout::new(carrier.width() as usize, carrier.height() as usize)
}

impl CoefficientDomain for Dwt {
    fn quantization_step(&self) -> f64 {
        self.quantization_step
    }

    /// a horizontal detail coefficient reaches every pixel of its block with half weight
    fn headroom(&self) -> u8 {
        (self.quantization_step / 2.0).ceil().clamp(0.0, 126.0) as u8 + 1
    }

    fn analyze(&self, carrier: &Carrier) -> Vec<Vec<f64>> {
        let layout = layout_of(carrier);
        (0..carrier.color_channels())
            .map(|c| layout.forward(&carrier.plane(c)))
            .collect()
    }

    fn synthesize(&self, planes: &[Vec<f64>], carrier: &mut Carrier) {
        let layout = layout_of(carrier);
        for (c, bands) in planes.iter().enumerate() {
            let c = c as u8;
            let mut plane = carrier.plane(c);
            layout.inverse(bands, &mut plane);
            carrier.set_plane(c, &plane);
        }
    }

    fn sites(&self, carrier: &Carrier) -> Vec<usize> {
        layout_of(carrier)
            .band_range(Subband::HorizontalDetail)
            .collect()
    }
}

impl EmbeddingAlgorithm for Dwt {
    fn capacity(&self, carrier: &Carrier) -> usize {
        site_count(&self.sites(carrier), carrier).saturating_sub(LENGTH_PREFIX_BITS) / 8
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
