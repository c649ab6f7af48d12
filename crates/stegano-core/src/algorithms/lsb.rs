use super::{ensure_capacity, EmbeddingAlgorithm};
use crate::bits::{hide_payload, unveil_payload, LENGTH_PREFIX_BITS};
use crate::cancel::CancellationToken;
use crate::media::Carrier;
use crate::result::Result;

/// One bit in the least significant bit of every sample, alpha included,
/// in storage order
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Lsb;

impl EmbeddingAlgorithm for Lsb {
    fn capacity(&self, carrier: &Carrier) -> usize {
        carrier.sample_count().saturating_sub(LENGTH_PREFIX_BITS) / 8
    }

    fn embed_cancellable(
        &self,
        carrier: &Carrier,
        payload: &[u8],
        cancel: &CancellationToken,
    ) -> Result<Carrier> {
        ensure_capacity(payload.len(), self.capacity(carrier))?;

        let mut stego = carrier.clone();
        let row_len = stego.row_len();
        hide_payload(stego.samples_mut().iter_mut(), payload, cancel, row_len)?;

        Ok(stego)
    }

    fn extract(&self, carrier: &Carrier, hint: Option<usize>) -> Result<Vec<u8>> {
        unveil_payload(
            carrier.samples().iter().map(|s| s & 1 == 1),
            self.capacity(carrier),
            hint,
        )
    }
}
