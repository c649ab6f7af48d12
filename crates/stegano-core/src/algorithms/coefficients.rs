//! Embedding into transform coefficients by quantization index modulation.
//!
//! A bit is the parity of `round(coefficient / step)`. After the inverse transform the
//! image is rounded and clamped to 8 bit, which nudges coefficients. The stego image is
//! analyzed again and the sites re-forced until every bit reads back.
//!
//! Clamping can undo a move for good, so colour samples are first pulled away from 0 and
//! 255 by the largest swing a domain can cause.

use std::io::Read;

use log::debug;

use crate::bits::{
    coefficient_parity, envelope, hide_payload, unveil_payload, Decoder, QuantizedCoefficient,
    RoundRobin,
};
use crate::cancel::CancellationToken;
use crate::error::SteganoError;
use crate::media::Carrier;
use crate::result::Result;

pub(crate) const MAX_REFINEMENT_PASSES: usize = 8;

/// A transform, and which of its coefficients carry bits
pub(crate) trait CoefficientDomain {
    fn quantization_step(&self) -> f64;

    /// one coefficient plane per colour channel
    fn analyze(&self, carrier: &Carrier) -> Vec<Vec<f64>>;

    /// largest change of a single sample that embedding can cause
    fn headroom(&self) -> u8;

    /// writes the planes back into the colour channels of `carrier`
    fn synthesize(&self, planes: &[Vec<f64>], carrier: &mut Carrier);

    /// positions in a coefficient plane that carry bits, in embedding order, identical
    /// for every plane
    fn sites(&self, carrier: &Carrier) -> Vec<usize>;
}

/// bits all planes of `carrier` can take
pub(crate) fn site_count(sites: &[usize], carrier: &Carrier) -> usize {
    sites.len() * carrier.color_channels() as usize
}

pub(crate) fn embed<D: CoefficientDomain>(
    domain: &D,
    carrier: &Carrier,
    payload: &[u8],
    cancel: &CancellationToken,
) -> Result<Carrier> {
    let expected = envelope(payload)?;
    let step = domain.quantization_step();

    let mut stego = carrier.clone();
    let clamped = stego.reserve_headroom(domain.headroom());
    if clamped > 0 {
        debug!("{clamped} samples pulled away from the 8 bit limits");
    }
    let sites = domain.sites(&stego);
    let mut planes = domain.analyze(&stego);
    let mut mismatched_bits = 0;
    for pass in 1..=MAX_REFINEMENT_PASSES {
        cancel.check()?;
        let mut values = gather(&planes, &sites);
        let lanes = values
            .iter_mut()
            .map(|lane| {
                lane.iter_mut()
                    .map(move |c| QuantizedCoefficient::new(c, step))
            })
            .collect();
        hide_payload(RoundRobin::new(lanes), payload, cancel, usize::MAX)?;
        scatter(&values, &sites, &mut planes);

        domain.synthesize(&planes, &mut stego);
        planes = domain.analyze(&stego);
        mismatched_bits = count_mismatches(&planes, &sites, step, &expected)?;
        if mismatched_bits == 0 {
            debug!("coefficients settled after {pass} pass(es)");
            return Ok(stego);
        }
        debug!("pass {pass}: {mismatched_bits} bits flipped by rounding, refining");
    }

    Err(SteganoError::UnstableEmbedding { mismatched_bits })
}

pub(crate) fn extract<D: CoefficientDomain>(
    domain: &D,
    carrier: &Carrier,
    capacity: usize,
    hint: Option<usize>,
) -> Result<Vec<u8>> {
    let planes = domain.analyze(carrier);
    let sites = domain.sites(carrier);

    unveil_payload(
        parities(&planes, &sites, domain.quantization_step()),
        capacity,
        hint,
    )
}

/// site values of every plane, in embedding order
fn gather(planes: &[Vec<f64>], sites: &[usize]) -> Vec<Vec<f64>> {
    planes
        .iter()
        .map(|plane| sites.iter().map(|&i| plane[i]).collect())
        .collect()
}

fn scatter(values: &[Vec<f64>], sites: &[usize], planes: &mut [Vec<f64>]) {
    for (plane, lane) in planes.iter_mut().zip(values) {
        for (&i, &value) in sites.iter().zip(lane) {
            plane[i] = value;
        }
    }
}

fn parities<'p>(
    planes: &'p [Vec<f64>],
    sites: &'p [usize],
    step: f64,
) -> impl Iterator<Item = bool> + 'p {
    RoundRobin::new(
        planes
            .iter()
            .map(move |plane| sites.iter().map(move |&i| plane[i]))
            .collect(),
    )
    .map(move |c| coefficient_parity(c, step))
}

fn count_mismatches(
    planes: &[Vec<f64>],
    sites: &[usize],
    step: f64,
    expected: &[u8],
) -> Result<usize> {
    let mut read_back = vec![0; expected.len()];
    Decoder::new(parities(planes, sites, step)).read_exact(&mut read_back)?;

    Ok(expected
        .iter()
        .zip(&read_back)
        .map(|(a, b)| (a ^ b).count_ones() as usize)
        .sum())
}
