//! Bit level transport shared by every embedding algorithm.
//!
//! An algorithm only decides *where* bits go. It hands an iterator of bit sites to an
//! [`Encoder`] (implements [`Write`]) or an iterator of read back bits to a [`Decoder`]
//! (implements [`Read`]). Bits travel most significant first.
//!
//! Every embedding is an envelope: a big endian `u32` payload length followed by the
//! payload bytes, see [`envelope`] and [`unveil_payload`].

use std::io::{self, Cursor, Read, Write};

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::cancel::CancellationToken;
use crate::error::SteganoError;
use crate::result::Result;

/// bits reserved in front of every payload for its length
pub const LENGTH_PREFIX_BITS: usize = 32;

/// a place in the carrier that can take one bit
pub trait HideBit {
    fn hide_bit(self, bit: bool);
}

impl HideBit for &mut u8 {
    fn hide_bit(self, bit: bool) {
        *self = (*self & !1) | u8::from(bit);
    }
}

/// A transform coefficient that carries a bit in the parity of its quantization index
pub struct QuantizedCoefficient<'a> {
    coefficient: &'a mut f64,
    step: f64,
}

impl<'a> QuantizedCoefficient<'a> {
    pub fn new(coefficient: &'a mut f64, step: f64) -> Self {
        Self { coefficient, step }
    }
}

impl HideBit for QuantizedCoefficient<'_> {
    fn hide_bit(self, bit: bool) {
        let scaled = *self.coefficient / self.step;
        let mut index = scaled.round();
        if index_parity(index) != bit {
            // nearest lattice point of the other parity
            index += if scaled >= index { 1.0 } else { -1.0 };
        }
        *self.coefficient = index * self.step;
    }
}

/// the bit a quantized coefficient carries
pub fn coefficient_parity(coefficient: f64, step: f64) -> bool {
    index_parity((coefficient / step).round())
}

fn index_parity(index: f64) -> bool {
    (index as i64).rem_euclid(2) == 1
}

/// Writes bytes bit by bit onto a sequence of sites.
///
/// Running out of sites ends the write with [`io::ErrorKind::WriteZero`],
/// a cancelled token with [`io::ErrorKind::Other`].
pub struct Encoder<'t, I> {
    sites: I,
    cancel: &'t CancellationToken,
    check_every: usize,
    written: usize,
}

impl<'t, S: HideBit, I: Iterator<Item = S>> Encoder<'t, I> {
    pub fn new(sites: I, cancel: &'t CancellationToken) -> Self {
        Self {
            sites,
            cancel,
            check_every: usize::MAX,
            written: 0,
        }
    }

    /// looks at the cancellation token every `n` bits
    pub fn check_every(mut self, n: usize) -> Self {
        self.check_every = n.max(1);
        self
    }

    fn hide(&mut self, bit: bool) -> io::Result<()> {
        if self.written % self.check_every == 0 && self.cancel.is_cancelled() {
            return Err(io::Error::other("embedding cancelled"));
        }
        let site = self
            .sites
            .next()
            .ok_or_else(|| io::Error::from(io::ErrorKind::WriteZero))?;
        site.hide_bit(bit);
        self.written += 1;

        Ok(())
    }
}

impl<S: HideBit, I: Iterator<Item = S>> Write for Encoder<'_, I> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bits = BitReader::endian(Cursor::new(buf), BigEndian);
        for _ in 0..buf.len() * 8 {
            let bit = bits.read_bit()?;
            self.hide(bit)?;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reads bytes back from a sequence of bits, a trailing partial byte is dropped
pub struct Decoder<I> {
    bits: I,
}

impl<I: Iterator<Item = bool>> Decoder<I> {
    pub fn new(bits: I) -> Self {
        Self { bits }
    }
}

impl<I: Iterator<Item = bool>> Read for Decoder<I> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len();
        let mut whole_bytes = 0;
        {
            let mut writer = BitWriter::endian(Cursor::new(&mut *buf), BigEndian);
            'bytes: for _ in 0..len {
                for _ in 0..8 {
                    match self.bits.next() {
                        Some(bit) => writer.write_bit(bit)?,
                        None => break 'bytes,
                    }
                }
                whole_bytes += 1;
            }
        }

        Ok(whole_bytes)
    }
}

/// length prefix followed by the payload
pub fn envelope(payload: &[u8]) -> Result<Vec<u8>> {
    let length = u32::try_from(payload.len()).map_err(|_| SteganoError::CapacityExceeded {
        required: payload.len(),
        available: u32::MAX as usize,
    })?;
    let mut envelope = Vec::with_capacity(payload.len() + LENGTH_PREFIX_BITS / 8);
    envelope.write_u32::<byteorder::BigEndian>(length)?;
    envelope.extend_from_slice(payload);

    Ok(envelope)
}

/// Hides the envelope of `payload` on `sites`, the caller has checked the capacity
pub fn hide_payload<S: HideBit>(
    sites: impl Iterator<Item = S>,
    payload: &[u8],
    cancel: &CancellationToken,
    check_every: usize,
) -> Result<()> {
    let envelope = envelope(payload)?;
    let mut encoder = Encoder::new(sites, cancel).check_every(check_every);
    encoder.write_all(&envelope).map_err(|e| match e.kind() {
        io::ErrorKind::WriteZero => SteganoError::CapacityExceeded {
            required: payload.len(),
            available: encoder.written.saturating_sub(LENGTH_PREFIX_BITS) / 8,
        },
        _ if cancel.is_cancelled() => SteganoError::Cancelled,
        _ => SteganoError::IoError(e),
    })
}

/// Reads an envelope back.
///
/// A zero length, or a length beyond `capacity` or the caller's `hint`,
/// means there was nothing hidden in the first place.
pub fn unveil_payload(
    bits: impl Iterator<Item = bool>,
    capacity: usize,
    hint: Option<usize>,
) -> Result<Vec<u8>> {
    let mut decoder = Decoder::new(bits);
    let length = decoder
        .read_u32::<byteorder::BigEndian>()
        .map_err(|_| SteganoError::NoHiddenData)? as usize;
    let limit = hint.map_or(capacity, |hint| hint.min(capacity));
    if length == 0 || length > limit {
        return Err(SteganoError::NoHiddenData);
    }

    let mut payload = vec![0; length];
    decoder
        .read_exact(&mut payload)
        .map_err(|_| SteganoError::NoHiddenData)?;

    Ok(payload)
}

/// Interleaves equally long iterators, one item of each in turn
pub struct RoundRobin<I> {
    lanes: Vec<I>,
    next: usize,
}

impl<I: Iterator> RoundRobin<I> {
    pub fn new(lanes: Vec<I>) -> Self {
        Self { lanes, next: 0 }
    }
}

impl<I: Iterator> Iterator for RoundRobin<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let lane_count = self.lanes.len();
        let item = self.lanes.get_mut(self.next)?.next();
        self.next = (self.next + 1) % lane_count;
        item
    }
}
