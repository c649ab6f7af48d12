use std::io::{self, Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::SteganoError;
use crate::result::Result;

pub const MAX_COMPRESSION_LEVEL: u8 = 9;

/// zlib stream at `level` 0 (stored) to 9 (best)
pub fn compress(data: &[u8], level: u8) -> Result<Vec<u8>> {
    if level > MAX_COMPRESSION_LEVEL {
        return Err(SteganoError::InvalidCompressionLevel(level));
    }
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(u32::from(level)));
    encoder.write_all(data)?;

    Ok(encoder.finish()?)
}

/// inflated messages may be this many times larger than what was embedded
pub const MAX_INFLATE_RATIO: usize = 64;
/// small bodies may always inflate to this size
pub const MIN_INFLATE_LIMIT: usize = 1 << 20;

/// the most a body of `len` bytes read from an image is allowed to inflate to
pub fn inflate_limit(len: usize) -> usize {
    len.saturating_mul(MAX_INFLATE_RATIO).max(MIN_INFLATE_LIMIT)
}

/// Inflates a zlib stream, giving up once the output grows beyond `limit` bytes
pub fn decompress(data: &[u8], limit: usize) -> Result<Vec<u8>> {
    let mut inflated = Vec::new();
    ZlibDecoder::new(data)
        .take(limit as u64 + 1)
        .read_to_end(&mut inflated)
        .map_err(SteganoError::Decompression)?;
    if inflated.len() > limit {
        return Err(SteganoError::Decompression(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("inflates beyond {limit} bytes"),
        )));
    }

    Ok(inflated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repetitive_text_shrinks() {
        let text = "all work and no play makes jack a dull boy. ".repeat(50);

        let compressed = compress(text.as_bytes(), 9).unwrap();

        assert!(compressed.len() < text.len() / 10);
        assert_eq!(decompress(&compressed, text.len()).unwrap(), text.as_bytes());
    }

    #[test]
    fn every_level_inflates_back() {
        let data: Vec<u8> = (0..2000u32).map(|i| (i * i % 251) as u8).collect();
        for level in 0..=MAX_COMPRESSION_LEVEL {
            assert_eq!(decompress(&compress(&data, level).unwrap(), data.len()).unwrap(), data);
        }
    }

    #[test]
    fn level_ten_is_rejected() {
        assert!(matches!(
            compress(b"x", 10),
            Err(SteganoError::InvalidCompressionLevel(10))
        ));
    }

    #[test]
    fn garbage_does_not_inflate() {
        assert!(matches!(
            decompress(b"definitely not zlib", MIN_INFLATE_LIMIT),
            Err(SteganoError::Decompression(_))
        ));
    }

    #[test]
    fn inflating_stops_at_the_limit() {
        let bomb = compress(&vec![0; 100_000], 9).unwrap();
        assert!(bomb.len() < 1_000);

        assert!(matches!(
            decompress(&bomb, 99_999),
            Err(SteganoError::Decompression(_))
        ));
        assert_eq!(decompress(&bomb, 100_000).unwrap().len(), 100_000);
    }

    #[test]
    fn limits_scale_with_the_body() {
        assert_eq!(inflate_limit(10), MIN_INFLATE_LIMIT);
        assert_eq!(inflate_limit(1 << 20), 64 << 20);
        assert_eq!(inflate_limit(usize::MAX), usize::MAX);
    }
}
