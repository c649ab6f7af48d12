use std::path::Path;

use image::{DynamicImage, GrayImage, ImageFormat, RgbImage, RgbaImage};
use log::{error, warn};

use super::{is_lossy_format, Persist};
use crate::error::SteganoError;
use crate::result::Result;

/// An 8 bit image of `height` rows, `width` columns and 1, 3 or 4 channels.
///
/// Samples are stored interleaved and row-major, that is
/// `samples[(y * width + x) * channels + c]`, the very same layout `image` uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carrier {
    width: u32,
    height: u32,
    channels: u8,
    samples: Vec<u8>,
}

impl Carrier {
    pub fn from_raw(width: u32, height: u32, channels: u8, samples: Vec<u8>) -> Result<Self> {
        if !matches!(channels, 1 | 3 | 4) {
            return Err(SteganoError::UnsupportedChannelCount(channels));
        }
        let expected = width as usize * height as usize * channels as usize;
        if samples.len() != expected {
            return Err(SteganoError::ImageLoad(format!(
                "expected {expected} samples for {width}x{height}x{channels}, got {}",
                samples.len()
            )));
        }

        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// builds a carrier by asking `f(x, y, channel)` for every sample
    pub fn from_fn(
        width: u32,
        height: u32,
        channels: u8,
        mut f: impl FnMut(u32, u32, u8) -> u8,
    ) -> Result<Self> {
        let mut samples =
            Vec::with_capacity(width as usize * height as usize * channels as usize);
        for y in 0..height {
            for x in 0..width {
                for c in 0..channels {
                    samples.push(f(x, y, c));
                }
            }
        }

        Self::from_raw(width, height, channels, samples)
    }

    /// Grey images keep one channel, RGB three and anything with alpha four.
    /// Grey with alpha and 16 bit / float images are converted down to 8 bit RGB(A).
    pub fn from_image(image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        let (channels, samples) = match image {
            DynamicImage::ImageLuma8(i) => (1, i.into_raw()),
            DynamicImage::ImageRgb8(i) => (3, i.into_raw()),
            DynamicImage::ImageRgba8(i) => (4, i.into_raw()),
            other @ DynamicImage::ImageLuma16(_) => (1, other.to_luma8().into_raw()),
            other if other.color().has_alpha() => (4, other.to_rgba8().into_raw()),
            other => (3, other.to_rgb8().into_raw()),
        };

        Self {
            width,
            height,
            channels,
            samples,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let image = image::open(path).map_err(|e| {
            error!("Error loading image {path:?}: {e}");
            SteganoError::ImageLoad(format!("{}: {e}", path.display()))
        })?;

        Ok(Self::from_image(image))
    }

    pub fn to_image(&self) -> Result<DynamicImage> {
        let (w, h) = (self.width, self.height);
        let samples = self.samples.clone();
        let image = match self.channels {
            1 => GrayImage::from_raw(w, h, samples).map(DynamicImage::ImageLuma8),
            3 => RgbImage::from_raw(w, h, samples).map(DynamicImage::ImageRgb8),
            4 => RgbaImage::from_raw(w, h, samples).map(DynamicImage::ImageRgba8),
            _ => None,
        };

        image.ok_or(SteganoError::ImageEncoding)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// channels that carry colour, alpha is excluded
    pub fn color_channels(&self) -> u8 {
        if self.channels == 4 {
            3
        } else {
            self.channels
        }
    }

    /// (width, height, channels)
    pub fn shape(&self) -> (u32, u32, u8) {
        (self.width, self.height, self.channels)
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    pub fn sample(&self, x: u32, y: u32, channel: u8) -> u8 {
        self.samples[self.index_of(x, y, channel)]
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    /// Pulls colour samples into `margin ..= 255 - margin`, alpha stays as it is.
    /// Returns how many samples moved.
    pub(crate) fn reserve_headroom(&mut self, margin: u8) -> usize {
        let margin = margin.min(127);
        let (low, high) = (margin, 255 - margin);
        let channels = self.channels as usize;
        let colour = self.color_channels() as usize;

        let mut moved = 0;
        for (i, sample) in self.samples.iter_mut().enumerate() {
            if i % channels >= colour {
                continue;
            }
            let pulled = (*sample).clamp(low, high);
            if pulled != *sample {
                *sample = pulled;
                moved += 1;
            }
        }

        moved
    }

    /// one channel as a row-major plane of floats, input for the transforms
    pub fn plane(&self, channel: u8) -> Vec<f64> {
        self.samples
            .iter()
            .skip(channel as usize)
            .step_by(self.channels as usize)
            .map(|&s| f64::from(s))
            .collect()
    }

    /// writes a plane back into one channel, rounding and clamping to 8 bit
    pub fn set_plane(&mut self, channel: u8, plane: &[f64]) {
        let channels = self.channels as usize;
        for (sample, value) in self
            .samples
            .iter_mut()
            .skip(channel as usize)
            .step_by(channels)
            .zip(plane)
        {
            *sample = value.round().clamp(0.0, 255.0) as u8;
        }
    }

    fn index_of(&self, x: u32, y: u32, channel: u8) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels as usize + channel as usize
    }
}

impl From<DynamicImage> for Carrier {
    fn from(image: DynamicImage) -> Self {
        Self::from_image(image)
    }
}

impl Persist for Carrier {
    fn save_as(&mut self, file: &Path) -> Result<()> {
        if is_lossy_format(file) {
            warn!("{file:?} is a lossy format, hidden data will most likely not survive");
        }
        let format = ImageFormat::from_path(file).unwrap_or(ImageFormat::Png);
        self.to_image()?.save_with_format(file, format).map_err(|e| {
            error!("Error saving image {file:?}: {e}");
            SteganoError::ImageEncoding
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::prepare_gradient_carrier;
    use image::ImageBuffer;
    use tempfile::TempDir;

    #[test]
    fn from_raw_rejects_two_channels_and_wrong_length() {
        assert!(matches!(
            Carrier::from_raw(2, 2, 2, vec![0; 8]),
            Err(SteganoError::UnsupportedChannelCount(2))
        ));
        assert!(matches!(
            Carrier::from_raw(2, 2, 3, vec![0; 11]),
            Err(SteganoError::ImageLoad(_))
        ));
    }

    #[test]
    fn samples_are_interleaved_row_major() {
        let c = Carrier::from_fn(3, 2, 3, |x, y, ch| (y * 100 + x * 10) as u8 + ch).unwrap();

        assert_eq!(c.sample(2, 1, 1), 121);
        assert_eq!(&c.samples()[..6], &[0, 1, 2, 10, 11, 12]);
        assert_eq!(c.plane(1), vec![1.0, 11.0, 21.0, 101.0, 111.0, 121.0]);
    }

    #[test]
    fn set_plane_rounds_and_clamps() {
        let mut c = Carrier::from_raw(4, 1, 1, vec![0; 4]).unwrap();
        c.set_plane(0, &[-3.2, 12.5, 254.6, 300.0]);

        assert_eq!(c.samples(), &[0, 13, 255, 255]);
    }

    #[test]
    fn headroom_keeps_alpha_and_mid_tones() {
        let mut c = Carrier::from_raw(2, 1, 4, vec![0, 128, 255, 0, 3, 250, 7, 255]).unwrap();

        let moved = c.reserve_headroom(5);

        assert_eq!(moved, 3);
        assert_eq!(c.samples(), &[5, 128, 250, 0, 5, 250, 7, 255]);
    }

    #[test]
    fn grey_alpha_becomes_rgba() {
        let image = DynamicImage::ImageLumaA8(ImageBuffer::from_pixel(
            2,
            2,
            image::LumaA([9u8, 200]),
        ));
        let c = Carrier::from_image(image);

        assert_eq!(c.channels(), 4);
        assert_eq!(c.color_channels(), 3);
        assert_eq!(&c.samples()[..4], &[9, 9, 9, 200]);
    }

    #[test]
    fn should_survive_a_png_round_trip() -> Result<()> {
        let out_dir = TempDir::new()?;
        let path = out_dir.path().join("carrier.png");
        let mut carrier = prepare_gradient_carrier(17, 11, 4);

        carrier.save_as(&path)?;
        let loaded = Carrier::from_file(&path)?;

        assert_eq!(loaded, carrier);
        Ok(())
    }

    #[test]
    fn should_fail_on_a_non_image_file() {
        assert!(matches!(
            Carrier::from_file(Path::new("Cargo.toml")),
            Err(SteganoError::ImageLoad(_))
        ));
    }
}
