use std::path::Path;

use super::Carrier;
use crate::error::SteganoError;
use crate::result::Result;

/// Below this side length round trips through the interactive tools get unreliable
pub const MIN_CARRIER_SIDE: u32 = 100;

pub const SUPPORTED_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "bmp", "tiff", "tif", "webp"];

pub fn validate_carrier(carrier: &Carrier, min_side: u32) -> Result<()> {
    if carrier.width() < min_side || carrier.height() < min_side {
        return Err(SteganoError::ImageTooSmall {
            width: carrier.width(),
            height: carrier.height(),
            min: min_side,
        });
    }

    Ok(())
}

pub fn supported_formats() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

pub fn is_supported_format(path: &Path) -> bool {
    extension_of(path).is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.as_str()))
}

/// JPEG and WEBP recompress the pixels, bit exact embedding will not survive that
pub fn is_lossy_format(path: &Path) -> bool {
    extension_of(path).is_some_and(|e| matches!(e.as_str(), "jpg" | "jpeg" | "webp"))
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_carriers_are_rejected() {
        let c = Carrier::from_raw(120, 99, 1, vec![0; 120 * 99]).unwrap();

        assert!(matches!(
            validate_carrier(&c, MIN_CARRIER_SIDE),
            Err(SteganoError::ImageTooSmall {
                width: 120,
                height: 99,
                min: 100
            })
        ));
        assert!(validate_carrier(&c, 64).is_ok());
    }

    #[test]
    fn formats_are_classified_by_extension() {
        assert!(is_supported_format(Path::new("a/b.PNG")));
        assert!(is_supported_format(Path::new("b.tif")));
        assert!(!is_supported_format(Path::new("b.gif")));
        assert!(!is_supported_format(Path::new("no_extension")));

        assert!(is_lossy_format(Path::new("x.JPG")));
        assert!(is_lossy_format(Path::new("x.webp")));
        assert!(!is_lossy_format(Path::new("x.bmp")));
    }
}
