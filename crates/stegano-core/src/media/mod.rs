mod carrier;
pub mod validation;

use std::path::Path;

pub use carrier::Carrier;
pub use validation::{
    is_lossy_format, is_supported_format, supported_formats, validate_carrier, MIN_CARRIER_SIDE,
};

/// loads any supported image file as carrier, see [`Carrier::from_image`] for the channel mapping
pub fn load_carrier(path: impl AsRef<Path>) -> crate::Result<Carrier> {
    Carrier::from_file(path.as_ref())
}

pub trait Persist {
    fn save_as(&mut self, _: &Path) -> crate::Result<()>;
}
