//! Embedding algorithms, each deciding where in a [`Carrier`] the bits of a payload live.
//!
//! All of them are pure, `embed` works on a copy and the input stays untouched.

mod adaptive;
mod coefficients;
mod dct;
mod dwt;
mod lsb;
pub(crate) mod transform;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use enum_dispatch::enum_dispatch;

pub use adaptive::AdaptiveLsb;
pub use dct::Dct;
pub use dwt::Dwt;
pub use lsb::Lsb;

use crate::cancel::CancellationToken;
use crate::error::SteganoError;
use crate::media::Carrier;
use crate::result::Result;

#[enum_dispatch]
pub trait EmbeddingAlgorithm {
    /// payload bytes the carrier can take, the length prefix is already accounted for
    fn capacity(&self, carrier: &Carrier) -> usize;

    /// like [`EmbeddingAlgorithm::embed`] but gives up with [`SteganoError::Cancelled`]
    /// once `cancel` is set
    fn embed_cancellable(
        &self,
        carrier: &Carrier,
        payload: &[u8],
        cancel: &CancellationToken,
    ) -> Result<Carrier>;

    /// `hint` caps the length that is believed, anything above means no hidden data
    fn extract(&self, carrier: &Carrier, hint: Option<usize>) -> Result<Vec<u8>>;

    /// returns a copy of `carrier` with `payload` hidden in it
    fn embed(&self, carrier: &Carrier, payload: &[u8]) -> Result<Carrier> {
        self.embed_cancellable(carrier, payload, &CancellationToken::default())
    }
}

#[enum_dispatch(EmbeddingAlgorithm)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Algorithm {
    Lsb,
    Dct,
    Dwt,
    AdaptiveLsb,
}

impl Algorithm {
    /// every algorithm with its default options
    pub fn all() -> [Algorithm; 4] {
        [
            Lsb.into(),
            Dct::default().into(),
            Dwt::default().into(),
            AdaptiveLsb::default().into(),
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Lsb(_) => "LSB",
            Algorithm::Dct(_) => "DCT",
            Algorithm::Dwt(_) => "DWT",
            Algorithm::AdaptiveLsb(_) => "Adaptive LSB",
        }
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Lsb.into()
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SteganoError;

    /// Case insensitive, "Adaptive LSB" may be written with `_`, `-` or no separator
    fn from_str(s: &str) -> Result<Self> {
        let key = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "lsb" => Ok(Lsb.into()),
            "dct" => Ok(Dct::default().into()),
            "dwt" => Ok(Dwt::default().into()),
            "adaptivelsb" | "adaptive" => Ok(AdaptiveLsb::default().into()),
            _ => Err(SteganoError::UnknownAlgorithm(s.to_string())),
        }
    }
}

pub(crate) fn ensure_capacity(payload_len: usize, available: usize) -> Result<()> {
    if payload_len > available {
        return Err(SteganoError::CapacityExceeded {
            required: payload_len,
            available,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{prepare_gradient_carrier, prepare_noise_carrier};

    #[test]
    fn algorithms_are_parsed_by_name() {
        assert_eq!("LSB".parse::<Algorithm>().unwrap(), Algorithm::Lsb(Lsb));
        assert_eq!("dct".parse::<Algorithm>().unwrap().name(), "DCT");
        assert_eq!("DWT".parse::<Algorithm>().unwrap().name(), "DWT");
        for name in ["Adaptive LSB", "AdaptiveLSB", "adaptive_lsb"] {
            assert_eq!(name.parse::<Algorithm>().unwrap().name(), "Adaptive LSB");
        }
        assert!(matches!(
            "F5".parse::<Algorithm>(),
            Err(SteganoError::UnknownAlgorithm(name)) if name == "F5"
        ));
    }

    #[test]
    fn names_parse_back() {
        for algorithm in Algorithm::all() {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn every_algorithm_should_round_trip() {
        let carrier = prepare_gradient_carrier(64, 48, 3);
        let payload = b"The quick brown fox";

        for algorithm in Algorithm::all() {
            let stego = algorithm.embed(&carrier, payload).unwrap();
            assert_eq!(stego.shape(), carrier.shape(), "{algorithm}");

            let extracted = algorithm.extract(&stego, None).unwrap();
            assert_eq!(extracted, payload, "{algorithm}");
        }
    }

    #[test]
    fn every_algorithm_should_reject_one_byte_too_many() {
        let carrier = prepare_noise_carrier(32, 32, 1);

        for algorithm in Algorithm::all() {
            let capacity = algorithm.capacity(&carrier);
            let too_much = vec![0xA5; capacity + 1];

            assert!(
                matches!(
                    algorithm.embed(&carrier, &too_much),
                    Err(SteganoError::CapacityExceeded { required, available })
                        if required == capacity + 1 && available == capacity
                ),
                "{algorithm}"
            );
        }
    }

    #[test]
    fn embedding_leaves_the_input_untouched() {
        let carrier = prepare_noise_carrier(40, 40, 4);
        let before = carrier.clone();

        for algorithm in Algorithm::all() {
            algorithm.embed(&carrier, b"xyz").unwrap();
        }

        assert_eq!(carrier, before);
    }

    #[test]
    fn cancelled_embedding_gives_up() {
        let carrier = prepare_gradient_carrier(32, 32, 3);
        let cancel = CancellationToken::new();
        cancel.cancel();

        for algorithm in Algorithm::all() {
            assert!(
                matches!(
                    algorithm.embed_cancellable(&carrier, b"abc", &cancel),
                    Err(SteganoError::Cancelled)
                ),
                "{algorithm}"
            );
        }
    }
}
