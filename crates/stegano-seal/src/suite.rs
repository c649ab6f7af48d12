use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::SealError;

/// The symmetric cipher suites, all of them authenticated.
///
/// The numeric id is what ends up in the payload frame header, so it must never change.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherSuite {
    /// AES-256-CBC with PKCS7 padding, encrypt-then-MAC with HMAC-SHA256
    #[default]
    Aes256Cbc,
    /// ChaCha20-Poly1305 AEAD
    ChaCha20,
    /// Fernet compatible token (AES-128-CBC + HMAC-SHA256, versioned and timestamped)
    AuthenticatedToken,
}

impl CipherSuite {
    pub const ALL: [CipherSuite; 3] = [
        CipherSuite::Aes256Cbc,
        CipherSuite::ChaCha20,
        CipherSuite::AuthenticatedToken,
    ];

    pub fn id(self) -> u8 {
        match self {
            CipherSuite::Aes256Cbc => 0,
            CipherSuite::ChaCha20 => 1,
            CipherSuite::AuthenticatedToken => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CipherSuite::Aes256Cbc => "AES-256-CBC",
            CipherSuite::ChaCha20 => "ChaCha20",
            CipherSuite::AuthenticatedToken => "AuthenticatedToken",
        }
    }
}

impl TryFrom<u8> for CipherSuite {
    type Error = SealError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        CipherSuite::ALL
            .into_iter()
            .find(|suite| suite.id() == id)
            .ok_or_else(|| SealError::UnsupportedCipher(format!("id {id}")))
    }
}

impl From<CipherSuite> for u8 {
    fn from(suite: CipherSuite) -> Self {
        suite.id()
    }
}

impl FromStr for CipherSuite {
    type Err = SealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aes-256" | "aes-256-cbc" | "aes256" => Ok(CipherSuite::Aes256Cbc),
            "chacha20" | "chacha20-poly1305" => Ok(CipherSuite::ChaCha20),
            "fernet" | "authenticatedtoken" | "authenticated-token" | "token" => {
                Ok(CipherSuite::AuthenticatedToken)
            }
            _ => Err(SealError::UnsupportedCipher(s.to_string())),
        }
    }
}

impl Display for CipherSuite {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
