use std::io::{Cursor, Read};

use byteorder::{ReadBytesExt, WriteBytesExt};
use stegano_seal::CipherSuite;

use crate::error::SteganoError;
use crate::result::Result;

pub(super) const ENCRYPTED: u8 = 1 << 0;
pub(super) const COMPRESSED: u8 = 1 << 1;
const KNOWN_FLAGS: u8 = ENCRYPTED | COMPRESSED;

/// flags byte and cipher id byte
pub const HEADER_LEN: usize = 2;

pub trait HasFlag {
    fn has_flag(&self, flag: u8) -> bool;
}

impl HasFlag for u8 {
    fn has_flag(&self, flag: u8) -> bool {
        (self & flag) != 0
    }
}

/// A payload as it lives inside the carrier: `flags | cipher id | body`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub encrypted: bool,
    pub compressed: bool,
    /// written even for plain bodies, then it has no meaning
    pub cipher: CipherSuite,
    pub body: Vec<u8>,
}

impl Frame {
    pub fn plain(body: Vec<u8>) -> Self {
        Self {
            encrypted: false,
            compressed: false,
            cipher: CipherSuite::default(),
            body,
        }
    }

    fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.encrypted {
            flags |= ENCRYPTED;
        }
        if self.compressed {
            flags |= COMPRESSED;
        }
        flags
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.body.len());
        bytes.write_u8(self.flags())?;
        bytes.write_u8(self.cipher.id())?;
        bytes.extend_from_slice(&self.body);

        Ok(bytes)
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(SteganoError::MalformedHeader(format!(
                "{} byte(s), the header alone needs {HEADER_LEN}",
                bytes.len()
            )));
        }
        let mut cursor = Cursor::new(bytes);
        let flags = cursor.read_u8()?;
        let cipher_id = cursor.read_u8()?;

        if flags & !KNOWN_FLAGS != 0 {
            return Err(SteganoError::MalformedHeader(format!(
                "unknown flags {flags:#010b}"
            )));
        }
        let cipher = CipherSuite::try_from(cipher_id)
            .map_err(|_| SteganoError::MalformedHeader(format!("unknown cipher id {cipher_id}")))?;

        let mut body = Vec::with_capacity(bytes.len() - HEADER_LEN);
        cursor.read_to_end(&mut body)?;

        Ok(Self {
            encrypted: flags.has_flag(ENCRYPTED),
            compressed: flags.has_flag(COMPRESSED),
            cipher,
            body,
        })
    }
}

/// header plus body, fails with [`SteganoError::MalformedHeader`] on an unknown `cipher_id`
pub fn build_frame(body: &[u8], encrypted: bool, compressed: bool, cipher_id: u8) -> Result<Vec<u8>> {
    let cipher = CipherSuite::try_from(cipher_id)
        .map_err(|_| SteganoError::MalformedHeader(format!("unknown cipher id {cipher_id}")))?;

    Frame {
        encrypted,
        compressed,
        cipher,
        body: body.to_vec(),
    }
    .to_bytes()
}

pub fn parse_frame(bytes: &[u8]) -> Result<Frame> {
    Frame::parse(bytes)
}
