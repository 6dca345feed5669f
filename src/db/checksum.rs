//! Frame checksum: double SHA-256 over the body

use sha2::{Digest, Sha256};
use std::fmt;

/// Size of the trailing checksum in bytes
pub const CHECKSUM_SIZE: usize = 32;

/// 32-byte checksum stored raw at the end of every flat file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Checksum([u8; CHECKSUM_SIZE]);

impl Checksum {
    /// Hash `data` with SHA-256 applied twice
    pub fn compute(data: &[u8]) -> Self {
        let first = Sha256::digest(data);
        let second = Sha256::digest(first);

        let mut out = [0u8; CHECKSUM_SIZE];
        out.copy_from_slice(&second);
        Self(out)
    }

    /// Build a checksum from the trailing bytes of a file
    ///
    /// Files shorter than a full checksum yield fewer bytes; the missing
    /// positions stay zero.
    pub fn from_tail(tail: &[u8]) -> Self {
        let mut out = [0u8; CHECKSUM_SIZE];
        let n = tail.len().min(CHECKSUM_SIZE);
        out[..n].copy_from_slice(&tail[..n]);
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; CHECKSUM_SIZE] {
        &self.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
