//! Fixed-size digest types
//!
//! Three digest widths participate in the wire format: 20, 32 and 64 bytes.
//! All render textually as lowercase hex. The 32-byte digest can also be
//! produced by hashing arbitrary bytes (SHA-256).

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from parsing a textual digest
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseChecksumError {
    /// Input is not valid hex
    #[error("invalid hex digest: {0}")]
    InvalidHex(String),

    /// Input decodes to the wrong number of bytes
    #[error("digest has {actual} bytes, expected {expected}")]
    WrongLength { expected: usize, actual: usize },
}

/// Decodes a hex string into exactly `N` bytes.
pub(crate) fn parse_hex_exact<const N: usize>(s: &str) -> Result<[u8; N], ParseChecksumError> {
    let bytes = hex::decode(s).map_err(|_| ParseChecksumError::InvalidHex(s.to_string()))?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| ParseChecksumError::WrongLength {
            expected: N,
            actual: len,
        })
}

macro_rules! checksum_type {
    ($(#[$doc:meta])* $name:ident, $width:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub [u8; $width]);

        impl $name {
            /// Width of this digest in bytes.
            pub const WIDTH: usize = $width;

            /// Returns the raw digest bytes.
            pub fn as_bytes(&self) -> &[u8; $width] {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name([0u8; $width])
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = ParseChecksumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_hex_exact::<$width>(s).map($name)
            }
        }
    };
}

checksum_type!(
    /// 20-byte digest (RIPEMD-160 width)
    Checksum160,
    20
);

checksum_type!(
    /// 32-byte digest (SHA-256 width)
    Checksum256,
    32
);

checksum_type!(
    /// 64-byte digest (SHA-512 width)
    Checksum512,
    64
);

impl Checksum256 {
    /// Hashes arbitrary bytes with SHA-256.
    pub fn hash(data: &[u8]) -> Self {
        let digest = Sha256::digest(data);
        Checksum256(digest.into())
    }
}
