//! Account and record identifiers
//!
//! A `Name` is an opaque 64-bit identifier with a compact textual form:
//! up to 13 characters drawn from `.12345abcdefghijklmnopqrstuvwxyz`,
//! packed 5 bits per character (the 13th character carries only 4 bits).
//! Names are totally ordered by their numeric value and encode on the wire
//! as a fixed-width little-endian u64.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Characters permitted in a name, in symbol order.
const NAME_CHARSET: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// Maximum textual length of a name.
pub const MAX_NAME_LEN: usize = 13;

/// Errors from parsing a textual name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseNameError {
    /// Name longer than 13 characters
    #[error("name '{0}' exceeds 13 characters")]
    TooLong(String),

    /// Character outside the permitted charset
    #[error("name '{0}' contains invalid character '{1}'")]
    InvalidChar(String, char),

    /// The 13th character can only encode 4 bits (`.` to `j`)
    #[error("name '{0}' has invalid 13th character '{1}'")]
    InvalidTrailingChar(String, char),
}

/// A 64-bit identifier with base-32 textual form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(u64);

impl Name {
    /// Wraps a raw numeric value.
    pub fn from_u64(value: u64) -> Self {
        Name(value)
    }

    /// Returns the raw numeric value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns the fixed-width wire encoding.
    pub fn to_le_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Reconstructs a name from its wire encoding.
    pub fn from_le_bytes(bytes: [u8; 8]) -> Self {
        Name(u64::from_le_bytes(bytes))
    }

    /// Returns the symbol index of a character, if it is in the charset.
    fn char_to_symbol(c: char) -> Option<u64> {
        match c {
            '.' => Some(0),
            '1'..='5' => Some(c as u64 - '1' as u64 + 1),
            'a'..='z' => Some(c as u64 - 'a' as u64 + 6),
            _ => None,
        }
    }
}

impl FromStr for Name {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > MAX_NAME_LEN {
            return Err(ParseNameError::TooLong(s.to_string()));
        }

        let mut value: u64 = 0;
        for (i, c) in s.chars().enumerate() {
            let sym = Name::char_to_symbol(c)
                .ok_or_else(|| ParseNameError::InvalidChar(s.to_string(), c))?;

            if i < 12 {
                value |= (sym & 0x1f) << (64 - 5 * (i + 1));
            } else {
                // 13th character: only the low 4 bits fit
                if sym > 0x0f {
                    return Err(ParseNameError::InvalidTrailingChar(s.to_string(), c));
                }
                value |= sym;
            }
        }

        Ok(Name(value))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = [b'.'; MAX_NAME_LEN];
        let mut tmp = self.0;

        for i in 0..MAX_NAME_LEN {
            let mask = if i == 0 { 0x0f } else { 0x1f };
            out[MAX_NAME_LEN - 1 - i] = NAME_CHARSET[(tmp & mask) as usize];
            tmp >>= if i == 0 { 4 } else { 5 };
        }

        let s = std::str::from_utf8(&out).expect("charset is ASCII");
        write!(f, "{}", s.trim_end_matches('.'))
    }
}

impl Serialize for Name {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
