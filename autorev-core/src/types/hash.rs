//! Hex-encoded content identifier (commit hash, repository uuid).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::types::error::HashError;

/// A validated hex string.
///
/// Both upper and lower case digits are accepted and the case is kept as
/// written; equality and ordering compare the exact string, so `ABC` and
/// `abc` are different hashes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash(String);

impl Hash {
    /// Parse a hash, rejecting empty input and non-hex characters.
    pub fn parse(s: &str) -> Result<Self, HashError> {
        if s.is_empty() {
            return Err(HashError::Empty);
        }
        if let Some((index, found)) = s.char_indices().find(|(_, c)| !c.is_ascii_hexdigit()) {
            return Err(HashError::InvalidDigit { index, found });
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first `len` hex digits (the whole hash if it is shorter).
    pub fn short(&self, len: usize) -> &str {
        // Validated input is ASCII, so any index is a char boundary.
        &self.0[..len.min(self.0.len())]
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Hash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::parse(s)
    }
}

impl TryFrom<String> for Hash {
    type Error = HashError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Hash::parse(&s)
    }
}

impl AsRef<str> for Hash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Hash::parse(&s).map_err(serde::de::Error::custom)
    }
}
