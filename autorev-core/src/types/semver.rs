//! Semantic version (`MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash as StdHash, Hasher};
use std::str::FromStr;

use crate::types::error::SemVerError;

/// A single dot-separated prerelease identifier.
///
/// Numeric identifiers always sort before alphanumeric ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// Digits only, of any length, without leading zeros. Compared
    /// numerically.
    Numeric(String),
    /// Contains at least one letter or hyphen, compared in ASCII order.
    Alphanumeric(String),
}

impl Identifier {
    /// Numeric identifier from a digit run; leading zeros are dropped.
    ///
    /// Returns `None` unless `digits` is a non-empty run of ASCII digits.
    pub fn numeric(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let trimmed = digits.trim_start_matches('0');
        let normalized = if trimmed.is_empty() { "0" } else { trimmed };
        Some(Identifier::Numeric(normalized.to_string()))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // Normalized digit strings: longer is larger, then digit by digit.
            (Identifier::Numeric(a), Identifier::Numeric(b)) => {
                a.len().cmp(&b.len()).then_with(|| a.cmp(b))
            }
            (Identifier::Numeric(_), Identifier::Alphanumeric(_)) => Ordering::Less,
            (Identifier::Alphanumeric(_), Identifier::Numeric(_)) => Ordering::Greater,
            (Identifier::Alphanumeric(a), Identifier::Alphanumeric(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(s) | Identifier::Alphanumeric(s) => f.write_str(s),
        }
    }
}

/// A parsed semantic version.
///
/// Equality, ordering and hashing follow version precedence, so build
/// metadata never takes part in them: `1.0.0+a == 1.0.0+b`.
#[derive(Debug, Clone)]
pub struct SemVer {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    prerelease: Vec<Identifier>,
    build: Vec<String>,
}

impl SemVer {
    /// Create a release version with no prerelease or build metadata.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: Vec::new(),
            build: Vec::new(),
        }
    }

    /// Parse `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`.
    ///
    /// Surrounding whitespace is ignored. Leading zeros in numeric parts are
    /// accepted and dropped when rendered.
    pub fn parse(s: &str) -> Result<Self, SemVerError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SemVerError::Empty);
        }

        let (rest, build) = match s.split_once('+') {
            Some((rest, build)) => (rest, Some(build)),
            None => (s, None),
        };
        let (core, prerelease) = match rest.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (rest, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(SemVerError::ComponentCount {
                input: s.to_string(),
                found: parts.len(),
            });
        }
        let major = parse_number("major", parts[0])?;
        let minor = parse_number("minor", parts[1])?;
        let patch = parse_number("patch", parts[2])?;

        let prerelease = match prerelease {
            Some(pre) => identifiers("prerelease", pre)?
                .into_iter()
                .map(|id| {
                    Identifier::numeric(id)
                        .unwrap_or_else(|| Identifier::Alphanumeric(id.to_string()))
                })
                .collect(),
            None => Vec::new(),
        };
        let build = match build {
            Some(b) => identifiers("build", b)?
                .into_iter()
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        };

        Ok(Self {
            major,
            minor,
            patch,
            prerelease,
            build,
        })
    }

    /// Prerelease identifiers (empty for a release version).
    pub fn prerelease(&self) -> &[Identifier] {
        &self.prerelease
    }

    /// Build metadata identifiers (empty when absent).
    pub fn build_metadata(&self) -> &[String] {
        &self.build
    }

    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }
}

/// Digits-only run that fits in a `u64`.
fn parse_numeric(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_number(component: &'static str, s: &str) -> Result<u64, SemVerError> {
    parse_numeric(s).ok_or_else(|| SemVerError::InvalidNumber {
        component,
        value: s.to_string(),
    })
}

/// Split a prerelease/build section into validated identifiers.
fn identifiers<'a>(segment: &'static str, s: &'a str) -> Result<Vec<&'a str>, SemVerError> {
    s.split('.')
        .map(|id| {
            if id.is_empty() {
                Err(SemVerError::EmptyIdentifier { segment })
            } else if !id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-') {
                Err(SemVerError::InvalidIdentifier {
                    segment,
                    value: id.to_string(),
                })
            } else {
                Ok(id)
            }
        })
        .collect()
}

impl Ord for SemVer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (self.is_prerelease(), other.is_prerelease()) {
                (false, false) => Ordering::Equal,
                (false, true) => Ordering::Greater,
                (true, false) => Ordering::Less,
                (true, true) => self.prerelease.cmp(&other.prerelease),
            })
    }
}

impl PartialOrd for SemVer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SemVer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemVer {}

impl StdHash for SemVer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
        self.prerelease.hash(state);
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.prerelease.is_empty() {
            let pre: Vec<String> = self.prerelease.iter().map(|id| id.to_string()).collect();
            write!(f, "-{}", pre.join("."))?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build.join("."))?;
        }
        Ok(())
    }
}

impl FromStr for SemVer {
    type Err = SemVerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemVer::parse(s)
    }
}

// Serialized as the canonical version string
impl Serialize for SemVer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SemVer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SemVer::parse(&s).map_err(serde::de::Error::custom)
    }
}
