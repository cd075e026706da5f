//! autorev error types.
//!
//! Leaf parsers return narrow errors ([`SemVerError`], [`HashError`]); the
//! decoder and composer name the field that failed ([`DecodeError`],
//! [`ComposeError`]); operations touching the file system or environment
//! return the umbrella [`AutorevError`], which carries stable `error_type()`
//! strings.

use std::path::PathBuf;

/// Failure to parse a semantic version string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SemVerError {
    /// The input was empty (or whitespace only).
    #[error("empty version string")]
    Empty,
    /// The `MAJOR.MINOR.PATCH` core did not have exactly three components.
    #[error("expected MAJOR.MINOR.PATCH, found {found} component(s) in {input:?}")]
    ComponentCount { input: String, found: usize },
    /// A numeric component was empty, non-numeric or too large.
    #[error("invalid {component} version number {value:?}")]
    InvalidNumber {
        component: &'static str,
        value: String,
    },
    /// A prerelease or build identifier was empty (e.g. `1.0.0-alpha..1`).
    #[error("empty {segment} identifier")]
    EmptyIdentifier { segment: &'static str },
    /// A prerelease or build identifier contained a disallowed character.
    #[error("invalid {segment} identifier {value:?}")]
    InvalidIdentifier {
        segment: &'static str,
        value: String,
    },
}

/// Failure to parse a hex-encoded hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    #[error("empty hash")]
    Empty,
    #[error("invalid hex digit {found:?} at index {index}")]
    InvalidDigit { index: usize, found: char },
}

/// Failure to decode autorevision metadata into a `VersionControlInfo`.
///
/// Only required keys produce errors; malformed optional keys are dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The document's top-level value was not a JSON object.
    #[error("autorevision metadata must be a JSON object")]
    NotAnObject,
    /// A required key was absent.
    #[error("missing required key {key}")]
    MissingKey { key: &'static str },
    /// A required key was present with the wrong JSON type.
    #[error("key {key} has the wrong type (expected {expected})")]
    WrongType {
        key: &'static str,
        expected: &'static str,
    },
    /// A required key had the right type but an unusable value.
    #[error("key {key} has an invalid value: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

impl DecodeError {
    /// The metadata key this error refers to, if any.
    pub fn key(&self) -> Option<&'static str> {
        match self {
            DecodeError::NotAnObject => None,
            DecodeError::MissingKey { key }
            | DecodeError::WrongType { key, .. }
            | DecodeError::InvalidValue { key, .. } => Some(*key),
        }
    }
}

/// Failure to compose a `Version` from an app's version and build strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    #[error("missing version string")]
    MissingVersion,
    #[error("invalid version string: {0}")]
    InvalidVersion(#[from] SemVerError),
    #[error("missing build number")]
    MissingBuild,
    #[error("invalid build number {value:?}")]
    InvalidBuild { value: String },
}

/// Main error type for operations that read configuration or metadata.
#[derive(Debug, thiserror::Error)]
pub enum AutorevError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml error: {0}")]
    Toml(String),
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("compose error: {0}")]
    Compose(#[from] ComposeError),
    #[error("config error: {message}")]
    Config { message: String },
    #[error("resource not found: {}", .path.display())]
    ResourceNotFound { path: PathBuf },
}

impl AutorevError {
    /// Get the error type as a stable string.
    ///
    /// These strings are part of the public interface and must not change.
    pub fn error_type(&self) -> &'static str {
        match self {
            AutorevError::Io(_) => "io_error",
            AutorevError::Json(_) => "json_error",
            AutorevError::Toml(_) => "toml_error",
            AutorevError::Decode(_) => "decode_error",
            AutorevError::Compose(_) => "compose_error",
            AutorevError::Config { .. } => "config_error",
            AutorevError::ResourceNotFound { .. } => "resource_not_found",
        }
    }

    /// Create a "config error".
    pub fn config(message: impl Into<String>) -> Self {
        AutorevError::Config {
            message: message.into(),
        }
    }

    /// Create a "resource not found" error.
    pub fn resource_not_found(path: impl Into<PathBuf>) -> Self {
        AutorevError::ResourceNotFound { path: path.into() }
    }
}

impl From<toml::de::Error> for AutorevError {
    fn from(e: toml::de::Error) -> Self {
        AutorevError::Toml(e.to_string())
    }
}

impl From<toml::ser::Error> for AutorevError {
    fn from(e: toml::ser::Error) -> Self {
        AutorevError::Toml(e.to_string())
    }
}
