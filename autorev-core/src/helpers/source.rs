//! Providers of the raw `VCS_*` mapping.
//!
//! Each source produces a JSON object; decoding is left to
//! `VersionControlInfo::decode` so every source behaves identically.

use fs_err as fs;
use serde_json::{Map, Number, Value};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::types::error::{AutorevError, DecodeError};
use crate::types::vcs::keys;

/// Prefix shared by every autorevision key.
pub const ENV_PREFIX: &str = "VCS_";

/// Something that can hand over an autorevision key-value mapping.
pub trait MetadataSource {
    /// Human-readable description used in log messages.
    fn describe(&self) -> String;

    /// Read the mapping. Fails on I/O or syntax errors, never on content.
    fn read_mapping(&self) -> Result<Map<String, Value>, AutorevError>;
}

fn into_object(value: Value) -> Result<Map<String, Value>, AutorevError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(DecodeError::NotAnObject.into()),
    }
}

/// An in-memory JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBytes {
    bytes: Vec<u8>,
}

impl JsonBytes {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl MetadataSource for JsonBytes {
    fn describe(&self) -> String {
        format!("{} bytes of JSON", self.bytes.len())
    }

    fn read_mapping(&self) -> Result<Map<String, Value>, AutorevError> {
        into_object(serde_json::from_slice(&self.bytes)?)
    }
}

/// A JSON document on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetadataSource for JsonFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_mapping(&self) -> Result<Map<String, Value>, AutorevError> {
        log::debug!("Reading autorevision metadata from {}", self.path.display());
        let contents = fs::read(&self.path)?;
        into_object(serde_json::from_slice(&contents)?)
    }
}

/// A snapshot of `VCS_*` environment variables.
///
/// Environment values are always strings, so integer and boolean keys are
/// coerced where possible: `VCS_NUM` and `VCS_TICK` become numbers when they
/// are non-negative integers, `VCS_WC_MODIFIED` becomes a boolean for
/// `1`/`true`/`0`/`false`. Anything else stays a string and is judged by the
/// decoder like any other value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSource {
    vars: Vec<(String, String)>,
}

impl EnvSource {
    /// Capture the `VCS_*` variables of the current process.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn from_env() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    fn from_os_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        Self::from_vars(vars.into_iter().filter_map(|(k, v)| {
            match (k.into_string(), v.into_string()) {
                (Ok(k), Ok(v)) => Some((k, v)),
                (Ok(k), Err(_)) => {
                    if k.starts_with(ENV_PREFIX) {
                        log::debug!("Skipping {}: value is not valid Unicode", k);
                    }
                    None
                }
                (Err(k), _) => {
                    log::debug!("Skipping environment variable {:?}: name is not valid Unicode", k);
                    None
                }
            }
        }))
    }

    /// Build from explicit name/value pairs; names without the `VCS_` prefix
    /// are ignored.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| k.starts_with(ENV_PREFIX))
            .collect();
        Self { vars }
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

fn coerce(key: &str, raw: &str) -> Value {
    let trimmed = raw.trim();
    match key {
        keys::NUM | keys::TICK => match trimmed.parse::<u64>() {
            Ok(n) => Value::Number(Number::from(n)),
            Err(_) => Value::String(raw.to_string()),
        },
        keys::WC_MODIFIED => match trimmed.to_lowercase().as_str() {
            "1" | "true" => Value::Bool(true),
            "0" | "false" => Value::Bool(false),
            _ => Value::String(raw.to_string()),
        },
        _ => Value::String(raw.to_string()),
    }
}

impl MetadataSource for EnvSource {
    fn describe(&self) -> String {
        format!("{} {}* environment variable(s)", self.vars.len(), ENV_PREFIX)
    }

    fn read_mapping(&self) -> Result<Map<String, Value>, AutorevError> {
        Ok(self
            .vars
            .iter()
            .map(|(k, v)| (k.clone(), coerce(k, v)))
            .collect())
    }
}
