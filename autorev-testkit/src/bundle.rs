//! Temporary resource bundle for tests.

use fs_err as fs;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory standing in for an application's resources.
///
/// The directory is automatically cleaned up when dropped.
pub struct TestBundle {
    /// Temporary directory containing the bundle.
    _temp: TempDir,
    /// Path to the bundle root.
    root: PathBuf,
}

impl TestBundle {
    /// Create a new, empty bundle.
    pub fn new() -> Result<Self, TestBundleError> {
        let temp = TempDir::new()?;
        let root = temp.path().to_path_buf();
        Ok(Self { _temp: temp, root })
    }

    /// Get the bundle root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the absolute path for a relative path.
    pub fn path(&self, rel_path: &str) -> PathBuf {
        self.root.join(rel_path)
    }

    /// Create a subdirectory (and its parents).
    pub fn create_dir(&self, rel_path: &str) -> Result<PathBuf, TestBundleError> {
        let path = self.root.join(rel_path);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Write a file to the bundle.
    pub fn write_file(&self, rel_path: &str, contents: &[u8]) -> Result<PathBuf, TestBundleError> {
        let path = self.root.join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Write a JSON metadata document to the bundle.
    pub fn write_metadata(&self, rel_path: &str, value: &Value) -> Result<PathBuf, TestBundleError> {
        let json = serde_json::to_vec_pretty(value)?;
        self.write_file(rel_path, &json)
    }

    /// Write an `autorev.toml` config at `rel_dir` (use `""` for the root).
    pub fn write_config(&self, rel_dir: &str, toml: &str) -> Result<PathBuf, TestBundleError> {
        let rel_path = if rel_dir.is_empty() {
            "autorev.toml".to_string()
        } else {
            format!("{}/autorev.toml", rel_dir.trim_end_matches('/'))
        };
        self.write_file(&rel_path, toml.as_bytes())
    }
}

/// Error type for TestBundle operations.
#[derive(Debug)]
pub enum TestBundleError {
    /// I/O error.
    Io(std::io::Error),
    /// JSON serialization error.
    Json(serde_json::Error),
}

impl std::fmt::Display for TestBundleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestBundleError::Io(e) => write!(f, "I/O error: {}", e),
            TestBundleError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for TestBundleError {}

impl From<std::io::Error> for TestBundleError {
    fn from(e: std::io::Error) -> Self {
        TestBundleError::Io(e)
    }
}

impl From<serde_json::Error> for TestBundleError {
    fn from(e: serde_json::Error) -> Self {
        TestBundleError::Json(e)
    }
}
