//! Named resource lookup across an ordered set of directories.

use std::path::{Path, PathBuf};

use crate::helpers::source::JsonFile;
use crate::types::error::AutorevError;

/// Directories that ship alongside an application, searched in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceBundle {
    dirs: Vec<PathBuf>,
}

impl ResourceBundle {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// First `dir/name` that exists as a file.
    pub fn locate(&self, name: impl AsRef<Path>) -> Option<PathBuf> {
        let name = name.as_ref();
        self.dirs.iter().map(|dir| dir.join(name)).find(|candidate| {
            log::debug!("Looking for resource at {}", candidate.display());
            candidate.is_file()
        })
    }

    /// Locate `name` and wrap it as a JSON metadata source.
    pub fn open(&self, name: impl AsRef<Path>) -> Option<JsonFile> {
        self.locate(name).map(JsonFile::new)
    }

    /// Like [`open`](Self::open), failing with `ResourceNotFound` when no
    /// directory holds `name`.
    pub fn require(&self, name: impl AsRef<Path>) -> Result<JsonFile, AutorevError> {
        let name = name.as_ref();
        self.open(name)
            .ok_or_else(|| AutorevError::resource_not_found(name))
    }
}
