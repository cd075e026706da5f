//! Core type definitions for autorev.

pub mod config;
pub mod error;
pub mod hash;
pub mod semver;
pub mod vcs;
pub mod version;

pub use config::Config;
pub use error::{AutorevError, ComposeError, DecodeError, HashError, SemVerError};
pub use hash::Hash;
pub use semver::{Identifier, SemVer};
pub use vcs::{VcsType, VersionControlInfo};
pub use version::{crate_version, Version};
