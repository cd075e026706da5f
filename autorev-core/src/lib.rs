//! autorev Core Library
//!
//! Build provenance from autorevision metadata: decodes the `VCS_*` mapping
//! the autorevision tool writes at build time and joins it with an
//! application's semantic version and build number.
//!
//! # Architecture
//!
//! - `types`: Core data types (SemVer, Hash, VersionControlInfo, Version, Config)
//! - `ops`: High-level operations (resolve)
//! - `helpers`: Low-level utilities (date parsing, metadata sources, bundle lookup)
//!
//! # Example
//!
//! ```
//! use autorev_core::{Version, VersionControlInfo};
//!
//! let info = VersionControlInfo::from_json_str(r#"{
//!     "VCS_BASENAME": "repo",
//!     "VCS_NUM": 4,
//!     "VCS_BRANCH": "main",
//!     "VCS_FULL_HASH": "abc123",
//!     "VCS_WC_MODIFIED": false
//! }"#).unwrap();
//!
//! let version = Version::compose(Some("1.2.3"), Some("4"), Some(info)).unwrap();
//! assert_eq!(version.semver.to_string(), "1.2.3");
//! assert_eq!(version.build, 4);
//! ```

pub mod helpers;
pub mod ops;
pub mod types;

// Re-export commonly used types at crate root
pub use types::{
    crate_version,
    AutorevError,
    ComposeError,
    Config,
    DecodeError,
    Hash,
    HashError,
    Identifier,
    SemVer,
    SemVerError,
    VcsType,
    Version,
    VersionControlInfo,
};

// Re-export operations at crate root
pub use ops::{resolve, resolve_with_env};

// Re-export helpers used at the crate boundary
pub use helpers::bundle::ResourceBundle;
pub use helpers::date::parse_rfc3339;
pub use helpers::source::{EnvSource, JsonBytes, JsonFile, MetadataSource};
