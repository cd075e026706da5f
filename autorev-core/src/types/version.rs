//! What was built: app version, build number and source revision.

use serde::Serialize;

use crate::types::error::ComposeError;
use crate::types::semver::SemVer;
use crate::types::vcs::VersionControlInfo;

/// An application's version joined with its build provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Version {
    pub semver: SemVer,
    pub build: u64,
    pub version_control: Option<VersionControlInfo>,
}

impl Version {
    /// Compose a version from the app's version and build-number strings.
    ///
    /// Both strings are required: a missing or unparseable value fails the
    /// whole composition. `version_control` is carried through unchanged.
    pub fn compose(
        version: Option<&str>,
        build: Option<&str>,
        version_control: Option<VersionControlInfo>,
    ) -> Result<Self, ComposeError> {
        let semver = SemVer::parse(version.ok_or(ComposeError::MissingVersion)?)?;
        let build = parse_build(build.ok_or(ComposeError::MissingBuild)?)?;
        Ok(Self {
            semver,
            build,
            version_control,
        })
    }
}

fn parse_build(s: &str) -> Result<u64, ComposeError> {
    let trimmed = s.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ComposeError::InvalidBuild {
            value: s.to_string(),
        });
    }
    trimmed.parse().map_err(|_| ComposeError::InvalidBuild {
        value: s.to_string(),
    })
}

/// This library's own version, as stamped by its build script.
pub fn crate_version() -> Result<Version, ComposeError> {
    Version::compose(
        Some(env!("AUTOREV_VERSION")),
        Some(env!("AUTOREV_BUILD_NUMBER")),
        None,
    )
}
