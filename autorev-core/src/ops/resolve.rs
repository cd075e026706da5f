//! Resolve an application's full `Version` from config, bundle and env.

use std::path::Path;

use crate::helpers::bundle::ResourceBundle;
use crate::helpers::source::{EnvSource, MetadataSource};
use crate::types::config::Config;
use crate::types::error::AutorevError;
use crate::types::vcs::VersionControlInfo;
use crate::types::version::Version;

/// Resolve the version of an application whose resources live in `base_dir`.
///
/// The version and build strings must be valid. Revision metadata is best
/// effort: a missing or malformed resource leaves `version_control` as `None`.
pub fn resolve(
    config: &Config,
    base_dir: impl AsRef<Path>,
    app_version: Option<&str>,
    app_build: Option<&str>,
) -> Result<Version, AutorevError> {
    resolve_with_env(config, base_dir, app_version, app_build, EnvSource::from_env())
}

/// Like [`resolve`], with an explicit environment snapshot for the fallback.
pub fn resolve_with_env(
    config: &Config,
    base_dir: impl AsRef<Path>,
    app_version: Option<&str>,
    app_build: Option<&str>,
    env: EnvSource,
) -> Result<Version, AutorevError> {
    let version_control = lookup_version_control(config, base_dir.as_ref(), env);
    let version = Version::compose(app_version, app_build, version_control)?;
    log::info!(
        "Resolved version {} build {}{}",
        version.semver,
        version.build,
        match &version.version_control {
            Some(vcs) => format!(" at {} {}", vcs.vcs_type, vcs.hash.short(12)),
            None => String::new(),
        }
    );
    Ok(version)
}

fn lookup_version_control(
    config: &Config,
    base_dir: &Path,
    env: EnvSource,
) -> Option<VersionControlInfo> {
    let bundle = ResourceBundle::new(config.resolved_search_paths(base_dir));

    let source: Box<dyn MetadataSource> = match bundle.require(&config.resource_name) {
        Ok(file) => Box::new(file),
        Err(e) if config.env_fallback && !env.is_empty() => {
            log::debug!("{}, falling back to environment", e);
            Box::new(env)
        }
        Err(e) => {
            log::debug!("No autorevision metadata for {}: {}", base_dir.display(), e);
            return None;
        }
    };

    match VersionControlInfo::from_source(source.as_ref()) {
        Ok(info) => Some(info),
        Err(e) => {
            log::warn!(
                "Ignoring autorevision metadata from {}: {}",
                source.describe(),
                e
            );
            None
        }
    }
}
