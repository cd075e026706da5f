//! autorev configuration, stored in `autorev.toml`.

use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::error::AutorevError;

pub const CONFIG_FILE_NAME: &str = "autorev.toml";
pub const DEFAULT_RESOURCE_NAME: &str = "autorevision.json";

fn default_resource_name() -> String {
    DEFAULT_RESOURCE_NAME.to_string()
}

fn default_env_fallback() -> bool {
    true
}

/// Where to find the autorevision metadata for an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// File name of the metadata resource.
    #[serde(default = "default_resource_name")]
    pub resource_name: String,

    /// Directories searched for the resource, in order. Relative entries are
    /// resolved against the base directory; an empty list means the base
    /// directory itself.
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,

    /// Read `VCS_*` environment variables when no resource file is found.
    #[serde(default = "default_env_fallback")]
    pub env_fallback: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resource_name: default_resource_name(),
            search_paths: Vec::new(),
            env_fallback: default_env_fallback(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AutorevError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Find `autorev.toml` in `start_dir` or the closest ancestor holding one.
    ///
    /// A relative `start_dir` is canonicalized first, so the walk reaches the
    /// filesystem root and the returned base directory is absolute. Returns
    /// `None` if no config file exists up to the root.
    pub fn find(start_dir: impl AsRef<Path>) -> Option<Result<(Self, PathBuf), AutorevError>> {
        let start_dir = start_dir.as_ref();
        let start = if start_dir.is_absolute() {
            start_dir.to_path_buf()
        } else {
            match fs::canonicalize(start_dir) {
                Ok(p) => p,
                Err(e) => return Some(Err(e.into())),
            }
        };
        let mut dir = start.as_path();
        log::debug!("Searching for {} starting from {}", CONFIG_FILE_NAME, dir.display());

        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                log::debug!("Found config at {}", config_path.display());
                return Some(Self::load(&config_path).map(|c| (c, dir.to_path_buf())));
            }
            dir = dir.parent()?;
        }
    }

    /// Save configuration to `directory/autorev.toml`.
    pub fn save(&self, directory: impl AsRef<Path>) -> Result<PathBuf, AutorevError> {
        self.validate()?;
        let config_path = directory.as_ref().join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;
        log::info!("Configuration saved to {}", config_path.display());
        Ok(config_path)
    }

    /// Search directories with relative entries joined to `base_dir`.
    pub fn resolved_search_paths(&self, base_dir: &Path) -> Vec<PathBuf> {
        if self.search_paths.is_empty() {
            return vec![base_dir.to_path_buf()];
        }
        self.search_paths
            .iter()
            .map(|p| {
                if p.is_absolute() {
                    p.clone()
                } else {
                    base_dir.join(p)
                }
            })
            .collect()
    }

    fn validate(&self) -> Result<(), AutorevError> {
        let name = self.resource_name.trim();
        if name.is_empty() {
            return Err(AutorevError::config("resource_name must not be empty"));
        }
        if name != self.resource_name {
            return Err(AutorevError::config(format!(
                "resource_name must not have surrounding whitespace, got {:?}",
                self.resource_name
            )));
        }
        if Path::new(name).components().count() != 1 {
            return Err(AutorevError::config(format!(
                "resource_name must be a bare file name, got {:?}",
                self.resource_name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.resource_name, "autorevision.json");
        assert!(config.search_paths.is_empty());
        assert!(config.env_fallback);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_and_find_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let config = Config {
            resource_name: "rev.json".to_string(),
            search_paths: vec![PathBuf::from("resources"), PathBuf::from("/opt/app")],
            env_fallback: false,
        };
        config.save(tmp.path()).unwrap();

        let (found, base) = Config::find(&nested).unwrap().unwrap();
        assert_eq!(found, config);
        assert_eq!(base, tmp.path());
    }

    #[test]
    fn find_returns_none_without_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        // An ancestor of the temp dir could hold a config; only check the
        // negative case when none does.
        if tmp.path().ancestors().all(|d| !d.join(CONFIG_FILE_NAME).exists()) {
            assert!(Config::find(tmp.path()).is_none());
        }
    }

    #[test]
    fn unknown_keys_and_bad_names_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);

        fs::write(&path, "resource = \"x.json\"\n").unwrap();
        assert_eq!(Config::load(&path).unwrap_err().error_type(), "toml_error");

        fs::write(&path, "resource_name = \"../x.json\"\n").unwrap();
        assert_eq!(Config::load(&path).unwrap_err().error_type(), "config_error");

        fs::write(&path, "resource_name = \"  \"\n").unwrap();
        assert_eq!(Config::load(&path).unwrap_err().error_type(), "config_error");
    }

    #[test]
    fn padded_resource_names_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);

        for name in [" rev.json", "rev.json ", "\trev.json"] {
            fs::write(&path, format!("resource_name = {:?}\n", name)).unwrap();
            let err = Config::load(&path).unwrap_err();
            assert_eq!(err.error_type(), "config_error", "{:?}", name);
            assert!(err.to_string().contains("whitespace"));

            let config = Config {
                resource_name: name.to_string(),
                ..Config::default()
            };
            assert!(config.save(tmp.path()).is_err());
        }
    }

    #[test]
    fn relative_search_paths_resolve_against_base() {
        let config = Config {
            search_paths: vec![PathBuf::from("res"), PathBuf::from("/abs")],
            ..Config::default()
        };
        let base = Path::new("/app");
        assert_eq!(
            config.resolved_search_paths(base),
            vec![PathBuf::from("/app/res"), PathBuf::from("/abs")]
        );
        assert_eq!(
            Config::default().resolved_search_paths(base),
            vec![PathBuf::from("/app")]
        );
    }
}
