use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PublisherError, Result};
use crate::project_key::DEFAULT_KEY_FILE_NAME;
use crate::workflow::PublishPolicy;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "version-publisher.toml";

/// Environment switch that disables the whole publish step when set to `true`
pub const SKIP_ENV_VAR: &str = "VERSION_PUBLISHER_SKIP";

/// Represents the complete configuration for version-publisher.
///
/// Contains where to find the project key, which artifacts are maintained, and the version store location.
/// Holds no tracker credentials and has no default ones.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

fn default_key_file_name() -> String {
    DEFAULT_KEY_FILE_NAME.to_string()
}

/// Where the tracker project key of an artifact lives.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProjectConfig {
    #[serde(default = "default_key_file_name")]
    pub key_file_name: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            key_file_name: default_key_file_name(),
        }
    }
}

/// Which releases update the tracker at all.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct PolicyConfig {
    /// Skip the publish step entirely
    #[serde(default)]
    pub skip: bool,

    /// Artifact id prefixes whose tracker versions are not maintained
    #[serde(default)]
    pub skip_artifacts: Vec<String>,
}

impl PolicyConfig {
    pub fn publish_policy(&self) -> PublishPolicy {
        PublishPolicy::excluding(self.skip_artifacts.iter().cloned())
    }
}

/// Location of the JSON version store.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    /// Anchor a relative store path at `base`
    pub fn resolve_relative_to(&mut self, base: &Path) {
        if let Some(path) = self.path.take() {
            self.path = Some(if path.is_relative() {
                base.join(path)
            } else {
                path
            });
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PublisherError::config(e.to_string()))
    }

    /// Apply overrides from the process environment.
    ///
    /// `VERSION_PUBLISHER_SKIP=true` (any case) turns the skip switch on.
    /// The switch is OR'ed with `policy.skip`, so an explicit `skip = false` in the
    /// config does not win over the environment.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var(SKIP_ENV_VAR) {
            if value.trim().eq_ignore_ascii_case("true") {
                self.policy.skip = true;
            }
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `version-publisher.toml` in current directory
/// 3. `.version-publisher.toml` in user config directory
/// 4. Default configuration if no file found
///
/// A relative `[store] path` is resolved against the directory of the file it came from.
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let source = if let Some(path) = config_path {
        PathBuf::from(path)
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        PathBuf::from(CONFIG_FILE_NAME)
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            config_path
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&source)?;
    let mut config = Config::from_toml(&config_str)?;
    if let Some(base) = source.parent() {
        config.store.resolve_relative_to(base);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.project.key_file_name, ".jira-key");
        assert!(!config.policy.skip);
        assert!(config.policy.skip_artifacts.is_empty());
        assert_eq!(config.store.path, None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml("[policy]\nskip_artifacts = [\"internal-\"]\n").unwrap();
        assert_eq!(config.project.key_file_name, ".jira-key");
        assert!(config.policy.publish_policy().excluded_by("internal-tools").is_some());
    }

    #[test]
    fn test_store_path_resolved_against_base() {
        let mut store = StoreConfig {
            path: Some(PathBuf::from("versions.json")),
        };
        store.resolve_relative_to(Path::new("/etc/publisher"));
        assert_eq!(store.path, Some(PathBuf::from("/etc/publisher/versions.json")));

        let mut absolute = StoreConfig {
            path: Some(PathBuf::from("/var/versions.json")),
        };
        absolute.resolve_relative_to(Path::new("/etc/publisher"));
        assert_eq!(absolute.path, Some(PathBuf::from("/var/versions.json")));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml("[policy\nskip = true").unwrap_err();
        assert!(matches!(err, PublisherError::Config(_)));
    }
}
