use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::DEFAULT_REPOSITORY_ROOT;

/// Default name of the helper configuration file.
pub const CONFIG_FILE_NAME: &str = "debrepo.toml";

/// Helper configuration loaded from `debrepo.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HelperConfig {
    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub rules: RulesConfig,
}

/// System repository settings from `[repository]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default = "default_repository_root")]
    pub root: PathBuf,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            root: default_repository_root(),
        }
    }
}

fn default_repository_root() -> PathBuf {
    PathBuf::from(DEFAULT_REPOSITORY_ROOT)
}

/// Rule sources from `[rules]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default = "default_rules_path")]
    pub rules: PathBuf,
    #[serde(default = "default_ignore_rules_path", rename = "ignore-rules")]
    pub ignore_rules: PathBuf,
    /// Append the built-in substitution rules after the file rules.
    #[serde(default = "default_defaults")]
    pub defaults: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            rules: default_rules_path(),
            ignore_rules: default_ignore_rules_path(),
            defaults: true,
        }
    }
}

fn default_rules_path() -> PathBuf {
    PathBuf::from("debian/maven.rules")
}

fn default_ignore_rules_path() -> PathBuf {
    PathBuf::from("debian/maven.ignoreRules")
}

fn default_defaults() -> bool {
    true
}

impl HelperConfig {
    /// Load the configuration from `path`, or return defaults if the file doesn't exist.
    pub fn load(path: &Path) -> miette::Result<Self> {
        match debrepo_util::fs::read_optional(path) {
            Ok(Some(content)) => Self::parse_toml(&content).map_err(|e| {
                debrepo_util::errors::DebrepoError::Configuration {
                    message: format!("{}: {e}", path.display()),
                }
                .into()
            }),
            Ok(None) => Ok(Self::default()),
            Err(e) => Err(debrepo_util::errors::DebrepoError::Configuration {
                message: format!("Failed to read {}: {e}", path.display()),
            }
            .into()),
        }
    }

    pub fn parse_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
