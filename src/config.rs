use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseBumpError, Result};

/// Placeholder substituted with the bumped version in `branch_pattern`.
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Represents the complete configuration for release-bump.
///
/// Every field has a default, so an empty file (or no file at all) yields the
/// stock behaviour: `src/manifest.json`, branch `release-{version}`, commit
/// message `chore: bump version`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub manifest_path: PathBuf,

    pub version_key: String,

    pub branch_pattern: String,

    pub commit_message: String,

    pub rewrite: RewriteMode,

    pub backend: Backend,
}

/// How the manifest text is rewritten once the new version is known.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RewriteMode {
    /// Replace every occurrence of the old version text, wherever it appears.
    #[default]
    AllOccurrences,
    /// Replace only the value of the version member.
    VersionField,
}

/// Which implementation drives version control.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// Shell out to the `git` executable.
    #[default]
    Cli,
    /// Use libgit2 in-process.
    Git2,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            manifest_path: PathBuf::from("src/manifest.json"),
            version_key: "version".to_string(),
            branch_pattern: "release-{version}".to_string(),
            commit_message: "chore: bump version".to_string(),
            rewrite: RewriteMode::default(),
            backend: Backend::default(),
        }
    }
}

impl Config {
    /// Checks invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if !self.branch_pattern.contains(VERSION_PLACEHOLDER) {
            return Err(ReleaseBumpError::config(format!(
                "branch_pattern '{}' must contain {}",
                self.branch_pattern, VERSION_PLACEHOLDER
            )));
        }
        if self.version_key.is_empty() {
            return Err(ReleaseBumpError::config("version_key must not be empty"));
        }
        if self.commit_message.trim().is_empty() {
            return Err(ReleaseBumpError::config("commit_message must not be empty"));
        }
        if self.manifest_path.as_os_str().is_empty() {
            return Err(ReleaseBumpError::config("manifest_path must not be empty"));
        }
        Ok(())
    }

    /// Renders the release branch name for a version string.
    pub fn branch_name(&self, version: &str) -> String {
        self.branch_pattern.replace(VERSION_PLACEHOLDER, version)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasebump.toml` in current directory
/// 3. `.releasebump.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration, validated
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config = match locate_config(config_path) {
        Some(path) => parse_config_file(&path)?,
        None => {
            tracing::debug!("no configuration file found, using defaults");
            Config::default()
        }
    };
    config.validate()?;
    Ok(config)
}

fn locate_config(config_path: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(PathBuf::from(path));
    }

    let local = Path::new("./releasebump.toml");
    if local.exists() {
        return Some(local.to_path_buf());
    }

    dirs::config_dir()
        .map(|dir| dir.join(".releasebump.toml"))
        .filter(|path| path.exists())
}

fn parse_config_file(path: &Path) -> Result<Config> {
    tracing::debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(path)?;
    toml::from_str(&config_str).map_err(|e| {
        ReleaseBumpError::config(format!("Cannot parse {}: {}", path.display(), e))
    })
}
