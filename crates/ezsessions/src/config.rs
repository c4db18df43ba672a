//! Configuration file support for ezsessions.
//!
//! Loads `ezsessions.toml` from the working directory, falling back to the
//! user config directory.

use anyhow::{Context, Result};
use ezsessions_core::{ConfigError, SearchSettings};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration loaded from `ezsessions.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Audit log to read sessions from
    pub audit_log: Option<PathBuf>,
    /// EZproxy executable used for the kill subcommand
    pub ezproxy_binary: Option<PathBuf>,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Delay and retry budget for session queries
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    pub delay_secs: Option<i64>,
    pub retries: Option<i64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<PathBuf>,
}

/// The config file name
pub const CONFIG_FILE_NAME: &str = "ezsessions.toml";

impl ProjectConfig {
    /// Load configuration from the working directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        let config_path = working_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        Self::load_from(&config_path).map(Some)
    }

    /// Load configuration from an explicit path, which must exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(config)
    }

    /// Find the configuration to use.
    /// Priority: explicit path > working directory > user config dir > defaults
    pub fn discover(explicit: Option<&Path>, working_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        if let Some(config) = Self::load(working_dir)? {
            return Ok(config);
        }

        if let Some(user_dir) = dirs::config_dir().map(|d| d.join("ezsessions")) {
            if let Some(config) = Self::load(&user_dir)? {
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Build search settings, letting command-line values win over the file.
    /// Unset values keep their defaults.
    pub fn search_settings(
        &self,
        delay_secs: Option<i64>,
        retries: Option<i64>,
    ) -> Result<SearchSettings, ConfigError> {
        let mut settings = SearchSettings::default();

        if let Some(delay) = delay_secs.or(self.search.delay_secs) {
            settings.set_delay_secs(delay)?;
        }
        if let Some(retries) = retries.or(self.search.retries) {
            settings.set_retries(retries)?;
        }

        Ok(settings)
    }
}
