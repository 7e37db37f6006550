//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/vaultkey/config.toml)
//! 3. Environment variables (VAULTKEY_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::Vault;
use crate::vault::parse_vaults;

/// Environment variable prefix
const ENV_PREFIX: &str = "VAULTKEY";

/// Default number of results shown per search
pub const DEFAULT_RESULT_LIMIT: usize = 8;

/// Launcher keywords for each mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keywords {
    /// Search notes by name
    pub search: String,
    /// Search notes by content
    pub search_content: String,
    /// Open today's daily note
    pub daily: String,
    /// Quick capture
    pub capture: String,
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            search: "on".to_string(),
            search_content: "os".to_string(),
            daily: "od".to_string(),
            capture: "oq".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Comma-separated vault root directories
    #[serde(default)]
    pub vaults: String,

    #[serde(default)]
    pub keywords: Keywords,

    /// Maximum number of notes listed per search
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,

    /// Note that quick capture appends to; empty means today's daily note
    #[serde(default)]
    pub quick_capture_note: String,

    /// Log file (defaults to debug.log in the data directory)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vaults: String::new(),
            keywords: Keywords::default(),
            result_limit: DEFAULT_RESULT_LIMIT,
            quick_capture_note: String::new(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (VAULTKEY_VAULTS, VAULTKEY_RESULT_LIMIT,
    ///    VAULTKEY_QUICK_CAPTURE_NOTE)
    /// 2. Config file (~/.config/vaultkey/config.toml or VAULTKEY_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        // VAULTKEY_VAULTS
        if let Ok(val) = std::env::var(format!("{}_VAULTS", ENV_PREFIX)) {
            self.vaults = val;
        }

        // VAULTKEY_RESULT_LIMIT
        if let Ok(val) = std::env::var(format!("{}_RESULT_LIMIT", ENV_PREFIX)) {
            self.result_limit = val
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}_RESULT_LIMIT: {:?}", ENV_PREFIX, val))?;
        }

        // VAULTKEY_QUICK_CAPTURE_NOTE
        if let Ok(val) = std::env::var(format!("{}_QUICK_CAPTURE_NOTE", ENV_PREFIX)) {
            self.quick_capture_note = val;
        }

        Ok(())
    }

    /// Configured vaults, in configuration order
    pub fn vaults(&self) -> Vec<Vault> {
        parse_vaults(&self.vaults)
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with VAULTKEY_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vaultkey")
            .join("config.toml")
    }

    /// Log file path, falling back to the data directory
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| default_data_dir().join("debug.log"))
    }
}

fn default_result_limit() -> usize {
    DEFAULT_RESULT_LIMIT
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vaultkey")
}
