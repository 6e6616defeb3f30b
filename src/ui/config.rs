//! # Configuration Persistence
//!
//! Manages kiosk configuration stored in `~/.config/convenio/config.json`.
//!
//! ## Overview
//!
//! The [`Config`] struct is serialized to / deserialized from a JSON file in
//! the platform config directory. Every field is optional in the file; a
//! missing file means all defaults.
//!
//! ```json
//! {
//!   "theme": "Catppuccin Latte",
//!   "code_ttl_seconds": 300,
//!   "collection_interval_minutes": 40,
//!   "auto_close_seconds": 3,
//!   "max_token_bytes": 5242880,
//!   "qr_endpoint": "https://api.qrserver.com/v1/create-qr-code/",
//!   "qr_size": 220
//! }
//! ```
//!
//! The `directories` crate is used to resolve the platform-appropriate config
//! directory.

use crate::checkin::qr::DEFAULT_QR_ENDPOINT;
use crate::checkin::settings::{
    Settings, DEFAULT_AUTO_CLOSE_SECONDS, DEFAULT_CODE_TTL_SECONDS,
    DEFAULT_COLLECTION_INTERVAL_MINUTES, DEFAULT_QR_SIZE,
};
use crate::checkin::token::DEFAULT_MAX_TOKEN_BYTES;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application name used for the config and data directories.
pub const APP_NAME: &str = "convenio";

/// Persisted kiosk configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The name of the selected theme (must match a built-in theme name).
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// Lifetime of a generated Clinipam code.
    #[serde(default = "default_code_ttl_seconds")]
    pub code_ttl_seconds: u64,

    /// Minimum time between two Unimed token collections.
    #[serde(default = "default_collection_interval_minutes")]
    pub collection_interval_minutes: u64,

    /// Delay before an accepted modal closes itself. `0` closes at once.
    #[serde(default = "default_auto_close_seconds")]
    pub auto_close_seconds: u64,

    /// Largest accepted token screenshot, in bytes.
    #[serde(default = "default_max_token_bytes")]
    pub max_token_bytes: u64,

    #[serde(default = "default_qr_endpoint")]
    pub qr_endpoint: String,

    #[serde(default = "default_qr_size")]
    pub qr_size: u32,
}

fn default_theme_name() -> String {
    "Catppuccin Latte".to_string()
}

fn default_code_ttl_seconds() -> u64 {
    DEFAULT_CODE_TTL_SECONDS
}

fn default_collection_interval_minutes() -> u64 {
    DEFAULT_COLLECTION_INTERVAL_MINUTES
}

fn default_auto_close_seconds() -> u64 {
    DEFAULT_AUTO_CLOSE_SECONDS
}

fn default_max_token_bytes() -> u64 {
    DEFAULT_MAX_TOKEN_BYTES
}

fn default_qr_endpoint() -> String {
    DEFAULT_QR_ENDPOINT.to_string()
}

fn default_qr_size() -> u32 {
    DEFAULT_QR_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            code_ttl_seconds: default_code_ttl_seconds(),
            collection_interval_minutes: default_collection_interval_minutes(),
            auto_close_seconds: default_auto_close_seconds(),
            max_token_bytes: default_max_token_bytes(),
            qr_endpoint: default_qr_endpoint(),
            qr_size: default_qr_size(),
        }
    }
}

impl Config {
    /// Load configuration from disk. Returns `Config::default()` if the file
    /// does not exist or cannot be parsed.
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "falling back to default config");
                Self::default()
            }
        }
    }

    fn try_load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path. Returns `Config::default()` if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save the current configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Return the path to the config file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", APP_NAME)
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.json"))
    }

    /// The attempt tunables described by this configuration.
    pub fn settings(&self) -> Settings {
        Settings {
            code_ttl_seconds: self.code_ttl_seconds,
            collection_interval_seconds: self.collection_interval_minutes.saturating_mul(60),
            auto_close_seconds: self.auto_close_seconds,
            max_token_bytes: self.max_token_bytes,
            qr_endpoint: self.qr_endpoint.clone(),
            qr_size: self.qr_size,
        }
    }
}
