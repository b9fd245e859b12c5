//! Bootstrap configuration loading
//!
//! TOML config file discovery and parsing. The file is optional: every
//! setting has a built-in default, and higher-priority sources
//! (environment variables, command-line flags) are overlaid by the
//! service's own resolution step.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Bootstrap configuration loaded from a TOML file
///
/// These settings cannot change during runtime. The service must
/// restart to pick up changes to the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Vendor analysis endpoint URL
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Vendor API user credential
    #[serde(default)]
    pub api_user: Option<String>,

    /// Vendor API secret credential
    #[serde(default)]
    pub api_secret: Option<String>,

    /// Comma-separated vendor model list
    #[serde(default)]
    pub models: Option<String>,
}

impl TomlConfig {
    /// Load configuration from an explicit path
    ///
    /// Fails if the file is missing or malformed; callers that treat
    /// the file as optional should use [`TomlConfig::load_default`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        let config: TomlConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Cannot parse {}: {}", path.display(), e)))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from the default per-platform location
    ///
    /// A missing config file is not an error; defaults apply.
    pub fn load_default() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load(&path),
            None => Ok(TomlConfig::default()),
        }
    }
}

/// Locate the config file for the platform
///
/// Linux: `~/.config/aidet/config.toml`, then `/etc/aidet/config.toml`.
/// macOS/Windows: the user config directory only.
fn find_config_file() -> Option<PathBuf> {
    if let Some(path) = dirs::config_dir().map(|d| d.join("aidet").join("config.toml")) {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/aidet/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}
