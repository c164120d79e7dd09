//! Configuration types and loading.
//!
//! Runtime paths come from [`Config`]; user-facing settings are loaded from
//! TOML config files into [`SessioConfig`].
//!
//! # Example Configuration
//!
//! ```toml
//! [session]
//! name = "webshop"
//!
//! [backend]
//! kind = "files"
//! path = "/var/lib/sessio/sessions"
//! ```
//!
//! A remote cache backend is selected the same way:
//!
//! ```toml
//! [backend]
//! kind = "remote"
//! host = "cache.internal"
//! port = 11211
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::host::types::StorageBackend;

/// Runtime configuration derived from environment variables and system
/// defaults, not from config files.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory for all sessio data (default: ~/.sessio)
    pub sessio_dir: PathBuf,
    /// Log level for the application
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let home_dir = dirs::home_dir().expect("Could not find home directory");

        Self {
            sessio_dir: home_dir.join(".sessio"),
            log_level: std::env::var("SESSIO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default directory for file-backed session records.
    pub fn sessions_dir(&self) -> PathBuf {
        self.sessio_dir.join("sessions")
    }
}

/// Main configuration loaded from TOML config files.
///
/// Loaded from two locations, later one winning per field:
/// 1. User config: `~/.sessio/config.toml`
/// 2. Project config: `./.sessio/config.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessioConfig {
    /// Session naming settings
    #[serde(default)]
    pub session: SessionSettings,

    /// Where the host subsystem persists session data. Absent means the
    /// host's own default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<StorageBackend>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Name sessions are started under when the caller does not pass one.
    #[serde(default = "default_session_name")]
    pub name: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            name: default_session_name(),
        }
    }
}

pub fn default_session_name() -> String {
    "sessio".to_string()
}

impl SessioConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// Missing config files are not errors; parse failures are.
    pub fn load_hierarchy() -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = SessioConfig::default();

        if let Some(user_config) = Self::load_user_config()? {
            config = merge_configs(config, user_config);
        }

        if let Some(project_config) = Self::load_project_config()? {
            config = merge_configs(config, project_config);
        }

        Ok(config)
    }

    fn load_user_config() -> Result<Option<SessioConfig>, Box<dyn std::error::Error>> {
        let home_dir = dirs::home_dir().ok_or("Could not find home directory")?;
        let config_path = home_dir.join(".sessio").join("config.toml");
        Self::load_config_file(&config_path)
    }

    fn load_project_config() -> Result<Option<SessioConfig>, Box<dyn std::error::Error>> {
        let config_path = std::env::current_dir()?.join(".sessio").join("config.toml");
        Self::load_config_file(&config_path)
    }

    fn load_config_file(path: &PathBuf) -> Result<Option<SessioConfig>, Box<dyn std::error::Error>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(format!("Failed to read config file '{}': {}", path.display(), e).into());
            }
        };
        let config: SessioConfig = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;
        Ok(Some(config))
    }
}

/// Merge two configurations, with `override_config` taking precedence.
pub fn merge_configs(base: SessioConfig, override_config: SessioConfig) -> SessioConfig {
    SessioConfig {
        session: SessionSettings {
            // A name left at its default in the override does not mask an
            // explicit name from the base config.
            name: if override_config.session.name != default_session_name() {
                override_config.session.name
            } else {
                base.session.name
            },
        },
        backend: override_config.backend.or(base.backend),
    }
}
