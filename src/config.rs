//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/gentree/gentree.toml`
//! 3. Local config: a file passed explicitly (e.g. `--config`)
//! 4. Environment variables: `GENTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config error: {message}")]
    Config { message: String },
}

/// Settings for trees created by the library and the demo binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Trace every visited and released node, render the flat debug listing
    pub debug_messages: bool,
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub debug_messages: Option<bool>,
}

/// Get the XDG config directory for gentree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gentree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("gentree.toml"))
}

fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|e| SettingsError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: config::ConfigError) -> SettingsError {
    SettingsError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            debug_messages: overlay.debug_messages.unwrap_or(self.debug_messages),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// A `local` file that does not exist is an error; a missing global file is not.
    pub fn load(local: Option<&Path>) -> Result<Self, SettingsError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("Loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(local_path) = local {
            debug!("Loading local config: {}", local_path.display());
            current = current.merge_with(&load_raw_settings(local_path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply GENTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("GENTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_bool("debug_messages") {
            settings.debug_messages = val;
        }

        Ok(settings)
    }

    /// Serialize as TOML, the format read by [`Settings::load`].
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Config {
            message: format!("serialize: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_base_when_unspecified() {
        let base = Settings {
            debug_messages: true,
        };
        assert_eq!(base.merge_with(&RawSettings::default()), base);
        assert_eq!(
            base.merge_with(&RawSettings {
                debug_messages: Some(false)
            }),
            Settings::default()
        );
    }

    #[test]
    fn test_to_toml() {
        let s = Settings {
            debug_messages: true,
        };
        assert_eq!(s.to_toml().unwrap().trim(), "debug_messages = true");
    }
}
