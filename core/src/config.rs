//! Configuration
//!
//! kao reads an optional TOML file from the XDG config dir
//! (`~/.config/kao/config.toml`), then applies environment-variable
//! overrides. Everything has a working default; a missing file is not
//! an error.
//!
//! ```toml
//! # ~/.config/kao/config.toml
//! color_theme = "Kao Mint"
//! diagnostics_path = "/tmp/kao-diagnostics.json"
//! ```

use std::path::PathBuf;

use serde::Deserialize;

/// Errors loading the config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid TOML
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Runtime configuration for the monitor and surface
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct KaoConfig {
    /// Active color-theme name; themes containing "mint" select the
    /// mint palette, everything else is neon
    pub color_theme: String,
    /// Path to the JSON diagnostics dump the monitor watches
    pub diagnostics_path: PathBuf,
}

impl Default for KaoConfig {
    fn default() -> Self {
        Self {
            color_theme: "Kao Neon".to_string(),
            diagnostics_path: PathBuf::from("kao-diagnostics.json"),
        }
    }
}

impl KaoConfig {
    /// Load the config file (if any), then apply env overrides.
    ///
    /// `KAO_COLOR_THEME` and `KAO_DIAGNOSTICS_PATH` override the file.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Load from an explicit file path
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Standard config file location
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kao").join("config.toml"))
    }

    fn apply_env(&mut self) {
        if let Ok(theme) = std::env::var("KAO_COLOR_THEME") {
            self.color_theme = theme;
        }
        if let Ok(path) = std::env::var("KAO_DIAGNOSTICS_PATH") {
            self.diagnostics_path = PathBuf::from(path);
        }
    }
}
