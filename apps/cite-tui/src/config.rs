//! User configuration
//!
//! Loaded from `config.toml` in the platform config directory
//! (`~/.config/cite/config.toml` on Linux) unless `--config` names a file:
//!
//! ```toml
//! default_style = "harvard"
//! log_file = "/tmp/cite.log"
//! clipboard = ["xclip", "-selection", "primary"]
//! source = """
//! {"author": "Doe, Jane", "title": "Notes", "year": 2011}
//! """
//! ```
//!
//! Every key is optional.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Source text shown when nothing else is configured
pub const SAMPLE_SOURCE: &str = r#"{
  "author": "Smith, John",
  "title": "A Study",
  "year": 2020,
  "publisher": "Acme Press",
  "url": "http://example.com"
}"#;

/// Errors that can occur when loading the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Style selected at startup; unknown ids show the unsupported-style message
    pub default_style: String,
    /// Text pre-filled into the source area
    pub source: String,
    /// Log destination for the TUI
    pub log_file: Option<PathBuf>,
    /// Clipboard tool and arguments; detected per platform when unset
    pub clipboard: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_style: "apa".to_string(),
            source: SAMPLE_SOURCE.to_string(),
            log_file: None,
            clipboard: None,
        }
    }
}

impl Config {
    /// `<config dir>/cite/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cite").join("config.toml"))
    }

    /// Load from an explicit path, or from the default path when it exists.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
