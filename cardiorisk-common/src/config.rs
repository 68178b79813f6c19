//! Bootstrap configuration
//!
//! Each setting is resolved once at startup in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Tiers 1 and 2 arrive together as [`ConfigOverrides`], parsed by the
//! binary. A missing TOML file is not an error; a TOML file that exists but
//! does not parse is. Resolution runs before logging is installed, so it
//! logs nothing itself: anything worth reporting is recorded on
//! [`ServiceConfig`] for the caller to log.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MODEL_PATH: &str = "myocardial_model.json";
pub const DEFAULT_IMPUTER_PATH: &str = "imputer.json";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Contents of the optional TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[artifacts]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactsConfig {
    /// Classifier artifact path
    #[serde(default)]
    pub model_path: Option<PathBuf>,

    /// Imputer artifact path
    #[serde(default)]
    pub imputer_path: Option<PathBuf>,
}

/// `[logging]` table
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` takes precedence
    #[serde(default)]
    pub level: Option<String>,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub model_path: Option<PathBuf>,
    pub imputer_path: Option<PathBuf>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub imputer_path: PathBuf,
    pub log_level: String,
    /// TOML file that contributed settings, if any
    pub config_file: Option<PathBuf>,
    /// Explicitly requested TOML file that did not exist
    pub missing_config_file: Option<PathBuf>,
}

impl ServiceConfig {
    /// Resolve configuration from overrides, the TOML file, and defaults
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self> {
        let config_file = overrides
            .config_file
            .clone()
            .or_else(default_config_file);

        let mut missing_config_file = None;
        let (toml_config, used_file) = match config_file {
            Some(path) if path.exists() => (load_toml_config(&path)?, Some(path)),
            Some(path) => {
                // The platform default is optional; only a requested file is reported
                if overrides.config_file.is_some() {
                    missing_config_file = Some(path);
                }
                (TomlConfig::default(), None)
            }
            None => (TomlConfig::default(), None),
        };

        let mut config = Self::merge(overrides, toml_config, used_file);
        config.missing_config_file = missing_config_file;
        Ok(config)
    }

    fn merge(overrides: &ConfigOverrides, toml: TomlConfig, config_file: Option<PathBuf>) -> Self {
        Self {
            host: overrides
                .host
                .clone()
                .or(toml.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(toml.port).unwrap_or(DEFAULT_PORT),
            model_path: overrides
                .model_path
                .clone()
                .or(toml.artifacts.model_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH)),
            imputer_path: overrides
                .imputer_path
                .clone()
                .or(toml.artifacts.imputer_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IMPUTER_PATH)),
            log_level: toml
                .logging
                .level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            config_file,
            missing_config_file: None,
        }
    }

    /// Socket address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Platform config file location, e.g. `~/.config/cardiorisk/config.toml`
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cardiorisk").join("config.toml"))
}
