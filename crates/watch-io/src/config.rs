//! TOML configuration.
//!
//! ```toml
//! [constraints]
//! title_min = 4
//! title_max = 256
//!
//! [log]
//! filter = "info"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use watch_patch::WatchConstraints;

/// Environment variable overriding `log.filter`.
pub const LOG_ENV: &str = "WATCH_LOG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub constraints: WatchConstraints,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `warn` or `watch_patch=debug`.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { filter: "warn".to_string() }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid constraints: {0}")]
    Invalid(String),
}

pub fn parse_config_str(s: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(s).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    check_constraints(&config.constraints)?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config_str(&contents, path)
}

/// Load `path` when given, defaults otherwise, then apply env overrides.
pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => load_config(p)?,
        None => Config::default(),
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

pub fn apply_env_overrides(config: &mut Config) {
    if let Ok(raw) = std::env::var(LOG_ENV) {
        apply_log_override(config, &raw);
    }
}

fn apply_log_override(config: &mut Config, raw: &str) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        tracing::warn!("empty {LOG_ENV}, ignoring");
        return;
    }
    config.log.filter = trimmed.to_string();
}

fn check_constraints(c: &WatchConstraints) -> Result<(), ConfigError> {
    if c.title_min > c.title_max {
        return Err(ConfigError::Invalid(format!(
            "title_min ({}) exceeds title_max ({})",
            c.title_min, c.title_max
        )));
    }
    if c.description_min > c.description_max {
        return Err(ConfigError::Invalid(format!(
            "description_min ({}) exceeds description_max ({})",
            c.description_min, c.description_max
        )));
    }
    Ok(())
}
