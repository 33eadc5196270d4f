//! dumpctl configuration.
//!
//! Configuration lives in `<config dir>/dumpctl/config.toml`, or wherever
//! `DUMPCTL_CONFIG` points. A missing default file means defaults; a missing
//! explicit file is an error.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DumpError;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "DUMPCTL_CONFIG";
const CONFIG_DIR: &str = "dumpctl";
const CONFIG_FILE: &str = "config.toml";

/// Normalizer settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Deepest nesting level to descend into. Unbounded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// tracing filter directive, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Pretty-print JSON-RPC envelopes
    #[serde(default)]
    pub rpc_pretty: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpConfig {
    #[serde(default)]
    pub normalizer: NormalizerConfig,

    #[serde(default)]
    pub log: LogSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

impl DumpConfig {
    /// Default config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load from `DUMPCTL_CONFIG` or the default location.
    pub fn load() -> Result<Self, DumpError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load_from(Path::new(&path));
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, DumpError> {
        let content = fs::read_to_string(path).map_err(|e| {
            DumpError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, DumpError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), DumpError> {
        if self.normalizer.max_depth == Some(0) {
            return Err(DumpError::Config(
                "normalizer.max_depth must be at least 1".to_string(),
            ));
        }
        if self.log.level.trim().is_empty() {
            return Err(DumpError::Config("log.level must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, DumpError> {
        toml::to_string_pretty(self).map_err(|e| DumpError::Config(e.to_string()))
    }
}
