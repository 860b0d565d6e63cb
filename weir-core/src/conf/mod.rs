mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeirConfig {
    /// Log feed location. Absent means stdin.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Idle bound on a blocking tail call, e.g. "30s". Absent waits forever.
    #[serde(default, with = "humantime_serde::option")]
    pub timeout: Option<Duration>,

    /// Reserved for a polling mode. Parsed and carried, not yet consulted.
    #[serde(default = "default_period", with = "humantime_serde")]
    pub period: Duration,

    /// Accept records from the client-facing side.
    #[serde(default = "default_enabled")]
    pub client: bool,

    /// Accept records from the backend-facing side.
    #[serde(default = "default_enabled")]
    pub backend: bool,

    #[serde(default)]
    pub sink: SinkConfig,
}

fn default_period() -> Duration {
    Duration::from_secs(1)
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SinkConfig {
    #[serde(default)]
    pub kind: SinkKind,

    /// Required for `kind = "file"`.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Stdout,
    File,
}

impl Default for WeirConfig {
    fn default() -> Self {
        Self {
            path: None,
            timeout: None,
            period: default_period(),
            client: true,
            backend: true,
            sink: SinkConfig::default(),
        }
    }
}

impl WeirConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config: WeirConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::parse(path, e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.client && !self.backend {
            return Err(ConfigError::NoDirections);
        }
        if self.sink.kind == SinkKind::File && self.sink.path.is_none() {
            return Err(ConfigError::SinkFileMissingPath);
        }
        Ok(())
    }
}
