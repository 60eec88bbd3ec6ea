//! Pipeline configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) gives the
//! reference behavior: duplicate argument orders are rejected, files are processed
//! one at a time, and errors are only reported to the caller's sink.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// What to do when two edges share both their target and their order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateOrderPolicy {
    /// Fail validation with `ValidationError::DuplicateOrder`.
    #[default]
    Reject,
    /// Accept the graph; tied arguments are rendered in edge insertion order.
    Allow,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub duplicate_orders: DuplicateOrderPolicy,
    /// Process batch files on the rayon pool instead of sequentially.
    pub parallel: bool,
    /// Append-only error log. `None` keeps errors in the caller's sink only.
    pub error_log: Option<PathBuf>,
    /// Largest prefix expression, in bytes, a root may render to. A file with a
    /// larger root is rejected. `None` renders without limit.
    pub max_expression_len: Option<usize>,
}

impl PipelineConfig {
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(log) = &self.error_log {
            if log.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("error_log path must not be empty".into()));
            }
        }
        if self.max_expression_len == Some(0) {
            return Err(ConfigError::Invalid("max_expression_len must be positive".into()));
        }
        Ok(())
    }
}
