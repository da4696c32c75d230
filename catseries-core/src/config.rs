//! Run configuration — source locations and chart options, stored as TOML.
//!
//! ```toml
//! [sources]
//! a = "http://s3.amazonaws.com/logtrust-static/test/test/data1.json"
//! b = "http://s3.amazonaws.com/logtrust-static/test/test/data2.json"
//! c = "http://s3.amazonaws.com/logtrust-static/test/test/data3.json"
//!
//! [chart]
//! highlight = "CAT 1"
//! ```

use crate::domain::SourceId;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_SOURCE_A: &str = "http://s3.amazonaws.com/logtrust-static/test/test/data1.json";
pub const DEFAULT_SOURCE_B: &str = "http://s3.amazonaws.com/logtrust-static/test/test/data2.json";
pub const DEFAULT_SOURCE_C: &str = "http://s3.amazonaws.com/logtrust-static/test/test/data3.json";
pub const DEFAULT_HIGHLIGHT: &str = "CAT 1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {message}")]
    Read { path: String, message: String },

    #[error("parse config TOML: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Where each source's raw array lives (URL for HTTP, path for files).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocations {
    pub a: String,
    pub b: String,
    pub c: String,
}

impl SourceLocations {
    pub fn get(&self, source: SourceId) -> &str {
        match source {
            SourceId::A => &self.a,
            SourceId::B => &self.b,
            SourceId::C => &self.c,
        }
    }
}

impl Default for SourceLocations {
    fn default() -> Self {
        Self {
            a: DEFAULT_SOURCE_A.into(),
            b: DEFAULT_SOURCE_B.into(),
            c: DEFAULT_SOURCE_C.into(),
        }
    }
}

/// Options for the chart payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// Category whose pie slice is flagged as highlighted. `None` flags nothing.
    #[serde(default)]
    pub highlight: Option<String>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            highlight: Some(DEFAULT_HIGHLIGHT.into()),
        }
    }
}

/// The complete run configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: SourceLocations,
    #[serde(default)]
    pub chart: ChartOptions,
}

impl Config {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("serialize config: {e}")))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for source in SourceId::ALL {
            if self.sources.get(source).trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{source} has an empty location")));
            }
        }
        Ok(())
    }
}
