//! Portlog Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! Minimal config should just work - only specify what you need to change.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use portlog_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[source]\npath = \"/dev/ttyUSB0\"").unwrap();
//! ```
//!
//! # Example Minimal Config
//!
//! ```toml
//! [source]
//! path = "/dev/ttyUSB0"
//!
//! [sink]
//! path = "capture.log"
//! ```
//!
//! # Example Full Config
//!
//! See `configs/example.toml` for all available options.

mod buffer;
mod error;
mod logging;
mod pipeline;
mod sink;
mod source;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use buffer::BufferSection;
pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogLevel};
pub use pipeline::{PipelineSection, WriteFailureMode};
pub use sink::SinkSection;
pub use source::SourceConfig;

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub log: LogConfig,

    /// Capture source (device node or file)
    pub source: SourceConfig,

    /// Byte queue sizing and growth
    pub buffer: BufferSection,

    /// Drain/flush task behavior
    pub pipeline: PipelineSection,

    /// Storage sink
    pub sink: SinkSection,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or contains invalid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
