//! Capture source configuration

use serde::Deserialize;

fn default_path() -> String {
    "/dev/ttyUSB0".to_string()
}

fn default_read_chunk() -> usize {
    256
}

fn default_max_read_chunk() -> usize {
    1024
}

fn default_timestamps() -> bool {
    true
}

/// Capture source settings
///
/// The path is opened read-only; for a serial device the port must
/// already be configured (baud rate, framing) by the OS or an external
/// tool.
///
/// # Example
///
/// ```toml
/// [source]
/// path = "/dev/ttyUSB0"
/// read_chunk = 256
/// max_read_chunk = 1024
/// timestamps = true
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Device node or file to read from
    /// Default: /dev/ttyUSB0
    pub path: String,

    /// Buffer size for the first read
    /// Default: 256
    pub read_chunk: usize,

    /// Cap for the adaptive read buffer
    /// Default: 1024
    pub max_read_chunk: usize,

    /// Frame each read as a timestamped line
    /// Default: true
    pub timestamps: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            read_chunk: default_read_chunk(),
            max_read_chunk: default_max_read_chunk(),
            timestamps: default_timestamps(),
        }
    }
}
