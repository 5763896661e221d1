//! Storage sink configuration

use serde::Deserialize;

fn default_path() -> String {
    "capture.log".to_string()
}

/// Storage sink settings
///
/// The output file is opened in append mode, so restarting never
/// truncates an earlier session.
///
/// # Example
///
/// ```toml
/// [sink]
/// path = "capture.log"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SinkSection {
    /// Output file path
    /// Default: capture.log
    pub path: String,
}

impl Default for SinkSection {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path() {
        assert_eq!(SinkSection::default().path, "capture.log");
    }
}
