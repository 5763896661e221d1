//! Byte queue configuration

use serde::Deserialize;

/// Byte queue sizing and growth settings
///
/// The queue starts at `initial_capacity` and grows by `resize_step`
/// whenever its free-space ratio drops to `resize_threshold` or below,
/// never past `max_capacity`.
///
/// # Example
///
/// ```toml
/// [buffer]
/// initial_capacity = 4096
/// resize_step = 2048
/// resize_threshold = 0.2
/// max_capacity = 1048576
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BufferSection {
    /// Starting queue capacity in bytes
    /// Default: 4096
    pub initial_capacity: usize,

    /// Bytes added per growth step
    /// Default: 2048
    pub resize_step: usize,

    /// Free-space ratio at or below which the queue grows
    /// Default: 0.2
    pub resize_threshold: f64,

    /// Hard upper bound on queue capacity
    /// Default: 1 MiB
    pub max_capacity: usize,
}

impl Default for BufferSection {
    fn default() -> Self {
        Self {
            initial_capacity: 4096,
            resize_step: 2048,
            resize_threshold: 0.2,
            max_capacity: 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BufferSection::default();
        assert_eq!(config.initial_capacity, 4096);
        assert_eq!(config.resize_step, 2048);
        assert!((config.resize_threshold - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.max_capacity, 1024 * 1024);
    }
}
