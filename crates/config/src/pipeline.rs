//! Drain/flush task configuration

use serde::Deserialize;

/// What to do with a batch the sink refused after all retries
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WriteFailureMode {
    /// Put the unwritten bytes back at the tail of the queue (default)
    #[default]
    Requeue,
    /// Count and discard the unwritten bytes
    Drop,
}

/// Drain/flush task settings
///
/// # Example
///
/// ```toml
/// [pipeline]
/// batch_capacity = 1024
/// flush_interval_ms = 1000
/// drain_wait_ms = 1000
/// chunk_size = 1024
/// on_write_failure = "requeue"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineSection {
    /// Write batch size in bytes
    /// Default: 1024
    pub batch_capacity: usize,

    /// Upper bound on how long a partial batch may sit unflushed
    /// Default: 1000
    pub flush_interval_ms: u64,

    /// How long one drain iteration waits for data before giving up
    /// Default: 1000
    pub drain_wait_ms: u64,

    /// Largest single write handed to the sink
    /// Default: 1024
    pub chunk_size: usize,

    /// Attempts per chunk before the failure policy applies
    /// Default: 3
    pub max_write_retries: usize,

    /// Pause between retry attempts
    /// Default: 10
    pub retry_delay_ms: u64,

    /// Failure policy: requeue or drop
    /// Default: requeue
    pub on_write_failure: WriteFailureMode,
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            batch_capacity: 1024,
            flush_interval_ms: 1000,
            drain_wait_ms: 1000,
            chunk_size: 1024,
            max_write_retries: 3,
            retry_delay_ms: 10,
            on_write_failure: WriteFailureMode::Requeue,
        }
    }
}
