//! Pipeline configuration

use std::time::Duration;

use portlog_buffer::BufferConfig;

/// Default write batch capacity (1 KiB)
pub const DEFAULT_BATCH_CAPACITY: usize = 1024;

/// Default flush cadence
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(1);

/// Default sink chunk size (1 KiB)
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Default write retry attempts before the failure policy applies
pub const DEFAULT_WRITE_RETRIES: usize = 3;

/// Default delay between retries
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(10);

/// What to do with batch bytes the sink refused after all retries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteFailurePolicy {
    /// Push the unwritten bytes back into the queue (space permitting).
    /// Bytes the producer pushed while the failed batch was in flight end
    /// up ahead of the requeued bytes - the tradeoff favors no loss over
    /// strict order after a storage fault.
    #[default]
    Requeue,

    /// Drop the unwritten bytes and count them.
    Drop,
}

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Queue sizing and growth parameters
    pub buffer: BufferConfig,

    /// Capacity of the drain task's scratch batch
    pub batch_capacity: usize,

    /// Maximum age of a non-empty batch before it is flushed
    pub flush_interval: Duration,

    /// How long one drain call waits for data. Kept separate from
    /// `flush_interval` so "wait for data" and "maximum flush latency" can
    /// be tuned independently.
    pub drain_wait: Duration,

    /// Sink chunk size per write call
    pub chunk_size: usize,

    /// Write attempts per chunk before the failure policy applies
    pub max_write_retries: usize,

    /// Delay between retry attempts
    pub retry_delay: Duration,

    /// Disposition of unwritten batch bytes after a failed flush
    pub on_write_failure: WriteFailurePolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            buffer: BufferConfig::default(),
            batch_capacity: DEFAULT_BATCH_CAPACITY,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            drain_wait: DEFAULT_FLUSH_INTERVAL,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_write_retries: DEFAULT_WRITE_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            on_write_failure: WriteFailurePolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Set the batch capacity.
    #[must_use]
    pub fn with_batch_capacity(mut self, capacity: usize) -> Self {
        self.batch_capacity = capacity;
        self
    }

    /// Set flush cadence and drain wait together.
    #[must_use]
    pub fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self.drain_wait = interval;
        self
    }

    /// Set the sink chunk size.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the write failure policy.
    #[must_use]
    pub fn with_write_failure_policy(mut self, policy: WriteFailurePolicy) -> Self {
        self.on_write_failure = policy;
        self
    }
}
