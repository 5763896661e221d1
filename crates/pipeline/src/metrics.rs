//! Pipeline metrics

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shared by the producer handle and the drain task
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    /// Bytes accepted by the producer interface
    bytes_pushed: AtomicU64,

    /// Bytes removed from the queue by the drain task
    bytes_drained: AtomicU64,

    /// Bytes the sink accepted
    bytes_written: AtomicU64,

    /// Sink chunk calls
    chunks_written: AtomicU64,

    /// Batch flushes (full or timed)
    flushes: AtomicU64,

    /// Chunk writes that failed after all retries
    write_errors: AtomicU64,

    /// Bytes requeued after a failed flush
    bytes_requeued: AtomicU64,

    /// Bytes dropped after a failed flush
    bytes_dropped: AtomicU64,

    /// Queue capacity grows
    queue_grows: AtomicU64,

    /// Failed resize attempts
    resize_failures: AtomicU64,
}

impl PipelineMetrics {
    /// Create new metrics instance
    pub const fn new() -> Self {
        Self {
            bytes_pushed: AtomicU64::new(0),
            bytes_drained: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
            chunks_written: AtomicU64::new(0),
            flushes: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
            bytes_requeued: AtomicU64::new(0),
            bytes_dropped: AtomicU64::new(0),
            queue_grows: AtomicU64::new(0),
            resize_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_pushed(&self, bytes: u64) {
        self.bytes_pushed.fetch_add(bytes, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_drained(&self, bytes: u64) {
        self.bytes_drained.fetch_add(bytes, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_chunk_written(&self, bytes: u64) {
        self.chunks_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_flush(&self) {
        self.flushes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_write_error(&self) {
        self.write_errors.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_requeued(&self, bytes: u64) {
        self.bytes_requeued.fetch_add(bytes, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_dropped(&self, bytes: u64) {
        self.bytes_dropped.fetch_add(bytes, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_queue_grow(&self) {
        self.queue_grows.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_resize_failure(&self) {
        self.resize_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            bytes_pushed: self.bytes_pushed.load(Ordering::Relaxed),
            bytes_drained: self.bytes_drained.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            chunks_written: self.chunks_written.load(Ordering::Relaxed),
            flushes: self.flushes.load(Ordering::Relaxed),
            write_errors: self.write_errors.load(Ordering::Relaxed),
            bytes_requeued: self.bytes_requeued.load(Ordering::Relaxed),
            bytes_dropped: self.bytes_dropped.load(Ordering::Relaxed),
            queue_grows: self.queue_grows.load(Ordering::Relaxed),
            resize_failures: self.resize_failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of pipeline metrics
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub bytes_pushed: u64,
    pub bytes_drained: u64,
    pub bytes_written: u64,
    pub chunks_written: u64,
    pub flushes: u64,
    pub write_errors: u64,
    pub bytes_requeued: u64,
    pub bytes_dropped: u64,
    pub queue_grows: u64,
    pub resize_failures: u64,
}
