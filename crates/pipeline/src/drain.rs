//! Drain/flush task
//!
//! The consumer side of the pipeline. Each iteration: check whether the
//! queue should grow, pop whatever bytes are available (waiting up to the
//! drain timeout), fold them into the write batch - flushing whenever the
//! batch fills - and flush a non-empty batch once the cadence elapses.
//!
//! The task runs until the pipeline is shut down, then drains the queue,
//! flushes the remainder, and reports final metrics. Sink failures are
//! handled here and never escalate to process termination.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use portlog_buffer::{ByteQueue, GrowthPolicy};
use portlog_sinks::{ByteSink, SinkError};

use crate::batch::WriteBatch;
use crate::config::{PipelineConfig, WriteFailurePolicy};
use crate::metrics::{MetricsSnapshot, PipelineMetrics};

pub(crate) struct DrainTask {
    queue: Arc<ByteQueue>,
    policy: GrowthPolicy,
    sink: Box<dyn ByteSink>,
    config: PipelineConfig,
    metrics: Arc<PipelineMetrics>,
    cancel: CancellationToken,
    batch: WriteBatch,
    /// When the oldest byte in the batch arrived; None while empty.
    batch_since: Option<Instant>,
}

impl DrainTask {
    pub(crate) fn new(
        queue: Arc<ByteQueue>,
        policy: GrowthPolicy,
        sink: Box<dyn ByteSink>,
        config: PipelineConfig,
        metrics: Arc<PipelineMetrics>,
        cancel: CancellationToken,
    ) -> Self {
        let batch = WriteBatch::new(config.batch_capacity);
        Self {
            queue,
            policy,
            sink,
            config,
            metrics,
            cancel,
            batch,
            batch_since: None,
        }
    }

    pub(crate) async fn run(mut self) -> MetricsSnapshot {
        tracing::info!(
            queue_capacity = self.queue.capacity(),
            batch_capacity = self.batch.capacity(),
            flush_interval_ms = self.config.flush_interval.as_millis() as u64,
            "drain task started"
        );

        loop {
            self.check_resize();

            // A non-empty batch caps the wait at its flush deadline, so a
            // drain wait longer than the flush interval cannot pin bytes
            // past one interval.
            let wait = match self.batch_since {
                Some(since) => self
                    .config
                    .drain_wait
                    .min(self.config.flush_interval.saturating_sub(since.elapsed())),
                None => self.config.drain_wait,
            };
            let drained = tokio::select! {
                _ = self.cancel.cancelled() => break,
                drained = self.queue.pop_available(wait) => drained,
            };
            if !drained.is_empty() {
                self.metrics.record_drained(drained.len() as u64);
                self.absorb(&drained).await;
            }

            // Timed flush: a partial batch never sits longer than one
            // flush interval.
            if let Some(since) = self.batch_since {
                if since.elapsed() >= self.config.flush_interval {
                    self.flush_batch().await;
                }
            }
        }

        // Shutdown: the queue is closed, so this drains to empty.
        loop {
            let rest = self.queue.pop_available(Duration::ZERO).await;
            if rest.is_empty() {
                break;
            }
            self.metrics.record_drained(rest.len() as u64);
            self.absorb(&rest).await;
        }
        self.flush_batch().await;
        if let Err(e) = self.sink.flush() {
            tracing::error!(error = %e, "final sink flush failed");
        }

        let snapshot = self.metrics.snapshot();
        tracing::info!(
            bytes_pushed = snapshot.bytes_pushed,
            bytes_written = snapshot.bytes_written,
            flushes = snapshot.flushes,
            write_errors = snapshot.write_errors,
            queue_grows = snapshot.queue_grows,
            "drain task stopped"
        );
        snapshot
    }

    /// Grow the queue when its free-space ratio is at the threshold.
    fn check_resize(&self) {
        match self.policy.check(&self.queue) {
            Ok(true) => self.metrics.record_queue_grow(),
            Ok(false) => {}
            // Already logged by the policy; next iteration retries.
            Err(_) => self.metrics.record_resize_failure(),
        }
    }

    /// Fold drained bytes into the batch, flushing whenever it fills.
    ///
    /// Bytes that do not fit flush the current batch first; bytes larger
    /// than the whole batch stream through it in batch-sized pieces.
    async fn absorb(&mut self, mut bytes: &[u8]) {
        while !bytes.is_empty() {
            if bytes.len() > self.batch.remaining() && !self.batch.is_empty() {
                self.flush_batch().await;
            }
            let copied = self.batch.append(bytes);
            bytes = &bytes[copied..];
            if self.batch_since.is_none() {
                self.batch_since = Some(Instant::now());
            }
            if self.batch.remaining() == 0 && !bytes.is_empty() {
                self.flush_batch().await;
            }
        }
    }

    /// Write the batch to the sink in fixed-size chunks, then reset it.
    ///
    /// A chunk that still fails after all retries aborts the flush; the
    /// unwritten remainder is requeued or dropped per the configured
    /// policy.
    async fn flush_batch(&mut self) {
        if self.batch.is_empty() {
            return;
        }

        let data = self.batch.as_slice();
        let retries = self.config.max_write_retries.max(1);
        let mut written = 0;
        let mut failed = false;

        for chunk in data.chunks(self.config.chunk_size) {
            match write_with_retry(self.sink.as_mut(), chunk, retries, self.config.retry_delay)
                .await
            {
                Ok(()) => {
                    written += chunk.len();
                    self.metrics.record_chunk_written(chunk.len() as u64);
                }
                Err(e) => {
                    self.metrics.record_write_error();
                    tracing::error!(
                        error = %e,
                        written,
                        batch_len = data.len(),
                        "sink write failed after retries"
                    );
                    failed = true;
                    break;
                }
            }
        }

        if failed {
            let unwritten = &data[written..];
            match self.config.on_write_failure {
                WriteFailurePolicy::Requeue => match self.queue.try_push(unwritten) {
                    Ok(()) => {
                        self.metrics.record_requeued(unwritten.len() as u64);
                        tracing::warn!(bytes = unwritten.len(), "unwritten batch requeued");
                    }
                    Err(e) => {
                        self.metrics.record_dropped(unwritten.len() as u64);
                        tracing::error!(
                            bytes = unwritten.len(),
                            error = %e,
                            "requeue rejected, unwritten batch dropped"
                        );
                    }
                },
                WriteFailurePolicy::Drop => {
                    self.metrics.record_dropped(unwritten.len() as u64);
                    tracing::error!(bytes = unwritten.len(), "unwritten batch dropped");
                }
            }
        } else {
            self.metrics.record_flush();
        }

        self.batch.clear();
        self.batch_since = None;
    }
}

/// Write one chunk, retrying transient failures a bounded number of times.
///
/// A short write is not retried: the sink already persisted a prefix of the
/// chunk, so resubmitting the whole chunk would duplicate those bytes.
pub(crate) async fn write_with_retry(
    sink: &mut dyn ByteSink,
    chunk: &[u8],
    max_attempts: usize,
    retry_delay: Duration,
) -> Result<(), SinkError> {
    let mut attempt = 0;
    loop {
        match sink.append_chunk(chunk) {
            Ok(()) => return Ok(()),
            Err(e @ SinkError::ShortWrite { .. }) => return Err(e),
            Err(e) => {
                attempt += 1;
                if attempt >= max_attempts {
                    return Err(e);
                }
                tracing::warn!(
                    attempt,
                    max_attempts,
                    error = %e,
                    "chunk write failed, retrying"
                );
                tokio::time::sleep(retry_delay).await;
            }
        }
    }
}
