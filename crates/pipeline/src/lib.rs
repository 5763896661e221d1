//! Portlog - Pipeline
//!
//! The buffering-and-persistence pipeline connecting serial capture to
//! storage.
//!
//! # Architecture
//!
//! ```text
//! [Capture] --write()--> [ByteQueue] --pop_available()--> [Drain task] --chunks--> [ByteSink]
//!                 ▲           │                               │
//!                 │           └── GrowthPolicy (resize check) │
//!                 └────────── backpressure wakeups ───────────┘
//! ```
//!
//! # Key Design
//!
//! - **One lock, no I/O under it**: producer and drain task share the
//!   queue's mutex for pointer/length/copy operations only; sink calls
//!   happen outside it, so storage latency never blocks capture.
//! - **Backpressure**: [`Producer::write`] suspends while the queue lacks
//!   space and is woken after every successful drain.
//! - **Batching**: drained bytes accumulate in a bounded scratch batch that
//!   is flushed when full and on a fixed cadence, bounding data-at-rest
//!   latency to one flush interval.
//! - **Chunked writes**: each flush goes to the sink in fixed-size chunks
//!   to bound per-call latency.
//! - **Explicit shutdown**: closing the pipeline rejects further writes,
//!   drains the queue, flushes the batch, and returns final metrics.
//!
//! # Example
//!
//! ```ignore
//! use portlog_pipeline::{Pipeline, PipelineConfig};
//! use portlog_sinks::FileSink;
//!
//! let sink = FileSink::open("capture.log")?;
//! let (producer, handle) = Pipeline::start(PipelineConfig::default(), Box::new(sink));
//!
//! producer.write(b"[00:00:01.042] boot ok\n").await?;
//!
//! let snapshot = handle.shutdown().await;
//! assert_eq!(snapshot.bytes_written, 23);
//! ```

mod batch;
mod config;
mod drain;
mod error;
mod metrics;
mod producer;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use portlog_buffer::{ByteQueue, GrowthPolicy};
use portlog_sinks::ByteSink;

pub use config::{PipelineConfig, WriteFailurePolicy};
pub use error::{PipelineError, Result};
pub use metrics::{MetricsSnapshot, PipelineMetrics};
pub use producer::Producer;

use drain::DrainTask;

/// The assembled pipeline.
pub struct Pipeline;

impl Pipeline {
    /// Build the shared queue, spawn the drain task, and return the producer
    /// handle plus the lifecycle handle.
    pub fn start(
        config: PipelineConfig,
        sink: Box<dyn ByteSink>,
    ) -> (Producer, PipelineHandle) {
        let queue = Arc::new(ByteQueue::new(config.buffer.initial_capacity));
        let policy = GrowthPolicy::new(&config.buffer);
        let metrics = Arc::new(PipelineMetrics::new());
        let cancel = CancellationToken::new();

        let producer = Producer::new(Arc::clone(&queue), Arc::clone(&metrics));
        let task = DrainTask::new(
            Arc::clone(&queue),
            policy,
            sink,
            config,
            Arc::clone(&metrics),
            cancel.clone(),
        );
        let join = tokio::spawn(task.run());

        (
            producer,
            PipelineHandle {
                queue,
                metrics,
                cancel,
                join,
            },
        )
    }
}

/// Lifecycle handle for a running pipeline.
pub struct PipelineHandle {
    queue: Arc<ByteQueue>,
    metrics: Arc<PipelineMetrics>,
    cancel: CancellationToken,
    join: tokio::task::JoinHandle<MetricsSnapshot>,
}

impl PipelineHandle {
    /// Point-in-time metrics snapshot.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Stop the pipeline: reject further writes, drain buffered bytes,
    /// flush the batch and the sink, and return the final snapshot.
    pub async fn shutdown(self) -> MetricsSnapshot {
        // Close before cancel so no byte pushed before this point is lost.
        self.queue.close();
        self.cancel.cancel();
        match self.join.await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(error = %e, "drain task panicked during shutdown");
                self.metrics.snapshot()
            }
        }
    }
}

// Test modules - only compiled during testing
#[cfg(test)]
mod batch_test;
