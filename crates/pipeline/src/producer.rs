//! Producer interface
//!
//! The ingestion entry point used by the capture loop. `write` is the flow
//! control mechanism: it suspends while the queue lacks space, so a stalled
//! storage device slows capture down instead of growing memory without
//! bound.

use std::sync::Arc;

use portlog_buffer::ByteQueue;

use crate::error::Result;
use crate::metrics::PipelineMetrics;

/// Handle for pushing bytes into the pipeline.
///
/// Single producer role: hand this to exactly one capture loop. Writes from
/// concurrent tasks would interleave at segment granularity.
pub struct Producer {
    queue: Arc<ByteQueue>,
    metrics: Arc<PipelineMetrics>,
}

impl Producer {
    pub(crate) fn new(queue: Arc<ByteQueue>, metrics: Arc<PipelineMetrics>) -> Self {
        Self { queue, metrics }
    }

    /// Push `data` into the queue, waiting for free space as needed.
    ///
    /// Returns once every byte has been admitted. After shutdown this fails
    /// with [`PipelineError::ShutDown`](crate::PipelineError::ShutDown).
    pub async fn write(&self, data: &[u8]) -> Result<()> {
        self.queue.push(data).await?;
        self.metrics.record_pushed(data.len() as u64);
        Ok(())
    }

    /// Non-blocking variant: fail with
    /// [`PipelineError::Queue`](crate::PipelineError::Queue) instead of
    /// waiting when space is insufficient, for callers that prefer to drop
    /// data over stalling.
    pub fn try_write(&self, data: &[u8]) -> Result<()> {
        self.queue.try_push(data)?;
        self.metrics.record_pushed(data.len() as u64);
        Ok(())
    }

    /// Free space in the queue at the instant of the call.
    pub fn free_space(&self) -> usize {
        self.queue.free_space()
    }
}
