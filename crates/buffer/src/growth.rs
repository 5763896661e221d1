//! Capacity growth policy
//!
//! The drain task calls [`GrowthPolicy::check`] once per iteration. When the
//! free-space ratio drops to the configured threshold the queue is grown by
//! one step, capped at the configured ceiling. Growth is monotonic - the
//! queue never shrinks.

use crate::error::{QueueError, Result};
use crate::queue::ByteQueue;

/// Default initial queue capacity (4 KiB)
pub const DEFAULT_INITIAL_CAPACITY: usize = 4096;

/// Default growth step (2 KiB)
pub const DEFAULT_RESIZE_STEP: usize = 2048;

/// Default free-space ratio at or below which the queue grows
pub const DEFAULT_RESIZE_THRESHOLD: f64 = 0.2;

/// Default capacity ceiling (1 MiB)
pub const DEFAULT_MAX_CAPACITY: usize = 1024 * 1024;

/// Sizing parameters for the byte queue
#[derive(Debug, Clone)]
pub struct BufferConfig {
    /// Capacity the queue starts with
    pub initial_capacity: usize,

    /// Bytes added per grow
    pub resize_step: usize,

    /// Grow when `free_space / capacity` is at or below this fraction
    pub resize_threshold: f64,

    /// Capacity ceiling; the queue never grows past this
    pub max_capacity: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            resize_step: DEFAULT_RESIZE_STEP,
            resize_threshold: DEFAULT_RESIZE_THRESHOLD,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}

/// Decides when the queue grows and performs the resize.
#[derive(Debug, Clone)]
pub struct GrowthPolicy {
    step: usize,
    threshold: f64,
    max_capacity: usize,
}

impl GrowthPolicy {
    /// Create a policy from buffer config.
    pub fn new(config: &BufferConfig) -> Self {
        Self {
            step: config.resize_step,
            threshold: config.resize_threshold,
            max_capacity: config.max_capacity,
        }
    }

    /// Capacity ceiling for this policy.
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Grow `queue` by one step if its free-space ratio is at or below the
    /// threshold. Returns `Ok(true)` when a resize happened.
    ///
    /// Allocation failure is transient: the old queue stays live and the
    /// next check retries.
    pub fn check(&self, queue: &ByteQueue) -> Result<bool> {
        let (free, capacity) = queue.usage();
        if capacity >= self.max_capacity {
            return Ok(false);
        }
        if free as f64 / capacity as f64 > self.threshold {
            return Ok(false);
        }

        let target = capacity.saturating_add(self.step).min(self.max_capacity);
        match queue.resize_to(target) {
            Ok(()) => {
                tracing::debug!(
                    old_capacity = capacity,
                    new_capacity = target,
                    free,
                    "queue grown"
                );
                Ok(true)
            }
            Err(e @ QueueError::ResizeAllocation { .. }) => {
                tracing::error!(error = %e, capacity, "queue resize failed, keeping current capacity");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}
