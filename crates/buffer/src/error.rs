//! Byte queue error types

use thiserror::Error;

/// Result type for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;

/// Errors that can occur on the byte queue
#[derive(Debug, Error)]
pub enum QueueError {
    /// Not enough free space for a non-blocking push
    #[error("queue full: need {needed} bytes, {free} free")]
    Full {
        /// Bytes the caller tried to push
        needed: usize,
        /// Free space at the time of the call
        free: usize,
    },

    /// The queue has been closed; no further pushes are accepted
    #[error("queue is closed")]
    Closed,

    /// Allocation for a larger queue failed; the old queue is kept
    #[error("failed to allocate {requested} bytes for queue resize")]
    ResizeAllocation {
        /// Requested new capacity
        requested: usize,
    },
}

impl QueueError {
    /// True for errors that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Full { .. } | Self::ResizeAllocation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QueueError::Full {
            needed: 128,
            free: 16,
        };
        assert!(err.to_string().contains("128"));
        assert!(err.to_string().contains("16"));

        let err = QueueError::Closed;
        assert!(err.to_string().contains("closed"));

        let err = QueueError::ResizeAllocation { requested: 8192 };
        assert!(err.to_string().contains("8192"));
    }

    #[test]
    fn test_is_transient() {
        assert!(QueueError::Full { needed: 1, free: 0 }.is_transient());
        assert!(QueueError::ResizeAllocation { requested: 1 }.is_transient());
        assert!(!QueueError::Closed.is_transient());
    }
}
