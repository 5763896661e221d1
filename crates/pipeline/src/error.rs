//! Pipeline error types

use thiserror::Error;

use portlog_buffer::QueueError;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Pipeline errors
///
/// Sink failures never appear here: the drain task handles them internally
/// through the write-failure policy, so producers only ever see queue-side
/// conditions.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The pipeline has been shut down; writes are rejected
    #[error("pipeline is shut down")]
    ShutDown,

    /// Queue error surfaced to the caller
    #[error("queue error: {0}")]
    Queue(QueueError),
}

impl From<QueueError> for PipelineError {
    fn from(e: QueueError) -> Self {
        match e {
            QueueError::Closed => Self::ShutDown,
            other => Self::Queue(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_queue_maps_to_shut_down() {
        let err = PipelineError::from(QueueError::Closed);
        assert!(matches!(err, PipelineError::ShutDown));
    }

    #[test]
    fn test_full_queue_keeps_detail() {
        let err = PipelineError::from(QueueError::Full { needed: 9, free: 1 });
        assert!(err.to_string().contains("9"));
    }
}
