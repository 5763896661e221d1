//! Capture error types

use std::io;

use thiserror::Error;

use portlog_pipeline::PipelineError;

/// Result type for capture operations
pub type Result<T> = std::result::Result<T, CaptureError>;

/// Errors that can occur in the capture loop
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Reading from the source failed
    #[error("source read failed: {0}")]
    Io(#[from] io::Error),

    /// The pipeline rejected a write (shut down, or a non-blocking push
    /// found no space)
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}
