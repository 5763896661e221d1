//! Sink error types

use std::io;

use thiserror::Error;

/// Result type for sink operations
pub type Result<T> = std::result::Result<T, SinkError>;

/// Errors that can occur when opening or writing a sink
#[derive(Debug, Error)]
pub enum SinkError {
    /// Failed to open the storage target
    #[error("failed to open sink '{path}': {source}")]
    Open {
        /// Path to the target
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// A write call failed
    #[error("sink write failed: {0}")]
    Write(#[from] io::Error),

    /// The sink accepted fewer bytes than requested
    #[error("short write: {written} of {requested} bytes accepted")]
    ShortWrite {
        /// Bytes the sink accepted
        written: usize,
        /// Bytes in the chunk
        requested: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SinkError::Open {
            path: "/mnt/card/log.txt".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("/mnt/card/log.txt"));

        let err = SinkError::ShortWrite {
            written: 12,
            requested: 1024,
        };
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains("1024"));
    }
}
