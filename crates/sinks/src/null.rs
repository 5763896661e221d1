//! Null sink - discards all data
//!
//! Used for benchmarking the pipeline without any I/O overhead, and for
//! validating configuration without touching storage.

use crate::error::Result;
use crate::sink::ByteSink;

/// Sink that counts and discards every chunk
#[derive(Debug, Default)]
pub struct NullSink {
    chunks: u64,
    bytes: u64,
}

impl NullSink {
    /// Create a new null sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Chunks accepted so far.
    pub fn chunks(&self) -> u64 {
        self.chunks
    }

    /// Bytes accepted so far.
    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}

impl ByteSink for NullSink {
    fn append_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        self.chunks += 1;
        self.bytes += chunk.len() as u64;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
