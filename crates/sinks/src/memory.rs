//! Memory sink - in-memory capture for tests
//!
//! Records every chunk it accepts and can be switched into a failing state
//! to exercise the pipeline's write-failure handling. A cloneable handle
//! stays valid after the sink itself has been consumed by the drain task.

use std::io;
use std::sync::{Arc, Mutex};

use crate::error::{Result, SinkError};
use crate::sink::ByteSink;

#[derive(Debug, Default)]
struct MemoryState {
    data: Vec<u8>,
    chunk_sizes: Vec<usize>,
    flushes: u64,
    failing: bool,
}

/// Sink that appends into memory
#[derive(Debug, Default)]
pub struct MemorySink {
    shared: Arc<Mutex<MemoryState>>,
}

/// Handle for inspecting (and failing) a [`MemorySink`] from the outside
#[derive(Debug, Clone)]
pub struct MemorySinkHandle {
    shared: Arc<Mutex<MemoryState>>,
}

impl MemorySink {
    /// Create a new memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a handle that outlives the sink.
    pub fn handle(&self) -> MemorySinkHandle {
        MemorySinkHandle {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl MemorySinkHandle {
    /// Everything written so far, in order.
    pub fn contents(&self) -> Vec<u8> {
        self.shared.lock().unwrap().data.clone()
    }

    /// Size of each accepted chunk, in call order.
    pub fn chunk_sizes(&self) -> Vec<usize> {
        self.shared.lock().unwrap().chunk_sizes.clone()
    }

    /// Number of flush calls.
    pub fn flushes(&self) -> u64 {
        self.shared.lock().unwrap().flushes
    }

    /// When `failing` is set, every subsequent write fails.
    pub fn set_failing(&self, failing: bool) {
        self.shared.lock().unwrap().failing = failing;
    }
}

impl ByteSink for MemorySink {
    fn append_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        let mut state = self.shared.lock().unwrap();
        if state.failing {
            return Err(SinkError::Write(io::Error::new(
                io::ErrorKind::Other,
                "injected write failure",
            )));
        }
        state.data.extend_from_slice(chunk);
        state.chunk_sizes.push(chunk.len());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.shared.lock().unwrap().flushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_chunks() {
        let mut sink = MemorySink::new();
        let handle = sink.handle();

        sink.append_chunk(b"hello ").unwrap();
        sink.append_chunk(b"world").unwrap();
        sink.flush().unwrap();

        assert_eq!(handle.contents(), b"hello world");
        assert_eq!(handle.chunk_sizes(), vec![6, 5]);
        assert_eq!(handle.flushes(), 1);
    }

    #[test]
    fn test_memory_sink_fault_injection() {
        let mut sink = MemorySink::new();
        let handle = sink.handle();

        sink.append_chunk(b"ok").unwrap();
        handle.set_failing(true);
        assert!(sink.append_chunk(b"fails").is_err());
        handle.set_failing(false);
        sink.append_chunk(b"ok again").unwrap();

        assert_eq!(handle.contents(), b"okok again");
    }
}
