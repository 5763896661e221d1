//! Write batch
//!
//! Bounded scratch buffer owned solely by the drain task. Distinct from the
//! shared queue: bytes here have already been drained and are waiting for a
//! full or timed flush.

/// Fixed-capacity accumulation buffer.
pub(crate) struct WriteBatch {
    buf: Box<[u8]>,
    len: usize,
}

impl WriteBatch {
    pub(crate) fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "batch capacity must be non-zero");
        Self {
            buf: vec![0u8; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn remaining(&self) -> usize {
        self.buf.len() - self.len
    }

    /// Copy as much of `bytes` as fits; returns the number copied.
    pub(crate) fn append(&mut self, bytes: &[u8]) -> usize {
        let n = bytes.len().min(self.remaining());
        self.buf[self.len..self.len + n].copy_from_slice(&bytes[..n]);
        self.len += n;
        n
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Reset the batch index to zero.
    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }
}
