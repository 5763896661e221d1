//! Bounded, growable FIFO byte queue
//!
//! Single producer role (capture), single consumer role (drain). Both sides
//! operate on the ring under one mutex; wakeups go through two `Notify`
//! handles so neither side ever sleep-polls.

use std::time::Duration;

use bytes::BytesMut;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::error::{QueueError, Result};

/// FIFO byte queue with a mutable capacity.
///
/// # Blocking behavior
///
/// - [`push`](ByteQueue::push) suspends while free space is insufficient and
///   is woken after every successful pop (and after every capacity grow).
/// - [`pop_available`](ByteQueue::pop_available) returns whatever is
///   buffered, waiting up to `max_wait` for data to appear. It never blocks
///   indefinitely.
///
/// # Wakeup protocol
///
/// Each side has at most one waiter (one capture task, one drain task), so
/// `notify_one` is used throughout: it stores a permit when no waiter is
/// registered, which makes the check-then-await pattern race-free.
pub struct ByteQueue {
    inner: Mutex<Ring>,

    /// Signaled by the consumer after a pop and by a capacity grow.
    space_available: Notify,

    /// Signaled by the producer after a push.
    data_available: Notify,
}

/// Ring storage. `head` is the index of the oldest byte.
struct Ring {
    buf: Box<[u8]>,
    head: usize,
    len: usize,
    closed: bool,
}

impl Ring {
    fn capacity(&self) -> usize {
        self.buf.len()
    }

    fn free(&self) -> usize {
        self.buf.len() - self.len
    }

    /// Append `bytes` at the tail. Caller must have checked free space.
    fn copy_in(&mut self, bytes: &[u8]) {
        debug_assert!(bytes.len() <= self.free());
        let cap = self.capacity();
        let tail = (self.head + self.len) % cap;
        let first = bytes.len().min(cap - tail);
        self.buf[tail..tail + first].copy_from_slice(&bytes[..first]);
        if first < bytes.len() {
            let rest = bytes.len() - first;
            self.buf[..rest].copy_from_slice(&bytes[first..]);
        }
        self.len += bytes.len();
    }

    /// Remove and return every buffered byte, oldest first.
    fn take_all(&mut self) -> BytesMut {
        let mut out = BytesMut::with_capacity(self.len);
        let first = self.len.min(self.capacity() - self.head);
        out.extend_from_slice(&self.buf[self.head..self.head + first]);
        if first < self.len {
            out.extend_from_slice(&self.buf[..self.len - first]);
        }
        self.head = 0;
        self.len = 0;
        out
    }
}

impl ByteQueue {
    /// Create a queue with the given initial capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be non-zero");
        Self {
            inner: Mutex::new(Ring {
                buf: vec![0u8; capacity].into_boxed_slice(),
                head: 0,
                len: 0,
                closed: false,
            }),
            space_available: Notify::new(),
            data_available: Notify::new(),
        }
    }

    /// Current capacity.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Number of buffered bytes.
    pub fn len(&self) -> usize {
        self.inner.lock().len
    }

    /// True when no bytes are buffered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Free space at the instant of the call.
    pub fn free_space(&self) -> usize {
        self.inner.lock().free()
    }

    /// Free space and capacity as one consistent snapshot.
    pub fn usage(&self) -> (usize, usize) {
        let inner = self.inner.lock();
        (inner.free(), inner.capacity())
    }

    /// True once [`close`](ByteQueue::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    /// Append `bytes` without blocking.
    ///
    /// Fails with [`QueueError::Full`] when free space is insufficient; the
    /// queue is left untouched (never a partial push).
    pub fn try_push(&self, bytes: &[u8]) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.closed {
            return Err(QueueError::Closed);
        }
        let free = inner.free();
        if free < bytes.len() {
            return Err(QueueError::Full {
                needed: bytes.len(),
                free,
            });
        }
        inner.copy_in(bytes);
        drop(inner);
        self.data_available.notify_one();
        Ok(())
    }

    /// Append `bytes`, waiting for free space as the consumer drains.
    ///
    /// Returns only once every byte has been admitted. Data larger than the
    /// queue's total capacity is admitted in segments as space frees up, so
    /// an oversized push completes across multiple drain cycles instead of
    /// deadlocking. A permanently stalled consumer stalls this call until
    /// the queue is closed, at which point it fails with
    /// [`QueueError::Closed`].
    pub async fn push(&self, bytes: &[u8]) -> Result<()> {
        let mut offset = 0;
        loop {
            {
                let mut inner = self.inner.lock();
                if inner.closed {
                    return Err(QueueError::Closed);
                }
                let remaining = bytes.len() - offset;
                let free = inner.free();
                if free >= remaining {
                    inner.copy_in(&bytes[offset..]);
                    drop(inner);
                    self.data_available.notify_one();
                    return Ok(());
                }
                // The remainder cannot fit even in an empty queue: stream
                // what fits now so the consumer can make room.
                if remaining > inner.capacity() && free > 0 {
                    inner.copy_in(&bytes[offset..offset + free]);
                    offset += free;
                    drop(inner);
                    self.data_available.notify_one();
                }
            }
            self.space_available.notified().await;
        }
    }

    /// Remove and return whatever is buffered, waiting up to `max_wait` for
    /// data to appear. Returns an empty buffer when nothing arrived in time
    /// or the queue is closed and drained.
    pub async fn pop_available(&self, max_wait: Duration) -> BytesMut {
        if let Some(out) = self.take_if_nonempty() {
            return out;
        }
        let _ = tokio::time::timeout(max_wait, self.data_available.notified()).await;
        self.take_if_nonempty().unwrap_or_default()
    }

    fn take_if_nonempty(&self) -> Option<BytesMut> {
        let mut inner = self.inner.lock();
        if inner.len == 0 {
            return None;
        }
        let out = inner.take_all();
        drop(inner);
        self.space_available.notify_one();
        Some(out)
    }

    /// Replace the ring with one of `new_capacity`, migrating every buffered
    /// byte in order. No-op when `new_capacity` does not exceed the current
    /// capacity (the queue never shrinks).
    ///
    /// All-or-nothing: on allocation failure the live queue is untouched and
    /// the call fails with [`QueueError::ResizeAllocation`].
    pub fn resize_to(&self, new_capacity: usize) -> Result<()> {
        // Allocate outside the lock; swap under it.
        let mut storage = Vec::new();
        if storage.try_reserve_exact(new_capacity).is_err() {
            return Err(QueueError::ResizeAllocation {
                requested: new_capacity,
            });
        }
        storage.resize(new_capacity, 0);
        let mut fresh = storage.into_boxed_slice();

        let mut inner = self.inner.lock();
        if new_capacity <= inner.capacity() {
            return Ok(());
        }
        let len = inner.len;
        let first = len.min(inner.capacity() - inner.head);
        fresh[..first].copy_from_slice(&inner.buf[inner.head..inner.head + first]);
        if first < len {
            fresh[first..len].copy_from_slice(&inner.buf[..len - first]);
        }
        inner.buf = fresh;
        inner.head = 0;
        drop(inner);

        // More capacity means more free space.
        self.space_available.notify_one();
        Ok(())
    }

    /// Close the queue. Further pushes fail with [`QueueError::Closed`];
    /// already-buffered bytes remain poppable. Wakes both sides.
    pub fn close(&self) {
        self.inner.lock().closed = true;
        self.space_available.notify_one();
        self.data_available.notify_one();
    }
}
