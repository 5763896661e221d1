//! Portlog - Buffer
//!
//! The shared byte queue that decouples serial capture from storage writes.
//!
//! # Architecture
//!
//! ```text
//! [Capture task] --push()--> [ByteQueue] --pop_available()--> [Drain task]
//!                                 ▲
//!                                 │ grow when free space runs low
//!                            [GrowthPolicy]
//! ```
//!
//! The queue is a FIFO ring of bytes behind a single mutex. The capture side
//! blocks when the queue is full and is woken by the drain side after every
//! successful pop, so bursts are absorbed without busy-waiting. Capacity
//! grows in fixed steps (up to a ceiling) when the drain side observes the
//! queue running low on free space.
//!
//! The lock is only ever held across pointer/length/copy operations - never
//! across I/O.

mod error;
mod growth;
mod queue;

pub use error::{QueueError, Result};
pub use growth::{BufferConfig, GrowthPolicy};
pub use queue::ByteQueue;

// Test modules - only compiled during testing
#[cfg(test)]
mod growth_test;
#[cfg(test)]
mod queue_test;
