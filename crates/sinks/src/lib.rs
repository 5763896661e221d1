//! Portlog - Sinks
//!
//! Append-only byte sinks for the drain task.
//!
//! # Architecture
//!
//! The drain task owns exactly one boxed [`ByteSink`] and is its only
//! caller, so writes are serialized by construction. Sinks are synchronous
//! `Write`-style objects driven from inside an async task; the shared queue
//! lock is never held across a sink call, so storage latency only ever
//! stalls the drain side.
//!
//! # Available Sinks
//!
//! | Sink | Purpose |
//! |------|---------|
//! | [`FileSink`] | Append-mode file storage (the production sink) |
//! | [`NullSink`] | Discard all data (benchmarking) |
//! | [`MemorySink`] | In-memory capture with fault injection (tests) |

mod error;
mod file;
mod memory;
mod null;
mod sink;

pub use error::{Result, SinkError};
pub use file::FileSink;
pub use memory::{MemorySink, MemorySinkHandle};
pub use null::NullSink;
pub use sink::ByteSink;
