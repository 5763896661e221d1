//! The byte sink contract

use crate::error::Result;

/// An append-only byte sink.
///
/// # Contract
///
/// - `append_chunk` either accepts the whole chunk or fails; a short write
///   is reported as [`SinkError::ShortWrite`](crate::SinkError::ShortWrite),
///   never as partial success.
/// - Calls must come from a single writer. The drain task is the only
///   caller in this design; any additional writer must be serialized by the
///   caller, not by the sink.
pub trait ByteSink: Send {
    /// Append one chunk to the persistent target.
    fn append_chunk(&mut self, chunk: &[u8]) -> Result<()>;

    /// Push any sink-side buffering down to the target.
    fn flush(&mut self) -> Result<()>;
}
