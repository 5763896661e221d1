//! Byte-stream capture loop
//!
//! Reads from an async byte stream and pushes each read into the pipeline
//! producer. Each read event is one capture unit: with timestamping on,
//! the bytes are framed as `[HH:MM:SS.mmm] <payload>\n` where the time is
//! relative to capture start, so the stored stream reads as a session log.
//!
//! The read size adapts to the stream: a read that fills the current
//! buffer doubles it for the next read, up to a fixed cap, so a chatty
//! device is captured in fewer, larger reads while an idle one costs only
//! a small buffer.

use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use portlog_pipeline::Producer;

use crate::error::Result;

/// Initial per-read buffer size.
pub const DEFAULT_READ_CHUNK: usize = 256;
/// Upper bound the read buffer doubles toward.
pub const DEFAULT_MAX_READ_CHUNK: usize = 1024;

/// Capture loop settings.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Buffer size for the first read.
    pub read_chunk: usize,
    /// Cap for the adaptive read buffer.
    pub max_read_chunk: usize,
    /// Frame each read with a relative timestamp and trailing newline.
    /// When false the stream is forwarded byte-for-byte.
    pub timestamps: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            read_chunk: DEFAULT_READ_CHUNK,
            max_read_chunk: DEFAULT_MAX_READ_CHUNK,
            timestamps: true,
        }
    }
}

/// Run the capture loop until EOF or cancellation.
///
/// Returns the number of payload bytes read from the source (framing
/// overhead not included). Backpressure from a full queue is applied
/// here: the loop simply stops reading until the producer write returns.
pub async fn capture_into<R>(
    mut reader: R,
    producer: &Producer,
    config: CaptureConfig,
    cancel: CancellationToken,
) -> Result<u64>
where
    R: AsyncRead + Unpin,
{
    let max_chunk = config.max_read_chunk.max(config.read_chunk).max(1);
    let mut chunk = config.read_chunk.max(1);
    let mut buf = vec![0u8; chunk];
    let started = Instant::now();
    let mut total: u64 = 0;

    tracing::info!(
        read_chunk = chunk,
        max_read_chunk = max_chunk,
        timestamps = config.timestamps,
        "capture started"
    );

    loop {
        let n = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(bytes = total, "capture cancelled");
                break;
            }
            read = reader.read(&mut buf[..chunk]) => read?,
        };
        if n == 0 {
            tracing::info!(bytes = total, "capture source reached end of stream");
            break;
        }
        total += n as u64;

        if config.timestamps {
            let framed = frame(&buf[..n], started.elapsed());
            producer.write(&framed).await?;
        } else {
            producer.write(&buf[..n]).await?;
        }

        // A full read suggests more is waiting; double the buffer.
        if n == chunk && chunk < max_chunk {
            chunk = (chunk * 2).min(max_chunk);
            buf.resize(chunk, 0);
            tracing::debug!(read_chunk = chunk, "read buffer grown");
        }
    }

    Ok(total)
}

/// Prefix a payload with a relative timestamp and terminate the line.
fn frame(payload: &[u8], elapsed: Duration) -> BytesMut {
    let stamp = format_timestamp(elapsed);
    let mut framed = BytesMut::with_capacity(stamp.len() + payload.len() + 1);
    framed.extend_from_slice(stamp.as_bytes());
    framed.extend_from_slice(payload);
    framed.extend_from_slice(b"\n");
    framed
}

/// `[HH:MM:SS.mmm] ` for a duration since capture start.
pub(crate) fn format_timestamp(elapsed: Duration) -> String {
    let total_ms = elapsed.as_millis();
    let ms = total_ms % 1000;
    let secs = (total_ms / 1000) % 60;
    let mins = (total_ms / 60_000) % 60;
    let hours = total_ms / 3_600_000;
    format!("[{:02}:{:02}:{:02}.{:03}] ", hours, mins, secs, ms)
}
