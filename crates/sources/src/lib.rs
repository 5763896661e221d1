//! Portlog - Sources
//!
//! The capture side of the pipeline: reads a raw byte stream (a serial
//! device node already configured by the OS, a file, a socket) and pushes
//! it into the pipeline's producer handle.
//!
//! Port and baud-rate initialization are external concerns - the capture
//! loop is generic over [`tokio::io::AsyncRead`] and starts once a readable
//! handle exists.

mod capture;
mod error;

pub use capture::{capture_into, CaptureConfig, DEFAULT_MAX_READ_CHUNK, DEFAULT_READ_CHUNK};
pub use error::{CaptureError, Result};
