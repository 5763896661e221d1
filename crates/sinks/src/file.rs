//! File sink - append-mode storage on a mounted filesystem
//!
//! The production sink. The file is opened once in append mode and every
//! chunk is appended; reopening an existing file continues after its
//! current content, so restarts never truncate earlier captures.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, SinkError};
use crate::sink::ByteSink;

/// Append-only file sink
pub struct FileSink {
    file: File,
    path: PathBuf,
}

impl FileSink {
    /// Open (or create) the target file in append mode.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Open`] when the file cannot be opened - the
    /// pipeline cannot make persistence progress without it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::options()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| SinkError::Open {
                path: path.display().to_string(),
                source: e,
            })?;

        tracing::info!(path = %path.display(), "file sink opened");
        Ok(Self { file, path })
    }

    /// Path this sink writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSink for FileSink {
    fn append_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        // A short write counts as failure; the caller decides whether the
        // unwritten remainder is requeued or dropped.
        let written = self.file.write(chunk)?;
        if written < chunk.len() {
            return Err(SinkError::ShortWrite {
                written,
                requested: chunk.len(),
            });
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }
}
