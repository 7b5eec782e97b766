//! File-backed byte sources and sinks.
//!
//! [`FileSink`] never writes the destination in place: the data goes to a
//! hidden sibling file first, which is synced and then renamed over the
//! destination. A failure at any step removes the sibling, so the
//! destination either holds the complete new content or is left untouched.

use crate::error::{HuffpackError, Result};
use crate::traits::{ByteSink, ByteSource};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Reads a whole file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteSource for FileSource {
    fn read_all_bytes(&mut self) -> Result<Vec<u8>> {
        let data =
            fs::read(&self.path).map_err(|e| HuffpackError::source_unavailable(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), bytes = data.len(), "read source");
        Ok(data)
    }
}

/// Atomically replaces a file with a complete buffer.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the destination file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Hidden sibling used while the data is being written.
    fn staging_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        let staging = format!(".{}.{}.partial", name, std::process::id());
        match self.path.parent() {
            Some(parent) => parent.join(staging),
            None => PathBuf::from(staging),
        }
    }

    fn stage(staging: &Path, data: &[u8]) -> std::io::Result<()> {
        let mut file = File::create(staging)?;
        file.write_all(data)?;
        file.sync_all()
    }
}

impl ByteSink for FileSink {
    fn write_all_bytes(&mut self, data: &[u8]) -> Result<()> {
        let staging = self.staging_path();

        let committed = Self::stage(&staging, data).and_then(|()| fs::rename(&staging, &self.path));
        if let Err(e) = committed {
            let _ = fs::remove_file(&staging);
            return Err(HuffpackError::sink_unavailable(&self.path, e));
        }

        tracing::debug!(path = %self.path.display(), bytes = data.len(), "committed sink");
        Ok(())
    }
}
