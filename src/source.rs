//! File-read collaborator.
//!
//! The walker never touches the filesystem directly; it asks a
//! [`SourceReader`] for text. A failed read of a guessed candidate is the
//! normal outcome and is dropped by the walker, so implementations just report
//! the I/O error.

use std::future::Future;
use std::io;
use std::path::Path;

/// Reads the textual content of a candidate path.
pub trait SourceReader: Send + Sync {
    /// Blocking read used by the sequential walk.
    fn read(&self, path: &Path) -> io::Result<String>;

    /// Suspending read used by the concurrent walk.
    fn read_async(&self, path: &Path) -> impl Future<Output = io::Result<String>> + Send;
}

/// Reads UTF-8 text from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn read_async(&self, path: &Path) -> impl Future<Output = io::Result<String>> + Send {
        tokio::fs::read_to_string(path.to_path_buf())
    }
}
