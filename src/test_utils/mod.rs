//! Test utilities for progeny
//!
//! Helpers shared by unit and integration tests:
//! - [`init_test_logging`] installs a tracing subscriber once per test binary
//! - [`MemoryFs`] is an in-memory [`SourceReader`] and [`GlobExpander`] that
//!   counts reads, for exercising walk semantics without a disk
//! - [`write_tree`] lays out a file tree inside a temporary directory
//!
//! # Example
//!
//! ```rust,no_run
//! use progeny_cli::test_utils::MemoryFs;
//!
//! let fs = MemoryFs::new()
//!     .with_file("a.css", "@import 'b.css';")
//!     .with_file("b.css", "");
//! assert_eq!(fs.read_count("b.css"), 0);
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::pattern::{GlobExpander, match_options};
use crate::source::SourceReader;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Respects `RUST_LOG` when `level` is `None`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=progeny_cli=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// In-memory file tree keyed by normalized path strings.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: HashMap<String, String>,
    reads: Mutex<HashMap<String, usize>>,
}

impl MemoryFs {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file.
    #[must_use]
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }

    /// Number of read attempts (successful or not) made for `path`.
    pub fn read_count(&self, path: &str) -> usize {
        self.reads.lock().map(|reads| reads.get(path).copied().unwrap_or(0)).unwrap_or(0)
    }

    /// Total number of read attempts across all paths.
    pub fn total_reads(&self) -> usize {
        self.reads.lock().map(|reads| reads.values().sum()).unwrap_or(0)
    }

    fn lookup(&self, path: &Path) -> io::Result<String> {
        let key = path.to_string_lossy().into_owned();
        if let Ok(mut reads) = self.reads.lock() {
            *reads.entry(key.clone()).or_insert(0) += 1;
        }

        self.files
            .get(&key)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no such file: {key}")))
    }
}

impl SourceReader for MemoryFs {
    fn read(&self, path: &Path) -> io::Result<String> {
        self.lookup(path)
    }

    fn read_async(&self, path: &Path) -> impl Future<Output = io::Result<String>> + Send {
        let result = self.lookup(path);
        async move {
            tokio::task::yield_now().await;
            result
        }
    }
}

impl GlobExpander for MemoryFs {
    fn expand(&self, pattern: &str) -> Vec<PathBuf> {
        let Ok(matcher) = glob::Pattern::new(pattern) else {
            return Vec::new();
        };

        let mut matches: Vec<PathBuf> = self
            .files
            .keys()
            .filter(|path| matcher.matches_with(path, match_options()))
            .map(PathBuf::from)
            .collect();
        matches.sort();
        matches
    }
}

/// Writes `files` (relative path, content) under `root`, creating directories.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) -> Result<()> {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}
