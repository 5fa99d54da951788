//! Resolver entry points.
//!
//! [`Progeny`] resolves asynchronously and reads every frontier level
//! concurrently; [`ProgenySync`] resolves on the calling thread, depth-first.
//! The walk strategy is fixed when the engine is constructed. Both engines
//! share the same contract:
//!
//! - the root file's text may be supplied; otherwise it is read first, and a
//!   failed root read is the only error a resolution returns
//! - every call builds a fresh profile from the engine's [`ResolverConfig`],
//!   so calls never influence each other
//! - with `debug_trace` set, each result is also handed to the [`TreeSink`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use progeny_cli::{Progeny, ProgenySync, ResolverConfig};
//!
//! # async fn example() -> Result<(), progeny_cli::core::ProgenyError> {
//! let progeny = Progeny::new(ResolverConfig::default());
//! let deps = progeny.resolve("styles/main.scss", None).await?;
//!
//! let sync = ProgenySync::new(ResolverConfig::default());
//! let same = sync.resolve("styles/main.scss", Some("@import 'vars';"))?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::config::ResolverConfig;
use crate::core::ProgenyError;
use crate::pattern::{FsGlob, GlobExpander};
use crate::source::{FsReader, SourceReader};
use crate::tree::{ConsoleTree, TreeSink};
use crate::walker::Walk;

/// A path to resolve plus, optionally, its already-loaded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    /// File whose dependencies are wanted
    pub path: PathBuf,
    /// Its content, when the caller already has it
    pub source: Option<String>,
}

impl ResolveRequest {
    /// Builds a request from positional arguments.
    ///
    /// Normally `first` is the path and `second` the optional source. With
    /// `swapped`, `first` is the source and `second` the path, matching tools
    /// that call with `(source, path)`.
    ///
    /// # Errors
    ///
    /// [`ProgenyError::MissingPath`] when swapped arguments carry no path.
    pub fn from_args(first: impl Into<String>, second: Option<String>, swapped: bool) -> Result<Self, ProgenyError> {
        let first = first.into();
        if swapped {
            let path = second.ok_or(ProgenyError::MissingPath)?;
            Ok(Self {
                path: PathBuf::from(path),
                source: Some(first),
            })
        } else {
            Ok(Self {
                path: PathBuf::from(first),
                source: second,
            })
        }
    }
}

/// State shared by both engines.
struct Engine<R, G> {
    config: ResolverConfig,
    reader: R,
    globber: G,
    sink: Arc<dyn TreeSink>,
}

impl<R: SourceReader, G: GlobExpander> Engine<R, G> {
    fn new(config: ResolverConfig, reader: R, globber: G) -> Self {
        Self {
            config,
            reader,
            globber,
            sink: Arc::new(ConsoleTree::stdout()),
        }
    }

    fn walk(&self, path: &Path) -> Result<Walk<'_, R, G>, ProgenyError> {
        Walk::new(&self.config, path, &self.reader, &self.globber)
    }

    fn request(&self, first: &str, second: Option<&str>) -> Result<ResolveRequest, ProgenyError> {
        ResolveRequest::from_args(first, second.map(str::to_string), self.config.swap_arguments)
    }

    fn finish(&self, path: &Path, deps: Vec<PathBuf>) -> Vec<PathBuf> {
        debug!("Resolved {} dependencies for {}", deps.len(), path.display());
        if self.config.debug_trace {
            self.sink.report(path, &deps);
        }
        deps
    }
}

fn root_unreadable(path: &Path, source: std::io::Error) -> ProgenyError {
    ProgenyError::RootUnreadable {
        path: path.to_path_buf(),
        source,
    }
}

/// Asynchronous resolver with a concurrent, level-by-level walk.
pub struct Progeny<R = FsReader, G = FsGlob> {
    engine: Engine<R, G>,
}

impl Progeny {
    /// Creates a resolver over the local filesystem.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_io(config, FsReader, FsGlob)
    }
}

impl<R: SourceReader, G: GlobExpander> Progeny<R, G> {
    /// Creates a resolver with custom read and glob collaborators.
    pub fn with_io(config: ResolverConfig, reader: R, globber: G) -> Self {
        Self {
            engine: Engine::new(config, reader, globber),
        }
    }

    /// Replaces the sink used when `debug_trace` is on.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn TreeSink>) -> Self {
        self.engine.sink = sink;
        self
    }

    /// The configuration every call starts from.
    pub fn config(&self) -> &ResolverConfig {
        &self.engine.config
    }

    /// Resolves the transitive dependencies of `path`.
    ///
    /// # Errors
    ///
    /// [`ProgenyError::RootUnreadable`] if `source` is `None` and `path` cannot
    /// be read; [`ProgenyError::InvalidPattern`] for a bad configured pattern.
    pub async fn resolve(&self, path: impl AsRef<Path>, source: Option<&str>) -> Result<Vec<PathBuf>, ProgenyError> {
        let path = path.as_ref();
        let walk = self.engine.walk(path)?;

        let deps = match source {
            Some(source) => walk.run_concurrent(source).await,
            None => {
                let source = self.engine.reader.read_async(path).await.map_err(|e| root_unreadable(path, e))?;
                walk.run_concurrent(&source).await
            }
        };

        Ok(self.engine.finish(path, deps))
    }

    /// Resolves using positional arguments, honoring `swap_arguments`.
    pub async fn resolve_args(&self, first: &str, second: Option<&str>) -> Result<Vec<PathBuf>, ProgenyError> {
        let request = self.engine.request(first, second)?;
        self.resolve(&request.path, request.source.as_deref()).await
    }
}

/// Blocking resolver with a sequential, depth-first walk.
pub struct ProgenySync<R = FsReader, G = FsGlob> {
    engine: Engine<R, G>,
}

impl ProgenySync {
    /// Creates a resolver over the local filesystem.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_io(config, FsReader, FsGlob)
    }
}

impl<R: SourceReader, G: GlobExpander> ProgenySync<R, G> {
    /// Creates a resolver with custom read and glob collaborators.
    pub fn with_io(config: ResolverConfig, reader: R, globber: G) -> Self {
        Self {
            engine: Engine::new(config, reader, globber),
        }
    }

    /// Replaces the sink used when `debug_trace` is on.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn TreeSink>) -> Self {
        self.engine.sink = sink;
        self
    }

    /// The configuration every call starts from.
    pub fn config(&self) -> &ResolverConfig {
        &self.engine.config
    }

    /// Resolves the transitive dependencies of `path`, blocking.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Progeny::resolve`], returned immediately.
    pub fn resolve(&self, path: impl AsRef<Path>, source: Option<&str>) -> Result<Vec<PathBuf>, ProgenyError> {
        let path = path.as_ref();
        let walk = self.engine.walk(path)?;

        let deps = match source {
            Some(source) => walk.run_sequential(source),
            None => {
                let source = self.engine.reader.read(path).map_err(|e| root_unreadable(path, e))?;
                walk.run_sequential(&source)
            }
        };

        Ok(self.engine.finish(path, deps))
    }

    /// Resolves using positional arguments, honoring `swap_arguments`.
    pub fn resolve_args(&self, first: &str, second: Option<&str>) -> Result<Vec<PathBuf>, ProgenyError> {
        let request = self.engine.request(first, second)?;
        self.resolve(&request.path, request.source.as_deref())
    }
}
