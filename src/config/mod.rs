//! Configuration for the resolver
//!
//! A [`ResolverConfig`] carries every option a caller can set. Each field left
//! as `None` falls back to the built-in profile for the file's extension (see
//! [`crate::profile`]); a `Some` value replaces that default for the whole
//! invocation. The config itself is never mutated by the engine.
//!
//! # File Format
//!
//! The CLI reads `progeny.toml` from the current directory (or the file given
//! with `--config`) and overlays command-line flags on top:
//!
//! ```toml
//! extension = "scss"
//! root_path = "app/styles"
//! auxiliary_paths = ["vendor/styles", "node_modules"]
//! prefix = "_"
//! alternate_extensions = ["scss", "sass"]
//! speculative_recording = false
//! glob_aware = true
//!
//! exclusions = [
//!     { literal = "nib" },
//!     { pattern = "^compass" },
//! ]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::ProgenyError;

/// File name looked up in the current directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "progeny.toml";

/// A single exclusion rule as written in configuration.
///
/// Literal rules match a reference by exact string equality; pattern rules are
/// regular expressions tested anywhere in the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExclusionRule {
    /// Exact reference text to drop
    Literal(String),
    /// Regular expression; any match drops the reference
    Pattern(String),
}

impl ExclusionRule {
    /// Convenience constructor for a literal rule.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Convenience constructor for a pattern rule.
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern(pattern.into())
    }
}

/// Options recognized by [`crate::Progeny`] and [`crate::ProgenySync`].
///
/// Booleans that have a registry default (`module_style`, `glob_aware`) are
/// `Option<bool>` so `Some(false)` can switch a default off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Canonical extension without the dot; defaults to the root file's extension
    pub extension: Option<String>,
    /// Per-line pattern whose first capture group is the reference
    pub pattern: Option<String>,
    /// Filename prefix tried as a sibling variant (e.g. `_` for Sass partials)
    pub prefix: Option<String>,
    /// References to drop before resolution
    pub exclusions: Option<Vec<ExclusionRule>>,
    /// Extensions tried in place of the canonical one
    pub alternate_extensions: Option<Vec<String>>,
    /// Whole-text narrowing chain; the last pattern captures the reference
    pub multi_pass: Option<Vec<String>>,
    /// Directory searched after the referencing file's own directory
    pub root_path: Option<PathBuf>,
    /// Further directories searched, in order
    pub auxiliary_paths: Vec<PathBuf>,
    /// Record every attempted candidate, not only the readable ones
    pub speculative_recording: bool,
    /// Resolve extensionless references as `name.ext` or `name/index.ext`
    pub module_style: Option<bool>,
    /// Expand references containing glob syntax
    pub glob_aware: Option<bool>,
    /// Take arguments as `(source, path)` instead of `(path, source)`
    pub swap_arguments: bool,
    /// Send every result to the tree sink
    pub debug_trace: bool,
}

impl ResolverConfig {
    /// Creates an empty configuration: everything comes from the registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ProgenyError::ConfigParseError`] (wrapped in context) if the
    /// file is not valid TOML or contains unknown options, and an I/O error if
    /// it cannot be read.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content).map_err(|e| {
            anyhow::Error::from(ProgenyError::ConfigParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            })
        })
    }

    /// Loads the explicitly requested file, or `./progeny.toml` when present.
    ///
    /// A missing default file yields an empty configuration; a missing explicit
    /// file is an error.
    pub fn load_with_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if !path.exists() => Err(ProgenyError::ConfigNotFound {
                path: path.display().to_string(),
            }
            .into()),
            Some(path) => Self::load_from(path),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    debug!("Loading config from {}", default.display());
                    Self::load_from(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Overlays `other` on top of `self`: set fields in `other` win.
    ///
    /// Auxiliary paths from `other` are appended after those already present;
    /// `true` flags are sticky.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.extension = other.extension.or(self.extension);
        self.pattern = other.pattern.or(self.pattern);
        self.prefix = other.prefix.or(self.prefix);
        self.exclusions = other.exclusions.or(self.exclusions);
        self.alternate_extensions = other.alternate_extensions.or(self.alternate_extensions);
        self.multi_pass = other.multi_pass.or(self.multi_pass);
        self.root_path = other.root_path.or(self.root_path);
        self.auxiliary_paths.extend(other.auxiliary_paths);
        self.speculative_recording |= other.speculative_recording;
        self.module_style = other.module_style.or(self.module_style);
        self.glob_aware = other.glob_aware.or(self.glob_aware);
        self.swap_arguments |= other.swap_arguments;
        self.debug_trace |= other.debug_trace;
        self
    }
}
