//! Dependency tree display.
//!
//! A [`TreeSink`] observes finished resolutions when `debug_trace` is on. It
//! receives the root and its dependency list and cannot influence either.
//!
//! # Output Format
//!
//! ```text
//! DEP styles/main.scss
//!     |--styles/_vars.scss
//!     |--styles/_mixins.scss
//! ```
//!
//! A file without dependencies prints `    |  NO-DEP` under its header.

use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::utils::path::display_relative;

/// Receives `(root, dependencies)` after each resolution.
pub trait TreeSink: Send + Sync {
    /// Called once per top-level resolution.
    fn report(&self, root: &Path, deps: &[PathBuf]);
}

/// Renders the tree with paths shown relative to `base`.
#[must_use]
pub fn format_tree(root: &Path, deps: &[PathBuf], base: &Path) -> String {
    let mut out = format!("{} {}", "DEP".green().bold(), display_relative(root, base));

    if deps.is_empty() {
        out.push_str("\n    |  NO-DEP");
    }
    for dep in deps {
        out.push_str("\n    |--");
        out.push_str(&display_relative(dep, base));
    }

    out
}

/// Prints trees relative to the current directory.
///
/// Writes to stdout by default; [`ConsoleTree::stderr`] keeps stdout free for
/// machine-readable output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleTree {
    to_stderr: bool,
}

impl ConsoleTree {
    /// A sink printing to stdout.
    #[must_use]
    pub const fn stdout() -> Self {
        Self {
            to_stderr: false,
        }
    }

    /// A sink printing to stderr.
    #[must_use]
    pub const fn stderr() -> Self {
        Self {
            to_stderr: true,
        }
    }
}

impl TreeSink for ConsoleTree {
    fn report(&self, root: &Path, deps: &[PathBuf]) {
        let base = std::env::current_dir().unwrap_or_default();
        let tree = format_tree(root, deps, &base);
        if self.to_stderr {
            eprintln!("{tree}");
        } else {
            println!("{tree}");
        }
    }
}
