//! Glob detection and expansion for wildcard references.
//!
//! Stylus-style imports may name many files at once (`@import 'mixins/*'`).
//! When a profile is glob-aware, such references are not extension-appended
//! and their candidates are handed to a [`GlobExpander`] instead of being read.
//! Every concrete match then enters the walk as an ordinary candidate.
//!
//! # Pattern Syntax
//!
//! - `*` matches any sequence of characters within a single path component
//! - `**` matches any sequence of path components
//! - `?` matches any single character
//! - `[abc]` / `[a-z]` match one character from a set or range

use glob::MatchOptions;
use std::path::PathBuf;
use tracing::{debug, trace};

/// Returns `true` when `path` contains glob syntax.
///
/// # Examples
///
/// ```rust
/// use progeny_cli::pattern::has_magic;
///
/// assert!(has_magic("mixins/*.styl"));
/// assert!(has_magic("theme-[ab]"));
/// assert!(!has_magic("mixins/buttons.styl"));
/// ```
#[must_use]
pub fn has_magic(path: &str) -> bool {
    path.contains(['*', '?', '['])
}

/// Matching options shared by every expander: wildcards never cross `/` and
/// never match a leading `.`.
#[must_use]
pub const fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    }
}

/// Turns a glob candidate into the concrete files it matches.
///
/// Implementations must not fail: an invalid pattern or an unreadable
/// directory yields no matches.
pub trait GlobExpander: Send + Sync {
    /// Returns the matching paths in a stable order.
    fn expand(&self, pattern: &str) -> Vec<PathBuf>;
}

/// Expands globs against the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsGlob;

impl GlobExpander for FsGlob {
    fn expand(&self, pattern: &str) -> Vec<PathBuf> {
        let entries = match glob::glob_with(pattern, match_options()) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Ignoring invalid glob '{}': {}", pattern, e);
                return Vec::new();
            }
        };

        let matches: Vec<PathBuf> =
            entries.filter_map(std::result::Result::ok).filter(|path| path.is_file()).collect();

        trace!("Glob '{}' matched {} files", pattern, matches.len());
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_has_magic() {
        assert!(has_magic("**/index.styl"));
        assert!(has_magic("a?.styl"));
        assert!(!has_magic("plain/path.styl"));
        assert!(!has_magic(""));
    }

    #[test]
    fn test_fs_glob_expands_files_only() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("mixins");
        std::fs::create_dir_all(dir.join("nested.styl")).unwrap();
        std::fs::write(dir.join("a.styl"), "").unwrap();
        std::fs::write(dir.join("b.styl"), "").unwrap();
        std::fs::write(dir.join("c.css"), "").unwrap();

        let pattern = format!("{}/*.styl", dir.display());
        let matches = FsGlob.expand(&pattern);

        assert_eq!(matches, vec![dir.join("a.styl"), dir.join("b.styl")]);
    }

    #[test]
    fn test_fs_glob_skips_dotfiles() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.styl"), "").unwrap();
        std::fs::write(temp.path().join(".draft.styl"), "").unwrap();

        let pattern = format!("{}/*", temp.path().display());
        assert_eq!(FsGlob.expand(&pattern), vec![temp.path().join("a.styl")]);
    }

    #[test]
    fn test_fs_glob_invalid_pattern_is_empty() {
        assert!(FsGlob.expand("[unclosed").is_empty());
    }

    #[test]
    fn test_fs_glob_no_matches() {
        let temp = TempDir::new().unwrap();
        let pattern = format!("{}/*.styl", temp.path().display());
        assert!(FsGlob.expand(&pattern).is_empty());
    }
}
