//! Candidate path generation.
//!
//! Each raw reference is turned into a list of filesystem paths where the
//! referenced file *might* live. Every step only adds candidates, and most of
//! them will not exist; the walk settles existence by reading them. Nothing is
//! pruned here, so Sass partial lookups (`vars` → `_vars.scss`, `vars.sass`, ...)
//! keep working.
//!
//! Steps, in order:
//! 1. implicit extension: append the canonical extension to plain extensionless
//!    references (not globs, not module-style)
//! 2. directory fan-out: join every reference with the referencing file's
//!    directory, the root path (if different) and each auxiliary path
//! 3. module-style: an extensionless reference becomes `dir/ref.ext` and
//!    `dir/ref/index.ext` instead of the plain join
//! 4. canonical-extension fallback: `candidate.ext` for every non-glob
//!    candidate with a different extension
//! 5. prefix variant: `dir/<prefix>file` for every file not already prefixed
//! 6. alternate extensions: swap the canonical extension for each alternate

use crate::pattern::has_magic;
use crate::profile::ExtractionProfile;
use crate::utils::path::{basename, basename_without, dirname, extname, join, normalize};

/// Directories searched in addition to the referencing file's own directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPaths {
    /// Searched second, unless it is the referencing file's directory
    pub root: Option<String>,
    /// Searched last, in order
    pub auxiliary: Vec<String>,
}

impl SearchPaths {
    /// Creates search paths from a root and auxiliary directories.
    pub fn new(root: Option<String>, auxiliary: Vec<String>) -> Self {
        Self {
            root: root.map(|r| normalize(&r)),
            auxiliary,
        }
    }

    /// Returns the ordered directory list for a file living in `parent`.
    #[must_use]
    pub fn directories_for(&self, parent: &str) -> Vec<String> {
        let mut dirs = vec![parent.to_string()];

        if let Some(root) = self.root.as_deref().filter(|root| *root != parent) {
            dirs.push(root.to_string());
        }

        dirs.extend(self.auxiliary.iter().cloned());
        dirs
    }
}

/// Generates every candidate path for `references` found in the file at `current`.
///
/// The result is in generation order and may contain duplicates.
///
/// # Examples
///
/// ```rust
/// use progeny_cli::candidates::{SearchPaths, generate_candidates};
/// use progeny_cli::config::ResolverConfig;
/// use progeny_cli::profile::ExtractionProfile;
///
/// let profile = ExtractionProfile::build(&ResolverConfig::default(), "views/index.jade")?;
/// let candidates = generate_candidates(
///     "views/index.jade",
///     &["partials/head".to_string()],
///     &profile,
///     &SearchPaths::default(),
/// );
/// assert_eq!(candidates, vec!["views/partials/head.jade"]);
/// # Ok::<(), progeny_cli::core::ProgenyError>(())
/// ```
#[must_use]
pub fn generate_candidates(
    current: &str,
    references: &[String],
    profile: &ExtractionProfile,
    search: &SearchPaths,
) -> Vec<String> {
    let extension = profile.canonical_extension.as_deref();
    let is_glob = |path: &str| profile.glob_aware && has_magic(path);

    let references: Vec<String> = references
        .iter()
        .map(|reference| match extension {
            Some(ext)
                if !is_glob(reference) && !profile.module_style && extname(reference).is_empty() =>
            {
                format!("{reference}.{ext}")
            }
            _ => reference.clone(),
        })
        .collect();

    let mut candidates = Vec::new();
    for dir in search.directories_for(&dirname(current)) {
        for reference in &references {
            match extension {
                Some(ext) if profile.module_style && extname(reference).is_empty() => {
                    candidates.push(join(&dir, &format!("{reference}.{ext}")));
                    candidates.push(join(&join(&dir, reference), &format!("index.{ext}")));
                }
                _ => candidates.push(join(&dir, reference)),
            }
        }
    }

    if let Some(ext) = extension {
        let dotted = format!(".{ext}");
        let fallbacks: Vec<String> = candidates
            .iter()
            .filter(|c| !is_glob(c) && extname(c) != dotted)
            .map(|c| format!("{c}{dotted}"))
            .collect();
        candidates.extend(fallbacks);
    }

    if let Some(prefix) = &profile.prefix {
        let prefixed: Vec<String> = candidates
            .iter()
            .filter(|c| !basename(c).starts_with(prefix.as_str()))
            .map(|c| join(&dirname(c), &format!("{prefix}{}", basename(c))))
            .collect();
        candidates.extend(prefixed);
    }

    if !profile.alternate_extensions.is_empty() {
        let canonical = format!(".{}", extension.unwrap_or_default());
        let mut alternates = Vec::new();
        for candidate in &candidates {
            let dir = dirname(candidate);
            for alt in &profile.alternate_extensions {
                if extname(candidate) != format!(".{alt}") {
                    let base = basename_without(candidate, &canonical);
                    alternates.push(join(&dir, &format!("{base}.{alt}")));
                }
            }
        }
        candidates.extend(alternates);
    }

    candidates
}
