//! Dependency graph walk.
//!
//! A [`Walk`] owns everything one top-level invocation needs: the compiled
//! profile, the search directories, and the I/O collaborators. The walk keeps
//! an explicit work list instead of recursing, and tracks two pieces of
//! per-invocation state:
//!
//! - the visited set: every candidate that has been claimed (seeded with the
//!   root file itself), so no path is read or expanded twice
//! - the dependency list: confirmed paths in discovery order, without duplicates
//!
//! A candidate moves through `pending → claimed → read-attempted`, ending
//! either confirmed (recorded, its own references queued) or dropped (read
//! failed, silently). Claims happen before reads are dispatched, so two
//! directory spellings resolving to the same string never race.
//!
//! # Modes
//!
//! - [`Walk::run_sequential`]: depth-first with a stack. Each candidate's
//!   subtree is finished before its next sibling starts, giving the same
//!   pre-order discovery order as a recursive walk.
//! - [`Walk::run_concurrent`]: breadth-first by frontier level. All claimed
//!   candidates of a level are read concurrently and joined before the next
//!   level is derived. Results are merged in candidate order after the join,
//!   so the order is deterministic, but it is level order rather than the
//!   sequential order.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use futures::future::join_all;
use tracing::{debug, trace};

use crate::candidates::{SearchPaths, generate_candidates};
use crate::config::ResolverConfig;
use crate::core::ProgenyError;
use crate::extract::extract_references;
use crate::pattern::{GlobExpander, has_magic};
use crate::profile::ExtractionProfile;
use crate::source::SourceReader;
use crate::utils::path::normalize;

/// Visited set plus ordered dependency list for one invocation.
#[derive(Debug)]
struct WalkState {
    visited: HashSet<String>,
    deps: Vec<String>,
    speculative: bool,
}

impl WalkState {
    fn seeded(root: &str, speculative: bool) -> Self {
        Self {
            visited: HashSet::from([normalize(root)]),
            deps: Vec::new(),
            speculative,
        }
    }

    fn is_visited(&self, candidate: &str) -> bool {
        self.visited.contains(candidate)
    }

    /// Marks a glob as expanded; it is never recorded as a dependency.
    fn mark_expanded(&mut self, glob: &str) -> bool {
        self.visited.insert(glob.to_string())
    }

    /// Claims `candidate` for reading. Returns `false` if it was already claimed.
    fn claim(&mut self, candidate: &str) -> bool {
        if !self.visited.insert(candidate.to_string()) {
            return false;
        }
        if self.speculative {
            self.deps.push(candidate.to_string());
        }
        true
    }

    /// Records a successfully read candidate.
    fn confirm(&mut self, candidate: &str) {
        if !self.speculative {
            self.deps.push(candidate.to_string());
        }
    }

    fn into_deps(self) -> Vec<PathBuf> {
        self.deps.into_iter().map(PathBuf::from).collect()
    }
}

/// Work-list entry of the sequential walk.
///
/// Glob matches are concrete files reported by the expander and are read as
/// they are, even when their names contain glob syntax.
#[derive(Debug)]
enum Pending {
    Candidate(String),
    Match(String),
}

/// One top-level resolution: profile, search paths, and collaborators.
pub struct Walk<'a, R, G> {
    root: String,
    profile: ExtractionProfile,
    search: SearchPaths,
    speculative: bool,
    reader: &'a R,
    globber: &'a G,
}

impl<'a, R: SourceReader, G: GlobExpander> Walk<'a, R, G> {
    /// Prepares a walk rooted at `root` under `config`.
    ///
    /// A fresh [`ExtractionProfile`] is built for every walk, so nothing
    /// carries over between invocations.
    ///
    /// # Errors
    ///
    /// Fails if a configured pattern is invalid.
    pub fn new(config: &ResolverConfig, root: &Path, reader: &'a R, globber: &'a G) -> Result<Self, ProgenyError> {
        let root = root.to_string_lossy().into_owned();
        let profile = ExtractionProfile::build(config, &root)?;
        let search = SearchPaths::new(
            config.root_path.as_ref().map(|p| p.to_string_lossy().into_owned()),
            config.auxiliary_paths.iter().map(|p| normalize(&p.to_string_lossy())).collect(),
        );

        Ok(Self {
            root,
            profile,
            search,
            speculative: config.speculative_recording,
            reader,
            globber,
        })
    }

    /// The profile this walk resolves with.
    pub fn profile(&self) -> &ExtractionProfile {
        &self.profile
    }

    fn is_glob(&self, candidate: &str) -> bool {
        self.profile.glob_aware && has_magic(candidate)
    }

    /// Extracts references from `source` and turns them into candidates.
    fn derive(&self, path: &str, source: &str) -> Vec<String> {
        let references = extract_references(source, &self.profile);
        if references.is_empty() {
            return Vec::new();
        }

        let candidates = generate_candidates(path, &references, &self.profile, &self.search);
        trace!("{}: {} references → {} candidates", path, references.len(), candidates.len());
        candidates
    }

    fn expand_glob(&self, glob: &str) -> Vec<String> {
        let matches: Vec<String> =
            self.globber.expand(glob).iter().map(|p| normalize(&p.to_string_lossy())).collect();
        debug!("Glob {} expanded to {} files", glob, matches.len());
        matches
    }

    /// Walks depth-first, reading with the blocking reader.
    pub fn run_sequential(&self, source: &str) -> Vec<PathBuf> {
        let mut state = WalkState::seeded(&self.root, self.speculative);
        let mut stack: Vec<Pending> =
            self.derive(&self.root, source).into_iter().rev().map(Pending::Candidate).collect();

        while let Some(pending) = stack.pop() {
            let candidate = match pending {
                Pending::Candidate(candidate) if self.is_glob(&candidate) => {
                    if state.mark_expanded(&candidate) {
                        stack.extend(self.expand_glob(&candidate).into_iter().rev().map(Pending::Match));
                    }
                    continue;
                }
                Pending::Candidate(path) | Pending::Match(path) => path,
            };

            if !state.claim(&candidate) {
                continue;
            }
            match self.reader.read(Path::new(&candidate)) {
                Ok(content) => {
                    trace!("Confirmed {}", candidate);
                    state.confirm(&candidate);
                    let children = self.derive(&candidate, &content);
                    stack.extend(children.into_iter().rev().map(Pending::Candidate));
                }
                Err(e) => trace!("Dropped {}: {}", candidate, e),
            }
        }

        state.into_deps()
    }

    /// Walks breadth-first, reading each frontier level concurrently.
    ///
    /// Reads are plain futures owned by this call; dropping the returned
    /// future abandons every read still in flight.
    pub async fn run_concurrent(&self, source: &str) -> Vec<PathBuf> {
        let mut state = WalkState::seeded(&self.root, self.speculative);
        let mut frontier = self.derive(&self.root, source);
        let mut level = 0usize;

        while !frontier.is_empty() {
            let claimed = self.claim_level(&mut state, frontier);
            debug!("Level {}: reading {} candidates", level, claimed.len());

            let reads = claimed.iter().map(|candidate| async move {
                (candidate, self.reader.read_async(Path::new(candidate)).await)
            });
            let results = join_all(reads).await;

            let mut next = Vec::new();
            for (candidate, result) in results {
                match result {
                    Ok(content) => {
                        trace!("Confirmed {}", candidate);
                        state.confirm(candidate);
                        next.extend(self.derive(candidate, &content));
                    }
                    Err(e) => trace!("Dropped {}: {}", candidate, e),
                }
            }

            frontier = next;
            level += 1;
        }

        state.into_deps()
    }

    /// Claims the unvisited candidates of one level, expanding globs in place.
    fn claim_level(&self, state: &mut WalkState, frontier: Vec<String>) -> Vec<String> {
        let mut claimed = Vec::with_capacity(frontier.len());

        for candidate in frontier {
            if state.is_visited(&candidate) {
                continue;
            }

            if self.is_glob(&candidate) {
                state.mark_expanded(&candidate);
                for file in self.expand_glob(&candidate) {
                    if state.claim(&file) {
                        claimed.push(file);
                    }
                }
            } else if state.claim(&candidate) {
                claimed.push(candidate);
            }
        }

        claimed
    }
}
