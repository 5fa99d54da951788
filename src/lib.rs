//! Progeny - transitive dependency resolution for source files
//!
//! Given a file written in a language that references other files (Jade
//! `include`/`extends`, Stylus/Less/Sass/CSS `@import`, or anything a custom
//! pattern describes), progeny finds every file it transitively depends on.
//! It is the piece a build tool's watcher uses to decide which entry points to
//! recompile when a partial changes.
//!
//! # Architecture Overview
//!
//! A resolution is a walk over a graph discovered on the fly:
//! 1. an [`ExtractionProfile`](profile::ExtractionProfile) is built for the
//!    root file from its extension's built-in defaults and the caller's
//!    [`ResolverConfig`]
//! 2. each file's text is scanned for references ([`extract`]): per-line
//!    pattern, optional multi-pass narrowing, then exclusions
//! 3. every reference is expanded into candidate paths ([`candidates`]):
//!    implicit extension, search directories, module-style, prefix and
//!    alternate-extension variants
//! 4. the [`walker`] reads each candidate once; readable ones are recorded and
//!    scanned in turn, unreadable ones are silently dropped
//!
//! Only a failure to read the root file is an error. Everything else about a
//! resolution is best effort.
//!
//! # Core Modules
//!
//! - [`progeny`] - [`Progeny`] (concurrent) and [`ProgenySync`] (sequential) engines
//! - [`config`] - [`ResolverConfig`] and its TOML file format
//! - [`profile`] - built-in per-extension defaults and profile compilation
//! - [`extract`] - reference extraction and exclusion filtering
//! - [`candidates`] - candidate path generation
//! - [`walker`] - graph walk with a visited set, in both modes
//! - [`pattern`] - glob detection and expansion
//! - [`source`] - file reading collaborator
//! - [`tree`] - debug tree output
//! - [`core`] - error types and user-facing error rendering
//! - [`cli`] - the `progeny` command
//! - [`utils`] - path helpers
//!
//! # Built-in Profiles
//!
//! | Extension      | References                         | Extras                                   |
//! |----------------|------------------------------------|------------------------------------------|
//! | `jade`         | `include`/`extends` lines          | -                                        |
//! | `styl`         | `@import`/`@require`               | module-style, globs, `nib` excluded      |
//! | `less`         | `@import`                          | -                                        |
//! | `scss`, `sass` | `@import` lists                    | `_` prefix, alternates, `^compass` out    |
//! | `css`          | `@import`                          | -                                        |
//!
//! # Example
//!
//! ```rust,no_run
//! use progeny_cli::{ProgenySync, ResolverConfig};
//!
//! let config = ResolverConfig {
//!     root_path: Some("app/styles".into()),
//!     ..Default::default()
//! };
//! let deps = ProgenySync::new(config).resolve("app/styles/main.scss", None)?;
//! for dep in deps {
//!     println!("{}", dep.display());
//! }
//! # Ok::<(), progeny_cli::ProgenyError>(())
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! progeny app/styles/main.scss
//! progeny --format tree --root app/styles app/styles/main.scss
//! progeny --sync --potential views/index.jade
//! ```

pub mod candidates;
pub mod cli;
pub mod config;
pub mod core;
pub mod extract;
pub mod pattern;
pub mod profile;
pub mod progeny;
pub mod source;
pub mod tree;
pub mod utils;
pub mod walker;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::ResolverConfig;
pub use core::ProgenyError;
pub use progeny::{Progeny, ProgenySync, ResolveRequest};
