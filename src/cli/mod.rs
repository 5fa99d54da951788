//! Command-line interface for progeny.
//!
//! The binary resolves one file and prints its transitive dependencies:
//!
//! ```bash
//! progeny styles/main.scss                      # one path per line
//! progeny --format tree views/index.jade        # DEP header with children
//! progeny --format json --root app/styles a.scss
//! progeny --exclude nib --exclude-pattern '^compass' app.styl
//! ```
//!
//! Options come from three layers, later ones winning:
//! 1. the built-in profile for the file's extension
//! 2. `progeny.toml` in the current directory, or the file given with `--config`
//! 3. command-line flags
//!
//! Logs go to stderr so stdout stays machine-readable. `--verbose` enables
//! debug output, `--quiet` limits it to errors, otherwise `RUST_LOG` applies
//! (default `warn`).

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{ExclusionRule, ResolverConfig};
use crate::core::ProgenyError;
use crate::progeny::{Progeny, ProgenySync};
use crate::tree::{ConsoleTree, format_tree};
use crate::utils::path::display_relative;

/// How resolved dependencies are written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One path per line
    #[default]
    List,

    /// `DEP <file>` header followed by `|--<dep>` lines
    Tree,

    /// `{"root": ..., "dependencies": [...]}`
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    root: &'a Path,
    dependencies: &'a [PathBuf],
}

/// Resolve the dependency tree of a source file.
#[derive(Parser, Debug)]
#[command(
    name = "progeny",
    about = "Find every file a source file transitively depends on",
    version,
    long_about = "Progeny scans a source file for import/include references \
                  (Jade, Stylus, Less, Sass, CSS or a custom pattern), resolves them \
                  against the filesystem and follows them recursively."
)]
pub struct Cli {
    /// File to resolve.
    file: PathBuf,

    /// Canonical extension (without the dot); defaults to the file's own.
    #[arg(long = "ext", value_name = "EXT")]
    extension: Option<String>,

    /// Per-line regex whose first capture group is the reference.
    #[arg(long, value_name = "REGEX")]
    pattern: Option<String>,

    /// Directory searched after the referencing file's own directory.
    #[arg(long = "root", value_name = "DIR")]
    root_path: Option<PathBuf>,

    /// Additional search directory; may be repeated.
    #[arg(long = "alt-path", value_name = "DIR")]
    alt_paths: Vec<PathBuf>,

    /// Filename prefix tried as a variant (e.g. `_` for Sass partials).
    #[arg(long, value_name = "PREFIX")]
    prefix: Option<String>,

    /// Extension tried in place of the canonical one; may be repeated.
    #[arg(long = "alt-ext", value_name = "EXT")]
    alt_exts: Vec<String>,

    /// Reference to ignore, matched exactly; may be repeated.
    #[arg(long = "exclude", value_name = "NAME")]
    excludes: Vec<String>,

    /// Regex of references to ignore; may be repeated.
    #[arg(long = "exclude-pattern", value_name = "REGEX")]
    exclude_patterns: Vec<String>,

    /// Record every candidate path tried, not only the files that exist.
    #[arg(long)]
    potential: bool,

    /// Resolve extensionless references as `name.ext` or `name/index.ext`.
    ///
    /// Pass `--module-style=false` to disable the default for Stylus.
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    module_style: Option<bool>,

    /// Expand references containing glob syntax.
    #[arg(
        long = "glob",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    glob_aware: Option<bool>,

    /// Walk depth-first on the current thread instead of reading concurrently.
    #[arg(long)]
    sync: bool,

    /// Print the dependency tree as it is resolved (stderr with `--format json`).
    #[arg(long)]
    debug_tree: bool,

    /// Output format.
    #[arg(long, value_enum, default_value = "list")]
    format: OutputFormat,

    /// Abandon the resolution after this many seconds.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Configuration file (defaults to ./progeny.toml when present).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Runs the resolution and prints the result.
    pub async fn execute(self) -> Result<()> {
        self.init_logging();

        let config = self.build_config()?;
        debug!("Resolving {} with {:?}", self.file.display(), config);

        let deps = if self.sync {
            if self.timeout.is_some() {
                warn!("--timeout only applies to concurrent resolution; ignoring it with --sync");
            }
            ProgenySync::new(config).with_sink(Arc::new(self.tree_sink())).resolve(&self.file, None)?
        } else {
            let progeny = Progeny::new(config).with_sink(Arc::new(self.tree_sink()));
            let resolve = progeny.resolve(&self.file, None);
            match self.timeout {
                Some(seconds) => tokio::time::timeout(Duration::from_secs(seconds), resolve)
                    .await
                    .map_err(|_| ProgenyError::Timeout {
                        path: self.file.clone(),
                        seconds,
                    })??,
                None => resolve.await?,
            }
        };

        println!("{}", self.render(&deps)?);
        Ok(())
    }

    /// Combines the configuration file with command-line flags.
    ///
    /// # Errors
    ///
    /// Fails if an explicit `--config` file is missing or either file is malformed.
    pub fn build_config(&self) -> Result<ResolverConfig> {
        let file = ResolverConfig::load_with_optional(self.config.as_deref())
            .context("Failed to load progeny configuration")?;
        Ok(file.merge(self.flag_config()))
    }

    fn flag_config(&self) -> ResolverConfig {
        let exclusions: Vec<ExclusionRule> = self
            .excludes
            .iter()
            .map(ExclusionRule::literal)
            .chain(self.exclude_patterns.iter().map(ExclusionRule::pattern))
            .collect();

        ResolverConfig {
            extension: self.extension.clone(),
            pattern: self.pattern.clone(),
            prefix: self.prefix.clone(),
            exclusions: (!exclusions.is_empty()).then_some(exclusions),
            alternate_extensions: (!self.alt_exts.is_empty()).then(|| self.alt_exts.clone()),
            multi_pass: None,
            root_path: self.root_path.clone(),
            auxiliary_paths: self.alt_paths.clone(),
            speculative_recording: self.potential,
            module_style: self.module_style,
            glob_aware: self.glob_aware,
            swap_arguments: false,
            debug_trace: self.debug_tree,
        }
    }

    /// `--debug-tree` output goes to stderr when stdout carries JSON.
    fn tree_sink(&self) -> ConsoleTree {
        match self.format {
            OutputFormat::Json => ConsoleTree::stderr(),
            OutputFormat::List | OutputFormat::Tree => ConsoleTree::stdout(),
        }
    }

    fn render(&self, deps: &[PathBuf]) -> Result<String> {
        let base = std::env::current_dir().unwrap_or_default();
        Ok(match self.format {
            OutputFormat::List => {
                deps.iter().map(|dep| display_relative(dep, &base)).collect::<Vec<_>>().join("\n")
            }
            OutputFormat::Tree => format_tree(&self.file, deps, &base),
            OutputFormat::Json => serde_json::to_string_pretty(&JsonReport {
                root: &self.file,
                dependencies: deps,
            })
            .context("Failed to serialize dependencies")?,
        })
    }

    fn init_logging(&self) {
        let filter = if self.verbose {
            EnvFilter::new("debug")
        } else if self.quiet {
            EnvFilter::new("error")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}
