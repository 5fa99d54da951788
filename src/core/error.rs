//! Error handling for progeny
//!
//! The resolver is quiet: every guessed candidate that fails to
//! read is dropped without a trace beyond a `trace!` log line. The errors in
//! this module are the few conditions that do cross the API boundary:
//!
//! - [`ProgenyError::RootUnreadable`] - the file the caller asked about cannot be read
//! - [`ProgenyError::InvalidPattern`] / [`ProgenyError::InvalidMultiPass`] - a
//!   user-supplied pattern cannot be used to build the extraction profile
//! - configuration loading and CLI-level failures
//!
//! [`ErrorContext`] wraps an error with details and a suggestion for display by
//! the CLI, and [`user_friendly_error`] turns any [`anyhow::Error`] into one.
//!
//! # Examples
//!
//! ```rust,no_run
//! use progeny_cli::core::{ErrorContext, ProgenyError, user_friendly_error};
//!
//! let error = ProgenyError::MissingPath;
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Colored error, details and suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for progeny operations.
#[derive(Error, Debug)]
pub enum ProgenyError {
    /// The top-level file could not be read.
    ///
    /// This is the only failure the resolver surfaces during a walk; unreadable
    /// candidates below the root are expected and silently discarded.
    #[error("Cannot read root file: {}", path.display())]
    RootUnreadable {
        /// Path the caller asked to resolve
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A configured regular expression failed to compile.
    #[error("Invalid pattern: {pattern}")]
    InvalidPattern {
        /// The offending pattern text
        pattern: String,
        /// Compilation error from the regex engine
        #[source]
        source: regex::Error,
    },

    /// A multi-pass chain needs at least one narrowing pass and a final capture.
    #[error("Multi-pass chain needs at least 2 patterns, got {len}")]
    InvalidMultiPass {
        /// Number of patterns that were supplied
        len: usize,
    },

    /// No file path was supplied (typically after swapping argument order).
    #[error("No file path given to resolve")]
    MissingPath,

    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was looked up
        path: String,
    },

    /// The configuration file is not valid TOML or has unknown fields.
    #[error("Invalid configuration file syntax in {file}")]
    ConfigParseError {
        /// Configuration file path
        file: String,
        /// Parser message
        reason: String,
    },

    /// A deadline elapsed before resolution finished.
    #[error("Resolving {} did not finish within {seconds}s", path.display())]
    Timeout {
        /// Root file of the abandoned walk
        path: PathBuf,
        /// Configured deadline
        seconds: u64,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Error context wrapper with user-facing details and a suggestion.
///
/// Displayed by the CLI as:
/// 1. **error** in red
/// 2. **details** in yellow (optional)
/// 3. **suggestion** in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: ProgenyError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Creates a context with no suggestion or details.
    #[must_use]
    pub const fn new(error: ProgenyError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Adds an actionable suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Adds details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Prints the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Converts any error into an [`ErrorContext`] with suggestions where known.
///
/// Recognizes [`ProgenyError`] variants, [`toml::de::Error`] and
/// [`std::io::Error`]; anything else is rendered with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    // Look through the whole chain: CLI code wraps library errors with context
    for cause in error.chain() {
        if let Some(progeny_error) = cause.downcast_ref::<ProgenyError>() {
            return create_error_context(progeny_error);
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(ProgenyError::ConfigParseError {
            file: "progeny.toml".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax: quotes, brackets, and that option names are spelled correctly")
        .with_details(toml_error.to_string());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::PermissionDenied {
            return ErrorContext::new(ProgenyError::Other {
                message: error.to_string(),
            })
            .with_suggestion("Check the file permissions of the path being resolved")
            .with_details("progeny needs read access to the root file");
        }
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(ProgenyError::Other {
        message,
    })
}

fn create_error_context(error: &ProgenyError) -> ErrorContext {
    match error {
        ProgenyError::RootUnreadable { path, source } => ErrorContext::new(ProgenyError::Other {
            message: error.to_string(),
        })
        .with_suggestion(format!("Check that '{}' exists and is a readable text file", path.display()))
        .with_details(source.to_string()),

        ProgenyError::InvalidPattern { pattern, source } => ErrorContext::new(ProgenyError::InvalidPattern {
            pattern: pattern.clone(),
            source: source.clone(),
        })
        .with_suggestion("Patterns use Rust regex syntax; look-around and backreferences are not supported")
        .with_details(source.to_string()),

        ProgenyError::InvalidMultiPass { len } => ErrorContext::new(ProgenyError::InvalidMultiPass {
            len: *len,
        })
        .with_suggestion("Give at least one narrowing pattern followed by a final pattern with a capture group"),

        ProgenyError::MissingPath => ErrorContext::new(ProgenyError::MissingPath)
            .with_suggestion("Pass the file to resolve; with swapped arguments the path comes second"),

        ProgenyError::ConfigNotFound { path } => ErrorContext::new(ProgenyError::ConfigNotFound {
            path: path.clone(),
        })
        .with_suggestion("Create the file or drop the --config option to use ./progeny.toml when present"),

        ProgenyError::ConfigParseError { file, reason } => ErrorContext::new(ProgenyError::ConfigParseError {
            file: file.clone(),
            reason: reason.clone(),
        })
        .with_suggestion(format!("Check the TOML syntax in {file}"))
        .with_details(reason.clone()),

        ProgenyError::Timeout { path, seconds } => ErrorContext::new(ProgenyError::Timeout {
            path: path.clone(),
            seconds: *seconds,
        })
        .with_suggestion("Raise --timeout or narrow the search with fewer --alt-path directories"),

        ProgenyError::Other { message } => ErrorContext::new(ProgenyError::Other {
            message: message.clone(),
        }),
    }
}
