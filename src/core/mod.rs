//! Core types for progeny
//!
//! Holds the error vocabulary shared by the engine, the configuration loader
//! and the CLI:
//! - [`ProgenyError`] - enumerated failure modes
//! - [`ErrorContext`] - user-facing wrapper with details and suggestions
//! - [`user_friendly_error`] - convert any [`anyhow::Error`] for CLI display

pub mod error;

pub use error::{ErrorContext, ProgenyError, user_friendly_error};
