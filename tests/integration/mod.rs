//! Integration test suite for progeny
//!
//! End-to-end tests that resolve real file trees inside temporary directories,
//! through both the library engines and the `progeny` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **resolve**: library resolution against the filesystem (both engines)
//! - **cli**: the binary's flags, output formats and error reporting

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cli;
mod resolve;
