//! Shared helpers for integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use tempfile::TempDir;

/// A throwaway project directory holding source files to resolve.
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    project_dir: PathBuf,
}

impl TestProject {
    /// Create an empty project
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        fs::create_dir_all(&project_dir)?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// Create a project pre-populated with `files`
    pub fn with_files(files: &[(&str, &str)]) -> Result<Self> {
        let project = Self::new()?;
        progeny_cli::test_utils::write_tree(project.path(), files)?;
        Ok(project)
    }

    /// Get the project directory path
    pub fn path(&self) -> &Path {
        &self.project_dir
    }

    /// Absolute path of a project file
    pub fn file(&self, relative: &str) -> PathBuf {
        self.project_dir.join(relative)
    }

    /// Absolute paths of several project files, in order
    pub fn files(&self, relative: &[&str]) -> Vec<PathBuf> {
        relative.iter().map(|r| self.file(r)).collect()
    }

    /// Run the progeny binary inside the project directory
    pub fn run_progeny(&self, args: &[&str]) -> Result<CommandOutput> {
        let binary = env!("CARGO_BIN_EXE_progeny");
        let output = Command::new(binary)
            .args(args)
            .current_dir(&self.project_dir)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .output()
            .context("Failed to run progeny command")?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

/// Command output helper
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(self.success, "Command failed with code {:?}\nStderr: {}", self.code, self.stderr);
        self
    }

    /// Stdout split into non-empty lines
    pub fn lines(&self) -> Vec<&str> {
        self.stdout.lines().filter(|l| !l.is_empty()).collect()
    }
}
