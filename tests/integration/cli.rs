// Integration tests for the progeny binary

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;

use crate::common::TestProject;

fn scss_project() -> Result<TestProject> {
    TestProject::with_files(&[
        ("main.scss", "@import 'vars', 'mixins';\n"),
        ("_vars.scss", "$c: red;\n"),
        ("_mixins.scss", "@import 'vars';\n"),
    ])
}

#[test]
fn test_list_output() -> Result<()> {
    let project = scss_project()?;

    let output = project.run_progeny(&["main.scss"])?;
    output.assert_success();
    assert_eq!(output.lines(), vec!["_vars.scss", "_mixins.scss"]);
    Ok(())
}

#[test]
fn test_sync_flag_walks_depth_first() -> Result<()> {
    let project = TestProject::with_files(&[
        ("a.css", "@import 'b.css';\n@import 'c.css';\n"),
        ("b.css", "@import 'd.css';\n"),
        ("c.css", ""),
        ("d.css", ""),
    ])?;

    let output = project.run_progeny(&["--sync", "a.css"])?;
    output.assert_success();
    assert_eq!(output.lines(), vec!["b.css", "d.css", "c.css"]);

    let output = project.run_progeny(&["a.css"])?;
    output.assert_success();
    assert_eq!(output.lines(), vec!["b.css", "c.css", "d.css"]);
    Ok(())
}

#[test]
fn test_tree_output() -> Result<()> {
    let project = scss_project()?;

    let mut cmd = Command::cargo_bin("progeny").unwrap();
    cmd.current_dir(project.path()).env("NO_COLOR", "1").args(["--format", "tree", "main.scss"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("DEP main.scss"))
        .stdout(predicate::str::contains("    |--_vars.scss"))
        .stdout(predicate::str::contains("    |--_mixins.scss"));
    Ok(())
}

#[test]
fn test_tree_output_without_dependencies() -> Result<()> {
    let project = TestProject::with_files(&[("plain.css", "body {}\n")])?;

    let mut cmd = Command::cargo_bin("progeny").unwrap();
    cmd.current_dir(project.path()).env("NO_COLOR", "1").args(["--format", "tree", "plain.css"]);

    cmd.assert().success().stdout(predicate::str::contains("NO-DEP"));
    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let project = scss_project()?;

    let output = project.run_progeny(&["--format", "json", "main.scss"])?;
    output.assert_success();

    let value: serde_json::Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(value["root"], "main.scss");
    assert_eq!(value["dependencies"], serde_json::json!(["_vars.scss", "_mixins.scss"]));
    Ok(())
}

#[test]
fn test_exclude_flags() -> Result<()> {
    let project = scss_project()?;

    // Exclusions apply to every file in the walk, not only the root
    let output = project.run_progeny(&["--exclude", "vars", "main.scss"])?;
    output.assert_success();
    assert_eq!(output.lines(), vec!["_mixins.scss"]);

    let output = project.run_progeny(&["--sync", "--exclude-pattern", "^(vars|mixins)$", "main.scss"])?;
    output.assert_success();
    assert!(output.lines().is_empty());
    Ok(())
}

#[test]
fn test_config_file_is_applied() -> Result<()> {
    let project = TestProject::with_files(&[
        ("styles/main.less", "@import 'grid';\n"),
        ("shared/grid.less", ""),
        ("progeny.toml", "auxiliary_paths = [\"shared\"]\n"),
    ])?;

    let output = project.run_progeny(&["styles/main.less"])?;
    output.assert_success();
    assert_eq!(output.lines(), vec!["shared/grid.less"]);
    Ok(())
}

#[test]
fn test_module_style_can_be_disabled() -> Result<()> {
    let project = TestProject::with_files(&[
        ("app.styl", "@import 'colors'\n"),
        ("colors/index.styl", ""),
        ("colors.styl", ""),
    ])?;

    let output = project.run_progeny(&["app.styl"])?;
    output.assert_success();
    assert_eq!(output.lines(), vec!["colors.styl", "colors/index.styl"]);

    let output = project.run_progeny(&["--module-style=false", "app.styl"])?;
    output.assert_success();
    assert_eq!(output.lines(), vec!["colors.styl"]);
    Ok(())
}

#[test]
fn test_missing_file_fails() -> Result<()> {
    let project = TestProject::new()?;

    let mut cmd = Command::cargo_bin("progeny").unwrap();
    cmd.current_dir(project.path()).env("NO_COLOR", "1").arg("missing.scss");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Cannot read root file: missing.scss"))
        .stderr(predicate::str::contains("suggestion"));
    Ok(())
}

#[test]
fn test_explicit_missing_config_fails() -> Result<()> {
    let project = scss_project()?;

    let output = project.run_progeny(&["--config", "nope.toml", "main.scss"])?;
    assert!(!output.success);
    assert!(output.stderr.contains("Configuration file not found: nope.toml"));
    Ok(())
}

#[test]
fn test_invalid_config_fails() -> Result<()> {
    let project = scss_project()?;
    progeny_cli::test_utils::write_tree(project.path(), &[("progeny.toml", "unknown_option = 1\n")])?;

    let output = project.run_progeny(&["main.scss"])?;
    assert!(!output.success);
    assert!(output.stderr.contains("Invalid configuration file syntax"));
    Ok(())
}

#[test]
fn test_invalid_pattern_fails() -> Result<()> {
    let project = scss_project()?;

    let output = project.run_progeny(&["--pattern", "(unclosed", "main.scss"])?;
    assert!(!output.success);
    assert!(output.stderr.contains("Invalid pattern: (unclosed"));
    Ok(())
}

#[test]
fn test_debug_tree_keeps_json_stdout_valid() -> Result<()> {
    let project = scss_project()?;

    let output = project.run_progeny(&["--debug-tree", "--format", "json", "main.scss"])?;
    output.assert_success();

    let value: serde_json::Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(value["dependencies"], serde_json::json!(["_vars.scss", "_mixins.scss"]));
    assert!(output.stderr.contains("DEP main.scss"));
    assert!(output.stderr.contains("    |--_vars.scss"));
    Ok(())
}
