// Integration tests for resolving real file trees
//
// Every test lays out files in a temporary project and resolves an entry
// point by absolute path, so returned dependencies are absolute too.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use progeny_cli::config::ExclusionRule;
use progeny_cli::{Progeny, ProgenyError, ProgenySync, ResolverConfig};

use crate::common::TestProject;

fn jade_project() -> Result<TestProject> {
    TestProject::with_files(&[
        ("index.jade", "extends layout\ninclude partials/head\n"),
        ("layout.jade", "include partials/footer\n"),
        ("partials/head.jade", "meta(charset='utf-8')\n"),
        ("partials/footer.jade", "footer\n"),
    ])
}

fn as_set(paths: Vec<PathBuf>) -> BTreeSet<PathBuf> {
    paths.into_iter().collect()
}

#[tokio::test]
async fn test_scss_partial_resolution() -> Result<()> {
    progeny_cli::test_utils::init_test_logging(None);

    let project =
        TestProject::with_files(&[("main.scss", "@import 'vars';\nbody { color: $c; }\n"), ("_vars.scss", "$c: red;\n")])?;

    let deps = Progeny::new(ResolverConfig::default()).resolve(project.file("main.scss"), None).await?;
    assert_eq!(deps, project.files(&["_vars.scss"]));
    Ok(())
}

#[test]
fn test_sequential_transitive_order() -> Result<()> {
    progeny_cli::test_utils::init_test_logging(None);

    let project = jade_project()?;
    let deps = ProgenySync::new(ResolverConfig::default()).resolve(project.file("index.jade"), None)?;

    assert_eq!(deps, project.files(&["layout.jade", "partials/footer.jade", "partials/head.jade"]));
    Ok(())
}

#[tokio::test]
async fn test_concurrent_level_order() -> Result<()> {
    progeny_cli::test_utils::init_test_logging(None);

    let project = jade_project()?;
    let deps = Progeny::new(ResolverConfig::default()).resolve(project.file("index.jade"), None).await?;

    assert_eq!(deps, project.files(&["layout.jade", "partials/head.jade", "partials/footer.jade"]));
    Ok(())
}

#[tokio::test]
async fn test_engines_agree_as_sets() -> Result<()> {
    progeny_cli::test_utils::init_test_logging(None);

    let project = TestProject::with_files(&[
        ("app.styl", "@import 'colors'\n@import 'mixins/*'\n@require 'nib'\n"),
        ("colors.styl", "@import 'palette'\n"),
        ("palette/index.styl", "red = #f00\n"),
        ("mixins/buttons.styl", "@import '../colors'\n"),
        ("mixins/forms.styl", ""),
    ])?;
    let root = project.file("app.styl");

    let sync = ProgenySync::new(ResolverConfig::default()).resolve(&root, None)?;
    let concurrent = Progeny::new(ResolverConfig::default()).resolve(&root, None).await?;

    let expected = as_set(project.files(&[
        "colors.styl",
        "palette/index.styl",
        "mixins/buttons.styl",
        "mixins/forms.styl",
    ]));
    assert_eq!(as_set(sync.clone()), expected);
    assert_eq!(as_set(concurrent.clone()), expected);
    assert_eq!(sync.len(), expected.len());
    assert_eq!(concurrent.len(), expected.len());
    Ok(())
}

#[tokio::test]
async fn test_cycle_back_to_root() -> Result<()> {
    progeny_cli::test_utils::init_test_logging(None);

    let project = TestProject::with_files(&[("a.less", "@import 'b';\n"), ("b.less", "@import 'a';\n")])?;
    let root = project.file("a.less");

    assert_eq!(ProgenySync::new(ResolverConfig::default()).resolve(&root, None)?, project.files(&["b.less"]));
    assert_eq!(Progeny::new(ResolverConfig::default()).resolve(&root, None).await?, project.files(&["b.less"]));
    Ok(())
}

#[test]
fn test_default_and_configured_exclusions() -> Result<()> {
    progeny_cli::test_utils::init_test_logging(None);

    let project = TestProject::with_files(&[
        ("app.styl", "@import 'nib'\n@import 'colors'\n@import 'vendor'\n"),
        ("nib.styl", ""),
        ("colors.styl", ""),
        ("vendor.styl", ""),
    ])?;
    let root = project.file("app.styl");

    let deps = ProgenySync::new(ResolverConfig::default()).resolve(&root, None)?;
    assert_eq!(deps, project.files(&["colors.styl", "vendor.styl"]));

    // Configured exclusions replace the defaults, so nib comes back
    let config = ResolverConfig {
        exclusions: Some(vec![ExclusionRule::pattern("^vend")]),
        ..Default::default()
    };
    let deps = ProgenySync::new(config).resolve(&root, None)?;
    assert_eq!(deps, project.files(&["nib.styl", "colors.styl"]));
    Ok(())
}

#[test]
fn test_root_and_auxiliary_paths() -> Result<()> {
    progeny_cli::test_utils::init_test_logging(None);

    let project = TestProject::with_files(&[
        ("src/main.less", "@import 'grid';\n@import 'reset';\n"),
        ("lib/grid.less", ""),
        ("vendor/reset.less", ""),
    ])?;

    let config = ResolverConfig {
        root_path: Some(project.file("lib")),
        auxiliary_paths: vec![project.file("vendor")],
        ..Default::default()
    };
    let deps = ProgenySync::new(config).resolve(project.file("src/main.less"), None)?;

    assert_eq!(deps, project.files(&["lib/grid.less", "vendor/reset.less"]));
    Ok(())
}

#[tokio::test]
async fn test_missing_root_is_an_error() -> Result<()> {
    progeny_cli::test_utils::init_test_logging(None);

    let project = TestProject::new()?;
    let root = project.file("missing.scss");

    let err = Progeny::new(ResolverConfig::default()).resolve(&root, None).await.unwrap_err();
    assert!(matches!(err, ProgenyError::RootUnreadable { ref path, .. } if *path == root));

    let err = ProgenySync::new(ResolverConfig::default()).resolve(&root, None).unwrap_err();
    assert!(matches!(err, ProgenyError::RootUnreadable { .. }));
    Ok(())
}

#[test]
fn test_supplied_source_and_swapped_arguments() -> Result<()> {
    progeny_cli::test_utils::init_test_logging(None);

    let project = TestProject::with_files(&[("reset.css", "")])?;
    let root = project.file("virtual.css");
    let source = "@import url('reset.css');\n";

    let deps = ProgenySync::new(ResolverConfig::default()).resolve(&root, Some(source))?;
    assert_eq!(deps, project.files(&["reset.css"]));

    let config = ResolverConfig {
        swap_arguments: true,
        ..Default::default()
    };
    let root = root.to_string_lossy().into_owned();
    let deps = ProgenySync::new(config).resolve_args(source, Some(&root))?;
    assert_eq!(deps, project.files(&["reset.css"]));
    Ok(())
}

#[tokio::test]
async fn test_speculative_recording_lists_guesses() -> Result<()> {
    progeny_cli::test_utils::init_test_logging(None);

    let project = TestProject::with_files(&[("main.scss", "@import 'theme';\n")])?;
    let config = ResolverConfig {
        speculative_recording: true,
        ..Default::default()
    };

    let deps = Progeny::new(config).resolve(project.file("main.scss"), None).await?;
    assert_eq!(deps, project.files(&["theme.scss", "_theme.scss", "theme.sass", "_theme.sass"]));
    Ok(())
}

#[tokio::test]
async fn test_repeated_resolution_is_stable() -> Result<()> {
    progeny_cli::test_utils::init_test_logging(None);

    let project = jade_project()?;
    let progeny = Progeny::new(ResolverConfig::default());
    let root = project.file("index.jade");

    let first = progeny.resolve(&root, None).await?;
    let second = progeny.resolve(&root, None).await?;
    assert_eq!(first, second);
    Ok(())
}
