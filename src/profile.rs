//! Per-language extraction profiles.
//!
//! The registry maps a file extension to the default way references are found
//! and resolved for that language. [`ExtractionProfile::build`] overlays the
//! caller's [`ResolverConfig`] on top of those defaults and compiles every
//! pattern once, producing an immutable profile for a single invocation.
//!
//! # Built-in Profiles
//!
//! | Extension | Syntax | Extras |
//! |-----------|--------|--------|
//! | `jade` | `include` / `extends` | |
//! | `styl` | `@import` / `@require` | excludes `nib`, module-style, globs |
//! | `less` | `@import (options) url(...)` | |
//! | `scss`, `sass` | `@import` | `_` prefix, `^compass` excluded, `scss`/`sass` alternates, multi-pass |
//! | `css` | `@import url(...)` | |
//!
//! Unknown extensions get an empty profile: no pattern, so nothing is found.

use regex::Regex;
use tracing::debug;

use crate::config::{ExclusionRule, ResolverConfig};
use crate::core::ProgenyError;
use crate::utils::path::extname;

const JADE_PATTERN: &str = r"^\s*(?:include|extends)\s+(.+)";
const STYL_PATTERN: &str = r#"^\s*(?:@import|@require)\s*['"]?([^'"]+)['"]?"#;
const LESS_PATTERN: &str = r#"^\s*@import\s*(?:\([\w, ]+\)\s*)?(?:(?:url\()?['"]?([^'")]+)['"]?)"#;
const SASS_PATTERN: &str = r#"^\s*@import\s*['"]?([^'"]+)['"]?"#;
const CSS_PATTERN: &str = r#"^\s*@import\s*(?:url\()?['"]([^'"]+)['"]"#;

// `@import 'a', "b";` statement → each quoted item → the bare reference
const SASS_MULTI_PASS: [&str; 3] = [r"@import[^;]+;", r#"\s*['"][^'"]+['"]\s*,?"#, r#"(?:['"])([^'"]+)"#];

/// Returns the registry defaults for `extension` as a partial configuration.
///
/// Only the profile-related fields are ever set; search paths and invocation
/// flags stay empty.
///
/// # Examples
///
/// ```rust
/// use progeny_cli::profile::default_profile;
///
/// let scss = default_profile("scss");
/// assert_eq!(scss.prefix.as_deref(), Some("_"));
///
/// let unknown = default_profile("txt");
/// assert!(unknown.pattern.is_none());
/// ```
#[must_use]
pub fn default_profile(extension: &str) -> ResolverConfig {
    match extension {
        "jade" => ResolverConfig {
            pattern: Some(JADE_PATTERN.to_string()),
            ..Default::default()
        },
        "styl" => ResolverConfig {
            pattern: Some(STYL_PATTERN.to_string()),
            exclusions: Some(vec![ExclusionRule::literal("nib")]),
            module_style: Some(true),
            glob_aware: Some(true),
            ..Default::default()
        },
        "less" => ResolverConfig {
            pattern: Some(LESS_PATTERN.to_string()),
            ..Default::default()
        },
        "scss" | "sass" => ResolverConfig {
            pattern: Some(SASS_PATTERN.to_string()),
            prefix: Some("_".to_string()),
            exclusions: Some(vec![ExclusionRule::pattern("^compass")]),
            alternate_extensions: Some(vec!["scss".to_string(), "sass".to_string()]),
            multi_pass: Some(SASS_MULTI_PASS.iter().map(|p| (*p).to_string()).collect()),
            ..Default::default()
        },
        "css" => ResolverConfig {
            pattern: Some(CSS_PATTERN.to_string()),
            ..Default::default()
        },
        _ => ResolverConfig::default(),
    }
}

/// A compiled exclusion rule.
#[derive(Debug, Clone)]
pub enum Exclusion {
    /// Matches by exact equality
    Literal(String),
    /// Matches when the pattern is found anywhere in the reference
    Pattern(Regex),
}

impl Exclusion {
    /// Returns `true` when `reference` must be dropped.
    #[must_use]
    pub fn matches(&self, reference: &str) -> bool {
        match self {
            Self::Literal(text) => text == reference,
            Self::Pattern(re) => re.is_match(reference),
        }
    }
}

/// Narrowing passes plus the final capturing pattern.
///
/// Always holds at least one pass and a final pattern.
#[derive(Debug, Clone)]
pub struct MultiPass {
    passes: Vec<Regex>,
    capture: Regex,
}

impl MultiPass {
    /// Patterns applied in find-all mode, in order.
    #[must_use]
    pub fn passes(&self) -> &[Regex] {
        &self.passes
    }

    /// Final pattern whose first capture group is the reference.
    #[must_use]
    pub fn capture(&self) -> &Regex {
        &self.capture
    }
}

/// Immutable extraction and resolution settings for one invocation.
#[derive(Debug, Clone, Default)]
pub struct ExtractionProfile {
    /// Per-line pattern; `None` means no line yields a reference
    pub pattern: Option<Regex>,
    /// Filename prefix variant
    pub prefix: Option<String>,
    /// Rules that drop raw references
    pub exclusions: Vec<Exclusion>,
    /// Extensions substituted for the canonical one
    pub alternate_extensions: Vec<String>,
    /// Optional whole-text extraction chain
    pub multi_pass: Option<MultiPass>,
    /// `name` resolves as `name.ext` or `name/index.ext`
    pub module_style: bool,
    /// Glob references are expanded instead of read
    pub glob_aware: bool,
    /// Extension (without dot) appended to extensionless references
    pub canonical_extension: Option<String>,
}

impl ExtractionProfile {
    /// Builds the profile for resolving `root_path` under `config`.
    ///
    /// The canonical extension is `config.extension` or, failing that, the
    /// root file's own extension. Registry defaults for that extension fill any
    /// field the config leaves unset.
    ///
    /// # Errors
    ///
    /// Returns [`ProgenyError::InvalidPattern`] if any pattern fails to compile
    /// and [`ProgenyError::InvalidMultiPass`] for a chain shorter than two.
    pub fn build(config: &ResolverConfig, root_path: &str) -> Result<Self, ProgenyError> {
        let extension = config
            .extension
            .clone()
            .unwrap_or_else(|| extname(root_path).trim_start_matches('.').to_string());
        let defaults = default_profile(&extension);

        let pattern = config.pattern.as_deref().or(defaults.pattern.as_deref()).map(compile).transpose()?;

        let exclusions = config
            .exclusions
            .as_ref()
            .or(defaults.exclusions.as_ref())
            .map(|rules| rules.iter().map(compile_exclusion).collect::<Result<Vec<_>, _>>())
            .transpose()?
            .unwrap_or_default();

        let multi_pass = match config.multi_pass.as_ref().or(defaults.multi_pass.as_ref()) {
            Some(chain) => Some(compile_multi_pass(chain)?),
            None => None,
        };

        let profile = Self {
            pattern,
            prefix: config.prefix.clone().or(defaults.prefix).filter(|p| !p.is_empty()),
            exclusions,
            alternate_extensions: config
                .alternate_extensions
                .clone()
                .or(defaults.alternate_extensions)
                .unwrap_or_default(),
            multi_pass,
            module_style: config.module_style.or(defaults.module_style).unwrap_or(false),
            glob_aware: config.glob_aware.or(defaults.glob_aware).unwrap_or(false),
            canonical_extension: Some(extension).filter(|e| !e.is_empty()),
        };

        debug!(
            "Built profile for {root_path}: extension={:?}, prefix={:?}, module_style={}, glob_aware={}, multi_pass={}",
            profile.canonical_extension,
            profile.prefix,
            profile.module_style,
            profile.glob_aware,
            profile.multi_pass.is_some()
        );

        Ok(profile)
    }
}

fn compile(pattern: &str) -> Result<Regex, ProgenyError> {
    Regex::new(pattern).map_err(|source| ProgenyError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn compile_exclusion(rule: &ExclusionRule) -> Result<Exclusion, ProgenyError> {
    Ok(match rule {
        ExclusionRule::Literal(text) => Exclusion::Literal(text.clone()),
        ExclusionRule::Pattern(pattern) => Exclusion::Pattern(compile(pattern)?),
    })
}

fn compile_multi_pass(chain: &[String]) -> Result<MultiPass, ProgenyError> {
    let Some((last, passes)) = chain.split_last().filter(|(_, passes)| !passes.is_empty()) else {
        return Err(ProgenyError::InvalidMultiPass {
            len: chain.len(),
        });
    };

    Ok(MultiPass {
        passes: passes.iter().map(|p| compile(p)).collect::<Result<_, _>>()?,
        capture: compile(last)?,
    })
}
