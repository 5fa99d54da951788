//! Reference extraction from raw source text.
//!
//! Extraction is a plain text scan, not a parse: comments and string contents
//! are not recognized, so a commented-out `@import` is still a reference.
//!
//! Three stages produce the raw references for one file:
//! 1. the line extractor applies the profile pattern to every line
//! 2. the multi-pass extractor (if configured) narrows the whole text through
//!    a chain of patterns and captures from each surviving snippet
//! 3. the exclusion filter drops empty references and those matching a rule
//!
//! Duplicates are kept; deduplication happens at the path level during the walk.

use regex::Regex;

use crate::profile::{Exclusion, ExtractionProfile, MultiPass};

/// Returns capture group 1 of `pattern` for every matching line, in line order.
#[must_use]
pub fn extract_lines(source: &str, pattern: &Regex) -> Vec<String> {
    source
        .lines()
        .filter_map(|line| pattern.captures(line))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Runs the narrowing chain over the whole text and captures the references.
///
/// Every pass is applied in find-all mode to every snippet produced by the
/// previous one; snippets that no longer match simply disappear.
#[must_use]
pub fn extract_multi_pass(source: &str, chain: &MultiPass) -> Vec<String> {
    let mut snippets: Vec<&str> = vec![source];

    for pass in chain.passes() {
        snippets = snippets
            .iter()
            .filter(|snippet| !snippet.is_empty())
            .flat_map(|snippet| pass.find_iter(snippet).map(|m| m.as_str()))
            .collect();
    }

    snippets
        .into_iter()
        .filter_map(|snippet| chain.capture().captures(snippet))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Keeps the references that are non-empty and match no exclusion rule.
#[must_use]
pub fn filter_excluded(references: Vec<String>, exclusions: &[Exclusion]) -> Vec<String> {
    references
        .into_iter()
        .filter(|reference| !reference.is_empty())
        .filter(|reference| !exclusions.iter().any(|rule| rule.matches(reference)))
        .collect()
}

/// Extracts the filtered raw references of one file under `profile`.
///
/// Line matches come first, followed by multi-pass matches.
#[must_use]
pub fn extract_references(source: &str, profile: &ExtractionProfile) -> Vec<String> {
    let mut references = match &profile.pattern {
        Some(pattern) => extract_lines(source, pattern),
        None => Vec::new(),
    };

    if let Some(chain) = &profile.multi_pass {
        references.extend(extract_multi_pass(source, chain));
    }

    filter_excluded(references, &profile.exclusions)
}
