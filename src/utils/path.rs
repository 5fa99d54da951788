//! Lexical path helpers with POSIX-style semantics.
//!
//! Candidate paths are speculative strings, most of which never exist on disk,
//! so none of these helpers touch the filesystem. They mirror the conventions
//! build tools expect from import resolution:
//!
//! - joining normalizes `.` and `..` segments (leading `..` on relative paths is kept)
//! - the parent of a bare file name is `.`, and `.` joined with `x` is `x`
//! - an extension starts at the last `.` of the final component, unless that dot
//!   is the first character (`.bashrc` has no extension)

use std::path::Path;

fn is_separator(c: char) -> bool {
    c == '/' || (cfg!(windows) && c == '\\')
}

/// Normalizes a path by resolving `.` and `..` segments without filesystem access.
///
/// # Examples
///
/// ```rust
/// use progeny_cli::utils::path::normalize;
///
/// assert_eq!(normalize("a/./b/../c"), "a/c");
/// assert_eq!(normalize("../x/./y"), "../x/y");
/// assert_eq!(normalize("/a/../../b"), "/b");
/// assert_eq!(normalize("a/.."), ".");
/// ```
#[must_use]
pub fn normalize(path: &str) -> String {
    let absolute = path.starts_with(is_separator);
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split(is_separator) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            s => segments.push(s),
        }
    }

    let joined = segments.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Joins path fragments and normalizes the result.
///
/// Unlike [`std::path::Path::join`], an absolute `rest` does not replace `base`:
/// `join("styles", "/vendor/a")` is `styles/vendor/a`.
#[must_use]
pub fn join(base: &str, rest: &str) -> String {
    match (base.is_empty(), rest.is_empty()) {
        (true, true) => ".".to_string(),
        (true, false) => normalize(rest),
        (false, true) => normalize(base),
        (false, false) => normalize(&format!("{base}/{rest}")),
    }
}

/// Returns the directory portion of a path (`.` for a bare file name).
#[must_use]
pub fn dirname(path: &str) -> String {
    let trimmed = path.trim_end_matches(is_separator);
    if trimmed.is_empty() {
        return if path.is_empty() { ".".to_string() } else { "/".to_string() };
    }

    match trimmed.rfind(is_separator) {
        Some(0) => "/".to_string(),
        Some(idx) => trimmed[..idx].trim_end_matches(is_separator).to_string(),
        None => ".".to_string(),
    }
}

/// Returns the final component of a path.
#[must_use]
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches(is_separator);
    match trimmed.rfind(is_separator) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Returns the final component with `suffix` removed when it ends with it.
///
/// The suffix is kept when it is the whole component.
#[must_use]
pub fn basename_without<'a>(path: &'a str, suffix: &str) -> &'a str {
    let base = basename(path);
    match base.strip_suffix(suffix) {
        Some(stem) if !stem.is_empty() => stem,
        _ => base,
    }
}

/// Returns the extension of the final component including the leading dot,
/// or an empty string when there is none.
///
/// # Examples
///
/// ```rust
/// use progeny_cli::utils::path::extname;
///
/// assert_eq!(extname("styles/main.scss"), ".scss");
/// assert_eq!(extname("lib/index"), "");
/// assert_eq!(extname(".bashrc"), "");
/// assert_eq!(extname("archive.tar.gz"), ".gz");
/// ```
#[must_use]
pub fn extname(path: &str) -> &str {
    let base = basename(path);
    if base == ".." {
        return "";
    }
    match base.rfind('.') {
        Some(0) | None => "",
        Some(idx) => &base[idx..],
    }
}

/// Renders `path` relative to `base` when it lives underneath it, otherwise as-is.
#[must_use]
pub fn display_relative(path: &Path, base: &Path) -> String {
    let shown = path.strip_prefix(base).unwrap_or(path);
    let text = shown.to_string_lossy();
    if text.is_empty() { ".".to_string() } else { text.into_owned() }
}
