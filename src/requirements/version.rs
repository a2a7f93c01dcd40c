//! Tool version parsing and comparison.

use regex::Regex;
use std::sync::LazyLock;

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)*").expect("valid version regex"));

/// Outcome of [`compare_versions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionOrdering {
    /// The first version is newer.
    FirstGreater,
    /// No difference was found.
    Equal,
    /// The second version is newer.
    SecondGreater,
}

/// Compare two dot-separated version strings.
///
/// Components are compared as integers, position by position. When one side
/// runs out of components before a difference is found the result is
/// [`VersionOrdering::Equal`]: `1.5` and `1.5.13` compare equal. A warning is
/// logged whenever the component counts differ. Because of this,
/// `compare_versions(a, b)` is not always the inverse of
/// `compare_versions(b, a)`.
pub fn compare_versions(first: &str, second: &str) -> VersionOrdering {
    if first == second {
        return VersionOrdering::Equal;
    }

    let first_parts: Vec<u64> = first.split('.').map(parse_component).collect();
    let second_parts: Vec<u64> = second.split('.').map(parse_component).collect();

    if first_parts.len() != second_parts.len() {
        tracing::warn!(
            "Versions {} and {} have different lengths; comparing the common prefix only",
            first,
            second
        );
    }

    for (a, b) in first_parts.iter().zip(second_parts.iter()) {
        if a > b {
            return VersionOrdering::FirstGreater;
        }
        if a < b {
            return VersionOrdering::SecondGreater;
        }
    }

    VersionOrdering::Equal
}

/// Integer value of a version component's leading digits (0 if none).
fn parse_component(component: &str) -> u64 {
    let digits: String = component
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Extract the first dotted version number from a tool's `--version` output.
///
/// `wine-1.5.13` gives `1.5.13`; `wine-8.0 (Staging)` gives `8.0`.
pub fn extract_version(output: &str) -> Option<String> {
    VERSION_PATTERN
        .find(output)
        .map(|m| m.as_str().to_string())
}

/// Extract a winetricks-style release date (`YYYYMMDD`) from its output.
///
/// Only the first whitespace-separated token is considered, so
/// `20240105 - sha256sum: ...` gives `20240105`.
pub fn extract_release_date(output: &str) -> Option<u64> {
    let token = output.split_whitespace().next()?;
    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
