//! Strict semantic version parsing and ordering for upstream release tags.

use semver::Version;

use crate::error::{GopSetupError, Result};

/// Parses a version string into a strict three-component semantic version.
///
/// Accepts an optional leading 'v' and optional pre-release/build suffixes.
/// Shorthand forms such as "1.0" or "v1" are rejected even though a lenient
/// range grammar would accept them: the numeric part in front of any
/// `-prerelease`/`+build` suffix must have exactly three dot-separated
/// components, and the whole string must parse under the semver grammar.
///
/// # Arguments
/// * `raw` - Version string to parse (e.g., "v1.2.3" or "1.0.0-beta.1")
///
/// # Returns
/// * `Ok(Version)` - Successfully parsed version
/// * `Err` - If the string is not a complete semantic version
pub fn parse_version(raw: &str) -> Result<Version> {
    let clean = raw.strip_prefix('v').unwrap_or(raw);

    let numeric = clean.split(&['-', '+'][..]).next().unwrap_or(clean);
    if numeric.split('.').count() != 3 {
        return Err(GopSetupError::version(format!(
            "invalid version format '{}' - expected X.Y.Z",
            raw
        )));
    }

    Version::parse(clean)
        .map_err(|e| GopSetupError::version(format!("invalid version '{}': {}", raw, e)))
}

/// Checks whether a string is a valid complete semantic version.
pub fn is_valid_version(raw: &str) -> bool {
    parse_version(raw).is_ok()
}

/// Builds the ordered version set from a raw tag list.
///
/// Entries that are not complete semantic versions are silently discarded
/// (garbage tags are expected upstream). The result is a new vector sorted in
/// descending precedence order; build metadata does not participate in the
/// ordering. Each element's canonical string form is its `Display` output:
/// no 'v' prefix, normalized `major.minor.patch[-prerelease][+build]`.
///
/// # Arguments
/// * `raw` - Tag names as fetched from the remote, in any order
///
/// # Returns
/// Sorted vector of parsed versions, highest first
pub fn collect_valid_versions(raw: &[String]) -> Vec<Version> {
    let mut versions: Vec<Version> = raw
        .iter()
        .filter_map(|tag| parse_version(tag).ok())
        .collect();

    versions.sort_by(|a, b| b.cmp_precedence(a));
    versions
}
