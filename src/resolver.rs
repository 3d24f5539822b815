//! Version resolution: from input spec to a concrete checkout reference.

use std::fs;
use std::path::Path;

use regex::Regex;
use semver::Version;

use crate::config::Config;
use crate::constraint;
use crate::error::{GopSetupError, Result};
use crate::git::{CheckoutRef, Remote};
use crate::ui;
use crate::version::collect_valid_versions;

/// Outcome of version resolution, consumed to drive checkout.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The spec named an available tagged version verbatim
    ExactTag(Version),
    /// Highest version satisfying the constraint (also the "latest" selection)
    Constraint(Version),
    /// No tag satisfied the spec, but it names a remote branch
    Branch(String),
}

impl Resolution {
    /// The selected version, if resolution landed on a tagged version.
    pub fn selected_version(&self) -> Option<&Version> {
        match self {
            Resolution::ExactTag(version) | Resolution::Constraint(version) => Some(version),
            Resolution::Branch(_) => None,
        }
    }

    /// Whether the installed binary can be verified against a concrete
    /// version. Branch fallbacks are unverified.
    pub fn verified(&self) -> bool {
        self.selected_version().is_some()
    }

    /// Derive the reference to clone: tagged versions use the upstream
    /// "v"-prefixed tag convention, branches are used as-is.
    pub fn checkout_ref(&self) -> CheckoutRef {
        match self {
            Resolution::ExactTag(version) | Resolution::Constraint(version) => {
                CheckoutRef::Tag(format!("v{}", version))
            }
            Resolution::Branch(name) => CheckoutRef::Branch(name.clone()),
        }
    }
}

/// Resolves a version spec against the upstream tag and branch lists.
pub struct Resolver<'a, R: Remote> {
    remote: &'a R,
}

impl<'a, R: Remote> Resolver<'a, R> {
    pub fn new(remote: &'a R) -> Self {
        Resolver { remote }
    }

    /// The sorted valid-version set from the upstream tag list.
    pub fn available_versions(&self) -> Result<Vec<Version>> {
        Ok(collect_valid_versions(&self.remote.fetch_tags()?))
    }

    /// Resolve a version spec to a checkout target.
    ///
    /// An empty spec or the literal "latest" selects the highest tagged
    /// version (fatal when no valid tags exist). Otherwise the spec is
    /// matched against the tagged versions - exact match first, then as a
    /// constraint expression - and finally against the branch list. A spec
    /// matching neither is fatal.
    ///
    /// # Arguments
    /// * `spec` - Version specification: "", "latest", an exact version, a
    ///   constraint expression, or a branch name
    pub fn resolve(&self, spec: &str) -> Result<Resolution> {
        let versions = self.available_versions()?;

        if spec.is_empty() || spec == "latest" {
            let latest = versions.into_iter().next().ok_or(GopSetupError::NoValidTags)?;
            ui::display_warning(&format!(
                "No gop version specified, using latest version: {}",
                latest
            ));
            return Ok(Resolution::Constraint(latest));
        }

        let pinned = spec.strip_prefix('v').unwrap_or(spec);
        if let Some(version) = versions.iter().find(|v| v.to_string() == pinned) {
            return Ok(Resolution::ExactTag(version.clone()));
        }

        if let Some(version) = constraint::max_satisfying(&versions, spec) {
            return Ok(Resolution::Constraint(version));
        }

        ui::display_warning(&format!(
            "No gop version found that satisfies '{}', trying branches...",
            spec
        ));
        let branches = self.remote.fetch_branches()?;
        if branches.iter().any(|branch| branch == spec) {
            return Ok(Resolution::Branch(spec.to_string()));
        }

        Err(GopSetupError::no_matching_ref(spec))
    }
}

/// Resolve the version spec from configuration inputs.
///
/// An explicit spec wins over a version file (with a warning). A configured
/// version file must exist; its parse may still yield an empty spec, which
/// downstream means "latest". Neither input configured also means "latest".
pub fn resolve_version_input(config: &Config) -> Result<String> {
    let version = config.inputs.version.as_deref().unwrap_or("").trim();
    let version_file = config.inputs.version_file.as_deref().unwrap_or("").trim();

    if !version.is_empty() && !version_file.is_empty() {
        ui::display_warning(
            "Both version and version-file inputs are specified, only version will be used",
        );
        return Ok(version.to_string());
    }

    if !version.is_empty() {
        return Ok(version.to_string());
    }

    if !version_file.is_empty() {
        let path = Path::new(version_file);
        if !path.exists() {
            return Err(GopSetupError::version_file(format!(
                "the specified gop version file at {} does not exist",
                version_file
            )));
        }
        return parse_version_file(path);
    }

    Ok(String::new())
}

/// Extract a version spec from a version file.
///
/// Files named `gop.mod` or `gop.work` are scanned for the `gop <version>`
/// directive at the start of the file content; no directive yields an empty
/// string, not an error. Any other file is read as a plain version string,
/// trimmed.
pub fn parse_version_file(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)?;

    let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    if filename == "gop.mod" || filename == "gop.work" {
        let re = match Regex::new(r"^gop (\d+(\.\d+)*)") {
            Ok(re) => re,
            Err(_) => return Err(GopSetupError::version_file("invalid gop directive pattern")),
        };
        return Ok(re
            .captures(&content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default());
    }

    Ok(content.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolution_checkout_ref_for_version() {
        let resolution = Resolution::Constraint(Version::new(2, 0, 0));
        assert_eq!(
            resolution.checkout_ref(),
            CheckoutRef::Tag("v2.0.0".to_string())
        );
        assert!(resolution.verified());
    }

    #[test]
    fn test_resolution_checkout_ref_for_branch() {
        let resolution = Resolution::Branch("feature-x".to_string());
        assert_eq!(
            resolution.checkout_ref(),
            CheckoutRef::Branch("feature-x".to_string())
        );
        assert!(!resolution.verified());
    }

    fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_parse_version_file_gop_mod() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "gop.mod", "gop 1.2.3\nrequire (...)\n");
        assert_eq!(parse_version_file(&path).unwrap(), "1.2.3");
    }

    #[test]
    fn test_parse_version_file_gop_work() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "gop.work", "gop 1.1.0\n\nuse ./...\n");
        assert_eq!(parse_version_file(&path).unwrap(), "1.1.0");
    }

    #[test]
    fn test_parse_version_file_gop_mod_without_directive() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "gop.mod", "invalid content");
        assert_eq!(parse_version_file(&path).unwrap(), "");
    }

    #[test]
    fn test_parse_version_file_plain() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "version", "1.1.0\n");
        assert_eq!(parse_version_file(&path).unwrap(), "1.1.0");
    }

    #[test]
    fn test_resolve_version_input_explicit_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "gop.mod", "gop 1.2.3\n");

        let mut config = Config::default();
        config.inputs.version = Some("1.0.0".to_string());
        config.inputs.version_file = Some(path.to_string_lossy().into_owned());

        assert_eq!(resolve_version_input(&config).unwrap(), "1.0.0");
    }

    #[test]
    fn test_resolve_version_input_missing_file_fails() {
        let mut config = Config::default();
        config.inputs.version_file = Some("nonexistent".to_string());

        let result = resolve_version_input(&config);
        assert!(matches!(result, Err(GopSetupError::VersionFile(_))));
    }

    #[test]
    fn test_resolve_version_input_defaults_to_empty() {
        let config = Config::default();
        assert_eq!(resolve_version_input(&config).unwrap(), "");
    }
}
