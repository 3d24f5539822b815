// tests/workflow_test.rs
//
// Full workflow runs over the in-memory remote and a stub toolchain.

use std::path::{Path, PathBuf};

use gop_setup::config::Config;
use gop_setup::git::{CheckoutRef, MockRemote};
use gop_setup::toolchain::Toolchain;
use gop_setup::workflow::run_setup;
use gop_setup::{GopSetupError, Result};

/// Toolchain stub reporting a fixed version.
struct StubToolchain {
    reported_version: String,
    build_fails: bool,
}

impl StubToolchain {
    fn reporting(version: &str) -> Self {
        StubToolchain {
            reported_version: version.to_string(),
            build_fails: false,
        }
    }

    fn failing_build() -> Self {
        StubToolchain {
            reported_version: String::new(),
            build_fails: true,
        }
    }
}

impl Toolchain for StubToolchain {
    fn build_and_install(&self, source_dir: &Path) -> Result<()> {
        assert!(source_dir.is_dir(), "build must see the cloned checkout");
        if self.build_fails {
            return Err(GopSetupError::build("stub build failure"));
        }
        Ok(())
    }

    fn installed_version(&self) -> Result<String> {
        Ok(self.reported_version.clone())
    }
}

fn test_config(work_dir: PathBuf) -> Config {
    let mut config = Config::default();
    config.install.work_dir = work_dir;
    config
}

#[test]
fn test_run_setup_latest() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path().join("work"));
    let remote = MockRemote::with_tags(&["1.0.0", "2.0.0", "1.1.0", "invalid"]);
    let toolchain = StubToolchain::reporting("2.0.0");

    let report = run_setup(&config, &remote, &toolchain).unwrap();

    assert!(report.verified);
    assert_eq!(report.installed_version, "2.0.0");
    assert_eq!(report.checkout_ref, CheckoutRef::Tag("v2.0.0".to_string()));
    assert_eq!(report.outputs().to_lines()[0], "gop-version-verified=true");
}

#[test]
fn test_run_setup_branch_fallback_skips_verification() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path().join("work"));
    config.inputs.version = Some("feature-x".to_string());

    let mut remote = MockRemote::with_tags(&["1.0.0"]);
    remote.add_branch("feature-x");

    // The stub reports something no tagged version matches; a branch
    // fallback must not verify it.
    let toolchain = StubToolchain::reporting("9.9.9");

    let report = run_setup(&config, &remote, &toolchain).unwrap();

    assert!(!report.verified);
    assert_eq!(
        report.checkout_ref,
        CheckoutRef::Branch("feature-x".to_string())
    );
    assert_eq!(report.installed_version, "9.9.9");
    assert_eq!(
        report.outputs().to_lines()[0],
        "gop-version-verified=false"
    );
}

#[test]
fn test_run_setup_version_mismatch_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path().join("work"));
    config.inputs.version = Some("1.0.0".to_string());

    let remote = MockRemote::with_tags(&["1.0.0"]);
    let toolchain = StubToolchain::reporting("1.1.0");

    let result = run_setup(&config, &remote, &toolchain);
    assert!(matches!(
        result,
        Err(GopSetupError::VersionMismatch { .. })
    ));
}

#[test]
fn test_run_setup_build_failure_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path().join("work"));
    let remote = MockRemote::with_tags(&["1.0.0"]);
    let toolchain = StubToolchain::failing_build();

    let result = run_setup(&config, &remote, &toolchain);
    assert!(matches!(result, Err(GopSetupError::Build(_))));
}

#[test]
fn test_run_setup_clears_stale_work_dir() {
    let dir = tempfile::tempdir().unwrap();
    let work_dir = dir.path().join("work");

    // Leftovers from a previous failed attempt.
    std::fs::create_dir_all(work_dir.join("gop")).unwrap();
    std::fs::write(work_dir.join("gop").join("stale"), "old").unwrap();

    let config = test_config(work_dir.clone());
    let remote = MockRemote::with_tags(&["1.0.0"]);
    let toolchain = StubToolchain::reporting("1.0.0");

    run_setup(&config, &remote, &toolchain).unwrap();

    assert!(!work_dir.join("gop").join("stale").exists());
}

#[test]
fn test_run_setup_version_file_input() {
    let dir = tempfile::tempdir().unwrap();
    let version_file = dir.path().join("gop.mod");
    std::fs::write(&version_file, "gop 1.1.0\nrequire (...)\n").unwrap();

    let mut config = test_config(dir.path().join("work"));
    config.inputs.version_file = Some(version_file.to_string_lossy().into_owned());

    let remote = MockRemote::with_tags(&["1.0.0", "1.1.0", "2.0.0"]);
    let toolchain = StubToolchain::reporting("1.1.0");

    let report = run_setup(&config, &remote, &toolchain).unwrap();

    assert!(report.verified);
    assert_eq!(report.checkout_ref, CheckoutRef::Tag("v1.1.0".to_string()));
}
