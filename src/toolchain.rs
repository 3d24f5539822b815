//! Build and query collaborators for the installed gop toolchain.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{GopSetupError, Result};

/// Operations against the toolchain under installation.
///
/// Passed into the workflow and the verifier by reference, so tests can
/// substitute a stub without touching global state.
pub trait Toolchain: Send + Sync {
    /// Run the project's own build entrypoint, installing into the
    /// configured destination.
    fn build_and_install(&self, source_dir: &Path) -> Result<()>;

    /// Ask the installed binary for its version, trimmed, 'v' stripped.
    fn installed_version(&self) -> Result<String>;
}

/// Real gop toolchain driven through subprocesses.
pub struct GopToolchain {
    bin_dir: PathBuf,
}

impl GopToolchain {
    /// Create a toolchain installing into `bin_dir`.
    pub fn new(bin_dir: impl Into<PathBuf>) -> Self {
        GopToolchain {
            bin_dir: bin_dir.into(),
        }
    }

    /// The install destination directory.
    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }
}

impl Toolchain for GopToolchain {
    fn build_and_install(&self, source_dir: &Path) -> Result<()> {
        // The gop repository builds itself: `go run cmd/make.go -install`,
        // honoring GOBIN as the install destination.
        let status = Command::new("go")
            .args(["run", "cmd/make.go", "-install"])
            .current_dir(source_dir)
            .env("GOBIN", &self.bin_dir)
            .status()
            .map_err(|e| GopSetupError::build(format!("failed to run build command: {}", e)))?;

        if !status.success() {
            return Err(GopSetupError::build(format!(
                "build exited with status {}",
                status.code().unwrap_or(-1)
            )));
        }

        Ok(())
    }

    fn installed_version(&self) -> Result<String> {
        let output = Command::new("gop")
            .args(["env", "GOPVERSION"])
            .output()
            .map_err(|e| GopSetupError::build(format!("failed to query gop version: {}", e)))?;

        if !output.status.success() {
            return Err(GopSetupError::build(format!(
                "gop version query exited with status {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let version = String::from_utf8_lossy(&output.stdout);
        Ok(version.trim().trim_start_matches('v').to_string())
    }
}
