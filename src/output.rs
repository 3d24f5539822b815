//! Structured run outputs and CI file publishing.
//!
//! The workflow returns values; only the caller decides whether and where to
//! publish them (CI output files in the `key=value` append convention).

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Values published for downstream pipeline steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupOutputs {
    /// Whether the installed binary was verified against a resolved version
    pub version_verified: bool,
    /// The version string the installed binary reports
    pub gop_version: String,
}

impl SetupOutputs {
    /// Render as `key=value` output-file lines.
    pub fn to_lines(&self) -> Vec<String> {
        vec![
            format!("gop-version-verified={}", self.version_verified),
            format!("gop-version={}", self.gop_version),
        ]
    }
}

/// Append outputs to a CI output file.
pub fn append_outputs(path: &Path, outputs: &SetupOutputs) -> Result<()> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    for line in outputs.to_lines() {
        writeln!(file, "{}", line)?;
    }
    Ok(())
}

/// Append a directory to a CI executable-search-path file.
pub fn append_path(path: &Path, dir: &Path) -> Result<()> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    writeln!(file, "{}", dir.display())?;
    Ok(())
}
