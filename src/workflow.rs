//! The sequential setup run: resolve, clone, build, verify, report.

use std::fs;

use crate::config::Config;
use crate::error::Result;
use crate::git::{CheckoutRef, Remote};
use crate::output::SetupOutputs;
use crate::resolver::{self, Resolution, Resolver};
use crate::toolchain::Toolchain;
use crate::ui;
use crate::verify;

/// Result of a completed setup run.
///
/// Returned to the caller, who is responsible for publishing; the workflow
/// itself writes nothing outside the working and install directories.
#[derive(Debug, Clone)]
pub struct SetupReport {
    pub resolution: Resolution,
    pub checkout_ref: CheckoutRef,
    /// True when a concrete version was selected and verified post-install
    pub verified: bool,
    /// The version string the installed binary reports
    pub installed_version: String,
}

impl SetupReport {
    /// The values to publish for downstream pipeline steps.
    pub fn outputs(&self) -> SetupOutputs {
        SetupOutputs {
            version_verified: self.verified,
            gop_version: self.installed_version.clone(),
        }
    }
}

/// Run the whole setup sequence.
///
/// Steps, strictly in order: resolve the input spec, resolve it against the
/// remote, clone the selected reference into a freshly cleared working
/// directory, build and install, verify the installed version when a
/// concrete version was selected (branch fallbacks skip verification), and
/// query the installed binary's version for the report.
///
/// Any failing step aborts the run; there is no retry and no rollback - the
/// working directory is cleared again on the next invocation.
pub fn run_setup<R: Remote, T: Toolchain>(
    config: &Config,
    remote: &R,
    toolchain: &T,
) -> Result<SetupReport> {
    let spec = resolver::resolve_version_input(config)?;
    let resolution = Resolver::new(remote).resolve(&spec)?;
    let checkout_ref = resolution.checkout_ref();

    if let Some(version) = resolution.selected_version() {
        let shown_spec = if spec.is_empty() { "latest" } else { spec.as_str() };
        ui::display_status(&format!(
            "Selected version {} by spec '{}'",
            version, shown_spec
        ));
    }

    // Clones land in a freshly cleared working directory, so partial state
    // from a previous failed attempt cannot corrupt this run.
    let work_dir = &config.install.work_dir;
    if work_dir.exists() {
        fs::remove_dir_all(work_dir)?;
    }
    fs::create_dir_all(work_dir)?;

    ui::display_status(&format!(
        "Cloning gop {} to {} ...",
        checkout_ref,
        work_dir.display()
    ));
    let source_dir = remote.clone_single_ref(&checkout_ref, &work_dir.join("gop"))?;
    ui::display_success("gop cloned");

    ui::display_status(&format!("Installing gop from {} ...", source_dir.display()));
    toolchain.build_and_install(&source_dir)?;
    ui::display_success("gop installed");

    if let Some(version) = resolution.selected_version() {
        ui::display_status(&format!("Testing gop {} ...", version));
        verify::check_version(&version.to_string(), toolchain)?;
    }

    let installed_version = toolchain.installed_version()?;
    let verified = resolution.verified();

    Ok(SetupReport {
        resolution,
        checkout_ref,
        verified,
        installed_version,
    })
}
