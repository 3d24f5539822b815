//! Post-install verification of the installed gop version.

use std::cmp::Ordering;

use crate::error::{GopSetupError, Result};
use crate::toolchain::Toolchain;
use crate::version::parse_version;

/// Check that the installed binary reports exactly the expected version.
///
/// Both the expected spec and the reported version must parse as strict
/// three-component versions; the comparison is precedence equality, so
/// pre-release identifiers must match while build metadata is ignored. This
/// is intentionally not a constraint check - the resolved concrete version is
/// compared against the concrete installed version.
///
/// # Arguments
/// * `expected_spec` - The version selected during resolution
/// * `toolchain` - Collaborator queried for the installed version
pub fn check_version<T: Toolchain + ?Sized>(expected_spec: &str, toolchain: &T) -> Result<()> {
    let reported = toolchain.installed_version()?;

    let expected = parse_version(expected_spec)
        .map_err(|_| GopSetupError::version(format!("invalid version spec: {}", expected_spec)))?;
    let installed = parse_version(&reported)
        .map_err(|_| GopSetupError::version(format!("invalid installed version: {}", reported)))?;

    if expected.cmp_precedence(&installed) != Ordering::Equal {
        return Err(GopSetupError::VersionMismatch {
            expected: expected.to_string(),
            installed: installed.to_string(),
        });
    }

    Ok(())
}
