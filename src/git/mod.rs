//! Remote repository abstraction layer
//!
//! The resolver and workflow depend on the [Remote] trait rather than a
//! concrete transport, so tests can run against an in-memory remote. The
//! concrete implementations are:
//!
//! - [remote::Git2Remote]: the real implementation using the `git2` crate
//! - [mock::MockRemote]: an in-memory implementation for testing

pub mod mock;
pub mod remote;

pub use mock::MockRemote;
pub use remote::Git2Remote;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// A git reference selected for checkout.
///
/// Resolution derives either a release tag (the upstream convention prefixes
/// tags with 'v') or a bare branch name; cloning needs to know which ref
/// namespace to fetch from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutRef {
    /// Release tag name, 'v'-prefixed (e.g., "v1.2.3")
    Tag(String),
    /// Branch name, unprefixed (e.g., "main")
    Branch(String),
}

impl CheckoutRef {
    /// The short reference name passed to clone.
    pub fn name(&self) -> &str {
        match self {
            CheckoutRef::Tag(name) => name,
            CheckoutRef::Branch(name) => name,
        }
    }

    /// The fully qualified reference name in the remote's namespace.
    pub fn full_ref(&self) -> String {
        match self {
            CheckoutRef::Tag(name) => format!("refs/tags/{}", name),
            CheckoutRef::Branch(name) => format!("refs/heads/{}", name),
        }
    }
}

impl fmt::Display for CheckoutRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Read and clone operations against the upstream repository.
///
/// All methods are synchronous blocking calls; the workflow performs them
/// strictly one at a time.
pub trait Remote: Send + Sync {
    /// List remote tag names, with "refs/tags/" and any leading 'v' stripped.
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Tag names, unsorted, garbage included
    /// * `Err` - If the remote cannot be contacted
    fn fetch_tags(&self) -> Result<Vec<String>>;

    /// List remote branch names, with "refs/heads/" stripped.
    fn fetch_branches(&self) -> Result<Vec<String>>;

    /// Shallow-clone a single reference into `dest`.
    ///
    /// Only the named ref is fetched, at depth 1.
    ///
    /// # Arguments
    /// * `reference` - The tag or branch to check out
    /// * `dest` - Destination directory (created if missing)
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - The checkout directory
    /// * `Err` - If the ref does not exist or the clone fails
    fn clone_single_ref(&self, reference: &CheckoutRef, dest: &Path) -> Result<PathBuf>;
}
