use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GopSetupError, Result};
use crate::git::{CheckoutRef, Remote};

/// Mock remote for testing without network access.
///
/// Tags are stored the way [Remote::fetch_tags] returns them: prefix-stripped.
pub struct MockRemote {
    tags: Vec<String>,
    branches: Vec<String>,
}

impl MockRemote {
    /// Create a new empty mock remote
    pub fn new() -> Self {
        MockRemote {
            tags: Vec::new(),
            branches: Vec::new(),
        }
    }

    /// Create a mock remote pre-populated with tag names
    pub fn with_tags(tags: &[&str]) -> Self {
        let mut remote = Self::new();
        for tag in tags {
            remote.add_tag(*tag);
        }
        remote
    }

    /// Add a tag name
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    /// Add a branch name
    pub fn add_branch(&mut self, name: impl Into<String>) {
        self.branches.push(name.into());
    }
}

impl Default for MockRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl Remote for MockRemote {
    fn fetch_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.clone())
    }

    fn fetch_branches(&self) -> Result<Vec<String>> {
        Ok(self.branches.clone())
    }

    fn clone_single_ref(&self, reference: &CheckoutRef, dest: &Path) -> Result<PathBuf> {
        let known = match reference {
            CheckoutRef::Tag(tag) => {
                let stripped = tag.strip_prefix('v').unwrap_or(tag);
                self.tags.iter().any(|t| t == stripped)
            }
            CheckoutRef::Branch(branch) => self.branches.iter().any(|b| b == branch),
        };
        if !known {
            return Err(GopSetupError::Git(git2::Error::from_str(&format!(
                "remote ref not found: {}",
                reference.full_ref()
            ))));
        }

        fs::create_dir_all(dest)?;
        Ok(dest.to_path_buf())
    }
}
