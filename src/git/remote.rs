use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::git::{CheckoutRef, Remote};

/// Upstream repository accessed over the network through git2.
pub struct Git2Remote {
    url: String,
}

impl Git2Remote {
    /// Create a remote for the given repository URL.
    pub fn new(url: impl Into<String>) -> Self {
        Git2Remote { url: url.into() }
    }

    /// The repository URL this remote talks to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// List remote reference names under a namespace prefix, prefix stripped.
    ///
    /// Peeled entries for annotated tags ("...^{}") are skipped; they
    /// duplicate the tag name.
    fn list_refs(&self, prefix: &str) -> Result<Vec<String>> {
        let mut remote = git2::Remote::create_detached(self.url.as_str())?;
        remote.connect(git2::Direction::Fetch)?;

        let mut names = Vec::new();
        for head in remote.list()? {
            let name = head.name();
            if name.ends_with("^{}") {
                continue;
            }
            if let Some(short) = name.strip_prefix(prefix) {
                names.push(short.to_string());
            }
        }

        Ok(names)
    }
}

impl Remote for Git2Remote {
    fn fetch_tags(&self) -> Result<Vec<String>> {
        Ok(self
            .list_refs("refs/tags/")?
            .into_iter()
            .map(|tag| tag.strip_prefix('v').map(str::to_string).unwrap_or(tag))
            .collect())
    }

    fn fetch_branches(&self) -> Result<Vec<String>> {
        self.list_refs("refs/heads/")
    }

    fn clone_single_ref(&self, reference: &CheckoutRef, dest: &Path) -> Result<PathBuf> {
        let repo = git2::Repository::init(dest)?;
        let mut remote = repo.remote_anonymous(&self.url)?;

        let mut options = git2::FetchOptions::new();
        options.depth(1);
        options.download_tags(git2::AutotagOption::None);

        let full_ref = reference.full_ref();
        let refspec = format!("+{}:{}", full_ref, full_ref);
        remote.fetch(&[refspec.as_str()], Some(&mut options), None)?;

        let commit = repo.find_reference(&full_ref)?.peel_to_commit()?;
        let mut checkout = git2::build::CheckoutBuilder::new();
        checkout.force();
        repo.checkout_tree(commit.as_object(), Some(&mut checkout))?;
        repo.set_head_detached(commit.id())?;

        Ok(dest.to_path_buf())
    }
}
