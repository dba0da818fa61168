//! History store abstraction and the author-filtered commit enumerator.

use crate::error::Result;
use crate::models::{AuthorFilter, ChangedPath, CommitId, CommitInfo, TreeRef};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Read-only queries the walker needs from version control.
///
/// [`crate::git::GitCli`] answers them by running the `git` binary; tests
/// substitute an in-memory store.
pub trait HistoryStore {
    /// Resolves a user-supplied reference to a commit. Unknown references
    /// fail with [`crate::Error::InvalidReference`].
    fn resolve(&self, reference: &str) -> Result<CommitId>;

    /// Commits reachable from the tip but not from `since`, oldest first.
    /// Stores may pre-filter by author and drop merges.
    fn log(&self, since: &CommitId, filter: &AuthorFilter) -> Result<Vec<CommitInfo>>;

    /// Human-readable per-file change summary of one commit.
    fn stat(&self, commit: &CommitId) -> Result<String>;

    /// Paths the commit added, modified or deleted relative to its parent,
    /// in the order the store reports them.
    fn changed_paths(&self, commit: &CommitId) -> Result<Vec<ChangedPath>>;

    /// Bytes of `path` in `tree`, or `None` when the path is absent there.
    fn read_blob(&self, tree: &TreeRef, path: &str) -> Result<Option<Vec<u8>>>;

    /// Every file path in `tree`.
    fn tree_paths(&self, tree: &TreeRef) -> Result<BTreeSet<String>>;
}

impl<H: HistoryStore + ?Sized> HistoryStore for &H {
    fn resolve(&self, reference: &str) -> Result<CommitId> {
        (**self).resolve(reference)
    }

    fn log(&self, since: &CommitId, filter: &AuthorFilter) -> Result<Vec<CommitInfo>> {
        (**self).log(since, filter)
    }

    fn stat(&self, commit: &CommitId) -> Result<String> {
        (**self).stat(commit)
    }

    fn changed_paths(&self, commit: &CommitId) -> Result<Vec<ChangedPath>> {
        (**self).changed_paths(commit)
    }

    fn read_blob(&self, tree: &TreeRef, path: &str) -> Result<Option<Vec<u8>>> {
        (**self).read_blob(tree, path)
    }

    fn tree_paths(&self, tree: &TreeRef) -> Result<BTreeSet<String>> {
        (**self).tree_paths(tree)
    }
}

/// Lists the non-merge commits in `start..tip` whose author matches
/// `filter`, oldest first.
///
/// The starting reference itself is excluded. Whatever the store returns
/// is checked again here, so a store that ignores the filter still yields
/// only single-parent commits by the requested author.
pub fn enumerate<H: HistoryStore + ?Sized>(
    store: &H,
    start: &str,
    filter: &AuthorFilter,
) -> Result<Vec<CommitInfo>> {
    let since = store.resolve(start)?;
    debug!("Resolved {} to {}", start, since);

    let commits: Vec<CommitInfo> = store
        .log(&since, filter)?
        .into_iter()
        .filter(|commit| {
            if commit.is_merge() {
                debug!("Skipping merge commit {}", commit.id.short());
                return false;
            }
            if !filter.matches(commit) {
                debug!(
                    "Skipping {} by {} <{}>",
                    commit.id.short(),
                    commit.author_name,
                    commit.author_email
                );
                return false;
            }
            true
        })
        .collect();

    info!(
        "{} commit(s) by '{}' since {}",
        commits.len(),
        filter.pattern(),
        since.short()
    );
    Ok(commits)
}
