use crate::classify::Classifier;
use crate::error::Result;
use crate::history::HistoryStore;
use crate::models::TreeRef;
use crate::scratch::Scratch;
use std::path::PathBuf;
use tracing::debug;

/// A blob copied into the scratch area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staged {
    pub path: PathBuf,
    /// False when the path was absent from the tree and an empty file was
    /// staged in its place.
    pub existed: bool,
    pub binary: bool,
}

/// Copies `path` as of `tree` into `scratch` and classifies it.
///
/// A path missing from the tree (added in the commit, deleted by it, or a
/// root commit's parent) stages as empty content rather than failing.
/// Empty content is always text.
pub fn materialize<H, C>(
    store: &H,
    classifier: &C,
    scratch: &mut Scratch,
    tree: &TreeRef,
    path: &str,
    label: &str,
) -> Result<Staged>
where
    H: HistoryStore + ?Sized,
    C: Classifier + ?Sized,
{
    let blob = store.read_blob(tree, path)?;
    let existed = blob.is_some();
    let content = blob.unwrap_or_default();

    let staged = scratch.stage(label, path, &content)?;
    let binary = !content.is_empty() && classifier.is_binary(&staged)?;
    debug!(
        "Staged {} at {} ({} bytes, binary: {})",
        path,
        tree,
        content.len(),
        binary
    );

    Ok(Staged {
        path: staged,
        existed,
        binary,
    })
}
