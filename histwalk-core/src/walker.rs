//! Drives diff mode and snapshot mode over an enumerated commit list.

use crate::classify::Classifier;
use crate::error::Result;
use crate::history::HistoryStore;
use crate::materialize::{materialize, Staged};
use crate::models::{ChangeKind, ChangedPath, CommitInfo, TreeRef};
use crate::scratch::Scratch;
use crate::stat::{parse_stat, StatLine};
use crate::viewer::Viewer;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The named side (`before`, `after`, `tip`) is binary.
    Binary(&'static str),
    /// No longer present at the branch tip.
    DeletedAtTip,
    /// The path is not valid UTF-8, so its content cannot be looked up.
    UnreadablePath,
    /// Lookup, staging or viewer failure.
    Failed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Binary(side) => write!(f, "binary content ({})", side),
            SkipReason::DeletedAtTip => f.write_str("deleted before the branch tip"),
            SkipReason::UnreadablePath => f.write_str("path is not valid UTF-8"),
            SkipReason::Failed(err) => f.write_str(err),
        }
    }
}

/// Receives progress while a mode runs. The CLI prints; tests record.
pub trait Reporter {
    fn commit_header(&mut self, commit: &CommitInfo, stat: &[StatLine]);

    /// Called right before the viewer is launched for `path`.
    fn viewing(&mut self, path: &str, kind: Option<ChangeKind>);

    fn skipped(&mut self, path: &str, reason: &SkipReason);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub viewed: usize,
    pub skipped: usize,
    pub interrupted: bool,
}

pub struct Walker<H, C, V> {
    store: H,
    classifier: C,
    viewer: V,
    scratch: Scratch,
    interrupt: Arc<AtomicBool>,
}

impl<H, C, V> Walker<H, C, V>
where
    H: HistoryStore,
    C: Classifier,
    V: Viewer,
{
    pub fn new(store: H, classifier: C, viewer: V) -> Result<Self> {
        Ok(Self {
            store,
            classifier,
            viewer,
            scratch: Scratch::new()?,
            interrupt: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Shares a flag that stops the walk before the next file once set.
    pub fn with_interrupt(mut self, interrupt: Arc<AtomicBool>) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn scratch(&self) -> &Scratch {
        &self.scratch
    }

    /// Releases the scratch area.
    pub fn finish(self) -> Result<()> {
        self.scratch.close()
    }

    fn interrupted(&self) -> bool {
        self.interrupt.load(Ordering::SeqCst)
    }

    /// For each commit, shows every changed file as parent-side against
    /// commit-side content, one viewer session at a time.
    pub fn diff_mode<R: Reporter + ?Sized>(
        &mut self,
        commits: &[CommitInfo],
        reporter: &mut R,
    ) -> Summary {
        let mut summary = Summary::default();

        'commits: for commit in commits {
            let stat = match self.store.stat(&commit.id) {
                Ok(text) => parse_stat(&text),
                Err(e) => {
                    warn!("No stat for {}: {}", commit.id.short(), e);
                    Vec::new()
                }
            };
            reporter.commit_header(commit, &stat);

            let paths = match self.store.changed_paths(&commit.id) {
                Ok(paths) => paths,
                Err(e) => {
                    summary.skipped += 1;
                    reporter.skipped(commit.id.short(), &SkipReason::Failed(e.to_string()));
                    continue;
                }
            };

            for changed in &paths {
                if self.interrupted() {
                    summary.interrupted = true;
                    break 'commits;
                }
                match self.diff_file(commit, changed, reporter) {
                    Ok(()) => summary.viewed += 1,
                    Err(reason) => {
                        summary.skipped += 1;
                        reporter.skipped(&changed.path, &reason);
                    }
                }
            }
        }

        info!(
            "Diff mode done: {} viewed, {} skipped",
            summary.viewed, summary.skipped
        );
        summary
    }

    fn diff_file<R: Reporter + ?Sized>(
        &mut self,
        commit: &CommitInfo,
        changed: &ChangedPath,
        reporter: &mut R,
    ) -> std::result::Result<(), SkipReason> {
        if changed.lossy {
            return Err(SkipReason::UnreadablePath);
        }
        let before = self
            .stage(&TreeRef::ParentOf(commit.id.clone()), &changed.path, "before")
            .map_err(failed)?;
        let after = self
            .stage(&TreeRef::Commit(commit.id.clone()), &changed.path, "after")
            .map_err(failed)?;

        if before.binary {
            return Err(SkipReason::Binary("before"));
        }
        if after.binary {
            return Err(SkipReason::Binary("after"));
        }

        reporter.viewing(&changed.path, Some(changed.kind));
        self.viewer
            .diff(&before.path, &after.path)
            .map_err(|e| SkipReason::Failed(format!("viewer: {}", e)))
    }

    /// Opens the tip version of every path the commits touched, in path
    /// order. Paths no longer present at the tip are skipped.
    ///
    /// Fails only when the tip tree itself cannot be listed.
    pub fn snapshot_mode<R: Reporter + ?Sized>(
        &mut self,
        commits: &[CommitInfo],
        reporter: &mut R,
    ) -> Result<Summary> {
        let mut summary = Summary::default();
        // path -> whether git reported it lossily
        let mut touched = BTreeMap::new();

        for commit in commits {
            match self.store.changed_paths(&commit.id) {
                Ok(paths) => {
                    for changed in paths {
                        *touched.entry(changed.path).or_insert(false) |= changed.lossy;
                    }
                }
                Err(e) => {
                    summary.skipped += 1;
                    reporter.skipped(commit.id.short(), &SkipReason::Failed(e.to_string()));
                }
            }
        }

        let tip = self.store.tree_paths(&TreeRef::Tip)?;
        info!(
            "{} distinct path(s) touched, {} file(s) at tip",
            touched.len(),
            tip.len()
        );

        for (path, &lossy) in &touched {
            if self.interrupted() {
                summary.interrupted = true;
                break;
            }
            let outcome = if lossy {
                Err(SkipReason::UnreadablePath)
            } else if tip.contains(path) {
                self.open_tip(path, reporter)
            } else {
                Err(SkipReason::DeletedAtTip)
            };
            match outcome {
                Ok(()) => summary.viewed += 1,
                Err(reason) => {
                    summary.skipped += 1;
                    reporter.skipped(path, &reason);
                }
            }
        }

        Ok(summary)
    }

    fn open_tip<R: Reporter + ?Sized>(
        &mut self,
        path: &str,
        reporter: &mut R,
    ) -> std::result::Result<(), SkipReason> {
        let staged = self.stage(&TreeRef::Tip, path, "tip").map_err(failed)?;
        if staged.binary {
            return Err(SkipReason::Binary("tip"));
        }

        reporter.viewing(path, None);
        self.viewer
            .open(&staged.path)
            .map_err(|e| SkipReason::Failed(format!("viewer: {}", e)))
    }

    fn stage(&mut self, tree: &TreeRef, path: &str, label: &str) -> Result<Staged> {
        materialize(
            &self.store,
            &self.classifier,
            &mut self.scratch,
            tree,
            path,
            label,
        )
    }
}

fn failed(err: crate::Error) -> SkipReason {
    SkipReason::Failed(err.to_string())
}
