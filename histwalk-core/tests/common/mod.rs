//! In-memory collaborators for walker tests.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use histwalk_core::stat::StatLine;
use histwalk_core::{
    AuthorFilter, ChangeKind, ChangedPath, CommitId, CommitInfo, Error, HistoryStore, Reporter,
    Result, SkipReason, TreeRef, Viewer,
};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

type Tree = BTreeMap<String, Vec<u8>>;

/// A history kept in creation order; the last commit is the tip.
#[derive(Default)]
pub struct MemoryHistory {
    commits: Vec<(String, CommitInfo, Tree)>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a commit on top of `parents` (labels). The tree starts from the
    /// first parent; `None` content deletes the path.
    pub fn commit(
        &mut self,
        label: &str,
        author: &str,
        parents: &[&str],
        changes: &[(&str, Option<&[u8]>)],
    ) -> CommitId {
        let id = CommitId::new(format!("{:040x}", self.commits.len() + 1));
        let parent_ids: Vec<CommitId> = parents.iter().map(|p| self.id(p)).collect();
        let mut tree = parents
            .first()
            .map(|p| self.tree_of(&self.id(p)).clone())
            .unwrap_or_default();

        for (path, content) in changes {
            match content {
                Some(bytes) => {
                    tree.insert(path.to_string(), bytes.to_vec());
                }
                None => {
                    tree.remove(*path);
                }
            }
        }

        let info = CommitInfo {
            id: id.clone(),
            parents: parent_ids,
            author_name: author.to_string(),
            author_email: format!("{}@example.com", author.to_lowercase()),
            timestamp: Utc
                .timestamp_opt(1_700_000_000 + self.commits.len() as i64 * 60, 0)
                .unwrap(),
            subject: format!("{} by {}", label, author),
        };
        self.commits.push((label.to_string(), info, tree));
        id
    }

    pub fn id(&self, label: &str) -> CommitId {
        self.commits
            .iter()
            .find(|(l, _, _)| l == label)
            .map(|(_, info, _)| info.id.clone())
            .unwrap_or_else(|| panic!("no commit labelled {}", label))
    }

    fn position(&self, id: &CommitId) -> Option<usize> {
        self.commits.iter().position(|(_, info, _)| &info.id == id)
    }

    fn info(&self, id: &CommitId) -> &CommitInfo {
        &self.commits[self.position(id).expect("known commit")].1
    }

    fn tree_of(&self, id: &CommitId) -> &Tree {
        &self.commits[self.position(id).expect("known commit")].2
    }

    fn tree(&self, tree: &TreeRef) -> Option<&Tree> {
        match tree {
            TreeRef::Commit(id) => Some(self.tree_of(id)),
            TreeRef::ParentOf(id) => self.info(id).parents.first().map(|p| self.tree_of(p)),
            TreeRef::Tip => self.commits.last().map(|(_, _, tree)| tree),
        }
    }
}

impl HistoryStore for MemoryHistory {
    fn resolve(&self, reference: &str) -> Result<CommitId> {
        self.commits
            .iter()
            .find(|(label, info, _)| label == reference || info.id.as_str() == reference)
            .map(|(_, info, _)| info.id.clone())
            .ok_or_else(|| Error::InvalidReference(reference.to_string()))
    }

    /// Everything after `since`, unfiltered.
    fn log(&self, since: &CommitId, _filter: &AuthorFilter) -> Result<Vec<CommitInfo>> {
        let start = self.position(since).map(|i| i + 1).unwrap_or(0);
        Ok(self.commits[start..]
            .iter()
            .map(|(_, info, _)| info.clone())
            .collect())
    }

    fn stat(&self, commit: &CommitId) -> Result<String> {
        let paths = self.changed_paths(commit)?;
        let mut text: String = paths
            .iter()
            .map(|p| format!(" {} | 1 +\n", p.path))
            .collect();
        text.push_str(&format!(
            " {} files changed, {} insertions(+)\n",
            paths.len(),
            paths.len()
        ));
        Ok(text)
    }

    fn changed_paths(&self, commit: &CommitId) -> Result<Vec<ChangedPath>> {
        let empty = Tree::new();
        let after = self.tree_of(commit);
        let before = self
            .tree(&TreeRef::ParentOf(commit.clone()))
            .unwrap_or(&empty);

        let names: BTreeSet<&String> = before.keys().chain(after.keys()).collect();
        Ok(names
            .into_iter()
            .filter_map(|name| match (before.get(name), after.get(name)) {
                (None, Some(_)) => Some(ChangedPath::new(name.clone(), ChangeKind::Added)),
                (Some(_), None) => Some(ChangedPath::new(name.clone(), ChangeKind::Deleted)),
                (Some(a), Some(b)) if a != b => {
                    Some(ChangedPath::new(name.clone(), ChangeKind::Modified))
                }
                _ => None,
            })
            .collect())
    }

    fn read_blob(&self, tree: &TreeRef, path: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.tree(tree).and_then(|t| t.get(path).cloned()))
    }

    fn tree_paths(&self, tree: &TreeRef) -> Result<BTreeSet<String>> {
        Ok(self
            .tree(tree)
            .map(|t| t.keys().cloned().collect())
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewed {
    Open { name: String, content: String },
    Diff { before: String, after: String },
}

/// Records what it was shown, reading the staged files while they exist.
#[derive(Default)]
pub struct RecordingViewer {
    pub seen: RefCell<Vec<Viewed>>,
    pub fail: bool,
}

impl RecordingViewer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Viewer for &RecordingViewer {
    fn open(&self, path: &Path) -> Result<()> {
        if self.fail {
            return Err(Error::ViewerFailed {
                program: "recording".into(),
                status: "exit status: 1".into(),
            });
        }
        self.seen.borrow_mut().push(Viewed::Open {
            name: path.file_name().unwrap().to_string_lossy().into_owned(),
            content: fs::read_to_string(path)?,
        });
        Ok(())
    }

    fn diff(&self, before: &Path, after: &Path) -> Result<()> {
        if self.fail {
            return Err(Error::ViewerFailed {
                program: "recording".into(),
                status: "exit status: 1".into(),
            });
        }
        self.seen.borrow_mut().push(Viewed::Diff {
            before: fs::read_to_string(before)?,
            after: fs::read_to_string(after)?,
        });
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Commit(String),
    Viewing(String),
    Skipped(String, SkipReason),
}

#[derive(Default)]
pub struct RecordingReporter {
    pub events: Vec<Event>,
}

impl RecordingReporter {
    pub fn skipped(&self) -> Vec<(String, SkipReason)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Skipped(path, reason) => Some((path.clone(), reason.clone())),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn commit_header(&mut self, commit: &CommitInfo, _stat: &[StatLine]) {
        self.events.push(Event::Commit(commit.subject.clone()));
    }

    fn viewing(&mut self, path: &str, _kind: Option<ChangeKind>) {
        self.events.push(Event::Viewing(path.to_string()));
    }

    fn skipped(&mut self, path: &str, reason: &SkipReason) {
        self.events
            .push(Event::Skipped(path.to_string(), reason.clone()));
    }
}

pub fn author(name: &str) -> AuthorFilter {
    AuthorFilter::Substring(name.to_string())
}
