use chrono::{DateTime, Utc};
use std::fmt;

/// Full object name of a commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 7 characters, for display.
    pub fn short(&self) -> &str {
        &self.0[..7.min(self.0.len())]
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub id: CommitId,
    pub parents: Vec<CommitId>,
    pub author_name: String,
    pub author_email: String,
    pub timestamp: DateTime<Utc>,
    pub subject: String,
}

impl CommitInfo {
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// `Name <email>`, the string git matches `--author` against.
    pub fn ident(&self) -> String {
        format!("{} <{}>", self.author_name, self.author_email)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    TypeChanged,
    Other,
}

impl ChangeKind {
    pub fn as_str(&self) -> &str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
            ChangeKind::TypeChanged => "type changed",
            ChangeKind::Other => "changed",
        }
    }

    /// Maps a `--name-status` letter. Copy/rename letters carry a score
    /// suffix (`R100`), so only the first character is considered.
    pub fn parse(status: &str) -> Self {
        match status.chars().next() {
            Some('A') => ChangeKind::Added,
            Some('M') => ChangeKind::Modified,
            Some('D') => ChangeKind::Deleted,
            Some('T') => ChangeKind::TypeChanged,
            _ => ChangeKind::Other,
        }
    }
}

/// A path touched by one commit. The path is the exact string git reported
/// unless `lossy` is set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangedPath {
    pub path: String,
    pub kind: ChangeKind,
    /// The reported bytes were not UTF-8 and `path` only approximates them,
    /// so content cannot be looked up by it.
    pub lossy: bool,
}

impl ChangedPath {
    pub fn new(path: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
            lossy: false,
        }
    }

    pub fn from_bytes(raw: &[u8], kind: ChangeKind) -> Self {
        match std::str::from_utf8(raw) {
            Ok(path) => Self::new(path, kind),
            Err(_) => Self {
                path: String::from_utf8_lossy(raw).into_owned(),
                kind,
                lossy: true,
            },
        }
    }
}

/// The tree a content lookup is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeRef {
    Commit(CommitId),
    ParentOf(CommitId),
    Tip,
}

impl TreeRef {
    /// Revision expression understood by git.
    pub fn rev(&self) -> String {
        match self {
            TreeRef::Commit(id) => id.to_string(),
            TreeRef::ParentOf(id) => format!("{}^", id),
            TreeRef::Tip => "HEAD".to_string(),
        }
    }
}

impl fmt::Display for TreeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeRef::Commit(id) => f.write_str(id.short()),
            TreeRef::ParentOf(id) => write!(f, "{}^", id.short()),
            TreeRef::Tip => f.write_str("HEAD"),
        }
    }
}

/// Which commits belong to the reviewed author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorFilter {
    /// Case-sensitive substring of the author ident, `Name <email>`.
    Substring(String),
    /// A git regular expression; matching is left to the history store.
    Pattern(String),
}

impl AuthorFilter {
    pub fn pattern(&self) -> &str {
        match self {
            AuthorFilter::Substring(s) | AuthorFilter::Pattern(s) => s,
        }
    }

    pub fn matches(&self, commit: &CommitInfo) -> bool {
        match self {
            AuthorFilter::Substring(s) => commit.ident().contains(s.as_str()),
            AuthorFilter::Pattern(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn commit(parents: usize) -> CommitInfo {
        CommitInfo {
            id: CommitId::new("1945ab9c752534e733c38ba0109dc3b741f0a6eb"),
            parents: (0..parents)
                .map(|i| CommitId::new(format!("{:040}", i)))
                .collect(),
            author_name: "Ada Lovelace".to_string(),
            author_email: "ada@example.com".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 17, 2, 33, 6).unwrap(),
            subject: "Add engine notes".to_string(),
        }
    }

    #[test]
    fn test_short_id() {
        assert_eq!(commit(1).id.short(), "1945ab9");
        assert_eq!(CommitId::new("abc").short(), "abc");
    }

    #[test]
    fn test_merge_detection() {
        assert!(!commit(0).is_merge());
        assert!(!commit(1).is_merge());
        assert!(commit(2).is_merge());
    }

    #[test]
    fn test_change_kind_parse() {
        assert_eq!(ChangeKind::parse("A"), ChangeKind::Added);
        assert_eq!(ChangeKind::parse("D"), ChangeKind::Deleted);
        assert_eq!(ChangeKind::parse("R087"), ChangeKind::Other);
        assert_eq!(ChangeKind::parse(""), ChangeKind::Other);
    }

    #[test]
    fn test_changed_path_from_bytes() {
        let plain = ChangedPath::from_bytes(b"docs/caf\xc3\xa9.md", ChangeKind::Added);
        assert_eq!(plain, ChangedPath::new("docs/café.md", ChangeKind::Added));

        let latin1 = ChangedPath::from_bytes(b"caf\xe9.txt", ChangeKind::Modified);
        assert!(latin1.lossy);
        assert_eq!(latin1.path, "caf\u{fffd}.txt");
    }

    #[test]
    fn test_tree_ref_rev() {
        let id = CommitId::new("1945ab9c752534e733c38ba0109dc3b741f0a6eb");
        assert_eq!(
            TreeRef::ParentOf(id.clone()).rev(),
            "1945ab9c752534e733c38ba0109dc3b741f0a6eb^"
        );
        assert_eq!(TreeRef::Commit(id).to_string(), "1945ab9");
        assert_eq!(TreeRef::Tip.rev(), "HEAD");
    }

    #[test]
    fn test_author_filter_matches_name_or_email() {
        let c = commit(1);
        assert!(AuthorFilter::Substring("Lovelace".into()).matches(&c));
        assert!(AuthorFilter::Substring("ada@".into()).matches(&c));
        assert!(!AuthorFilter::Substring("lovelace".into()).matches(&c));
        assert!(!AuthorFilter::Substring("Babbage".into()).matches(&c));
    }

    #[test]
    fn test_author_filter_spans_name_and_email() {
        let c = commit(1);
        assert_eq!(c.ident(), "Ada Lovelace <ada@example.com>");
        assert!(AuthorFilter::Substring("Lovelace <ada".into()).matches(&c));
        assert!(AuthorFilter::Substring("<ada@example.com>".into()).matches(&c));
        assert!(!AuthorFilter::Substring("Lovelace ada".into()).matches(&c));
    }

    #[test]
    fn test_pattern_filter_defers_to_store() {
        assert!(AuthorFilter::Pattern("^B".into()).matches(&commit(1)));
    }
}
