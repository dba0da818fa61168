//! [`HistoryStore`] backed by the `git` command line.

use crate::error::{Error, Result};
use crate::history::HistoryStore;
use crate::models::{AuthorFilter, ChangeKind, ChangedPath, CommitId, CommitInfo, TreeRef};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tracing::debug;

const FIELD_SEP: char = '\u{1f}';
const LOG_FORMAT: &str = "--format=%H%x1f%P%x1f%an%x1f%ae%x1f%at%x1f%s";

pub struct GitCli {
    repo: PathBuf,
}

impl GitCli {
    pub fn new<P: AsRef<Path>>(repo: P) -> Self {
        Self {
            repo: repo.as_ref().to_path_buf(),
        }
    }

    pub fn repo(&self) -> &Path {
        &self.repo
    }

    fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(&self.repo)
            .args(["-c", "core.quotePath=false"])
            .args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null());
        cmd
    }

    fn output(&self, args: &[&str]) -> Result<Output> {
        debug!("git {}", args.join(" "));
        Ok(self.command(args).output()?)
    }

    /// Runs git and returns stdout, failing on a non-zero exit.
    fn run(&self, args: &[&str]) -> Result<Vec<u8>> {
        let output = self.output(args)?;
        if !output.status.success() {
            return Err(Error::Git {
                args: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }

    fn succeeds(&self, args: &[&str]) -> Result<bool> {
        Ok(self.output(args)?.status.success())
    }
}

impl HistoryStore for GitCli {
    fn resolve(&self, reference: &str) -> Result<CommitId> {
        let object = format!("{}^{{commit}}", reference);
        match self.run(&["rev-parse", "--verify", "--quiet", &object]) {
            Ok(out) => Ok(CommitId::new(String::from_utf8_lossy(&out).trim())),
            Err(Error::Git { .. }) => Err(Error::InvalidReference(reference.to_string())),
            Err(e) => Err(e),
        }
    }

    fn log(&self, since: &CommitId, filter: &AuthorFilter) -> Result<Vec<CommitInfo>> {
        let author = format!("--author={}", filter.pattern());
        let range = format!("{}..HEAD", since);
        let mut args = vec![
            "log",
            "--reverse",
            "--topo-order",
            "--no-merges",
            "-z",
            LOG_FORMAT,
        ];
        if let AuthorFilter::Substring(_) = filter {
            args.push("--fixed-strings");
        }
        args.extend([author.as_str(), range.as_str(), "--"]);

        parse_log(&self.run(&args)?)
    }

    fn stat(&self, commit: &CommitId) -> Result<String> {
        let out = self.run(&["show", "--stat", "--format=", "--no-color", commit.as_str()])?;
        Ok(String::from_utf8_lossy(&out)
            .trim_start_matches('\n')
            .trim_end()
            .to_string())
    }

    fn changed_paths(&self, commit: &CommitId) -> Result<Vec<ChangedPath>> {
        let out = self.run(&[
            "diff-tree",
            "-r",
            "-z",
            "--no-commit-id",
            "--no-renames",
            "--root",
            "--name-status",
            commit.as_str(),
        ])?;
        parse_name_status(&out)
    }

    fn read_blob(&self, tree: &TreeRef, path: &str) -> Result<Option<Vec<u8>>> {
        let object = format!("{}:{}", tree.rev(), path);
        if !self.succeeds(&["cat-file", "-e", &object])? {
            debug!("{} absent at {}", path, tree);
            return Ok(None);
        }
        self.run(&["cat-file", "blob", &object]).map(Some)
    }

    fn tree_paths(&self, tree: &TreeRef) -> Result<BTreeSet<String>> {
        let rev = tree.rev();
        let out = self.run(&["ls-tree", "-r", "-z", "--name-only", "--full-tree", &rev])?;
        Ok(split_nul(&out)
            .filter_map(|name| match std::str::from_utf8(name) {
                Ok(name) => Some(name.to_string()),
                Err(_) => {
                    let name = String::from_utf8_lossy(name);
                    debug!("Ignoring non-UTF-8 path {:?} at {}", name, tree);
                    None
                }
            })
            .collect())
    }
}

fn split_nul(bytes: &[u8]) -> impl Iterator<Item = &[u8]> + '_ {
    bytes.split(|b| *b == 0).filter(|field| !field.is_empty())
}

/// Parses `git log -z` output produced with [`LOG_FORMAT`].
fn parse_log(bytes: &[u8]) -> Result<Vec<CommitInfo>> {
    let text = String::from_utf8_lossy(bytes);
    text.split('\0')
        .map(|record| record.trim_matches('\n'))
        .filter(|record| !record.is_empty())
        .map(parse_log_record)
        .collect()
}

fn parse_log_record(record: &str) -> Result<CommitInfo> {
    let fields: Vec<&str> = record.splitn(6, FIELD_SEP).collect();
    let &[id, parents, name, email, time, subject] = fields.as_slice() else {
        return Err(Error::Parse(format!("log record: {:?}", record)));
    };

    let seconds: i64 = time
        .parse()
        .map_err(|_| Error::Parse(format!("author time: {:?}", time)))?;
    let timestamp = DateTime::<Utc>::from_timestamp(seconds, 0)
        .ok_or_else(|| Error::Parse(format!("author time out of range: {}", seconds)))?;

    Ok(CommitInfo {
        id: CommitId::new(id),
        parents: parents.split_whitespace().map(CommitId::new).collect(),
        author_name: name.to_string(),
        author_email: email.to_string(),
        timestamp,
        subject: subject.to_string(),
    })
}

/// Parses `git diff-tree -z --name-status`: alternating status and path
/// fields, each NUL-terminated.
fn parse_name_status(bytes: &[u8]) -> Result<Vec<ChangedPath>> {
    let mut fields = split_nul(bytes);
    let mut paths = Vec::new();

    while let Some(status) = fields.next() {
        let status = String::from_utf8_lossy(status);
        let path = fields
            .next()
            .ok_or_else(|| Error::Parse(format!("status {} without a path", status)))?;
        paths.push(ChangedPath::from_bytes(path, ChangeKind::parse(&status)));
    }

    Ok(paths)
}
