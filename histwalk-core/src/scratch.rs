//! Process-owned staging area for content handed to the viewer.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// Temporary directory holding staged blobs. Everything in it is removed
/// when the value is dropped or [`Scratch::close`]d.
pub struct Scratch {
    dir: TempDir,
    staged: usize,
}

impl Scratch {
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("histwalk-").tempdir()?;
        debug!("Scratch area at {:?}", dir.path());
        Ok(Self { dir, staged: 0 })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `content` to a fresh file whose name ends with the file name
    /// of `repo_path`, so editors still pick the right syntax. `label`
    /// distinguishes the sides of a diff (`before`, `after`, `tip`).
    pub fn stage(&mut self, label: &str, repo_path: &str, content: &[u8]) -> Result<PathBuf> {
        self.staged += 1;
        let slot = self
            .dir
            .path()
            .join(format!("{:04}-{}", self.staged, sanitize(label)));
        fs::create_dir(&slot)?;

        let file = slot.join(file_name(repo_path));
        fs::write(&file, content)?;
        Ok(file)
    }

    /// Removes the scratch area now, reporting any failure.
    pub fn close(self) -> Result<()> {
        self.dir.close()?;
        Ok(())
    }
}

fn file_name(repo_path: &str) -> String {
    let name = repo_path.rsplit('/').next().unwrap_or(repo_path);
    match sanitize(name).as_str() {
        "" | "." | ".." => "blob".to_string(),
        name => name.to_string(),
    }
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | '\0' | '\n' | '\r' => '_',
            c => c,
        })
        .collect()
}
