//! Viewers that present staged files. Every call blocks until the user is
//! done with the file.

use crate::error::{Error, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

pub trait Viewer {
    /// Shows one file.
    fn open(&self, path: &Path) -> Result<()>;

    /// Shows `before` against `after`.
    fn diff(&self, before: &Path, after: &Path) -> Result<()>;
}

impl<V: Viewer + ?Sized> Viewer for Box<V> {
    fn open(&self, path: &Path) -> Result<()> {
        (**self).open(path)
    }

    fn diff(&self, before: &Path, after: &Path) -> Result<()> {
        (**self).diff(before, after)
    }
}

/// Launches an editor process and waits for it to exit.
#[derive(Debug, Clone)]
pub struct EditorViewer {
    program: String,
    args: Vec<String>,
    diff_args: Vec<String>,
}

impl EditorViewer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            diff_args: vec!["-d".to_string()],
        }
    }

    /// Arguments passed on every launch, before any path.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Arguments placed right before the two diff paths.
    pub fn with_diff_args(mut self, diff_args: Vec<String>) -> Self {
        self.diff_args = diff_args;
        self
    }

    fn launch(&self, extra: &[String], paths: &[&Path]) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).args(extra).args(paths);
        debug!("Launching {:?}", cmd);

        let status = cmd.status()?;
        if !status.success() {
            return Err(Error::ViewerFailed {
                program: self.program.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

impl Viewer for EditorViewer {
    fn open(&self, path: &Path) -> Result<()> {
        self.launch(&[], &[path])
    }

    fn diff(&self, before: &Path, after: &Path) -> Result<()> {
        self.launch(&self.diff_args, &[before, after])
    }
}
