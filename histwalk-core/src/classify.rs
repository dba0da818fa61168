//! Binary/text classification of staged files.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// Bytes inspected by the built-in heuristic, the same window git uses.
const SNIFF_LEN: usize = 8000;

pub trait Classifier {
    fn is_binary(&self, path: &Path) -> Result<bool>;
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn is_binary(&self, path: &Path) -> Result<bool> {
        (**self).is_binary(path)
    }
}

/// Looks for a NUL byte near the start of the file.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sniffer;

impl Classifier for Sniffer {
    fn is_binary(&self, path: &Path) -> Result<bool> {
        let mut head = Vec::with_capacity(SNIFF_LEN);
        File::open(path)?
            .take(SNIFF_LEN as u64)
            .read_to_end(&mut head)?;
        Ok(looks_binary(&head))
    }
}

pub fn looks_binary(head: &[u8]) -> bool {
    head.iter().take(SNIFF_LEN).any(|b| *b == 0)
}

/// Asks `file --brief --mime-encoding`; an encoding of `binary` means
/// binary. Falls back to [`Sniffer`] for the rest of the run once the
/// program turns out to be missing.
#[derive(Debug, Default)]
pub struct FileCommand {
    unavailable: AtomicBool,
}

impl FileCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Classifier for FileCommand {
    fn is_binary(&self, path: &Path) -> Result<bool> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Sniffer.is_binary(path);
        }

        let output = match Command::new("file")
            .args(["--brief", "--mime-encoding", "--"])
            .arg(path)
            .stdin(Stdio::null())
            .output()
        {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("`file` not found, using the built-in binary check");
                self.unavailable.store(true, Ordering::Relaxed);
                return Sniffer.is_binary(path);
            }
            Err(e) => return Err(e.into()),
        };

        if !output.status.success() {
            return Err(Error::ClassifierFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let encoding = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("{:?}: {}", path, encoding);
        Ok(encoding == "binary")
    }
}
