//! Ctrl-C handling. While a scratch area exists the first interrupt only
//! asks the walk to stop after the current file, so the scratch area is
//! dropped normally. A second interrupt removes it and exits at once.
//! Outside that window the process exits right away.

use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::warn;

const EXIT_INTERRUPTED: i32 = 130;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Exit,
    Defer,
    Force,
}

#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    requested: Arc<AtomicBool>,
    guarded: Arc<AtomicBool>,
    scratch: Arc<Mutex<Option<PathBuf>>>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag the walker polls between files.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.requested)
    }

    /// Defers interrupts until the returned guard is dropped.
    pub fn guard(&self) -> Guard {
        self.guarded.store(true, Ordering::SeqCst);
        Guard {
            guarded: Arc::clone(&self.guarded),
            scratch: Arc::clone(&self.scratch),
        }
    }

    /// Directory removed if a second interrupt forces an exit.
    pub fn track(&self, scratch: &Path) {
        if let Ok(mut tracked) = self.scratch.lock() {
            *tracked = Some(scratch.to_path_buf());
        }
    }

    fn request(&self) -> Action {
        let repeated = self.requested.swap(true, Ordering::SeqCst);
        if !self.guarded.load(Ordering::SeqCst) {
            Action::Exit
        } else if repeated {
            Action::Force
        } else {
            Action::Defer
        }
    }

    fn remove_tracked(&self) {
        let tracked = match self.scratch.lock() {
            Ok(mut tracked) => tracked.take(),
            Err(_) => None,
        };
        if let Some(path) = tracked {
            if let Err(e) = fs::remove_dir_all(&path) {
                warn!("Cannot remove scratch area {:?}: {}", path, e);
            }
        }
    }

    pub async fn listen(self) {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Cannot listen for Ctrl-C: {}", e);
                return;
            }

            match self.request() {
                Action::Defer => eprintln!(
                    "\n{}",
                    "Interrupted - stopping after the current file (Ctrl-C again to quit now)"
                        .yellow()
                ),
                Action::Force => {
                    self.remove_tracked();
                    std::process::exit(EXIT_INTERRUPTED);
                }
                Action::Exit => std::process::exit(EXIT_INTERRUPTED),
            }
        }
    }
}

pub struct Guard {
    guarded: Arc<AtomicBool>,
    scratch: Arc<Mutex<Option<PathBuf>>>,
}

impl Drop for Guard {
    fn drop(&mut self) {
        self.guarded.store(false, Ordering::SeqCst);
        if let Ok(mut tracked) = self.scratch.lock() {
            tracked.take();
        }
    }
}
