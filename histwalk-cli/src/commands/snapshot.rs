use crate::display::ConsoleReporter;
use anyhow::{Context, Result};
use colored::Colorize;
use histwalk_core::{Classifier, CommitInfo, HistoryStore, Summary, Viewer, Walker};

/// Opens the tip version of every file the commits touched.
pub fn run<H, C, V>(walker: &mut Walker<H, C, V>, commits: &[CommitInfo]) -> Result<Summary>
where
    H: HistoryStore,
    C: Classifier,
    V: Viewer,
{
    println!(
        "{}",
        format!("Snapshot mode: files touched by {} commit(s)", commits.len())
            .bold()
            .cyan()
    );
    println!();

    walker
        .snapshot_mode(commits, &mut ConsoleReporter)
        .context("Cannot list files at the branch tip")
}
