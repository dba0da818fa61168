use crate::display::ConsoleReporter;
use colored::Colorize;
use histwalk_core::{Classifier, CommitInfo, HistoryStore, Summary, Viewer, Walker};

/// Walks every changed file of every commit, oldest commit first.
pub fn run<H, C, V>(walker: &mut Walker<H, C, V>, commits: &[CommitInfo]) -> Summary
where
    H: HistoryStore,
    C: Classifier,
    V: Viewer,
{
    println!(
        "{}",
        format!("Diff mode: {} commit(s)", commits.len()).bold().cyan()
    );
    println!();

    walker.diff_mode(commits, &mut ConsoleReporter)
}
