use colored::{ColoredString, Colorize};
use histwalk_core::diff::{DiffLineType, FileDiff};
use histwalk_core::stat::StatLine;
use histwalk_core::{ChangeKind, CommitInfo, Reporter, SkipReason, Summary, Viewer};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Prints walk progress to stdout.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn commit_header(&mut self, commit: &CommitInfo, stat: &[StatLine]) {
        println!("{}", "━".repeat(80).bright_black());
        print!("{}", render_commit(commit));
        for line in stat {
            println!("  {}", render_stat_line(line));
        }
        println!();
    }

    fn viewing(&mut self, path: &str, kind: Option<ChangeKind>) {
        println!("{} {}", kind_badge(kind), path.white().bold());
        // the viewer may take over the terminal
        let _ = std::io::stdout().flush();
    }

    fn skipped(&mut self, path: &str, reason: &SkipReason) {
        println!("{}", render_skip(path, reason));
    }
}

pub fn render_commit(commit: &CommitInfo) -> String {
    format!(
        "{} {}\n{}: {}\n{}: {}\n\n    {}\n\n",
        "commit".yellow().bold(),
        commit.id.short().yellow(),
        "Author".bold(),
        commit.ident(),
        "Date".bold(),
        commit.timestamp.format("%Y-%m-%d %H:%M:%S"),
        commit.subject
    )
}

pub fn render_stat_line(line: &StatLine) -> String {
    match line {
        StatLine::File {
            name,
            changes,
            graph,
        } => format!(
            "{} | {} {}",
            name.white().bold(),
            changes.cyan(),
            color_graph(graph)
        ),
        StatLine::Binary { name, detail } => format!(
            "{} | {} {}",
            name.white().bold(),
            "Bin".magenta(),
            detail.dimmed()
        ),
        StatLine::Summary {
            files,
            insertions,
            deletions,
        } => format!(
            "{} file(s) changed, {} insertion(s), {} deletion(s)",
            files.to_string().cyan(),
            insertions.to_string().green(),
            deletions.to_string().red()
        ),
        StatLine::Other(text) => text.dimmed().to_string(),
    }
}

fn color_graph(graph: &str) -> String {
    let plus = graph.chars().filter(|c| *c == '+').count();
    let minus = graph.chars().filter(|c| *c == '-').count();
    format!("{}{}", "+".repeat(plus).green(), "-".repeat(minus).red())
}

fn kind_badge(kind: Option<ChangeKind>) -> ColoredString {
    match kind {
        Some(ChangeKind::Added) => "NEW".green(),
        Some(ChangeKind::Modified) => "MOD".yellow(),
        Some(ChangeKind::Deleted) => "DEL".red(),
        Some(ChangeKind::TypeChanged) | Some(ChangeKind::Other) => "CHG".blue(),
        None => "TIP".cyan(),
    }
}

pub fn render_skip(path: &str, reason: &SkipReason) -> String {
    let icon = match reason {
        SkipReason::Failed(_) => "✗".red(),
        _ => "⚠".yellow(),
    };
    format!(
        "{} {} {}",
        icon,
        path,
        format!("skipped: {}", reason).dimmed()
    )
}

pub fn render_summary(summary: &Summary) -> String {
    let mut text = format!(
        "{} viewed, {} skipped",
        summary.viewed.to_string().green().bold(),
        summary.skipped.to_string().yellow()
    );
    if summary.interrupted {
        text.push_str(&format!(" {}", "(interrupted)".red()));
    }
    text
}

/// Prints to the terminal instead of launching an editor.
#[derive(Debug, Clone)]
pub struct InlineViewer {
    context: usize,
}

impl InlineViewer {
    pub fn new(context: usize) -> Self {
        Self { context }
    }
}

impl Viewer for InlineViewer {
    fn open(&self, path: &Path) -> histwalk_core::Result<()> {
        let content = fs::read(path)?;
        print!("{}", render_numbered(&String::from_utf8_lossy(&content)));
        println!();
        Ok(())
    }

    fn diff(&self, before: &Path, after: &Path) -> histwalk_core::Result<()> {
        let old = fs::read(before)?;
        let new = fs::read(after)?;
        let diff = FileDiff::compute(
            &String::from_utf8_lossy(&old),
            &String::from_utf8_lossy(&new),
            self.context,
        );
        print!("{}", render_diff(&diff));
        println!();
        Ok(())
    }
}

pub fn render_numbered(content: &str) -> String {
    let width = content.lines().count().max(1).to_string().len();
    content
        .lines()
        .enumerate()
        .map(|(i, line)| {
            format!(
                "{} {}\n",
                format!("{:>width$}", i + 1, width = width).bright_black(),
                line
            )
        })
        .collect()
}

pub fn render_diff(diff: &FileDiff) -> String {
    if diff.is_empty() {
        return format!("  {}\n", "[no textual changes]".dimmed());
    }

    let (insertions, deletions) = diff.counts();
    let mut output = format!(
        "{} {}\n",
        format!("+{}", insertions).green(),
        format!("-{}", deletions).red()
    );
    for hunk in &diff.hunks {
        output.push_str(&format!("{}\n", hunk.header.cyan()));
        for line in &hunk.lines {
            let text = format!("{}{}", line.line_type.prefix(), line.content.trim_end_matches('\n'));
            let styled = match line.line_type {
                DiffLineType::Addition => text.green(),
                DiffLineType::Deletion => text.red(),
                DiffLineType::Context => text.normal(),
            };
            output.push_str(&format!("{}\n", styled));
        }
    }
    output
}
