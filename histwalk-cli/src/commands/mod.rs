pub mod diff;
pub mod snapshot;

use crate::config::{ClassifierKind, Config, Mode, ViewerConfig};
use crate::display::{render_summary, InlineViewer};
use crate::interrupt::Interrupt;
use crate::prompt;
use anyhow::{Context, Result};
use colored::Colorize;
use histwalk_core::{
    enumerate, Classifier, EditorViewer, FileCommand, GitCli, Sniffer, Viewer, Walker,
};
use tracing::info;

pub fn run(config: &Config, interrupt: &Interrupt) -> Result<()> {
    let store = GitCli::new(&config.repo);
    info!("Walking {:?}", store.repo());

    let commits = enumerate(&store, &config.start, &config.author)
        .with_context(|| format!("Cannot list commits after '{}'", config.start))?;

    if commits.is_empty() {
        println!("{}", "No commits found".yellow());
        return Ok(());
    }

    println!(
        "{} {} commit(s) by {} after {}",
        "Found".bold(),
        commits.len().to_string().cyan(),
        config.author.pattern().bold(),
        config.start.bold()
    );
    println!();

    let mode = match config.mode {
        Some(mode) => mode,
        None => prompt::ask_mode()?,
    };

    // scratch files exist from here on; a first Ctrl-C waits for the current file
    let _guard = interrupt.guard();
    let mut walker = Walker::new(store, classifier(config.classifier), viewer(&config.viewer))
        .context("Cannot create the scratch area")?
        .with_interrupt(interrupt.flag());
    interrupt.track(walker.scratch().path());

    let summary = match mode {
        Mode::Diff => diff::run(&mut walker, &commits),
        Mode::Snapshot => snapshot::run(&mut walker, &commits)?,
    };

    walker.finish().context("Cannot remove the scratch area")?;

    println!();
    println!("{}", render_summary(&summary));
    Ok(())
}

fn classifier(kind: ClassifierKind) -> Box<dyn Classifier> {
    match kind {
        ClassifierKind::File => Box::new(FileCommand::new()),
        ClassifierKind::Builtin => Box::new(Sniffer),
    }
}

fn viewer(config: &ViewerConfig) -> Box<dyn Viewer> {
    match config {
        ViewerConfig::Editor {
            program,
            args,
            diff_args,
        } => Box::new(
            EditorViewer::new(program.clone())
                .with_args(args.clone())
                .with_diff_args(diff_args.clone()),
        ),
        ViewerConfig::Inline { context } => Box::new(InlineViewer::new(*context)),
    }
}
