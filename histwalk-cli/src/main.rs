use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod config;
mod display;
mod interrupt;
mod prompt;

use config::{ClassifierKind, Config, Mode};
use interrupt::Interrupt;

#[derive(Parser, Debug)]
#[command(name = "histwalk")]
#[command(
    version,
    about = "Review one author's commits file by file in your editor",
    long_about = None
)]
pub struct Cli {
    /// Starting reference; only commits after it are reviewed
    #[arg(value_parser = non_blank)]
    start: String,

    /// Author name or email (substring of `Name <email>`, case-sensitive)
    #[arg(value_parser = non_blank)]
    author: String,

    /// Review mode; prompts when omitted
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Program used to view files
    #[arg(long, env = "HISTWALK_EDITOR")]
    editor: Option<String>,

    /// Extra argument for every viewer launch (repeatable)
    #[arg(long = "editor-arg", value_name = "ARG", allow_hyphen_values = true)]
    editor_args: Vec<String>,

    /// Argument placed before the two files of a diff (repeatable)
    #[arg(long = "diff-arg", value_name = "ARG", allow_hyphen_values = true)]
    diff_args: Vec<String>,

    /// Print diffs and files to the terminal instead of launching an editor
    #[arg(long)]
    inline: bool,

    /// How binary files are detected
    #[arg(long, value_enum, default_value_t = ClassifierKind::File)]
    classifier: ClassifierKind,

    /// Treat AUTHOR as a git regular expression
    #[arg(long)]
    regex: bool,

    /// Repository to walk
    #[arg(short = 'C', long = "repo", default_value = ".")]
    repo: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn non_blank(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        Err("must not be empty".to_string())
    } else {
        Ok(value.to_string())
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                let _ = err.print();
                return ExitCode::from(1);
            }
        },
    };

    init_tracing(cli.verbose);

    let config = Config::from_cli(cli);
    let interrupt = Interrupt::new();
    tokio::spawn(interrupt.clone().listen());

    let outcome =
        tokio::task::spawn_blocking(move || commands::run(&config, &interrupt)).await;

    match outcome {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(err)) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::from(1)
        }
    }
}
