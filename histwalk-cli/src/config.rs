use crate::Cli;
use clap::ValueEnum;
use histwalk_core::AuthorFilter;
use std::path::{Path, PathBuf};

const DEFAULT_EDITOR: &str = "vim";
const INLINE_CONTEXT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Every changed file of every commit, before against after
    Diff,
    /// The tip version of every file the author touched
    Snapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClassifierKind {
    /// The external `file` program
    File,
    /// NUL-byte check on the first 8000 bytes
    Builtin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerConfig {
    Editor {
        program: String,
        args: Vec<String>,
        diff_args: Vec<String>,
    },
    Inline {
        context: usize,
    },
}

/// Everything one run needs, resolved from arguments and environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub repo: PathBuf,
    pub start: String,
    pub author: AuthorFilter,
    pub mode: Option<Mode>,
    pub viewer: ViewerConfig,
    pub classifier: ClassifierKind,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        let author = if cli.regex {
            AuthorFilter::Pattern(cli.author)
        } else {
            AuthorFilter::Substring(cli.author)
        };

        let viewer = if cli.inline {
            ViewerConfig::Inline {
                context: INLINE_CONTEXT,
            }
        } else {
            let program = resolve_editor(
                cli.editor,
                std::env::var("VISUAL").ok(),
                std::env::var("EDITOR").ok(),
            );
            editor_config(program, cli.editor_args, cli.diff_args)
        };

        Self {
            repo: cli.repo,
            start: cli.start,
            author,
            mode: cli.mode,
            viewer,
            classifier: cli.classifier,
        }
    }
}

/// First non-blank of the explicit choice, `$VISUAL`, `$EDITOR`, else vim.
fn resolve_editor(
    explicit: Option<String>,
    visual: Option<String>,
    editor: Option<String>,
) -> String {
    [explicit, visual, editor]
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}

/// Fills in blocking and diff flags for editors we know when the user gave
/// none.
fn editor_config(program: String, args: Vec<String>, diff_args: Vec<String>) -> ViewerConfig {
    let name = Path::new(&program)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (default_args, default_diff): (&[&str], &[&str]) = match name.as_str() {
        "code" | "code-insiders" | "codium" | "cursor" => (&["--wait"], &["--diff"]),
        "meld" | "kdiff3" | "vimdiff" | "nvimdiff" => (&[], &[]),
        _ => (&[], &["-d"]),
    };

    let or_default = |given: Vec<String>, default: &[&str]| {
        if given.is_empty() {
            default.iter().map(|s| s.to_string()).collect()
        } else {
            given
        }
    };

    ViewerConfig::Editor {
        args: or_default(args, default_args),
        diff_args: or_default(diff_args, default_diff),
        program,
    }
}
