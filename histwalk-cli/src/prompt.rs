use crate::config::Mode;
use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Input;
use std::io::{BufRead, IsTerminal};

/// Asks for a review mode. Blank input picks diff mode.
pub fn ask_mode() -> Result<Mode> {
    println!("  {} diff mode", "1)".cyan().bold());
    println!("  {} snapshot mode", "2)".cyan().bold());

    if !std::io::stderr().is_terminal() || !std::io::stdin().is_terminal() {
        return read_piped(std::io::stdin().lock());
    }

    let answer: String = Input::new()
        .with_prompt("Mode")
        .default("1".to_string())
        .show_default(false)
        .validate_with(|input: &String| -> std::result::Result<(), &'static str> {
            parse_choice(input)
                .map(|_| ())
                .ok_or("enter 1 for diff mode or 2 for snapshot mode")
        })
        .interact_text()
        .context("Failed to read the review mode")?;

    parse_choice(&answer).context("Unrecognised review mode")
}

/// Single line from a non-interactive stdin; end of input counts as blank.
fn read_piped<R: BufRead>(mut input: R) -> Result<Mode> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read the review mode")?;
    parse_choice(&line).with_context(|| format!("Unrecognised review mode '{}'", line.trim()))
}

fn parse_choice(input: &str) -> Option<Mode> {
    match input.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "d" | "diff" => Some(Mode::Diff),
        "2" | "s" | "snapshot" => Some(Mode::Snapshot),
        _ => None,
    }
}
