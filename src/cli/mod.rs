//! Command-line interface for notecheck.
//!
//! Provides commands for checking a note, estimating its difficulty,
//! and inspecting the resolved configuration.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config;
use crate::core::{AuthenticityChecker, DifficultyEstimator, KeywordEstimator, NoteText};
use crate::domain::Note;

/// notecheck - Authenticity checker for shared study notes
#[derive(Parser, Debug)]
#[command(name = "notecheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a note and print the verdict as JSON
    Check {
        /// Note file, JSON or YAML (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Exit with status 2 when the note is flagged for review
        #[arg(long)]
        fail_on_flag: bool,
    },

    /// Estimate a note's difficulty from its text
    Estimate {
        /// Note file, JSON or YAML (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Show resolved configuration (API keys redacted)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Check { input, fail_on_flag } => check_note(input, fail_on_flag).await,
            Commands::Estimate { input } => estimate_note(input),
            Commands::Config => show_config(),
        }
    }
}

/// Read a note from a file or stdin
fn read_note(input: Option<PathBuf>) -> Result<Note> {
    match input {
        Some(path) => Note::from_file(&path),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read note from stdin")?;
            Note::from_str_any(&buffer)
        }
    }
}

async fn check_note(input: Option<PathBuf>, fail_on_flag: bool) -> Result<()> {
    let note = read_note(input)?;
    let config = config::config()?;
    let checker = AuthenticityChecker::from_config(config)?;

    let verdict = checker.evaluate(&note).await;

    let json = serde_json::to_string_pretty(&verdict).context("Failed to serialize verdict")?;
    println!("{}", json);

    if fail_on_flag && verdict.flag_for_review() {
        eprintln!("\n[Note flagged for review: {} issue(s)]", verdict.findings().len());
        std::process::exit(2);
    }

    Ok(())
}

fn estimate_note(input: Option<PathBuf>) -> Result<()> {
    let note = read_note(input)?;
    let estimator = KeywordEstimator::new();
    let text = NoteText::from(&note);

    let estimate = estimator.estimate(&text)?;
    println!("Estimated: {}", estimate.to_note_scale());
    println!("Declared:  {}", note.difficulty);
    println!("Score:     {}", estimator.score(&text));

    Ok(())
}

fn show_config() -> Result<()> {
    let config = config::config()?.redacted();

    match &config.config_file {
        Some(path) => eprintln!("Config file: {}", path.display()),
        None => eprintln!("Config file: (none, using defaults)"),
    }

    let yaml = serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
    println!("{}", yaml);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_command() {
        let cli = Cli::try_parse_from(["notecheck", "check", "--input", "note.json", "--fail-on-flag"])
            .unwrap();

        match cli.command {
            Commands::Check { input, fail_on_flag } => {
                assert_eq!(input, Some(PathBuf::from("note.json")));
                assert!(fail_on_flag);
            }
            other => panic!("Expected Check, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_estimate_without_input() {
        let cli = Cli::try_parse_from(["notecheck", "estimate"]).unwrap();
        assert!(matches!(cli.command, Commands::Estimate { input: None }));
    }

    #[test]
    fn test_read_note_from_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("note.yaml");
        std::fs::write(&path, "title: Graph Theory\ndifficulty: Advanced\n").unwrap();

        let note = read_note(Some(path)).unwrap();
        assert_eq!(note.title, "Graph Theory");
    }

    #[test]
    fn test_read_missing_file_fails() {
        let result = read_note(Some(PathBuf::from("/nonexistent/note.json")));
        assert!(result.is_err());
    }
}
