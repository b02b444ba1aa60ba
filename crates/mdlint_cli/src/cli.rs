//! CLI argument definitions

use std::path::PathBuf;

use clap::Parser;
use mdlint_core::{OutputFormat, Severity};

/// mdlint - Markdown linter
#[derive(Debug, Parser)]
#[command(name = "mdlint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Files or directories to lint (default: current directory)
    pub paths: Vec<PathBuf>,

    /// Configuration file path (default: .mdlint.jsonc or .mdlint.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Hide findings below this severity (suggestion, warning, error)
    #[arg(long)]
    pub min_severity: Option<Severity>,

    /// Number of files linted concurrently
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    /// Additional include glob (repeatable)
    #[arg(long)]
    pub include: Vec<String>,

    /// Additional exclude glob (repeatable)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Print the enabled rules and exit
    #[arg(long)]
    pub list_rules: bool,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}
