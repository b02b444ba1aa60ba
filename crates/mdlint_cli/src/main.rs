//! mdlint CLI
//!
//! Lints Markdown files and reports findings as text or JSON.
//! Exit codes: 0 when clean, 1 when findings remain above the threshold,
//! 2 when the run fails.

mod cli;
mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use mdlint_core::{Linter, LinterConfig, Outcome, current_rule};

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    install_panic_hook();

    match run(&cli) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(Outcome::Failed.exit_code())
        }
    }
}

/// Sends panics raised inside a rule to the debug log.
///
/// The linter contains those panics and carries on, so they are not
/// printed. Any other panic still reaches the default hook.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| match current_rule() {
        Some(rule) => debug!("Rule {} panicked: {}", rule, info),
        None => default_hook(info),
    }));
}

fn run(cli: &Cli) -> Result<Outcome> {
    let config = load_config(cli)?;
    let linter = Linter::from_config(&config).into_diagnostic()?;

    if cli.list_rules {
        output::print_rules(linter.registry())?;
        return Ok(Outcome::Clean);
    }

    let root = Path::new(".");
    let report = match cli.paths.as_slice() {
        [] => linter.lint_path(root),
        [dir] if dir.is_dir() => linter.lint_path(dir),
        files => linter.lint_files(root, files),
    }
    .into_diagnostic()?
    .filter(config.min_severity);

    output::print_report(&report, config.format)?;
    Ok(report.outcome())
}

/// Loads the configuration file and applies command-line overrides.
fn load_config(cli: &Cli) -> Result<LinterConfig> {
    let path: Option<PathBuf> = match &cli.config {
        Some(path) => Some(path.clone()),
        None => LinterConfig::discover("."),
    };

    let mut config = match path {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            LinterConfig::from_file(&path).into_diagnostic()?
        }
        None => LinterConfig::default(),
    };

    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(min_severity) = cli.min_severity {
        config.min_severity = min_severity;
    }
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    config.include.extend(cli.include.iter().cloned());
    config.exclude.extend(cli.exclude.iter().cloned());

    Ok(config)
}
