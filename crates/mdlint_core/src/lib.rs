//! # mdlint_core
//!
//! Core linter engine for mdlint.
//!
//! This crate provides:
//! - The `Rule` contract and the built-in rules
//! - The `RuleRegistry`, built once and shared read-only by every worker
//! - Configuration loading and validation
//! - File discovery and filtering
//! - The `Linter` orchestrator (bounded parallel dispatch)
//! - Report aggregation and the text/JSON formatters
//!
//! ## Example
//!
//! ```rust,ignore
//! use mdlint_core::{Linter, LinterConfig, OutputFormat};
//!
//! let config = LinterConfig::from_file(".mdlint.jsonc")?;
//! let linter = Linter::from_config(&config)?;
//!
//! let report = linter.lint_path("docs")?.filter(config.min_severity);
//! print!("{}", report.render(OutputFormat::Text)?);
//! std::process::exit(report.outcome().exit_code().into());
//! ```

mod config;
mod error;
pub mod file_finder;
mod finding;
pub mod formatters;
mod linter;
mod registry;
mod report;
pub mod rule;
pub mod rules;
pub mod sandbox;

pub use config::{
    CONFIG_FILES, DEFAULT_INCLUDE, DEFAULT_MAX_FILE_SIZE, LinterConfig, RuleOption, RunConfig,
};
pub use error::LinterError;
pub use finding::{Finding, Severity, sort_findings};
pub use formatters::OutputFormat;
pub use linter::{Linter, RunState, current_rule};
pub use registry::{RegistryBuilder, RuleRegistry};
pub use report::{Outcome, Report};
pub use rule::{ConfiguredRule, LintRule, NoOptions, Rule, RuleContext, RuleMeta};
