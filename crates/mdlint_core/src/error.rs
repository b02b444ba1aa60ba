//! Linter error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during linting.
///
/// Every variant is fatal for the run that produced it. Rule-local problems
/// never surface here; a rule that cannot handle part of a document simply
/// reports nothing for that part.
#[derive(Debug, Error)]
pub enum LinterError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Two rules were registered under the same identifier.
    #[error("Rule already registered: {0}")]
    DuplicateRule(String),

    /// The configuration references a rule that does not exist.
    #[error("Unknown rule: {0}")]
    UnknownRule(String),

    /// A rule's options could not be deserialized into its config type.
    #[error("Invalid options for rule {rule}: {message}")]
    RuleOptions {
        /// Rule identifier.
        rule: String,
        /// Deserialization message.
        message: String,
    },

    /// The discovery root is missing or could not be walked.
    #[error("Discovery failed for {}: {message}", path.display())]
    Discovery {
        /// Path that failed.
        path: PathBuf,
        /// Underlying cause.
        message: String,
    },

    /// More files were discovered than the configured maximum.
    #[error("Too many files: {count} > {max}")]
    TooManyFiles {
        /// Number of discovered files.
        count: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A file exceeds the configured size ceiling.
    #[error("File {} exceeds size limit: {size} > {limit} bytes", path.display())]
    FileTooLarge {
        /// Offending file.
        path: PathBuf,
        /// Actual size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },

    /// File I/O error.
    #[error("File error: {0}")]
    File(String),

    /// Outbound network access was requested while the sandbox forbids it.
    #[error("Network access disabled")]
    NetworkDisabled,

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LinterError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }

    /// Creates a discovery error.
    pub fn discovery(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Discovery {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a rule options error.
    pub fn rule_options(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RuleOptions {
            rule: rule.into(),
            message: message.into(),
        }
    }
}
