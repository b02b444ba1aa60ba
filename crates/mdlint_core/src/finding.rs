//! Finding types for lint results.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity level for findings.
///
/// Ordered from least to most severe, so `Severity::Error > Severity::Warning`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Suggestion - optional improvement.
    Suggestion,
    /// Warning - should be reviewed.
    #[default]
    Warning,
    /// Error - must be fixed.
    Error,
}

impl Severity {
    /// Returns the lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Severity::Suggestion => "suggestion",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Reports whether `self` is greater than or equal to `threshold`.
    pub fn at_least(self, threshold: Severity) -> bool {
        self >= threshold
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "suggestion" => Ok(Severity::Suggestion),
            "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(format!(
                "unknown severity '{}' (expected suggestion, warning or error)",
                other
            )),
        }
    }
}

/// A single reported issue.
///
/// Field order matches the machine-readable output: `rule`, `severity`,
/// `message`, `file`, `line`, `column`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Finding {
    /// The rule that generated this finding.
    pub rule: String,

    /// Severity level.
    #[serde(default)]
    pub severity: Severity,

    /// The finding message.
    pub message: String,

    /// File the finding belongs to. Empty until the linter tags it.
    #[serde(default)]
    pub file: String,

    /// Line number (1-based).
    pub line: u32,

    /// Column number (1-based).
    pub column: u32,
}

impl Finding {
    /// Creates a new finding without a file.
    pub fn new(rule: impl Into<String>, line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            severity: Severity::default(),
            message: message.into(),
            file: String::new(),
            line,
            column,
        }
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the file.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    /// Report order: file, line, column, rule, message.
    pub fn report_order(&self, other: &Self) -> Ordering {
        self.file
            .cmp(&other.file)
            .then(self.line.cmp(&other.line))
            .then(self.column.cmp(&other.column))
            .then_with(|| self.rule.cmp(&other.rule))
            .then_with(|| self.message.cmp(&other.message))
    }
}

/// Sorts findings into report order.
///
/// Findings that tie on every sort key are ordered by severity so that the
/// result never depends on the input order.
pub fn sort_findings(findings: &mut [Finding]) {
    findings.sort_by(|a, b| a.report_order(b).then(a.severity.cmp(&b.severity)));
}
