//! Aggregated run results.

use crate::finding::sort_findings;
use crate::formatters::OutputFormat;
use crate::{Finding, LinterError, Severity};

/// Sorted findings of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    findings: Vec<Finding>,
}

impl Report {
    /// Creates a report, sorting the findings into report order.
    pub fn new(mut findings: Vec<Finding>) -> Self {
        sort_findings(&mut findings);
        Self { findings }
    }

    /// Findings in report order.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Consumes the report.
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Number of findings at exactly `severity`.
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    /// Drops findings below `threshold`, preserving order.
    pub fn filter(self, threshold: Severity) -> Self {
        let findings = self
            .findings
            .into_iter()
            .filter(|f| f.severity.at_least(threshold))
            .collect();
        Self { findings }
    }

    /// Outcome of a run that produced this report.
    pub fn outcome(&self) -> Outcome {
        if self.findings.is_empty() {
            Outcome::Clean
        } else {
            Outcome::Findings
        }
    }

    /// Renders the report.
    pub fn render(&self, format: OutputFormat) -> Result<String, LinterError> {
        format.render(&self.findings)
    }
}

impl From<Vec<Finding>> for Report {
    fn from(findings: Vec<Finding>) -> Self {
        Self::new(findings)
    }
}

/// Three-way result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No findings at or above the threshold.
    Clean,
    /// At least one finding at or above the threshold.
    Findings,
    /// The run failed before producing a report.
    Failed,
}

impl Outcome {
    /// Process exit code: 0, 1 or 2.
    pub const fn exit_code(self) -> u8 {
        match self {
            Outcome::Clean => 0,
            Outcome::Findings => 1,
            Outcome::Failed => 2,
        }
    }

    /// Classifies the result of a run.
    pub fn of(result: &Result<Report, LinterError>) -> Self {
        match result {
            Ok(report) => report.outcome(),
            Err(_) => Outcome::Failed,
        }
    }
}
