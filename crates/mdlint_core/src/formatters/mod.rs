//! Report formatters.

mod json;
mod text;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Finding, LinterError};

pub use json::render_json;
pub use text::render_text;

/// Output format for a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `file:line:column rule[severity] message` line per finding.
    #[default]
    Text,
    /// Pretty-printed JSON array of findings.
    Json,
}

impl OutputFormat {
    /// Returns the lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }

    /// Renders already sorted findings.
    pub fn render(&self, findings: &[Finding]) -> Result<String, LinterError> {
        match self {
            OutputFormat::Text => Ok(render_text(findings)),
            OutputFormat::Json => render_json(findings),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format '{}' (expected text or json)", other)),
        }
    }
}
