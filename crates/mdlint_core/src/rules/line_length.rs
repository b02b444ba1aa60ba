//! MD1000: line length.

use mdlint_parser::LineKind;
use serde::Deserialize;

use crate::rule::{Rule, RuleContext, RuleMeta};
use crate::{Finding, Severity};

const DEFAULT_LINE_LENGTH: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LineLengthConfig {
    /// Maximum number of characters per line. `0` means the default.
    pub line_length: usize,
    /// Check the contents of code blocks.
    pub code_blocks: bool,
    /// Check table rows.
    pub tables: bool,
}

impl Default for LineLengthConfig {
    fn default() -> Self {
        Self {
            line_length: DEFAULT_LINE_LENGTH,
            code_blocks: false,
            tables: false,
        }
    }
}

/// Reports lines longer than the configured limit.
///
/// Length is counted in characters. Fence lines and front matter are never
/// checked.
pub struct LineLength;

impl Rule for LineLength {
    type Config = LineLengthConfig;

    fn meta(&self) -> RuleMeta {
        RuleMeta {
            id: "MD1000",
            name: "line-length",
            description: "Lines must not exceed the configured length",
            default_severity: Severity::Warning,
        }
    }

    fn apply(&self, ctx: &RuleContext<'_>, config: &Self::Config) -> Vec<Finding> {
        let limit = match config.line_length {
            0 => DEFAULT_LINE_LENGTH,
            n => n,
        };

        ctx.document
            .lines()
            .filter(|(_, kind, _)| match kind {
                LineKind::Text => true,
                LineKind::Code => config.code_blocks,
                LineKind::Table => config.tables,
                LineKind::Fence | LineKind::FrontMatter => false,
            })
            .filter(|(_, _, text)| text.chars().count() > limit)
            .map(|(line, _, _)| {
                Finding::new(
                    "MD1000",
                    line,
                    limit as u32 + 1,
                    format!("Line exceeds maximum length of {} characters", limit),
                )
            })
            .collect()
    }
}
