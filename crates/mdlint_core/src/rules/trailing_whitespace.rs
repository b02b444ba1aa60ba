//! MD1800: trailing whitespace.

use mdlint_parser::LineKind;
use serde::Deserialize;

use crate::rule::{Rule, RuleContext, RuleMeta};
use crate::{Finding, Severity};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrailingWhitespaceConfig {
    /// Skip code blocks, fence lines included.
    pub ignore_code_blocks: bool,
}

/// Reports spaces or tabs at the end of a line.
///
/// The column points at the first trailing whitespace character.
pub struct TrailingWhitespace;

impl Rule for TrailingWhitespace {
    type Config = TrailingWhitespaceConfig;

    fn meta(&self) -> RuleMeta {
        RuleMeta {
            id: "MD1800",
            name: "trailing-whitespace",
            description: "Lines must not end with spaces or tabs",
            default_severity: Severity::Warning,
        }
    }

    fn apply(&self, ctx: &RuleContext<'_>, config: &Self::Config) -> Vec<Finding> {
        ctx.document
            .lines()
            .filter(|(_, kind, _)| {
                !(config.ignore_code_blocks && matches!(kind, LineKind::Code | LineKind::Fence))
            })
            .filter_map(|(line, _, text)| {
                let trimmed = text.trim_end_matches([' ', '\t']);
                (trimmed.len() < text.len()).then(|| {
                    Finding::new(
                        "MD1800",
                        line,
                        trimmed.chars().count() as u32 + 1,
                        "Line has trailing whitespace",
                    )
                })
            })
            .collect()
    }
}
