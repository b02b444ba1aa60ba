//! MD1100: heading increment.

use serde::Deserialize;

use crate::rule::{Rule, RuleContext, RuleMeta};
use crate::{Finding, Severity};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadingIncrementConfig {
    /// Heading texts whose sections are skipped entirely.
    pub exclude: Vec<String>,
}

/// Reports headings that skip a level, e.g. `#` followed by `###`.
///
/// A heading listed in `exclude` starts a skipped section that ends at the
/// next heading of the same or a shallower depth.
pub struct HeadingIncrement;

impl Rule for HeadingIncrement {
    type Config = HeadingIncrementConfig;

    fn meta(&self) -> RuleMeta {
        RuleMeta {
            id: "MD1100",
            name: "heading-increment",
            description: "Heading levels should only increment by one level at a time",
            default_severity: Severity::Warning,
        }
    }

    fn apply(&self, ctx: &RuleContext<'_>, config: &Self::Config) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut previous: Option<u8> = None;
        let mut skipping: Option<u8> = None;

        for heading in ctx.document.headings() {
            if let Some(depth) = skipping {
                if heading.depth > depth {
                    continue;
                }
                skipping = None;
            }

            if config.exclude.iter().any(|text| *text == heading.text) {
                skipping = Some(heading.depth);
                previous = Some(heading.depth);
                continue;
            }

            if let Some(prev) = previous
                && heading.depth > prev + 1
            {
                findings.push(Finding::new(
                    "MD1100",
                    heading.line,
                    heading.column,
                    format!(
                        "Heading level should only increment by one level at a time (expected h{}, got h{})",
                        prev + 1,
                        heading.depth
                    ),
                ));
            }

            previous = Some(heading.depth);
        }

        findings
    }
}
