//! MD9000: TODO markers.

use mdlint_parser::LineKind;

use crate::rule::{NoOptions, Rule, RuleContext, RuleMeta};
use crate::{Finding, Severity};

/// Reports the first `TODO` on each line outside code blocks.
pub struct NoTodo;

impl Rule for NoTodo {
    type Config = NoOptions;

    fn meta(&self) -> RuleMeta {
        RuleMeta {
            id: "MD9000",
            name: "no-todo",
            description: "Flags TODO markers left in prose",
            default_severity: Severity::Suggestion,
        }
    }

    fn apply(&self, ctx: &RuleContext<'_>, _config: &NoOptions) -> Vec<Finding> {
        ctx.document
            .lines()
            .filter(|(_, kind, _)| !matches!(kind, LineKind::Code | LineKind::Fence))
            .filter_map(|(line, _, text)| {
                text.find("TODO").map(|idx| {
                    Finding::new("MD9000", line, ctx.document.column(line, idx), "TODO found")
                })
            })
            .collect()
    }
}
