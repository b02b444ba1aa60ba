//! MD1500: preferred terms.

use std::collections::BTreeMap;

use mdlint_parser::LineKind;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use crate::rule::{Rule, RuleContext, RuleMeta};
use crate::{Finding, Severity};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    terms: BTreeMap<String, String>,
}

/// Term mappings, compiled once when the configuration is loaded.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct PreferredTermsConfig {
    terms: Vec<Term>,
}

#[derive(Debug, Clone)]
struct Term {
    prefer: String,
    pattern: Regex,
}

impl PreferredTermsConfig {
    /// Builds a configuration from `(avoid, prefer)` pairs.
    pub fn new<I, A, P>(terms: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = (A, P)>,
        A: Into<String>,
        P: Into<String>,
    {
        let raw = RawConfig {
            terms: terms
                .into_iter()
                .map(|(avoid, prefer)| (avoid.into(), prefer.into()))
                .collect(),
        };
        Self::try_from(raw)
    }

    /// Returns the number of configured terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl TryFrom<RawConfig> for PreferredTermsConfig {
    type Error = regex::Error;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let terms = raw
            .terms
            .into_iter()
            .filter(|(avoid, _)| !avoid.trim().is_empty())
            .map(|(avoid, prefer)| {
                let pattern = RegexBuilder::new(&word_pattern(avoid.trim()))
                    .case_insensitive(true)
                    .build()?;
                Ok(Term { prefer, pattern })
            })
            .collect::<Result<_, regex::Error>>()?;
        Ok(Self { terms })
    }
}

/// Escapes `term`, anchoring each edge that is a word character to a word boundary.
fn word_pattern(term: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let start = if term.starts_with(is_word) { r"\b" } else { "" };
    let end = if term.ends_with(is_word) { r"\b" } else { "" };
    format!("{}{}{}", start, regex::escape(term), end)
}

/// Reports whole-word, case-insensitive uses of avoided terms in prose.
pub struct PreferredTerms;

impl Rule for PreferredTerms {
    type Config = PreferredTermsConfig;

    fn meta(&self) -> RuleMeta {
        RuleMeta {
            id: "MD1500",
            name: "preferred-terms",
            description: "Use the project's preferred terminology",
            default_severity: Severity::Suggestion,
        }
    }

    fn apply(&self, ctx: &RuleContext<'_>, config: &Self::Config) -> Vec<Finding> {
        if config.terms.is_empty() {
            return Vec::new();
        }

        let mut findings = Vec::new();
        for (line, kind, text) in ctx.document.lines() {
            if !matches!(kind, LineKind::Text | LineKind::Table) {
                continue;
            }
            for term in &config.terms {
                for m in term.pattern.find_iter(text) {
                    findings.push(Finding::new(
                        "MD1500",
                        line,
                        ctx.document.column(line, m.start()),
                        format!("Use \"{}\" instead of \"{}\"", term.prefer, m.as_str()),
                    ));
                }
            }
        }
        findings
    }
}
