//! Rule contract.
//!
//! A rule is written against [`Rule`], which declares its own typed
//! configuration. The registry stores rules behind the object-safe
//! [`LintRule`] trait, implemented by [`ConfiguredRule`] once the options
//! blob has been deserialized into the rule's config type.

use std::path::Path;

use mdlint_parser::Document;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::RuleOption;
use crate::sandbox::NetworkAccess;
use crate::{Finding, LinterError, Severity};

/// Static description of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMeta {
    /// Globally unique identifier, e.g. `MD1000`.
    pub id: &'static str,
    /// Short kebab-case name, e.g. `line-length`.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Severity used when the configuration does not override it.
    pub default_severity: Severity,
}

/// Per-file inputs handed to every rule.
///
/// A fresh context is built for each file; rules share nothing else.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Path of the file being linted, as discovered.
    pub path: &'a Path,
    /// Parsed document.
    pub document: &'a Document<'a>,
    /// Outbound network capability for this run.
    pub network: NetworkAccess<'a>,
}

/// A lint rule with a typed configuration.
///
/// Implementations must behave as pure functions of `(document, config)`:
/// no I/O, no shared locks, no mutation of the input. Input a rule cannot
/// make sense of yields no findings rather than an error.
pub trait Rule: Send + Sync + 'static {
    /// Rule options, deserialized from the rule's entry in the config file.
    type Config: DeserializeOwned + Default + Send + Sync + 'static;

    /// Returns the rule's metadata.
    fn meta(&self) -> RuleMeta;

    /// Evaluates the rule against one document.
    fn apply(&self, ctx: &RuleContext<'_>, config: &Self::Config) -> Vec<Finding>;
}

/// Configuration for rules that take no options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoOptions {}

/// Object-safe rule interface stored in the registry.
pub trait LintRule: Send + Sync {
    /// Returns the rule's metadata.
    fn meta(&self) -> RuleMeta;

    /// Returns the rule identifier.
    fn id(&self) -> &'static str {
        self.meta().id
    }

    /// Returns the effective severity stamped on this rule's findings.
    fn severity(&self) -> Severity;

    /// Evaluates the rule against one document.
    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Finding>;
}

/// A rule bound to its deserialized configuration and effective severity.
pub struct ConfiguredRule<R: Rule> {
    rule: R,
    config: R::Config,
    severity: Severity,
}

impl<R: Rule> ConfiguredRule<R> {
    /// Binds `rule` to its default configuration and default severity.
    pub fn new(rule: R) -> Self {
        let severity = rule.meta().default_severity;
        Self {
            rule,
            config: R::Config::default(),
            severity,
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: R::Config) -> Self {
        self.config = config;
        self
    }

    /// Overrides the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns the bound configuration.
    pub fn config(&self) -> &R::Config {
        &self.config
    }

    /// Binds `rule` according to its entry in the options map.
    ///
    /// Returns `Ok(None)` when the entry disables the rule.
    pub fn from_option(rule: R, option: Option<&RuleOption>) -> Result<Option<Self>, LinterError> {
        let id = rule.meta().id;
        let configured = Self::new(rule);

        let Some(option) = option else {
            return Ok(Some(configured));
        };

        match option {
            RuleOption::Enabled(false) => Ok(None),
            RuleOption::Enabled(true) => Ok(Some(configured)),
            RuleOption::Severity(s) if s.eq_ignore_ascii_case("off") => Ok(None),
            RuleOption::Severity(s) => {
                let severity = s
                    .parse::<Severity>()
                    .map_err(|e| LinterError::rule_options(id, e))?;
                Ok(Some(configured.with_severity(severity)))
            }
            RuleOption::Options(Value::Object(map)) => {
                let mut map = map.clone();
                let severity = match map.remove("severity") {
                    None => None,
                    Some(Value::String(s)) if s.eq_ignore_ascii_case("off") => return Ok(None),
                    Some(Value::String(s)) => Some(
                        s.parse::<Severity>()
                            .map_err(|e| LinterError::rule_options(id, e))?,
                    ),
                    Some(other) => {
                        return Err(LinterError::rule_options(
                            id,
                            format!("severity must be a string, got {}", other),
                        ));
                    }
                };

                let configured = if map.is_empty() {
                    configured
                } else {
                    let config: R::Config = serde_json::from_value(Value::Object(map))
                        .map_err(|e| LinterError::rule_options(id, e.to_string()))?;
                    configured.with_config(config)
                };
                Ok(Some(match severity {
                    Some(severity) => configured.with_severity(severity),
                    None => configured,
                }))
            }
            RuleOption::Options(other) => Err(LinterError::rule_options(
                id,
                format!("expected a boolean, a severity or an object, got {}", other),
            )),
        }
    }
}

impl<R: Rule> LintRule for ConfiguredRule<R> {
    fn meta(&self) -> RuleMeta {
        self.rule.meta()
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let id = self.rule.meta().id;
        self.rule
            .apply(ctx, &self.config)
            .into_iter()
            .map(|mut finding| {
                finding.rule = id.to_string();
                finding.severity = self.severity;
                finding
            })
            .collect()
    }
}
