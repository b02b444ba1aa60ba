//! Rule registry.
//!
//! Rules are registered once through a [`RegistryBuilder`]; the resulting
//! [`RuleRegistry`] is immutable and shared by reference with every worker.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::RuleOption;
use crate::rule::LintRule;
use crate::LinterError;

/// Immutable mapping from rule identifier to rule.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    by_id: HashMap<&'static str, Arc<dyn LintRule>>,
    ordered: Vec<Arc<dyn LintRule>>,
}

impl RuleRegistry {
    /// Starts an empty registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Builds a registry holding every built-in rule not disabled in `options`.
    ///
    /// Each rule receives its own options entry, deserialized into its typed
    /// configuration. An entry for an unknown rule is an error.
    pub fn builtin(options: &HashMap<String, RuleOption>) -> Result<Self, LinterError> {
        let mut builder = Self::builder();
        crate::rules::register_builtin(&mut builder, options)?;
        Ok(builder.build())
    }

    /// Returns the rule registered under `id`.
    pub fn lookup(&self, id: &str) -> Option<Arc<dyn LintRule>> {
        self.by_id.get(id).cloned()
    }

    /// Returns every rule, sorted by identifier.
    ///
    /// The returned vector is a fresh copy; callers may reorder or drop
    /// entries without affecting the registry.
    pub fn all(&self) -> Vec<Arc<dyn LintRule>> {
        self.ordered.clone()
    }

    /// Returns every rule identifier, sorted.
    pub fn ids(&self) -> Vec<&'static str> {
        self.ordered.iter().map(|rule| rule.id()).collect()
    }

    /// Returns the number of registered rules.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Returns true if no rule is registered.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.ids())
            .finish()
    }
}

/// Collects rules before the registry is frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    rules: HashMap<&'static str, Arc<dyn LintRule>>,
}

impl RegistryBuilder {
    /// Adds a rule keyed by its identifier.
    ///
    /// Fails with [`LinterError::DuplicateRule`] if the identifier is taken.
    pub fn register(&mut self, rule: impl LintRule + 'static) -> Result<&mut Self, LinterError> {
        self.register_shared(Arc::new(rule))
    }

    /// Adds an already shared rule.
    pub fn register_shared(&mut self, rule: Arc<dyn LintRule>) -> Result<&mut Self, LinterError> {
        let id = rule.id();
        if self.rules.contains_key(id) {
            return Err(LinterError::DuplicateRule(id.to_string()));
        }
        self.rules.insert(id, rule);
        Ok(self)
    }

    /// Returns true if `id` has been registered.
    pub fn contains(&self, id: &str) -> bool {
        self.rules.contains_key(id)
    }

    /// Freezes the registry.
    pub fn build(self) -> RuleRegistry {
        let mut ordered: Vec<_> = self.rules.values().cloned().collect();
        ordered.sort_by_key(|rule| rule.id());

        RuleRegistry {
            by_id: self.rules,
            ordered,
        }
    }
}
