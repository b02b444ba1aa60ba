//! Built-in rules.

mod code_fence_language;
mod heading_increment;
mod line_length;
mod no_todo;
mod preferred_terms;
mod trailing_whitespace;

use std::collections::HashMap;

use tracing::debug;

use crate::LinterError;
use crate::config::RuleOption;
use crate::registry::RegistryBuilder;
use crate::rule::{ConfiguredRule, Rule};

pub use code_fence_language::{CodeFenceLanguage, CodeFenceLanguageConfig};
pub use heading_increment::{HeadingIncrement, HeadingIncrementConfig};
pub use line_length::{LineLength, LineLengthConfig};
pub use no_todo::NoTodo;
pub use preferred_terms::{PreferredTerms, PreferredTermsConfig};
pub use trailing_whitespace::{TrailingWhitespace, TrailingWhitespaceConfig};

/// Identifiers of every built-in rule, sorted.
pub const BUILTIN_RULES: &[&str] = &["MD1000", "MD1100", "MD1400", "MD1500", "MD1800", "MD9000"];

/// Registers every built-in rule that `options` does not disable.
///
/// An options entry whose key is not a built-in rule is rejected before
/// anything is registered.
pub fn register_builtin(
    builder: &mut RegistryBuilder,
    options: &HashMap<String, RuleOption>,
) -> Result<(), LinterError> {
    let mut unknown: Vec<&str> = options
        .keys()
        .map(String::as_str)
        .filter(|id| !BUILTIN_RULES.contains(id))
        .collect();
    unknown.sort_unstable();
    if let Some(id) = unknown.first() {
        return Err(LinterError::UnknownRule(id.to_string()));
    }

    register(builder, options, LineLength)?;
    register(builder, options, HeadingIncrement)?;
    register(builder, options, CodeFenceLanguage)?;
    register(builder, options, PreferredTerms)?;
    register(builder, options, TrailingWhitespace)?;
    register(builder, options, NoTodo)?;
    Ok(())
}

fn register<R: Rule>(
    builder: &mut RegistryBuilder,
    options: &HashMap<String, RuleOption>,
    rule: R,
) -> Result<(), LinterError> {
    let id = rule.meta().id;
    match ConfiguredRule::from_option(rule, options.get(id))? {
        Some(configured) => {
            builder.register(configured)?;
        }
        None => debug!("Rule {} disabled by configuration", id),
    }
    Ok(())
}
