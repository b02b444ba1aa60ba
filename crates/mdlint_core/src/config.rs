//! Linter configuration.

use std::collections::HashMap;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use crate::formatters::OutputFormat;
use crate::{LinterError, Severity};

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Result<Validator, String>> = OnceLock::new();

/// Config file names searched by [`LinterConfig::discover`], in order.
pub const CONFIG_FILES: &[&str] = &[".mdlint.jsonc", ".mdlint.json"];

/// Include patterns used when the configuration names none.
pub const DEFAULT_INCLUDE: &[&str] = &["**/*.{md,markdown,mdown,mkdn,mkd}"];

/// Default per-file size ceiling (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Configuration file model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinterConfig {
    /// Rule configuration (enable/disable/severity/options).
    #[serde(default)]
    pub options: HashMap<String, RuleOption>,

    /// File patterns to include. An explicit empty list includes every file.
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// File patterns to exclude.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Maximum number of files linted concurrently.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Maximum number of files per run. `0` disables the limit.
    #[serde(default)]
    pub max_files: usize,

    /// Maximum file size in bytes. `0` disables the limit.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Findings below this severity are dropped from the report.
    #[serde(default = "default_min_severity")]
    pub min_severity: Severity,

    /// Report format.
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_include() -> Vec<String> {
    DEFAULT_INCLUDE.iter().map(|p| p.to_string()).collect()
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_min_severity() -> Severity {
    Severity::Suggestion
}

/// Configuration for a single rule (in options map).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RuleOption {
    /// Rule is enabled/disabled (boolean).
    Enabled(bool),
    /// Rule is enabled with severity string ("error", "warning", "suggestion", "off").
    Severity(String),
    /// Rule is enabled with specific options object.
    Options(serde_json::Value),
}

impl LinterConfig {
    /// Creates a configuration with every default applied.
    pub fn new() -> Self {
        Self {
            options: HashMap::new(),
            include: default_include(),
            exclude: Vec::new(),
            workers: default_workers(),
            max_files: 0,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            min_severity: default_min_severity(),
            format: OutputFormat::default(),
        }
    }

    /// Looks for a configuration file directly inside `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.mdlint.jsonc` and `.mdlint.json`; comments and trailing
    /// commas are accepted in both.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LinterError::config(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parses configuration from a JSON or JSONC string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, LinterError> {
        let parse_options = jsonc_parser::ParseOptions::default();
        let value = jsonc_parser::parse_to_serde_value(json, &parse_options)
            .map_err(|e| LinterError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        let schema = CONFIG_SCHEMA
            .get_or_init(|| {
                let schema_json: serde_json::Value = serde_json::from_str(SCHEMA_JSON)
                    .map_err(|e| format!("Invalid embedded config schema: {}", e))?;
                Validator::new(&schema_json)
                    .map_err(|e| format!("Invalid config schema compilation: {}", e))
            })
            .as_ref()
            .map_err(|e| LinterError::Internal(e.clone()))?;

        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(LinterError::config(format!(
                "Config validation failed: {}",
                error_msg
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| LinterError::config(format!("Invalid config: {}", e)))
    }

    /// Returns the run limits and filters derived from this configuration.
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            workers: self.workers,
            max_files: self.max_files,
            max_file_size: self.max_file_size,
        }
    }
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable settings for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Include globs, matched against root-relative paths.
    pub include: Vec<String>,
    /// Exclude globs, matched against root-relative paths.
    pub exclude: Vec<String>,
    /// Worker count (at least 1).
    pub workers: usize,
    /// File count ceiling, `0` for none.
    pub max_files: usize,
    /// Per-file byte ceiling, `0` for none.
    pub max_file_size: u64,
}

impl RunConfig {
    /// Checks the settings before any I/O happens.
    pub fn validate(&self) -> Result<(), LinterError> {
        if self.workers == 0 {
            return Err(LinterError::config("workers must be at least 1"));
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        LinterConfig::new().run_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::tempdir;

    #[test]
    fn test_config_new() {
        let config = LinterConfig::new();
        assert!(config.options.is_empty());
        assert_eq!(config.include, DEFAULT_INCLUDE);
        assert!(config.workers >= 1);
        assert_eq!(config.max_files, 0);
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert_eq!(config.min_severity, Severity::Suggestion);
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "options": {
                "MD9000": true,
                "MD1000": { "line_length": 100, "severity": "error" }
            },
            "include": ["**/*.md"],
            "workers": 4,
            "max_files": 10
        }"#;

        let config = LinterConfig::from_json(json).unwrap();
        assert_eq!(config.options.len(), 2);
        assert_eq!(config.include, vec!["**/*.md"]);
        assert_eq!(config.workers, 4);
        assert_eq!(config.max_files, 10);
    }

    #[test]
    fn test_rule_option_variants() {
        let json = r#"{
            "options": {
                "MD9000": false,
                "MD1800": "error",
                "MD1000": { "line_length": 100 }
            }
        }"#;

        let config = LinterConfig::from_json(json).unwrap();
        assert_eq!(config.options["MD9000"], RuleOption::Enabled(false));
        assert_eq!(
            config.options["MD1800"],
            RuleOption::Severity("error".to_string())
        );
        assert_eq!(
            config.options["MD1000"],
            RuleOption::Options(serde_json::json!({ "line_length": 100 }))
        );
    }

    #[test]
    fn test_config_from_jsonc_with_comments() {
        let json = r#"{
            // line comment
            "format": "json", /* block */
            "min_severity": "warning",
        }"#;

        let config = LinterConfig::from_json(json).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.min_severity, Severity::Warning);
    }

    #[test]
    fn test_config_empty_document() {
        let config = LinterConfig::from_json("").unwrap();
        assert!(config.options.is_empty());
    }

    #[test]
    fn test_run_config_from_linter_config() {
        let mut config = LinterConfig::new();
        config.exclude = vec!["vendor/**".into()];
        config.workers = 3;
        config.max_file_size = 10;

        let run = config.run_config();
        assert_eq!(run.exclude, vec!["vendor/**"]);
        assert_eq!(run.workers, 3);
        assert_eq!(run.max_file_size, 10);
        assert!(run.validate().is_ok());
    }

    #[test]
    fn test_run_config_rejects_zero_workers() {
        let run = RunConfig {
            workers: 0,
            ..RunConfig::default()
        };
        assert!(matches!(run.validate(), Err(LinterError::Config(_))));
    }

    #[test]
    fn test_discover_prefers_jsonc() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".mdlint.json"), "{}").unwrap();
        assert_eq!(
            LinterConfig::discover(dir.path()),
            Some(dir.path().join(".mdlint.json"))
        );

        fs::write(dir.path().join(".mdlint.jsonc"), "{}").unwrap();
        assert_eq!(
            LinterConfig::discover(dir.path()),
            Some(dir.path().join(".mdlint.jsonc"))
        );
    }

    #[test]
    fn test_discover_none() {
        let dir = tempdir().unwrap();
        assert_eq!(LinterConfig::discover(dir.path()), None);
    }

    #[test]
    fn test_from_file_jsonc() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".mdlint.jsonc");
        fs::write(
            &path,
            "{\n  // drafts are linted separately\n  \"exclude\": [\"drafts/**\"],\n}\n",
        )
        .unwrap();

        let config = LinterConfig::from_file(&path).unwrap();
        assert_eq!(config.exclude, vec!["drafts/**"]);
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempdir().unwrap();
        let err = LinterConfig::from_file(dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[rstest]
    #[case::unknown_property(r#"{ "ruless": [] }"#, "Config validation failed")]
    #[case::type_mismatch(r#"{ "workers": "many" }"#, "Config validation failed")]
    #[case::zero_workers(r#"{ "workers": 0 }"#, "Config validation failed")]
    #[case::invalid_enum_value(
        r#"{ "options": { "MD1000": "invalid-severity" } }"#,
        "Config validation failed"
    )]
    #[case::invalid_format(r#"{ "format": "xml" }"#, "Config validation failed")]
    #[case::malformed(r#"{ "options": "#, "Invalid JSON")]
    fn test_config_validation_errors(#[case] json: &str, #[case] expected_error_part: &str) {
        let result = LinterConfig::from_json(json);
        assert!(result.is_err(), "Expected error for JSON: {}", json);
        let err = result.unwrap_err();
        assert!(
            err.to_string().contains(expected_error_part),
            "Error message '{}' should contain '{}'",
            err,
            expected_error_part
        );
    }
}
