//! Integration tests for CLI behavior
//!
//! These tests verify the external behavior of the `mdlint` binary:
//! exit codes, output formats and configuration handling.

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Helper to create a command for the mdlint CLI running inside `dir`
fn mdlint_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mdlint"));
    cmd.current_dir(dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        let dir = TempDir::new().unwrap();
        mdlint_cmd(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn shows_version_with_flag() {
        let dir = TempDir::new().unwrap();
        mdlint_cmd(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn rejects_unknown_format() {
        let dir = TempDir::new().unwrap();
        mdlint_cmd(&dir)
            .args(["--format", "xml"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("xml"));
    }
}

mod exit_codes {
    use super::*;

    #[test]
    fn clean_tree_exits_zero_with_empty_output() {
        let dir = TempDir::new().unwrap();
        dir.child("README.md").write_str("# Title\n\nAll good.\n").unwrap();

        mdlint_cmd(&dir).assert().code(0).stdout(predicate::str::is_empty());
    }

    #[test]
    fn findings_exit_one() {
        let dir = TempDir::new().unwrap();
        dir.child("a.md").write_str("Trailing space \n").unwrap();

        mdlint_cmd(&dir)
            .assert()
            .code(1)
            .stdout("a.md:1:15 MD1800[warning] Line has trailing whitespace\n");
    }

    #[test]
    fn missing_path_exits_two() {
        let dir = TempDir::new().unwrap();

        mdlint_cmd(&dir)
            .arg("does-not-exist.md")
            .assert()
            .code(2)
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn zero_workers_exits_two() {
        let dir = TempDir::new().unwrap();
        dir.child("a.md").write_str("# A\n").unwrap();

        mdlint_cmd(&dir)
            .args(["--workers", "0"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("workers must be at least 1"));
    }

    #[test]
    fn min_severity_filters_to_clean() {
        let dir = TempDir::new().unwrap();
        dir.child("a.md").write_str("TODO: later\n").unwrap();

        mdlint_cmd(&dir).assert().code(1);
        mdlint_cmd(&dir)
            .args(["--min-severity", "warning"])
            .assert()
            .code(0)
            .stdout(predicate::str::is_empty());
    }
}

mod formats {
    use super::*;

    #[test]
    fn json_output_is_sorted_array() {
        let dir = TempDir::new().unwrap();
        dir.child("b.md").write_str("TODO b\n").unwrap();
        dir.child("a.md").write_str("x \nTODO a\n").unwrap();

        let output = mdlint_cmd(&dir)
            .args(["--format", "json"])
            .assert()
            .code(1)
            .get_output()
            .stdout
            .clone();

        let findings: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let records: Vec<(String, u64, String)> = findings
            .as_array()
            .unwrap()
            .iter()
            .map(|f| {
                (
                    f["file"].as_str().unwrap().to_string(),
                    f["line"].as_u64().unwrap(),
                    f["rule"].as_str().unwrap().to_string(),
                )
            })
            .collect();

        assert_eq!(
            records,
            vec![
                ("a.md".to_string(), 1, "MD1800".to_string()),
                ("a.md".to_string(), 2, "MD9000".to_string()),
                ("b.md".to_string(), 1, "MD9000".to_string()),
            ]
        );
    }

    #[test]
    fn json_output_empty_array_when_clean() {
        let dir = TempDir::new().unwrap();
        dir.child("a.md").write_str("# Fine\n").unwrap();

        mdlint_cmd(&dir)
            .args(["-f", "json"])
            .assert()
            .code(0)
            .stdout("[]\n");
    }
}

mod configuration {
    use super::*;

    #[test]
    fn discovers_config_and_applies_rule_options() {
        let dir = TempDir::new().unwrap();
        dir.child(".mdlint.jsonc")
            .write_str(
                r#"{
                    // tighter line length, reported as errors
                    "options": { "MD1000": { "line_length": 10, "severity": "error" } }
                }"#,
            )
            .unwrap();
        dir.child("a.md")
            .write_str("short\nthis line is way too long\n")
            .unwrap();

        mdlint_cmd(&dir)
            .assert()
            .code(1)
            .stdout("a.md:2:11 MD1000[error] Line exceeds maximum length of 10 characters\n");
    }

    #[test]
    fn explicit_config_path() {
        let dir = TempDir::new().unwrap();
        dir.child("conf/lint.json")
            .write_str(r#"{ "options": { "MD9000": "off" } }"#)
            .unwrap();
        dir.child("a.md").write_str("TODO\n").unwrap();

        mdlint_cmd(&dir)
            .args(["--config", "conf/lint.json"])
            .assert()
            .code(0);
    }

    #[test]
    fn invalid_config_exits_two() {
        let dir = TempDir::new().unwrap();
        dir.child(".mdlint.json")
            .write_str(r#"{ "unknown_key": true }"#)
            .unwrap();

        mdlint_cmd(&dir)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Config validation failed"));
    }

    #[test]
    fn unknown_rule_exits_two() {
        let dir = TempDir::new().unwrap();
        dir.child(".mdlint.json")
            .write_str(r#"{ "options": { "MD4242": true } }"#)
            .unwrap();

        mdlint_cmd(&dir)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("MD4242"));
    }

    #[test]
    fn max_files_exceeded_exits_two() {
        let dir = TempDir::new().unwrap();
        dir.child(".mdlint.json")
            .write_str(r#"{ "max_files": 1 }"#)
            .unwrap();
        dir.child("a.md").write_str("# A\n").unwrap();
        dir.child("b.md").write_str("# B\n").unwrap();

        mdlint_cmd(&dir)
            .assert()
            .code(2)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Too many files"));
    }

    #[test]
    fn exclude_flag_skips_directory() {
        let dir = TempDir::new().unwrap();
        dir.child("vendor/x.md").write_str("TODO\n").unwrap();
        dir.child("a.md").write_str("# A\n").unwrap();

        mdlint_cmd(&dir).assert().code(1);
        mdlint_cmd(&dir)
            .args(["--exclude", "vendor"])
            .assert()
            .code(0);
    }
}

mod paths {
    use super::*;

    #[test]
    fn lints_single_directory_as_root() {
        let dir = TempDir::new().unwrap();
        dir.child("docs/guide.md").write_str("TODO\n").unwrap();
        dir.child("other.md").write_str("TODO\n").unwrap();

        mdlint_cmd(&dir)
            .arg("docs")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("guide.md:1:1 MD9000[suggestion] TODO found"))
            .stdout(predicate::str::contains("other.md").not());
    }

    #[test]
    fn lints_explicit_files() {
        let dir = TempDir::new().unwrap();
        dir.child("a.md").write_str("TODO a\n").unwrap();
        dir.child("b.md").write_str("TODO b\n").unwrap();
        dir.child("notes.txt").write_str("TODO txt\n").unwrap();

        mdlint_cmd(&dir)
            .args(["a.md", "notes.txt"])
            .assert()
            .code(1)
            .stdout("a.md:1:1 MD9000[suggestion] TODO found\nnotes.txt:1:1 MD9000[suggestion] TODO found\n");
    }
}

mod excluded_paths {
    use super::*;

    #[test]
    fn exclude_applies_to_absolute_file_arguments() {
        let dir = TempDir::new().unwrap();
        dir.child("a.md").write_str("# A\n").unwrap();
        dir.child("b.md").write_str("TODO b\n").unwrap();

        mdlint_cmd(&dir)
            .args(["--exclude", "b.md"])
            .arg(dir.child("a.md").path())
            .arg(dir.child("b.md").path())
            .assert()
            .code(0)
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn exclude_applies_to_relative_file_arguments() {
        let dir = TempDir::new().unwrap();
        dir.child("docs/a.md").write_str("# A\n").unwrap();
        dir.child("docs/b.md").write_str("TODO b\n").unwrap();

        mdlint_cmd(&dir)
            .args(["--exclude", "docs/b.md", "./docs/a.md", "docs/b.md"])
            .assert()
            .code(0)
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn excluded_directory_with_absolute_root() {
        let dir = TempDir::new().unwrap();
        dir.child("vendor/x.md").write_str("TODO\n").unwrap();
        dir.child("a.md").write_str("# A\n").unwrap();

        mdlint_cmd(&dir)
            .args(["--exclude", "vendor"])
            .arg(dir.path())
            .assert()
            .code(0);
    }
}

mod list_rules {
    use super::*;

    #[test]
    fn lists_builtin_rules() {
        let dir = TempDir::new().unwrap();

        mdlint_cmd(&dir)
            .arg("--list-rules")
            .assert()
            .success()
            .stdout(predicate::str::contains("MD1000"))
            .stdout(predicate::str::contains("line-length"))
            .stdout(predicate::str::contains("MD9000"));
    }

    #[test]
    fn omits_disabled_rules() {
        let dir = TempDir::new().unwrap();
        dir.child(".mdlint.json")
            .write_str(r#"{ "options": { "MD9000": false } }"#)
            .unwrap();

        mdlint_cmd(&dir)
            .arg("--list-rules")
            .assert()
            .success()
            .stdout(predicate::str::contains("MD9000").not());
    }
}
