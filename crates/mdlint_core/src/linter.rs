//! Lint orchestration.
//!
//! A run discovers files, dispatches them over a fixed-size worker pool,
//! applies every registered rule to each parsed document and returns the
//! collected findings in report order. The first fatal error aborts the
//! run: no new files are started, files already in flight finish, and no
//! partial findings are returned.

use std::cell::Cell;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mdlint_parser::{Document, MarkdownParser};
use parking_lot::Mutex;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::{LinterConfig, RunConfig};
use crate::file_finder::FileFinder;
use crate::finding::sort_findings;
use crate::registry::RuleRegistry;
use crate::report::Report;
use crate::rule::{LintRule, RuleContext};
use crate::sandbox::{NetworkAccess, Sandbox};
use crate::{Finding, LinterError};

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Discovering,
    Dispatching,
    Draining,
    Done,
    Failed,
}

struct RunTracker {
    state: RunState,
}

impl RunTracker {
    fn new() -> Self {
        Self {
            state: RunState::Idle,
        }
    }

    fn advance(&mut self, next: RunState) {
        debug!("Run state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn finish<T>(mut self, result: Result<T, LinterError>) -> Result<T, LinterError> {
        match &result {
            Ok(_) => self.advance(RunState::Done),
            Err(e) => {
                self.advance(RunState::Failed);
                warn!("Lint run failed: {}", e);
            }
        }
        result
    }
}

thread_local! {
    static CURRENT_RULE: Cell<Option<&'static str>> = const { Cell::new(None) };
}

/// Identifier of the rule being applied on the calling thread, if any.
///
/// A panic hook can use this to tell a contained rule panic apart from a
/// genuine crash.
pub fn current_rule() -> Option<&'static str> {
    CURRENT_RULE.get()
}

/// Marks a rule as running on this thread until dropped.
struct RuleScope {
    previous: Option<&'static str>,
}

impl RuleScope {
    fn enter(id: &'static str) -> Self {
        Self {
            previous: CURRENT_RULE.replace(Some(id)),
        }
    }
}

impl Drop for RuleScope {
    fn drop(&mut self) {
        CURRENT_RULE.set(self.previous);
    }
}

/// The linter.
pub struct Linter {
    config: RunConfig,
    registry: RuleRegistry,
    parser: MarkdownParser,
}

impl Linter {
    /// Creates a linter from run settings and a frozen registry.
    ///
    /// The settings are validated before any I/O.
    pub fn new(config: RunConfig, registry: RuleRegistry) -> Result<Self, LinterError> {
        config.validate()?;
        Ok(Self {
            config,
            registry,
            parser: MarkdownParser::new(),
        })
    }

    /// Creates a linter with the built-in rules configured from `config`.
    pub fn from_config(config: &LinterConfig) -> Result<Self, LinterError> {
        let registry = RuleRegistry::builtin(&config.options)?;
        Self::new(config.run_config(), registry)
    }

    /// Returns the run settings.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Returns the rule registry.
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Lints every file below `root` that passes the include/exclude filters.
    pub fn lint_path(&self, root: impl AsRef<Path>) -> Result<Report, LinterError> {
        let root = root.as_ref();
        let mut run = RunTracker::new();

        run.advance(RunState::Discovering);
        let result = FileFinder::new(&self.config.include, &self.config.exclude)
            .and_then(|finder| finder.discover(root))
            .and_then(|files| self.dispatch(&files, &mut run));

        run.finish(result)
    }

    /// Lints an explicit list of files.
    ///
    /// Exclude patterns are matched relative to `root`; include patterns are
    /// not applied.
    pub fn lint_files(
        &self,
        root: impl AsRef<Path>,
        paths: &[PathBuf],
    ) -> Result<Report, LinterError> {
        let root = root.as_ref();
        let mut run = RunTracker::new();

        run.advance(RunState::Discovering);
        let result = FileFinder::new(&self.config.include, &self.config.exclude)
            .and_then(|finder| finder.filter_files(root, paths))
            .and_then(|files| self.dispatch(&files, &mut run));

        run.finish(result)
    }

    /// Lints an in-memory document with the same rule set.
    ///
    /// Only the size ceiling applies. Findings are returned in report order.
    pub fn lint_content(
        &self,
        path: impl AsRef<Path>,
        content: &str,
    ) -> Result<Vec<Finding>, LinterError> {
        let path = path.as_ref();
        self.check_size(path, content.len() as u64)?;

        let sandbox = Sandbox::new();
        let _network = sandbox.disable_network();
        let rules = self.registry.all();

        let mut findings = self.check(path, content, &rules, sandbox.network());
        sort_findings(&mut findings);
        Ok(findings)
    }

    fn dispatch(&self, files: &[PathBuf], run: &mut RunTracker) -> Result<Report, LinterError> {
        if self.config.max_files > 0 && files.len() > self.config.max_files {
            return Err(LinterError::TooManyFiles {
                count: files.len(),
                max: self.config.max_files,
            });
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|i| format!("mdlint-worker-{}", i))
            .build()
            .map_err(|e| LinterError::Internal(format!("Failed to build worker pool: {}", e)))?;

        let sandbox = Sandbox::new();
        let _network = sandbox.disable_network();
        let network = sandbox.network();
        let rules = self.registry.all();
        let collected = Mutex::new(Vec::new());

        info!(
            "Linting {} files with {} rules on {} workers",
            files.len(),
            rules.len(),
            self.config.workers
        );
        run.advance(RunState::Dispatching);

        let result = pool.install(|| {
            files.par_iter().try_for_each(|path| -> Result<(), LinterError> {
                let findings = self.lint_file(path, &rules, network)?;
                collected.lock().extend(findings);
                Ok(())
            })
        });

        run.advance(RunState::Draining);
        result?;

        Ok(Report::new(collected.into_inner()))
    }

    fn lint_file(
        &self,
        path: &Path,
        rules: &[Arc<dyn LintRule>],
        network: NetworkAccess<'_>,
    ) -> Result<Vec<Finding>, LinterError> {
        debug!("Linting {}", path.display());

        let metadata = fs::metadata(path).map_err(|e| {
            LinterError::file(format!("Failed to stat {}: {}", path.display(), e))
        })?;
        self.check_size(path, metadata.len())?;

        let bytes = fs::read(path).map_err(|e| {
            LinterError::file(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let content = String::from_utf8_lossy(&bytes);

        Ok(self.check(path, &content, rules, network))
    }

    fn check_size(&self, path: &Path, size: u64) -> Result<(), LinterError> {
        let limit = self.config.max_file_size;
        if limit > 0 && size > limit {
            return Err(LinterError::FileTooLarge {
                path: path.to_path_buf(),
                size,
                limit,
            });
        }
        Ok(())
    }

    /// Applies every rule to one document and tags the findings with `path`.
    ///
    /// Files without a Markdown extension are checked as plain lines.
    fn check(
        &self,
        path: &Path,
        content: &str,
        rules: &[Arc<dyn LintRule>],
        network: NetworkAccess<'_>,
    ) -> Vec<Finding> {
        let markdown = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_none_or(|ext| self.parser.can_parse(ext));

        let document = if markdown {
            match self.parser.parse(content) {
                Ok(document) => document,
                Err(e) => {
                    debug!("Falling back to plain lines for {}: {}", path.display(), e);
                    Document::plain(content)
                }
            }
        } else {
            Document::plain(content)
        };

        let ctx = RuleContext {
            path,
            document: &document,
            network,
        };
        let file = display_path(path);

        let mut findings = Vec::new();
        for rule in rules {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                let _scope = RuleScope::enter(rule.id());
                rule.check(&ctx)
            }));
            match outcome {
                Ok(found) => findings.extend(found.into_iter().map(|mut finding| {
                    if finding.file.is_empty() {
                        finding.file = file.clone();
                    }
                    finding
                })),
                Err(_) => debug!("Rule {} panicked on {}", rule.id(), path.display()),
            }
        }
        findings
    }
}

/// Path as shown in reports, without a leading `./`.
fn display_path(path: &Path) -> String {
    path.strip_prefix(".")
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}
