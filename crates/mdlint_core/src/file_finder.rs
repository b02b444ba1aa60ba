//! File discovery with include/exclude filtering.
//!
//! Patterns are matched against paths relative to the discovery root.
//! Exclude always wins over include, and an excluded directory is never
//! descended into.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::LinterError;

pub struct FileFinder {
    include_globs: Option<GlobSet>,
    exclude_globs: Option<GlobSet>,
}

impl FileFinder {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, LinterError> {
        let include_globs = Self::build_globset(include)?;
        let exclude_globs = Self::build_globset(exclude)?;

        Ok(Self {
            include_globs,
            exclude_globs,
        })
    }

    fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, LinterError> {
        if patterns.is_empty() {
            return Ok(None);
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                LinterError::config(format!("Invalid glob pattern '{}': {}", pattern, e))
            })?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| LinterError::config(format!("Failed to build globset: {}", e)))?;

        Ok(Some(globset))
    }

    /// Returns true if a root-relative path matches an exclude pattern.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        self.exclude_globs
            .as_ref()
            .is_some_and(|excludes| excludes.is_match(relative))
    }

    /// Returns true if a root-relative path matches the include patterns.
    ///
    /// With no include patterns every path is included.
    pub fn is_included(&self, relative: &Path) -> bool {
        self.include_globs
            .as_ref()
            .is_none_or(|includes| includes.is_match(relative))
    }

    /// Checks if a root-relative file path should be skipped.
    pub fn should_ignore(&self, relative: &Path) -> bool {
        self.is_excluded(relative) || !self.is_included(relative)
    }

    /// Walks `root` and returns every file that passes the filters.
    ///
    /// A missing root or an unreadable directory below it is fatal. The
    /// result is sorted and deduplicated.
    pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>, LinterError> {
        let metadata =
            fs::metadata(root).map_err(|e| LinterError::discovery(root, e.to_string()))?;

        let mut files = Vec::new();

        if metadata.is_file() {
            let relative = root.file_name().map(Path::new).unwrap_or(root);
            if !self.should_ignore(relative) {
                files.push(root.to_path_buf());
            }
        } else {
            let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                let pruned = self.is_excluded(&relative_to(entry.path(), root));
                if pruned {
                    debug!("Skipping excluded directory {}", entry.path().display());
                }
                !pruned
            });

            for entry in walker {
                let entry = entry.map_err(|e| {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    LinterError::discovery(path, e.to_string())
                })?;

                if !entry.file_type().is_file() {
                    continue;
                }

                let path = entry.path();
                if self.should_ignore(&relative_to(path, root)) {
                    continue;
                }

                files.push(path.to_path_buf());
            }
        }

        files.sort();
        files.dedup();

        info!("Discovered {} files to lint", files.len());
        Ok(files)
    }

    /// Filters an explicit file list.
    ///
    /// Explicit files bypass the include patterns but not the exclude
    /// patterns, which are matched relative to `root`. A listed file that
    /// does not exist is fatal.
    pub fn filter_files(&self, root: &Path, paths: &[PathBuf]) -> Result<Vec<PathBuf>, LinterError> {
        let mut files = Vec::with_capacity(paths.len());

        for path in paths {
            let metadata =
                fs::metadata(path).map_err(|e| LinterError::discovery(path, e.to_string()))?;
            if !metadata.is_file() {
                return Err(LinterError::discovery(path, "not a regular file"));
            }

            if self.is_excluded(&relative_to(path, root)) {
                debug!("Skipping excluded file {}", path.display());
                continue;
            }

            files.push(path.clone());
        }

        files.sort();
        files.dedup();

        info!("Discovered {} files to lint", files.len());
        Ok(files)
    }
}

/// Returns `path` relative to `root`.
///
/// The two may be spelled differently (`./a.md` against `/work`, or an
/// absolute path against `.`), so both are made absolute, then resolved
/// through symlinks, before giving up. A path outside `root` is returned
/// unchanged.
fn relative_to(path: &Path, root: &Path) -> PathBuf {
    if let Ok(relative) = path.strip_prefix(root) {
        return relative.to_path_buf();
    }

    if let (Ok(abs_path), Ok(abs_root)) = (std::path::absolute(path), std::path::absolute(root))
        && let Ok(relative) = abs_path.strip_prefix(&abs_root)
    {
        return relative.to_path_buf();
    }

    if let (Ok(real_path), Ok(real_root)) = (fs::canonicalize(path), fs::canonicalize(root))
        && let Ok(relative) = real_path.strip_prefix(&real_root)
    {
        return relative.to_path_buf();
    }

    path.to_path_buf()
}
