//! File Selector: recursive discovery filtered by include/exclude globs.
//!
//! Uses `globset` (ripgrep's core) to compile each pattern list into a single
//! matcher, and `walkdir` for traversal.
//!
//! # Matching rules
//!
//! ```text
//! relative path  "pkg/tests/test_a.py"
//!      ↓
//! candidates     "pkg/tests/test_a.py", "tests/test_a.py", "test_a.py"
//!      ↓
//! exclude set matches any candidate?  → Excluded (include never consulted)
//! include set matches any candidate?  → Included
//! otherwise                           → Unmatched
//! ```
//!
//! `*` and `?` never cross a `/`, so `tests/*` covers `tests/a.py` but not
//! `tests/sub/a.py`; `**` spans directories.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::SelectorError;

/// Include patterns used when the caller supplies none.
pub const DEFAULT_INCLUDE: &[&str] = &["*.py"];

/// Outcome of matching one relative path against the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Matched an exclude pattern.
    Excluded,
    /// Matched an include pattern and no exclude pattern.
    Included,
    /// Matched nothing.
    Unmatched,
}

/// Compiled include/exclude pattern sets.
#[derive(Debug, Clone)]
pub struct FileSelector {
    include: GlobSet,
    exclude: GlobSet,
}

impl FileSelector {
    /// Compile include and exclude pattern lists.
    ///
    /// An empty include list falls back to [`DEFAULT_INCLUDE`]; an empty
    /// exclude list excludes nothing.
    ///
    /// # Errors
    ///
    /// Returns `SelectorError::InvalidPattern` for the first pattern that
    /// fails to compile.
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self, SelectorError> {
        let include = if include.is_empty() {
            build_set(DEFAULT_INCLUDE)?
        } else {
            build_set(include)?
        };
        Ok(Self {
            include,
            exclude: build_set(exclude)?,
        })
    }

    /// Classify a root-relative path (`/`-separated). Exclusion is checked
    /// first and short-circuits the include check.
    #[must_use]
    pub fn classify(&self, relative: &str) -> Selection {
        if matches_any_suffix(&self.exclude, relative) {
            return Selection::Excluded;
        }
        if matches_any_suffix(&self.include, relative) {
            Selection::Included
        } else {
            Selection::Unmatched
        }
    }

    /// Recursively list selected files under `root`, sorted by relative path.
    ///
    /// # Errors
    ///
    /// Returns `SelectorError::RootNotFound` when `root` is not a directory.
    pub fn select(&self, root: &Path) -> Result<Vec<PathBuf>, SelectorError> {
        if !root.is_dir() {
            return Err(SelectorError::RootNotFound(root.to_path_buf()));
        }

        let mut selected: Vec<(String, PathBuf)> = Vec::new();
        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by(|a, b| a.file_name().cmp(b.file_name()))
        {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = relative_path(root, entry.path());
            match self.classify(&relative) {
                Selection::Included => selected.push((relative, entry.into_path())),
                Selection::Excluded => debug!(path = %relative, "excluded by pattern"),
                Selection::Unmatched => {}
            }
        }

        selected.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(selected.into_iter().map(|(_, path)| path).collect())
    }
}

/// Split a comma-separated pattern list, dropping empty entries.
#[must_use]
pub fn split_patterns(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Root-relative path of `path` with `/` separators.
///
/// Paths outside `root` are returned as given.
#[must_use]
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn build_set<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet, SelectorError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| SelectorError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| SelectorError::InvalidPattern {
        pattern: patterns
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(","),
        source,
    })
}

/// Right-anchored match: the whole path or any trailing run of components.
fn matches_any_suffix(set: &GlobSet, relative: &str) -> bool {
    if set.is_empty() {
        return false;
    }
    if set.is_match(relative) {
        return true;
    }
    relative
        .match_indices('/')
        .any(|(idx, _)| set.is_match(&relative[idx + 1..]))
}
