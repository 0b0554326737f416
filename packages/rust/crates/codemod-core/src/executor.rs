//! Codemod Executor - parallel per-file application of codemods.
//!
//! Codemods run one after another in the order given; within a codemod the
//! selected files are processed in parallel with rayon. Every file is read
//! through an in-memory overlay, so a codemod sees the output of the codemods
//! before it even when nothing is written to disk.
//!
//! ```text
//! for codemod in codemods:              (sequential, registry order)
//!   files.par_iter():                   (rayon)
//!     cancelled?      → stop dispatching
//!     eligible?       → should_transform(descriptor, findings)
//!     read            → overlay or codemod-io
//!     parse           → SourceTree
//!     transform       → errors and panics become failures
//!     diff            → ChangeSet
//!     write           → unless dry-run
//! ```

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use codemod_ast::SourceTree;
use codemod_edit::generate_unified_diff;
use codemod_io::{DEFAULT_MAX_FILE_SIZE, read_source, write_source};
use dashmap::DashMap;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::change::ChangeSet;
use crate::codemod::{Codemod, FileContext, TransformOutput, should_transform};
use crate::context::ExecutionContext;
use crate::error::CodemodError;
use crate::findings::FindingIndex;
use crate::line_filter::LineFilterSpec;
use crate::selector::relative_path;

/// Executor tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Number of parallel workers (0 = rayon's global pool).
    pub workers: usize,
    /// Files larger than this are recorded as failures.
    pub max_file_size: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            workers: 0,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Caller-issued cancellation, checked before each file is dispatched.
///
/// In-flight files run to completion; no new file starts once set.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    /// Fresh, unset flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Statistics for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// (codemod, file) pairs dispatched.
    pub files_scanned: usize,
    /// Distinct files with at least one change set.
    pub files_changed: usize,
    /// Failure records across all codemods.
    pub failures: usize,
    /// Whether the run stopped early on cancellation.
    pub cancelled: bool,
}

/// What happened to one file under one codemod.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileOutcome {
    Ineligible,
    Unchanged,
    Changed,
    Failed,
}

/// Applies codemods to a list of files and records results in a context.
pub struct CodemodExecutor<'a> {
    ctx: &'a ExecutionContext,
    findings: &'a FindingIndex,
    line_filters: &'a LineFilterSpec,
    options: RunOptions,
    cancel: CancellationFlag,
    overlay: DashMap<PathBuf, String>,
    pool: Option<rayon::ThreadPool>,
}

impl<'a> CodemodExecutor<'a> {
    /// Executor recording into `ctx`.
    #[must_use]
    pub fn new(
        ctx: &'a ExecutionContext,
        findings: &'a FindingIndex,
        line_filters: &'a LineFilterSpec,
        options: RunOptions,
    ) -> Self {
        let pool = (options.workers > 0)
            .then(|| {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(options.workers)
                    .build()
            })
            .and_then(|built| match built {
                Ok(pool) => Some(pool),
                Err(e) => {
                    warn!(error = %e, "falling back to the global thread pool");
                    None
                }
            });

        Self {
            ctx,
            findings,
            line_filters,
            options,
            cancel: CancellationFlag::new(),
            overlay: DashMap::new(),
            pool,
        }
    }

    /// Use `flag` for cancellation.
    #[must_use]
    pub fn with_cancellation(mut self, flag: CancellationFlag) -> Self {
        self.cancel = flag;
        self
    }

    /// Run `codemods` in order over `files`.
    pub fn run(&self, codemods: &[Arc<dyn Codemod>], files: &[PathBuf]) -> RunStats {
        let scanned = AtomicUsize::new(0);
        let failures = AtomicUsize::new(0);
        let cancelled = AtomicBool::new(false);

        info!(
            codemods = codemods.len(),
            files = files.len(),
            dry_run = self.ctx.dry_run(),
            "starting codemod run"
        );

        for codemod in codemods {
            if self.cancel.is_cancelled() {
                cancelled.store(true, Ordering::Relaxed);
                break;
            }
            debug!(codemod = %codemod.descriptor().id, "running codemod");

            let work = || {
                files.par_iter().for_each(|path| {
                    if self.cancel.is_cancelled() {
                        cancelled.store(true, Ordering::Relaxed);
                        return;
                    }
                    scanned.fetch_add(1, Ordering::Relaxed);
                    if self.process_file(codemod.as_ref(), path) == FileOutcome::Failed {
                        failures.fetch_add(1, Ordering::Relaxed);
                    }
                });
            };
            match &self.pool {
                Some(pool) => pool.install(work),
                None => work(),
            }
        }

        let stats = RunStats {
            files_scanned: scanned.load(Ordering::Relaxed),
            files_changed: self.ctx.get_changed_files().len(),
            failures: failures.load(Ordering::Relaxed),
            cancelled: cancelled.load(Ordering::Relaxed),
        };
        info!(
            files_scanned = stats.files_scanned,
            files_changed = stats.files_changed,
            failures = stats.failures,
            cancelled = stats.cancelled,
            "codemod run finished"
        );
        stats
    }

    fn process_file(&self, codemod: &dyn Codemod, path: &Path) -> FileOutcome {
        let descriptor = codemod.descriptor();
        let relative = relative_path(self.ctx.directory(), path);
        let line_filter = self.line_filters.for_file(&relative);
        let file = FileContext {
            path,
            relative: &relative,
            findings: self.findings.for_file(&relative),
            line_filter: &line_filter,
        };

        if !should_transform(descriptor, &file) {
            debug!(codemod = %descriptor.id, path = %relative, "no findings; skipped");
            return FileOutcome::Ineligible;
        }

        let original = match self.read(path) {
            Ok(content) => content,
            Err(e) => return self.fail(&descriptor.id, &relative, &e),
        };
        let output = match SourceTree::parse(original.as_str())
            .map_err(CodemodError::from)
            .and_then(|tree| guarded_transform(codemod, tree, &file))
        {
            Ok(output) => output,
            Err(e) => return self.fail(&descriptor.id, &relative, &e),
        };

        let TransformOutput {
            tree,
            changes,
            dependencies,
        } = output;
        let modified = tree.into_source();
        if changes.is_empty() && modified == original {
            debug!(codemod = %descriptor.id, path = %relative, "no changes");
            return FileOutcome::Unchanged;
        }

        let diff = generate_unified_diff(&original, &modified);
        if !self.ctx.dry_run() {
            if let Err(e) = write_source(path, &modified) {
                return self.fail(&descriptor.id, &relative, &CodemodError::from(e));
            }
        }

        debug!(
            codemod = %descriptor.id,
            path = %relative,
            changes = changes.len(),
            "file changed"
        );
        self.overlay.insert(path.to_path_buf(), modified);
        self.ctx
            .add_result(&descriptor.id, ChangeSet::new(relative.as_str(), diff, changes));
        for dependency in dependencies {
            self.ctx.add_dependency(dependency);
        }
        FileOutcome::Changed
    }

    fn read(&self, path: &Path) -> Result<String, CodemodError> {
        if let Some(content) = self.overlay.get(path) {
            return Ok(content.value().clone());
        }
        Ok(read_source(path, self.options.max_file_size)?)
    }

    fn fail(&self, codemod_id: &str, relative: &str, error: &CodemodError) -> FileOutcome {
        warn!(codemod = codemod_id, path = relative, error = %error, "codemod failed on file");
        self.ctx.add_failure(codemod_id, relative);
        FileOutcome::Failed
    }
}

impl std::fmt::Debug for CodemodExecutor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodemodExecutor")
            .field("options", &self.options)
            .field("cancelled", &self.cancel.is_cancelled())
            .field("overlay_files", &self.overlay.len())
            .finish_non_exhaustive()
    }
}

/// Invoke `transform`, turning a panic into a `CodemodError::Panicked`.
fn guarded_transform(
    codemod: &dyn Codemod,
    tree: SourceTree,
    file: &FileContext<'_>,
) -> Result<TransformOutput, CodemodError> {
    catch_unwind(AssertUnwindSafe(|| codemod.transform(tree, file))).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(CodemodError::Panicked(message))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_flag_is_shared() {
        let flag = CancellationFlag::new();
        let clone = flag.clone();
        assert!(!flag.is_cancelled());
        clone.cancel();
        assert!(flag.is_cancelled());
    }

    #[test]
    fn test_default_options() {
        let options = RunOptions::default();
        assert_eq!(options.workers, 0);
        assert_eq!(options.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }
}
