//! One-call entry point: configuration in, report out.
//!
//! Every configuration error (missing root, bad glob, unknown codemod id)
//! surfaces before any file is read; per-file problems end up in the report.

use std::path::PathBuf;
use std::sync::Arc;

use codemod_io::DEFAULT_MAX_FILE_SIZE;
use tracing::info;

use crate::codemod::Codemod;
use crate::context::ExecutionContext;
use crate::error::EngineError;
use crate::executor::{CancellationFlag, CodemodExecutor, RunOptions, RunStats};
use crate::findings::{FindingIndex, SemanticFinding};
use crate::line_filter::LineFilterSpec;
use crate::project::ProjectAnalyzer;
use crate::registry::CodemodRegistry;
use crate::report::{Report, compile_report};
use crate::selector::FileSelector;
use crate::settings::CodemodSettings;

/// Fully resolved run configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root directory.
    pub directory: PathBuf,
    /// File include globs (empty means `*.py`).
    pub path_include: Vec<String>,
    /// File exclude globs.
    pub path_exclude: Vec<String>,
    /// Codemod ids to run (empty means all).
    pub codemod_include: Vec<String>,
    /// Codemod ids to skip.
    pub codemod_exclude: Vec<String>,
    /// Suppress file writes.
    pub dry_run: bool,
    /// Executor tuning.
    pub options: RunOptions,
    /// Analyzer findings.
    pub findings: Vec<SemanticFinding>,
    /// Per-file line filters.
    pub line_filters: LineFilterSpec,
}

impl RunConfig {
    /// Defaults for `directory`: every codemod, `*.py`, writes enabled.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            path_include: Vec::new(),
            path_exclude: Vec::new(),
            codemod_include: Vec::new(),
            codemod_exclude: Vec::new(),
            dry_run: false,
            options: RunOptions::default(),
            findings: Vec::new(),
            line_filters: LineFilterSpec::new(),
        }
    }

    /// Resolve merged settings into a run configuration.
    ///
    /// Line filters from `settings` are added to `line_filters`.
    ///
    /// # Errors
    ///
    /// `EngineError::Settings` for an invalid line filter entry.
    pub fn from_settings(
        directory: impl Into<PathBuf>,
        settings: CodemodSettings,
        findings: Vec<SemanticFinding>,
        mut line_filters: LineFilterSpec,
    ) -> Result<Self, EngineError> {
        settings.apply_line_filters(&mut line_filters)?;
        Ok(Self {
            directory: directory.into(),
            path_include: settings.path_include.unwrap_or_default(),
            path_exclude: settings.path_exclude.unwrap_or_default(),
            codemod_include: settings.codemod_include.unwrap_or_default(),
            codemod_exclude: settings.codemod_exclude.unwrap_or_default(),
            dry_run: settings.dry_run.unwrap_or(false),
            options: RunOptions {
                workers: settings.workers.unwrap_or(0),
                max_file_size: settings.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE),
            },
            findings,
            line_filters,
        })
    }

    /// Builder: dry-run mode.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Builder: analyzer findings.
    #[must_use]
    pub fn with_findings(mut self, findings: Vec<SemanticFinding>) -> Self {
        self.findings = findings;
        self
    }

    /// Builder: line filters.
    #[must_use]
    pub fn with_line_filters(mut self, line_filters: LineFilterSpec) -> Self {
        self.line_filters = line_filters;
        self
    }
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct RunOutcome {
    /// Compiled report.
    pub report: Report,
    /// Executor statistics.
    pub stats: RunStats,
    /// Accumulated state, kept for inspection.
    pub context: ExecutionContext,
}

/// Select files and codemods, apply them, and compile the report.
///
/// # Errors
///
/// Configuration errors only; per-file failures are part of the report.
pub fn run(
    registry: Arc<CodemodRegistry>,
    config: &RunConfig,
    cancel: CancellationFlag,
) -> Result<RunOutcome, EngineError> {
    let selector = FileSelector::new(&config.path_include, &config.path_exclude)?;
    let codemods: Vec<Arc<dyn Codemod>> =
        registry.select(&config.codemod_include, &config.codemod_exclude)?;
    let files = selector.select(&config.directory)?;
    info!(
        directory = %config.directory.display(),
        files = files.len(),
        codemods = codemods.len(),
        "selected files and codemods"
    );

    let context = ExecutionContext::new(config.directory.clone(), config.dry_run, registry);
    for store in ProjectAnalyzer::new().analyze(&config.directory) {
        context.add_package_store(store);
    }

    let findings = FindingIndex::new(&config.directory, config.findings.iter().cloned());
    let stats = CodemodExecutor::new(&context, &findings, &config.line_filters, config.options)
        .with_cancellation(cancel)
        .run(&codemods, &files);

    let report = compile_report(&context, &codemods);
    Ok(RunOutcome {
        report,
        stats,
        context,
    })
}
