//! Resolve configuration, run the engine, emit the report.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use codemod_core::{
    CancellationFlag, CodemodRegistry, CodemodSettings, LineFilterSpec, Report, RunConfig,
    RunStats, default_registry, load_findings, run,
};

use crate::cli::Cli;

/// Outcome of one CLI invocation.
#[derive(Debug)]
pub enum Outcome {
    /// `--list` output.
    Listed(String),
    /// A completed run.
    Ran {
        /// Compiled report.
        report: Box<Report>,
        /// Executor statistics.
        stats: RunStats,
    },
}

/// Build the run configuration from flags, settings file and defaults.
///
/// # Errors
///
/// Any configuration error: missing root, unreadable settings or findings,
/// malformed line filters.
pub fn resolve_config(cli: &Cli, directory: &Path) -> anyhow::Result<RunConfig> {
    let directory = std::fs::canonicalize(directory)
        .with_context(|| format!("root directory not found: {}", directory.display()))?;

    let file_settings = match &cli.config {
        Some(path) => CodemodSettings::load(path)?,
        None => CodemodSettings::load_default(&directory)?,
    };
    let settings = file_settings.merge(cli.settings_overlay());

    let findings = match &cli.findings {
        Some(path) => load_findings(path)?,
        None => Vec::new(),
    };

    let mut line_filters = LineFilterSpec::new();
    for arg in &cli.line_include {
        line_filters
            .add_include_arg(arg)
            .with_context(|| format!("invalid --line-include {arg}"))?;
    }
    for arg in &cli.line_exclude {
        line_filters
            .add_exclude_arg(arg)
            .with_context(|| format!("invalid --line-exclude {arg}"))?;
    }

    Ok(RunConfig::from_settings(
        directory,
        settings,
        findings,
        line_filters,
    )?)
}

/// Execute one invocation.
///
/// # Errors
///
/// Configuration errors; per-file failures are part of the report.
pub fn execute(cli: &Cli, cancel: CancellationFlag) -> anyhow::Result<Outcome> {
    let registry = default_registry()?;
    if cli.list {
        return Ok(Outcome::Listed(list_codemods(&registry)));
    }

    let directory = cli
        .directory
        .as_deref()
        .context("a project directory is required")?;
    let config = resolve_config(cli, directory)?;
    let outcome = run(Arc::new(registry), &config, cancel)?;
    info!(
        changed = outcome.report.run.changed_files.len(),
        failed = outcome.report.run.failed_files.len(),
        "report compiled"
    );
    Ok(Outcome::Ran {
        report: Box::new(outcome.report),
        stats: outcome.stats,
    })
}

/// Write `report` as pretty JSON to `output`, or return it for stdout.
///
/// # Errors
///
/// Serialization or write failures.
pub fn emit_report(report: &Report, output: Option<&Path>) -> anyhow::Result<Option<String>> {
    let json = report.to_json_pretty().context("failed to serialize report")?;
    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            info!(path = %path.display(), "report written");
            Ok(None)
        }
        None => Ok(Some(json)),
    }
}

/// One line per codemod: id, review risk, summary.
#[must_use]
pub fn list_codemods(registry: &CodemodRegistry) -> String {
    let width = registry
        .list_all()
        .iter()
        .map(|d| d.id.len())
        .max()
        .unwrap_or_default();
    registry.list_all().iter().fold(String::new(), |mut out, d| {
        let _ = writeln!(
            out,
            "{:<width$}  {:<18}  {}",
            d.id,
            d.review_risk.as_str(),
            d.summary
        );
        out
    })
}
