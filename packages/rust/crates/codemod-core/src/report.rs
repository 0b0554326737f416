//! Report compilation: a read-only view over an [`ExecutionContext`].
//!
//! Compiling never mutates the context and always yields the same report
//! for the same accumulated state.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::change::ChangeSet;
use crate::codemod::Codemod;
use crate::context::ExecutionContext;
use crate::project::PackageStore;

/// Report section for one codemod.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodemodReport {
    /// Codemod id.
    pub codemod: String,
    /// One-line summary.
    pub summary: String,
    /// Long description.
    pub description: String,
    /// Documentation references.
    pub references: Vec<String>,
    /// Extra properties (`reviewRisk`).
    pub properties: BTreeMap<String, Value>,
    /// Files this codemod failed on.
    pub failed_files: Vec<String>,
    /// Per-file change sets, sorted by path.
    pub changeset: Vec<ChangeSet>,
}

/// Run-level totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Root directory of the run.
    pub directory: String,
    /// Whether writes were suppressed.
    pub dry_run: bool,
    /// Every changed file across codemods.
    pub changed_files: Vec<String>,
    /// Every failed file across codemods.
    pub failed_files: Vec<String>,
    /// Newly required dependencies.
    pub dependencies: Vec<String>,
    /// Project metadata files found in the root.
    pub package_files: Vec<PackageStore>,
}

/// Complete run report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Run-level totals.
    pub run: RunSummary,
    /// One section per codemod with at least one change set.
    pub results: Vec<CodemodReport>,
}

impl Report {
    /// Pretty JSON rendering.
    ///
    /// # Errors
    ///
    /// Propagates serialization errors.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// One section per codemod, in the given order, skipping codemods that
/// produced no change set.
#[must_use]
pub fn compile_results(ctx: &ExecutionContext, codemods: &[Arc<dyn Codemod>]) -> Vec<CodemodReport> {
    codemods
        .iter()
        .filter_map(|codemod| {
            let descriptor = codemod.descriptor();
            let changeset = ctx.get_results(&descriptor.id);
            if changeset.is_empty() {
                return None;
            }
            let mut properties = BTreeMap::new();
            properties.insert(
                "reviewRisk".to_string(),
                Value::String(descriptor.review_risk.as_str().to_string()),
            );
            Some(CodemodReport {
                codemod: descriptor.id.clone(),
                summary: descriptor.summary.clone(),
                description: descriptor.description.clone(),
                references: descriptor.references.clone(),
                properties,
                failed_files: ctx.get_failures(&descriptor.id),
                changeset,
            })
        })
        .collect()
}

/// Full report: run summary plus per-codemod sections.
#[must_use]
pub fn compile_report(ctx: &ExecutionContext, codemods: &[Arc<dyn Codemod>]) -> Report {
    Report {
        run: RunSummary {
            directory: ctx.directory().display().to_string(),
            dry_run: ctx.dry_run(),
            changed_files: ctx.get_changed_files(),
            failed_files: ctx.get_failed_files(),
            dependencies: ctx.dependencies(),
            package_files: ctx.package_stores(),
        },
        results: compile_results(ctx, codemods),
    }
}
