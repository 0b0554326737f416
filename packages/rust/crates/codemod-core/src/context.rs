//! Execution context: run-scoped, append-only accumulation of results.
//!
//! All writes go through `add_*` methods taking `&self`; the stores are
//! `DashMap`/`DashSet`, so workers append concurrently without external
//! locking. Reads sort by path, so the order in which parallel workers
//! finish never shows up in queries or reports.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::{DashMap, DashSet};

use crate::change::ChangeSet;
use crate::codemod::Codemod;
use crate::project::PackageStore;
use crate::registry::CodemodRegistry;
use crate::report::{CodemodReport, compile_results};

/// Shared state for one codemod run.
#[derive(Debug)]
pub struct ExecutionContext {
    directory: PathBuf,
    dry_run: bool,
    registry: Arc<CodemodRegistry>,
    results_by_codemod: DashMap<String, Vec<ChangeSet>>,
    failures_by_codemod: DashMap<String, Vec<String>>,
    dependencies: DashSet<String>,
    package_stores: DashMap<String, PackageStore>,
}

impl ExecutionContext {
    /// Fresh context for a run over `directory`.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, dry_run: bool, registry: Arc<CodemodRegistry>) -> Self {
        Self {
            directory: directory.into(),
            dry_run,
            registry,
            results_by_codemod: DashMap::new(),
            failures_by_codemod: DashMap::new(),
            dependencies: DashSet::new(),
            package_stores: DashMap::new(),
        }
    }

    /// Root directory of the run.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Whether file writes are suppressed.
    #[must_use]
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Registry the run was configured with.
    #[must_use]
    pub fn registry(&self) -> &CodemodRegistry {
        &self.registry
    }

    /// Record a change set produced by `codemod_id`.
    pub fn add_result(&self, codemod_id: &str, change_set: ChangeSet) {
        self.results_by_codemod
            .entry(codemod_id.to_string())
            .or_default()
            .push(change_set);
    }

    /// Record that `codemod_id` failed on `file_path`.
    pub fn add_failure(&self, codemod_id: &str, file_path: impl Into<String>) {
        self.failures_by_codemod
            .entry(codemod_id.to_string())
            .or_default()
            .push(file_path.into());
    }

    /// Record a newly required package. Adding a name twice is a no-op.
    pub fn add_dependency(&self, dependency: impl Into<String>) {
        self.dependencies.insert(dependency.into());
    }

    /// Record project metadata discovered for the run.
    pub fn add_package_store(&self, store: PackageStore) {
        self.package_stores
            .insert(store.file.to_string_lossy().into_owned(), store);
    }

    /// Change sets of `codemod_id`, sorted by path.
    #[must_use]
    pub fn get_results(&self, codemod_id: &str) -> Vec<ChangeSet> {
        let mut results = self
            .results_by_codemod
            .get(codemod_id)
            .map(|r| r.value().clone())
            .unwrap_or_default();
        results.sort_by(|a, b| a.path.cmp(&b.path));
        results
    }

    /// Failed paths of `codemod_id`, sorted.
    #[must_use]
    pub fn get_failures(&self, codemod_id: &str) -> Vec<String> {
        let mut failures = self
            .failures_by_codemod
            .get(codemod_id)
            .map(|r| r.value().clone())
            .unwrap_or_default();
        failures.sort();
        failures
    }

    /// Union of all changed paths across codemods, sorted.
    #[must_use]
    pub fn get_changed_files(&self) -> Vec<String> {
        let union: BTreeSet<String> = self
            .results_by_codemod
            .iter()
            .flat_map(|entry| {
                entry
                    .value()
                    .iter()
                    .map(|cs| cs.path.clone())
                    .collect::<Vec<_>>()
            })
            .collect();
        union.into_iter().collect()
    }

    /// Union of all failed paths across codemods, sorted.
    #[must_use]
    pub fn get_failed_files(&self) -> Vec<String> {
        let union: BTreeSet<String> = self
            .failures_by_codemod
            .iter()
            .flat_map(|entry| entry.value().clone())
            .collect();
        union.into_iter().collect()
    }

    /// Required dependencies, sorted.
    #[must_use]
    pub fn dependencies(&self) -> Vec<String> {
        let mut deps: Vec<String> = self.dependencies.iter().map(|d| d.key().clone()).collect();
        deps.sort();
        deps
    }

    /// Project metadata stores, sorted by file.
    #[must_use]
    pub fn package_stores(&self) -> Vec<PackageStore> {
        let mut stores: Vec<PackageStore> =
            self.package_stores.iter().map(|s| s.value().clone()).collect();
        stores.sort_by(|a, b| a.file.cmp(&b.file));
        stores
    }

    /// One report entry per codemod (in the given order) with results.
    #[must_use]
    pub fn compile_results(&self, codemods: &[Arc<dyn Codemod>]) -> Vec<CodemodReport> {
        compile_results(self, codemods)
    }
}
