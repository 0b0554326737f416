//! The transformation contract every codemod implements.
//!
//! A codemod receives a parsed file plus that file's findings and line
//! filter, and returns a (possibly) rewritten tree with its ordered change
//! records. It never touches the [`ExecutionContext`](crate::ExecutionContext);
//! the executor records results after `transform` returns.

use std::path::Path;

use codemod_ast::SourceTree;

use crate::change::Change;
use crate::descriptor::RuleDescriptor;
use crate::error::CodemodError;
use crate::findings::SemanticFinding;
use crate::line_filter::LineFilter;

/// Per-file inputs handed to a codemod.
#[derive(Debug, Clone, Copy)]
pub struct FileContext<'a> {
    /// Absolute path of the file.
    pub path: &'a Path,
    /// Root-relative path, `/`-separated.
    pub relative: &'a str,
    /// Findings for this file (all rules).
    pub findings: &'a [SemanticFinding],
    /// Lines this run may edit.
    pub line_filter: &'a LineFilter,
}

impl FileContext<'_> {
    /// Findings that reference the codemod described by `descriptor`.
    pub fn findings_for<'d>(
        &'d self,
        descriptor: &'d RuleDescriptor,
    ) -> impl Iterator<Item = &'d SemanticFinding> + 'd {
        self.findings
            .iter()
            .filter(move |f| descriptor.accepts_rule_ref(&f.rule_ref))
    }
}

/// What a codemod produced for one file.
#[derive(Debug)]
pub struct TransformOutput {
    /// Full rewritten tree (the input tree when nothing changed).
    pub tree: SourceTree,
    /// Atomic change records in source order.
    pub changes: Vec<Change>,
    /// Newly required external packages.
    pub dependencies: Vec<String>,
}

impl TransformOutput {
    /// Output for a file left untouched.
    #[must_use]
    pub fn unchanged(tree: SourceTree) -> Self {
        Self {
            tree,
            changes: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Output with a rewritten tree and its changes.
    #[must_use]
    pub fn rewritten(tree: SourceTree, changes: Vec<Change>) -> Self {
        Self {
            tree,
            changes,
            dependencies: Vec::new(),
        }
    }

    /// Attach a newly required dependency.
    #[must_use]
    pub fn with_dependency(mut self, name: impl Into<String>) -> Self {
        self.dependencies.push(name.into());
        self
    }
}

/// A named, self-contained source transformation.
///
/// Implementations hold no per-file mutable state; the same instance is
/// invoked concurrently for different files.
pub trait Codemod: Send + Sync {
    /// Immutable metadata, including the `always_eligible` capability.
    fn descriptor(&self) -> &RuleDescriptor;

    /// Rewrite `tree`, consulting `file.line_filter` before every edit.
    ///
    /// # Errors
    ///
    /// Any error is recorded as a failure of this codemod on this file.
    fn transform(
        &self,
        tree: SourceTree,
        file: &FileContext<'_>,
    ) -> Result<TransformOutput, CodemodError>;
}

/// Eligibility gate: the declared `always_eligible` capability, or at least
/// one finding for this file referencing the codemod.
#[must_use]
pub fn should_transform(descriptor: &RuleDescriptor, file: &FileContext<'_>) -> bool {
    descriptor.always_eligible || file.findings_for(descriptor).next().is_some()
}
