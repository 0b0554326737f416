//! Bound `readline()` calls flagged by the analyzer.

use std::collections::BTreeSet;

use codemod_ast::SourceTree;
use codemod_edit::StructuralEditor;

use crate::change::Change;
use crate::codemod::{Codemod, FileContext, TransformOutput};
use crate::descriptor::{ReviewRisk, RuleDescriptor};
use crate::error::CodemodError;

const SEARCH: &str = "$F.readline()";
const REWRITE: &str = "$F.readline(5_000_000)";
const CHANGE_DESCRIPTION: &str = "Add size limit to readline() call";

/// `f.readline()` becomes `f.readline(5_000_000)` on lines with a finding.
pub struct LimitReadline {
    descriptor: RuleDescriptor,
}

impl LimitReadline {
    /// Codemod with its descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptor: RuleDescriptor::new("limit-readline", "Limit readline()", ReviewRisk::AutoFix)
                .with_description(
                    "Add a size limit to `readline()` calls to bound memory use on untrusted input.",
                )
                .with_finding_source("limit-readline.yaml")
                .with_reference("https://cwe.mitre.org/data/definitions/400.html"),
        }
    }
}

impl Default for LimitReadline {
    fn default() -> Self {
        Self::new()
    }
}

impl Codemod for LimitReadline {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    fn transform(
        &self,
        tree: SourceTree,
        file: &FileContext<'_>,
    ) -> Result<TransformOutput, CodemodError> {
        let flagged: BTreeSet<usize> = file.findings_for(&self.descriptor).map(|f| f.line).collect();

        let result = StructuralEditor::replace_where(tree.source(), SEARCH, REWRITE, |edit| {
            flagged.contains(&edit.line) && file.line_filter.allows(edit.line)
        })?;
        if result.edits.is_empty() {
            return Ok(TransformOutput::unchanged(tree));
        }

        let changes = result
            .edits
            .iter()
            .map(|edit| Change::new(edit.line, CHANGE_DESCRIPTION))
            .collect();
        Ok(TransformOutput::rewritten(SourceTree::parse(result.modified)?, changes))
    }
}
