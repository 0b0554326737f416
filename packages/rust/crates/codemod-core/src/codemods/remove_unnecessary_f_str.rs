//! Strip the `f` prefix from f-strings that contain no substitution.

use codemod_ast::{SourceTree, string_has_interpolation, string_prefix};
use codemod_edit::{TextEdit, apply_edits};

use crate::change::Change;
use crate::codemod::{Codemod, FileContext, TransformOutput};
use crate::descriptor::{ReviewRisk, RuleDescriptor};
use crate::error::CodemodError;

const CHANGE_DESCRIPTION: &str = "Remove unnecessary f-string";

/// `f"hello"` becomes `"hello"`; `f"{x}"` and `f"{{x}}"` are left alone.
pub struct RemoveUnnecessaryFStr {
    descriptor: RuleDescriptor,
}

impl RemoveUnnecessaryFStr {
    /// Codemod with its descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptor: RuleDescriptor::new(
                "remove-unnecessary-f-str",
                CHANGE_DESCRIPTION,
                ReviewRisk::AutoFix,
            )
            .with_description("Remove the `f` prefix from f-strings without any interpolation.")
            .with_reference(
                "https://pylint.readthedocs.io/en/latest/user_guide/messages/warning/f-string-without-interpolation.html",
            )
            .always_eligible(),
        }
    }
}

impl Default for RemoveUnnecessaryFStr {
    fn default() -> Self {
        Self::new()
    }
}

impl Codemod for RemoveUnnecessaryFStr {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    fn transform(
        &self,
        tree: SourceTree,
        file: &FileContext<'_>,
    ) -> Result<TransformOutput, CodemodError> {
        let mut edits = Vec::new();
        let mut changes = Vec::new();

        for node in tree.preorder().filter(|n| n.kind() == "string") {
            let Some((start, prefix)) = string_prefix(&tree, node) else {
                continue;
            };
            if !prefix.contains(['f', 'F']) || string_has_interpolation(&tree, node) {
                continue;
            }
            let line = SourceTree::line_of(node);
            if !file.line_filter.allows(line) {
                continue;
            }
            let token = tree.text(start).replace(['f', 'F'], "");
            edits.push(TextEdit::replace(start.start_byte(), start.end_byte(), token));
            changes.push(Change::new(line, CHANGE_DESCRIPTION));
        }

        if edits.is_empty() {
            return Ok(TransformOutput::unchanged(tree));
        }
        let rewritten = SourceTree::parse(apply_edits(tree.source(), &edits)?)?;
        Ok(TransformOutput::rewritten(rewritten, changes))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::line_filter::LineFilter;

    fn run(source: &str, filter: &LineFilter) -> TransformOutput {
        let file = FileContext {
            path: Path::new("/r/a.py"),
            relative: "a.py",
            findings: &[],
            line_filter: filter,
        };
        RemoveUnnecessaryFStr::new()
            .transform(SourceTree::parse(source).unwrap(), &file)
            .unwrap()
    }

    #[test]
    fn test_strips_prefix_keeps_raw() {
        let out = run("a = rf'x'\nb = F\"y\"\n", &LineFilter::all());
        assert_eq!(out.tree.source(), "a = r'x'\nb = \"y\"\n");
        assert_eq!(out.changes.len(), 2);
    }

    #[test]
    fn test_escaped_braces_untouched() {
        let out = run("a = f\"{{x}}\"\n", &LineFilter::all());
        assert_eq!(out.tree.source(), "a = f\"{{x}}\"\n");
        assert!(out.changes.is_empty());
    }
}
