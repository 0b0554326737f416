//! Force `SESSION_COOKIE_SECURE = True` in Django settings modules.
//!
//! An assignment to anything other than `True` is corrected and recorded as a
//! change. When the module has no assignment at all, one is appended without
//! a change record; correction and appending never both happen in one file.

use std::path::Path;

use codemod_ast::{SourceTree, assignment_parts};
use codemod_edit::{TextEdit, apply_edits};

use crate::change::Change;
use crate::codemod::{Codemod, FileContext, TransformOutput};
use crate::descriptor::{ReviewRisk, RuleDescriptor};
use crate::error::CodemodError;

const FLAG: &str = "SESSION_COOKIE_SECURE";
const CHANGE_DESCRIPTION: &str = "Sets Django's `SESSION_COOKIE_SECURE` flag if off or missing.";

/// Secure-cookie flag rule for Django settings files.
pub struct DjangoSessionCookieSecureOff {
    descriptor: RuleDescriptor,
}

impl DjangoSessionCookieSecureOff {
    /// Codemod with its descriptor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            descriptor: RuleDescriptor::new(
                "django-session-cookie-secure-off",
                CHANGE_DESCRIPTION,
                ReviewRisk::MergeAfterReview,
            )
            .with_finding_source("detect-django-settings.yaml")
            .with_reference(
                "https://docs.djangoproject.com/en/4.2/ref/settings/#session-cookie-secure",
            )
            // A missing assignment produces no finding, so findings cannot gate this rule.
            .always_eligible(),
        }
    }
}

impl Default for DjangoSessionCookieSecureOff {
    fn default() -> Self {
        Self::new()
    }
}

impl Codemod for DjangoSessionCookieSecureOff {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    fn transform(
        &self,
        tree: SourceTree,
        file: &FileContext<'_>,
    ) -> Result<TransformOutput, CodemodError> {
        if !is_django_settings_file(file.path) {
            return Ok(TransformOutput::unchanged(tree));
        }

        let mut edits = Vec::new();
        let mut changes = Vec::new();
        let mut assigned = false;

        for node in tree.preorder().filter(|n| n.kind() == "assignment") {
            let Some((target, value)) = assignment_parts(node) else {
                continue;
            };
            if target.kind() != "identifier" || tree.text(target) != FLAG {
                continue;
            }
            assigned = true;
            if value.kind() == "true" {
                continue;
            }
            let line = SourceTree::line_of(node);
            if !file.line_filter.allows(line) {
                continue;
            }
            edits.push(TextEdit::replace(value.start_byte(), value.end_byte(), "True"));
            changes.push(Change::new(line, CHANGE_DESCRIPTION));
        }

        // The appended line is new, so no line filter can name it.
        if !assigned {
            let source = tree.source();
            let separator = if source.is_empty() || source.ends_with('\n') {
                ""
            } else {
                "\n"
            };
            edits.push(TextEdit::insert(
                source.len(),
                format!("{separator}{FLAG} = True\n"),
            ));
        }

        if edits.is_empty() {
            return Ok(TransformOutput::unchanged(tree));
        }
        let rewritten = SourceTree::parse(apply_edits(tree.source(), &edits)?)?;
        Ok(TransformOutput::rewritten(rewritten, changes))
    }
}

/// A `*settings.py*` file whose grandparent directory holds `manage.py`.
fn is_django_settings_file(path: &Path) -> bool {
    let named_settings = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().contains("settings.py"));
    named_settings
        && path
            .parent()
            .and_then(Path::parent)
            .is_some_and(|project| project.join("manage.py").exists())
}
