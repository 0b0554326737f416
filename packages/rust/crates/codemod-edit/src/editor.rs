//! Structural editor: ast-grep pattern rewrites with a per-match gate.

use codemod_ast::{LanguageExt, MatcherExt, Pattern, SupportLang, line_at_offset, pattern};
use tracing::debug;

use crate::capture::substitute_captures;
use crate::error::EditError;
use crate::splice::apply_edits;
use crate::types::{EditLocation, EditResult, TextEdit};

/// StructuralEditor - AST-based code modification engine for Python.
///
/// # Example
///
/// ```rust,ignore
/// use codemod_edit::StructuralEditor;
///
/// let result = StructuralEditor::replace(
///     "x = connect(host, port)",
///     "connect($$$ARGS)",
///     "async_connect($$$ARGS)",
/// )?;
/// assert!(result.modified.contains("async_connect"));
/// ```
pub struct StructuralEditor;

impl StructuralEditor {
    /// Replace every match of `pat` with `replacement`.
    ///
    /// # Errors
    ///
    /// Returns `EditError::Pattern` when the pattern does not compile.
    pub fn replace(content: &str, pat: &str, replacement: &str) -> Result<EditResult, EditError> {
        Self::replace_where(content, pat, replacement, |_| true)
    }

    /// Replace matches of `pat`, consulting `accept` for each candidate.
    ///
    /// Candidates are discovered in source order. A rejected candidate leaves
    /// its text untouched without affecting any other candidate. A candidate
    /// nested inside an accepted match (`f.readline().readline()`) cannot be
    /// spliced in the same pass, so it is offered to `accept` again in a
    /// follow-up pass over the rewritten text. Passes stop once no nested
    /// candidate remains.
    ///
    /// # Errors
    ///
    /// Returns `EditError::Pattern` when the pattern does not compile.
    pub fn replace_where<F>(
        content: &str,
        pat: &str,
        replacement: &str,
        mut accept: F,
    ) -> Result<EditResult, EditError>
    where
        F: FnMut(&EditLocation) -> bool,
    {
        let search_pattern = pattern(pat)?;
        let mut modified = content.to_string();
        let mut locations: Vec<EditLocation> = Vec::new();
        // At most one follow-up pass per candidate of the first pass.
        let mut passes_left: Option<usize> = None;

        loop {
            let pass = rewrite_pass(&modified, &search_pattern, replacement, &mut accept);
            let budget = *passes_left.get_or_insert(pass.candidates);
            if pass.edits.is_empty() {
                break;
            }
            modified = apply_edits(&modified, &pass.edits)?;
            locations.extend(pass.locations);
            if !pass.nested || budget == 0 {
                break;
            }
            debug!(pattern = pat, "nested structural matches; rewriting again");
            passes_left = Some(budget - 1);
        }

        Ok(EditResult {
            original: content.to_string(),
            modified,
            edits: locations,
        })
    }
}

/// Edits accepted in one scan over `content`.
struct Pass {
    edits: Vec<TextEdit>,
    locations: Vec<EditLocation>,
    candidates: usize,
    nested: bool,
}

fn rewrite_pass<F>(content: &str, search_pattern: &Pattern, replacement: &str, accept: &mut F) -> Pass
where
    F: FnMut(&EditLocation) -> bool,
{
    let root = SupportLang::Python.ast_grep(content);
    let root_node = root.root();

    let mut pass = Pass {
        edits: Vec::new(),
        locations: Vec::new(),
        candidates: 0,
        nested: false,
    };
    let mut covered_until = 0usize;

    for node in root_node.dfs() {
        let Some(m) = search_pattern.match_node(node.clone()) else {
            continue;
        };
        pass.candidates += 1;
        let start = m.range().start;
        let end = m.range().end;
        if start < covered_until {
            pass.nested = true;
            continue;
        }

        let original_text = m.text().to_string();
        let new_text = substitute_captures(replacement, m.get_env(), content);
        let last_newline = content[..start].rfind('\n').map_or(0, |i| i + 1);
        let location = EditLocation {
            line: line_at_offset(content, start),
            column: start - last_newline + 1,
            original_text,
            new_text,
        };

        if !accept(&location) {
            debug!(line = location.line, "structural match rejected");
            continue;
        }

        covered_until = end;
        pass.edits.push(TextEdit::replace(start, end, location.new_text.clone()));
        pass.locations.push(location);
    }

    pass
}
