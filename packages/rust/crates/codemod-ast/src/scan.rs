//! Pattern compilation and offset helpers for ast-grep matching.

use crate::error::AstError;
use crate::re_exports::{Pattern, SupportLang};

/// Create a Python search pattern.
///
/// # Errors
///
/// Returns `AstError::Pattern` when ast-grep cannot compile the pattern.
pub fn pattern(pat: &str) -> Result<Pattern, AstError> {
    Pattern::try_new(pat, SupportLang::Python)
        .map_err(|e| AstError::Pattern(format!("{pat}: {e}")))
}

/// 1-indexed line containing byte `offset` of `content`.
#[must_use]
pub fn line_at_offset(content: &str, offset: usize) -> usize {
    let end = offset.min(content.len());
    content.as_bytes()[..end].iter().filter(|b| **b == b'\n').count() + 1
}
